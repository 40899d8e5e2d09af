//! Grouping of orbitals into (near-)degenerate energy levels.
//!
//! Two orbitals share a level iff their energies agree after rounding to
//! [`DISPLAY_DECIMALS`](crate::orbital::DISPLAY_DECIMALS) places, the same
//! rounding used for display, so the levels always match the printed energies.

use crate::orbital::{round_to_display, MolecularOrbital};
use itertools::Itertools;
use serde::Serialize;

/// Orbitals sharing one rounded energy, listed by rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegenerateGroup {
    energy: f64,
    ranks: Vec<usize>,
}

impl DegenerateGroup {
    /// Rounded energy shared by every member.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn is_degenerate(&self) -> bool {
        self.ranks.len() > 1
    }

    pub fn contains(&self, rank: usize) -> bool {
        self.ranks.contains(&rank)
    }

    /// Members of this level among `orbitals`, in rank order.
    pub fn members<'a>(
        &'a self,
        orbitals: &'a [MolecularOrbital],
    ) -> impl Iterator<Item = &'a MolecularOrbital> + 'a {
        orbitals
            .iter()
            .filter(move |o| self.contains(o.rank()))
            .sorted_by_key(|o| o.rank())
    }
}

/// Partition `orbitals` into energy levels, lowest level first.
pub fn group(orbitals: &[MolecularOrbital]) -> Vec<DegenerateGroup> {
    let levels = orbitals
        .iter()
        .sorted_by_key(|o| (o.energy_key(), o.rank()))
        .chunk_by(|o| o.energy_key());

    let mut groups = Vec::new();
    for (_, members) in &levels {
        let members: Vec<&MolecularOrbital> = members.collect();
        groups.push(DegenerateGroup {
            energy: round_to_display(members[0].energy()),
            ranks: members.iter().map(|o| o.rank()).collect(),
        });
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eigen::decompose;
    use crate::graph::MolecularGraph;
    use crate::hamiltonian::build;
    use crate::orbital::assemble;

    fn orbitals_for(graph: &MolecularGraph) -> Vec<MolecularOrbital> {
        assemble(decompose(&build(graph)).unwrap())
    }

    #[test]
    fn test_cyclobutadiene_levels() {
        let orbitals = orbitals_for(&MolecularGraph::ring(4));
        let groups = group(&orbitals);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].ranks(), &[1]);
        assert_eq!(groups[1].ranks(), &[2, 3]);
        assert_eq!(groups[1].energy(), 0.0);
        assert!(groups[1].energy().is_sign_positive());
        assert_eq!(groups[2].ranks(), &[4]);
    }

    #[test]
    fn test_benzene_levels() {
        let orbitals = orbitals_for(&MolecularGraph::ring(6));
        let groups = group(&orbitals);

        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![1, 2, 2, 1]);
        let energies: Vec<f64> = groups.iter().map(|g| g.energy()).collect();
        assert_eq!(energies, vec![-2.0, -1.0, 1.0, 2.0]);
        assert_eq!(groups.iter().filter(|g| g.is_degenerate()).count(), 2);
    }

    #[test]
    fn test_grouping_matches_rounded_equality() {
        let graphs = [
            MolecularGraph::ring(8),
            MolecularGraph::linear_chain(7),
            MolecularGraph::from_bonds(4, [(0, 1), (0, 2), (0, 3)]).unwrap(),
        ];
        for graph in &graphs {
            let orbitals = orbitals_for(graph);
            let groups = group(&orbitals);
            let total: usize = groups.iter().map(|g| g.len()).sum();
            assert_eq!(total, orbitals.len());

            for a in &orbitals {
                for b in &orbitals {
                    let same_group = groups
                        .iter()
                        .any(|g| g.contains(a.rank()) && g.contains(b.rank()));
                    let same_energy = a.rounded_energy() == b.rounded_energy();
                    assert_eq!(same_group, same_energy);
                }
            }
        }
    }

    #[test]
    fn test_group_order_follows_rank_order() {
        let orbitals = orbitals_for(&MolecularGraph::ring(8));
        let flattened: Vec<usize> = group(&orbitals)
            .iter()
            .flat_map(|g| g.ranks().to_vec())
            .collect();
        assert_eq!(flattened, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_members_lookup() {
        let orbitals = orbitals_for(&MolecularGraph::ring(6));
        let groups = group(&orbitals);
        let names: Vec<&str> = groups[1].members(&orbitals).map(|o| o.name()).collect();
        assert_eq!(names, vec!["ψ2", "ψ3"]);
    }

    #[test]
    fn test_group_of_unsorted_input() {
        let mut orbitals = orbitals_for(&MolecularGraph::ring(6));
        orbitals.reverse();
        let groups = group(&orbitals);
        assert_eq!(groups[0].energy(), -2.0);
        assert_eq!(groups[1].ranks(), &[2, 3]);
    }
}
