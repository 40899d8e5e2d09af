//! Molecular graph: π-centres as indices, bonds as an undirected simple edge set.

use crate::error::GraphError;
use serde::Serialize;
use std::collections::BTreeSet;

/// Unordered pair of bonded atom indices, stored with the smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2 }
        } else {
            Self { i: idx2, j: idx1 }
        }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.i == atom || self.j == atom
    }

    /// The atom on the other end of the bond, if `atom` is one of its ends.
    pub fn partner(&self, atom: usize) -> Option<usize> {
        if self.i == atom {
            Some(self.j)
        } else if self.j == atom {
            Some(self.i)
        } else {
            None
        }
    }
}

/// Snapshot of a conjugated skeleton: `atom_count` identical π-centres and
/// the set of bonds between them.
///
/// Every stored bond references valid indices and is not a self loop; the
/// edit operations below keep that invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MolecularGraph {
    atom_count: usize,
    bonds: BTreeSet<Bond>,
}

impl MolecularGraph {
    pub fn new(atom_count: usize) -> Self {
        Self {
            atom_count,
            bonds: BTreeSet::new(),
        }
    }

    /// Build a graph from explicit index pairs.
    pub fn from_bonds<I>(atom_count: usize, pairs: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(atom_count);
        for (i, j) in pairs {
            graph.add_bond(i, j)?;
        }
        Ok(graph)
    }

    /// Open chain `0-1-...-(n-1)`.
    pub fn linear_chain(n: usize) -> Self {
        let mut graph = Self::new(n);
        for i in 1..n {
            graph.bonds.insert(Bond::new(i - 1, i));
        }
        graph
    }

    /// Closed ring `0-1-...-(n-1)-0`. For `n < 3` this is the same as the chain.
    pub fn ring(n: usize) -> Self {
        let mut graph = Self::linear_chain(n);
        if n >= 3 {
            graph.bonds.insert(Bond::new(n - 1, 0));
        }
        graph
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atom_count == 0
    }

    pub fn bonds(&self) -> impl Iterator<Item = &Bond> + '_ {
        self.bonds.iter()
    }

    pub fn has_bond(&self, i: usize, j: usize) -> bool {
        self.bonds.contains(&Bond::new(i, j))
    }

    pub fn neighbors(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds.iter().filter_map(move |b| b.partner(atom))
    }

    pub fn degree(&self, atom: usize) -> usize {
        self.neighbors(atom).count()
    }

    /// Append a new atom and return its index.
    pub fn add_atom(&mut self) -> usize {
        self.atom_count += 1;
        self.atom_count - 1
    }

    /// Insert bond `{i, j}`. Inserting an existing bond leaves the graph unchanged.
    ///
    /// An index out of range or `i == j` is rejected; both surface as
    /// [`HuckelError::InvalidIndex`](crate::HuckelError::InvalidIndex).
    pub fn add_bond(&mut self, i: usize, j: usize) -> Result<(), GraphError> {
        self.check_pair(i, j)?;
        self.bonds.insert(Bond::new(i, j));
        Ok(())
    }

    /// Remove bond `{i, j}`; returns whether it was present.
    pub fn remove_bond(&mut self, i: usize, j: usize) -> Result<bool, GraphError> {
        self.check_pair(i, j)?;
        Ok(self.bonds.remove(&Bond::new(i, j)))
    }

    /// Delete the bond if present, create it otherwise.
    ///
    /// Returns whether the bond exists after the call.
    pub fn toggle_bond(&mut self, i: usize, j: usize) -> Result<bool, GraphError> {
        if self.remove_bond(i, j)? {
            Ok(false)
        } else {
            self.bonds.insert(Bond::new(i, j));
            Ok(true)
        }
    }

    /// Remove atom `index` with all its bonds; atoms above it shift down by one.
    pub fn remove_atom(&mut self, index: usize) -> Result<(), GraphError> {
        if index >= self.atom_count {
            return Err(GraphError::MissingAtom {
                index,
                atom_count: self.atom_count,
            });
        }

        let shift = |a: usize| if a > index { a - 1 } else { a };
        self.bonds = self
            .bonds
            .iter()
            .filter(|b| !b.contains(index))
            .map(|b| Bond::new(shift(b.i), shift(b.j)))
            .collect();
        self.atom_count -= 1;
        Ok(())
    }

    /// Whether every atom is reachable from atom 0.
    ///
    /// An empty graph is reported as disconnected.
    pub fn is_connected(&self) -> bool {
        if self.atom_count == 0 {
            return false;
        }

        let adjacency = self.adjacency_lists();
        let mut visited = vec![false; self.atom_count];
        let mut stack = vec![0usize];
        visited[0] = true;
        let mut reached = 1;

        while let Some(atom) = stack.pop() {
            for &next in &adjacency[atom] {
                if !visited[next] {
                    visited[next] = true;
                    reached += 1;
                    stack.push(next);
                }
            }
        }

        reached == self.atom_count
    }

    fn adjacency_lists(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.atom_count];
        for bond in &self.bonds {
            adjacency[bond.i].push(bond.j);
            adjacency[bond.j].push(bond.i);
        }
        adjacency
    }

    fn check_pair(&self, i: usize, j: usize) -> Result<(), GraphError> {
        if i >= self.atom_count || j >= self.atom_count {
            return Err(GraphError::InvalidIndex {
                i,
                j,
                atom_count: self.atom_count,
            });
        }
        if i == j {
            return Err(GraphError::SelfLoop { index: i });
        }
        Ok(())
    }
}
