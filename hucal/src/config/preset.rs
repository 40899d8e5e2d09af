//! Built-in molecular skeletons selectable from YAML or `--preset`

use clap::ValueEnum;
use huckel::{GraphError, MolecularGraph};
use serde::{Deserialize, Serialize};

/// Built-in conjugated skeletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Ethylene,
    Allyl,
    Butadiene,
    Cyclobutadiene,
    Benzene,
    Hexatriene,
    Naphthalene,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Ethylene => "ethylene",
            Preset::Allyl => "allyl",
            Preset::Butadiene => "butadiene",
            Preset::Cyclobutadiene => "cyclobutadiene",
            Preset::Benzene => "benzene",
            Preset::Hexatriene => "hexatriene",
            Preset::Naphthalene => "naphthalene",
        }
    }

    pub fn graph(&self) -> Result<MolecularGraph, GraphError> {
        let graph = match self {
            Preset::Ethylene => MolecularGraph::linear_chain(2),
            Preset::Allyl => MolecularGraph::linear_chain(3),
            Preset::Butadiene => MolecularGraph::linear_chain(4),
            Preset::Cyclobutadiene => MolecularGraph::ring(4),
            Preset::Benzene => MolecularGraph::ring(6),
            Preset::Hexatriene => MolecularGraph::linear_chain(6),
            Preset::Naphthalene => {
                // ten-ring with a 4-9 bridge: two fused six-rings
                let mut graph = MolecularGraph::ring(10);
                graph.add_bond(4, 9)?;
                graph
            }
        };
        Ok(graph)
    }
}
