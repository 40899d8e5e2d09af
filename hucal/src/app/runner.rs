use super::report::{write_coefficients, write_degenerate_levels, write_orbital_table, write_summary};
use crate::config::{Args, Config};
use color_eyre::eyre::{eyre, Result, WrapErr};
use huckel::{HuckelCalculator, HuckelError, HuckelResult, MolecularGraph, NalgebraEigensolver};
use tracing::{error, info, warn};

/// Molecule that went through the pipeline successfully.
pub struct Computed {
    pub name: String,
    pub result: HuckelResult,
}

/// Outcome of a whole run over the configured molecules.
#[derive(Default)]
pub struct RunSummary {
    pub computed: Vec<Computed>,
    pub failed: usize,
}

/// Eigensolver from the merged settings: command line, then file, then defaults.
pub fn build_calculator(
    args: &Args,
    config: &Config,
) -> Result<HuckelCalculator<NalgebraEigensolver>> {
    let params = config
        .solver
        .overridden_by(args.max_iterations, args.tolerance, args.residual_tolerance)
        .with_defaults();
    params
        .validate()
        .map_err(|e| eyre!("Invalid solver settings: {}", e))?;

    let defaults = NalgebraEigensolver::default();
    let solver = NalgebraEigensolver::new(
        params.tolerance.unwrap_or(defaults.eps),
        params.max_iterations,
        params.residual_tolerance.unwrap_or(defaults.residual_tolerance),
    );
    match solver.max_iterations {
        Some(limit) => info!(
            "Eigensolver: eps = {:e}, max iterations = {}, residual tolerance = {:e}",
            solver.eps, limit, solver.residual_tolerance
        ),
        None => info!(
            "Eigensolver: eps = {:e}, max iterations scaled with size, residual tolerance = {:e}",
            solver.eps, solver.residual_tolerance
        ),
    }
    Ok(HuckelCalculator::new(solver))
}

/// Compute every molecule; failures are reported and do not stop the run.
pub fn run_molecules(
    calculator: &HuckelCalculator<NalgebraEigensolver>,
    config: &Config,
    show_coefficients: bool,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (index, spec) in config.molecules.iter().enumerate() {
        let name = spec.display_name(index);
        info!("\nMolecule {}: {}", index + 1, name);

        let graph = match spec.graph() {
            Ok(graph) => graph,
            Err(err) => {
                error!("Skipping {}: {:#}", name, err);
                summary.failed += 1;
                continue;
            }
        };

        match calculator.calculate(&graph) {
            Ok(result) => {
                report(&name, &graph, &result, show_coefficients)?;
                summary.computed.push(Computed { name, result });
            }
            Err(err) => {
                log_failure(&name, &err);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn log_failure(name: &str, err: &HuckelError) {
    match err {
        HuckelError::Structural(reason) => warn!("{}: {}", name, reason),
        HuckelError::InvalidIndex(reason) => error!("{}: {}", name, reason),
        HuckelError::DecompositionFailed { .. } => error!("{}: {}", name, err),
    }
}

fn report(
    name: &str,
    graph: &MolecularGraph,
    result: &HuckelResult,
    show_coefficients: bool,
) -> Result<()> {
    let mut buffer = Vec::new();
    write_orbital_table(&mut buffer, name, graph, result)?;
    write_degenerate_levels(&mut buffer, result)?;
    write_summary(&mut buffer, result)?;
    if show_coefficients {
        write_coefficients(&mut buffer, result)?;
    }

    let text = String::from_utf8(buffer).wrap_err("Report is not valid UTF-8")?;
    for line in text.lines() {
        info!("{}", line);
    }
    Ok(())
}
