//! Plain-text reports of calculation results

use huckel::{HuckelResult, MolecularGraph};
use itertools::Itertools;
use std::io::{self, Write};

/// Orbital table with energies expressed as multiples of β.
pub fn write_orbital_table<W: Write>(
    writer: &mut W,
    name: &str,
    graph: &MolecularGraph,
    result: &HuckelResult,
) -> io::Result<()> {
    writeln!(
        writer,
        "Molecule: {} ({} atoms, {} bonds)",
        name,
        graph.atom_count(),
        graph.bond_count()
    )?;
    writeln!(
        writer,
        "{:>7} {:>12} {:>12} {:>10}",
        "Orbital", "Energy (β)", "Character", "Occupation"
    )?;
    writeln!(writer, "{}", "-".repeat(44))?;

    for orbital in result.orbitals() {
        writeln!(
            writer,
            "{:>7} {:>12.4} {:>12} {:>10}",
            orbital.name(),
            orbital.beta_coefficient(),
            format!("{:?}", orbital.character()),
            orbital.occupation()
        )?;
    }
    Ok(())
}

/// Levels holding more than one orbital.
pub fn write_degenerate_levels<W: Write>(writer: &mut W, result: &HuckelResult) -> io::Result<()> {
    let degenerate: Vec<_> = result
        .degenerate_groups()
        .iter()
        .filter(|g| g.is_degenerate())
        .collect();
    if degenerate.is_empty() {
        writeln!(writer, "No degenerate levels")?;
        return Ok(());
    }

    writeln!(writer, "Degenerate levels:")?;
    for level in degenerate {
        writeln!(
            writer,
            "  E = α {:+.4}β: {}",
            -level.energy() + 0.0,
            level.members(result.orbitals()).map(|o| o.name()).join(", ")
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(writer: &mut W, result: &HuckelResult) -> io::Result<()> {
    if let Some(homo) = result.homo() {
        writeln!(
            writer,
            "HOMO: {} (α {:+.4}β)",
            homo.name(),
            homo.beta_coefficient()
        )?;
    }
    if let Some(lumo) = result.lumo() {
        writeln!(
            writer,
            "LUMO: {} (α {:+.4}β)",
            lumo.name(),
            lumo.beta_coefficient()
        )?;
    }
    if let Some(gap) = result.homo_lumo_gap() {
        writeln!(writer, "HOMO-LUMO gap: {:.4} |β|", gap)?;
    }
    writeln!(
        writer,
        "π energy: {}α {:+.4}β ({} π electrons)",
        result.pi_electrons(),
        -result.total_pi_energy() + 0.0,
        result.pi_electrons()
    )?;
    Ok(())
}

/// Per-atom coefficients of every orbital, atoms numbered from 1.
pub fn write_coefficients<W: Write>(writer: &mut W, result: &HuckelResult) -> io::Result<()> {
    for orbital in result.orbitals() {
        writeln!(writer, "{} coefficients:", orbital.name())?;
        for (idx, coeff) in orbital.rounded_coefficients().iter().enumerate() {
            writeln!(writer, "  Atom {:>2}: {:>7.4}", idx + 1, coeff)?;
        }
    }
    Ok(())
}
