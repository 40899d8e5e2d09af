//! Hückel calculator command-line interface
//!
//! Reads molecules from a YAML configuration (or a built-in preset) and prints
//! orbital energies, occupations and degenerate levels.

use color_eyre::eyre::Result;

mod app;
mod config;
mod io;

use app::HucalApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    HucalApplication::from_cli()?.run()
}
