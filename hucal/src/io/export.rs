//! JSON export of calculation results for external presentation layers

use color_eyre::eyre::{Result, WrapErr};
use huckel::HuckelResult;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct NamedResult<'a> {
    pub name: &'a str,
    #[serde(flatten)]
    pub result: &'a HuckelResult,
}

pub fn write_json(path: &str, results: &[NamedResult<'_>]) -> Result<()> {
    let file =
        File::create(path).wrap_err_with(|| format!("Unable to create JSON output: {}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), results)
        .wrap_err("Failed to serialise results")?;
    info!("Wrote {} result(s) to {}", results.len(), path);
    Ok(())
}
