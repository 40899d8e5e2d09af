//! Input/Output operations for Hückel calculations
//!
//! This module handles logging setup and result export.

mod export;
mod output;

pub use export::{write_json, NamedResult};
pub use output::setup_output;
