mod report;
mod runner;

use runner::{build_calculator, run_molecules};

use crate::config::{Args, Config};
use crate::io::{setup_output, write_json, NamedResult};
use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use std::fs;
use tracing::info;

pub struct HucalApplication {
    args: Args,
    config: Config,
}

impl HucalApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref(), self.args.verbose)?;
        info!("Configuration loaded:\n{:?}", self.config);

        let calculator = build_calculator(&self.args, &self.config)?;
        let show_coefficients = self.args.coefficients || self.config.coefficients_enabled();
        let summary = run_molecules(&calculator, &self.config, show_coefficients)?;

        info!(
            "\nFinished: {} computed, {} failed",
            summary.computed.len(),
            summary.failed
        );

        let json_path = self.args.json.as_ref().or(self.config.report.json.as_ref());
        if let Some(path) = json_path {
            let named: Vec<NamedResult<'_>> = summary
                .computed
                .iter()
                .map(|c| NamedResult {
                    name: &c.name,
                    result: &c.result,
                })
                .collect();
            write_json(path, &named)?;
        }

        Ok(())
    }
}

fn load_config(args: &Args) -> Result<Config> {
    if let Some(preset) = args.preset {
        return Ok(Config::from_preset(preset));
    }

    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();
    config.validate().map_err(|e| eyre!(e))?;

    Ok(config)
}
