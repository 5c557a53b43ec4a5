use std::{io, path::Path};

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    config,
    setup::{ExecutionContext, SetupOrchestrator},
};

#[derive(Debug, Clone, Args)]
pub struct ValidateCommand {
    #[arg(
        short = 'e',
        long = "for-env",
        value_name = "ENV",
        help = "Identity provider environment to validate (mts, ite, prod)"
    )]
    pub for_env: String,
}

impl ValidateCommand {
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let context = ExecutionContext::detect();
        context.ensure_cli()?;

        let config = config::load(config_path).context("Failed to load configuration")?;
        SetupOrchestrator::new(context, &config)
            .validate(&self.for_env, &mut io::stderr().lock())
            .with_context(|| format!("Validation of environment '{}' failed", self.for_env))?;

        Ok(())
    }
}
