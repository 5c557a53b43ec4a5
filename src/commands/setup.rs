use std::{io, path::Path};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::{
    config,
    setup::{ExecutionContext, SetupOrchestrator},
};

#[derive(Debug, Clone, Args)]
pub struct SetupCommand {
    #[arg(
        short = 'e',
        long = "for-env",
        value_name = "ENV",
        help = "Identity provider environment to generate metadata for (mts, ite, prod)"
    )]
    pub for_env: String,
}

impl SetupCommand {
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        info!("Starting setup for environment: {}", self.for_env);

        // Refuse before any configuration is read
        let context = ExecutionContext::detect();
        context.ensure_cli()?;

        let config = config::load(config_path).context("Failed to load configuration")?;

        // Only the XML goes to stdout so it can be redirected into a file
        SetupOrchestrator::new(context, &config)
            .run(
                &self.for_env,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )
            .with_context(|| format!("Setup for environment '{}' failed", self.for_env))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_missing_config_file_is_reported_with_context() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.ini");
        let command = SetupCommand {
            for_env: "ite".to_string(),
        };

        let err = command.execute(Some(&path)).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("Failed to load configuration: "));
        assert!(message.contains("missing.ini"));
    }
}
