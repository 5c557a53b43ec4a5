use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{CompletionsCommand, SetupCommand, ValidateCommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sp-onboard", version, about = "Validate SAML service provider configuration and generate identity provider metadata", long_about = None, arg_required_else_help = true)]
pub struct Cli {
    #[arg(
        short = 'c',
        long,
        global = true,
        value_name = "FILE",
        help = "Configuration file (defaults to $SP_ONBOARD_CONFIG_FILE or ~/.config/sp-onboard/config.ini)"
    )]
    pub config: Option<PathBuf>,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Validate the configuration and print the service provider metadata XML")]
    Setup(SetupCommand),
    #[command(about = "Validate the configuration without generating metadata")]
    Validate(ValidateCommand),
    #[command(about = "Generate shell completion scripts for sp-onboard")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let config = self.config.as_deref();

        match self.command {
            Commands::Setup(cmd) => cmd.execute(config),
            Commands::Validate(cmd) => cmd.execute(config),
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(())
            }
        }
    }
}
