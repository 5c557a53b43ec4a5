pub mod certificate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod identity;
pub mod logging;
pub mod metadata;
pub mod setup;
pub mod validator;

#[cfg(test)]
mod test_support;

pub use config::{ConfigProvider, Environment, IniConfig};
pub use error::SetupError;
pub use identity::{FederatedIdentity, IdentityModel, Validity};
pub use setup::{ExecutionContext, SetupOrchestrator};
pub use validator::{ConfigValidator, ValidationErrors};
