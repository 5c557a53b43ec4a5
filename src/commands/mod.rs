pub mod completions;
pub mod setup;
pub mod validate;

pub use completions::CompletionsCommand;
pub use setup::SetupCommand;
pub use validate::ValidateCommand;
