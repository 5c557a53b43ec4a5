use std::{fmt::Write as _, io, path::PathBuf};

use thiserror::Error;

/// Errors that stop a setup run
#[derive(Debug, Error)]
pub enum SetupError {
    /// The task was started from somewhere other than a terminal
    #[error("This task can only be run from the command line; it is not permitted here")]
    NotPermitted,

    /// One or more configuration checks failed
    #[error("{}", format_validation_errors(.errors))]
    Validation { errors: Vec<String> },

    #[error("Metadata template {} could not be read: {source}", .path.display())]
    TemplateUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Signing certificate {} could not be read: {source}", .path.display())]
    CertificateUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn format_validation_errors(errors: &[String]) -> String {
    let mut message = String::from("Validation failed with the following errors:\n");
    for error in errors {
        let _ = writeln!(message, " * {error}");
    }
    let _ = write!(
        message,
        "{} {} found",
        errors.len(),
        if errors.len() == 1 { "issue" } else { "issues" }
    );
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_message() {
        let err = SetupError::Validation {
            errors: vec!["first problem".to_string(), "second problem".to_string()],
        };
        let message = err.to_string();

        assert!(message.contains(" * first problem\n"));
        assert!(message.contains(" * second problem\n"));
        assert!(message.ends_with("2 issues found"));
    }

    #[test]
    fn test_validation_error_single_issue() {
        let err = SetupError::Validation {
            errors: vec!["only problem".to_string()],
        };
        assert!(err.to_string().ends_with("1 issue found"));
    }

    #[test]
    fn test_template_unreadable_names_path() {
        let err = SetupError::TemplateUnreadable {
            path: PathBuf::from("/missing/metadata.xml"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/missing/metadata.xml"));
    }
}
