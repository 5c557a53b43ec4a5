use std::{borrow::Cow, fs};

use percent_encoding::percent_decode_str;
use tracing::{debug, info};
use url::Url;

use crate::{
    certificate,
    config::{ConfigProvider, Environment},
    constants::{ALLOWED_AUTHN_CONTEXTS, MAX_SERVICE_NAME_LENGTH},
    error::SetupError,
};

/// Every problem found during one validation run, in the order checks ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<String>,
}

impl ValidationErrors {
    pub fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.errors
    }

    /// Collapse the run into a single failure carrying every message
    pub fn into_result(self) -> Result<(), SetupError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SetupError::Validation {
                errors: self.errors,
            })
        }
    }
}

/// Checks a deployment's configuration for one target environment.
///
/// No check stops the run; each one appends its own findings so an
/// administrator sees the full list at once.
pub struct ConfigValidator<'a, C> {
    config: &'a C,
}

impl<'a, C: ConfigProvider> ConfigValidator<'a, C> {
    pub fn new(config: &'a C) -> Self {
        Self { config }
    }

    /// Run every check against `env_name`
    pub fn validate(&self, env_name: &str) -> ValidationErrors {
        info!("Validating configuration for environment: {}", env_name);

        let mut errors = ValidationErrors::default();

        // Environment-specific checks fall back to the default environment
        let env = self
            .check_environment(env_name, &mut errors)
            .unwrap_or_default();

        self.check_directory_structure(&mut errors);
        self.check_certificate(env, &mut errors);
        self.check_entity_id(env, &mut errors);
        self.check_authn_contexts(&mut errors);
        self.check_metadata(env, &mut errors);

        if errors.is_empty() {
            info!("Configuration for environment {} is valid", env);
        } else {
            info!("Validation found {} issue(s)", errors.len());
        }

        errors
    }

    /// Run every check and hand back the environment when nothing failed
    pub fn validated_environment(&self, env_name: &str) -> Result<Environment, SetupError> {
        self.validate(env_name).into_result()?;
        Environment::from_name(env_name)
            .ok_or_else(|| SetupError::Config(format!("Unknown environment '{env_name}'")))
    }

    fn check_environment(
        &self,
        env_name: &str,
        errors: &mut ValidationErrors,
    ) -> Option<Environment> {
        debug!("Checking environment");

        if env_name.is_empty() {
            errors.push(format!(
                "No environment provided; use --for-env with one of: {}",
                Environment::names()
            ));
            return None;
        }

        let env = Environment::from_name(env_name);
        if env.is_none() {
            errors.push(format!(
                "Environment '{env_name}' is not valid; expected one of: {}",
                Environment::names()
            ));
        }
        env
    }

    fn check_directory_structure(&self, errors: &mut ValidationErrors) {
        debug!("Checking certificate directory");

        let Some(dir) = self.config.certificate_dir() else {
            errors.push("No certificate directory configured");
            return;
        };

        if fs::read_dir(dir).is_err() {
            errors.push(format!(
                "Certificate directory {} does not exist or is not readable",
                dir.display()
            ));
        }
    }

    fn check_certificate(&self, env: Environment, errors: &mut ValidationErrors) {
        debug!("Checking signing certificate for {}", env);

        let Some(path) = self.config.signing_certificate_path(env) else {
            errors.push(format!(
                "No signing certificate configured for environment '{env}'"
            ));
            return;
        };

        // Content is only worth inspecting once the file could be read
        let Ok(pem) = certificate::read_pem(&path) else {
            errors.push(format!(
                "Signing certificate {} does not exist or is not readable",
                path.display()
            ));
            return;
        };

        match certificate::extract_payload(&pem) {
            None => errors.push(format!(
                "No certificate data could be found in {}",
                path.display()
            )),
            Some(payload) if !certificate::is_valid_payload(&payload) => errors.push(format!(
                "Certificate data in {} is not valid base64",
                path.display()
            )),
            Some(_) => {}
        }
    }

    fn check_entity_id(&self, env: Environment, errors: &mut ValidationErrors) {
        debug!("Checking entity ID for {}", env);

        let Some(entity_id) = self.config.entity_id(env) else {
            errors.push(format!("No entity ID configured for environment '{env}'"));
            return;
        };

        let Ok(url) = Url::parse(entity_id) else {
            errors.push(format!(
                "Invalid entity ID '{entity_id}': it must be an absolute URL"
            ));
            return;
        };

        if url.host_str() == Some("localhost") || url.scheme() != "https" {
            errors.push(format!(
                "Invalid entity ID '{entity_id}': it must use https and must not be localhost"
            ));
            return;
        }

        // Measure what the administrator wrote, not the percent-encoded path
        let mut segments: Vec<Cow<'_, str>> = url
            .path_segments()
            .map(|split| {
                split
                    .map(|segment| percent_decode_str(segment).decode_utf8_lossy())
                    .collect()
            })
            .unwrap_or_default();

        let service_name = segments.pop().unwrap_or_default();
        let length = service_name.chars().count();
        if length == 0 || length > MAX_SERVICE_NAME_LENGTH {
            errors.push(format!(
                "Service name '{service_name}' must be between 1 and {MAX_SERVICE_NAME_LENGTH} characters long (entity ID: {entity_id})"
            ));
        }

        match segments.pop() {
            Some(realm) if !realm.is_empty() => {}
            _ => errors.push(format!(
                "No privacy realm found in entity ID '{entity_id}'; expected https://host/privacy-realm/service-name"
            )),
        }
    }

    fn check_authn_contexts(&self, errors: &mut ValidationErrors) {
        debug!("Checking authentication contexts");

        for env in Environment::ALL {
            match self.config.authn_context(env) {
                None => errors.push(format!(
                    "No authentication context configured for environment '{env}'"
                )),
                Some(context) if !ALLOWED_AUTHN_CONTEXTS.contains(&context) => {
                    errors.push(format!(
                        "Authentication context '{context}' for environment '{env}' is not one of the allowed contexts"
                    ));
                }
                Some(_) => {}
            }
        }
    }

    fn check_metadata(&self, env: Environment, errors: &mut ValidationErrors) {
        debug!("Checking metadata values");

        let required = [
            ("organisation name", self.config.organisation_name()),
            (
                "organisation display name",
                self.config.organisation_display_name(),
            ),
            ("organisation URL", self.config.organisation_url()),
            ("support contact company", self.config.support_contact_company()),
            (
                "support contact first names",
                self.config.support_contact_first_names(),
            ),
            ("support contact surname", self.config.support_contact_surname()),
        ];

        for (name, value) in required {
            if value.is_none() {
                errors.push(format!("No {name} configured for the metadata"));
            }
        }

        if self.config.acs_url(env).is_none() {
            errors.push(format!(
                "No assertion consumer service URL configured for environment '{env}'"
            ));
        }
    }
}
