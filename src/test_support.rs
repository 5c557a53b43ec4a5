//! Shared fixtures for unit tests.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::{
    certificate::tests::SAMPLE_PEM,
    config::{ConfigProvider, Environment},
    constants::{AUTHN_LOW_STRENGTH, AUTHN_MOD_TOKEN_SMS},
};

/// In-memory configuration; every environment shares the same values apart
/// from its authentication context and ACS URL.
#[derive(Debug, Clone, Default)]
pub struct FixtureConfig {
    pub certificate_dir: Option<PathBuf>,
    pub signing_certificate: Option<PathBuf>,
    pub entity_id: Option<String>,
    pub authn_contexts: HashMap<Environment, String>,
    pub acs_urls: HashMap<Environment, String>,
    pub organisation_name: Option<String>,
    pub organisation_display_name: Option<String>,
    pub organisation_url: Option<String>,
    pub support_company: Option<String>,
    pub support_first_names: Option<String>,
    pub support_surname: Option<String>,
    pub template_dir: Option<PathBuf>,
}

impl FixtureConfig {
    /// A complete configuration whose signing certificate lives in `dir`
    pub fn valid(dir: &TempDir) -> Self {
        let cert_path = dir.path().join("sp-signing.pem");
        fs::write(&cert_path, SAMPLE_PEM).unwrap();

        Self {
            certificate_dir: Some(dir.path().to_path_buf()),
            signing_certificate: Some(cert_path),
            entity_id: Some("https://sp.example.govt.nz/myrealm/myservice".to_string()),
            authn_contexts: Environment::ALL
                .into_iter()
                .map(|env| {
                    let context = if env == Environment::Prod {
                        AUTHN_MOD_TOKEN_SMS
                    } else {
                        AUTHN_LOW_STRENGTH
                    };
                    (env, context.to_string())
                })
                .collect(),
            acs_urls: Environment::ALL
                .into_iter()
                .map(|env| (env, format!("https://sp.example.govt.nz/saml/{env}/acs")))
                .collect(),
            organisation_name: Some("Example Agency".to_string()),
            organisation_display_name: Some("Example".to_string()),
            organisation_url: Some("https://example.govt.nz".to_string()),
            support_company: Some("Example Agency".to_string()),
            support_first_names: Some("Jane".to_string()),
            support_surname: Some("Doe".to_string()),
            template_dir: None,
        }
    }
}

impl ConfigProvider for FixtureConfig {
    fn certificate_dir(&self) -> Option<&Path> {
        self.certificate_dir.as_deref()
    }

    fn signing_certificate_path(&self, _env: Environment) -> Option<PathBuf> {
        self.signing_certificate.clone()
    }

    fn entity_id(&self, _env: Environment) -> Option<&str> {
        self.entity_id.as_deref()
    }

    fn authn_context(&self, env: Environment) -> Option<&str> {
        self.authn_contexts.get(&env).map(String::as_str)
    }

    fn acs_url(&self, env: Environment) -> Option<&str> {
        self.acs_urls.get(&env).map(String::as_str)
    }

    fn organisation_name(&self) -> Option<&str> {
        self.organisation_name.as_deref()
    }

    fn organisation_display_name(&self) -> Option<&str> {
        self.organisation_display_name.as_deref()
    }

    fn organisation_url(&self) -> Option<&str> {
        self.organisation_url.as_deref()
    }

    fn support_contact_company(&self) -> Option<&str> {
        self.support_company.as_deref()
    }

    fn support_contact_first_names(&self) -> Option<&str> {
        self.support_first_names.as_deref()
    }

    fn support_contact_surname(&self) -> Option<&str> {
        self.support_surname.as_deref()
    }

    fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }
}
