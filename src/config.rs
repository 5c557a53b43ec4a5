use std::{
    fmt,
    path::{Path, PathBuf},
};

use ini::Ini;
use tracing::debug;

use crate::{constants, error::SetupError};

const SERVICE_SECTION: &str = "service";
const METADATA_SECTION: &str = "metadata";

/// Identity provider environments a deployment can be onboarded to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Mock test service
    #[default]
    Mts,
    /// Integration test environment
    Ite,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Environment::Mts, Environment::Ite, Environment::Prod];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mts => "mts",
            Self::Ite => "ite",
            Self::Prod => "prod",
        }
    }

    /// Look up an environment by its identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|env| env.as_str() == name)
    }

    /// Comma separated list of every identifier, for messages
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|env| env.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only source of every configuration value the setup task needs.
///
/// Blank values must be reported as `None`.
pub trait ConfigProvider {
    fn certificate_dir(&self) -> Option<&Path>;

    /// Full path of the signing certificate used for `env`
    fn signing_certificate_path(&self, env: Environment) -> Option<PathBuf>;

    /// Service provider entity ID registered for `env`
    fn entity_id(&self, env: Environment) -> Option<&str>;

    /// Authentication context URI requested in `env`
    fn authn_context(&self, env: Environment) -> Option<&str>;

    /// Assertion consumer service URL for `env`
    fn acs_url(&self, env: Environment) -> Option<&str>;

    fn organisation_name(&self) -> Option<&str>;
    fn organisation_display_name(&self) -> Option<&str>;
    fn organisation_url(&self) -> Option<&str>;
    fn support_contact_company(&self) -> Option<&str>;
    fn support_contact_first_names(&self) -> Option<&str>;
    fn support_contact_surname(&self) -> Option<&str>;

    /// Directory overriding the built-in metadata template
    fn template_dir(&self) -> Option<&Path>;
}

/// Configuration backed by an INI file
#[derive(Debug, Clone)]
pub struct IniConfig {
    ini: Ini,
}

impl IniConfig {
    pub fn new(ini: Ini) -> Self {
        Self { ini }
    }

    pub fn parse(content: &str) -> Result<Self, SetupError> {
        Ini::load_from_str(content)
            .map(Self::new)
            .map_err(|e| SetupError::Config(format!("Failed to parse configuration: {e}")))
    }

    fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.ini
            .section(Some(section))
            .and_then(|props| props.get(key))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Per-environment value, falling back to the `[service]` default
    fn env_value(&self, env: Environment, key: &str) -> Option<&str> {
        self.value(&environment_section(env), key)
            .or_else(|| self.value(SERVICE_SECTION, key))
    }
}

impl ConfigProvider for IniConfig {
    fn certificate_dir(&self) -> Option<&Path> {
        self.value(SERVICE_SECTION, "certificate_dir").map(Path::new)
    }

    fn signing_certificate_path(&self, env: Environment) -> Option<PathBuf> {
        let file = Path::new(self.env_value(env, "signing_certificate")?);
        match self.certificate_dir() {
            Some(dir) if file.is_relative() => Some(dir.join(file)),
            _ => Some(file.to_path_buf()),
        }
    }

    fn entity_id(&self, env: Environment) -> Option<&str> {
        self.env_value(env, "entity_id")
    }

    fn authn_context(&self, env: Environment) -> Option<&str> {
        self.env_value(env, "authn_context")
    }

    fn acs_url(&self, env: Environment) -> Option<&str> {
        self.env_value(env, "acs_url")
    }

    fn organisation_name(&self) -> Option<&str> {
        self.value(METADATA_SECTION, "organisation_name")
    }

    fn organisation_display_name(&self) -> Option<&str> {
        self.value(METADATA_SECTION, "organisation_display_name")
    }

    fn organisation_url(&self) -> Option<&str> {
        self.value(METADATA_SECTION, "organisation_url")
    }

    fn support_contact_company(&self) -> Option<&str> {
        self.value(METADATA_SECTION, "support_contact_company")
    }

    fn support_contact_first_names(&self) -> Option<&str> {
        self.value(METADATA_SECTION, "support_contact_first_names")
    }

    fn support_contact_surname(&self) -> Option<&str> {
        self.value(METADATA_SECTION, "support_contact_surname")
    }

    fn template_dir(&self) -> Option<&Path> {
        self.value(SERVICE_SECTION, "template_dir").map(Path::new)
    }
}

fn environment_section(env: Environment) -> String {
    format!("environment {env}")
}

/// Load the configuration from `path`, or from the default location
pub fn load(path: Option<&Path>) -> Result<IniConfig, SetupError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => constants::get_config_path().ok_or_else(|| {
            SetupError::Config("Failed to determine configuration file path".to_string())
        })?,
    };

    debug!("Loading configuration from {}", path.display());

    let ini = Ini::load_from_file(&path).map_err(|e| {
        SetupError::Config(format!(
            "Failed to load configuration file {}: {e}",
            path.display()
        ))
    })?;

    Ok(IniConfig::new(ini))
}
