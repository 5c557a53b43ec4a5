use std::{env, fs, io::Write, path::PathBuf};

use tracing::{debug, info, warn};

use crate::{
    certificate,
    config::{ConfigProvider, Environment},
    constants::{BUILTIN_METADATA_TEMPLATE, METADATA_TEMPLATE_NAME, WEB_CONTEXT_VARS},
    error::SetupError,
    metadata::{self, MetadataTokens, TokenMap},
    validator::ConfigValidator,
};

/// Where the setup task has been started from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    Cli,
    /// Invoked while serving a web request (CGI variables present)
    Web,
}

impl ExecutionContext {
    pub fn detect() -> Self {
        if WEB_CONTEXT_VARS
            .iter()
            .any(|var| env::var_os(var).is_some())
        {
            Self::Web
        } else {
            Self::Cli
        }
    }

    /// The task prints certificate data and contact details, so it must
    /// never answer a web request.
    pub fn ensure_cli(self) -> Result<(), SetupError> {
        match self {
            Self::Cli => Ok(()),
            Self::Web => Err(SetupError::NotPermitted),
        }
    }
}

/// Metadata template to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// `metadata.xml` inside an administrator supplied directory
    Directory(PathBuf),
    BuiltIn,
}

impl TemplateSource {
    /// Prefer the configured override directory when it can be read
    pub fn resolve(config: &impl ConfigProvider) -> Self {
        match config.template_dir() {
            Some(dir) if fs::read_dir(dir).is_ok() => Self::Directory(dir.to_path_buf()),
            Some(dir) => {
                warn!(
                    "Template directory {} is not readable, using the built-in template",
                    dir.display()
                );
                Self::BuiltIn
            }
            None => Self::BuiltIn,
        }
    }

    pub fn render(&self, tokens: &TokenMap) -> Result<String, SetupError> {
        match self {
            Self::Directory(dir) => {
                metadata::render_file(&dir.join(METADATA_TEMPLATE_NAME), tokens)
            }
            Self::BuiltIn => Ok(metadata::render(BUILTIN_METADATA_TEMPLATE, tokens)),
        }
    }
}

/// Validates the configuration and prints the service provider metadata
/// for one environment. The XML goes to `out` and progress notices to
/// `status`; nothing else is written, so the task can be run again at any
/// time.
pub struct SetupOrchestrator<'a, C> {
    context: ExecutionContext,
    config: &'a C,
}

impl<'a, C: ConfigProvider> SetupOrchestrator<'a, C> {
    pub fn new(context: ExecutionContext, config: &'a C) -> Self {
        Self { context, config }
    }

    /// Run the configuration checks only
    pub fn validate(
        &self,
        env_name: &str,
        status: &mut impl Write,
    ) -> Result<Environment, SetupError> {
        self.context.ensure_cli()?;

        let env = ConfigValidator::new(self.config).validated_environment(env_name)?;
        writeln!(status, "Configuration for environment '{env}' is valid.")?;

        Ok(env)
    }

    /// Validate, then render the metadata XML into `out`.
    ///
    /// `out` receives the document and nothing else, so it can be redirected
    /// straight into a file.
    pub fn run(
        &self,
        env_name: &str,
        out: &mut impl Write,
        status: &mut impl Write,
    ) -> Result<(), SetupError> {
        let env = self.validate(env_name, status)?;

        let xml = self.render_metadata(env)?;
        writeln!(out, "{}", xml.trim_end())?;
        out.flush()?;
        writeln!(
            status,
            "Metadata for environment '{env}' generated. Send the XML to the identity provider to complete onboarding."
        )?;

        info!("Metadata generated for environment {}", env);
        Ok(())
    }

    /// Render the metadata for an already validated environment
    pub fn render_metadata(&self, env: Environment) -> Result<String, SetupError> {
        let certificate_data = self.certificate_data(env)?;
        let tokens = MetadataTokens::from_config(self.config, env, certificate_data);

        let source = TemplateSource::resolve(self.config);
        debug!("Using template source: {:?}", source);

        source.render(&tokens.to_token_map())
    }

    fn certificate_data(&self, env: Environment) -> Result<String, SetupError> {
        let path = self.config.signing_certificate_path(env).ok_or_else(|| {
            SetupError::Config(format!(
                "No signing certificate configured for environment '{env}'"
            ))
        })?;

        let pem = certificate::read_pem(&path).map_err(|source| {
            SetupError::CertificateUnreadable {
                path: path.clone(),
                source,
            }
        })?;

        certificate::extract_payload(&pem).ok_or_else(|| {
            SetupError::Config(format!(
                "No certificate data could be found in {}",
                path.display()
            ))
        })
    }
}
