use std::{fs, path::Path};

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    config::{ConfigProvider, Environment},
    error::SetupError,
};

pub const TOKEN_ENTITY_ID: &str = "entityID";
pub const TOKEN_CERTIFICATE_DATA: &str = "certificate-data";
pub const TOKEN_ACS_URL: &str = "acs-url";
pub const TOKEN_ORGANISATION_NAME: &str = "organisation-name";
pub const TOKEN_ORGANISATION_DISPLAY_NAME: &str = "organisation-display-name";
pub const TOKEN_ORGANISATION_URL: &str = "organisation-url";
pub const TOKEN_SUPPORT_COMPANY: &str = "contact-support1-company";
pub const TOKEN_SUPPORT_FIRST_NAMES: &str = "contact-support1-firstnames";
pub const TOKEN_SUPPORT_SURNAME: &str = "contact-support1-surname";

/// Token name (without braces) to replacement text
pub type TokenMap = IndexMap<String, String>;

/// Values substituted into the service provider metadata template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTokens {
    pub entity_id: String,
    pub certificate_data: String,
    pub acs_url: String,
    pub organisation_name: String,
    pub organisation_display_name: String,
    pub organisation_url: String,
    pub support_company: String,
    pub support_first_names: String,
    pub support_surname: String,
}

impl MetadataTokens {
    /// Collect live values for `env`. Absent values render as empty text;
    /// the validator is responsible for rejecting incomplete configuration.
    pub fn from_config(
        config: &impl ConfigProvider,
        env: Environment,
        certificate_data: String,
    ) -> Self {
        let text = |value: Option<&str>| value.unwrap_or_default().to_string();

        Self {
            entity_id: text(config.entity_id(env)),
            certificate_data,
            acs_url: text(config.acs_url(env)),
            organisation_name: text(config.organisation_name()),
            organisation_display_name: text(config.organisation_display_name()),
            organisation_url: text(config.organisation_url()),
            support_company: text(config.support_contact_company()),
            support_first_names: text(config.support_contact_first_names()),
            support_surname: text(config.support_contact_surname()),
        }
    }

    /// Token map with every value escaped for use inside XML
    pub fn to_token_map(&self) -> TokenMap {
        [
            (TOKEN_ENTITY_ID, &self.entity_id),
            (TOKEN_CERTIFICATE_DATA, &self.certificate_data),
            (TOKEN_ACS_URL, &self.acs_url),
            (TOKEN_ORGANISATION_NAME, &self.organisation_name),
            (TOKEN_ORGANISATION_DISPLAY_NAME, &self.organisation_display_name),
            (TOKEN_ORGANISATION_URL, &self.organisation_url),
            (TOKEN_SUPPORT_COMPANY, &self.support_company),
            (TOKEN_SUPPORT_FIRST_NAMES, &self.support_first_names),
            (TOKEN_SUPPORT_SURNAME, &self.support_surname),
        ]
        .into_iter()
        .map(|(token, value)| (token.to_string(), escape_xml(value)))
        .collect()
    }
}

/// Substitute every `{{token}}` found in `tokens` in a single pass.
///
/// Tokens without a value, and stray `{{`, are copied through unchanged.
/// Replacement text is never scanned again.
pub fn render(template: &str, tokens: &TokenMap) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            output.push_str(&rest[open..]);
            return output;
        };

        match tokens.get(&after_open[..close]) {
            Some(value) => {
                output.push_str(value);
                rest = &after_open[close + 2..];
            }
            None => {
                output.push_str("{{");
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Read a template from disk and render it
pub fn render_file(template_path: &Path, tokens: &TokenMap) -> Result<String, SetupError> {
    debug!("Rendering template {}", template_path.display());

    let template =
        fs::read_to_string(template_path).map_err(|source| SetupError::TemplateUnreadable {
            path: template_path.to_path_buf(),
            source,
        })?;

    Ok(render(&template, tokens))
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
