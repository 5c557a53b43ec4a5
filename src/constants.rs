use std::{env, path::PathBuf};

/// Default configuration directory name under user's config directory
pub const CONFIG_DIR_NAME: &str = "sp-onboard";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Environment variable that overrides the configuration file location
pub const CONFIG_FILE_ENV: &str = "SP_ONBOARD_CONFIG_FILE";

/// Name of the metadata template looked up in the template directory
pub const METADATA_TEMPLATE_NAME: &str = "metadata.xml";

/// Metadata template shipped with the binary
pub const BUILTIN_METADATA_TEMPLATE: &str = include_str!("../templates/metadata.xml");

/// Maximum length of the service name segment of an entity ID
pub const MAX_SERVICE_NAME_LENGTH: usize = 20;

/// PEM boundary markers of the signing certificate
pub const PEM_CERTIFICATE_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
pub const PEM_CERTIFICATE_END: &str = "-----END CERTIFICATE-----";

/// Authentication context URIs accepted by the identity provider
pub const AUTHN_LOW_STRENGTH: &str =
    "urn:nzl:govt:ict:stds:authn:deployment:GLS:SAML:2.0:ac:classes:LowStrength";
pub const AUTHN_MOD_STRENGTH: &str =
    "urn:nzl:govt:ict:stds:authn:deployment:GLS:SAML:2.0:ac:classes:ModStrength";
pub const AUTHN_MOD_MOBILE_SMS: &str =
    "urn:nzl:govt:ict:stds:authn:deployment:GLS:SAML:2.0:ac:classes:ModStrength::OTP:Mobile:SMS";
pub const AUTHN_MOD_TOKEN_SMS: &str =
    "urn:nzl:govt:ict:stds:authn:deployment:GLS:SAML:2.0:ac:classes:ModStrength::OTP:Token:SMS";
pub const AUTHN_MOD_TOKEN_SID: &str =
    "urn:nzl:govt:ict:stds:authn:deployment:GLS:SAML:2.0:ac:classes:ModStrength::OTP:Token:SID";

pub const ALLOWED_AUTHN_CONTEXTS: [&str; 5] = [
    AUTHN_LOW_STRENGTH,
    AUTHN_MOD_STRENGTH,
    AUTHN_MOD_MOBILE_SMS,
    AUTHN_MOD_TOKEN_SMS,
    AUTHN_MOD_TOKEN_SID,
];

/// CGI variables that are only ever set when running behind a web server
pub const WEB_CONTEXT_VARS: [&str; 2] = ["GATEWAY_INTERFACE", "REQUEST_METHOD"];

/// Get the configuration file path
/// Respects SP_ONBOARD_CONFIG_FILE environment variable if set
pub fn get_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|home| {
        home.join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    })
}
