use axum::http::{HeaderValue, header::InvalidHeaderValue};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use std::{
    env,
    path::{Path, PathBuf},
};

const ENV_FILE_VAR: &str = "PRODUCT_MAILER_ENV_FILE";
const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load env file '{path}': {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("Invalid environment configuration: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid allowed origin '{origin}': {source}")]
    InvalidOrigin {
        origin: String,
        source: InvalidHeaderValue,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mailgun: MailgunConfig,
    pub server: ServerConfig,
}

/// Mailgun account settings, read from `MAILGUN_*` variables.
///
/// Missing values become empty strings; Mailgun rejects them at send time.
#[derive(Debug, Clone, Deserialize)]
pub struct MailgunConfig {
    #[serde(default)]
    pub domain: String,
    #[serde(default = "empty_secret", deserialize_with = "deserialize_secret")]
    pub api_key: SecretString,
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub from_email: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

/// Listener settings, read from `PRODUCT_MAILER_*` variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub allowed_origin: HeaderValue,
}

#[derive(Deserialize)]
struct ServerSettings {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_allowed_origin")]
    allowed_origin: String,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

fn default_api_base() -> String {
    "https://api.mailgun.net".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_allowed_origin() -> String {
    "http://localhost:5173".to_string()
}

/// Loads the env file into the process environment.
///
/// The file is mandatory: its path comes from `PRODUCT_MAILER_ENV_FILE`,
/// falling back to `.env` in the working directory.
pub fn load_env_file() -> Result<PathBuf, ConfigError> {
    let path = env::var(ENV_FILE_VAR)
        .map_or_else(|_| PathBuf::from(DEFAULT_ENV_FILE), PathBuf::from);
    load_env_file_from(&path)?;
    Ok(path)
}

fn load_env_file_from(path: &Path) -> Result<(), ConfigError> {
    dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let mailgun = envy::prefixed("MAILGUN_").from_iter(vars.iter().cloned())?;
        let settings: ServerSettings = envy::prefixed("PRODUCT_MAILER_").from_iter(vars)?;

        let allowed_origin = HeaderValue::from_str(&settings.allowed_origin).map_err(|source| {
            ConfigError::InvalidOrigin {
                origin: settings.allowed_origin.clone(),
                source,
            }
        })?;

        Ok(Self {
            mailgun,
            server: ServerConfig {
                port: settings.port,
                allowed_origin,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use secrecy::ExposeSecret;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn reads_mailgun_settings() {
        let cfg = Config::from_vars(vars(&[
            ("MAILGUN_DOMAIN", "acme.com"),
            ("MAILGUN_API_KEY", "key-123"),
            ("MAILGUN_FROM_NAME", "Acme"),
            ("MAILGUN_FROM_EMAIL", "sales"),
        ]))
        .unwrap();

        assert_eq!(cfg.mailgun.domain, "acme.com");
        assert_eq!(cfg.mailgun.api_key.expose_secret(), "key-123");
        assert_eq!(cfg.mailgun.from_name, "Acme");
        assert_eq!(cfg.mailgun.from_email, "sales");
        assert_eq!(cfg.mailgun.api_base, "https://api.mailgun.net");
    }

    #[test]
    fn missing_values_become_empty() {
        let cfg = Config::from_vars(Vec::new()).unwrap();

        assert!(cfg.mailgun.domain.is_empty());
        assert!(cfg.mailgun.api_key.expose_secret().is_empty());
        assert!(cfg.mailgun.from_name.is_empty());
        assert!(cfg.mailgun.from_email.is_empty());
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.allowed_origin, "http://localhost:5173");
    }

    #[test]
    fn server_overrides() {
        let cfg = Config::from_vars(vars(&[
            ("PRODUCT_MAILER_PORT", "9090"),
            ("PRODUCT_MAILER_ALLOWED_ORIGIN", "https://shop.example"),
            ("MAILGUN_API_BASE", "https://api.eu.mailgun.net"),
        ]))
        .unwrap();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.allowed_origin, "https://shop.example");
        assert_eq!(cfg.mailgun.api_base, "https://api.eu.mailgun.net");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_vars(vars(&[("PRODUCT_MAILER_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env(_)));
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let err = Config::from_vars(vars(&[(
            "PRODUCT_MAILER_ALLOWED_ORIGIN",
            "http://bad\norigin",
        )]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidOrigin { ref origin, .. } if origin == "http://bad\norigin"
        ));
    }

    #[test]
    fn api_key_is_redacted() {
        let cfg = Config::from_vars(vars(&[("MAILGUN_API_KEY", "key-very-secret")])).unwrap();
        assert!(!format!("{cfg:?}").contains("key-very-secret"));
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let err = load_env_file_from(Path::new("does/not/exist/.env")).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile { .. }));
    }
}
