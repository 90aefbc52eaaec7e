//! Cloud Foundry connection settings, from the chaos host or from a `cf` CLI session.
//!
//! # Usage
//! A chaos host hands every activity a configuration and a secrets mapping,
//! use [`Config::from_activity`] with those. Standalone tools can reuse the
//! session of `cf login` through [`Config::from_cf_home`].
mod cf_config;

pub use cf_config::{CfConfig, EntityFields};

use std::path::Path;

use chaoscf_core::{Configuration, Secrets};
use secrecy::SecretString;
use serde_json::Value;

use crate::{error::ConfigError, Error, Result};

const DEFAULT_CLIENT_ID: &str = "cf";
const DEFAULT_TOKEN_TYPE: &str = "bearer";

/// Configuration object detailing the API URL, SSL verification and credentials.
///
/// # Usage
/// Construct a [`Config`] with one of the constructors and pass it to
/// [`Client::connect`][crate::Client::connect], which authenticates when needed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the Cloud Foundry API, e.g. `https://api.sys.example.com`
    pub api_url: http::Uri,
    /// Whether to verify the certificates presented by the API and UAA
    pub verify_ssl: bool,
    /// How to obtain an access token
    pub credentials: Credentials,
}

/// How the client proves its identity
#[derive(Debug, Clone)]
pub enum Credentials {
    /// An access token obtained beforehand, sent as `Authorization: <token_type> <access_token>`
    Token {
        /// Token type, usually `bearer`
        token_type: String,
        /// The access token
        access_token: SecretString,
    },
    /// A user exchanged for a token through the OAuth2 password grant
    Password {
        /// User name
        username: String,
        /// User password
        password: SecretString,
        /// OAuth2 client, `cf` unless configured
        client_id: String,
        /// OAuth2 client secret, empty unless configured
        client_secret: SecretString,
    },
}

impl Credentials {
    /// Password credentials for the default `cf` client
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: SecretString::from(password.into()),
            client_id: DEFAULT_CLIENT_ID.to_owned(),
            client_secret: SecretString::from(String::new()),
        }
    }

    /// Bearer token credentials
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::Token {
            token_type: DEFAULT_TOKEN_TYPE.to_owned(),
            access_token: SecretString::from(access_token.into()),
        }
    }
}

impl Config {
    /// Construct a config verifying SSL, with the given URL and credentials
    pub fn new(api_url: http::Uri, credentials: Credentials) -> Self {
        Self {
            api_url,
            verify_ssl: true,
            credentials,
        }
    }

    /// Build the configuration from the mappings handed over by the chaos host
    ///
    /// `cf_api_url` is required and `cf_verify_ssl` defaults to `true`.
    /// Secrets either carry `cf_access_token` (with an optional `cf_token_type`)
    /// or `cf_username` and `cf_password` (with optional `cf_client_id` and `cf_client_secret`).
    pub fn from_activity(configuration: &Configuration, secrets: &Secrets) -> Result<Self> {
        let url = configuration
            .get("cf_api_url")
            .and_then(Value::as_str)
            .ok_or(Error::Config(ConfigError::MissingKey("cf_api_url")))?;
        let api_url = parse_api_url(url)?;

        let verify_ssl = match configuration.get("cf_verify_ssl") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(verify)) => *verify,
            Some(_) => {
                return Err(Error::Config(ConfigError::InvalidValue {
                    key: "cf_verify_ssl",
                    expected: "a boolean",
                }))
            }
        };

        let credentials = credentials_from_secrets(secrets)?;
        Ok(Self {
            api_url,
            verify_ssl,
            credentials,
        })
    }

    /// Reuse the session of the `cf` CLI
    ///
    /// Reads `$CF_HOME/.cf/config.json`, or `~/.cf/config.json` when `CF_HOME` is not set.
    pub fn from_cf_home() -> Result<Self> {
        let path = CfConfig::default_path().ok_or(Error::Config(ConfigError::NoHomeDirectory))?;
        Self::from_cf_config_file(path)
    }

    /// Reuse the session stored in a `cf` CLI config file
    pub fn from_cf_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let cf_config = CfConfig::read_from(path).map_err(Error::Config)?;
        Self::from_cf_config(&cf_config, path)
    }

    fn from_cf_config(cf_config: &CfConfig, path: &Path) -> Result<Self> {
        let target = cf_config
            .target
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Config(ConfigError::MissingTarget(path.to_owned())))?;
        let api_url = parse_api_url(target)?;

        let raw_token = cf_config
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Config(ConfigError::MissingAccessToken(path.to_owned())))?;
        let (token_type, access_token) = raw_token
            .split_once(' ')
            .ok_or_else(|| Error::Config(ConfigError::MalformedAccessToken(path.to_owned())))?;

        tracing::debug!(target = %api_url, "reusing cf CLI session from {:?}", path);
        Ok(Self {
            api_url,
            verify_ssl: !cf_config.ssl_disabled,
            credentials: Credentials::Token {
                token_type: token_type.to_lowercase(),
                access_token: SecretString::from(access_token.trim().to_owned()),
            },
        })
    }
}

fn parse_api_url(url: &str) -> Result<http::Uri> {
    url.parse::<http::Uri>().map_err(|source| {
        Error::Config(ConfigError::InvalidApiUrl {
            url: url.to_owned(),
            source,
        })
    })
}

fn secret_str<'a>(secrets: &'a Secrets, key: &str) -> Option<&'a str> {
    secrets.get(key).and_then(Value::as_str)
}

fn credentials_from_secrets(secrets: &Secrets) -> Result<Credentials> {
    if let Some(token) = secret_str(secrets, "cf_access_token") {
        return Ok(Credentials::Token {
            token_type: secret_str(secrets, "cf_token_type")
                .unwrap_or(DEFAULT_TOKEN_TYPE)
                .to_owned(),
            access_token: SecretString::from(token.to_owned()),
        });
    }

    let username =
        secret_str(secrets, "cf_username").ok_or(Error::Config(ConfigError::MissingSecret("cf_username")))?;
    let password =
        secret_str(secrets, "cf_password").ok_or(Error::Config(ConfigError::MissingSecret("cf_password")))?;
    Ok(Credentials::Password {
        username: username.to_owned(),
        password: SecretString::from(password.to_owned()),
        client_id: secret_str(secrets, "cf_client_id")
            .unwrap_or(DEFAULT_CLIENT_ID)
            .to_owned(),
        client_secret: SecretString::from(secret_str(secrets, "cf_client_secret").unwrap_or_default().to_owned()),
    })
}
