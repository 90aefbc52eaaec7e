//! Authentication against the UAA of a Cloud Foundry deployment.
//!
//! The API advertises its UAA in `/v2/info`, a user is then exchanged for a token
//! with the OAuth2 password grant.
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use form_urlencoded::Serializer;
use http::{
    header::{InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Request, StatusCode,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    client::{middleware::AuthLayer, read_text, Body},
    Client, Config, Credentials, Error, Result,
};

/// Possible errors when authenticating
#[derive(Error, Debug)]
pub enum AuthError {
    /// `/v2/info` did not answer with `200 OK`
    #[error("failed to retrieve Cloud Foundry information, cannot proceed further")]
    InfoUnavailable {
        /// Status of the info response
        status: StatusCode,
        /// Body of the info response
        text: String,
    },

    /// `/v2/info` could not be parsed
    #[error("failed to parse Cloud Foundry information: {0}")]
    InvalidInfo(#[source] serde_json::Error),

    /// UAA refused the token exchange
    #[error("failed to auth against Cloud Foundry, cannot proceed further: {0}")]
    OAuth(OAuthError),

    /// UAA answered with something that is not a token
    #[error("failed to parse the token response: {0}")]
    InvalidTokenResponse(#[source] serde_json::Error),

    /// The token cannot be sent as a header
    #[error("invalid authorization header: {0}")]
    InvalidHeader(#[source] InvalidHeaderValue),

    /// Only password credentials are exchanged for a token
    #[error("credentials do not hold a user to authenticate")]
    NotAPasswordGrant,
}

/// Error body of a failed OAuth2 call
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OAuthError {
    /// Error code, e.g. `unauthorized`
    pub error: String,
    /// Human readable description
    #[serde(default)]
    pub error_description: Option<String>,
}

impl fmt::Display for OAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(description) => write!(f, "{} ({})", self.error, description),
            None => f.write_str(&self.error),
        }
    }
}

/// The subset of `/v2/info` needed to authenticate
#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    /// URL of the UAA, tokens are granted by its `/oauth/token`
    pub authorization_endpoint: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<serde_json::Value>,
    #[serde(default)]
    jti: Option<String>,
}

/// An access token, and what UAA said about it
#[derive(Debug, Clone)]
pub struct Token {
    /// The access token
    pub access_token: SecretString,
    /// Token type, usually `bearer`
    pub token_type: String,
    /// Refresh token, when granted
    pub refresh_token: Option<SecretString>,
    /// Lifetime in seconds
    pub expires_in: Option<u64>,
    /// Granted scopes
    pub scope: Vec<String>,
    /// Token identifier
    pub jti: Option<String>,
}

impl Token {
    /// A token obtained beforehand
    pub fn new(token_type: String, access_token: SecretString) -> Self {
        Self {
            access_token,
            token_type,
            refresh_token: None,
            expires_in: None,
            scope: vec![],
            jti: None,
        }
    }

    /// The `Authorization` header value, `<token_type> <access_token>`
    pub fn authorization_header(&self) -> Result<HeaderValue, AuthError> {
        let mut value = HeaderValue::try_from(format!(
            "{} {}",
            self.token_type,
            self.access_token.expose_secret()
        ))
        .map_err(AuthError::InvalidHeader)?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Layer authorizing every request with this token
    pub fn auth_layer(&self) -> Result<AuthLayer, AuthError> {
        Ok(AuthLayer::new(self.authorization_header()?))
    }
}

impl From<TokenResponse> for Token {
    fn from(res: TokenResponse) -> Self {
        // UAA sends scopes space separated, some proxies turn them into a list
        let scope = match res.scope {
            Some(serde_json::Value::String(s)) => s.split_whitespace().map(String::from).collect(),
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|i| i.as_str().map(String::from))
                .collect(),
            _ => vec![],
        };
        Self {
            access_token: SecretString::from(res.access_token),
            token_type: res.token_type,
            refresh_token: res.refresh_token.map(SecretString::from),
            expires_in: res.expires_in,
            scope,
            jti: res.jti,
        }
    }
}

/// Fetch `/v2/info` of the API the client points at
pub async fn get_info(client: &Client) -> Result<Info> {
    let req = Request::get("/v2/info")
        .body(Body::default())
        .map_err(Error::HttpError)?;
    let res = client.send(req).await?;
    let status = res.status();
    let text = read_text(res).await?;
    if status != StatusCode::OK {
        tracing::debug!("failed to fetch Cloud Foundry API info: {} => {}", status, text);
        return Err(Error::Auth(AuthError::InfoUnavailable { status, text }));
    }
    serde_json::from_str(&text).map_err(|e| Error::Auth(AuthError::InvalidInfo(e)))
}

/// Exchange the user of `config` for a token through the OAuth2 password grant
///
/// `client` must point at the API of `config` and carry no authorization.
pub async fn get_tokens(client: &Client, config: &Config) -> Result<Token> {
    let Credentials::Password {
        username,
        password,
        client_id,
        client_secret,
    } = &config.credentials
    else {
        return Err(Error::Auth(AuthError::NotAPasswordGrant));
    };

    tracing::debug!("Querying a new access token for client '{}'", client_id);
    let info = get_info(client).await?;
    let token_url = format!("{}/oauth/token", info.authorization_endpoint.trim_end_matches('/'));

    let form = Serializer::new(String::new())
        .append_pair("grant_type", "password")
        .append_pair("username", username)
        .append_pair("password", password.expose_secret())
        .finish();
    let mut basic = HeaderValue::try_from(format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", client_id, client_secret.expose_secret()))
    ))
    .map_err(|e| Error::Auth(AuthError::InvalidHeader(e)))?;
    basic.set_sensitive(true);

    let req = Request::post(token_url.as_str())
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(AUTHORIZATION, basic)
        .body(Body::from(form))
        .map_err(Error::HttpError)?;
    let res = client.send(req).await?;
    let status = res.status();
    let text = read_text(res).await?;

    if !status.is_success() {
        tracing::debug!("failed to auth against '{}': {} => {}", token_url, status, text);
        let oauth_error = serde_json::from_str::<OAuthError>(&text).unwrap_or_else(|_| OAuthError {
            error: status.to_string(),
            error_description: Some(text),
        });
        return Err(Error::Auth(AuthError::OAuth(oauth_error)));
    }

    let token: Token = serde_json::from_str::<TokenResponse>(&text)
        .map_err(|e| Error::Auth(AuthError::InvalidTokenResponse(e)))?
        .into();
    tracing::debug!(expires_in = ?token.expires_in, "obtained a new access token");
    Ok(token)
}
