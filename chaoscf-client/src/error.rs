//! Error handling in [`chaoscf`][crate]
use std::path::PathBuf;

use http::StatusCode;
use thiserror::Error;

pub use crate::auth::AuthError;

/// Possible errors when working with [`chaoscf`][crate]
///
/// Every failure of an activity is reported through this type.
#[derive(Error, Debug)]
pub enum Error {
    /// The API answered with a status above 399
    ///
    /// The response body is kept verbatim, the v2 API does not guarantee a JSON error.
    #[error("failed to call '{url}': {status} => {text}")]
    Api {
        /// Path or URL that was called
        url: String,
        /// Status of the response
        status: StatusCode,
        /// Response body
        text: String,
    },

    /// A name lookup matched no resource
    #[error("{kind} '{name}' was not found")]
    NotFound {
        /// Kind of resource, e.g. `app` or `route`
        kind: &'static str,
        /// The name that was looked up
        name: String,
    },

    /// The app exists but reported no instance
    #[error("app '{app}' has no instances")]
    NoInstances {
        /// The app name
        app: String,
    },

    /// Routes with the host exist but none is bound to the app
    #[error("no routes with host '{host}' was found for app '{app}'")]
    NoRoutesForApp {
        /// The app name
        app: String,
        /// The route host
        host: String,
    },

    /// A step named an activity that is not exported, or passed unusable arguments
    #[error("invalid activity: {0}")]
    InvalidActivity(String),

    /// Hyper error
    #[error("HyperError: {0}")]
    HyperError(#[source] hyper_util::client::legacy::Error),

    /// Service error
    #[error("ServiceError: {0}")]
    Service(#[source] tower::BoxError),

    /// UTF-8 Error
    #[error("UTF-8 Error: {0}")]
    FromUtf8(#[source] std::string::FromUtf8Error),

    /// Http based error
    #[error("HttpError: {0}")]
    HttpError(#[source] http::Error),

    /// Failed to construct a URI.
    #[error("InvalidUri: {0}")]
    InvalidUri(#[source] http::uri::InvalidUri),

    /// Common error case when requesting parsing into own structs
    #[error("Error deserializing response: {0}")]
    SerdeError(#[source] serde_json::Error),

    /// Failed to build request
    #[error("Failed to build request: {0}")]
    BuildRequest(#[source] chaoscf_core::Error),

    /// Configuration error
    #[error("Error loading configuration: {0}")]
    Config(#[source] ConfigError),

    /// An error with configuring SSL occured
    #[error("SslError: {0}")]
    SslError(String),

    /// The API URL uses https but no TLS stack was compiled in
    #[error("TLS required for '{0}' but no TLS feature is enabled")]
    TlsRequired(http::Uri),

    /// Errors related to client auth
    #[error("auth error: {0}")]
    Auth(#[source] AuthError),
}

#[derive(Error, Debug)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
/// Possible errors when loading a configuration
pub enum ConfigError {
    #[error("missing '{0}' in configuration")]
    MissingKey(&'static str),

    #[error("missing '{0}' in secrets")]
    MissingSecret(&'static str),

    #[error("invalid value for '{key}', expected {expected}")]
    InvalidValue { key: &'static str, expected: &'static str },

    #[error("invalid api url '{url}': {source}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("failed to determine the home directory, set CF_HOME")]
    NoHomeDirectory,

    #[error("failed to read cf config at '{path:?}', run `cf login` first: {source}")]
    ReadCfConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cf config at '{path:?}': {source}")]
    ParseCfConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cf config at '{0:?}' has no target, run `cf login` first")]
    MissingTarget(PathBuf),

    #[error("cf config at '{0:?}' has no access token, run `cf login` first")]
    MissingAccessToken(PathBuf),

    #[error("cf config at '{0:?}' holds an access token without a type")]
    MalformedAccessToken(PathBuf),
}
