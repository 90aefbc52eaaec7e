//! Middleware types returned from `ConfigExt` methods.
mod auth;
mod base_uri;
mod default_headers;

pub use auth::{AddAuthorization, AuthLayer};
pub use base_uri::{BaseUri, BaseUriLayer};
pub use default_headers::{DefaultHeaders, DefaultHeadersLayer};
