use thiserror::Error;

/// Possible errors when building a request
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to build the `http::Request`
    #[error("failed to build request: {0}")]
    HttpError(#[source] http::Error),

    /// Failed to serialize a request body
    #[error("failed to serialize request body: {0}")]
    SerdeError(#[source] serde_json::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerdeError(e)
    }
}
