//! A basic API client for interacting with the Cloud Foundry API
//!
//! The [`Client`] sends requests through a [`tower`] stack that joins paths onto the
//! API URL, authorizes requests and traces them. The name lookups the activities rely on
//! live in [`api`](crate::api).
use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response, StatusCode};
use http_body_util::{combinators::UnsyncBoxBody, BodyExt};
use serde::de::DeserializeOwned;
use tower::{buffer::Buffer, util::BoxService, BoxError, Layer, Service, ServiceExt};
use tower_http::map_response_body::MapResponseBodyLayer;

use crate::{auth, Config, Credentials, Error, Result};

mod builder;
mod config_ext;
pub mod middleware;
#[cfg(feature = "rustls-tls")] mod tls;

pub use builder::{ClientBuilder, GenericService};
pub use config_ext::ConfigExt;

/// Body of the requests sent by the [`Client`]
pub type Body = http_body_util::Full<Bytes>;

/// Body of the responses handed back by the [`Client`]
pub type ResponseBody = UnsyncBoxBody<Bytes, BoxError>;

pub(crate) const REQUEST_ID_HEADER: &str = "X-VCAP-Request-ID";

/// Client for connecting with a Cloud Foundry API.
///
/// Cheap to clone, clones share the underlying connection pool and token.
/// Instantiate it with [`Client::connect`], or [`Client::try_default`] to reuse a `cf login` session.
#[derive(Clone)]
pub struct Client {
    // Buffer: clones share one service; BoxService: hides the stack's future type
    inner: Buffer<Request<Body>, BoxFuture<'static, Result<Response<ResponseBody>, BoxError>>>,
}

impl Client {
    /// Wrap any `Service` speaking the v2 API, e.g. a mock in tests.
    ///
    /// [`ConfigExt`] provides extensions for building a custom stack.
    /// To create the default stack from a [`Config`], use [`Client::connect`].
    pub fn new<S, B>(service: S) -> Self
    where
        S: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        // Erase the response body and error types to avoid type parameters.
        let service = MapResponseBodyLayer::new(|b: B| -> ResponseBody {
            b.map_err(|e| -> BoxError { e.into() }).boxed_unsync()
        })
        .layer(service)
        .map_err(|e: S::Error| -> BoxError { e.into() });
        Self {
            inner: Buffer::new(BoxService::new(service), 1024),
        }
    }

    /// Create an authenticated [`Client`] from a [`Config`]
    ///
    /// With [`Credentials::Password`] this exchanges the credentials for a token once,
    /// the token is then used by every call made through the client and its clones.
    pub async fn connect(config: Config) -> Result<Self> {
        let bare = ClientBuilder::try_from(&config)?.build();
        Self::authorize(ClientBuilder::try_from(&config)?, &bare, &config).await
    }

    /// Finish `builder` into a client authorizing every call with the configured credentials
    ///
    /// Passwords are exchanged for a token through `bare`, a client of the same API without authorization.
    async fn authorize<Svc, B>(builder: ClientBuilder<Svc>, bare: &Client, config: &Config) -> Result<Self>
    where
        Svc: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        Svc::Future: Send + 'static,
        Svc::Error: Into<BoxError>,
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let token = match &config.credentials {
            Credentials::Token {
                token_type,
                access_token,
            } => auth::Token::new(token_type.clone(), access_token.clone()),
            Credentials::Password { .. } => auth::get_tokens(bare, config).await?,
        };
        let auth_layer = token.auth_layer().map_err(Error::Auth)?;
        Ok(builder.with_layer(&auth_layer).build())
    }

    /// Create an authenticated [`Client`] from the session of the `cf` CLI.
    ///
    /// See [`Config::from_cf_home`].
    pub async fn try_default() -> Result<Self> {
        Self::connect(Config::from_cf_home()?).await
    }

    /// Send a request through the stack as-is, without looking at the status
    pub async fn send(&self, request: Request<Body>) -> Result<Response<ResponseBody>> {
        let mut svc = self.inner.clone();
        let res = svc
            .ready()
            .await
            .map_err(Error::Service)?
            .call(request)
            .await
            .map_err(|err| {
                // raised by our layers, then by hyper, then anything else
                err.downcast::<Error>()
                    .map(|e| *e)
                    .or_else(|err| {
                        err.downcast::<hyper_util::client::legacy::Error>()
                            .map(|err| Error::HyperError(*err))
                    })
                    .unwrap_or_else(Error::Service)
            })?;
        if let Some(request_id) = res.headers().get(REQUEST_ID_HEADER) {
            tracing::debug!(request_id = ?request_id, status = %res.status(), "response received");
        }
        Ok(res)
    }

    /// Call the API and decode the JSON answer
    ///
    /// Fails with [`Error::Api`] when the status is above 399.
    pub async fn request<T>(&self, request: Request<Vec<u8>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = self.request_text(request).await?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("undecodable answer {:?}: {}", text, e);
            Error::SerdeError(e)
        })
    }

    /// Call the API and return the body text, for calls answering with no JSON (e.g. DELETE)
    pub async fn request_text(&self, request: Request<Vec<u8>>) -> Result<String> {
        let url = request.uri().to_string();
        let res = self.send(request.map(Body::from)).await?;
        let status = res.status();
        let text = read_text(res).await?;
        handle_api_errors(&url, &text, status)?;

        Ok(text)
    }
}

/// Collect a response body into a string
pub(crate) async fn read_text(res: Response<ResponseBody>) -> Result<String> {
    let body_bytes = res.into_body().collect().await.map_err(Error::Service)?.to_bytes();
    String::from_utf8(body_bytes.to_vec()).map_err(Error::FromUtf8)
}

/// Cloud Foundry returned error handling
///
/// The v2 API does not always describe failures with JSON,
/// so every status above 399 is an error carrying the body verbatim.
fn handle_api_errors(url: &str, text: &str, s: StatusCode) -> Result<()> {
    if s.as_u16() > 399 {
        tracing::debug!("Unsuccessful: {} {} => {}", url, s, text);
        Err(Error::Api {
            url: url.to_owned(),
            status: s,
            text: text.to_owned(),
        })
    } else {
        Ok(())
    }
}
