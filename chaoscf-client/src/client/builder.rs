use std::time::Duration;

use http::{Request, Response};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper_util::{client::legacy::connect::HttpConnector, rt::TokioExecutor};
use tower::{util::BoxService, BoxError, Layer, Service, ServiceBuilder};
use tower_http::{
    classify::ServerErrorsFailureClass, map_response_body::MapResponseBodyLayer, trace::TraceLayer,
};
use tracing::Span;

use super::{Body, ResponseBody, REQUEST_ID_HEADER};
use crate::{client::ConfigExt, Client, Config, Error, Result};

/// Assembles the [tower](`Service`) stack a [`Client`] sends its requests through.
pub struct ClientBuilder<Svc> {
    service: Svc,
}

impl<Svc> ClientBuilder<Svc> {
    /// Start from any [`Service`]
    ///
    /// [`ClientBuilder::try_from`] gives the HTTPS stack for a [`Config`] instead.
    pub fn new(service: Svc) -> Self
    where
        Svc: Service<Request<Body>>,
    {
        Self { service }
    }

    /// Wrap the stack in one more [`Layer`], e.g. [`AuthLayer`](super::middleware::AuthLayer).
    pub fn with_layer<L: Layer<Svc>>(self, layer: &L) -> ClientBuilder<L::Service> {
        ClientBuilder {
            service: layer.layer(self.service),
        }
    }

    /// Finish the stack into a [`Client`]
    pub fn build<B>(self) -> Client
    where
        Svc: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        Svc::Future: Send + 'static,
        Svc::Error: Into<BoxError>,
        B: http_body::Body<Data = bytes::Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        Client::new(self.service)
    }
}

/// The default, unauthenticated stack
pub type GenericService = BoxService<Request<Body>, Response<ResponseBody>, BoxError>;

impl TryFrom<&Config> for ClientBuilder<GenericService> {
    type Error = Error;

    /// Builds the default stack from a given configuration, without authorization
    fn try_from(config: &Config) -> Result<Self> {
        let mut connector = HttpConnector::new();
        connector.enforce_http(false);

        #[cfg(feature = "rustls-tls")]
        let connector = config.rustls_https_connector_with_connector(connector)?;
        #[cfg(not(feature = "rustls-tls"))]
        if config.api_url.scheme() == Some(&http::uri::Scheme::HTTPS) {
            return Err(Error::TlsRequired(config.api_url.clone()));
        }

        let client: hyper_util::client::legacy::Client<_, Body> =
            hyper_util::client::legacy::Builder::new(TokioExecutor::new()).build(connector);

        let service = ServiceBuilder::new()
            .layer(config.base_uri_layer())
            .layer(config.default_headers_layer())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|req: &Request<Body>| {
                        tracing::debug_span!(
                            "cf",
                            http.method = %req.method(),
                            http.url = %req.uri(),
                            http.status_code = tracing::field::Empty,
                            cf.request_id = tracing::field::Empty,
                        )
                    })
                    .on_request(())
                    .on_response(|res: &Response<Incoming>, latency: Duration, span: &Span| {
                        span.record("http.status_code", res.status().as_u16());
                        if let Some(id) = res.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
                            span.record("cf.request_id", id);
                        }
                        tracing::debug!("answered in {}ms", latency.as_millis());
                    })
                    .on_body_chunk(())
                    .on_eos(())
                    .on_failure(|ec: ServerErrorsFailureClass, _latency: Duration, _span: &Span| match ec {
                        ServerErrorsFailureClass::StatusCode(status) => {
                            tracing::warn!("Cloud Foundry answered {}", status)
                        }
                        ServerErrorsFailureClass::Error(err) => tracing::error!("call failed: {}", err),
                    }),
            )
            .map_err(BoxError::from)
            .service(client);

        Ok(ClientBuilder::new(BoxService::new(
            MapResponseBodyLayer::new(|body| -> ResponseBody {
                BodyExt::boxed_unsync(BodyExt::map_err(body, BoxError::from))
            })
            .layer(service),
        )))
    }
}
