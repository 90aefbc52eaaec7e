
#[cfg(feature = "rustls-tls")] use super::tls;
use super::middleware::{BaseUriLayer, DefaultHeadersLayer};
use crate::{Config, Result};

/// Extensions to [`Config`](crate::Config) for custom [`Client`](crate::Client).
///
/// See [`Client::new`](crate::Client::new) to assemble a stack from these layers.
///
/// This trait is sealed and cannot be implemented.
pub trait ConfigExt: private::Sealed {
    /// Layer to set the base URI of requests to the configured API.
    fn base_uri_layer(&self) -> BaseUriLayer;

    /// Layer to add the non-authn HTTP headers every call carries.
    fn default_headers_layer(&self) -> DefaultHeadersLayer;

    /// Create [`rustls::ClientConfig`] based on config.
    ///
    /// Certificates are checked against the native roots unless SSL verification is disabled.
    #[cfg_attr(docsrs, doc(cfg(feature = "rustls-tls")))]
    #[cfg(feature = "rustls-tls")]
    fn rustls_client_config(&self) -> Result<rustls::ClientConfig>;

    /// Create [`hyper_rustls::HttpsConnector`] based on config and `connector`.
    #[cfg_attr(docsrs, doc(cfg(feature = "rustls-tls")))]
    #[cfg(feature = "rustls-tls")]
    fn rustls_https_connector_with_connector<H>(
        &self,
        connector: H,
    ) -> Result<hyper_rustls::HttpsConnector<H>>;
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Config {}
}

impl ConfigExt for Config {
    fn base_uri_layer(&self) -> BaseUriLayer {
        BaseUriLayer::new(self.api_url.clone())
    }

    fn default_headers_layer(&self) -> DefaultHeadersLayer {
        DefaultHeadersLayer::json_api()
    }

    #[cfg(feature = "rustls-tls")]
    fn rustls_client_config(&self) -> Result<rustls::ClientConfig> {
        tls::rustls_client_config(self.verify_ssl)
    }

    #[cfg(feature = "rustls-tls")]
    fn rustls_https_connector_with_connector<H>(
        &self,
        connector: H,
    ) -> Result<hyper_rustls::HttpsConnector<H>> {
        let rustls_config = self.rustls_client_config()?;
        Ok(hyper_rustls::HttpsConnectorBuilder::new()
            .with_tls_config(rustls_config)
            .https_or_http()
            .enable_http1()
            .wrap_connector(connector))
    }
}
