//! Resolve request paths against the API URL.
use http::{Request, Uri};
use tower::{Layer, Service};

/// Layer that applies [`BaseUri`] which makes all requests relative to the API URL.
///
/// A path in the API URL is kept in front of every request path.
#[derive(Debug, Clone)]
pub struct BaseUriLayer {
    prefix: String,
}

impl BaseUriLayer {
    /// Resolve relative requests against `api_url`
    pub fn new(api_url: Uri) -> Self {
        let mut prefix = match (api_url.scheme_str(), api_url.authority()) {
            (Some(scheme), Some(authority)) => format!("{scheme}://{authority}"),
            _ => String::new(),
        };
        prefix.push_str(api_url.path().trim_end_matches('/'));
        Self { prefix }
    }

    fn resolve(&self, uri: &Uri) -> Option<Uri> {
        let pandq = uri.path_and_query().map_or("/", |pq| pq.as_str());
        format!("{}{}", self.prefix, pandq).parse().ok()
    }
}

impl<S> Layer<S> for BaseUriLayer {
    type Service = BaseUri<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BaseUri {
            layer: self.clone(),
            inner,
        }
    }
}

/// Middleware resolving relative request URIs against the API URL.
///
/// Requests already carrying an authority, such as calls to UAA, go out unchanged.
#[derive(Debug, Clone)]
pub struct BaseUri<S> {
    layer: BaseUriLayer,
    inner: S,
}

impl<S, ReqBody> Service<Request<ReqBody>> for BaseUri<S>
where
    S: Service<Request<ReqBody>>,
{
    type Error = S::Error;
    type Future = S::Future;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        if req.uri().authority().is_none() {
            match self.layer.resolve(req.uri()) {
                Some(uri) => *req.uri_mut() = uri,
                None => tracing::warn!("cannot resolve {} against {}", req.uri(), self.layer.prefix),
            }
        }
        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Response;
    use tokio_test::assert_ready_ok;
    use tower_test::{mock, mock::Handle};

    #[test]
    fn api_host() {
        let layer = BaseUriLayer::new(Uri::from_static("https://api.sys.example.com"));
        assert_eq!(
            layer
                .resolve(&Uri::from_static("/v2/apps?q=name%3Amy-app"))
                .unwrap(),
            "https://api.sys.example.com/v2/apps?q=name%3Amy-app"
        );
    }

    #[test]
    fn api_behind_a_path() {
        let layer = BaseUriLayer::new(Uri::from_static("https://example.com/cf/"));
        assert_eq!(
            layer.resolve(&Uri::from_static("/v2/info")).unwrap(),
            "https://example.com/cf/v2/info"
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn absolute_uris_are_untouched() {
        let layer = BaseUriLayer::new(Uri::from_static("https://example.com"));
        let (mut service, mut handle): (_, Handle<Request<()>, Response<()>>) = mock::spawn_layer(layer);

        let spawned = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.uri(), "https://uaa.example.com/oauth/token");
            let (request, send2) = handle.next_request().await.expect("service not called");
            assert_eq!(request.uri(), "https://example.com/v2/info");
            send.send_response(Response::new(()));
            send2.send_response(Response::new(()));
        });

        assert_ready_ok!(service.poll_ready());
        let uaa = service.call(
            Request::builder()
                .uri("https://uaa.example.com/oauth/token")
                .body(())
                .unwrap(),
        );
        assert_ready_ok!(service.poll_ready());
        let info = service.call(Request::builder().uri("/v2/info").body(()).unwrap());
        uaa.await.unwrap();
        info.await.unwrap();
        spawned.await.unwrap();
    }
}
