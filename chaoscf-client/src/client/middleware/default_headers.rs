use std::sync::Arc;

use http::{
    header::{ACCEPT, USER_AGENT},
    HeaderMap, HeaderValue, Request,
};
use tower::{Layer, Service};

const JSON_MIME: &str = "application/json";
const USER_AGENT_VALUE: &str = concat!("chaoscf/", env!("CARGO_PKG_VERSION"));

/// Layer that fills in headers a request does not set itself
#[derive(Clone, Debug)]
pub struct DefaultHeadersLayer {
    headers: Arc<HeaderMap>,
}

impl DefaultHeadersLayer {
    /// Fill in the given headers
    pub fn new(headers: HeaderMap) -> Self {
        Self {
            headers: Arc::new(headers),
        }
    }

    /// `Accept: application/json` and the `User-Agent` of this crate
    pub fn json_api() -> Self {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Self::new(headers)
    }
}

impl<S> Layer<S> for DefaultHeadersLayer {
    type Service = DefaultHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DefaultHeaders {
            inner,
            headers: self.headers.clone(),
        }
    }
}

/// Service that fills in headers a request does not set itself
#[derive(Clone, Debug)]
pub struct DefaultHeaders<S> {
    inner: S,
    headers: Arc<HeaderMap>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for DefaultHeaders<S>
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
        let headers = req.headers_mut();
        for (name, value) in self.headers.iter() {
            headers.entry(name).or_insert_with(|| value.clone());
        }
        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use http::{header::CONTENT_TYPE, Response};
    use tokio_test::assert_ready_ok;
    use tower_test::mock;

    #[tokio::test]
    async fn fills_in_missing_headers() {
        let (mut service, mut handle) =
            mock::spawn_layer::<Request<()>, Response<()>, _>(DefaultHeadersLayer::json_api());

        let spawned = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.headers()[ACCEPT], JSON_MIME);
            assert!(request.headers()[USER_AGENT]
                .to_str()
                .unwrap()
                .starts_with("chaoscf/"));
            assert_eq!(request.headers()[CONTENT_TYPE], JSON_MIME);
            send.send_response(Response::builder().body(()).unwrap());
        });

        assert_ready_ok!(service.poll_ready());
        service
            .call(
                Request::builder()
                    .header(CONTENT_TYPE, JSON_MIME)
                    .body(())
                    .unwrap(),
            )
            .await
            .unwrap();
        spawned.await.unwrap();
    }

    #[tokio::test]
    async fn keeps_headers_set_by_the_request() {
        let (mut service, mut handle) =
            mock::spawn_layer::<Request<()>, Response<()>, _>(DefaultHeadersLayer::json_api());

        let spawned = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.headers().get_all(ACCEPT).iter().count(), 1);
            assert_eq!(request.headers()[ACCEPT], "text/plain");
            send.send_response(Response::builder().body(()).unwrap());
        });

        assert_ready_ok!(service.poll_ready());
        service
            .call(Request::builder().header(ACCEPT, "text/plain").body(()).unwrap())
            .await
            .unwrap();
        spawned.await.unwrap();
    }
}
