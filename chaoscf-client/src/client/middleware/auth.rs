use http::{header::AUTHORIZATION, HeaderValue, Request};
use tower::{Layer, Service};

/// Layer that sets the `Authorization` header of every request
///
/// Holds the full header value, e.g. `bearer eyJ...`, marked as sensitive.
#[derive(Clone)]
pub struct AuthLayer {
    value: HeaderValue,
}

impl AuthLayer {
    /// Authorize requests with the given header value
    pub fn new(mut value: HeaderValue) -> Self {
        value.set_sensitive(true);
        Self { value }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AddAuthorization<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AddAuthorization {
            inner,
            value: self.value.clone(),
        }
    }
}

/// Service that sets the `Authorization` header of every request
#[derive(Clone)]
pub struct AddAuthorization<S> {
    inner: S,
    value: HeaderValue,
}

impl<S, ReqBody> Service<Request<ReqBody>> for AddAuthorization<S>
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
        // Calls that bring their own credentials, like the token exchange, keep them.
        if !req.headers().contains_key(AUTHORIZATION) {
            req.headers_mut().insert(AUTHORIZATION, self.value.clone());
        }
        self.inner.call(req)
    }
}
