use std::future::Future;

use futures_util::future::{BoxFuture, FutureExt};
use http::header::{HeaderValue, CONTENT_TYPE};

use crate::body::Body;
use crate::context::RequestContext;
use crate::error::ServeError;
use crate::Response;

pub type HandlerResult = Result<Response, ServeError>;

/// Values a handler may return on success.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        plain_text(Body::from(self))
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        plain_text(Body::from(self))
    }
}

fn plain_text(body: Body) -> Response {
    let mut response = Response::new(body);
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// A routed request handler. Implemented for every
/// `async fn(RequestContext) -> Result<impl IntoResponse, ServeError>`.
///
/// Handler futures are `Send`, so an adapter can await them on any tokio runtime flavor.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, ctx: RequestContext) -> BoxFuture<'static, HandlerResult>;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, ServeError>> + Send + 'static,
    R: IntoResponse,
{
    fn call(&self, ctx: RequestContext) -> BoxFuture<'static, HandlerResult> {
        let fut = self(ctx);
        async move { fut.await.map(IntoResponse::into_response) }.boxed()
    }
}
