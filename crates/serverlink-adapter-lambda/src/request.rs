use std::time::Instant;

use bytes::Bytes;
use lambda_http::{Body as LambdaBody, Request as LambdaRequest, RequestExt, Response as LambdaResponse};
use serverlink_core::app::App;
use serverlink_core::body::Body;
use serverlink_core::Request;

use crate::context::LambdaRequestContext;
use crate::response::{from_core_response, internal_error_response};

/// Rebuild a Lambda HTTP event as a core request, keeping method, URI, headers and
/// extensions. The payload is already in memory, so the body is always buffered.
pub fn into_core_request(request: LambdaRequest) -> Request {
    let context = request
        .lambda_context_ref()
        .map(LambdaRequestContext::from_lambda);

    let (parts, body) = request.into_parts();
    let payload = match body {
        LambdaBody::Empty => Bytes::new(),
        LambdaBody::Text(text) => Bytes::from(text),
        LambdaBody::Binary(data) => Bytes::from(data),
    };

    let mut core = Request::from_parts(parts, Body::from(payload));
    if let Some(context) = context {
        LambdaRequestContext::insert(&mut core, context);
    }
    core
}

/// Serve one invocation with `app`. Always yields a response; a body that cannot be
/// translated turns into a 500.
pub async fn dispatch(app: &App, request: LambdaRequest) -> LambdaResponse<LambdaBody> {
    let request = into_core_request(request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = LambdaRequestContext::get(&request)
        .and_then(|context| context.request_id.clone())
        .unwrap_or_default();

    let started = Instant::now();
    let response = app.router().oneshot(request).await;
    let status = response.status().as_u16();

    let translated = from_core_response(response).await;
    tracing::info!(
        app = app.name(),
        %method,
        path = %path,
        status,
        request_id = %request_id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled invocation"
    );

    translated.unwrap_or_else(|err| {
        tracing::error!(app = app.name(), path = %path, "response translation failed: {}", err);
        internal_error_response()
    })
}
