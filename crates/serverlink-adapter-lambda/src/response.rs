use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use lambda_http::{Body as LambdaBody, Response as LambdaResponse};
use serverlink_core::error::ServeError;
use serverlink_core::Response;

/// Turn a core response into what the Lambda runtime sends back.
///
/// Streaming bodies are collected first because Lambda replies in one piece.
pub async fn from_core_response(
    response: Response,
) -> Result<LambdaResponse<LambdaBody>, ServeError> {
    let (parts, body) = response.into_parts();
    let payload = body
        .collect()
        .await
        .map_err(|err| ServeError::internal(err.context("response stream failed")))?;
    let body = lambda_body(&parts.headers, payload);
    Ok(LambdaResponse::from_parts(parts, body))
}

/// `Text` only when the content type says so and the bytes agree; `lambda_http`
/// base64-encodes everything else.
fn lambda_body(headers: &HeaderMap, payload: Bytes) -> LambdaBody {
    if payload.is_empty() {
        return LambdaBody::Empty;
    }
    if !declares_text(headers) {
        return LambdaBody::Binary(payload.to_vec());
    }
    match String::from_utf8(payload.to_vec()) {
        Ok(text) => LambdaBody::Text(text),
        Err(invalid) => LambdaBody::Binary(invalid.into_bytes()),
    }
}

fn declares_text(headers: &HeaderMap) -> bool {
    let essence = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase());

    match essence.as_deref() {
        None => false,
        Some(mime) if mime.starts_with("text/") => true,
        Some(mime) if mime.ends_with("/json") || mime.ends_with("+json") => true,
        Some(mime) if mime.ends_with("/xml") || mime.ends_with("+xml") => true,
        Some("application/javascript" | "application/x-www-form-urlencoded") => true,
        Some(_) => false,
    }
}

pub(crate) fn internal_error_response() -> LambdaResponse<LambdaBody> {
    let mut response = LambdaResponse::new(LambdaBody::Text(
        "{\"error\":{\"status\":500,\"message\":\"internal server error\"}}".to_string(),
    ));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::stream;
    use serverlink_core::body::Body;
    use std::io;

    fn translate(content_type: Option<&str>, body: Body) -> LambdaResponse<LambdaBody> {
        let mut response = Response::new(body);
        *response.status_mut() = StatusCode::ACCEPTED;
        response
            .headers_mut()
            .insert("x-trace", HeaderValue::from_static("t-1"));
        if let Some(value) = content_type {
            response.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_str(value).expect("header value"),
            );
        }
        block_on(from_core_response(response)).expect("translated")
    }

    #[test]
    fn keeps_status_and_headers() {
        let translated = translate(Some("text/html; charset=utf-8"), Body::from("<p>ok</p>"));
        assert_eq!(translated.status(), StatusCode::ACCEPTED);
        assert_eq!(translated.headers()["x-trace"], "t-1");
        assert_eq!(translated.body(), &LambdaBody::Text("<p>ok</p>".into()));
    }

    #[test]
    fn json_flavours_are_text() {
        for content_type in ["application/json", "application/problem+json", "image/svg+xml"] {
            let translated = translate(Some(content_type), Body::from("{}"));
            assert_eq!(translated.body(), &LambdaBody::Text("{}".into()), "{}", content_type);
        }
    }

    #[test]
    fn opaque_or_undeclared_payloads_are_binary() {
        let png = translate(Some("image/png"), Body::from(vec![0x89, b'P', b'N', b'G']));
        assert_eq!(png.body(), &LambdaBody::Binary(vec![0x89, b'P', b'N', b'G']));

        let undeclared = translate(None, Body::from("plain"));
        assert_eq!(undeclared.body(), &LambdaBody::Binary(b"plain".to_vec()));

        let lying = translate(Some("text/plain"), Body::from(vec![0xc3, 0x28]));
        assert_eq!(lying.body(), &LambdaBody::Binary(vec![0xc3, 0x28]));
    }

    #[test]
    fn empty_payload_is_empty() {
        let translated = translate(Some("text/plain"), Body::empty());
        assert_eq!(translated.body(), &LambdaBody::Empty);
    }

    #[test]
    fn streams_are_collected() {
        let chunks: Vec<Result<Bytes, io::Error>> = vec![
            Ok(Bytes::from_static(b"line 1\n")),
            Ok(Bytes::from_static(b"line 2\n")),
        ];
        let translated = translate(Some("text/plain"), Body::from_stream(stream::iter(chunks)));
        assert_eq!(translated.body(), &LambdaBody::Text("line 1\nline 2\n".into()));
    }

    #[test]
    fn broken_stream_is_an_internal_error() {
        let chunks = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
        ];
        let response = Response::new(Body::from_stream(stream::iter(chunks)));
        let err = block_on(from_core_response(response)).err().expect("error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn fallback_is_a_json_500() {
        let response = internal_error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }
}
