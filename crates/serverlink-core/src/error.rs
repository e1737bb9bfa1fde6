use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::body::Body;
use crate::handler::IntoResponse;
use crate::Response;

/// Failure raised while routing or handling a request.
///
/// Every variant maps to one HTTP status and renders as
/// `{"error":{"status":<code>,"message":"..."}}`.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("{0}")]
    BadRequest(String),
    #[error("no route for {0}")]
    NotFound(String),
    #[error("{method} is not allowed here; allowed: {}", .allowed.join(", "))]
    MethodNotAllowed { method: Method, allowed: Vec<String> },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServeError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServeError::BadRequest(message.into())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        ServeError::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServeError::NotFound(_) => StatusCode::NOT_FOUND,
            ServeError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ServeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the caller. Internal causes stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ServeError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    status: u16,
    message: &'a str,
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        if let ServeError::Internal(cause) = &self {
            log::error!("request failed: {:#}", cause);
        }

        let status = self.status();
        let message = self.public_message();
        let payload = serde_json::to_vec(&ErrorEnvelope {
            error: ErrorDetail {
                status: status.as_u16(),
                message: &message,
            },
        })
        .unwrap_or_default();

        let mut response = Response::new(Body::from(payload));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}
