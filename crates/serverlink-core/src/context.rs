use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::ServeError;
use crate::Request;

/// What a handler sees: the request plus the parameters captured by its route.
pub struct RequestContext {
    request: Request,
    params: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(request: Request, params: HashMap<String, String>) -> Self {
        Self { request, params }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn into_request(self) -> Request {
        self.request
    }

    /// Value captured by a `{name}` segment of the matched route.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    /// Typed data an adapter attached to the request, such as invocation metadata.
    pub fn extension<T>(&self) -> Option<&T>
    where
        T: Send + Sync + 'static,
    {
        self.request.extensions().get::<T>()
    }

    /// Decode the buffered body as JSON. Malformed or streamed bodies are a 400.
    pub fn json<T>(&self) -> Result<T, ServeError>
    where
        T: DeserializeOwned,
    {
        let bytes = self
            .request
            .body()
            .bytes()
            .ok_or_else(|| ServeError::bad_request("request body was not buffered"))?;
        serde_json::from_slice(bytes)
            .map_err(|err| ServeError::bad_request(format!("malformed JSON body: {}", err)))
    }
}
