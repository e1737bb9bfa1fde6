use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::future::{BoxFuture, FutureExt};
use http::Method;
use tower_service::Service;

use crate::context::RequestContext;
use crate::error::ServeError;
use crate::handler::{Handler, IntoResponse};
use crate::{Request, Response};

type RouteTable = HashMap<Method, matchit::Router<Arc<dyn Handler>>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteInfo {
    pub method: Method,
    pub path: String,
}

#[derive(Default)]
pub struct RouterBuilder {
    table: RouteTable,
    routes: Vec<RouteInfo>,
}

impl RouterBuilder {
    /// Register `handler` for `method` on `path` (`{name}` captures one segment).
    ///
    /// # Panics
    ///
    /// When `path` is malformed or conflicts with a route already registered for `method`.
    pub fn route<H>(mut self, method: Method, path: &str, handler: H) -> Self
    where
        H: Handler,
    {
        let handler: Arc<dyn Handler> = Arc::new(handler);
        if let Err(err) = self
            .table
            .entry(method.clone())
            .or_default()
            .insert(path, handler)
        {
            panic!("cannot register {} {}: {}", method, path, err);
        }
        self.routes.push(RouteInfo {
            method,
            path: path.to_string(),
        });
        self
    }

    pub fn get<H: Handler>(self, path: &str, handler: H) -> Self {
        self.route(Method::GET, path, handler)
    }

    pub fn post<H: Handler>(self, path: &str, handler: H) -> Self {
        self.route(Method::POST, path, handler)
    }

    pub fn build(self) -> RouterService {
        RouterService {
            table: Arc::new(self.table),
            routes: self.routes.into(),
        }
    }
}

/// Immutable route table shared by every invocation. Cloning is cheap.
#[derive(Clone)]
pub struct RouterService {
    table: Arc<RouteTable>,
    routes: Arc<[RouteInfo]>,
}

impl RouterService {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route one request. Routing and handler errors come back as error responses.
    pub async fn oneshot(&self, request: Request) -> Response {
        let (handler, params) = match self.resolve(request.method(), request.uri().path()) {
            Ok(found) => found,
            Err(err) => return err.into_response(),
        };
        match handler.call(RequestContext::new(request, params)).await {
            Ok(response) => response,
            Err(err) => err.into_response(),
        }
    }

    fn resolve(
        &self,
        method: &Method,
        path: &str,
    ) -> Result<(Arc<dyn Handler>, HashMap<String, String>), ServeError> {
        if let Some(found) = self.table.get(method).and_then(|paths| paths.at(path).ok()) {
            let params = found
                .params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            return Ok((Arc::clone(found.value), params));
        }

        let mut allowed: Vec<String> = self
            .table
            .iter()
            .filter(|(_, paths)| paths.at(path).is_ok())
            .map(|(candidate, _)| candidate.to_string())
            .collect();
        if allowed.is_empty() {
            return Err(ServeError::NotFound(path.to_string()));
        }
        allowed.sort();
        Err(ServeError::MethodNotAllowed {
            method: method.clone(),
            allowed,
        })
    }
}

impl Service<Request> for RouterService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let router = self.clone();
        async move { Ok(router.oneshot(request).await) }.boxed()
    }
}
