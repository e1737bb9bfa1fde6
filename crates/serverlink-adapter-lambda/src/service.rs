use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use lambda_http::{Body as LambdaBody, Request as LambdaRequest, Response as LambdaResponse};
use serverlink_core::app::App;
use serverlink_core::router::RouterService;
use thiserror::Error;
use tower::Service;

use crate::request::dispatch;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("app `{app}` has no routes to serve")]
    NoRoutes { app: String },
}

/// Input to [`serverless`]: the application instance to drive.
pub struct ServerlessOptions {
    pub app: App,
}

/// The handler factory: wrap an app so `lambda_http::run` can drive it.
pub fn serverless(options: ServerlessOptions) -> Result<LambdaHandler, AdapterError> {
    let app = options.app;
    if app.router().is_empty() {
        return Err(AdapterError::NoRoutes {
            app: app.name().to_string(),
        });
    }
    log::info!("{}: {} route(s) ready", app.name(), app.router().routes().len());
    Ok(LambdaHandler { app: Arc::new(app) })
}

#[derive(Clone)]
pub struct LambdaHandler {
    app: Arc<App>,
}

impl LambdaHandler {
    pub fn app_name(&self) -> &str {
        self.app.name()
    }

    pub fn router(&self) -> &RouterService {
        self.app.router()
    }
}

impl Service<LambdaRequest> for LambdaHandler {
    type Response = LambdaResponse<LambdaBody>;
    type Error = lambda_http::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: LambdaRequest) -> Self::Future {
        let app = Arc::clone(&self.app);
        Box::pin(async move { Ok(dispatch(&app, request).await) })
    }
}
