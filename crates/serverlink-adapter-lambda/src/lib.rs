//! AWS Lambda adapter for Serverlink applications.
//!
//! An entry point declares a `static` [`Entrypoint`], exports
//! `serverless(ServerlessOptions { app })` through it once, and hands the resulting
//! [`LambdaHandler`] to `lambda_http::run`.

mod context;
mod entrypoint;
mod request;
mod response;
mod runtime;
mod service;

pub use context::LambdaRequestContext;
pub use entrypoint::{Entrypoint, LoadError};
pub use request::{dispatch, into_core_request};
pub use response::from_core_response;
pub use runtime::{
    export_with_manifest, init_logger, run_app, run_app_with_manifest, ADAPTER_NAME,
};
pub use service::{serverless, AdapterError, LambdaHandler, ServerlessOptions};
