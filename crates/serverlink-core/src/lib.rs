//! Minimal application runtime driven by the Serverlink adapters.
//!
//! An app is a [`router::RouterService`] plus a name. Adapters turn platform events into
//! [`Request`]s, call [`router::RouterService::oneshot`] and translate the [`Response`] back.

pub mod app;
pub mod body;
pub mod context;
pub mod error;
pub mod handler;
pub mod manifest;
pub mod router;

pub type Request = http::Request<body::Body>;
pub type Response = http::Response<body::Body>;
