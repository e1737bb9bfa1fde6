//! Load-time export of a handler into a process-wide slot.
//!
//! A function's entry module declares one `static` [`Entrypoint`] and calls
//! [`Entrypoint::export`] with the app initializer and the adapter factory.
//! Both run at most once per process; warm invocations reuse the stored handler.

use once_cell::sync::OnceCell;
use serverlink_core::app::App;
use thiserror::Error;

use crate::service::ServerlessOptions;

#[derive(Debug, Error)]
pub enum LoadError<I, F> {
    #[error("application initializer failed: {0}")]
    Init(I),
    #[error("serverless adapter factory failed: {0}")]
    Factory(F),
}

pub struct Entrypoint<H> {
    handler: OnceCell<H>,
}

impl<H> Entrypoint<H> {
    pub const fn new() -> Self {
        Self {
            handler: OnceCell::new(),
        }
    }

    /// Build the app, wrap it with `factory` and publish the result.
    ///
    /// If `init` fails the factory is never called. On any failure nothing is
    /// exported and a later call may try again.
    pub fn export<I, F, IE, FE>(&self, init: I, factory: F) -> Result<&H, LoadError<IE, FE>>
    where
        I: FnOnce() -> Result<App, IE>,
        F: FnOnce(ServerlessOptions) -> Result<H, FE>,
    {
        self.handler.get_or_try_init(|| {
            let app = init().map_err(LoadError::Init)?;
            log::debug!("initialized app `{}`", app.name());
            factory(ServerlessOptions { app }).map_err(LoadError::Factory)
        })
    }

    /// The exported handler, if `export` has succeeded.
    pub fn get(&self) -> Option<&H> {
        self.handler.get()
    }

    pub fn is_exported(&self) -> bool {
        self.handler.get().is_some()
    }
}

impl<H> Default for Entrypoint<H> {
    fn default() -> Self {
        Self::new()
    }
}
