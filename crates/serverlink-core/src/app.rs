use crate::error::ServeError;
use crate::manifest::Manifest;
use crate::router::RouterService;

/// The application instance an entry point initialises once and hands to an adapter.
pub struct App {
    name: String,
    router: RouterService,
}

impl App {
    pub fn new(name: impl Into<String>, router: RouterService) -> Self {
        Self {
            name: name.into(),
            router,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn router(&self) -> &RouterService {
        &self.router
    }

    /// Overlay `[app]` settings from `serverlink.toml`.
    pub fn apply_manifest(&mut self, manifest: &Manifest) {
        if let Some(name) = &manifest.app.name {
            self.name = name.clone();
        }
    }
}

/// How an application is assembled.
pub trait Hooks {
    fn routes() -> RouterService;

    fn name() -> &'static str {
        "serverlink-app"
    }

    fn build_app() -> App
    where
        Self: Sized,
    {
        App::new(Self::name(), Self::routes())
    }

    /// Initializer run by entry points. Override when assembly can fail.
    fn try_build_app() -> Result<App, ServeError>
    where
        Self: Sized,
    {
        Ok(Self::build_app())
    }

    /// [`Hooks::try_build_app`] followed by [`App::apply_manifest`].
    fn try_build_with_manifest(manifest: &Manifest) -> Result<App, ServeError>
    where
        Self: Sized,
    {
        let mut app = Self::try_build_app()?;
        app.apply_manifest(manifest);
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RequestContext;
    use crate::manifest::ManifestLoader;

    struct Pinger;

    impl Hooks for Pinger {
        fn routes() -> RouterService {
            async fn ping(_ctx: RequestContext) -> Result<&'static str, ServeError> {
                Ok("pong")
            }
            RouterService::builder().get("/ping", ping).build()
        }

        fn name() -> &'static str {
            "pinger"
        }
    }

    struct Misconfigured;

    impl Hooks for Misconfigured {
        fn routes() -> RouterService {
            RouterService::builder().build()
        }

        fn try_build_app() -> Result<App, ServeError> {
            Err(ServeError::internal(anyhow::anyhow!("TABLE_NAME is not set")))
        }
    }

    #[test]
    fn default_initializer_builds_named_app() {
        let app = Pinger::try_build_app().expect("app");
        assert_eq!(app.name(), "pinger");
        assert_eq!(app.router().routes().len(), 1);
    }

    #[test]
    fn failing_initializer_surfaces_its_error() {
        let err = Misconfigured::try_build_app().err().expect("error");
        assert!(err.to_string().contains("TABLE_NAME"));

        let manifest = ManifestLoader::load_from_str("").expect("manifest");
        assert!(Misconfigured::try_build_with_manifest(manifest.manifest()).is_err());
    }

    #[test]
    fn manifest_name_wins_over_hook_name() {
        let loader =
            ManifestLoader::load_from_str("[app]\nname = \"orders\"\n").expect("manifest");
        let app = Pinger::try_build_with_manifest(loader.manifest()).expect("app");
        assert_eq!(app.name(), "orders");

        let empty = ManifestLoader::load_from_str("").expect("manifest");
        let app = Pinger::try_build_with_manifest(empty.manifest()).expect("app");
        assert_eq!(app.name(), "pinger");
    }
}
