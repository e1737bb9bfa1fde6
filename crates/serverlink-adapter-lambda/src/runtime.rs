use anyhow::Context;
use log::LevelFilter;
use once_cell::sync::OnceCell;
use serverlink_core::app::Hooks;
use serverlink_core::manifest::{LoggingConfig, ManifestLoader};
use simple_logger::SimpleLogger;
use tokio::runtime::Builder as RuntimeBuilder;

use crate::entrypoint::Entrypoint;
use crate::service::{serverless, LambdaHandler};

/// Key of this adapter's sections in `serverlink.toml`.
pub const ADAPTER_NAME: &str = "lambda";

static HANDLER: Entrypoint<LambdaHandler> = Entrypoint::new();
static LOGGER_LEVEL: OnceCell<LevelFilter> = OnceCell::new();

/// Install `simple_logger`. The first call decides the level; later calls return it.
pub fn init_logger(logging: &LoggingConfig) -> LevelFilter {
    *LOGGER_LEVEL.get_or_init(|| {
        let level = logging.level_filter();
        SimpleLogger::new().with_level(level).init().ok();
        level
    })
}

/// Parse `manifest_src`, install logging from its `lambda` sections and export
/// `serverless(A::try_build_with_manifest(..))` into `entry`.
pub fn export_with_manifest<'e, A: Hooks>(
    entry: &'e Entrypoint<LambdaHandler>,
    manifest_src: &str,
) -> anyhow::Result<&'e LambdaHandler> {
    let loader = ManifestLoader::load_from_str(manifest_src).context("invalid serverlink.toml")?;
    let manifest = loader.manifest();
    init_logger(&manifest.logging_or_default(ADAPTER_NAME));

    entry
        .export(|| A::try_build_with_manifest(manifest), serverless)
        .context("failed to load Lambda handler")
}

/// Export `A` with default settings and serve invocations until the runtime stops.
pub fn run_app<A: Hooks>() -> anyhow::Result<()> {
    run_app_with_manifest::<A>("")
}

/// [`run_app`] configured from a `serverlink.toml` source.
pub fn run_app_with_manifest<A: Hooks>(manifest_src: &str) -> anyhow::Result<()> {
    let handler = export_with_manifest::<A>(&HANDLER, manifest_src)?.clone();

    RuntimeBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?
        .block_on(lambda_http::run(handler))
        .map_err(|err| anyhow::anyhow!(err))
        .context("Lambda runtime stopped")
}
