use anyhow::Context;
use app_demo_core::DemoApp;
use serverlink_adapter_lambda::{export_with_manifest, Entrypoint, LambdaHandler};

static HANDLER: Entrypoint<LambdaHandler> = Entrypoint::new();

const MANIFEST: &str = include_str!("../../../serverlink.toml");

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let handler = export_with_manifest::<DemoApp>(&HANDLER, MANIFEST)?;
    log::info!("{} ready", handler.app_name());

    lambda_http::run(handler.clone())
        .await
        .map_err(|err| anyhow::anyhow!(err))
        .context("Lambda runtime stopped")
}
