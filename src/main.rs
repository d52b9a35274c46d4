use anyhow::Context;
use quolab_setup::config::Config;
use quolab_setup::controller::SetupController;
use quolab_setup::logging::init_tracing;
use quolab_setup::store::RestEntryStore;
use quolab_setup::ui::runtime;
use std::sync::Arc;

const LOG_FILE: &str = "setup.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = Config::config_path();
    let config = Config::load()
        .with_context(|| format!("loading {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("checking {}", config_path.display()))?;

    let log_path = Config::config_dir().join(LOG_FILE);
    init_tracing(&log_path).with_context(|| format!("opening {}", log_path.display()))?;
    tracing::info!(
        base_url = %config.server.base_url,
        app = %config.app.name,
        "starting setup panel"
    );

    let store = RestEntryStore::new(&config.server, &config.app)
        .context("building the configuration store client")?;
    let controller = SetupController::new(Arc::new(config.app), store);

    runtime::run(controller).await?;
    Ok(())
}
