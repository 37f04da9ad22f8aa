use std::sync::Arc;

use anyhow::Result;
use log::info;

use airaware::{
    api,
    config::Config,
    db::Database,
    predict::{artifacts::ArtifactStore, gateway::ModelGateway},
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("AirAware starting up...");

    let config = Config::from_env()?;
    let database = Database::new(config.db_path.clone())?;
    let model = ModelGateway::new(config.model_path.clone());
    let artifacts = ArtifactStore::new(config.artifacts_dir.clone(), config.data_dir.clone());

    let state = Arc::new(AppState {
        db: database,
        model,
        artifacts,
    });
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
