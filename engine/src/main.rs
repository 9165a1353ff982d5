// Engine main entry point
use anyhow::Context;
use engine::config::settings::EngineSettings;
use engine::data::snapshot_store::{self, SnapshotStore};
use engine::data::LoadOptions;
use engine::services::estimator_service::EstimatorEngine;
use engine::services::ShoppingEstimatorServer;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::transport::Server;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting shopping cost estimator engine...");

    let settings = EngineSettings::from_env().context("Failed to load engine settings")?;
    let addr: SocketAddr = settings
        .listen_addr()
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", settings.listen_addr()))?;
    info!("Engine will listen on {}", addr);

    let store = Arc::new(RwLock::new(SnapshotStore::new()));

    // A broken source only logs here; LoadDataset can retry once it is fixed.
    if let Some(path) = settings.data_path.as_deref() {
        match snapshot_store::refresh(&store, path, &LoadOptions::from(&settings), false).await {
            Ok(refreshed) => info!(
                source = %path.display(),
                transactions = refreshed.snapshot.transactions().len(),
                "Preloaded dataset"
            ),
            Err(e) => warn!(source = %path.display(), error = %e, "Could not preload dataset"),
        }
    }

    let estimator_service = EstimatorEngine::new(store, Arc::new(settings));

    Server::builder()
        .add_service(ShoppingEstimatorServer::new(estimator_service))
        .serve(addr)
        .await?;

    Ok(())
}
