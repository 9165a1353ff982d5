// Handler for the LoadDataset RPC
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers::to_grpc_report;
use crate::config::settings::EngineSettings;
use crate::data::snapshot_store::{self, SnapshotStore};
use crate::data::LoadOptions;
use crate::error::EngineError;
use crate::services::{LoadDatasetRequest, LoadDatasetResponse};

pub async fn handle_load_dataset(
    req_payload: LoadDatasetRequest,
    store: Arc<RwLock<SnapshotStore>>,
    settings: Arc<EngineSettings>,
) -> Result<Response<LoadDatasetResponse>, Status> {
    let path = if req_payload.file_path.trim().is_empty() {
        settings.data_path.clone().ok_or_else(|| {
            EngineError::ConfigError("No file path given and no data_path configured".to_string())
        })?
    } else {
        PathBuf::from(req_payload.file_path.trim())
    };
    tracing::debug!(path = %path.display(), force = req_payload.force, "Handling LoadDatasetRequest");

    let options = LoadOptions::from(settings.as_ref());
    let refreshed = snapshot_store::refresh(&store, &path, &options, req_payload.force).await?;
    let snapshot = refreshed.snapshot;
    let report = snapshot.report();

    let message = if refreshed.rebuilt {
        format!(
            "Loaded {} of {} transactions from {} ({} dropped)",
            report.retained_count,
            report.initial_count,
            path.display(),
            report.dropped_count
        )
    } else {
        format!("Dataset from {} is unchanged; reusing current snapshot", path.display())
    };

    Ok(Response::new(LoadDatasetResponse {
        success: true,
        message,
        rebuilt: refreshed.rebuilt,
        report: Some(to_grpc_report(report)),
        lookup_entries: snapshot.lookup().len() as u64,
        global_mean: snapshot.lookup().global_mean(),
    }))
}
