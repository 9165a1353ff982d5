// Handler for the EstimateCost RPC
use shared::models::EstimateBasis;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::active_snapshot;
use super::helpers::to_grpc_estimate;
use crate::config::settings::EngineSettings;
use crate::data::snapshot_store::SnapshotStore;
use crate::services::{EstimateRequest, EstimateResponse};

pub async fn handle_estimate_cost(
    req_payload: EstimateRequest,
    store: Arc<RwLock<SnapshotStore>>,
    settings: Arc<EngineSettings>,
) -> Result<Response<EstimateResponse>, Status> {
    tracing::debug!(month = req_payload.month, day = req_payload.day, "Handling EstimateRequest");

    let snapshot = active_snapshot(&store, &settings).await?;
    let result = snapshot.query(req_payload.month, req_payload.day).map_err(|e| {
        tracing::warn!(month = req_payload.month, day = req_payload.day, "Rejected query for a date not on the calendar");
        e
    })?;

    if result.basis == EstimateBasis::Fallback {
        tracing::warn!(
            month = req_payload.month,
            day = req_payload.day,
            nearest_day = ?result.nearest.map(|n| n.day_of_month),
            "No history for requested day; answering with the global mean"
        );
    }

    Ok(Response::new(to_grpc_estimate(&result)))
}
