// Handler for the GetDatasetSummary RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::active_snapshot;
use super::helpers::{to_grpc_department, to_grpc_month, to_grpc_patient, to_grpc_summary};
use crate::config::settings::EngineSettings;
use crate::data::snapshot_store::SnapshotStore;
use crate::services::SummaryResponse;

pub async fn handle_get_dataset_summary(
    store: Arc<RwLock<SnapshotStore>>,
    settings: Arc<EngineSettings>,
) -> Result<Response<SummaryResponse>, Status> {
    let snapshot = active_snapshot(&store, &settings).await?;
    let analytics = snapshot.analytics();
    tracing::debug!(
        transactions = analytics.summary.transaction_count,
        departments = analytics.departments.len(),
        "Handling SummaryRequest"
    );

    Ok(Response::new(SummaryResponse {
        summary: Some(to_grpc_summary(&analytics.summary)),
        departments: analytics.departments.iter().map(to_grpc_department).collect(),
        top_patients: analytics.top_patients.iter().map(to_grpc_patient).collect(),
        months: analytics.months.iter().map(to_grpc_month).collect(),
    }))
}
