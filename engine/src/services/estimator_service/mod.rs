// ShoppingEstimator service: one handler module per RPC, all sharing the snapshot store.
use super::{
    EstimateRequest, EstimateResponse, LoadDatasetRequest, LoadDatasetResponse, ShoppingEstimator, SummaryRequest,
    SummaryResponse,
};
use crate::config::settings::EngineSettings;
use crate::data::snapshot_store::{self, SnapshotStore};
use crate::data::{DatasetSnapshot, LoadOptions};
use crate::error::EngineError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Request, Response, Status};

pub mod estimate_cost;
pub mod get_dataset_summary;
pub mod helpers;
pub mod load_dataset;

pub struct EstimatorEngine {
    store: Arc<RwLock<SnapshotStore>>,
    settings: Arc<EngineSettings>,
}

impl EstimatorEngine {
    pub fn new(store: Arc<RwLock<SnapshotStore>>, settings: Arc<EngineSettings>) -> Self {
        EstimatorEngine { store, settings }
    }
}

/// Snapshot to answer a read request with, refreshed first if its source file changed.
///
/// If the refresh fails while an older snapshot is published, the older one is served.
pub(crate) async fn active_snapshot(
    store: &RwLock<SnapshotStore>,
    settings: &EngineSettings,
) -> Result<Arc<DatasetSnapshot>, EngineError> {
    let (source, current) = {
        let guard = store.read().await;
        (guard.fingerprint().map(|f| f.path.clone()), guard.current())
    };

    let Some(path) = source.or_else(|| settings.data_path.clone()) else {
        return current.ok_or(EngineError::DatasetNotLoaded);
    };

    match snapshot_store::refresh(store, &path, &LoadOptions::from(settings), false).await {
        Ok(refreshed) => Ok(refreshed.snapshot),
        Err(e) => match current {
            Some(snapshot) => {
                tracing::warn!(source = %path.display(), error = %e, "Refresh failed; serving previous snapshot");
                Ok(snapshot)
            }
            None => Err(e),
        },
    }
}

#[tonic::async_trait]
impl ShoppingEstimator for EstimatorEngine {
    async fn load_dataset(&self, request: Request<LoadDatasetRequest>) -> Result<Response<LoadDatasetResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            path = %req_payload.file_path,
            force = req_payload.force,
            "Received LoadDatasetRequest, dispatching to handler."
        );
        load_dataset::handle_load_dataset(req_payload, self.store.clone(), self.settings.clone()).await
    }

    async fn estimate_cost(&self, request: Request<EstimateRequest>) -> Result<Response<EstimateResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            month = req_payload.month,
            day = req_payload.day,
            "Received EstimateRequest, dispatching to handler."
        );
        estimate_cost::handle_estimate_cost(req_payload, self.store.clone(), self.settings.clone()).await
    }

    async fn get_dataset_summary(&self, _request: Request<SummaryRequest>) -> Result<Response<SummaryResponse>, Status> {
        tracing::info!("Received SummaryRequest, dispatching to handler.");
        get_dataset_summary::handle_get_dataset_summary(self.store.clone(), self.settings.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
TRX01;P01;1;ANI;10/03/2025;dr. Sari;FARMASI;POLI ANAK;BPJS;90.000;0;N
TRX02;P02;2;BUDI;10/03/2025;dr. Sari;FARMASI;POLI ANAK;BPJS;90,000.00;0;N
TRX03;P03;3;CITRA;20/03/2025;dr. Andi;LAB;POLI DALAM;UMUM;150.000,00;0;N
TRX04;P04;4;DEDI;31/04/2025;dr. Andi;LAB;POLI DALAM;UMUM;5000;0;N
TRX05;P05;5;EKO;21/03/2025;dr. Andi;LAB;POLI GIGI;UMUM;abc;0;N";

    fn create_test_engine(data_path: Option<PathBuf>) -> EstimatorEngine {
        let settings = EngineSettings {
            data_path,
            ..EngineSettings::default()
        };
        EstimatorEngine::new(Arc::new(RwLock::new(SnapshotStore::new())), Arc::new(settings))
    }

    fn create_dummy_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    fn load_request(file: &NamedTempFile) -> Request<LoadDatasetRequest> {
        Request::new(LoadDatasetRequest {
            file_path: file.path().to_str().unwrap().to_string(),
            force: false,
        })
    }

    #[tokio::test]
    async fn test_load_dataset_success() {
        let engine = create_test_engine(None);
        let file = create_dummy_csv(SAMPLE);

        let response = engine.load_dataset(load_request(&file)).await.unwrap().into_inner();
        assert!(response.success);
        assert!(response.rebuilt);
        assert_eq!(response.lookup_entries, 2);
        assert_eq!(response.global_mean, 110000.0);
        let report = response.report.unwrap();
        assert_eq!(report.initial_count, 5);
        assert_eq!(report.retained_count, 3);
        assert_eq!(report.dropped_count, 2);
        assert_eq!(report.sample_before.len(), 5);
        assert!(response.message.contains("Loaded 3 of 5 transactions"));

        let again = engine.load_dataset(load_request(&file)).await.unwrap().into_inner();
        assert!(!again.rebuilt);
        assert!(again.message.contains("unchanged"));
    }

    #[tokio::test]
    async fn test_load_dataset_file_not_found() {
        let engine = create_test_engine(None);
        let request = Request::new(LoadDatasetRequest {
            file_path: "non_existent_file.csv".to_string(),
            force: false,
        });
        let status = engine.load_dataset(request).await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert!(status.message().contains("I/O error"));
    }

    #[tokio::test]
    async fn test_load_dataset_wrong_column_count() {
        let engine = create_test_engine(None);
        let file = create_dummy_csv("TRX01;P01;1;ANI;10/03/2025;dr. Sari;FARMASI;POLI ANAK;BPJS;90.000");
        let status = engine.load_dataset(load_request(&file)).await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().contains("expected 12 columns, found 10"));
    }

    #[tokio::test]
    async fn test_load_dataset_without_path_or_config() {
        let engine = create_test_engine(None);
        let request = Request::new(LoadDatasetRequest { file_path: String::new(), force: false });
        let status = engine.load_dataset(request).await.unwrap_err();
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);
    }

    #[tokio::test]
    async fn test_load_dataset_uses_configured_path() {
        let file = create_dummy_csv(SAMPLE);
        let engine = create_test_engine(Some(file.path().to_path_buf()));
        let request = Request::new(LoadDatasetRequest { file_path: String::new(), force: false });
        let response = engine.load_dataset(request).await.unwrap().into_inner();
        assert!(response.success);
        assert_eq!(response.lookup_entries, 2);
    }

    #[tokio::test]
    async fn test_estimate_cost_before_any_load() {
        let engine = create_test_engine(None);
        let status = engine
            .estimate_cost(Request::new(EstimateRequest { month: 3, day: 10 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);
    }

    #[tokio::test]
    async fn test_estimate_cost_exact() {
        let engine = create_test_engine(None);
        let file = create_dummy_csv(SAMPLE);
        engine.load_dataset(load_request(&file)).await.unwrap();

        let response = engine
            .estimate_cost(Request::new(EstimateRequest { month: 3, day: 10 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.basis, "exact");
        assert_eq!(response.value, 90000.0);
        assert_eq!(response.sample_count, 2);
        assert!(response.nearest.is_none());
    }

    #[tokio::test]
    async fn test_estimate_cost_fallback_with_nearest() {
        let engine = create_test_engine(None);
        let file = create_dummy_csv(SAMPLE);
        engine.load_dataset(load_request(&file)).await.unwrap();

        let response = engine
            .estimate_cost(Request::new(EstimateRequest { month: 3, day: 15 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.basis, "fallback");
        assert_eq!(response.value, 110000.0);
        assert_eq!(response.sample_count, 3);
        let nearest = response.nearest.unwrap();
        assert_eq!(nearest.day, 10);
        assert_eq!(nearest.mean_cost, 90000.0);
    }

    #[tokio::test]
    async fn test_estimate_cost_fallback_without_month_data() {
        let engine = create_test_engine(None);
        let file = create_dummy_csv(SAMPLE);
        engine.load_dataset(load_request(&file)).await.unwrap();

        let response = engine
            .estimate_cost(Request::new(EstimateRequest { month: 5, day: 1 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.basis, "fallback");
        assert!(response.nearest.is_none());
    }

    #[tokio::test]
    async fn test_estimate_cost_invalid_date() {
        let engine = create_test_engine(None);
        let file = create_dummy_csv(SAMPLE);
        engine.load_dataset(load_request(&file)).await.unwrap();

        let status = engine
            .estimate_cost(Request::new(EstimateRequest { month: 4, day: 31 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert!(status.message().contains("Invalid calendar date"));
    }

    #[tokio::test]
    async fn test_estimate_cost_picks_up_source_changes() {
        let engine = create_test_engine(None);
        let mut file = create_dummy_csv(SAMPLE);
        engine.load_dataset(load_request(&file)).await.unwrap();

        writeln!(file, "TRX06;P06;6;FANI;15/03/2025;dr. Sari;FARMASI;POLI ANAK;BPJS;200.000;0;N").unwrap();
        file.flush().unwrap();

        let response = engine
            .estimate_cost(Request::new(EstimateRequest { month: 3, day: 15 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.basis, "exact");
        assert_eq!(response.value, 200000.0);
    }

    #[tokio::test]
    async fn test_estimate_cost_serves_previous_snapshot_when_source_breaks() {
        let engine = create_test_engine(None);
        let mut file = create_dummy_csv(SAMPLE);
        engine.load_dataset(load_request(&file)).await.unwrap();

        writeln!(file, "only;three;columns").unwrap();
        file.flush().unwrap();

        let response = engine
            .estimate_cost(Request::new(EstimateRequest { month: 3, day: 10 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(response.basis, "exact");
        assert_eq!(response.value, 90000.0);
    }

    #[tokio::test]
    async fn test_get_dataset_summary() {
        let engine = create_test_engine(None);
        let file = create_dummy_csv(SAMPLE);
        engine.load_dataset(load_request(&file)).await.unwrap();

        let response = engine
            .get_dataset_summary(Request::new(SummaryRequest {}))
            .await
            .unwrap()
            .into_inner();
        let summary = response.summary.unwrap();
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.total_cost, 330000.0);
        assert_eq!(summary.min_cost, Some(90000.0));
        assert_eq!(summary.max_cost, Some(150000.0));
        assert_eq!(response.departments[0].department, "POLI ANAK");
        assert_eq!(response.departments[0].transaction_count, 2);
        assert_eq!(response.top_patients[0].patient_name, "CITRA");
        assert_eq!(response.months.len(), 1);
        assert_eq!(response.months[0].month, 3);
    }
}
