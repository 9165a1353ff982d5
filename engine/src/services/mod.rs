// gRPC surface of the engine. Generated code comes from proto/estimator.proto.
pub mod generated {
    tonic::include_proto!("estimator");
}

pub use generated::shopping_estimator_client::ShoppingEstimatorClient;
pub use generated::shopping_estimator_server::{ShoppingEstimator, ShoppingEstimatorServer};
pub use generated::{
    CleanedSample, CleaningReport as ProtoCleaningReport, DatasetSummary as ProtoDatasetSummary,
    DepartmentStats as ProtoDepartmentStats, EstimateRequest, EstimateResponse, LoadDatasetRequest,
    LoadDatasetResponse, MonthlyStats as ProtoMonthlyStats, NearestDay as ProtoNearestDay,
    PatientTotal as ProtoPatientTotal, SummaryRequest, SummaryResponse,
};

pub mod estimator_service;
