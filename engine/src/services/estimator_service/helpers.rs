// Conversions from domain models to their gRPC counterparts.
use shared::models::{
    CleaningReport, DatasetSummary, DepartmentStats, EstimateResult, MonthlyStats, NearestDay, PatientTotal,
};

use crate::services::{
    CleanedSample, EstimateResponse, ProtoCleaningReport, ProtoDatasetSummary, ProtoDepartmentStats,
    ProtoMonthlyStats, ProtoNearestDay, ProtoPatientTotal,
};

pub fn to_grpc_report(report: &CleaningReport) -> ProtoCleaningReport {
    ProtoCleaningReport {
        initial_count: report.initial_count as u64,
        retained_count: report.retained_count as u64,
        dropped_count: report.dropped_count as u64,
        sample_before: report.sample_before.clone(),
        sample_after: report.sample_after.iter().map(|value| CleanedSample { value: *value }).collect(),
    }
}

pub fn to_grpc_nearest(nearest: &NearestDay) -> ProtoNearestDay {
    ProtoNearestDay {
        month: nearest.month,
        day: nearest.day_of_month,
        mean_cost: nearest.mean_cost,
        count: nearest.count as u64,
    }
}

pub fn to_grpc_estimate(result: &EstimateResult) -> EstimateResponse {
    EstimateResponse {
        value: result.value,
        basis: result.basis.as_str().to_string(),
        sample_count: result.sample_count as u64,
        nearest: result.nearest.as_ref().map(to_grpc_nearest),
    }
}

pub fn to_grpc_summary(summary: &DatasetSummary) -> ProtoDatasetSummary {
    ProtoDatasetSummary {
        transaction_count: summary.transaction_count as u64,
        total_cost: summary.total_cost,
        mean_cost: summary.mean_cost,
        median_cost: summary.median_cost,
        min_cost: summary.min_cost,
        max_cost: summary.max_cost,
        std_dev: summary.std_dev,
        q1: summary.q1,
        q3: summary.q3,
        iqr: summary.iqr,
        range: summary.range,
        positive_count: summary.positive_count as u64,
        zero_count: summary.zero_count as u64,
        negative_count: summary.negative_count as u64,
    }
}

pub fn to_grpc_department(stats: &DepartmentStats) -> ProtoDepartmentStats {
    ProtoDepartmentStats {
        department: stats.department.clone(),
        transaction_count: stats.transaction_count as u64,
        mean_cost: stats.mean_cost,
        total_cost: stats.total_cost,
        distinct_transactions: stats.distinct_transactions as u64,
    }
}

pub fn to_grpc_patient(total: &PatientTotal) -> ProtoPatientTotal {
    ProtoPatientTotal {
        patient_name: total.patient_name.clone(),
        total_cost: total.total_cost,
    }
}

pub fn to_grpc_month(stats: &MonthlyStats) -> ProtoMonthlyStats {
    ProtoMonthlyStats {
        month: stats.month,
        transaction_count: stats.transaction_count as u64,
        mean_cost: stats.mean_cost,
    }
}
