// Descriptive analytics computed once per dataset snapshot.
pub mod breakdown;
pub mod stats;
pub mod summary;

use serde::Serialize;
use shared::models::{CleanedTransaction, DatasetSummary, DepartmentStats, MonthlyStats, PatientTotal};

pub use breakdown::{department_breakdown, monthly_breakdown, top_patients};
pub use summary::summarize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetAnalytics {
    pub summary: DatasetSummary,
    pub departments: Vec<DepartmentStats>,
    pub top_patients: Vec<PatientTotal>,
    pub months: Vec<MonthlyStats>,
}

impl DatasetAnalytics {
    pub fn compute(transactions: &[CleanedTransaction], top_patient_limit: usize, department_limit: usize) -> Self {
        DatasetAnalytics {
            summary: summarize(transactions),
            departments: department_breakdown(transactions, department_limit),
            top_patients: top_patients(transactions, top_patient_limit),
            months: monthly_breakdown(transactions),
        }
    }
}
