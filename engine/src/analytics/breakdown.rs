// Grouped views of the cleaned dataset: per department, per patient, per month.
use shared::models::{CleanedTransaction, DepartmentStats, MonthlyStats, PatientTotal};
use std::collections::{BTreeMap, BTreeSet};

use super::stats;

/// Departments ordered by transaction count (highest first), then by name.
pub fn department_breakdown(transactions: &[CleanedTransaction], limit: usize) -> Vec<DepartmentStats> {
    let mut groups: BTreeMap<&str, (Vec<f64>, BTreeSet<&str>)> = BTreeMap::new();
    for tx in transactions {
        let (costs, ids) = groups.entry(tx.department.as_str()).or_default();
        costs.push(tx.cost);
        ids.insert(tx.transaction_id.as_str());
    }

    let mut departments: Vec<DepartmentStats> = groups
        .into_iter()
        .map(|(department, (costs, ids))| {
            let costs = stats::sorted(&costs);
            DepartmentStats {
                department: department.to_string(),
                transaction_count: costs.len(),
                mean_cost: stats::mean_sorted(&costs).unwrap_or(0.0),
                total_cost: stats::sum_sorted(&costs),
                distinct_transactions: ids.len(),
            }
        })
        .collect();

    // Stable sort keeps the BTreeMap's name order among equal counts.
    departments.sort_by(|a, b| b.transaction_count.cmp(&a.transaction_count));
    departments.truncate(limit);
    departments
}

/// Patients with the highest total spend, highest first; ties ordered by name.
pub fn top_patients(transactions: &[CleanedTransaction], limit: usize) -> Vec<PatientTotal> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for tx in transactions {
        groups.entry(tx.patient_name.as_str()).or_default().push(tx.cost);
    }

    let mut totals: Vec<PatientTotal> = groups
        .into_iter()
        .map(|(patient_name, costs)| PatientTotal {
            patient_name: patient_name.to_string(),
            total_cost: stats::sum_sorted(&stats::sorted(&costs)),
        })
        .collect();

    totals.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
    totals.truncate(limit);
    totals
}

pub fn monthly_breakdown(transactions: &[CleanedTransaction]) -> Vec<MonthlyStats> {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for tx in transactions {
        groups.entry(tx.month).or_default().push(tx.cost);
    }

    groups
        .into_iter()
        .map(|(month, costs)| {
            let costs = stats::sorted(&costs);
            MonthlyStats {
                month,
                transaction_count: costs.len(),
                mean_cost: stats::mean_sorted(&costs).unwrap_or(0.0),
            }
        })
        .collect()
}
