// Descriptive statistics over the cleaned cost column.
use shared::models::{CleanedTransaction, DatasetSummary};

use super::stats;

pub fn summarize(transactions: &[CleanedTransaction]) -> DatasetSummary {
    let costs: Vec<f64> = transactions.iter().map(|tx| tx.cost).collect();
    let costs = stats::sorted(&costs);

    let q1 = stats::quantile_sorted(&costs, 0.25);
    let q3 = stats::quantile_sorted(&costs, 0.75);
    let min_cost = costs.first().copied();
    let max_cost = costs.last().copied();

    DatasetSummary {
        transaction_count: costs.len(),
        total_cost: stats::sum_sorted(&costs),
        mean_cost: stats::mean_sorted(&costs),
        median_cost: stats::quantile_sorted(&costs, 0.5),
        min_cost,
        max_cost,
        std_dev: stats::std_dev_sorted(&costs),
        q1,
        q3,
        iqr: q1.zip(q3).map(|(q1, q3)| q3 - q1),
        range: min_cost.zip(max_cost).map(|(min, max)| max - min),
        positive_count: costs.iter().filter(|c| **c > 0.0).count(),
        zero_count: costs.iter().filter(|c| **c == 0.0).count(),
        negative_count: costs.iter().filter(|c| **c < 0.0).count(),
    }
}
