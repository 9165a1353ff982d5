// (month, day) -> mean cost lookup built from one cleaned dataset.
use shared::models::{CleanedTransaction, DailyAggregate};
use std::collections::BTreeMap;

use crate::analytics::stats;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    entries: BTreeMap<(u32, u32), DailyAggregate>,
    global_mean: f64,
    transaction_count: usize,
}

impl LookupTable {
    /// Groups transactions by (month, day of month).
    ///
    /// The result is identical for any permutation of `transactions`. An empty
    /// input gives an empty table with a global mean of 0.
    pub fn build(transactions: &[CleanedTransaction]) -> Self {
        let mut groups: BTreeMap<(u32, u32), Vec<f64>> = BTreeMap::new();
        for tx in transactions {
            groups.entry((tx.month, tx.day_of_month)).or_default().push(tx.cost);
        }

        let aggregates = groups.into_iter().filter_map(|((month, day_of_month), costs)| {
            let costs = stats::sorted(&costs);
            stats::mean_sorted(&costs).map(|mean_cost| DailyAggregate {
                month,
                day_of_month,
                mean_cost,
                count: costs.len(),
            })
        });

        let all_costs: Vec<f64> = transactions.iter().map(|tx| tx.cost).collect();
        let global_mean = stats::mean_sorted(&stats::sorted(&all_costs)).unwrap_or(0.0);

        let table = Self::from_aggregates(aggregates, global_mean, transactions.len());
        tracing::debug!(
            entries = table.len(),
            global_mean = table.global_mean,
            transactions = table.transaction_count,
            "Built daily lookup table"
        );
        table
    }

    /// Assembles a table from precomputed aggregates. Zero-count entries are
    /// discarded; a later duplicate key replaces an earlier one.
    pub fn from_aggregates<I>(aggregates: I, global_mean: f64, transaction_count: usize) -> Self
    where
        I: IntoIterator<Item = DailyAggregate>,
    {
        let entries = aggregates
            .into_iter()
            .filter(|a| a.count > 0)
            .map(|a| ((a.month, a.day_of_month), a))
            .collect();
        LookupTable {
            entries,
            global_mean,
            transaction_count,
        }
    }

    pub fn get(&self, month: u32, day_of_month: u32) -> Option<&DailyAggregate> {
        self.entries.get(&(month, day_of_month))
    }

    /// Aggregates of one month in ascending day order.
    pub fn month_entries(&self, month: u32) -> impl Iterator<Item = &DailyAggregate> {
        self.entries.range((month, 0)..=(month, u32::MAX)).map(|(_, a)| a)
    }

    /// All aggregates ordered by (month, day).
    pub fn entries(&self) -> impl Iterator<Item = &DailyAggregate> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}
