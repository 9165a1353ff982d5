use shared::models::{EstimateBasis, EstimateResult, NearestDay};

use super::lookup::LookupTable;

/// Spend estimate for day `day` of month `month`.
///
/// The caller is responsible for rejecting dates that do not exist on the
/// calendar; this function only looks the pair up.
pub fn estimate(month: u32, day: u32, lookup: &LookupTable) -> EstimateResult {
    if let Some(aggregate) = lookup.get(month, day) {
        return EstimateResult {
            value: aggregate.mean_cost,
            basis: EstimateBasis::Exact,
            sample_count: aggregate.count,
            nearest: None,
        };
    }

    EstimateResult {
        value: lookup.global_mean(),
        basis: EstimateBasis::Fallback,
        sample_count: lookup.transaction_count(),
        nearest: nearest_in_month(month, day, lookup),
    }
}

/// Same-month aggregate with the smallest day distance; the earlier day wins a tie.
pub fn nearest_in_month(month: u32, day: u32, lookup: &LookupTable) -> Option<NearestDay> {
    lookup
        .month_entries(month)
        .min_by_key(|aggregate| aggregate.day_of_month.abs_diff(day))
        .map(NearestDay::from)
}
