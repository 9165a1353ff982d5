// Turns raw export rows into cleaned transactions.
use chrono::NaiveDate;
use shared::models::{CleanedTransaction, CleaningReport, RawRecord};

use super::currency;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `dd/mm/yyyy` date. The year must be written with four digits.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let year_digits = value.rsplit('/').next()?;
    if year_digits.len() != 4 || !year_digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Keeps the rows whose date and cost both parse; everything else is dropped
/// without a trace except in the counts of the returned report.
///
/// `sample_size` leading cost strings are copied into the report together with
/// their normalized values.
pub fn clean(rows: Vec<RawRecord>, sample_size: usize) -> (Vec<CleanedTransaction>, CleaningReport) {
    let initial_count = rows.len();
    let mut report = CleaningReport {
        initial_count,
        ..CleaningReport::default()
    };

    let mut transactions = Vec::with_capacity(initial_count);
    for (idx, row) in rows.into_iter().enumerate() {
        let cost = currency::normalize(&row.cost);
        if idx < sample_size {
            report.sample_before.push(row.cost.clone());
            report.sample_after.push(cost.as_ref().ok().copied());
        }

        let date = parse_date(&row.date);
        if let (Some(date), Ok(cost)) = (date, cost) {
            transactions.push(CleanedTransaction::new(row, date, cost));
        }
    }

    report.retained_count = transactions.len();
    report.dropped_count = initial_count - report.retained_count;
    tracing::info!(
        initial = report.initial_count,
        retained = report.retained_count,
        dropped = report.dropped_count,
        "Cleaned spend records"
    );
    (transactions, report)
}
