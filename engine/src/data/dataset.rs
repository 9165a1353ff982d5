// One fully built, immutable view of the spend export.
use chrono::Datelike;
use shared::models::{CleanedTransaction, CleaningReport, EstimateResult, RawRecord};
use shared::utils::calendar;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::cleaner;
use super::csv_parser::SpendCsvParser;
use crate::analytics::DatasetAnalytics;
use crate::config::settings::EngineSettings;
use crate::error::EngineError;
use crate::estimator::{self, LookupTable};

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Leading raw cost values echoed in the cleaning report.
    pub sample_size: usize,
    pub top_patients: usize,
    pub top_departments: usize,
    /// Year used to validate query dates. `None` uses the year of the earliest transaction.
    pub reference_year: Option<i32>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            sample_size: 10,
            top_patients: 20,
            top_departments: 10,
            reference_year: None,
        }
    }
}

impl From<&EngineSettings> for LoadOptions {
    fn from(settings: &EngineSettings) -> Self {
        LoadOptions {
            sample_size: settings.diagnostic_sample_size,
            top_patients: settings.top_patients,
            top_departments: settings.top_departments,
            reference_year: settings.reference_year,
        }
    }
}

/// Identifies the state of a source file; a snapshot is rebuilt only when this changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceFingerprint {
    pub fn of<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let metadata = std::fs::metadata(path.as_ref())?;
        Ok(SourceFingerprint {
            path: path.as_ref().to_path_buf(),
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    source: PathBuf,
    transactions: Vec<CleanedTransaction>,
    lookup: LookupTable,
    report: CleaningReport,
    analytics: DatasetAnalytics,
    reference_year: i32,
}

impl DatasetSnapshot {
    /// Reads, cleans and aggregates the export at `path`.
    ///
    /// Any I/O, CSV or column-count problem aborts the load; so does a file in
    /// which no record survives cleaning.
    pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self, EngineError> {
        let records = SpendCsvParser::load_records_from_csv(path.as_ref())?;
        Self::from_records(path.as_ref(), records, options)
    }

    pub fn from_records<P: AsRef<Path>>(
        source: P,
        records: Vec<RawRecord>,
        options: &LoadOptions,
    ) -> Result<Self, EngineError> {
        let (transactions, report) = cleaner::clean(records, options.sample_size);
        let earliest = transactions
            .iter()
            .map(|tx| tx.date)
            .min()
            .ok_or(EngineError::NoUsableRecords {
                initial_count: report.initial_count,
            })?;

        let lookup = LookupTable::build(&transactions);
        let analytics = DatasetAnalytics::compute(&transactions, options.top_patients, options.top_departments);
        let reference_year = options.reference_year.unwrap_or_else(|| earliest.year());

        tracing::info!(
            source = %source.as_ref().display(),
            transactions = transactions.len(),
            lookup_entries = lookup.len(),
            global_mean = lookup.global_mean(),
            reference_year,
            "Built dataset snapshot"
        );

        Ok(DatasetSnapshot {
            source: source.as_ref().to_path_buf(),
            transactions,
            lookup,
            report,
            analytics,
            reference_year,
        })
    }

    /// Estimates the spend for (month, day) after checking the date exists in
    /// the snapshot's reference year.
    pub fn query(&self, month: u32, day: u32) -> Result<EstimateResult, EngineError> {
        calendar::query_date(self.reference_year, month, day).ok_or(EngineError::InvalidDate { month, day })?;
        Ok(estimator::estimate(month, day, &self.lookup))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn transactions(&self) -> &[CleanedTransaction] {
        &self.transactions
    }

    pub fn lookup(&self) -> &LookupTable {
        &self.lookup
    }

    pub fn report(&self) -> &CleaningReport {
        &self.report
    }

    pub fn analytics(&self) -> &DatasetAnalytics {
        &self.analytics
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }
}
