use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::calendar;

/// One row of the semicolon-delimited spend export, exactly as read.
///
/// Column order in the source file:
/// `id_transaksi;id_pasien;no_urut;nama_pasien;waktu;dokter;jenis_layanan;poli;sumber_pembayaran;biaya;diskon;flag`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub transaction_id: String,
    pub patient_id: String,
    pub sequence_no: String,
    pub patient_name: String,
    pub date: String,
    pub provider: String,
    pub service_type: String,
    pub department: String,
    pub payment_source: String,
    pub cost: String,
    pub discount: String,
    pub flag: String,
}

impl RawRecord {
    /// Number of columns every source row must carry.
    pub const COLUMN_COUNT: usize = 12;
}

/// A record whose date parsed and whose cost resolved to a finite number.
///
/// Calendar features are derived once in [`CleanedTransaction::new`] and never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedTransaction {
    pub transaction_id: String,
    pub patient_id: String,
    pub sequence_no: String,
    pub patient_name: String,
    pub date: NaiveDate,
    pub provider: String,
    pub service_type: String,
    pub department: String,
    pub payment_source: String,
    pub cost: f64,
    pub discount: String,
    pub flag: String,
    pub month: u32,
    pub day_of_month: u32,
    /// Monday = 0 ... Sunday = 6
    pub day_of_week: u32,
    pub week_of_month: u32,
}

impl CleanedTransaction {
    pub fn new(raw: RawRecord, date: NaiveDate, cost: f64) -> Self {
        CleanedTransaction {
            transaction_id: raw.transaction_id,
            patient_id: raw.patient_id,
            sequence_no: raw.sequence_no,
            patient_name: raw.patient_name,
            date,
            provider: raw.provider,
            service_type: raw.service_type,
            department: raw.department,
            payment_source: raw.payment_source,
            cost,
            discount: raw.discount,
            flag: raw.flag,
            month: date.month(),
            day_of_month: date.day(),
            day_of_week: date.weekday().num_days_from_monday(),
            week_of_month: calendar::week_of_month(date),
        }
    }
}

/// Mean cost of every transaction that fell on one (month, day) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub month: u32,
    pub day_of_month: u32,
    pub mean_cost: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimateBasis {
    /// Historical data exists for the queried day.
    Exact,
    /// No data for the queried day; the value is the global mean.
    Fallback,
}

impl EstimateBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateBasis::Exact => "exact",
            EstimateBasis::Fallback => "fallback",
        }
    }
}

/// The same-month aggregate closest to a day that had no data of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestDay {
    pub month: u32,
    pub day_of_month: u32,
    pub mean_cost: f64,
    pub count: usize,
}

impl From<&DailyAggregate> for NearestDay {
    fn from(aggregate: &DailyAggregate) -> Self {
        NearestDay {
            month: aggregate.month,
            day_of_month: aggregate.day_of_month,
            mean_cost: aggregate.mean_cost,
            count: aggregate.count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub value: f64,
    pub basis: EstimateBasis,
    pub sample_count: usize,
    /// Only ever set for [`EstimateBasis::Fallback`] results.
    pub nearest: Option<NearestDay>,
}

/// Outcome of one cleaning pass, returned alongside the dataset so a
/// front-end can show what happened to the raw cost column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub initial_count: usize,
    pub retained_count: usize,
    pub dropped_count: usize,
    /// Leading raw cost strings, in file order.
    pub sample_before: Vec<String>,
    /// Normalized value for each entry of `sample_before`; `None` where parsing failed.
    pub sample_after: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub transaction_count: usize,
    pub total_cost: f64,
    pub mean_cost: Option<f64>,
    pub median_cost: Option<f64>,
    pub min_cost: Option<f64>,
    pub max_cost: Option<f64>,
    pub std_dev: Option<f64>,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub iqr: Option<f64>,
    pub range: Option<f64>,
    pub positive_count: usize,
    pub zero_count: usize,
    pub negative_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStats {
    pub department: String,
    pub transaction_count: usize,
    pub mean_cost: f64,
    pub total_cost: f64,
    pub distinct_transactions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientTotal {
    pub patient_name: String,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub month: u32,
    pub transaction_count: usize,
    pub mean_cost: f64,
}
