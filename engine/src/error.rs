use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Wrong column count at line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Source table is empty")]
    EmptySource,

    #[error("No usable transactions: all {initial_count} records failed date or cost parsing")]
    NoUsableRecords { initial_count: usize },

    #[error("Invalid calendar date: day {day} of month {month}")]
    InvalidDate { month: u32, day: u32 },

    #[error("No dataset loaded")]
    DatasetNotLoaded,

    #[error("Internal processing error: {0}")]
    ProcessingError(String),
}

impl EngineError {
    /// True for the failures that abort a dataset load.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            EngineError::CsvSystemError { .. }
                | EngineError::IoError { .. }
                | EngineError::ColumnCount { .. }
                | EngineError::EmptySource
                | EngineError::NoUsableRecords { .. }
        )
    }
}

impl From<EngineError> for tonic::Status {
    fn from(err: EngineError) -> Self {
        tracing::error!("Mapping EngineError to tonic::Status: {:?}", err);
        match err {
            EngineError::ConfigError(msg) => tonic::Status::failed_precondition(format!("Configuration error: {}", msg)),
            EngineError::CsvSystemError { source } => tonic::Status::invalid_argument(format!("CSV parsing system error: {}", source)),
            EngineError::IoError { source } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    tonic::Status::not_found(format!("I/O error: {}", source))
                } else {
                    tonic::Status::internal(format!("I/O error: {}", source))
                }
            }
            e @ EngineError::ColumnCount { .. } => tonic::Status::invalid_argument(e.to_string()),
            e @ EngineError::EmptySource => tonic::Status::invalid_argument(e.to_string()),
            e @ EngineError::NoUsableRecords { .. } => tonic::Status::invalid_argument(e.to_string()),
            e @ EngineError::InvalidDate { .. } => tonic::Status::invalid_argument(e.to_string()),
            e @ EngineError::DatasetNotLoaded => tonic::Status::failed_precondition(e.to_string()),
            EngineError::ProcessingError(msg) => tonic::Status::internal(format!("Processing error: {}", msg)),
        }
    }
}
