// Loading and cleaning of the spend export, and the snapshot built from it.
pub mod cleaner;
pub mod csv_parser;
pub mod currency;
pub mod dataset;
pub mod snapshot_store;

pub use dataset::{DatasetSnapshot, LoadOptions, SourceFingerprint};
pub use snapshot_store::SnapshotStore;
