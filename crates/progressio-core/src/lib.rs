pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod estimator;
pub mod format;
pub mod wrap;

pub use error::ProgressError;
pub use estimator::{Estimator, EstimatorSettings, Snapshot, SnapshotSource};
pub use wrap::{open_file_reader, Close, NopClose, ProgressReader, ProgressWriter};
