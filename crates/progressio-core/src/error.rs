//! Construction-time failures. Stream I/O errors are passed through as
//! `std::io::Error` and never wrapped.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// The source file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Seeking to the end (or back to the start) to measure the size failed.
    #[error("failed to determine size of {}: {source}", path.display())]
    Size {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
