//! Open a file and wrap it with its size already declared.

use std::fs::File;
use std::io::{self, Seek, SeekFrom};
use std::path::Path;

use super::{NopClose, ProgressReader};
use crate::error::ProgressError;
use crate::estimator::{EstimatorSettings, SnapshotSource};

/// Size of a seekable stream, found by seeking to the end and back to the start.
pub fn measure<S: Seek>(stream: &mut S) -> io::Result<u64> {
    let size = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(0))?;
    Ok(size)
}

/// Open `path` for reading with progress; the declared size is the file size.
pub fn open_file_reader(
    path: impl AsRef<Path>,
) -> Result<(ProgressReader<NopClose<File>>, SnapshotSource), ProgressError> {
    open_file_reader_with_settings(path, EstimatorSettings::default())
}

pub fn open_file_reader_with_settings(
    path: impl AsRef<Path>,
    settings: EstimatorSettings,
) -> Result<(ProgressReader<NopClose<File>>, SnapshotSource), ProgressError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| ProgressError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let size = measure(&mut file).map_err(|source| ProgressError::Size {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), size, "opened file for progress reading");

    let declared = i64::try_from(size).unwrap_or(i64::MAX);
    Ok(ProgressReader::with_settings(
        NopClose::new(file),
        declared,
        settings,
    ))
}
