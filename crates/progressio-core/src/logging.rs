//! `tracing` setup for the `pio` binary.
//!
//! Events go to `$XDG_STATE_HOME/progressio/progressio.log`. The CLI keeps
//! the terminal for the progress line, so stderr is only used when the log
//! file cannot be opened.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,progressio=debug";
const LOG_FILE: &str = "progressio.log";

/// Per-event handle on the log file. Falls back to stderr for the event when
/// the descriptor cannot be duplicated.
enum LogHandle {
    Appending(File),
    Terminal,
}

impl Write for LogHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogHandle::Appending(file) => file.write(buf),
            LogHandle::Terminal => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogHandle::Appending(file) => file.flush(),
            LogHandle::Terminal => io::stderr().lock().flush(),
        }
    }
}

/// Shared append-mode log file handed to the fmt layer.
struct LogFile {
    file: File,
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogHandle;

    fn make_writer(&'a self) -> LogHandle {
        match self.file.try_clone() {
            Ok(file) => LogHandle::Appending(file),
            Err(_) => LogHandle::Terminal,
        }
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("progressio")?;
    dirs.place_state_file(LOG_FILE)
        .context("cannot create progressio state directory")
}

fn open_log(path: &Path) -> Result<LogFile> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    Ok(LogFile { file })
}

/// Send `tracing` events to the progressio log file.
///
/// Errors when the state directory or file is unusable, or when a global
/// subscriber is already set. The CLI then calls [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let log = open_log(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(BoxMakeWriter::new(log))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("tracing subscriber already set: {}", e))?;

    tracing::info!(path = %path.display(), "logging to file");
    Ok(())
}

/// Send `tracing` events to stderr. A no-op if a subscriber is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_log_creates_parent_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join(LOG_FILE);

        let log = open_log(&path).unwrap();
        log.make_writer().write_all(b"first\n").unwrap();
        drop(log);

        let log = open_log(&path).unwrap();
        let mut handle = log.make_writer();
        assert!(matches!(handle, LogHandle::Appending(_)));
        handle.write_all(b"second\n").unwrap();
        handle.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn open_log_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_log(dir.path()).is_err());
    }
}
