//! `pio checksum` – SHA-256 of a file with read progress.

use anyhow::{anyhow, Context, Result};
use progressio_core::checksum;
use progressio_core::config::{ProgressioConfig, UnitSystem};
use progressio_core::wrap::open_file_reader_with_settings;

use crate::cli::observer;

pub fn run_checksum(path: &str, units: UnitSystem, cfg: &ProgressioConfig) -> Result<()> {
    let (mut reader, source) = open_file_reader_with_settings(path, cfg.estimator_settings())?;
    let progress = observer::spawn(source, units.size_system(), "checksum");

    let digest = checksum::sha256_reader(&mut reader, cfg.buffer_bytes);
    let closed = reader.close();
    progress
        .join()
        .map_err(|_| anyhow!("progress observer panicked"))?;

    let digest = digest.with_context(|| format!("read {}", path))?;
    closed.with_context(|| format!("close {}", path))?;
    println!("{}  {}", digest, path);
    Ok(())
}
