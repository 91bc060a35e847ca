//! CLI for the progressio copy tool.

mod commands;
mod observer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use progressio_core::config::{self, UnitSystem};

use commands::{run_checksum, run_copy, run_duration, run_size, CopyArgs};

/// Top-level CLI for `pio`.
#[derive(Debug, Parser)]
#[command(name = "pio")]
#[command(about = "pio: copy and hash streams with live progress", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Copy SRC to DST (default stdout), showing progress on stderr.
    Copy {
        /// Source file, or `-` for stdin.
        src: String,

        /// Destination file, or `-` for stdout.
        dst: Option<String>,

        /// Expected size in bytes (defaults to the source file size; unknown for stdin).
        /// Zero or negative means unknown.
        #[arg(long, value_name = "BYTES", allow_negative_numbers = true)]
        size: Option<i64>,

        /// Measure progress on the destination instead of the source.
        #[arg(long)]
        track_writer: bool,

        /// Unit system for sizes and speeds (iec, metric, jedec).
        #[arg(long)]
        units: Option<UnitSystem>,

        /// Print the SHA-256 of the copied bytes.
        #[arg(long)]
        sha256: bool,
    },

    /// Compute SHA-256 of a file, showing read progress.
    Checksum {
        /// Path to the file.
        path: String,

        /// Unit system for sizes and speeds (iec, metric, jedec).
        #[arg(long)]
        units: Option<UnitSystem>,
    },

    /// Print a byte count in human-readable form.
    Size {
        #[arg(allow_negative_numbers = true)]
        bytes: i64,

        /// Unit system (iec, metric, jedec).
        #[arg(long)]
        units: Option<UnitSystem>,

        /// Use long unit names ("kibibyte" instead of "KiB").
        #[arg(long)]
        long: bool,
    },

    /// Print a number of seconds as weeks/days/hours/minutes/seconds.
    Duration {
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Copy {
                src,
                dst,
                size,
                track_writer,
                units,
                sha256,
            } => {
                let args = CopyArgs {
                    src,
                    dst,
                    size,
                    track_writer,
                    units: units.unwrap_or(cfg.units),
                    sha256,
                };
                run_copy(&args, &cfg)?;
            }
            CliCommand::Checksum { path, units } => {
                run_checksum(&path, units.unwrap_or(cfg.units), &cfg)?;
            }
            CliCommand::Size { bytes, units, long } => {
                run_size(bytes, units.unwrap_or(cfg.units), long);
            }
            CliCommand::Duration { seconds } => run_duration(seconds),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
