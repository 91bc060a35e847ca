//! Human-readable byte counts and durations.
//!
//! Unit tables are plain `SizeSystem` values passed to the formatter; there is
//! no global "current" system.

mod duration;
mod size;

pub use duration::{format_duration, format_seconds, Seconds};
pub use size::{
    format_size, unit_for, SizeSystem, Unit, BYTE, GIGABYTE, GIBIBYTE, IEC, IEC_MULTIPLIER,
    JEDEC, JEDEC_GIGABYTE, JEDEC_KILOBYTE, JEDEC_MEGABYTE, KIBIBYTE, KILOBYTE, MEBIBYTE,
    MEGABYTE, METRIC, METRIC_MULTIPLIER, PEBIBYTE, PETABYTE, TEBIBYTE, TERABYTE,
};
