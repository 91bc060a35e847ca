//! `pio size` and `pio duration` – print formatter output.

use progressio_core::config::UnitSystem;
use progressio_core::format::{format_seconds, format_size};

pub fn run_size(bytes: i64, units: UnitSystem, long: bool) {
    println!("{}", format_size(units.size_system(), bytes, !long));
}

pub fn run_duration(seconds: i64) {
    println!("{}", format_seconds(seconds));
}
