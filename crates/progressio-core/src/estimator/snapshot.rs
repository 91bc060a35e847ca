//! One progress report and its display form.

use std::fmt;
use std::time::{Duration, Instant};

use crate::format::{format_duration, format_size, SizeSystem, IEC};

/// Immutable progress report sent to the observer.
///
/// `None` means "not computable yet": the speed window has not filled, no time
/// has elapsed, or the size is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Bytes moved so far.
    pub transferred: u64,
    /// Declared size, `None` when unknown.
    pub total_size: Option<u64>,
    /// Percent complete, truncated to two decimals. Only with a known size.
    pub percent: Option<f64>,
    /// Bytes/sec over the last few emissions.
    pub speed: Option<u64>,
    /// Bytes/sec since the transfer started.
    pub speed_avg: Option<u64>,
    /// Estimated time left. Only with a known size and a positive average.
    pub remaining: Option<Duration>,
    pub start_time: Instant,
    /// Set only on the terminal snapshot.
    pub stop_time: Option<Instant>,
}

impl Snapshot {
    /// True for the last snapshot of a transfer.
    pub fn is_final(&self) -> bool {
        self.stop_time.is_some()
    }

    /// Time from start to stop, or to now while the transfer is running.
    pub fn elapsed(&self) -> Duration {
        self.stop_time
            .unwrap_or_else(Instant::now)
            .saturating_duration_since(self.start_time)
    }

    /// Render with the units of `system`. `Display` uses IEC.
    pub fn render(&self, system: &SizeSystem) -> String {
        let time = format!(" (Time: {}", format_duration(self.elapsed()));
        let speed = self.speed_clause(system);

        let total = match self.total_size {
            Some(total) => total,
            None => {
                return format!(
                    "{}{}{})",
                    format_size(system, signed(self.transferred), true),
                    speed,
                    time
                );
            }
        };

        let remaining = self
            .remaining
            .map(|r| format!(" / Remaining: {}", format_duration(r)))
            .unwrap_or_default();

        format!(
            "[{:.2}%] ({}/{}){}{}{})",
            self.percent.unwrap_or(0.0),
            format_size(system, signed(self.transferred), true),
            format_size(system, signed(total), true),
            speed,
            time,
            remaining
        )
    }

    fn speed_clause(&self, system: &SizeSystem) -> String {
        let mut clause = String::new();
        if let Some(speed) = self.speed.filter(|s| *s > 0) {
            clause.push_str(" (Speed: ");
            clause.push_str(&format_size(system, signed(speed), true));
            clause.push_str("/s");
        }
        if let Some(avg) = self.speed_avg.filter(|s| *s > 0) {
            if clause.is_empty() {
                clause.push_str(" (Speed AVG: ");
            } else {
                clause.push_str(" / AVG: ");
            }
            clause.push_str(&format_size(system, signed(avg), true));
            clause.push_str("/s");
        }
        if !clause.is_empty() {
            clause.push(')');
        }
        clause
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&IEC))
    }
}

fn signed(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}
