//! Durations as "1 week, 2 days, 3 hours" strings.

use std::fmt;
use std::time::Duration;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// A signed count of seconds. Negative values describe time in the past.
///
/// Each component is the non-negative remainder of the next coarser unit, so
/// `Seconds(90_000)` is 1 day and 1 hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Seconds(pub i64);

impl Seconds {
    fn magnitude(self) -> u64 {
        self.0.unsigned_abs()
    }

    pub fn weeks(self) -> u64 {
        self.magnitude() / WEEK
    }

    /// 0..=6
    pub fn days(self) -> u64 {
        (self.magnitude() / DAY) % 7
    }

    /// 0..=23
    pub fn hours(self) -> u64 {
        (self.magnitude() / HOUR) % 24
    }

    /// 0..=59
    pub fn minutes(self) -> u64 {
        (self.magnitude() / MINUTE) % 60
    }

    /// 0..=59
    pub fn seconds(self) -> u64 {
        self.magnitude() % 60
    }
}

impl From<Duration> for Seconds {
    fn from(d: Duration) -> Self {
        Seconds(i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components = [
            (self.weeks(), "week"),
            (self.days(), "day"),
            (self.hours(), "hour"),
            (self.minutes(), "minute"),
            (self.seconds(), "second"),
        ];

        let mut first = true;
        for (count, unit) in components {
            if count == 0 {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            if count == 1 {
                write!(f, "1 {}", unit)?;
            } else {
                write!(f, "{} {}s", count, unit)?;
            }
        }

        if first {
            write!(f, "0 seconds")
        } else if self.0 < 0 {
            write!(f, " ago")
        } else {
            Ok(())
        }
    }
}

/// Whole seconds of `d`, truncated.
pub fn format_duration(d: Duration) -> String {
    Seconds::from(d).to_string()
}

pub fn format_seconds(seconds: i64) -> String {
    Seconds(seconds).to_string()
}
