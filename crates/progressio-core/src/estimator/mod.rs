//! Throughput/ETA estimation and snapshot delivery.
//!
//! The estimator is owned by the thread driving reads or writes; the only
//! thing that crosses to the observer is a `Snapshot` over a zero-capacity
//! channel. Intermediate snapshots are offered with `try_send` and dropped if
//! nobody is waiting. The terminal snapshot is sent blocking, exactly once,
//! after which the channel is closed and every further report is a no-op.

mod snapshot;
mod source;
mod window;


use std::time::{Duration, Instant};

use crossbeam_channel::{Sender, TrySendError};

pub use snapshot::Snapshot;
pub use source::{RecvTimeoutError, SnapshotSource};
use window::SampleWindow;

/// Minimum spacing between delivered intermediate snapshots.
pub const UPDATE_INTERVAL: Duration = Duration::from_millis(100);

/// Number of past emissions the instantaneous speed is measured over.
pub const WINDOW_SLOTS: usize = 5;

/// `report` delta meaning "no new bytes, re-evaluate".
const REEVALUATE: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorSettings {
    pub update_interval: Duration,
    pub window_slots: usize,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            update_interval: UPDATE_INTERVAL,
            window_slots: WINDOW_SLOTS,
        }
    }
}

/// Accumulated transfer state plus the sending half of the snapshot conduit.
#[derive(Debug)]
pub struct Estimator {
    total_size: Option<u64>,
    transferred: u64,
    start_time: Option<Instant>,
    last_emit: Option<Instant>,
    closing: bool,
    window: SampleWindow,
    update_interval: Duration,
    sink: Option<Sender<Snapshot>>,
}

impl Estimator {
    /// A `declared_size` of zero or less means the size is unknown.
    pub fn new(declared_size: i64) -> (Self, SnapshotSource) {
        Self::with_settings(declared_size, EstimatorSettings::default())
    }

    pub fn with_settings(declared_size: i64, settings: EstimatorSettings) -> (Self, SnapshotSource) {
        let (tx, rx) = crossbeam_channel::bounded(0);
        let estimator = Self {
            total_size: u64::try_from(declared_size).ok().filter(|s| *s > 0),
            transferred: 0,
            start_time: None,
            last_emit: None,
            closing: false,
            window: SampleWindow::new(settings.window_slots),
            update_interval: settings.update_interval,
            sink: Some(tx),
        };
        (estimator, SnapshotSource::new(rx))
    }

    pub fn transferred(&self) -> u64 {
        self.transferred
    }

    pub fn total_size(&self) -> Option<u64> {
        self.total_size
    }

    /// True once the conduit is closed (terminal snapshot sent or observer gone).
    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// Account for `delta` bytes and maybe emit a snapshot.
    ///
    /// Non-positive deltas add nothing but still run the emission logic.
    pub fn report(&mut self, delta: i64) {
        self.report_at(delta, Instant::now());
    }

    /// Force the terminal snapshot and close the conduit. Idempotent.
    ///
    /// Blocks until the observer takes the terminal snapshot.
    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    pub(crate) fn stop_at(&mut self, now: Instant) {
        if self.is_closed() {
            return;
        }
        self.closing = true;
        self.report_at(REEVALUATE, now);
    }

    pub(crate) fn report_at(&mut self, delta: i64, now: Instant) {
        if self.is_closed() {
            return;
        }
        if delta > 0 {
            self.transferred = self.transferred.saturating_add(delta.unsigned_abs());
        }

        let completed = self.is_complete();
        if !self.closing && !completed && !self.interval_elapsed(now) {
            return;
        }

        let snapshot = self.sample(now);
        if self.closing || completed {
            self.finish(snapshot, now);
        } else {
            self.offer(snapshot, now);
        }
    }

    fn is_complete(&self) -> bool {
        self.total_size == Some(self.transferred)
    }

    fn interval_elapsed(&self, now: Instant) -> bool {
        match self.last_emit {
            Some(last) => now.saturating_duration_since(last) >= self.update_interval,
            None => true,
        }
    }

    /// Build a snapshot for `now`, recording it in the speed window.
    fn sample(&mut self, now: Instant) -> Snapshot {
        let start = *self.start_time.get_or_insert(now);
        let transferred = self.transferred;

        let mut snapshot = Snapshot {
            transferred,
            total_size: self.total_size,
            percent: None,
            speed: None,
            speed_avg: None,
            remaining: None,
            start_time: start,
            stop_time: None,
        };

        if let Some(oldest) = self.window.record(transferred, now) {
            snapshot.speed = rate(
                transferred.saturating_sub(oldest.bytes),
                now.saturating_duration_since(oldest.at),
            );
            snapshot.speed_avg = rate(transferred, now.saturating_duration_since(start));
            snapshot.remaining = match (self.total_size, snapshot.speed_avg) {
                (Some(total), Some(avg)) if avg > 0 && total >= transferred => Some(
                    Duration::from_secs_f64((total - transferred) as f64 / avg as f64),
                ),
                _ => None,
            };
        }

        if let Some(total) = self.total_size {
            snapshot.percent = Some(truncated_percent(transferred, total));
        }

        snapshot
    }

    /// Non-blocking delivery of an intermediate snapshot.
    fn offer(&mut self, snapshot: Snapshot, now: Instant) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        match sink.try_send(snapshot) {
            Ok(()) => self.last_emit = Some(now),
            Err(TrySendError::Full(_)) => {
                tracing::trace!(transferred = self.transferred, "observer busy, snapshot dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!(
                    transferred = self.transferred,
                    "snapshot observer went away, progress reporting stopped"
                );
                self.sink = None;
            }
        }
    }

    /// Blocking delivery of the terminal snapshot; closes the conduit.
    fn finish(&mut self, mut snapshot: Snapshot, now: Instant) {
        let Some(sink) = self.sink.take() else {
            return;
        };
        snapshot.stop_time = Some(now);
        let transferred = snapshot.transferred;
        if sink.send(snapshot).is_err() {
            tracing::debug!(transferred, "no observer for terminal snapshot");
        } else {
            tracing::debug!(transferred, total = ?self.total_size, "terminal snapshot delivered");
        }
    }
}

/// Bytes per second over `span`; `None` for an empty span.
fn rate(bytes: u64, span: Duration) -> Option<u64> {
    if span.is_zero() {
        return None;
    }
    Some((bytes as f64 / span.as_secs_f64()) as u64)
}

/// `transferred / total` as a percentage truncated (not rounded) to two decimals.
fn truncated_percent(transferred: u64, total: u64) -> f64 {
    let hundredths = u128::from(transferred) * 10_000 / u128::from(total);
    hundredths as f64 / 100.0
}
