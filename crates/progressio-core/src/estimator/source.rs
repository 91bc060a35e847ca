//! Receiving end of the snapshot conduit.

use std::time::Duration;

use crossbeam_channel::Receiver;
pub use crossbeam_channel::RecvTimeoutError;

use super::Snapshot;

/// Yields snapshots until the wrapper is closed or the transfer completes.
///
/// The conduit has no buffer: intermediate snapshots reach the observer only
/// while it is blocked waiting for one. Keep draining until the source ends,
/// otherwise closing the wrapper blocks on the terminal snapshot.
///
/// Single consumer, so not `Clone`.
#[derive(Debug)]
pub struct SnapshotSource {
    rx: Receiver<Snapshot>,
}

impl SnapshotSource {
    pub(crate) fn new(rx: Receiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// Block for the next snapshot; `None` once the source is closed.
    pub fn recv(&self) -> Option<Snapshot> {
        self.rx.recv().ok()
    }

    /// Take a snapshot only if the producer is already waiting to hand one over.
    pub fn try_recv(&self) -> Option<Snapshot> {
        self.rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Snapshot, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn iter(&self) -> impl Iterator<Item = Snapshot> + '_ {
        self.rx.iter()
    }

    /// Drain until closed and return the last snapshot seen.
    pub fn last(self) -> Option<Snapshot> {
        self.rx.into_iter().last()
    }
}

impl IntoIterator for SnapshotSource {
    type Item = Snapshot;
    type IntoIter = crossbeam_channel::IntoIter<Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.rx.into_iter()
    }
}

impl<'a> IntoIterator for &'a SnapshotSource {
    type Item = Snapshot;
    type IntoIter = crossbeam_channel::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.rx.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Estimator;
    use std::marker::PhantomData;
    use std::thread;

    trait NotClone {
        const CLONE: bool = false;
    }
    impl<T> NotClone for T {}

    struct Check<T>(PhantomData<T>);
    impl<T: Clone> Check<T> {
        const CLONE: bool = true;
    }

    #[test]
    fn source_has_a_single_consumer() {
        assert!(!Check::<SnapshotSource>::CLONE);
        assert!(Check::<Snapshot>::CLONE);
    }

    #[test]
    fn recv_timeout_times_out_then_disconnects() {
        let (mut e, source) = Estimator::new(100);
        assert_eq!(
            source.recv_timeout(Duration::from_millis(20)).unwrap_err(),
            RecvTimeoutError::Timeout
        );

        let producer = thread::spawn(move || {
            e.report(40);
            e.stop();
        });
        let last = loop {
            let snap = source.recv_timeout(Duration::from_secs(5)).unwrap();
            if snap.is_final() {
                break snap;
            }
        };
        producer.join().unwrap();
        assert_eq!(last.transferred, 40);
        assert_eq!(
            source.recv_timeout(Duration::from_millis(20)).unwrap_err(),
            RecvTimeoutError::Disconnected
        );
    }

    #[test]
    fn try_recv_takes_waiting_terminal_snapshot() {
        let (mut e, source) = Estimator::new(-1);
        assert!(source.try_recv().is_none());

        let producer = thread::spawn(move || {
            e.report(7);
            e.stop();
        });
        let last = loop {
            match source.try_recv() {
                Some(snap) if snap.is_final() => break snap,
                Some(_) => {}
                None => thread::sleep(Duration::from_millis(1)),
            }
        };
        producer.join().unwrap();
        assert_eq!(last.transferred, 7);
        assert!(source.try_recv().is_none());
        assert!(source.recv().is_none());
    }
}
