//! Progress-reporting reader.

use std::io::{self, Read};

use super::{Close, NopClose};
use crate::estimator::{Estimator, EstimatorSettings, SnapshotSource};

/// Reader that reports every successful read to an embedded estimator.
///
/// Close it (or call `into_inner`) to get the terminal snapshot. Dropping it
/// only disconnects the snapshot source.
#[derive(Debug)]
pub struct ProgressReader<R> {
    inner: R,
    estimator: Estimator,
    closed: bool,
}

impl<R: Read> ProgressReader<R> {
    /// Wrap `inner`; `declared_size <= 0` means the size is unknown.
    pub fn new(inner: R, declared_size: i64) -> (Self, SnapshotSource) {
        Self::with_settings(inner, declared_size, EstimatorSettings::default())
    }

    pub fn with_settings(
        inner: R,
        declared_size: i64,
        settings: EstimatorSettings,
    ) -> (Self, SnapshotSource) {
        let (estimator, source) = Estimator::with_settings(declared_size, settings);
        let reader = Self {
            inner,
            estimator,
            closed: false,
        };
        (reader, source)
    }
}

impl<R: Read> ProgressReader<NopClose<R>> {
    /// Wrap a reader that has no close step of its own.
    pub fn from_reader(inner: R, declared_size: i64) -> (Self, SnapshotSource) {
        Self::new(NopClose::new(inner), declared_size)
    }
}

impl<R> ProgressReader<R> {
    pub fn transferred(&self) -> u64 {
        self.estimator.transferred()
    }

    pub fn total_size(&self) -> Option<u64> {
        self.estimator.total_size()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Reading through this reference bypasses progress accounting.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Stop progress reporting (sending the terminal snapshot if none was
    /// sent yet) and return the inner reader without closing it.
    pub fn into_inner(mut self) -> R {
        self.estimator.stop();
        self.inner
    }
}

impl<R: Close> ProgressReader<R> {
    /// Close the inner reader, then send the terminal snapshot.
    ///
    /// Returns the inner close result. A second call is a no-op.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.inner.close();
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "closing wrapped reader failed");
        }
        self.estimator.stop();
        tracing::debug!(transferred = self.estimator.transferred(), "progress reader closed");
        result
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.estimator.report(i64::try_from(n).unwrap_or(i64::MAX));
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "boom"))
        }
    }

    struct CloseFails(&'static [u8]);

    impl Read for CloseFails {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0.read(buf)
        }
    }

    impl Close for CloseFails {
        fn close(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "close failed"))
        }
    }

    #[test]
    fn known_size_completes_on_volume() {
        let data = vec![7u8; 10_000];
        let (mut r, source) = ProgressReader::from_reader(&data[..], data.len() as i64);
        let observer = thread::spawn(move || source.into_iter().collect::<Vec<_>>());

        let mut out = Vec::new();
        r.read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
        assert_eq!(r.transferred(), 10_000);

        let seen = observer.join().unwrap();
        let last = seen.last().unwrap();
        assert!(last.is_final());
        assert_eq!(last.transferred, 10_000);
        assert_eq!(seen.iter().filter(|s| s.is_final()).count(), 1);

        r.close().unwrap();
    }

    #[test]
    fn errors_pass_through_unchanged() {
        let (mut r, source) = ProgressReader::from_reader(FailingReader, -1);
        let observer = thread::spawn(move || source.last());
        let mut buf = [0u8; 16];
        let err = r.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(err.to_string(), "boom");
        r.close().unwrap();
        let last = observer.join().unwrap().unwrap();
        assert_eq!(last.transferred, 0);
    }

    #[test]
    fn close_error_still_stops_progress() {
        let (mut r, source) = ProgressReader::new(CloseFails(b"hello"), -1);
        let observer = thread::spawn(move || source.last());
        let mut out = Vec::new();
        r.read_to_end(&mut out).unwrap();

        let err = r.close().unwrap_err();
        assert_eq!(err.to_string(), "close failed");
        let last = observer.join().unwrap().unwrap();
        assert!(last.is_final());
        assert_eq!(last.transferred, 5);

        assert!(r.close().is_ok());
    }

    #[test]
    fn into_inner_sends_terminal() {
        let (r, source) = ProgressReader::from_reader(&b"abc"[..], -1);
        let observer = thread::spawn(move || source.last());
        let inner = r.into_inner();
        assert_eq!(inner.into_inner(), b"abc");
        assert!(observer.join().unwrap().unwrap().is_final());
    }
}
