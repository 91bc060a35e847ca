//! Progress-reporting writer.

use std::io::{self, Write};

use super::{Close, NopClose};
use crate::estimator::{Estimator, EstimatorSettings, SnapshotSource};

/// Writer that reports every successful write to an embedded estimator.
///
/// Measuring on the writer side is usually more accurate than on the reader,
/// since writing tends to be the slower half of a copy and happens last.
#[derive(Debug)]
pub struct ProgressWriter<W> {
    inner: W,
    estimator: Estimator,
    closed: bool,
}

impl<W: Write> ProgressWriter<W> {
    /// Wrap `inner`; `declared_size <= 0` means the size is unknown.
    pub fn new(inner: W, declared_size: i64) -> (Self, SnapshotSource) {
        Self::with_settings(inner, declared_size, EstimatorSettings::default())
    }

    pub fn with_settings(
        inner: W,
        declared_size: i64,
        settings: EstimatorSettings,
    ) -> (Self, SnapshotSource) {
        let (estimator, source) = Estimator::with_settings(declared_size, settings);
        let writer = Self {
            inner,
            estimator,
            closed: false,
        };
        (writer, source)
    }
}

impl<W: Write> ProgressWriter<NopClose<W>> {
    /// Wrap a writer that has no close step of its own.
    pub fn from_writer(inner: W, declared_size: i64) -> (Self, SnapshotSource) {
        Self::new(NopClose::new(inner), declared_size)
    }
}

impl<W> ProgressWriter<W> {
    pub fn transferred(&self) -> u64 {
        self.estimator.transferred()
    }

    pub fn total_size(&self) -> Option<u64> {
        self.estimator.total_size()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Writing through this reference bypasses progress accounting.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Stop progress reporting and return the inner writer without closing it.
    pub fn into_inner(mut self) -> W {
        self.estimator.stop();
        self.inner
    }
}

impl<W: Close> ProgressWriter<W> {
    /// Close the inner writer, then send the terminal snapshot.
    ///
    /// Returns the inner close result. A second call is a no-op.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.inner.close();
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "closing wrapped writer failed");
        }
        self.estimator.stop();
        tracing::debug!(transferred = self.estimator.transferred(), "progress writer closed");
        result
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.estimator.report(i64::try_from(n).unwrap_or(i64::MAX));
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// Accepts at most `limit` bytes per call.
    struct ShortWriter {
        limit: usize,
        data: Vec<u8>,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn counts_bytes_actually_written() {
        let sink = ShortWriter {
            limit: 3,
            data: Vec::new(),
        };
        let (mut w, source) = ProgressWriter::from_writer(sink, -1);
        let observer = thread::spawn(move || source.last());

        assert_eq!(w.write(b"abcdef").unwrap(), 3);
        assert_eq!(w.transferred(), 3);
        w.write_all(b"ghij").unwrap();
        assert_eq!(w.transferred(), 7);

        w.close().unwrap();
        let last = observer.join().unwrap().unwrap();
        assert!(last.is_final());
        assert_eq!(last.transferred, 7);
        assert_eq!(last.total_size, None);
        assert_eq!(last.percent, None);
        assert_eq!(last.remaining, None);
        assert_eq!(w.get_ref().get_ref().data, b"abcghij");
    }

    #[test]
    fn double_close_sends_one_terminal() {
        let (mut w, source) = ProgressWriter::from_writer(Vec::new(), -1);
        let observer = thread::spawn(move || source.into_iter().collect::<Vec<_>>());

        w.write_all(b"payload").unwrap();
        w.close().unwrap();
        w.close().unwrap();

        let seen = observer.join().unwrap();
        assert_eq!(seen.iter().filter(|s| s.is_final()).count(), 1);
        assert_eq!(seen.last().unwrap().transferred, 7);
    }

    #[test]
    fn writes_after_completion_are_not_counted() {
        let (mut w, source) = ProgressWriter::from_writer(Vec::new(), 4);
        let observer = thread::spawn(move || source.into_iter().collect::<Vec<_>>());

        w.write_all(b"full").unwrap();
        w.write_all(b"more").unwrap();
        w.close().unwrap();

        let seen = observer.join().unwrap();
        let last = seen.last().unwrap();
        assert!(last.is_final());
        assert_eq!(last.transferred, 4);
        assert_eq!(last.percent, Some(100.0));
        assert_eq!(w.get_ref().get_ref(), b"fullmore");
    }
}
