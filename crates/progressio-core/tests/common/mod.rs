//! Slow streams for exercising progress over real time.

use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

/// Minimum spacing between calls, long enough to cross the update interval
/// a few times during a small copy.
pub const STEP: Duration = Duration::from_millis(15);

/// Writer that accepts everything but no faster than one call per `STEP`.
#[derive(Default)]
pub struct ThrottledWriter {
    last: Option<Instant>,
    pub written: usize,
}

fn pace(last: &mut Option<Instant>) {
    if let Some(prev) = *last {
        let since = prev.elapsed();
        if since < STEP {
            thread::sleep(STEP - since);
        }
    }
    *last = Some(Instant::now());
}

impl Write for ThrottledWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        pace(&mut self.last);
        self.written += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader over `data` that returns at most `chunk` bytes per `STEP`.
pub struct ThrottledReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
    last: Option<Instant>,
}

impl ThrottledReader {
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk,
            last: None,
        }
    }
}

impl Read for ThrottledReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        pace(&mut self.last);
        let n = buf.len().min(self.chunk).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
