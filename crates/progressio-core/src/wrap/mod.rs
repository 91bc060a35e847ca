//! `Read`/`Write` decorators that feed an `Estimator`.
//!
//! A wrapper forwards every call to the inner stream and reports the bytes
//! actually moved. `close()` closes the inner stream, then forces the
//! terminal snapshot whatever the inner close returned.

mod file;
mod reader;
mod writer;

use std::io::{self, BufWriter, Read, Write};
use std::net::{Shutdown, TcpStream};

pub use file::{measure, open_file_reader, open_file_reader_with_settings};
pub use reader::ProgressReader;
pub use writer::ProgressWriter;

/// A stream with an explicit close step.
pub trait Close {
    fn close(&mut self) -> io::Result<()>;
}

impl<T: Close + ?Sized> Close for Box<T> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<T: Close + ?Sized> Close for &mut T {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl Close for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

impl<W: Write + Close> Close for BufWriter<W> {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.get_mut().close()
    }
}

/// Adapter for streams without a close step; `close` always succeeds.
#[derive(Debug, Default)]
pub struct NopClose<T>(T);

impl<T> NopClose<T> {
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    pub fn get_ref(&self) -> &T {
        &self.0
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Close for NopClose<T> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: Read> Read for NopClose<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<T: Write> Write for NopClose<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
