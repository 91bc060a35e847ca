//! SHA-256 of streamed bytes.
//!
//! `HashingWriter` digests data inline as it passes through a copy, so the
//! source does not have to be read twice.

use sha2::{Digest, Sha256};
use std::io::{self, Read, Write};

use crate::wrap::Close;

pub const BUF_SIZE: usize = 64 * 1024;

/// Write adapter that hashes every byte accepted by the inner writer.
pub struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    /// Return the inner writer and the lowercase hex digest.
    pub fn finish(self) -> (W, String) {
        (self.inner, hex::encode(self.hasher.finalize()))
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write + Close> Close for HashingWriter<W> {
    fn close(&mut self) -> io::Result<()> {
        self.inner.close()
    }
}

/// Read `reader` to the end and return its SHA-256 as lowercase hex.
pub fn sha256_reader<R: Read>(reader: &mut R, buf_size: usize) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; buf_size.max(1)];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const HELLO: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";

    #[test]
    fn sha256_reader_empty() {
        let digest = sha256_reader(&mut io::empty(), BUF_SIZE).unwrap();
        assert_eq!(digest, EMPTY);
    }

    #[test]
    fn sha256_reader_known_content() {
        let digest = sha256_reader(&mut &b"hello\n"[..], 2).unwrap();
        assert_eq!(digest, HELLO);
    }

    #[test]
    fn hashing_writer_matches_reader_digest() {
        let mut w = HashingWriter::new(Vec::new());
        w.write_all(b"hel").unwrap();
        w.write_all(b"lo\n").unwrap();
        let (data, digest) = w.finish();
        assert_eq!(data, b"hello\n");
        assert_eq!(digest, HELLO);
    }
}
