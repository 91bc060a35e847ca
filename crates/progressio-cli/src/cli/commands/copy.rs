//! `pio copy` – copy a stream with live progress.

use anyhow::{anyhow, Context, Result};
use progressio_core::checksum::HashingWriter;
use progressio_core::config::{ProgressioConfig, UnitSystem};
use progressio_core::wrap::measure;
use progressio_core::{EstimatorSettings, NopClose, ProgressReader, ProgressWriter};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

use crate::cli::observer;

#[derive(Debug, Clone)]
pub struct CopyArgs {
    pub src: String,
    pub dst: Option<String>,
    pub size: Option<i64>,
    pub track_writer: bool,
    pub units: UnitSystem,
    pub sha256: bool,
}

fn is_std_stream(name: &str) -> bool {
    name == "-"
}

/// Open the source and work out its declared size (explicit `--size` wins).
fn open_source(args: &CopyArgs) -> Result<(Box<dyn Read>, i64)> {
    if is_std_stream(&args.src) {
        return Ok((Box::new(io::stdin().lock()), args.size.unwrap_or(-1)));
    }
    let mut file = File::open(&args.src).with_context(|| format!("open {}", args.src))?;
    let declared = match args.size {
        Some(size) => size,
        None => {
            let size = measure(&mut file).with_context(|| format!("size of {}", args.src))?;
            i64::try_from(size).unwrap_or(i64::MAX)
        }
    };
    Ok((Box::new(file), declared))
}

fn open_destination(dst: Option<&str>) -> Result<Box<dyn Write>> {
    match dst {
        None => Ok(Box::new(io::stdout().lock())),
        Some(name) if is_std_stream(name) => Ok(Box::new(io::stdout().lock())),
        Some(name) => {
            let file = File::create(name).with_context(|| format!("create {}", name))?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

pub fn run_copy(args: &CopyArgs, cfg: &ProgressioConfig) -> Result<()> {
    let (reader, declared) = open_source(args)?;
    let writer = open_destination(args.dst.as_deref())?;
    let tracked = Tracked {
        declared,
        track_writer: args.track_writer,
        settings: cfg.estimator_settings(),
        units: args.units,
        buffer_bytes: cfg.buffer_bytes,
    };
    tracing::info!(src = %args.src, declared, track_writer = args.track_writer, "copy started");

    let to_stdout = args.dst.as_deref().map_or(true, is_std_stream);
    if args.sha256 {
        let mut hashing = HashingWriter::new(writer);
        let copied = tracked.copy(reader, &mut hashing)?;
        let (_, digest) = hashing.finish();
        tracing::info!(copied, %digest, "copy finished");
        if to_stdout {
            eprintln!("{}  {}", digest, args.src);
        } else {
            println!("{}  {}", digest, args.src);
        }
    } else {
        let copied = tracked.copy(reader, writer)?;
        tracing::info!(copied, "copy finished");
    }
    Ok(())
}

/// Copy parameters shared by the reader- and writer-side variants.
struct Tracked {
    declared: i64,
    track_writer: bool,
    settings: EstimatorSettings,
    units: UnitSystem,
    buffer_bytes: usize,
}

impl Tracked {
    fn copy<R: Read, W: Write>(&self, mut reader: R, writer: W) -> Result<u64> {
        let system = self.units.size_system();
        if self.track_writer {
            let (mut writer, source) =
                ProgressWriter::with_settings(NopClose::new(writer), self.declared, self.settings);
            let progress = observer::spawn(source, system, "copy");
            let copied = pump(&mut reader, &mut writer, self.buffer_bytes);
            let closed = writer.close();
            join(progress)?;
            closed.context("close destination")?;
            copied
        } else {
            let (mut reader, source) =
                ProgressReader::with_settings(NopClose::new(reader), self.declared, self.settings);
            let mut writer = writer;
            let progress = observer::spawn(source, system, "copy");
            let copied = pump(&mut reader, &mut writer, self.buffer_bytes);
            let closed = reader.close();
            join(progress)?;
            closed.context("close source")?;
            copied
        }
    }
}

fn join(progress: std::thread::JoinHandle<Option<progressio_core::Snapshot>>) -> Result<()> {
    progress
        .join()
        .map_err(|_| anyhow!("progress observer panicked"))?;
    Ok(())
}

/// Copy until end of stream and flush; returns the number of bytes copied.
fn pump<R: Read, W: Write>(reader: &mut R, writer: &mut W, buffer_bytes: usize) -> Result<u64> {
    let mut buf = vec![0u8; buffer_bytes.max(1)];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("read failed"),
        };
        writer.write_all(&buf[..n]).context("write failed")?;
        total += n as u64;
    }
    writer.flush().context("flush failed")?;
    Ok(total)
}
