//! Observer thread that prints snapshots to stderr on a single line.

use std::io::{self, Write};
use std::thread::{self, JoinHandle};

use progressio_core::format::SizeSystem;
use progressio_core::{Snapshot, SnapshotSource};

/// Drain `source` on a new thread, redrawing one status line per snapshot.
/// Returns the last snapshot once the source closes.
pub fn spawn(
    source: SnapshotSource,
    system: &'static SizeSystem,
    label: &'static str,
) -> JoinHandle<Option<Snapshot>> {
    thread::spawn(move || {
        let mut width = 0;
        let mut last = None;
        let stderr = io::stderr();
        for snapshot in source {
            let line = format!("{}: {}", label, snapshot.render(system));
            width = width.max(line.len());
            let mut out = stderr.lock();
            let _ = write!(out, "\r{:width$}\r{}", "", line, width = width);
            let _ = out.flush();
            last = Some(snapshot);
        }
        let _ = writeln!(stderr.lock());
        last
    })
}
