//! CLI command handlers, one file per command.

mod checksum;
mod copy;
mod format;

pub use checksum::run_checksum;
pub use copy::{run_copy, CopyArgs};
pub use format::{run_duration, run_size};
