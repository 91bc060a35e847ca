//! Byte counts under metric (1000), IEC (1024) and JEDEC (1024, metric names) units.

pub const BYTE: i64 = 1;

pub const METRIC_MULTIPLIER: i64 = 1000;
pub const KILOBYTE: i64 = BYTE * METRIC_MULTIPLIER;
pub const MEGABYTE: i64 = KILOBYTE * METRIC_MULTIPLIER;
pub const GIGABYTE: i64 = MEGABYTE * METRIC_MULTIPLIER;
pub const TERABYTE: i64 = GIGABYTE * METRIC_MULTIPLIER;
pub const PETABYTE: i64 = TERABYTE * METRIC_MULTIPLIER;

pub const IEC_MULTIPLIER: i64 = 1024;
pub const KIBIBYTE: i64 = BYTE * IEC_MULTIPLIER;
pub const MEBIBYTE: i64 = KIBIBYTE * IEC_MULTIPLIER;
pub const GIBIBYTE: i64 = MEBIBYTE * IEC_MULTIPLIER;
pub const TEBIBYTE: i64 = GIBIBYTE * IEC_MULTIPLIER;
pub const PEBIBYTE: i64 = TEBIBYTE * IEC_MULTIPLIER;

/// JEDEC uses IEC multipliers with metric names.
pub const JEDEC_KILOBYTE: i64 = KIBIBYTE;
pub const JEDEC_MEGABYTE: i64 = MEBIBYTE;
pub const JEDEC_GIGABYTE: i64 = GIBIBYTE;

/// A unit standard: multiplier plus unit names ordered from smallest to largest.
///
/// `names` and `shorts` are expected to have the same, non-zero length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSystem {
    pub name: &'static str,
    pub multiplier: i64,
    pub names: &'static [&'static str],
    pub shorts: &'static [&'static str],
}

pub const METRIC: SizeSystem = SizeSystem {
    name: "metric",
    multiplier: METRIC_MULTIPLIER,
    names: &["byte", "kilobyte", "megabyte", "gigabyte", "terabyte", "petabyte"],
    shorts: &["B", "kB", "MB", "GB", "TB", "PB"],
};

pub const IEC: SizeSystem = SizeSystem {
    name: "IEC",
    multiplier: IEC_MULTIPLIER,
    names: &["byte", "kibibyte", "mebibyte", "gibibyte", "tebibyte", "pebibyte"],
    shorts: &["B", "KiB", "MiB", "GiB", "TiB", "PiB"],
};

pub const JEDEC: SizeSystem = SizeSystem {
    name: "JEDEC",
    multiplier: IEC_MULTIPLIER,
    names: &["byte", "kilobyte", "megabyte", "gigabyte"],
    shorts: &["B", "KB", "MB", "GB"],
};

/// The unit chosen for a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub divider: i64,
    pub name: &'static str,
    pub short: &'static str,
}

/// Pick the largest unit whose threshold does not exceed `|size|`.
///
/// Zero maps to the smallest unit; sizes beyond the table clamp to the largest
/// defined unit.
pub fn unit_for(system: &SizeSystem, size: i64) -> Unit {
    let magnitude = size.unsigned_abs();
    let multiplier = system.multiplier.unsigned_abs();
    let count = system.names.len().min(system.shorts.len());

    let mut index = 0;
    let mut divider: u64 = 1;
    for i in 1..count {
        match divider.checked_mul(multiplier) {
            Some(next) if next <= magnitude => {
                divider = next;
                index = i;
            }
            _ => break,
        }
    }

    Unit {
        divider: i64::try_from(divider).unwrap_or(i64::MAX),
        name: system.names.get(index).copied().unwrap_or(""),
        short: system.shorts.get(index).copied().unwrap_or(""),
    }
}

/// Format `size` bytes under `system`.
///
/// Short form glues the unit to the number (`"1.50KiB"`); the long form
/// separates them (`"1.50 kibibyte"`). Raw bytes carry no decimals.
pub fn format_size(system: &SizeSystem, size: i64, short: bool) -> String {
    let unit = unit_for(system, size);
    let value = size as f64 / unit.divider as f64;
    let number = if unit.divider == 1 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    };
    if short {
        format!("{}{}", number, unit.short)
    } else {
        format!("{} {}", number, unit.name)
    }
}
