use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::estimator::{EstimatorSettings, UPDATE_INTERVAL, WINDOW_SLOTS};
use crate::format::{SizeSystem, IEC, JEDEC, METRIC};

/// Unit system used when rendering snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Iec,
    Metric,
    Jedec,
}

impl UnitSystem {
    pub fn size_system(self) -> &'static SizeSystem {
        match self {
            UnitSystem::Iec => &IEC,
            UnitSystem::Metric => &METRIC,
            UnitSystem::Jedec => &JEDEC,
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iec" => Ok(UnitSystem::Iec),
            "metric" | "si" => Ok(UnitSystem::Metric),
            "jedec" => Ok(UnitSystem::Jedec),
            other => Err(format!("unknown unit system '{}' (expected iec, metric or jedec)", other)),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnitSystem::Iec => "iec",
            UnitSystem::Metric => "metric",
            UnitSystem::Jedec => "jedec",
        })
    }
}

/// Global configuration loaded from `~/.config/progressio/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressioConfig {
    /// Minimum milliseconds between intermediate snapshots.
    pub update_interval_ms: u64,
    /// Emissions the instantaneous speed is averaged over.
    pub window_slots: usize,
    /// Units for rendered sizes and speeds.
    #[serde(default)]
    pub units: UnitSystem,
    /// Copy buffer size in bytes for the CLI.
    #[serde(default = "default_buffer_bytes")]
    pub buffer_bytes: usize,
}

fn default_buffer_bytes() -> usize {
    64 * 1024
}

impl Default for ProgressioConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: UPDATE_INTERVAL.as_millis() as u64,
            window_slots: WINDOW_SLOTS,
            units: UnitSystem::default(),
            buffer_bytes: default_buffer_bytes(),
        }
    }
}

impl ProgressioConfig {
    pub fn estimator_settings(&self) -> EstimatorSettings {
        EstimatorSettings {
            update_interval: Duration::from_millis(self.update_interval_ms),
            window_slots: self.window_slots.max(1),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("progressio")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ProgressioConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

pub fn load_or_init_at(path: &Path) -> Result<ProgressioConfig> {
    if !path.exists() {
        let default_cfg = ProgressioConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("failed to write default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: ProgressioConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
