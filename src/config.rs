//! Configuration for zonescan
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, ZoneScanError};

/// Main configuration shared by zone-map builds and scans
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all column and zone-map files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── column_store/        (raw column files)
    ///     └── zone_maps/           (zones_{column} files)
    pub data_dir: PathBuf,

    /// Size of one I/O block in bytes (shared by data, zone and position files)
    pub block_size_bytes: usize,

    /// Total number of rows in a column
    pub num_rows: u64,

    // -------------------------------------------------------------------------
    // Scan Configuration
    // -------------------------------------------------------------------------
    /// What to do when a candidate block lies past the end of the data file
    pub overrun_policy: OverrunPolicy,

    /// Report the data block read count at info level after each scan
    pub report_io: bool,
}

/// Behaviour when a candidate block read comes back empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverrunPolicy {
    /// Abort the scan with `ZoneScanError::BlockOutOfRange`
    #[default]
    Strict,

    /// Stop reading, flush the positions found so far and return
    StopEarly,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            block_size_bytes: 4096,
            num_rows: 0,
            overrun_policy: OverrunPolicy::Strict,
            report_io: false,
        }
    }
}

impl Config {
    const COLUMN_DIR: &'static str = "column_store";
    const ZONEMAP_DIR: &'static str = "zone_maps";

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Path of the raw column file for `column`
    pub fn column_path(&self, column: &str) -> PathBuf {
        self.data_dir.join(Self::COLUMN_DIR).join(column)
    }

    /// Path of the zone-map file summarising `column`
    pub fn zonemap_path(&self, column: &str) -> PathBuf {
        self.data_dir
            .join(Self::ZONEMAP_DIR)
            .join(format!("zones_{}", column))
    }

    /// Reject settings no block buffer can work with
    pub fn validate(&self) -> Result<()> {
        if self.block_size_bytes == 0 {
            return Err(ZoneScanError::Config(
                "block_size_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all storage)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the I/O block size (in bytes)
    pub fn block_size_bytes(mut self, size: usize) -> Self {
        self.config.block_size_bytes = size;
        self
    }

    /// Set the number of rows in the column
    pub fn num_rows(mut self, rows: u64) -> Self {
        self.config.num_rows = rows;
        self
    }

    /// Set the overrun policy for candidate block reads
    pub fn overrun_policy(mut self, policy: OverrunPolicy) -> Self {
        self.config.overrun_policy = policy;
        self
    }

    /// Report data block reads after each scan
    pub fn report_io(mut self, enabled: bool) -> Self {
        self.config.report_io = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
