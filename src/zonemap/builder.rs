//! Zone Map Builder
//!
//! Offline pass writing one zone per data block of a sorted column.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::block::{BlockBuffer, Record};
use crate::config::Config;
use crate::error::Result;

use super::Zone;

/// What a build produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneMapSummary {
    /// Number of zones (= data blocks) written
    pub zones_written: u64,
    /// Number of column records summarised
    pub rows_seen: u64,
}

/// Builds zone-map files for columns of `T`
pub struct ZoneMapBuilder<T: Record + PartialOrd> {
    block_size_bytes: usize,
    /// Scratch block for column reads
    data_block: BlockBuffer<T>,
    /// Output block of zones
    zone_block: BlockBuffer<Zone<T>>,
}

impl<T: Record + PartialOrd> ZoneMapBuilder<T> {
    /// Create a builder using `block_size_bytes` framing for both files
    pub fn new(block_size_bytes: usize) -> Result<Self> {
        Ok(Self {
            block_size_bytes,
            data_block: BlockBuffer::new(block_size_bytes)?,
            zone_block: BlockBuffer::new(block_size_bytes)?,
        })
    }

    /// Records of `T` per data block
    pub fn records_per_block(&self) -> usize {
        self.data_block.capacity()
    }

    /// Build zones for the first `num_rows` rows of `column_path`
    ///
    /// Reads the column one block at a time starting at position 0. An empty
    /// read ends the pass even if `num_rows` has not been reached.
    pub fn build(
        &mut self,
        column_path: &Path,
        zonemap_path: &Path,
        num_rows: u64,
    ) -> Result<ZoneMapSummary> {
        let mut column = BufReader::new(File::open(column_path)?);
        let out = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(zonemap_path)?;
        let mut out = BufWriter::new(out);

        let per_block = self.data_block.capacity() as u64;
        tracing::debug!(
            column = %column_path.display(),
            block_size = self.block_size_bytes,
            records_per_block = per_block,
            "building zone map"
        );

        self.zone_block.clear();
        let mut block_index: u64 = 0;
        let mut fill = 0usize;
        let mut rows_seen: u64 = 0;
        let mut pos: u64 = 0;

        while pos < num_rows {
            if !self.data_block.read_block(&mut column, pos, false)? {
                break;
            }

            // Sorted input: first and last record bound the block
            let records = self.data_block.contents();
            let (first, last) = match (records.first(), records.last()) {
                (Some(first), Some(last)) => (*first, *last),
                _ => break,
            };
            rows_seen += records.len() as u64;

            self.zone_block.push(Zone::new(block_index, first, last), fill);
            fill += 1;
            if self.zone_block.is_full(fill) {
                self.zone_block.write_full_block(&mut out)?;
                self.zone_block.clear();
                fill = 0;
            }

            block_index += 1;
            pos += per_block;
        }

        if fill != 0 {
            self.zone_block.write_block(&mut out, fill)?;
            self.zone_block.clear();
        }
        out.flush()?;
        out.get_ref().sync_all()?;

        tracing::debug!(zones = block_index, rows = rows_seen, "zone map written");

        Ok(ZoneMapSummary {
            zones_written: block_index,
            rows_seen,
        })
    }

    /// Build the zone map for `column` under the configured data directory
    pub fn build_column(config: &Config, column: &str) -> Result<ZoneMapSummary> {
        config.validate()?;
        let zonemap_path = config.zonemap_path(column);
        if let Some(dir) = zonemap_path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut builder = Self::new(config.block_size_bytes)?;
        builder.build(&config.column_path(column), &zonemap_path, config.num_rows)
    }
}
