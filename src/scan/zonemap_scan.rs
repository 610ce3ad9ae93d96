//! Zone Map Scan
//!
//! Two-phase pruning filter over one sorted column.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::block::{BlockBuffer, Position, Record};
use crate::config::{Config, OverrunPolicy};
use crate::error::{Result, ZoneScanError};
use crate::predicate::{any_accepts_value, Predicate, PredicateRange};
use crate::zonemap::ZoneMap;

use super::ScanStats;

/// Files touched by a scan
#[derive(Debug, Clone)]
pub struct ScanPaths {
    /// Positions from an earlier filter stage (opened, not consumed)
    pub position_input: Option<PathBuf>,
    /// Qualifying positions are written here (truncated on open)
    pub position_output: PathBuf,
    /// Column data file
    pub data: PathBuf,
    /// Zone map of `data`
    pub zonemap: PathBuf,
}

impl ScanPaths {
    pub fn new(
        data: impl Into<PathBuf>,
        zonemap: impl Into<PathBuf>,
        position_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            position_input: None,
            position_output: position_output.into(),
            data: data.into(),
            zonemap: zonemap.into(),
        }
    }

    /// Paths for `column` under the configured data directory layout
    pub fn for_column(config: &Config, column: &str, position_output: impl Into<PathBuf>) -> Self {
        Self::new(
            config.column_path(column),
            config.zonemap_path(column),
            position_output,
        )
    }

    pub fn with_position_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.position_input = Some(path.into());
        self
    }
}

/// Lifecycle of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Opened,
    ZonesLoaded,
    Pruning,
    Rechecking,
    Flushing,
    Closed,
}

/// Pruning filter over a column of `T`
///
/// Owns its four streams exclusively; they are released by `close()` or on
/// drop, whichever comes first.
pub struct ZonemapScan<T: Record + PartialOrd> {
    position_input: Option<BufReader<File>>,
    position_output: Option<BufWriter<File>>,
    data_file: Option<BufReader<File>>,
    zonemap_file: Option<BufReader<File>>,

    block_size_bytes: usize,
    overrun_policy: OverrunPolicy,
    report_io: bool,

    /// Entire zone map; entry `i` describes data block `i`
    zones: ZoneMap<T>,
    state: ScanState,
}

impl<T: Record + PartialOrd> ZonemapScan<T> {
    /// Open all streams and load the whole zone map
    pub fn open(paths: &ScanPaths, config: &Config) -> Result<Self> {
        config.validate()?;

        let position_input = match &paths.position_input {
            Some(path) => Some(BufReader::new(File::open(path)?)),
            None => None,
        };
        let position_output = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&paths.position_output)?;
        let data_file = File::open(&paths.data)?;
        let zonemap_file = File::open(&paths.zonemap)?;

        let mut scan = Self {
            position_input,
            position_output: Some(BufWriter::new(position_output)),
            data_file: Some(BufReader::new(data_file)),
            zonemap_file: Some(BufReader::new(zonemap_file)),
            block_size_bytes: config.block_size_bytes,
            overrun_policy: config.overrun_policy,
            report_io: config.report_io,
            zones: ZoneMap::from_zones(Vec::new()),
            state: ScanState::Opened,
        };

        if let Some(file) = scan.zonemap_file.as_mut() {
            scan.zones = ZoneMap::read_from(file, scan.block_size_bytes)?;
        }
        scan.state = ScanState::ZonesLoaded;

        tracing::debug!(
            data = %paths.data.display(),
            zones = scan.zones.len(),
            "zone map loaded"
        );
        Ok(scan)
    }

    /// Run both phases and write qualifying positions
    ///
    /// The scan is closed afterwards, whether it succeeded or not. On error
    /// the position file is left empty.
    pub fn process_filter<P: Predicate<T>>(
        &mut self,
        ranges: &[PredicateRange<T, P>],
    ) -> Result<ScanStats> {
        if self.state != ScanState::ZonesLoaded {
            return Err(ZoneScanError::ScanClosed);
        }

        let stats = match self.run(ranges) {
            Ok(stats) => stats,
            Err(e) => {
                if let Err(cleanup) = self.discard_output().and_then(|_| self.close()) {
                    tracing::warn!("Failed to clean up aborted scan: {}", cleanup);
                }
                return Err(e);
            }
        };
        self.close()?;

        if self.report_io {
            tracing::info!(
                data_block_reads = stats.data_block_reads,
                "Number of data IOs: {}",
                stats.data_block_reads
            );
        } else {
            tracing::debug!(
                data_block_reads = stats.data_block_reads,
                candidate_blocks = stats.candidate_blocks,
                zones = stats.zones,
                positions = stats.qualifying_positions,
                "zonemap scan finished"
            );
        }
        Ok(stats)
    }

    fn run<P: Predicate<T>>(&mut self, ranges: &[PredicateRange<T, P>]) -> Result<ScanStats> {
        let mut data_block = BlockBuffer::<T>::new(self.block_size_bytes)?;
        let mut output_block = BlockBuffer::<Position>::new(self.block_size_bytes)?;

        // Phase 1: zone pruning
        self.state = ScanState::Pruning;
        let candidates = self.zones.candidate_blocks(ranges);
        let mut stats = ScanStats {
            zones: self.zones.len() as u64,
            candidate_blocks: candidates.len() as u64,
            ..ScanStats::default()
        };

        // Phase 2: record-level re-check of candidate blocks
        self.state = ScanState::Rechecking;
        let (data_file, out) = match (self.data_file.as_mut(), self.position_output.as_mut()) {
            (Some(data_file), Some(out)) => (data_file, out),
            _ => return Err(ZoneScanError::ScanClosed),
        };

        let per_block = data_block.capacity() as u64;
        let mut fill = 0usize;
        for &block_index in &candidates {
            let start_position = block_index * per_block;
            if !data_block.read_block(data_file, start_position, false)? {
                match self.overrun_policy {
                    OverrunPolicy::Strict => {
                        return Err(ZoneScanError::BlockOutOfRange {
                            block_index,
                            start_position,
                        });
                    }
                    OverrunPolicy::StopEarly => {
                        tracing::warn!(
                            block_index,
                            start_position,
                            "candidate block past end of data, stopping scan"
                        );
                        break;
                    }
                }
            }
            stats.data_block_reads += 1;

            let first = data_block.range().map_or(start_position, |(first, _)| first);
            for (offset, value) in data_block.contents().iter().enumerate() {
                if !any_accepts_value(ranges, value) {
                    continue;
                }
                output_block.push(first + offset as Position, fill);
                fill += 1;
                stats.qualifying_positions += 1;
                if output_block.is_full(fill) {
                    output_block.write_full_block(out)?;
                    output_block.clear();
                    fill = 0;
                }
            }
        }

        self.state = ScanState::Flushing;
        if fill > 0 {
            output_block.write_block(out, fill)?;
            output_block.clear();
        }
        out.flush()?;

        Ok(stats)
    }

    /// Drop unflushed positions and truncate the output file
    fn discard_output(&mut self) -> Result<()> {
        if let Some(out) = self.position_output.take() {
            let (file, _unwritten) = out.into_parts();
            file.set_len(0)?;
        }
        Ok(())
    }

    /// Close all four streams; calling again is a no-op
    pub fn close(&mut self) -> Result<()> {
        if self.state == ScanState::Closed {
            return Ok(());
        }
        self.state = ScanState::Closed;

        self.position_input = None;
        self.data_file = None;
        self.zonemap_file = None;
        if let Some(mut out) = self.position_output.take() {
            out.flush()?;
            out.get_ref().sync_all()?;
        }
        Ok(())
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn zones(&self) -> &ZoneMap<T> {
        &self.zones
    }

    /// Whether a position-input stream was supplied and is still open
    pub fn has_position_input(&self) -> bool {
        self.position_input.is_some()
    }
}

impl<T: Record + PartialOrd> Drop for ZonemapScan<T> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!("Failed to close zonemap scan: {}", e);
        }
    }
}
