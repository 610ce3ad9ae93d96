//! Scan Module
//!
//! Single-column range scans that emit qualifying row positions.
//!
//! ## Two-phase pruning scan
//! ```text
//!   zone map ──► Phase 1: prune ──► candidate block indices
//!                                        │
//!   data file ◄── one read per candidate ┘
//!       │
//!       ▼
//!   Phase 2: re-check each record ──► position file (block-buffered)
//! ```
//!
//! `full_scan` evaluates the same predicates over every record without
//! pruning and serves as the reference result.

mod full_scan;
mod zonemap_scan;

pub use full_scan::full_scan;
pub use zonemap_scan::{ScanPaths, ScanState, ZonemapScan};

/// Counters reported by one pruning scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Zones loaded from the zone-map file
    pub zones: u64,
    /// Blocks that survived zone pruning
    pub candidate_blocks: u64,
    /// Data-file block reads performed (the scan's I/O cost)
    pub data_block_reads: u64,
    /// Positions written to the output file
    pub qualifying_positions: u64,
}

impl ScanStats {
    /// Blocks skipped without touching the data file
    pub fn blocks_pruned(&self) -> u64 {
        self.zones.saturating_sub(self.candidate_blocks)
    }
}
