//! Zone Map Module
//!
//! Per-block min/max summaries that let a scan skip whole blocks.
//!
//! ## Responsibilities
//! - Build a zone-map file from a column file sorted ascending
//! - Load a zone-map file into memory for pruning
//! - Select candidate blocks for a predicate set
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Zone 0                                       │
//! │ ┌────────────────┬───────────┬─────────────┐ │
//! │ │ BlockIndex (8) │ Min (W)   │ Max (W)     │ │
//! │ └────────────────┴───────────┴─────────────┘ │
//! ├──────────────────────────────────────────────┤
//! │ Zone 1 ... (ascending block index, no gaps)  │
//! └──────────────────────────────────────────────┘
//! ```
//! Zones are block-framed like any other record file: one block holds
//! `block_size_bytes / (8 + 2W)` zones.
//!
//! Min/max are taken from the first and last record of each block, so the
//! column must be sorted ascending. Unsorted input is not detected and
//! yields zones that prune incorrectly.

mod builder;
mod map;

use serde::{Deserialize, Serialize};

use crate::block::Record;

pub use builder::{ZoneMapBuilder, ZoneMapSummary};
pub use map::ZoneMap;

/// Summary of one data block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone<T> {
    pub block_index: u64,
    pub min: T,
    pub max: T,
}

impl<T> Zone<T> {
    pub fn new(block_index: u64, min: T, max: T) -> Self {
        Self {
            block_index,
            min,
            max,
        }
    }
}

impl<T: Record> Record for Zone<T> {
    const WIDTH: usize = 8 + 2 * T::WIDTH;
}
