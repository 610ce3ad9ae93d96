//! In-memory Zone Map
//!
//! Whole zone map loaded from disk; entry `i` describes data block `i`.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::block::{BlockBuffer, Record};
use crate::error::Result;
use crate::predicate::{any_accepts_range, Predicate, PredicateRange};

use super::Zone;

/// Ordered sequence of zones, indexed by block
#[derive(Debug, Clone, Default)]
pub struct ZoneMap<T> {
    zones: Vec<Zone<T>>,
}

impl<T: Record + PartialOrd> ZoneMap<T> {
    /// Load a zone-map file
    pub fn load(path: &Path, block_size_bytes: usize) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader, block_size_bytes)
    }

    /// Load every zone from `reader` with sequential block reads
    pub fn read_from<R: Read + Seek>(reader: &mut R, block_size_bytes: usize) -> Result<Self> {
        let mut zone_block = BlockBuffer::<Zone<T>>::new(block_size_bytes)?;
        let mut zones = Vec::new();

        while zone_block.read_next_block(reader)? {
            zones.extend_from_slice(zone_block.contents());
        }

        Ok(Self { zones })
    }

    /// Indices of the blocks whose zone some range may accept, ascending
    pub fn candidate_blocks<P: Predicate<T>>(&self, ranges: &[PredicateRange<T, P>]) -> Vec<u64> {
        self.zones
            .iter()
            .enumerate()
            .filter(|(_, zone)| any_accepts_range(ranges, &zone.min, &zone.max))
            .map(|(block_index, _)| block_index as u64)
            .collect()
    }
}

impl<T> ZoneMap<T> {
    pub fn from_zones(zones: Vec<Zone<T>>) -> Self {
        Self { zones }
    }

    /// Zone of data block `block_index`
    pub fn get(&self, block_index: u64) -> Option<&Zone<T>> {
        usize::try_from(block_index)
            .ok()
            .and_then(|i| self.zones.get(i))
    }

    pub fn zones(&self) -> &[Zone<T>] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone<T>> {
        self.zones.iter()
    }
}
