//! Full Scan
//!
//! Unpruned evaluation of a predicate set over an entire column file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::block::{BlockBuffer, Position, Record};
use crate::error::Result;
use crate::predicate::{any_accepts_value, Predicate, PredicateRange};

/// Positions of every record in `data_path` accepted by some range
pub fn full_scan<T, P>(
    data_path: &Path,
    ranges: &[PredicateRange<T, P>],
    block_size_bytes: usize,
) -> Result<Vec<Position>>
where
    T: Record + PartialOrd,
    P: Predicate<T>,
{
    let mut reader = BufReader::new(File::open(data_path)?);
    let mut block = BlockBuffer::<T>::new(block_size_bytes)?;

    let mut positions = Vec::new();
    let mut reads: u64 = 0;
    while block.read_next_block(&mut reader)? {
        reads += 1;
        let first = match block.range() {
            Some((first, _)) => first,
            None => break,
        };
        for (offset, value) in block.contents().iter().enumerate() {
            if any_accepts_value(ranges, value) {
                positions.push(first + offset as Position);
            }
        }
    }

    tracing::debug!(data_block_reads = reads, matches = positions.len(), "full scan done");
    Ok(positions)
}
