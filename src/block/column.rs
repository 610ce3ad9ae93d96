//! Column Files
//!
//! Block-buffered writing and whole-file reading of record files
//! (column data and qualifying position lists).

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::Result;

use super::buffer::BlockBuffer;
use super::record::{Position, Record};

/// Append-only writer producing a headerless column file
pub struct ColumnWriter<T: Record> {
    writer: BufWriter<File>,
    block: BlockBuffer<T>,
    /// Slot for the next record in `block`
    fill: usize,
    rows_written: u64,
}

impl<T: Record> ColumnWriter<T> {
    /// Create (or truncate) a column file at `path`
    pub fn create(path: &Path, block_size_bytes: usize) -> Result<Self> {
        let block = BlockBuffer::new(block_size_bytes)?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            block,
            fill: 0,
            rows_written: 0,
        })
    }

    /// Append one record, writing the block out once it fills
    pub fn append(&mut self, value: T) -> Result<()> {
        self.block.push(value, self.fill);
        self.fill += 1;
        self.rows_written += 1;

        if self.block.is_full(self.fill) {
            self.block.write_full_block(&mut self.writer)?;
            self.block.clear();
            self.fill = 0;
        }
        Ok(())
    }

    /// Flush the trailing partial block and sync; returns rows written
    pub fn finish(mut self) -> Result<u64> {
        if self.fill > 0 {
            self.block.write_block(&mut self.writer, self.fill)?;
        }
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;

        tracing::debug!(rows = self.rows_written, "column file written");
        Ok(self.rows_written)
    }
}

/// Write `values` as a column file
pub fn write_column<T: Record>(path: &Path, values: &[T], block_size_bytes: usize) -> Result<u64> {
    let mut writer = ColumnWriter::create(path, block_size_bytes)?;
    for value in values {
        writer.append(*value)?;
    }
    writer.finish()
}

/// Read an entire record file with sequential block reads
pub fn read_column<T: Record>(path: &Path, block_size_bytes: usize) -> Result<Vec<T>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut block = BlockBuffer::<T>::new(block_size_bytes)?;

    let mut values = Vec::new();
    while block.read_next_block(&mut reader)? {
        values.extend_from_slice(block.contents());
    }
    Ok(values)
}

/// Read a qualifying-position file produced by a scan
pub fn read_positions(path: &Path, block_size_bytes: usize) -> Result<Vec<Position>> {
    read_column::<Position>(path, block_size_bytes)
}
