//! Block Buffer
//!
//! A fixed byte-capacity window of typed records with paired file I/O.

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use bytes::{BufMut, BytesMut};

use crate::error::{Result, ZoneScanError};

use super::record::{Position, Record};

/// In-memory buffer holding at most one block of `T` records
///
/// ## Fill bookkeeping:
/// - `capacity` is fixed at construction: `block_size_bytes / T::WIDTH`
/// - `len` counts the valid records; slots past `len` may hold stale values
///   from an earlier fill and are never exposed
/// - `range` is only known after a read, and is reset by `clear()`
pub struct BlockBuffer<T: Record> {
    /// Records per block
    capacity: usize,
    /// Backing slots, reused across fills
    slots: Vec<T>,
    /// Number of valid records in `slots`
    len: usize,
    /// First and last absolute position held after a read
    range: Option<(Position, Position)>,
    /// Raw bytes of the last read
    raw: Vec<u8>,
    /// Staging area for encoded records on write
    encoded: BytesMut,
}

impl<T: Record> BlockBuffer<T> {
    /// Create a buffer sized for one block of `block_size_bytes`
    ///
    /// Fails if the block cannot hold a single record of `T`.
    pub fn new(block_size_bytes: usize) -> Result<Self> {
        let capacity = block_size_bytes / T::WIDTH;
        if capacity == 0 {
            return Err(ZoneScanError::Config(format!(
                "Block size of {} bytes cannot hold a {}-byte record",
                block_size_bytes,
                T::WIDTH
            )));
        }

        let block_bytes = capacity * T::WIDTH;
        Ok(Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            len: 0,
            range: None,
            raw: vec![0u8; block_bytes],
            encoded: BytesMut::with_capacity(block_bytes),
        })
    }

    /// Records per block
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of valid records currently held
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read up to one block of records
    ///
    /// Unless `sequential` is set, seeks to `start_position * WIDTH` first;
    /// otherwise reads from the stream's current offset. Returns `false` when
    /// no record was read (end of stream).
    pub fn read_block<R: Read + Seek>(
        &mut self,
        reader: &mut R,
        start_position: Position,
        sequential: bool,
    ) -> Result<bool> {
        let width = T::WIDTH as u64;
        let start_position = if sequential {
            reader.stream_position()? / width
        } else {
            reader.seek(SeekFrom::Start(start_position * width))?;
            start_position
        };

        let bytes_read = fill_from(reader, &mut self.raw)?;
        let count = bytes_read / T::WIDTH;
        let stray = bytes_read % T::WIDTH;
        if stray != 0 {
            return Err(ZoneScanError::Corruption(format!(
                "{} trailing bytes after position {} do not form a {}-byte record",
                stray,
                start_position + count as u64,
                T::WIDTH
            )));
        }

        self.slots.clear();
        for chunk in self.raw[..bytes_read].chunks_exact(T::WIDTH) {
            self.slots.push(bincode::deserialize(chunk)?);
        }
        self.len = count;

        if count == 0 {
            self.range = None;
            return Ok(false);
        }

        self.range = Some((start_position, start_position + count as u64 - 1));
        Ok(true)
    }

    /// Read the next block from the stream's current offset
    pub fn read_next_block<R: Read + Seek>(&mut self, reader: &mut R) -> Result<bool> {
        self.read_block(reader, 0, true)
    }

    /// Store `record` at slot `index`
    ///
    /// `index` must be below `capacity`; this is checked in debug builds only.
    pub fn push(&mut self, record: T, index: usize) {
        debug_assert!(
            index < self.capacity,
            "push index {} out of block capacity {}",
            index,
            self.capacity
        );

        if index < self.slots.len() {
            self.slots[index] = record;
        } else {
            self.slots.resize(index + 1, record);
        }
        self.len = self.len.max(index + 1);
    }

    /// True once `count` records fill the block
    pub fn is_full(&self, count: usize) -> bool {
        count >= self.capacity
    }

    /// Append the first `count` records to `writer`
    ///
    /// `count` is clamped to the fill count so stale slots never reach disk.
    pub fn write_block<W: Write>(&mut self, writer: &mut W, count: usize) -> Result<()> {
        debug_assert!(count <= self.len, "write of {} records, {} valid", count, self.len);
        let count = count.min(self.len);

        self.encoded.clear();
        {
            let mut out = (&mut self.encoded).writer();
            for record in &self.slots[..count] {
                bincode::serialize_into(&mut out, record)?;
            }
        }
        writer.write_all(&self.encoded)?;
        Ok(())
    }

    /// Append a whole block to `writer`
    pub fn write_full_block<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        self.write_block(writer, self.capacity)
    }

    /// Write every valid record, then clear; returns the number written
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> Result<usize> {
        let written = self.len;
        if written > 0 {
            self.write_block(writer, written)?;
        }
        self.clear();
        Ok(written)
    }

    /// Reset fill bookkeeping (memory is reused, not zeroed)
    pub fn clear(&mut self) {
        self.len = 0;
        self.range = None;
    }

    /// Valid records, in file order
    pub fn contents(&self) -> &[T] {
        &self.slots[..self.len]
    }

    /// `(first_position, last_position)` of the last successful read
    pub fn range(&self) -> Option<(Position, Position)> {
        self.range
    }
}

/// Read until `buf` is full or the stream ends; returns bytes read
fn fill_from<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
