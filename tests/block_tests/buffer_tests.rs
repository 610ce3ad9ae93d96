//! Tests for BlockBuffer
//!
//! These tests verify:
//! - Capacity derived from block size and record width
//! - Positioned and sequential block reads
//! - Short final blocks and end-of-stream signalling
//! - Push/flush bookkeeping and stale slot handling
//! - Corruption detection for trailing partial records

use std::io::Cursor;

use zonescan::zonemap::Zone;
use zonescan::{BlockBuffer, Position, Record, ZoneScanError};

// =============================================================================
// Helper Functions
// =============================================================================

/// Encode i32 values the way a column file stores them
fn i32_column(values: &[i32]) -> Cursor<Vec<u8>> {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    Cursor::new(bytes)
}

fn one_to(n: i32) -> Vec<i32> {
    (1..=n).collect()
}

// =============================================================================
// Capacity Tests
// =============================================================================

#[test]
fn test_capacity_from_block_size() {
    let block = BlockBuffer::<i32>::new(4096).unwrap();
    assert_eq!(block.capacity(), 1024);

    let block = BlockBuffer::<u64>::new(4096).unwrap();
    assert_eq!(block.capacity(), 512);
}

#[test]
fn test_capacity_rounds_down() {
    // 22 bytes hold five whole i32 records
    let block = BlockBuffer::<i32>::new(22).unwrap();
    assert_eq!(block.capacity(), 5);
}

#[test]
fn test_zone_capacity_counts_zone_width() {
    assert_eq!(<Zone<i32> as Record>::WIDTH, 16);
    assert_eq!(<Zone<f64> as Record>::WIDTH, 24);

    let block = BlockBuffer::<Zone<i32>>::new(4096).unwrap();
    assert_eq!(block.capacity(), 256);
}

#[test]
fn test_block_too_small_for_record() {
    let result = BlockBuffer::<u64>::new(4);
    assert!(matches!(result, Err(ZoneScanError::Config(_))));
}

#[test]
fn test_new_buffer_is_empty() {
    let block = BlockBuffer::<i32>::new(20).unwrap();
    assert!(block.is_empty());
    assert!(block.contents().is_empty());
    assert_eq!(block.range(), None);
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_block_at_position() {
    let mut file = i32_column(&one_to(10));
    let mut block = BlockBuffer::<i32>::new(20).unwrap();

    assert!(block.read_block(&mut file, 5, false).unwrap());
    assert_eq!(block.contents(), &[6, 7, 8, 9, 10]);
    assert_eq!(block.range(), Some((5, 9)));
}

#[test]
fn test_read_block_unaligned_position() {
    let mut file = i32_column(&one_to(10));
    let mut block = BlockBuffer::<i32>::new(20).unwrap();

    assert!(block.read_block(&mut file, 3, false).unwrap());
    assert_eq!(block.contents(), &[4, 5, 6, 7, 8]);
    assert_eq!(block.range(), Some((3, 7)));
}

#[test]
fn test_read_short_final_block() {
    let mut file = i32_column(&one_to(7));
    let mut block = BlockBuffer::<i32>::new(20).unwrap();

    assert!(block.read_block(&mut file, 5, false).unwrap());
    assert_eq!(block.len(), 2);
    assert_eq!(block.contents(), &[6, 7]);
    assert_eq!(block.range(), Some((5, 6)));
}

#[test]
fn test_read_past_end_signals_exhaustion() {
    let mut file = i32_column(&one_to(10));
    let mut block = BlockBuffer::<i32>::new(20).unwrap();

    assert!(block.read_block(&mut file, 0, false).unwrap());
    assert!(!block.read_block(&mut file, 10, false).unwrap());
    assert!(block.contents().is_empty());
    assert_eq!(block.range(), None);
}

#[test]
fn test_read_empty_file() {
    let mut file = i32_column(&[]);
    let mut block = BlockBuffer::<i32>::new(20).unwrap();

    assert!(!block.read_next_block(&mut file).unwrap());
}

#[test]
fn test_sequential_reads_walk_the_file() {
    let mut file = i32_column(&one_to(12));
    let mut block = BlockBuffer::<i32>::new(20).unwrap();

    let mut ranges = Vec::new();
    let mut values = Vec::new();
    while block.read_next_block(&mut file).unwrap() {
        ranges.push(block.range().unwrap());
        values.extend_from_slice(block.contents());
    }

    assert_eq!(ranges, vec![(0, 4), (5, 9), (10, 11)]);
    assert_eq!(values, one_to(12));
}

#[test]
fn test_sequential_read_uses_current_offset() {
    let mut file = i32_column(&one_to(10));
    let mut block = BlockBuffer::<i32>::new(12).unwrap();

    // Positioned read leaves the stream at position 5
    block.read_block(&mut file, 2, false).unwrap();
    assert_eq!(block.range(), Some((2, 4)));

    // Start position argument is ignored for sequential reads
    block.read_block(&mut file, 0, true).unwrap();
    assert_eq!(block.contents(), &[6, 7, 8]);
    assert_eq!(block.range(), Some((5, 7)));
}

#[test]
fn test_trailing_partial_record_is_corruption() {
    let mut file = i32_column(&one_to(3));
    file.get_mut().extend_from_slice(&[0xAB, 0xCD]);
    let mut block = BlockBuffer::<i32>::new(40).unwrap();

    let result = block.read_next_block(&mut file);
    assert!(matches!(result, Err(ZoneScanError::Corruption(_))));
}

#[test]
fn test_read_f64_records() {
    let values = [0.5f64, -1.25, 3.0];
    let mut bytes = Vec::new();
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    let mut file = Cursor::new(bytes);
    let mut block = BlockBuffer::<f64>::new(64).unwrap();

    assert!(block.read_next_block(&mut file).unwrap());
    assert_eq!(block.contents(), &values);
}

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_push_and_is_full() {
    let mut block = BlockBuffer::<i32>::new(12).unwrap();

    let mut fill = 0;
    for v in [10, 20] {
        block.push(v, fill);
        fill += 1;
        assert!(!block.is_full(fill));
    }
    block.push(30, fill);
    fill += 1;

    assert!(block.is_full(fill));
    assert_eq!(block.contents(), &[10, 20, 30]);
}

#[test]
fn test_write_partial_block() {
    let mut block = BlockBuffer::<i32>::new(20).unwrap();
    block.push(7, 0);
    block.push(8, 1);

    let mut out = Vec::new();
    block.write_block(&mut out, 2).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&7i32.to_le_bytes());
    expected.extend_from_slice(&8i32.to_le_bytes());
    assert_eq!(out, expected);
}

#[test]
fn test_write_full_block_appends() {
    let mut block = BlockBuffer::<Position>::new(16).unwrap();
    let mut out = Vec::new();

    block.push(1, 0);
    block.push(2, 1);
    block.write_full_block(&mut out).unwrap();
    block.clear();
    block.push(3, 0);
    block.write_block(&mut out, 1).unwrap();

    assert_eq!(out.len(), 3 * 8);
    assert_eq!(&out[16..24], &3u64.to_le_bytes());
}

#[test]
fn test_clear_hides_stale_slots() {
    let mut block = BlockBuffer::<i32>::new(20).unwrap();
    for (i, v) in [1, 2, 3, 4].into_iter().enumerate() {
        block.push(v, i);
    }

    block.clear();
    assert!(block.is_empty());

    block.push(99, 0);
    assert_eq!(block.contents(), &[99]);

    let mut out = Vec::new();
    block.write_block(&mut out, 1).unwrap();
    assert_eq!(out, 99i32.to_le_bytes().to_vec());
}

#[test]
fn test_flush_to_writes_and_clears() {
    let mut block = BlockBuffer::<i32>::new(20).unwrap();
    block.push(5, 0);
    block.push(6, 1);

    let mut out = Vec::new();
    assert_eq!(block.flush_to(&mut out).unwrap(), 2);
    assert!(block.is_empty());
    assert_eq!(out.len(), 8);

    // Nothing left to flush
    assert_eq!(block.flush_to(&mut out).unwrap(), 0);
    assert_eq!(out.len(), 8);
}

#[test]
fn test_written_block_reads_back() {
    let mut block = BlockBuffer::<Zone<i32>>::new(64).unwrap();
    block.push(Zone::new(0, 1, 5), 0);
    block.push(Zone::new(1, 6, 10), 1);

    let mut out = Cursor::new(Vec::new());
    block.write_block(&mut out, 2).unwrap();
    out.set_position(0);

    let mut reader = BlockBuffer::<Zone<i32>>::new(64).unwrap();
    assert!(reader.read_next_block(&mut out).unwrap());
    assert_eq!(
        reader.contents(),
        &[Zone::new(0, 1, 5), Zone::new(1, 6, 10)]
    );
}
