//! Block Module
//!
//! Fixed-size block I/O over headerless files of fixed-width records.
//!
//! ## Responsibilities
//! - Map record positions to byte offsets (`position * WIDTH`)
//! - Read and write whole blocks of typed records
//! - Track which record positions a buffer currently holds
//!
//! ## File Layout
//! ```text
//! ┌──────────────────────────┬──────────────────────────┬─────────────┐
//! │ Block 0                  │ Block 1                  │ Block 2     │
//! │ [r0][r1] ... [r(c-1)]    │ [rc] ... [r(2c-1)]       │ [r2c] ...   │
//! └──────────────────────────┴──────────────────────────┴─────────────┘
//!   c = block_size_bytes / WIDTH     (only the last block may be short)
//! ```

mod buffer;
mod column;
mod record;

pub use buffer::BlockBuffer;
pub use column::{read_column, read_positions, write_column, ColumnWriter};
pub use record::{Position, Record};
