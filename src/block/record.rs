//! Record definitions
//!
//! Fixed-width values that can live in a block-framed file.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Absolute 0-based row index of a record within its column file
pub type Position = u64;

/// A fixed-width, trivially copyable value stored back to back on disk.
///
/// Records are encoded with bincode's fixint little-endian encoding, so
/// `WIDTH` must equal the number of bytes bincode emits for one value.
pub trait Record: Copy + Debug + Serialize + DeserializeOwned {
    /// Encoded size of one record in bytes
    const WIDTH: usize;
}

macro_rules! impl_scalar_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();
            }
        )*
    };
}

impl_scalar_record!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);
