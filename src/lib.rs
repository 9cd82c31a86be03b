//! `hll` is a Rust crate designed to estimate the number of distinct byte strings in a stream
//! using a HyperLogLog sketch with bounded memory.
//!
//! The sketch hashes every element with 32-bit Murmur3 (x86 variant), keeps `2^k` one-byte
//! registers and applies the classic three-regime estimate (linear counting, raw HyperLogLog,
//! large-range correction).
pub mod error;
pub mod hyperloglog;
pub mod murmur3;
mod registers;
#[cfg(feature = "with_serde")]
mod serde;

pub use error::{HllError, Result};
pub use hyperloglog::{
    HyperLogLog, DEFAULT_PRECISION, DEFAULT_SEED, MAX_PRECISION, MIN_PRECISION,
};
pub use murmur3::murmur3_hash;
pub use registers::MAX_RANK;
