//! HyperLogLog sketch allows to estimate number of distinct byte strings
//! in the stream or dataset and is defined with precision `k` and hash `seed`:
//! - `k`: precision parameter in [2..16] range, which defines
//!   number of hash bits used for register indices (`M = 2^k` registers).
//! - `seed`: Murmur3 seed, fixed for the lifetime of the sketch.
//!
//! [Original HyperLogLog paper](https://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)
//!
//! # Hash layout
//! Every element is hashed into 32 bits with Murmur3 (x86 variant):
//! - top `k` bits      - register index in `[0..M)` range.
//! - lower `32 - k` bits - tail, whose leading zero count plus one gives the rank.
//!
//! A register stores the highest rank routed to it, so both `add` and `merge`
//! can only ever raise registers.
//!
//! # Estimation
//! - Raw estimate `alpha(M) * M^2 / sum(2^-rank)`.
//! - Linear counting `M * ln(M / V)` when raw estimate is `<= 2.5 * M` and `V` registers are zero.
//! - Large range correction `-2^32 * ln(1 - E / 2^32)` when raw estimate exceeds `2^32 / 30`.
//!
//! Expected relative error is `1.04 / sqrt(M)`:
//! - k = 10: 1.04 / sqrt(2^10) = 3.25%
//! - k = 12: 1.04 / sqrt(2^12) = 1.62%
//! - k = 16: 1.04 / sqrt(2^16) = 0.41%
//!
//! # Concurrency
//! A sketch has no internal synchronization. Concurrent `add`/`merge` calls on the same
//! sketch must be serialized by the caller, e.g. with a `Mutex`.

use std::fmt::{Debug, Formatter};

use tracing::{debug, trace, warn};

use crate::error::{HllError, Result};
use crate::murmur3::murmur3_hash;
use crate::registers::Registers;

/// Default Murmur3 seed
pub const DEFAULT_SEED: u32 = 314;
/// Smallest supported precision (4 registers)
pub const MIN_PRECISION: u8 = 2;
/// Largest supported precision (65536 registers)
pub const MAX_PRECISION: u8 = 16;
/// Precision used by `HyperLogLog::default()`
pub const DEFAULT_PRECISION: u8 = 12;

/// 2^32 as used by the large range correction
const TWO_32: f64 = 4_294_967_296.0;

#[derive(Clone, PartialEq, Eq)]
pub struct HyperLogLog {
    /// Number of hash bits used for register index
    precision: u8,
    /// Murmur3 seed applied to every added element
    seed: u32,
    /// Registers storing maximum observed ranks
    registers: Registers,
}

impl HyperLogLog {
    /// Create new `HyperLogLog` with `2^precision` registers and the default seed
    #[inline]
    pub fn new(precision: u8) -> Result<Self> {
        Self::with_seed(precision, DEFAULT_SEED)
    }

    /// Create new `HyperLogLog` with `2^precision` registers and given `seed`
    pub fn with_seed(precision: u8, seed: u32) -> Result<Self> {
        validate_precision(precision)?;
        let m = 1usize << precision;
        trace!(precision, seed, size = m, "creating hyperloglog");
        Ok(Self {
            precision,
            seed,
            registers: Registers::new(m),
        })
    }

    /// Reconstruct `HyperLogLog` from its `(precision, seed, registers)` snapshot
    pub fn from_registers(precision: u8, seed: u32, registers: &[u8]) -> Result<Self> {
        validate_precision(precision)?;
        let m = 1usize << precision;
        if registers.len() != m {
            debug!(
                expected = m,
                actual = registers.len(),
                "rejecting register snapshot"
            );
            return Err(HllError::RegisterCountMismatch {
                expected: m,
                actual: registers.len(),
            });
        }
        let registers = Registers::from_slice(registers).inspect_err(|e| {
            debug!(error = %e, "rejecting register snapshot");
        })?;
        Ok(Self {
            precision,
            seed,
            registers,
        })
    }

    /// Insert element into `HyperLogLog`
    #[inline]
    pub fn add<D: AsRef<[u8]> + ?Sized>(&mut self, data: &D) {
        let hash = murmur3_hash(data.as_ref(), self.seed);
        let (idx, rank) = index_and_rank(hash, self.precision);
        self.registers.update(idx, rank);
    }

    /// Return cardinality estimate
    pub fn cardinality(&self) -> f64 {
        let m = self.registers.len() as f64;
        let sum: f64 = self
            .registers
            .iter()
            .map(|rank| (-f64::from(rank)).exp2())
            .sum();
        let raw_estimate = alpha(self.registers.len()) * m * m / sum;

        if raw_estimate <= 2.5 * m {
            let zeros = self.registers.zeros();
            if zeros != 0 {
                return m * (m / zeros as f64).ln();
            }
        }

        if raw_estimate > TWO_32 / 30.0 {
            if raw_estimate >= TWO_32 {
                // every hash value is already accounted for
                return f64::INFINITY;
            }
            return -TWO_32 * (1.0 - raw_estimate / TWO_32).ln();
        }

        raw_estimate
    }

    /// Merge `rhs` into `HyperLogLog` by taking maximum of every register pair.
    ///
    /// Both sketches must have the same number of registers, otherwise
    /// `HllError::SizeMismatch` is returned and neither sketch is changed.
    ///
    /// Seeds are not required to match, but the merged estimate is only
    /// meaningful when both sketches hashed their elements with the same seed.
    /// Merging sketches with different seeds is logged as a warning.
    pub fn merge(&mut self, rhs: &HyperLogLog) -> Result<()> {
        if self.registers.len() != rhs.registers.len() {
            let err = HllError::SizeMismatch {
                expected: self.size(),
                actual: rhs.size(),
            };
            debug!(error = %err, "rejecting merge");
            return Err(err);
        }
        if self.seed != rhs.seed {
            warn!(
                lhs_seed = self.seed,
                rhs_seed = rhs.seed,
                "merging hyperloglogs built with different seeds"
            );
        }
        self.registers.merge(&rhs.registers);
        Ok(())
    }

    /// Return copy of the registers
    #[inline]
    pub fn registers(&self) -> Vec<u8> {
        self.registers.to_vec()
    }

    /// Return rank stored in register `index`, if present
    #[inline]
    pub fn register(&self, index: u32) -> Option<u8> {
        self.registers.get(index as usize)
    }

    /// Set register at zero-based `index` to `rank`.
    ///
    /// Fails with `IndexOutOfRange` when `index >= size()` and with `RankOutOfRange`
    /// when `rank > 32`; registers stay untouched in both cases.
    pub fn set_register(&mut self, index: u32, rank: u32) -> Result<()> {
        self.registers.set(index, rank).inspect_err(|e| {
            debug!(error = %e, "rejecting register update");
        })
    }

    /// Return Murmur3 hash of `data` using this sketch's seed
    #[inline]
    pub fn hash<D: AsRef<[u8]> + ?Sized>(&self, data: &D) -> u32 {
        murmur3_hash(data.as_ref(), self.seed)
    }

    /// Return Murmur3 seed
    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Return number of registers
    #[inline]
    pub fn size(&self) -> u32 {
        self.registers.len() as u32
    }

    /// Return precision
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Return whether no element has been observed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registers.zeros() == self.registers.len()
    }

    /// Reset all registers to zero, keeping precision and seed
    #[inline]
    pub fn clear(&mut self) {
        self.registers.clear();
    }

    /// Return memory size of `HyperLogLog`
    pub fn size_of(&self) -> usize {
        std::mem::size_of::<Self>() - std::mem::size_of::<Registers>() + self.registers.size_of()
    }

    /// Return borrowed registers for crate-internal serialization
    #[cfg(feature = "with_serde")]
    #[inline]
    pub(crate) fn raw_registers(&self) -> &[u8] {
        self.registers.as_slice()
    }
}

impl Default for HyperLogLog {
    fn default() -> Self {
        trace!(
            precision = DEFAULT_PRECISION,
            seed = DEFAULT_SEED,
            size = 1usize << DEFAULT_PRECISION,
            "creating hyperloglog"
        );
        Self {
            precision: DEFAULT_PRECISION,
            seed: DEFAULT_SEED,
            registers: Registers::new(1 << DEFAULT_PRECISION),
        }
    }
}

impl Debug for HyperLogLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ precision: {}, seed: {}, estimate: {:.0}, size: {} }}",
            self.precision,
            self.seed,
            self.cardinality(),
            self.size_of()
        )
    }
}

#[inline]
fn validate_precision(precision: u8) -> Result<()> {
    if (MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        Ok(())
    } else {
        debug!(precision, "rejecting precision");
        Err(HllError::InvalidPrecision { precision })
    }
}

/// Split 32-bit `hash` into register index (top `precision` bits) and rank of the remaining bits
#[inline]
pub(crate) fn index_and_rank(hash: u32, precision: u8) -> (usize, u8) {
    let idx = (hash >> (32 - u32::from(precision))) as usize;
    let tail_width = 32 - u32::from(precision);
    // shift index bits out so leading zeros are counted on the tail only
    let tail = hash << precision;
    let rank = tail.leading_zeros().min(tail_width) + 1;
    (idx, rank as u8)
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}
