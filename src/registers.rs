//! ## Register store
//! Fixed-length array of `M` one-byte registers owned by a single `HyperLogLog`.
//!
//! Each register keeps the maximum rank observed for hashes routed to its index.
//! Ranks of a 32-bit hash lie in `[0..32]` range, so a byte per register is enough
//! and leaves the raw bytes directly usable as a serialized snapshot.

use std::fmt::{Debug, Formatter};

use crate::error::{HllError, Result};

/// Maximum meaningful rank for a 32-bit hash window
pub const MAX_RANK: u32 = 32;

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Registers {
    data: Box<[u8]>,
}

impl Registers {
    /// Create zero-filled register store of `m` registers
    #[inline]
    pub(crate) fn new(m: usize) -> Self {
        Self {
            data: vec![0u8; m].into_boxed_slice(),
        }
    }

    /// Create register store from raw ranks, validating every rank
    pub(crate) fn from_slice(ranks: &[u8]) -> Result<Self> {
        if let Some(&rank) = ranks.iter().find(|&&r| u32::from(r) > MAX_RANK) {
            return Err(HllError::RankOutOfRange {
                rank: u32::from(rank),
            });
        }
        Ok(Self {
            data: ranks.into(),
        })
    }

    /// Return number of registers
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// Return register `idx`, if present
    #[inline]
    pub(crate) fn get(&self, idx: usize) -> Option<u8> {
        self.data.get(idx).copied()
    }

    /// Raise register `idx` to `rank` if it is currently lower.
    /// Returns whether register was updated.
    #[inline]
    pub(crate) fn update(&mut self, idx: usize, rank: u8) -> bool {
        let register = &mut self.data[idx];
        if rank > *register {
            *register = rank;
            true
        } else {
            false
        }
    }

    /// Overwrite register `idx` with `rank` after validating both
    pub(crate) fn set(&mut self, idx: u32, rank: u32) -> Result<()> {
        let size = self.data.len() as u32;
        if idx >= size {
            return Err(HllError::IndexOutOfRange { index: idx, size });
        }
        if rank > MAX_RANK {
            return Err(HllError::RankOutOfRange { rank });
        }
        self.data[idx as usize] = rank as u8;
        Ok(())
    }

    /// Raise every register to the matching register of `rhs`.
    /// Caller must ensure both stores have the same length.
    #[inline]
    pub(crate) fn merge(&mut self, rhs: &Registers) {
        debug_assert_eq!(self.data.len(), rhs.data.len());
        self.data
            .iter_mut()
            .zip(rhs.data.iter())
            .for_each(|(lhs, &rhs)| *lhs = (*lhs).max(rhs));
    }

    /// Return number of registers still set to zero
    #[inline]
    pub(crate) fn zeros(&self) -> usize {
        self.data.iter().filter(|&&r| r == 0).count()
    }

    /// Return iterator over register ranks
    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.iter().copied()
    }

    /// Return borrowed view of registers for crate-internal readers
    #[cfg(feature = "with_serde")]
    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Return independent copy of registers
    #[inline]
    pub(crate) fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    /// Reset every register to zero
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Return memory size of register store
    #[inline]
    pub(crate) fn size_of(&self) -> usize {
        std::mem::size_of::<Self>() + self.data.len()
    }
}

impl Debug for Registers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ len: {}, zeros: {} }}", self.len(), self.zeros())
    }
}
