use thiserror::Error;

/// Errors returned by `HyperLogLog` operations.
///
/// All validation happens before any register is touched, so a rejected call
/// leaves the sketch unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HllError {
    #[error("precision must be in [2, 16] range, got {precision}")]
    InvalidPrecision { precision: u8 },
    #[error("sketches must have the same number of registers: expected {expected}, got {actual}")]
    SizeMismatch { expected: u32, actual: u32 },
    #[error("register index {index} is out of range for {size} registers")]
    IndexOutOfRange { index: u32, size: u32 },
    #[error("rank {rank} is greater than the maximum possible rank 32")]
    RankOutOfRange { rank: u32 },
    #[error("expected {expected} register values, got {actual}")]
    RegisterCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, HllError>;
