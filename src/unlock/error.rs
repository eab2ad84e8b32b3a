use crate::adb::AdbError;
use std::fmt;
use thiserror::Error;

pub type UnlockResult<T> = Result<T, UnlockError>;

/// Why the flow gave up. Every terminal failure has already pressed POWER.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The notification layer was still up after the full swipe budget
    LayerNotDismissed,
    /// The keyguard showed its wrong-credential message
    WrongCredential,
    /// Every unlock attempt came back without unlocking
    RetriesExhausted,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureReason::LayerNotDismissed => "could not dismiss the lock screen layer",
            FailureReason::WrongCredential => "wrong credential",
            FailureReason::RetriesExhausted => "unlock attempts exhausted",
        })
    }
}

#[derive(Debug, Error)]
pub enum UnlockError {
    #[error("Credential must have at least 4 elements, got {len}")]
    InvalidCredential { len: usize },

    #[error("Pattern cell {cell} is not on the {grid_size}x{grid_size} grid")]
    InvalidPatternCell { cell: String, grid_size: u32 },

    #[error("Pattern grid size must be between 2 and 9, got {grid_size}")]
    InvalidPatternSize { grid_size: u32 },

    #[error("Unlock failed: {reason}")]
    Terminal { reason: FailureReason },

    #[error("Device probe failed: {0}")]
    Probe(#[from] AdbError),
}

impl UnlockError {
    /// Terminal failures end the automation run; the caller should shut down.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UnlockError::Terminal { .. })
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            UnlockError::Terminal { reason } => Some(*reason),
            _ => None,
        }
    }
}
