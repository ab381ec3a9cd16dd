//! Error types for snapshots, commands and the history stack.

use thiserror::Error;

/// Malformed curve data handed to the snapshot encoder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("frame {frame} appears more than once in the curve")]
    DuplicateFrame { frame: i32 },
}

/// A snapshot buffer that cannot be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("snapshot buffer ended unexpectedly")]
    Truncated,
    #[error("unknown point status tag {0}")]
    UnknownStatus(u8),
    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u8),
    #[error("snapshot buffer has trailing bytes")]
    TrailingBytes,
    #[error("varint overflows 64 bits")]
    VarintOverflow,
    #[error("frame value {0} is out of range")]
    FrameOutOfRange(i64),
    #[error("invalid float header byte {0:#04x}")]
    InvalidFloatHeader(u8),
    #[error("status runs do not cover the point count")]
    InvalidStatusRun,
}

/// Undo or redo requested while the stack cannot move in that direction
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOperationError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Why a command refused to execute. The store is untouched in every case.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("no active curve")]
    NoActiveCurve,
    #[error("curve '{0}' does not exist")]
    UnknownCurve(String),
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("no point at frame {frame}")]
    PointNotFound { frame: i32 },
    #[error("a point already exists at frame {frame}")]
    DuplicateFrame { frame: i32 },
    #[error("point at frame {frame} has a non-finite coordinate")]
    NonFiniteValue { frame: i32 },
    #[error("command has already been executed")]
    AlreadyExecuted,
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::Snapshot(SnapshotError::Validation(err))
    }
}

/// Errors raised while moving through history
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    #[error(transparent)]
    InvalidOperation(#[from] InvalidOperationError),
    /// Undo/redo on a command that never executed successfully
    #[error("command '{description}' has no captured state")]
    NotExecuted { description: String },
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
