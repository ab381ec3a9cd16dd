//! Undo/Redo system for curve edits.
//!
//! This module provides a command history that allows callers to undo and redo
//! edits to animation curves. Every reversible edit (smoothing, deletion,
//! insertion, nudging, status changes, ...) is executed as a [`Command`] that
//! captures compressed before/after snapshots of the curve it touched.
//!
//! ## Usage
//!
//! Construct a [`HistoryService`] around a curve store, execute commands
//! through it and bind undo/redo UI to [`HistoryService::undo`] and
//! [`HistoryService::redo`]. Subscribe to [`HistoryChanged`] to keep
//! button states and status text in sync.
//!
//! ## Module Structure
//!
//! - [`snapshot`] - CompressedSnapshot delta codec
//! - [`command`] - Command skeleton and the CurveTransform trait
//! - [`commands`] - Concrete curve edits
//! - [`filters`] - Pure smoothing filters
//! - [`history_stack`] - Cursor-based bounded HistoryStack
//! - [`service`] - HistoryService facade and change notifications
//! - [`error`] - Error types

mod command;
mod commands;
mod error;
mod filters;
mod history_stack;
mod service;
mod snapshot;


// Re-exports
pub use command::{Command, CurveTransform, ExecuteOutcome};
pub use commands::{
    BatchCommand, DeletePointsCommand, InsertPointCommand, MovePointCommand, NudgePointsCommand,
    ReplaceCurveCommand, SetPointStatusCommand, SmoothCommand,
};
pub use error::{
    CommandError, HistoryError, InvalidOperationError, SnapshotError, ValidationError,
};
pub use filters::{SmoothingMethod, median, moving_average};
pub use history_stack::{HistoryEntry, HistoryStack};
pub use service::{HistoryAction, HistoryChanged, HistoryService, SubscriptionId};
pub use snapshot::CompressedSnapshot;
