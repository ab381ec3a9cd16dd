//! Undo/redo command history for animation curve editing.
//!
//! Curve edits run as commands through a [`HistoryService`], which resolves
//! the active curve at execution time, captures compressed before/after
//! snapshots and keeps a bounded, cursor-based history of them.
//!
//! ```
//! use curve_history::{CurveData, CurveDataPoint, CurveDataStore, CurveStore};
//! use curve_history::{HistoryService, SmoothCommand};
//!
//! let track = CurveData::from_points(vec![
//!     CurveDataPoint::new(1, 0.0, 0.0),
//!     CurveDataPoint::new(2, 10.0, 10.0),
//!     CurveDataPoint::new(3, 20.0, 20.0),
//! ]);
//! let mut service = HistoryService::new(CurveStore::new().with_active_curve("Track1", track.clone()));
//!
//! assert!(service.execute_command(SmoothCommand::new(3)).is_applied());
//! assert!(service.undo());
//! assert_eq!(service.store().curve_data("Track1"), Some(&track));
//! ```

pub mod config;
pub mod constants;
pub mod curve;
pub mod history;
pub mod logging;
pub mod paths;

pub use config::HistoryConfig;
pub use curve::{CurveData, CurveDataPoint, CurveDataStore, CurveStore, PointStatus};
pub use history::{
    BatchCommand, Command, CommandError, CompressedSnapshot, CurveTransform, DeletePointsCommand,
    ExecuteOutcome, HistoryAction, HistoryChanged, HistoryEntry, HistoryError, HistoryService,
    HistoryStack, InsertPointCommand, InvalidOperationError, MovePointCommand, NudgePointsCommand,
    ReplaceCurveCommand, SetPointStatusCommand, SmoothCommand, SmoothingMethod, SnapshotError,
    SubscriptionId, ValidationError,
};
