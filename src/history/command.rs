//! The reversible command skeleton shared by every curve edit.
//!
//! Concrete edits only implement [`CurveTransform`], a pure function from the
//! target curve's current points to its new points. [`Command`] owns
//! everything else: resolving the active curve when it executes, capturing
//! before/after snapshots, writing the store and replaying snapshots on
//! undo/redo. A transform has no way to name its own target curve.

use std::fmt;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::curve::{CurveData, CurveDataStore};

use super::error::{CommandError, HistoryError};
use super::snapshot::CompressedSnapshot;

/// Pure transformation applied to the target curve of a [`Command`]
pub trait CurveTransform: fmt::Debug {
    /// Label shown in history lists and status messages
    fn description(&self) -> String;

    /// Compute the new points from the current ones.
    ///
    /// Must be deterministic in `data` and the transform's own parameters.
    fn apply(&self, data: &CurveData) -> Result<CurveData, CommandError>;
}

/// Result of [`Command::execute`]
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteOutcome {
    /// The store was updated and the command can be recorded
    Applied,
    /// The transform produced identical data; nothing was written
    Unchanged,
    /// The command could not run; nothing was written
    Rejected(CommandError),
}

impl ExecuteOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ExecuteOutcome::Applied)
    }
}

/// State captured by a successful execution
#[derive(Debug, Clone)]
struct CapturedState {
    target: String,
    old: CompressedSnapshot,
    new: CompressedSnapshot,
    executed_at: DateTime<Local>,
}

/// One reversible edit of curve data
#[derive(Debug)]
pub struct Command {
    transform: Box<dyn CurveTransform>,
    captured: Option<CapturedState>,
}

impl Command {
    pub fn new(transform: impl CurveTransform + 'static) -> Self {
        Self {
            transform: Box::new(transform),
            captured: None,
        }
    }

    pub fn from_boxed(transform: Box<dyn CurveTransform>) -> Self {
        Self {
            transform,
            captured: None,
        }
    }

    pub fn description(&self) -> String {
        self.transform.description()
    }

    /// Curve this command was applied to, known only after execution
    pub fn target_curve(&self) -> Option<&str> {
        self.captured.as_ref().map(|c| c.target.as_str())
    }

    pub fn executed_at(&self) -> Option<DateTime<Local>> {
        self.captured.as_ref().map(|c| c.executed_at)
    }

    pub fn is_executed(&self) -> bool {
        self.captured.is_some()
    }

    /// Memory held by the captured snapshots
    pub fn size_bytes(&self) -> usize {
        self.captured
            .as_ref()
            .map_or(0, |c| c.old.size_bytes() + c.new.size_bytes() + c.target.len())
    }

    /// Run the command against whatever curve is active right now.
    ///
    /// Only an [`ExecuteOutcome::Applied`] result touches the store.
    pub fn execute(&mut self, store: &mut dyn CurveDataStore) -> ExecuteOutcome {
        match self.try_execute(store) {
            Ok(true) => ExecuteOutcome::Applied,
            Ok(false) => {
                debug!("'{}' left the curve unchanged", self.description());
                ExecuteOutcome::Unchanged
            }
            Err(err) => {
                warn!("'{}' rejected: {}", self.description(), err);
                ExecuteOutcome::Rejected(err)
            }
        }
    }

    fn try_execute(&mut self, store: &mut dyn CurveDataStore) -> Result<bool, CommandError> {
        if self.captured.is_some() {
            return Err(CommandError::AlreadyExecuted);
        }

        let target = store
            .active_curve()
            .ok_or(CommandError::NoActiveCurve)?
            .to_string();
        let current = store
            .curve_data(&target)
            .ok_or_else(|| CommandError::UnknownCurve(target.clone()))?;

        let old = CompressedSnapshot::encode(current)?;
        let updated = self.transform.apply(current)?;
        if updated.bit_eq(current) {
            return Ok(false);
        }
        let new = CompressedSnapshot::encode(&updated)?;

        debug!(
            "'{}' on '{}': {} -> {} points, snapshots {}+{} bytes",
            self.transform.description(),
            target,
            old.point_count(),
            new.point_count(),
            old.size_bytes(),
            new.size_bytes()
        );

        store.set_curve_data(&target, updated);
        self.captured = Some(CapturedState {
            target,
            old,
            new,
            executed_at: Local::now(),
        });
        Ok(true)
    }

    /// Restore the curve as it was before execution
    pub fn undo(&self, store: &mut dyn CurveDataStore) -> Result<(), HistoryError> {
        let captured = self.captured()?;
        store.set_curve_data(&captured.target, captured.old.decode()?);
        Ok(())
    }

    /// Replay the result of execution without recomputing it
    pub fn redo(&self, store: &mut dyn CurveDataStore) -> Result<(), HistoryError> {
        let captured = self.captured()?;
        store.set_curve_data(&captured.target, captured.new.decode()?);
        Ok(())
    }

    fn captured(&self) -> Result<&CapturedState, HistoryError> {
        self.captured.as_ref().ok_or_else(|| HistoryError::NotExecuted {
            description: self.description(),
        })
    }
}

impl<T: CurveTransform + 'static> From<T> for Command {
    fn from(transform: T) -> Self {
        Command::new(transform)
    }
}
