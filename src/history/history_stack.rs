//! Bounded command history with a cursor.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::config::HistoryConfig;
use crate::constants::DEFAULT_MAX_HISTORY_SIZE;
use crate::curve::CurveDataStore;

use super::command::Command;
use super::error::{HistoryError, InvalidOperationError};

/// Ordered executed commands plus the number currently applied.
///
/// Commands below the cursor are applied, the rest are redoable. Appending
/// while redoable commands exist discards them first.
#[derive(Debug)]
pub struct HistoryStack {
    commands: VecDeque<Command>,
    cursor: usize,
    max_size: usize,
    max_memory_bytes: Option<usize>,
}

/// One row of the history list
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub index: usize,
    pub description: String,
    pub target_curve: Option<String>,
    /// Applied and not undone
    pub applied: bool,
    /// The most recently applied command (next undo target)
    pub is_current: bool,
    pub executed_at: Option<DateTime<Local>>,
    pub size_bytes: usize,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_current { "> " } else { "  " };
        write!(f, "{}{}", marker, self.description)?;
        if !self.applied {
            write!(f, " (undone)")?;
        }
        Ok(())
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_SIZE)
    }
}

impl HistoryStack {
    /// A `max_size` of zero is treated as one
    pub fn new(max_size: usize) -> Self {
        Self {
            commands: VecDeque::new(),
            cursor: 0,
            max_size: max_size.max(1),
            max_memory_bytes: None,
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.max_history_size).with_memory_budget(config.max_memory_bytes)
    }

    pub fn with_memory_budget(mut self, max_bytes: Option<usize>) -> Self {
        self.max_memory_bytes = max_bytes;
        self
    }

    /// Record an executed command, discarding the redo branch.
    ///
    /// Returns how many old commands were evicted to stay within bounds.
    pub fn append(&mut self, command: Command) -> Result<usize, HistoryError> {
        if !command.is_executed() {
            return Err(HistoryError::NotExecuted {
                description: command.description(),
            });
        }

        let abandoned = self.commands.len() - self.cursor;
        if abandoned > 0 {
            debug!("Discarding {} redoable command(s)", abandoned);
            self.commands.truncate(self.cursor);
        }

        self.commands.push_back(command);
        self.cursor += 1;

        let mut evicted = 0;
        while self.commands.len() > self.max_size || self.over_memory_budget() {
            self.evict_oldest();
            evicted += 1;
        }
        Ok(evicted)
    }

    fn over_memory_budget(&self) -> bool {
        // The newest command is always kept, whatever its size
        self.commands.len() > 1
            && self
                .max_memory_bytes
                .is_some_and(|budget| self.total_size_bytes() > budget)
    }

    fn evict_oldest(&mut self) {
        if let Some(command) = self.commands.pop_front() {
            debug!(
                "Evicting oldest command '{}' ({} bytes)",
                command.description(),
                command.size_bytes()
            );
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    /// Undo the most recently applied command.
    ///
    /// The cursor only moves if the command restored its state.
    pub fn undo(&mut self, store: &mut dyn CurveDataStore) -> Result<&Command, HistoryError> {
        if !self.can_undo() {
            return Err(InvalidOperationError::NothingToUndo.into());
        }
        let index = self.cursor - 1;
        self.commands[index].undo(store)?;
        self.cursor = index;
        debug!("Undo '{}' ({}/{})", self.commands[index].description(), self.cursor, self.len());
        Ok(&self.commands[index])
    }

    /// Redo the next undone command
    pub fn redo(&mut self, store: &mut dyn CurveDataStore) -> Result<&Command, HistoryError> {
        if !self.can_redo() {
            return Err(InvalidOperationError::NothingToRedo.into());
        }
        let index = self.cursor;
        self.commands[index].redo(store)?;
        self.cursor = index + 1;
        debug!("Redo '{}' ({}/{})", self.commands[index].description(), self.cursor, self.len());
        Ok(&self.commands[index])
    }

    /// Drop every command and its snapshots
    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands currently applied
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn max_memory_bytes(&self) -> Option<usize> {
        self.max_memory_bytes
    }

    /// Shrink or grow the bound, evicting immediately if needed.
    ///
    /// Applied commands are evicted oldest first. Once none is left, the
    /// newest redoable commands go instead so every remaining redo still
    /// replays on top of the state it was recorded against.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size.max(1);
        while self.commands.len() > self.max_size {
            if self.cursor > 0 {
                self.evict_oldest();
            } else if let Some(command) = self.commands.pop_back() {
                debug!("Dropping redoable command '{}'", command.description());
            }
        }
    }

    pub fn set_max_memory_bytes(&mut self, max_bytes: Option<usize>) {
        self.max_memory_bytes = max_bytes;
        while self.cursor > 0 && self.over_memory_budget() {
            self.evict_oldest();
        }
    }

    pub fn total_size_bytes(&self) -> usize {
        self.commands.iter().map(Command::size_bytes).sum()
    }

    pub fn command_at(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn undo_description(&self) -> Option<String> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.commands.get(i))
            .map(Command::description)
    }

    pub fn redo_description(&self) -> Option<String> {
        self.commands.get(self.cursor).map(Command::description)
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.commands
            .iter()
            .enumerate()
            .map(|(index, command)| HistoryEntry {
                index,
                description: command.description(),
                target_curve: command.target_curve().map(str::to_string),
                applied: index < self.cursor,
                is_current: index + 1 == self.cursor,
                executed_at: command.executed_at(),
                size_bytes: command.size_bytes(),
            })
            .collect()
    }

    /// Descriptions with `> ` on the current entry and `(undone)` on redoable ones
    pub fn history_summary(&self) -> Vec<String> {
        self.entries().iter().map(ToString::to_string).collect()
    }
}
