//! Facade that owns one document's store and history.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::config::HistoryConfig;
use crate::curve::{CurveDataStore, CurveStore};

use super::command::{Command, ExecuteOutcome};
use super::error::HistoryError;
use super::history_stack::{HistoryEntry, HistoryStack};

/// What changed in a [`HistoryChanged`] notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Executed,
    Undone,
    Redone,
    Cleared,
}

/// Sent to subscribers after every successful history transition
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryChanged {
    pub action: HistoryAction,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Description of the command the action touched, if any
    pub description: Option<String>,
    /// Description of the next undo target
    pub undo_description: Option<String>,
    pub position: usize,
    pub len: usize,
}

/// Handle returned by [`HistoryService::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&HistoryChanged)>;

/// Single entry point for executing, undoing and redoing curve edits.
///
/// The live store is only handed out by shared reference, so curve data can
/// change only through commands executed here.
pub struct HistoryService<S: CurveDataStore = CurveStore> {
    store: S,
    stack: HistoryStack,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<S: CurveDataStore> HistoryService<S> {
    pub fn new(store: S) -> Self {
        Self::with_stack(store, HistoryStack::default())
    }

    pub fn with_config(store: S, config: &HistoryConfig) -> Self {
        Self::with_stack(store, HistoryStack::from_config(config))
    }

    pub fn with_stack(store: S, stack: HistoryStack) -> Self {
        Self {
            store,
            stack,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stack(&self) -> &HistoryStack {
        &self.stack
    }

    /// Change the curve future commands target. History is untouched.
    pub fn set_active_curve(&mut self, name: Option<&str>) {
        self.store.set_active_curve(name.map(str::to_string));
    }

    /// Swap in a new document, returning the previous one. History is cleared.
    pub fn load_document(&mut self, store: S) -> S {
        let previous = std::mem::replace(&mut self.store, store);
        info!("Loaded new document, clearing {} history entries", self.stack.len());
        self.clear_history();
        previous
    }

    /// Execute a command and record it if it changed the store
    pub fn execute_command(&mut self, command: impl Into<Command>) -> ExecuteOutcome {
        let mut command = command.into();
        let outcome = command.execute(&mut self.store);
        if !outcome.is_applied() {
            return outcome;
        }

        let description = command.description();
        match self.stack.append(command) {
            Ok(evicted) if evicted > 0 => {
                debug!("History full, evicted {} command(s)", evicted);
            }
            Ok(_) => {}
            Err(err) => {
                error!("Executed command could not be recorded: {}", err);
                return outcome;
            }
        }
        self.notify(HistoryAction::Executed, Some(description));
        outcome
    }

    /// Undo if possible. Returns whether anything was undone.
    pub fn undo(&mut self) -> bool {
        if !self.stack.can_undo() {
            debug!("Undo requested with nothing to undo");
            return false;
        }
        let result = self
            .stack
            .undo(&mut self.store)
            .map(Command::description);
        self.finish_transition(HistoryAction::Undone, result)
    }

    /// Redo if possible. Returns whether anything was redone.
    pub fn redo(&mut self) -> bool {
        if !self.stack.can_redo() {
            debug!("Redo requested with nothing to redo");
            return false;
        }
        let result = self
            .stack
            .redo(&mut self.store)
            .map(Command::description);
        self.finish_transition(HistoryAction::Redone, result)
    }

    fn finish_transition(
        &mut self,
        action: HistoryAction,
        result: Result<String, HistoryError>,
    ) -> bool {
        match result {
            Ok(description) => {
                self.notify(action, Some(description));
                true
            }
            Err(HistoryError::InvalidOperation(err)) => {
                warn!("{:?} ignored: {}", action, err);
                false
            }
            Err(err) => {
                error!("{:?} failed, history left unchanged: {}", action, err);
                false
            }
        }
    }

    pub fn clear_history(&mut self) {
        self.stack.clear();
        self.notify(HistoryAction::Cleared, None);
    }

    pub fn can_undo(&self) -> bool {
        self.stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.stack.can_redo()
    }

    pub fn history_summary(&self) -> Vec<String> {
        self.stack.history_summary()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.stack.entries()
    }

    /// Register a callback invoked synchronously after every change
    pub fn subscribe(&mut self, observer: impl FnMut(&HistoryChanged) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn notify(&mut self, action: HistoryAction, description: Option<String>) {
        if self.observers.is_empty() {
            return;
        }
        let event = HistoryChanged {
            action,
            can_undo: self.stack.can_undo(),
            can_redo: self.stack.can_redo(),
            description,
            undo_description: self.stack.undo_description(),
            position: self.stack.position(),
            len: self.stack.len(),
        };
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }
}

impl<S: CurveDataStore + Default> Default for HistoryService<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: CurveDataStore + fmt::Debug> fmt::Debug for HistoryService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryService")
            .field("store", &self.store)
            .field("stack", &self.stack)
            .field("observers", &self.observers.len())
            .finish()
    }
}
