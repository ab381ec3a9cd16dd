//! Live curve storage consumed by the history core.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CurveData;

/// Source of truth for live curve data.
///
/// The history core reads and writes curves only through this trait and
/// resolves the active curve at the moment a command executes.
pub trait CurveDataStore {
    /// Name of the curve currently targeted by user interaction
    fn active_curve(&self) -> Option<&str>;

    fn set_active_curve(&mut self, name: Option<String>);

    fn curve_data(&self, name: &str) -> Option<&CurveData>;

    /// Replaces (or creates) the named curve
    fn set_curve_data(&mut self, name: &str, data: CurveData);
}

/// In-memory store holding every curve of one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveStore {
    #[serde(default)]
    curves: BTreeMap<String, CurveData>,
    #[serde(default)]
    active: Option<String>,
}

impl CurveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used when assembling a document before handing it to history
    pub fn with_curve(mut self, name: impl Into<String>, data: CurveData) -> Self {
        self.curves.insert(name.into(), data);
        self
    }

    /// Builder variant that also makes the curve active
    pub fn with_active_curve(mut self, name: impl Into<String>, data: CurveData) -> Self {
        let name = name.into();
        self.curves.insert(name.clone(), data);
        self.active = Some(name);
        self
    }

    pub fn curve_names(&self) -> Vec<&str> {
        self.curves.keys().map(String::as_str).collect()
    }

    pub fn contains_curve(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Removes a curve, clearing the active selection if it pointed there
    pub fn remove_curve(&mut self, name: &str) -> Option<CurveData> {
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        self.curves.remove(name)
    }
}

impl CurveDataStore for CurveStore {
    fn active_curve(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn set_active_curve(&mut self, name: Option<String>) {
        self.active = name;
    }

    fn curve_data(&self, name: &str) -> Option<&CurveData> {
        self.curves.get(name)
    }

    fn set_curve_data(&mut self, name: &str, data: CurveData) {
        self.curves.insert(name.to_string(), data);
    }
}
