//! Concrete curve edits.
//!
//! Each type here is a [`CurveTransform`]: parameters are fixed at
//! construction, the target curve is supplied by [`Command`] at execution.
//!
//! [`Command`]: super::Command

use std::collections::BTreeSet;

use crate::config::HistoryConfig;
use crate::constants::DEFAULT_SMOOTHING_WINDOW;
use crate::curve::{CurveData, CurveDataPoint, PointStatus};

use super::command::CurveTransform;
use super::error::CommandError;
use super::filters::SmoothingMethod;

/// Fails with `PointNotFound` for the first frame missing from `data`
fn require_frames(data: &CurveData, frames: &[i32]) -> Result<(), CommandError> {
    match frames.iter().find(|&&frame| !data.contains_frame(frame)) {
        Some(&frame) => Err(CommandError::PointNotFound { frame }),
        None => Ok(()),
    }
}

fn require_non_empty(frames: &[i32]) -> Result<(), CommandError> {
    if frames.is_empty() {
        return Err(CommandError::InvalidParameter {
            name: "frames",
            reason: "at least one frame is required".to_string(),
        });
    }
    Ok(())
}

fn require_finite(name: &'static str, value: f64) -> Result<(), CommandError> {
    if !value.is_finite() {
        return Err(CommandError::InvalidParameter {
            name,
            reason: format!("{} is not a finite number", value),
        });
    }
    Ok(())
}

fn point_count_label(frames: &[i32]) -> String {
    match frames {
        [frame] => format!("point (frame {})", frame),
        _ => format!("{} points", frames.len()),
    }
}

/// Smooth point positions with a centred window filter
///
/// An even `window` rounds up to the next odd size; see [`super::filters`].
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothCommand {
    pub window: usize,
    pub method: SmoothingMethod,
    /// Restrict which points move; every point still feeds the filter
    pub frames: Option<Vec<i32>>,
}

impl SmoothCommand {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            method: SmoothingMethod::MovingAverage,
            frames: None,
        }
    }

    /// Smoothing with the configured default window
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.default_smoothing_window)
    }

    pub fn with_method(mut self, method: SmoothingMethod) -> Self {
        self.method = method;
        self
    }

    pub fn only_frames(mut self, frames: Vec<i32>) -> Self {
        self.frames = Some(frames);
        self
    }
}

impl Default for SmoothCommand {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_WINDOW)
    }
}

impl CurveTransform for SmoothCommand {
    fn description(&self) -> String {
        format!("{} curve (window={})", self.method.display_name(), self.window)
    }

    fn apply(&self, data: &CurveData) -> Result<CurveData, CommandError> {
        if self.window == 0 {
            return Err(CommandError::InvalidParameter {
                name: "window",
                reason: "window must be at least 1".to_string(),
            });
        }
        if let Some(frames) = &self.frames {
            require_non_empty(frames)?;
            require_frames(data, frames)?;
        }
        if let Some(point) = data.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(CommandError::NonFiniteValue { frame: point.frame });
        }

        let selected: Option<BTreeSet<i32>> =
            self.frames.as_ref().map(|f| f.iter().copied().collect());

        let order = data.frame_order();
        let xs: Vec<f64> = order.iter().map(|&i| data.points()[i].x).collect();
        let ys: Vec<f64> = order.iter().map(|&i| data.points()[i].y).collect();
        let smoothed_x = self.method.apply(&xs, self.window);
        let smoothed_y = self.method.apply(&ys, self.window);

        let mut result = data.clone();
        let points = result.points_mut();
        for (rank, &index) in order.iter().enumerate() {
            let point = &mut points[index];
            if selected.as_ref().is_some_and(|s| !s.contains(&point.frame)) {
                continue;
            }
            point.x = smoothed_x[rank];
            point.y = smoothed_y[rank];
        }
        Ok(result)
    }
}

/// Remove points by frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePointsCommand {
    pub frames: Vec<i32>,
}

impl DeletePointsCommand {
    pub fn new(frames: Vec<i32>) -> Self {
        Self { frames }
    }

    pub fn single(frame: i32) -> Self {
        Self::new(vec![frame])
    }
}

impl CurveTransform for DeletePointsCommand {
    fn description(&self) -> String {
        format!("Delete {}", point_count_label(&self.frames))
    }

    fn apply(&self, data: &CurveData) -> Result<CurveData, CommandError> {
        require_non_empty(&self.frames)?;
        require_frames(data, &self.frames)?;
        let doomed: BTreeSet<i32> = self.frames.iter().copied().collect();
        let mut result = data.clone();
        result.retain(|p| !doomed.contains(&p.frame));
        Ok(result)
    }
}

/// Append a new point at a frame that has none yet
#[derive(Debug, Clone, PartialEq)]
pub struct InsertPointCommand {
    pub point: CurveDataPoint,
}

impl InsertPointCommand {
    pub fn new(point: CurveDataPoint) -> Self {
        Self { point }
    }
}

impl CurveTransform for InsertPointCommand {
    fn description(&self) -> String {
        format!("Insert point (frame {})", self.point.frame)
    }

    fn apply(&self, data: &CurveData) -> Result<CurveData, CommandError> {
        require_finite("x", self.point.x)?;
        require_finite("y", self.point.y)?;
        if data.contains_frame(self.point.frame) {
            return Err(CommandError::DuplicateFrame {
                frame: self.point.frame,
            });
        }
        let mut result = data.clone();
        result.push(self.point);
        Ok(result)
    }
}

/// Offset points by a fixed delta
#[derive(Debug, Clone, PartialEq)]
pub struct NudgePointsCommand {
    pub frames: Vec<i32>,
    pub dx: f64,
    pub dy: f64,
}

impl NudgePointsCommand {
    pub fn new(frames: Vec<i32>, dx: f64, dy: f64) -> Self {
        Self { frames, dx, dy }
    }
}

impl CurveTransform for NudgePointsCommand {
    fn description(&self) -> String {
        format!(
            "Nudge {} by ({}, {})",
            point_count_label(&self.frames),
            self.dx,
            self.dy
        )
    }

    fn apply(&self, data: &CurveData) -> Result<CurveData, CommandError> {
        require_non_empty(&self.frames)?;
        require_finite("dx", self.dx)?;
        require_finite("dy", self.dy)?;
        require_frames(data, &self.frames)?;

        let targets: BTreeSet<i32> = self.frames.iter().copied().collect();
        let mut result = data.clone();
        for point in result.points_mut() {
            if targets.contains(&point.frame) {
                point.x += self.dx;
                point.y += self.dy;
                if !point.x.is_finite() || !point.y.is_finite() {
                    return Err(CommandError::NonFiniteValue { frame: point.frame });
                }
            }
        }
        Ok(result)
    }
}

/// Place one point at an absolute position (end of a drag)
#[derive(Debug, Clone, PartialEq)]
pub struct MovePointCommand {
    pub frame: i32,
    pub x: f64,
    pub y: f64,
}

impl MovePointCommand {
    pub fn new(frame: i32, x: f64, y: f64) -> Self {
        Self { frame, x, y }
    }
}

impl CurveTransform for MovePointCommand {
    fn description(&self) -> String {
        format!("Move point (frame {})", self.frame)
    }

    fn apply(&self, data: &CurveData) -> Result<CurveData, CommandError> {
        require_finite("x", self.x)?;
        require_finite("y", self.y)?;
        let index = data
            .index_of(self.frame)
            .ok_or(CommandError::PointNotFound { frame: self.frame })?;
        let mut result = data.clone();
        let point = &mut result.points_mut()[index];
        point.x = self.x;
        point.y = self.y;
        Ok(result)
    }
}

/// Change the status of points, e.g. marking an endframe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetPointStatusCommand {
    pub frames: Vec<i32>,
    pub status: PointStatus,
}

impl SetPointStatusCommand {
    pub fn new(frames: Vec<i32>, status: PointStatus) -> Self {
        Self { frames, status }
    }
}

impl CurveTransform for SetPointStatusCommand {
    fn description(&self) -> String {
        format!(
            "Set {} to {}",
            point_count_label(&self.frames),
            self.status.display_name()
        )
    }

    fn apply(&self, data: &CurveData) -> Result<CurveData, CommandError> {
        require_non_empty(&self.frames)?;
        require_frames(data, &self.frames)?;
        let targets: BTreeSet<i32> = self.frames.iter().copied().collect();
        let mut result = data.clone();
        for point in result.points_mut() {
            if targets.contains(&point.frame) {
                point.status = self.status;
            }
        }
        Ok(result)
    }
}

/// Replace the whole curve, e.g. after a paste or an import
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceCurveCommand {
    pub data: CurveData,
    pub label: String,
}

impl ReplaceCurveCommand {
    pub fn new(data: CurveData) -> Self {
        Self {
            data,
            label: "Replace curve data".to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl CurveTransform for ReplaceCurveCommand {
    fn description(&self) -> String {
        self.label.clone()
    }

    fn apply(&self, _data: &CurveData) -> Result<CurveData, CommandError> {
        self.data.validate()?;
        Ok(self.data.clone())
    }
}

/// Several transforms recorded as one history entry
#[derive(Debug)]
pub struct BatchCommand {
    pub label: String,
    steps: Vec<Box<dyn CurveTransform>>,
}

impl BatchCommand {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            steps: Vec::new(),
        }
    }

    pub fn then(mut self, step: impl CurveTransform + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl CurveTransform for BatchCommand {
    fn description(&self) -> String {
        self.label.clone()
    }

    fn apply(&self, data: &CurveData) -> Result<CurveData, CommandError> {
        if self.steps.is_empty() {
            return Err(CommandError::InvalidParameter {
                name: "steps",
                reason: "batch has no steps".to_string(),
            });
        }
        let mut current = data.clone();
        for step in &self.steps {
            current = step.apply(&current)?;
        }
        Ok(current)
    }
}
