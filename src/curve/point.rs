//! Keyframe points and the ordered per-curve sequence.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::history::ValidationError;

/// Tracking/keyframe status of a single point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PointStatus {
    #[default]
    Normal,
    Keyframe,
    /// Generated between two tracked points
    Interpolated,
    /// Last point of a tracked segment
    Endframe,
}

impl PointStatus {
    pub fn all() -> &'static [PointStatus] {
        &[
            PointStatus::Normal,
            PointStatus::Keyframe,
            PointStatus::Interpolated,
            PointStatus::Endframe,
        ]
    }

    /// Stable byte tag used by the snapshot codec
    pub fn as_byte(self) -> u8 {
        match self {
            PointStatus::Normal => 0,
            PointStatus::Keyframe => 1,
            PointStatus::Interpolated => 2,
            PointStatus::Endframe => 3,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(PointStatus::Normal),
            1 => Some(PointStatus::Keyframe),
            2 => Some(PointStatus::Interpolated),
            3 => Some(PointStatus::Endframe),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PointStatus::Normal => "normal",
            PointStatus::Keyframe => "keyframe",
            PointStatus::Interpolated => "interpolated",
            PointStatus::Endframe => "endframe",
        }
    }
}

/// One keyframe of a curve. Identity within a curve is the frame number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveDataPoint {
    pub frame: i32,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub status: PointStatus,
}

impl CurveDataPoint {
    pub fn new(frame: i32, x: f64, y: f64) -> Self {
        Self {
            frame,
            x,
            y,
            status: PointStatus::Normal,
        }
    }

    pub fn with_status(mut self, status: PointStatus) -> Self {
        self.status = status;
        self
    }

    /// Bitwise equality, so NaN payloads and signed zeros compare exactly
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.frame == other.frame
            && self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.status == other.status
    }
}

impl From<(i32, f64, f64)> for CurveDataPoint {
    fn from((frame, x, y): (i32, f64, f64)) -> Self {
        Self::new(frame, x, y)
    }
}

impl From<(i32, f64, f64, PointStatus)> for CurveDataPoint {
    fn from((frame, x, y, status): (i32, f64, f64, PointStatus)) -> Self {
        Self { frame, x, y, status }
    }
}

/// Ordered points of one named curve.
///
/// Order is insertion order, not frame order. Frames are expected to be
/// unique; [`CurveData::validate`] checks it, nothing else enforces it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveData {
    points: Vec<CurveDataPoint>,
}

impl CurveData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<CurveDataPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[CurveDataPoint] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [CurveDataPoint] {
        &mut self.points
    }

    pub fn into_points(self) -> Vec<CurveDataPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CurveDataPoint> {
        self.points.iter()
    }

    pub fn push(&mut self, point: CurveDataPoint) {
        self.points.push(point);
    }

    /// Position of the point with `frame` in sequence order
    pub fn index_of(&self, frame: i32) -> Option<usize> {
        self.points.iter().position(|p| p.frame == frame)
    }

    pub fn get(&self, frame: i32) -> Option<&CurveDataPoint> {
        self.points.iter().find(|p| p.frame == frame)
    }

    pub fn contains_frame(&self, frame: i32) -> bool {
        self.index_of(frame).is_some()
    }

    /// Keeps only the points for which `keep` returns true
    pub fn retain(&mut self, keep: impl FnMut(&CurveDataPoint) -> bool) {
        self.points.retain(keep);
    }

    /// Sequence indices ordered by frame number
    pub fn frame_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.points.len()).collect();
        order.sort_by_key(|&i| self.points[i].frame);
        order
    }

    /// Rejects curves containing the same frame twice.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(self.points.len());
        for point in &self.points {
            if !seen.insert(point.frame) {
                return Err(ValidationError::DuplicateFrame { frame: point.frame });
            }
        }
        Ok(())
    }

    /// Bitwise equality over every field of every point, in order
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.bit_eq(b))
    }
}

impl FromIterator<CurveDataPoint> for CurveData {
    fn from_iter<I: IntoIterator<Item = CurveDataPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<CurveDataPoint>> for CurveData {
    fn from(points: Vec<CurveDataPoint>) -> Self {
        Self { points }
    }
}

impl<'a> IntoIterator for &'a CurveData {
    type Item = &'a CurveDataPoint;
    type IntoIter = std::slice::Iter<'a, CurveDataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
