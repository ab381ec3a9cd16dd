//! Pure smoothing filters over coordinate sequences.
//!
//! Windows are centred: each value is filtered over `window / 2` neighbours
//! on either side, so an even window behaves like the next odd size (2 and 3
//! both cover three points). Near the ends the neighbourhood is clipped, and a
//! window wider than the sequence covers every value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMethod {
    #[default]
    MovingAverage,
    Median,
}

impl SmoothingMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            SmoothingMethod::MovingAverage => "Smooth",
            SmoothingMethod::Median => "Median filter",
        }
    }

    pub fn apply(&self, values: &[f64], window: usize) -> Vec<f64> {
        match self {
            SmoothingMethod::MovingAverage => moving_average(values, window),
            SmoothingMethod::Median => median(values, window),
        }
    }
}

/// Bounds of the centred window around `index`, clipped at both ends
fn window_bounds(len: usize, index: usize, window: usize) -> (usize, usize) {
    let half = window / 2;
    (index.saturating_sub(half), index.saturating_add(half).min(len - 1))
}

/// Centred moving average; the window shrinks at the ends of the sequence.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let (lo, hi) = window_bounds(values.len(), i, window);
            let neighbourhood = &values[lo..=hi];
            neighbourhood.iter().sum::<f64>() / neighbourhood.len() as f64
        })
        .collect()
}

/// Centred running median; even-sized neighbourhoods average the two middle values.
pub fn median(values: &[f64], window: usize) -> Vec<f64> {
    // the neighbourhood never exceeds the input, whatever the window
    let mut scratch = Vec::with_capacity(window.min(values.len()).saturating_add(1));
    (0..values.len())
        .map(|i| {
            let (lo, hi) = window_bounds(values.len(), i, window);
            scratch.clear();
            scratch.extend_from_slice(&values[lo..=hi]);
            scratch.sort_by(f64::total_cmp);
            let mid = scratch.len() / 2;
            if scratch.len() % 2 == 0 {
                (scratch[mid - 1] + scratch[mid]) / 2.0
            } else {
                scratch[mid]
            }
        })
        .collect()
}
