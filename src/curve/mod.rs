//! Curve data model and the store seam the history core mutates.
//!
//! ## Module Structure
//!
//! - [`point`] - `CurveDataPoint`, `PointStatus` and the `CurveData` sequence
//! - [`store`] - `CurveDataStore` trait and the in-memory `CurveStore`

mod point;
mod store;


pub use point::{CurveData, CurveDataPoint, PointStatus};
pub use store::{CurveDataStore, CurveStore};
