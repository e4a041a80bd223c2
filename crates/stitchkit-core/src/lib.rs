//! # StitchKit Core
//!
//! Core types and utilities shared by the StitchKit crates.
//! Provides the planar data model (points, bezier nodes, sampled points),
//! unit conversion, and the error taxonomy used across the workspace.

pub mod data;
pub mod error;
pub mod units;

pub use data::{Node, Point, SampledPoint};
pub use error::{DocumentError, Error, GeometryError, Result};
pub use units::MeasurementSystem;
