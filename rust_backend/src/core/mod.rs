//! Core types for timetable reconstruction.
//!
//! This module defines the geometry primitives the reconstruction works on,
//! the region collection used to query positioned words and frames, and the
//! course records handed to calendar serializers.

pub mod axe;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod regions;

pub use axe::Axe;
pub use domain::{CalendarKind, Course, CourseText, Group};
pub use error::{ExtractError, ExtractResult};
pub use geometry::{Area, AreaContent, Axis, AxisRange, Point};
pub use regions::RegionCollection;
