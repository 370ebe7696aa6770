//! Timetable reconstruction algorithms.
//!
//! # Components
//!
//! - [`week`]: Rebuild a week (day rows, time axis, class cells) from a block
//! - [`split`]: Detect and separate two weeks stacked in one block
//! - [`courses`]: Turn class cells into courses
//!
//! # Example
//!
//! ```ignore
//! use edt_rust::algorithms::{CourseExtractor, WeekReconstructor};
//!
//! let reconstruction = WeekReconstructor::new(&contours, &raster, &config).reconstruct(block)?;
//! if let Some(week) = reconstruction.week {
//!     let courses = CourseExtractor::new(&raster, &config).extract(&week);
//! }
//! ```

pub mod courses;
pub mod split;
pub mod week;

pub use courses::{group_for, CourseExtractor};
pub use split::{find_split_point, has_repeated_day, SplitPoint};
pub use week::{DayColumn, Reconstruction, Week, WeekBlock, WeekReconstructor};
