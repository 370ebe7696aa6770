//! Course list transformations.
//!
//! # Modules
//!
//! - [`calendars`]: Partition courses into the calendars of a level
//! - [`overlay`]: Draw detected elements over page rasters
//!
//! # Example
//!
//! ```no_run
//! use edt_rust::transformations::CalendarSet;
//! use edt_rust::preprocessing::SchedulePipeline;
//! use std::path::Path;
//!
//! let result = SchedulePipeline::new()
//!     .process_file(Path::new("timetable.json"))
//!     .expect("Failed to extract");
//! let calendars = CalendarSet::from_courses(&result.level, &result.courses);
//! for name in calendars.file_names() {
//!     println!("{}", name);
//! }
//! ```

pub mod calendars;
pub mod overlay;

pub use calendars::{CalendarEntry, CalendarSet};
