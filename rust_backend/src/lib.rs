//! Timetable page reconstruction.
//!
//! Reads the frames and positioned words of rendered timetable pages and
//! rebuilds their weeks: day rows, a calibrated time axis and class cells,
//! turned into typed [`Course`](crate::core::Course) records.
//!
//! # Example
//!
//! ```no_run
//! use edt_rust::preprocessing::SchedulePipeline;
//! use std::path::Path;
//!
//! let result = SchedulePipeline::new()
//!     .process_file(Path::new("timetable.json"))
//!     .expect("Failed to extract");
//! for course in &result.courses {
//!     println!("{}", course);
//! }
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod time;
pub mod transformations;
