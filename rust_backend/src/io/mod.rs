//! Image-side collaborators and document loading.
//!
//! The reconstruction never touches pixels directly: contour detection,
//! brightness profiles and colour probing are reached through the traits of
//! [`providers`]. This module also provides the in-memory implementations
//! used when a page document ships its frames and rasters.
//!
//! # Example
//!
//! ```no_run
//! use edt_rust::io::loaders::DocumentLoader;
//! use std::path::Path;
//!
//! let document = DocumentLoader::load_from_file(Path::new("timetable.json"))
//!     .expect("Failed to load");
//! println!("Loaded {} pages", document.pages.len());
//! ```

pub mod loaders;
pub mod providers;
pub mod raster;


pub use loaders::{DocumentLoader, LoadedDocument, LoadedPage};
pub use providers::{
    BlankPage, ColorProbe, ColorRange, ContourOptions, ContourProvider, Hierarchy, PageSources,
    PrecomputedContours, ProfileProvider,
};
pub use raster::PageRaster;
