//! Contracts with the image-side collaborators of the reconstruction.
//!
//! Contour detection, brightness profiling and colour probing run on the
//! page raster, outside the reconstruction core. The core only talks to
//! them through the traits below, always with page-space rectangles.

use crate::core::geometry::{Area, AxisRange};
use crate::core::regions::RegionCollection;

/// Which contours a detection returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hierarchy {
    /// Every contour, nested ones included.
    All,
    /// Outermost contours only.
    Outer,
}

/// Parameters of a contour detection.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourOptions {
    /// Dilate the thresholded image first (noisy scans).
    pub dilate: bool,
    pub hierarchy: Hierarchy,
    /// Keep only frames whose width falls in this range.
    pub width: Option<AxisRange>,
}

/// An inclusive BGR colour range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub fn contains_bgr(&self, bgr: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= bgr[i] && bgr[i] <= self.upper[i])
    }

    /// Grayscale probing uses the first channel bounds.
    pub fn contains_gray(&self, value: u8) -> bool {
        self.lower[0] <= value && value <= self.upper[0]
    }
}

/// Detects rectangular frames in a page region.
pub trait ContourProvider {
    /// Frames found inside `region` (page space), returned in the region's
    /// local space (`region.p1` is the origin).
    fn detect_frames(&self, region: &Area, options: &ContourOptions) -> Vec<Area>;
}

/// Collapses a page strip into a one-dimensional brightness profile.
pub trait ProfileProvider {
    /// Average intensity of `strip` (page space) after painting every
    /// `blank_out` rectangle white.
    ///
    /// With `rotate`, the strip is turned 90° first, so the result holds
    /// one value per column of the strip; otherwise one value per row.
    fn average_row_intensity(&self, strip: &Area, blank_out: &[Area], rotate: bool) -> Vec<u8>;
}

/// Measures how much of a region falls inside a colour range.
pub trait ColorProbe {
    /// Percentage (0 to 100) of pixels of `region` (page space) inside `range`.
    fn percent_in_range(&self, region: &Area, range: &ColorRange, grayscale: bool) -> f64;
}

/// The collaborators serving one page.
#[derive(Clone, Copy)]
pub struct PageSources<'a> {
    pub contours: &'a dyn ContourProvider,
    pub profile: &'a dyn ProfileProvider,
    pub probe: &'a dyn ColorProbe,
}

/// Frames detected ahead of time, e.g. shipped with the page document.
///
/// Detection becomes a geometric query: frames enclosed by the region and
/// within the width range, moved to the region's local space. `dilate` has
/// no effect on precomputed frames.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedContours {
    frames: RegionCollection,
}

impl PrecomputedContours {
    pub fn new(frames: RegionCollection) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl ContourProvider for PrecomputedContours {
    fn detect_frames(&self, region: &Area, options: &ContourOptions) -> Vec<Area> {
        let mut found: RegionCollection = self
            .frames
            .contained(region)
            .into_iter()
            .filter(|frame| {
                options
                    .width
                    .map_or(true, |range| range.contains_value(frame.width()))
            })
            .collect();
        if options.hierarchy == Hierarchy::Outer {
            found.overlap_prune();
        }
        found.shift_origin(region.p1);
        found.into_vec()
    }
}

/// A blank white page: no ticks, no colour.
///
/// Stands in for the raster of pages whose image is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankPage;

impl ProfileProvider for BlankPage {
    fn average_row_intensity(&self, strip: &Area, _blank_out: &[Area], rotate: bool) -> Vec<u8> {
        let len = if rotate { strip.width() } else { strip.height() };
        vec![u8::MAX; len as usize]
    }
}

impl ColorProbe for BlankPage {
    fn percent_in_range(&self, _region: &Area, range: &ColorRange, grayscale: bool) -> f64 {
        let white = if grayscale {
            range.contains_gray(u8::MAX)
        } else {
            range.contains_bgr([u8::MAX; 3])
        };
        if white {
            100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{Axis, Point};

    fn contours() -> PrecomputedContours {
        PrecomputedContours::new(
            vec![
                Area::from_xywh(50, 50, 2000, 400),
                Area::from_xywh(60, 90, 400, 200),
                Area::from_xywh(70, 100, 50, 20),
                Area::from_xywh(3000, 0, 100, 100),
            ]
            .into(),
        )
    }

    #[test]
    fn test_precomputed_frames_are_local_and_filtered() {
        let region = Area::from_xywh(50, 50, 2000, 400);
        let options = ContourOptions {
            dilate: true,
            hierarchy: Hierarchy::All,
            width: Some(AxisRange::new(80, 1000, Axis::Horizontal)),
        };
        let frames = contours().detect_frames(&region, &options);
        assert_eq!(frames, vec![Area::new(Point::new(10, 40), Point::new(410, 240))]);
    }

    #[test]
    fn test_outer_hierarchy_drops_nested_frames() {
        let page = Area::from_xywh(0, 0, 2200, 1000);
        let options = ContourOptions {
            dilate: false,
            hierarchy: Hierarchy::Outer,
            width: None,
        };
        let frames = contours().detect_frames(&page, &options);
        assert_eq!(frames, vec![Area::from_xywh(50, 50, 2000, 400)]);
    }

    #[test]
    fn test_blank_page() {
        let strip = Area::from_xywh(0, 0, 12, 3);
        assert_eq!(BlankPage.average_row_intensity(&strip, &[], true), vec![255; 12]);
        let yellow = ColorRange {
            lower: [0, 220, 220],
            upper: [50, 255, 255],
        };
        assert_eq!(BlankPage.percent_in_range(&strip, &yellow, false), 0.0);
    }
}
