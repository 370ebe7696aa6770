//! Geometry primitives used to describe a rendered timetable page.
//!
//! All coordinates are integer pixels in a top-left-origin space at the
//! rendering resolution (200 DPI). Sub-regions of a page are handled by
//! shifting areas to a local origin rather than by copying image data.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point with integer coordinates.
///
/// # Examples
///
/// ```
/// use edt_rust::core::geometry::Point;
///
/// let p = Point::new(10, 20) - Point::new(4, 5);
/// assert_eq!(p, Point::new(6, 15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// One of the two page axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Abscissa (x coordinates)
    Horizontal,
    /// Ordinate (y coordinates)
    Vertical,
}

/// A one-dimensional interval `[a, b]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRange {
    pub a: i32,
    pub b: i32,
    pub axis: Axis,
}

impl AxisRange {
    pub fn new(a: i32, b: i32, axis: Axis) -> Self {
        Self { a, b, axis }
    }

    /// Middle of the range.
    pub fn middle(&self) -> f64 {
        f64::from(self.a + self.b) / 2.0
    }

    /// Length of the range.
    pub fn size(&self) -> i32 {
        (self.b - self.a).abs()
    }

    /// Returns `true` if `area` lies strictly between `a` and `b` on this axis.
    pub fn strictly_contains(&self, area: &Area) -> bool {
        let (lo, hi) = area.span(self.axis);
        self.a < lo && hi < self.b
    }

    /// Returns `true` if the midpoint of `area` on this axis lies strictly
    /// inside the range.
    pub fn contains_midpoint(&self, area: &Area) -> bool {
        let (lo, hi) = area.span(self.axis);
        let middle = f64::from(lo + hi) / 2.0;
        f64::from(self.a) < middle && middle < f64::from(self.b)
    }

    /// Returns `true` if `value` lies in `[a, b]` (inclusive).
    pub fn contains_value(&self, value: i32) -> bool {
        self.a <= value && value <= self.b
    }
}

/// Payload carried by an [`Area`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaContent {
    /// A single trimmed text fragment (a positioned word or line).
    Text(String),
    /// The ordered text fragments found inside a class cell.
    Fragments(Vec<String>),
}

/// A rectangle described by two corners, with an optional payload.
///
/// `p1` is expected to be the top-left corner and `p2` the bottom-right one,
/// but construction does not enforce it: [`Area::width`] and
/// [`Area::height`] are absolute differences.
///
/// # Examples
///
/// ```
/// use edt_rust::core::geometry::{Area, Point};
///
/// let area = Area::new(Point::new(30, 40), Point::new(10, 10));
/// assert_eq!(area.width(), 20);
/// assert_eq!(area.height(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub p1: Point,
    pub p2: Point,
    pub content: Option<AreaContent>,
}

impl Area {
    /// Creates an area from two corners, without content.
    pub fn new(p1: Point, p2: Point) -> Self {
        Self {
            p1,
            p2,
            content: None,
        }
    }

    /// Creates an area from its top-left corner, width and height.
    pub fn from_xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(Point::new(x, y), Point::new(x + w, y + h))
    }

    /// Creates an area carrying a text fragment.
    pub fn with_text(p1: Point, p2: Point, text: impl Into<String>) -> Self {
        Self {
            p1,
            p2,
            content: Some(AreaContent::Text(text.into())),
        }
    }

    pub fn x1(&self) -> i32 {
        self.p1.x
    }

    pub fn x2(&self) -> i32 {
        self.p2.x
    }

    pub fn y1(&self) -> i32 {
        self.p1.y
    }

    pub fn y2(&self) -> i32 {
        self.p2.y
    }

    pub fn width(&self) -> i32 {
        (self.p2.x - self.p1.x).abs()
    }

    pub fn height(&self) -> i32 {
        (self.p2.y - self.p1.y).abs()
    }

    /// Text payload, if the area carries a single fragment.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Some(AreaContent::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Fragments payload, if the area is a class cell.
    pub fn fragments(&self) -> Option<&[String]> {
        match &self.content {
            Some(AreaContent::Fragments(fragments)) => Some(fragments),
            _ => None,
        }
    }

    /// Returns `true` if `other` is enclosed by this area (edges may touch).
    pub fn contains(&self, other: &Area) -> bool {
        self.x1() <= other.x1()
            && self.x2() >= other.x2()
            && self.y1() <= other.y1()
            && self.y2() >= other.y2()
    }

    /// Returns `true` if the point `(x, y)` is inside this area (edges included).
    pub fn in_bounds(&self, x: f64, y: f64) -> bool {
        f64::from(self.x1()) <= x
            && x <= f64::from(self.x2())
            && f64::from(self.y1()) <= y
            && y <= f64::from(self.y2())
    }

    /// Centre of the area.
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x1() + self.x2()) / 2.0,
            f64::from(self.y1() + self.y2()) / 2.0,
        )
    }

    /// Returns `true` if both areas describe the same rectangle.
    pub fn same_rect(&self, other: &Area) -> bool {
        self.p1 == other.p1 && self.p2 == other.p2
    }

    /// Projection of the area on one axis.
    pub fn to_range(&self, axis: Axis) -> AxisRange {
        let (a, b) = self.span(axis);
        AxisRange::new(a, b, axis)
    }

    /// Moves both corners so that `origin` becomes `(0, 0)`.
    pub fn shift_origin(&mut self, origin: Point) {
        self.p1 = self.p1 - origin;
        self.p2 = self.p2 - origin;
    }

    /// Returns a copy translated by `offset`, without content.
    pub fn translated(&self, offset: Point) -> Area {
        Area::new(self.p1 + offset, self.p2 + offset)
    }

    /// Takes the corners of `frame`, keeping this area's content.
    pub fn resize(&mut self, frame: &Area) {
        self.p1 = frame.p1;
        self.p2 = frame.p2;
    }

    fn span(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (self.x1(), self.x2()),
            Axis::Vertical => (self.y1(), self.y2()),
        }
    }
}
