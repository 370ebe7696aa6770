//! Conversion of document-layout text lines into page words.
//!
//! Layout engines report text in PDF points with a bottom-left origin; the
//! reconstruction works on the rendered page raster, in pixels with a
//! top-left origin.

use crate::core::geometry::{Area, Point};
use crate::core::regions::RegionCollection;

/// Resolution pages are rendered at.
pub const RENDER_DPI: f64 = 200.0;

/// Resolution of PDF user space.
pub const PDF_DPI: f64 = 72.0;

/// A text line as reported by a layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// `[x0, y0, x1, y1]` in points, bottom-left origin.
    pub bbox: [f64; 4],
    pub text: String,
}

/// Converts one text line into a page word.
///
/// # Arguments
/// * `line` - The layout line
/// * `page_height` - Height of the rendered page in pixels
/// * `dpi` - Render resolution
///
/// # Returns
/// * `None` if the line holds only whitespace
pub fn text_line_to_word(line: &TextLine, page_height: i32, dpi: f64) -> Option<Area> {
    let text = line.text.trim();
    if text.is_empty() {
        return None;
    }
    let [x0, y0, x1, y1] = line.bbox.map(|v| (v * dpi / PDF_DPI) as i32);
    Some(Area::with_text(
        Point::new(x0, page_height.saturating_sub(y1)),
        Point::new(x1, page_height.saturating_sub(y0)),
        text,
    ))
}

/// Converts every non-blank line of a page.
pub fn words_from_lines(lines: &[TextLine], page_height: i32, dpi: f64) -> RegionCollection {
    lines
        .iter()
        .filter_map(|line| text_line_to_word(line, page_height, dpi))
        .collect()
}
