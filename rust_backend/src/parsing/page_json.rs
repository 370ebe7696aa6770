use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::layout::{words_from_lines, TextLine, RENDER_DPI};
use crate::core::geometry::Area;
use crate::core::regions::RegionCollection;

fn default_level() -> String {
    "EDT".to_string()
}

fn default_dpi() -> f64 {
    RENDER_DPI
}

/// A timetable document: its pages with their text and detected frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDocument {
    /// Class level, prefix of the calendar names (e.g. `"L3"`).
    #[serde(default = "default_level")]
    pub level: String,
    /// Resolution the page rasters and frames were produced at.
    #[serde(default = "default_dpi")]
    pub dpi: f64,
    pub pages: Vec<RawPage>,
}

/// One page of a [`PageDocument`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// PNG raster of the page, relative to the document.
    #[serde(default)]
    pub raster: Option<String>,
    /// Text lines in PDF points, bottom-left origin.
    #[serde(default)]
    pub lines: Vec<RawTextLine>,
    /// Frames detected on the raster, in pixels.
    #[serde(default)]
    pub frames: Vec<RawFrame>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTextLine {
    pub bbox: [f64; 4],
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawFrame {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl RawFrame {
    /// Non-negative size with a representable far corner.
    pub fn is_valid(&self) -> bool {
        self.w >= 0
            && self.h >= 0
            && self.x.checked_add(self.w).is_some()
            && self.y.checked_add(self.h).is_some()
    }
}

impl RawPage {
    /// Page words in pixels, top-left origin.
    pub fn words(&self, dpi: f64) -> RegionCollection {
        let lines: Vec<TextLine> = self
            .lines
            .iter()
            .map(|line| TextLine {
                bbox: line.bbox,
                text: line.text.clone(),
            })
            .collect();
        words_from_lines(&lines, self.height, dpi)
    }

    pub fn frames(&self) -> RegionCollection {
        self.frames
            .iter()
            .map(|f| Area::from_xywh(f.x, f.y, f.w, f.h))
            .collect()
    }

    pub fn bounds(&self) -> Area {
        Area::from_xywh(0, 0, self.width, self.height)
    }
}

/// Parse a page document from a JSON file.
pub fn parse_page_document(path: &Path) -> Result<PageDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page document: {}", path.display()))?;
    parse_page_document_str(&content)
        .with_context(|| format!("Failed to parse page document: {}", path.display()))
}

/// Parse a page document from a JSON string.
///
/// Deserialization errors name the path of the offending field
/// (e.g. `pages[1].frames[0].w`).
pub fn parse_page_document_str(json_str: &str) -> Result<PageDocument> {
    let deserializer = &mut serde_json::Deserializer::from_str(json_str);
    let document: PageDocument = serde_path_to_error::deserialize(deserializer).map_err(|e| {
        anyhow::anyhow!("Invalid page document at '{}': {}", e.path(), e.inner())
    })?;

    if document.dpi.is_nan() || document.dpi <= 0.0 {
        anyhow::bail!("Page document dpi must be positive, got {}", document.dpi);
    }
    if let Some(index) = document
        .pages
        .iter()
        .position(|page| page.width <= 0 || page.height <= 0)
    {
        anyhow::bail!("Page {} has an empty size", index);
    }
    for (index, page) in document.pages.iter().enumerate() {
        if let Some(frame) = page.frames.iter().position(|f| !f.is_valid()) {
            anyhow::bail!("Page {} frame {} is out of range", index, frame);
        }
    }
    Ok(document)
}
