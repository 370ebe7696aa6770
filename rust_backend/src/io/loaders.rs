use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

use super::providers::{BlankPage, PageSources, PrecomputedContours};
use super::raster::PageRaster;
use crate::parsing::page_json::{self, PageDocument};
use crate::preprocessing::page::PageInput;

/// A page ready for reconstruction, with its image-side collaborators.
#[derive(Debug)]
pub struct LoadedPage {
    pub input: PageInput,
    pub contours: PrecomputedContours,
    pub raster: Option<PageRaster>,
}

impl LoadedPage {
    /// Collaborators serving this page. Pages without raster are read as
    /// blank white pages.
    pub fn sources(&self) -> PageSources<'_> {
        match &self.raster {
            Some(raster) => PageSources {
                contours: &self.contours,
                profile: raster,
                probe: raster,
            },
            None => PageSources {
                contours: &self.contours,
                profile: &BlankPage,
                probe: &BlankPage,
            },
        }
    }
}

/// A loaded timetable document.
#[derive(Debug)]
pub struct LoadedDocument {
    pub level: String,
    pub pages: Vec<LoadedPage>,
}

/// Unified interface for loading page documents and their rasters
pub struct DocumentLoader;

impl DocumentLoader {
    /// Load a page document from a JSON file.
    ///
    /// Raster paths are resolved against the document's directory.
    pub fn load_from_file(path: &Path) -> Result<LoadedDocument> {
        let document =
            page_json::parse_page_document(path).context("Failed to load page document")?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_document(document, base_dir)
    }

    /// Load a page document from a JSON string.
    pub fn load_from_str(json_str: &str, base_dir: &Path) -> Result<LoadedDocument> {
        let document = page_json::parse_page_document_str(json_str)
            .context("Failed to parse page document string")?;
        Self::from_document(document, base_dir)
    }

    /// Load a page raster from an image file.
    pub fn load_raster(path: &Path) -> Result<PageRaster> {
        let image = image::open(path)
            .with_context(|| format!("Failed to open page raster: {}", path.display()))?;
        Ok(PageRaster::new(image.to_rgb8()))
    }

    fn from_document(document: PageDocument, base_dir: &Path) -> Result<LoadedDocument> {
        let mut pages = Vec::with_capacity(document.pages.len());
        for (index, raw) in document.pages.iter().enumerate() {
            let raster = match &raw.raster {
                Some(relative) => {
                    let raster = Self::load_raster(&base_dir.join(relative))
                        .with_context(|| format!("Failed to load raster of page {}", index))?;
                    if raster.width() as i32 != raw.width || raster.height() as i32 != raw.height {
                        warn!(
                            "Page {} raster is {}x{}, document says {}x{}",
                            index,
                            raster.width(),
                            raster.height(),
                            raw.width,
                            raw.height
                        );
                    }
                    Some(raster)
                }
                None => None,
            };

            pages.push(LoadedPage {
                input: PageInput {
                    index,
                    width: raw.width,
                    height: raw.height,
                    words: raw.words(document.dpi),
                },
                contours: PrecomputedContours::new(raw.frames()),
                raster,
            });
        }

        info!(
            "Loaded {} pages for level {}",
            pages.len(),
            document.level
        );
        Ok(LoadedDocument {
            level: document.level,
            pages,
        })
    }
}
