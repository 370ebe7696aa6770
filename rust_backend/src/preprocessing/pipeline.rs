use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use serde::Serialize;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use super::page::{segment_page, PageInput};
use crate::algorithms::courses::CourseExtractor;
use crate::algorithms::week::{Reconstruction, Week, WeekBlock, WeekReconstructor};
use crate::config::ExtractorConfig;
use crate::core::domain::Course;
use crate::core::error::ExtractResult;
use crate::io::loaders::{DocumentLoader, LoadedDocument};
use crate::io::providers::PageSources;
use crate::transformations::overlay;

/// Weeks reconstructed from one page.
#[derive(Debug, Default)]
pub struct PageWeeks {
    pub weeks: Vec<Week>,
    /// Blocks that were degenerate or could not be split.
    pub skipped_blocks: usize,
}

/// Result of extracting a whole document
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub level: String,
    /// Every course of the document, ordered by begin time.
    pub courses: Vec<Course>,
    pub pages: usize,
    pub weeks: usize,
    pub skipped_blocks: usize,
}

/// Main extraction pipeline
pub struct SchedulePipeline {
    config: ExtractorConfig,
}

impl SchedulePipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Date week labels are read against: the configured one, else today
    /// in the timetable's time zone.
    pub fn reference_date(&self) -> NaiveDate {
        self.config.output.reference_date.unwrap_or_else(|| {
            Utc::now()
                .with_timezone(&self.config.output.timezone)
                .date_naive()
        })
    }

    /// Reconstruct every week of a page.
    ///
    /// Blocks are handled through a worklist: the lower half of a split
    /// block is reconstructed right after its upper half. A block that
    /// fails on its own (unreadable split, empty bounds) is logged and
    /// skipped; the other blocks of the page still go through.
    ///
    /// # Returns
    /// * `Err(ExtractError)` only for failures that concern the whole page
    pub fn weeks_for_page(&self, page: &PageInput, sources: PageSources<'_>) -> ExtractResult<PageWeeks> {
        let blocks = segment_page(page, sources.contours, &self.config, self.reference_date())?;
        let reconstructor = WeekReconstructor::new(sources.contours, sources.profile, &self.config);

        let mut worklist: VecDeque<WeekBlock> = blocks.into();
        let mut result = PageWeeks::default();
        while let Some(block) = worklist.pop_front() {
            let (x, y) = (block.bounds.x1(), block.bounds.y1());
            match reconstructor.reconstruct(block) {
                Ok(Reconstruction { week, pending }) => {
                    match week {
                        Some(week) => result.weeks.push(week),
                        None => result.skipped_blocks += 1,
                    }
                    if let Some(lower) = pending {
                        worklist.push_front(lower);
                    }
                }
                Err(e) if e.is_block_local() => {
                    warn!("Page {}: skipping week block at ({}, {}): {}", page.index, x, y, e);
                    result.skipped_blocks += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(result)
    }

    /// Courses of every week of a page, in week then cell order.
    pub fn courses_for_page(
        &self,
        page: &PageInput,
        sources: PageSources<'_>,
    ) -> ExtractResult<(Vec<Course>, PageWeeks)> {
        let page_weeks = self.weeks_for_page(page, sources)?;
        let extractor = CourseExtractor::new(sources.probe, &self.config);
        let courses = page_weeks
            .weeks
            .iter()
            .flat_map(|week| extractor.extract(week))
            .collect();
        Ok((courses, page_weeks))
    }

    /// Extract the courses of a loaded document.
    pub fn process(&self, document: &LoadedDocument) -> ExtractResult<ExtractionResult> {
        let mut courses = Vec::new();
        let mut weeks = 0;
        let mut skipped_blocks = 0;

        for page in &document.pages {
            let (page_courses, page_weeks) = self.courses_for_page(&page.input, page.sources())?;
            info!(
                "Page {}: {} weeks, {} courses",
                page.input.index,
                page_weeks.weeks.len(),
                page_courses.len()
            );
            weeks += page_weeks.weeks.len();
            skipped_blocks += page_weeks.skipped_blocks;
            courses.extend(page_courses);
        }
        courses.sort_by_key(|course| course.begin());

        let level = self
            .config
            .output
            .level
            .clone()
            .unwrap_or_else(|| document.level.clone());
        info!(
            "{}: {} courses from {} weeks ({} blocks skipped)",
            level,
            courses.len(),
            weeks,
            skipped_blocks
        );

        Ok(ExtractionResult {
            level,
            courses,
            pages: document.pages.len(),
            weeks,
            skipped_blocks,
        })
    }

    /// Draw what was detected on every page and week of a document.
    ///
    /// Writes `page-<index>.png` for each page with a raster and
    /// `week<date>.png` for each of its weeks into `dir`, creating it.
    ///
    /// # Returns
    /// * The paths of the saved images
    pub fn save_detections(&self, document: &LoadedDocument, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create detection directory: {}", dir.display()))?;

        let mut saved = Vec::new();
        for page in &document.pages {
            let Some(raster) = &page.raster else {
                warn!("Page {}: no raster, nothing to draw", page.input.index);
                continue;
            };
            let page_weeks = self.weeks_for_page(&page.input, page.sources())?;

            let path = dir.join(format!("page-{}.png", page.input.index));
            overlay::save(&overlay::page_overlay(raster, &page.input.words, &page_weeks.weeks), &path)?;
            saved.push(path);

            for week in &page_weeks.weeks {
                let Some(image) = overlay::week_overlay(raster, week) else {
                    continue;
                };
                let path = dir.join(format!("week{}.png", week.date.date()));
                overlay::save(&image, &path)?;
                saved.push(path);
            }
        }
        info!("Saved {} detection images to {}", saved.len(), dir.display());
        Ok(saved)
    }

    /// Load a page document and extract its courses.
    pub fn process_file(&self, path: &Path) -> Result<ExtractionResult> {
        let document = DocumentLoader::load_from_file(path)?;
        self.process(&document)
            .with_context(|| format!("Failed to extract courses from {}", path.display()))
    }
}

impl Default for SchedulePipeline {
    fn default() -> Self {
        Self::new()
    }
}
