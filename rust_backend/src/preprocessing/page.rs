//! Splitting a timetable page into week blocks.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::algorithms::week::WeekBlock;
use crate::config::ExtractorConfig;
use crate::core::error::ExtractResult;
use crate::core::geometry::{Area, Axis};
use crate::core::regions::RegionCollection;
use crate::io::providers::{ContourOptions, ContourProvider, Hierarchy};
use crate::parsing::labels::WEEK_DATE_PATTERN;
use crate::time::week_date::WeekDate;

/// One page of a timetable: its size and its words, in pixels.
#[derive(Debug, Clone)]
pub struct PageInput {
    pub index: usize,
    pub width: i32,
    pub height: i32,
    pub words: RegionCollection,
}

impl PageInput {
    pub fn bounds(&self) -> Area {
        Area::from_xywh(0, 0, self.width, self.height)
    }
}

/// Finds the week blocks of a page.
///
/// Week blocks are the outermost frames of week width. Each block gets the
/// week dates printed at its height (left of the block) and the words it
/// encloses, moved to its own origin.
///
/// # Arguments
/// * `page` - The page
/// * `contours` - Frame detection on the page raster
/// * `config` - Frame widths
/// * `reference` - Date used to infer the year of week dates
///
/// # Returns
/// * Blocks from top to bottom
/// * `Err(ExtractError::ContentTypeError)` if a page word carries no text
pub fn segment_page(
    page: &PageInput,
    contours: &dyn ContourProvider,
    config: &ExtractorConfig,
    reference: NaiveDate,
) -> ExtractResult<Vec<WeekBlock>> {
    let mut words = page.words.clone();
    let dates: Vec<(Area, WeekDate)> = words
        .take_matching(&WEEK_DATE_PATTERN)?
        .into_iter()
        .filter_map(|label| {
            let text = label.text()?;
            match WeekDate::parse(text, reference) {
                Ok(date) => Some((label.clone(), date)),
                Err(e) => {
                    warn!("Page {}: skipping week date \"{}\": {}", page.index, text, e);
                    None
                }
            }
        })
        .collect();

    let options = ContourOptions {
        dilate: false,
        hierarchy: Hierarchy::Outer,
        width: Some(config.frames.week_widths()),
    };
    let mut frames: RegionCollection = contours.detect_frames(&page.bounds(), &options).into();
    frames.sort_by_key(|frame| frame.y1());
    debug!(
        "Page {}: {} week frames, {} week dates",
        page.index,
        frames.len(),
        dates.len()
    );

    let blocks = frames
        .into_iter()
        .map(|frame| {
            let rows = frame.to_range(Axis::Vertical);
            let block_dates: Vec<WeekDate> = dates
                .iter()
                .filter(|(label, _)| rows.strictly_contains(label))
                .map(|(_, date)| *date)
                .collect();
            let mut block_words = words.contained(&frame);
            block_words.shift_origin(frame.p1);
            WeekBlock {
                bounds: Area::new(frame.p1, frame.p2),
                words: block_words,
                dates: block_dates,
                depth: 0,
            }
        })
        .collect();
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::io::providers::PrecomputedContours;

    fn word(x1: i32, y1: i32, x2: i32, y2: i32, text: &str) -> Area {
        Area::with_text(Point::new(x1, y1), Point::new(x2, y2), text)
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 9, 1).unwrap()
    }

    #[test]
    fn test_segment_assigns_dates_and_words() {
        let page = PageInput {
            index: 0,
            width: 2200,
            height: 1200,
            words: vec![
                word(5, 600, 45, 620, "09/oct"),
                word(5, 100, 45, 120, "02/oct"),
                word(5, 130, 45, 150, "31/xyz"),
                word(100, 60, 130, 80, "9h"),
                word(120, 560, 180, 580, "Lundi"),
            ]
            .into(),
        };
        let contours = PrecomputedContours::new(
            vec![
                Area::from_xywh(50, 550, 2000, 400),
                Area::from_xywh(50, 50, 2000, 450),
                Area::from_xywh(60, 60, 400, 200),
            ]
            .into(),
        );

        let blocks = segment_page(&page, &contours, &ExtractorConfig::default(), reference()).unwrap();
        assert_eq!(blocks.len(), 2);

        let first = &blocks[0];
        assert_eq!(first.bounds, Area::from_xywh(50, 50, 2000, 450));
        assert_eq!(first.dates.len(), 1);
        assert_eq!(first.dates[0].date(), NaiveDate::from_ymd_opt(2023, 10, 2).unwrap());
        assert_eq!(first.words.len(), 1);
        assert_eq!(first.words.first().map(|w| w.p1), Some(Point::new(50, 10)));
        assert_eq!(first.depth, 0);

        let second = &blocks[1];
        assert_eq!(second.dates[0].date(), NaiveDate::from_ymd_opt(2023, 10, 9).unwrap());
        assert_eq!(second.words.first().and_then(|w| w.text()), Some("Lundi"));
    }

    #[test]
    fn test_page_without_frames_has_no_blocks() {
        let page = PageInput {
            index: 3,
            width: 100,
            height: 100,
            words: vec![word(5, 5, 40, 20, "02/oct")].into(),
        };
        let blocks = segment_page(
            &page,
            &PrecomputedContours::default(),
            &ExtractorConfig::default(),
            reference(),
        )
        .unwrap();
        assert!(blocks.is_empty());
    }
}
