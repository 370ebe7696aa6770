//! Reconstruction of a week from one block of a timetable page.
//!
//! A block is the outer frame drawn around a week. Inside it, day labels
//! head the rows, an hour ruler runs along the top and every course is a
//! framed cell. The reconstructor turns the block's frames and words into
//! a [`Week`]: day rows, a calibrated time axis and the class cells with
//! their text.

use log::{debug, warn};

use super::split::{find_split_point, has_repeated_day};
use crate::config::ExtractorConfig;
use crate::core::error::{ExtractError, ExtractResult};
use crate::core::geometry::{Area, AreaContent, Axis, AxisRange, Point};
use crate::core::regions::RegionCollection;
use crate::io::providers::{ContourOptions, ContourProvider, Hierarchy, ProfileProvider};
use crate::parsing::labels::{day_index, parse_week_id, DAY_PATTERN, HOUR_PATTERN, WEEK_ID_PATTERN};
use crate::time::calibration::Hours;
use crate::time::week_date::WeekDate;

/// Input of one week reconstruction.
#[derive(Debug, Clone)]
pub struct WeekBlock {
    /// Block rectangle in page space.
    pub bounds: Area,
    /// Words inside the block, block-local.
    pub words: RegionCollection,
    /// Candidate week dates; the earliest is this block's.
    pub dates: Vec<WeekDate>,
    /// Number of splits that led to this block.
    pub depth: usize,
}

/// A day row of a week.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub name: String,
    /// Days since Monday.
    pub offset: i64,
    /// Row rectangle, week-local.
    pub area: Area,
}

impl DayColumn {
    /// Vertical extent of the row.
    pub fn rows(&self) -> AxisRange {
        self.area.to_range(Axis::Vertical)
    }
}

/// A reconstructed week.
#[derive(Debug, Clone)]
pub struct Week {
    pub date: WeekDate,
    /// Week number printed on the timetable, if any.
    pub id: Option<u32>,
    /// Page position of the week's local origin.
    pub origin: Point,
    /// Week rectangle, week-local.
    pub bounds: Area,
    /// Day rows, top to bottom.
    pub days: Vec<DayColumn>,
    pub hours: Hours,
    /// Every frame of class width detected in the week, week-local.
    pub frames: RegionCollection,
    /// Class cells, each carrying its text fragments.
    pub classes: RegionCollection,
}

/// Outcome of reconstructing one block.
#[derive(Debug, Default)]
pub struct Reconstruction {
    /// The week, unless the block is degenerate.
    pub week: Option<Week>,
    /// The lower half of a block holding two weeks.
    pub pending: Option<WeekBlock>,
}

/// Reconstructs weeks from blocks.
pub struct WeekReconstructor<'a> {
    contours: &'a dyn ContourProvider,
    profile: &'a dyn ProfileProvider,
    config: &'a ExtractorConfig,
}

impl<'a> WeekReconstructor<'a> {
    pub fn new(
        contours: &'a dyn ContourProvider,
        profile: &'a dyn ProfileProvider,
        config: &'a ExtractorConfig,
    ) -> Self {
        Self {
            contours,
            profile,
            config,
        }
    }

    /// Reconstructs the week of `block`.
    ///
    /// A block without day labels, without dates or without a readable hour
    /// ruler is degenerate: the result then holds no week. When the block
    /// stacks two weeks, the upper one is reconstructed and the lower one is
    /// returned as a pending block.
    ///
    /// # Returns
    /// * `Err(ExtractError::InvalidInput)` for a zero-size block
    /// * `Err(ExtractError::SplitBoundaryError)` if two stacked weeks cannot
    ///   be told apart
    /// * `Err(ExtractError::ContentTypeError)` if a word carries no text
    pub fn reconstruct(&self, block: WeekBlock) -> ExtractResult<Reconstruction> {
        let WeekBlock {
            bounds: page_bounds,
            mut words,
            mut dates,
            depth,
        } = block;
        if page_bounds.width() == 0 || page_bounds.height() == 0 {
            return Err(ExtractError::InvalidInput(format!(
                "week block at ({}, {}) has no area",
                page_bounds.x1(),
                page_bounds.y1()
            )));
        }

        let origin = Point::new(
            page_bounds.x1().min(page_bounds.x2()),
            page_bounds.y1().min(page_bounds.y2()),
        );
        let local = Area::from_xywh(0, 0, page_bounds.width(), page_bounds.height());

        let options = ContourOptions {
            dilate: true,
            hierarchy: Hierarchy::All,
            width: Some(self.config.frames.class_widths()),
        };
        let mut frames: RegionCollection = self.contours.detect_frames(&page_bounds, &options).into();

        let mut days = words.take_matching(&DAY_PATTERN)?;
        if days.is_empty() || dates.is_empty() {
            warn!(
                "Degenerate week block at ({}, {}): {} day labels, {} dates",
                origin.x,
                origin.y,
                days.len(),
                dates.len()
            );
            return Ok(Reconstruction::default());
        }
        let mut ids = words.take_matching(&WEEK_ID_PATTERN)?;
        resize_labels(&frames, &mut days, &mut ids);
        dates.sort();

        let mut bounds = local.clone();
        let mut pending = None;
        if has_repeated_day(&days) {
            if depth < self.config.split.max_depth {
                let split = find_split_point(&mut days, &mut ids)?;
                // The lower week's hour ruler sits above its first day row.
                let lower_start = ruler_top_below(&words, split.upper_end)
                    .map_or(split.lower_start, |top| top.min(split.lower_start));
                let upper = Area::new(Point::new(0, 0), Point::new(local.x2(), split.upper_end));
                let lower = Area::new(Point::new(0, lower_start), local.p2);

                let mut lower_words = words.take_contained(&lower);
                lower_words.extend(days.take_contained(&lower));
                lower_words.extend(ids.take_contained(&lower));
                lower_words.shift_origin(lower.p1);
                debug!(
                    "Splitting week block at ({}, {}) between y={} and y={}",
                    origin.x, origin.y, split.upper_end, lower_start
                );

                pending = Some(WeekBlock {
                    bounds: lower.translated(origin),
                    words: lower_words,
                    dates: dates[1..].to_vec(),
                    depth: depth + 1,
                });
                frames = frames.contained(&upper);
                bounds = upper;
            } else {
                warn!(
                    "Week block at ({}, {}) repeats day names but reached split depth {}",
                    origin.x, origin.y, depth
                );
            }
        }

        let hour_labels = words.take_matching(&HOUR_PATTERN)?;
        let hours = Hours::calibrate(
            &hour_labels,
            &ids,
            bounds.to_range(Axis::Horizontal),
            origin,
            self.profile,
            &self.config.calibration,
        );
        if hours.is_empty() {
            warn!(
                "Degenerate week block at ({}, {}): no time axis from {} hour labels",
                origin.x,
                origin.y,
                hour_labels.len()
            );
            return Ok(Reconstruction {
                week: None,
                pending,
            });
        }

        let days = finalize_days(days);
        let id = ids
            .first()
            .and_then(|label| label.text())
            .and_then(parse_week_id);
        let classes = class_cells(frames.clone(), &words);

        let week = Week {
            date: dates[0],
            id,
            origin,
            bounds,
            days,
            hours,
            frames,
            classes,
        };
        debug!(
            "Week of {} ({:?}): {} days, {} class cells",
            week.date.date(),
            week.id,
            week.days.len(),
            week.classes.len()
        );

        Ok(Reconstruction {
            week: Some(week),
            pending,
        })
    }
}

/// Top edge of the highest hour label starting at or below `y`.
fn ruler_top_below(words: &RegionCollection, y: i32) -> Option<i32> {
    words
        .iter()
        .filter(|word| word.y1() >= y && word.text().is_some_and(|text| HOUR_PATTERN.is_match(text)))
        .map(|word| word.y1())
        .min()
}

/// Grows day and week id labels to the frame drawn around them.
///
/// A day label takes a frame holding its centre that is taller than it, a
/// week id label one that is wider. Frames are tried in order and each
/// resize applies to the next test.
pub fn resize_labels(frames: &RegionCollection, days: &mut RegionCollection, ids: &mut RegionCollection) {
    for day in days.iter_mut() {
        for frame in frames {
            let (x, y) = day.center();
            if frame.in_bounds(x, y) && day.height() < frame.height() {
                day.resize(frame);
            }
        }
    }
    for id in ids.iter_mut() {
        for frame in frames {
            let (x, y) = id.center();
            if frame.in_bounds(x, y) && id.width() < frame.width() {
                id.resize(frame);
            }
        }
    }
}

/// Turns day labels into day rows, top to bottom.
fn finalize_days(mut days: RegionCollection) -> Vec<DayColumn> {
    days.sort_by_key(|day| day.y1());
    days.iter()
        .filter_map(|day| {
            let name = day.text()?;
            let offset = day_index(name)?;
            Some(DayColumn {
                name: name.to_string(),
                offset,
                area: Area::new(day.p1, day.p2),
            })
        })
        .collect()
}

/// Assigns words to class frames.
///
/// Frames nested in another frame are dropped, the rest are read column by
/// column. Each word goes to the first frame holding its centre; frames
/// left without words are not cells.
pub fn class_cells(mut frames: RegionCollection, words: &RegionCollection) -> RegionCollection {
    frames.overlap_prune();
    frames.sort_by_key(|frame| (frame.x1(), frame.y1()));

    let mut claimed = vec![false; words.len()];
    let mut classes = RegionCollection::new();
    for frame in frames {
        let mut fragments = Vec::new();
        for (index, word) in words.iter().enumerate() {
            let (x, y) = word.center();
            if claimed[index] || !frame.in_bounds(x, y) {
                continue;
            }
            claimed[index] = true;
            if let Some(text) = word.text() {
                fragments.push(text.to_string());
            }
        }
        if !fragments.is_empty() {
            classes.push(Area {
                p1: frame.p1,
                p2: frame.p2,
                content: Some(AreaContent::Fragments(fragments)),
            });
        }
    }
    classes
}
