//! Detection of two weeks drawn in a single block.
//!
//! Some timetables stack two weeks inside one outer frame. The second week
//! repeats the day names of the first, which is how the block is recognised,
//! and the boundary between them is read from the day and week id labels.

use crate::core::error::{ExtractError, ExtractResult};
use crate::core::regions::RegionCollection;
use crate::parsing::labels::day_index;

/// Vertical boundary between two stacked weeks, block-local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPoint {
    /// Bottom of the upper week.
    pub upper_end: i32,
    /// Top of the lower week.
    pub lower_start: i32,
}

/// Returns `true` if a day name appears more than once.
pub fn has_repeated_day(days: &RegionCollection) -> bool {
    let names: Vec<&str> = days.iter().filter_map(|day| day.text()).collect();
    names
        .iter()
        .enumerate()
        .any(|(i, name)| names[i + 1..].contains(name))
}

/// Finds where the upper week ends and the lower one starts.
///
/// Days are walked top to bottom while they follow the week order; the
/// last day of that run closes the upper week. The lower week starts at
/// the second week id when there are at least two, at the next day label
/// otherwise.
///
/// Sorts `days` and `ids` by their top edge.
///
/// # Returns
/// * `Err(ExtractError::SplitBoundaryError)` if no label follows the upper
///   week, or if the boundary lies above the upper week's last day
pub fn find_split_point(
    days: &mut RegionCollection,
    ids: &mut RegionCollection,
) -> ExtractResult<SplitPoint> {
    days.sort_by_key(|day| day.y1());
    ids.sort_by_key(|id| id.y1());

    let order = |index: usize| {
        days.get(index)
            .and_then(|day| day.text())
            .and_then(day_index)
    };

    let mut last = 0;
    while last + 1 < days.len() {
        match (order(last), order(last + 1)) {
            (Some(current), Some(next)) if current < next => last += 1,
            _ => break,
        }
    }

    let upper_day = days.get(last).ok_or_else(|| {
        ExtractError::SplitBoundaryError("no day label in the block".to_string())
    })?;
    let upper_end = upper_day.y2();

    let lower_start = match ids.get(1) {
        Some(id) => id.y1(),
        None => days
            .get(last + 1)
            .map(|day| day.y1())
            .ok_or_else(|| {
                ExtractError::SplitBoundaryError(format!(
                    "no label below {}",
                    upper_day.text().unwrap_or("the last day")
                ))
            })?,
    };

    if lower_start < upper_end {
        return Err(ExtractError::SplitBoundaryError(format!(
            "lower week starts at {} above the end of the upper week at {}",
            lower_start, upper_end
        )));
    }

    Ok(SplitPoint {
        upper_end,
        lower_start,
    })
}
