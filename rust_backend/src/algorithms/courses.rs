//! Turning class cells into courses.

use log::debug;

use super::week::{DayColumn, Week};
use crate::config::ExtractorConfig;
use crate::core::domain::{Course, Group};
use crate::core::geometry::Area;
use crate::io::providers::ColorProbe;
use crate::parsing::course_text::decompose;

/// Audience of a cell within its day row.
///
/// A cell closer to the full row height than to half of it is for the
/// whole class; otherwise the upper half is group 1 and the lower half
/// group 2.
pub fn group_for(day: &Area, cell: &Area) -> Group {
    let day_height = f64::from(day.height());
    let cell_height = f64::from(cell.height());
    if (day_height - cell_height).abs() < (day_height / 2.0 - cell_height).abs() {
        return Group::WholeClass;
    }
    if cell.center().1 <= day.center().1 {
        Group::Group1
    } else {
        Group::Group2
    }
}

/// Extracts the courses of reconstructed weeks.
pub struct CourseExtractor<'a> {
    probe: &'a dyn ColorProbe,
    config: &'a ExtractorConfig,
}

impl<'a> CourseExtractor<'a> {
    pub fn new(probe: &'a dyn ColorProbe, config: &'a ExtractorConfig) -> Self {
        Self { probe, config }
    }

    /// Courses of every class cell of `week`, in cell order.
    ///
    /// Cells whose vertical middle is in no day row are dropped.
    pub fn extract(&self, week: &Week) -> Vec<Course> {
        week.classes
            .iter()
            .filter_map(|cell| self.course(week, cell))
            .collect()
    }

    fn course(&self, week: &Week, cell: &Area) -> Option<Course> {
        let Some(day) = day_of(&week.days, cell) else {
            debug!(
                "Class cell at ({}, {}) is in no day row, dropped",
                cell.x1(),
                cell.y1()
            );
            return None;
        };
        let begin = week.hours.time_at(cell.x1())?;
        let end = week.hours.time_at(cell.x2())?;

        let fragments = cell.fragments().unwrap_or(&[]);
        let text = decompose(fragments, &self.config.output.unknown_subject);

        let yellow = self.probe.percent_in_range(
            &cell.translated(week.origin),
            &self.config.exam.yellow(),
            false,
        );
        let exam = yellow >= self.config.exam.yellow_threshold_percent;

        let tz = self.config.output.timezone;
        let course = Course::new(
            day.offset,
            week.date.at(day.offset, begin, tz),
            week.date.at(day.offset, end, tz),
            group_for(&day.area, cell),
            text,
            exam,
        );
        debug!("{}", course);
        Some(course)
    }
}

/// Day row whose vertical range strictly holds the cell's vertical middle.
fn day_of<'w>(days: &'w [DayColumn], cell: &Area) -> Option<&'w DayColumn> {
    days.iter().find(|day| day.rows().contains_midpoint(cell))
}
