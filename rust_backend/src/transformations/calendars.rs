//! Grouping courses into the calendars published for a class level.
//!
//! A level gets four calendars: whole class, group 1, group 2 and exams.
//! Writing them to a calendar file format is left to the caller; this
//! module only decides which course goes where and what its event says.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::domain::{CalendarKind, Course};

/// An event of a calendar, ready for a calendar writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    pub name: String,
    pub description: String,
    pub location: String,
    pub begin: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub uid: String,
}

impl CalendarEntry {
    /// Event for a course. Exam events also name the group, since the exam
    /// calendar mixes all groups.
    pub fn from_course(course: &Course) -> Self {
        let description = if course.is_exam() {
            format!("Prof: {} - {}", course.teacher(), course.group().label())
        } else {
            format!("Prof: {}", course.teacher())
        };
        Self {
            name: course.subject().to_string(),
            description,
            location: course.location().to_string(),
            begin: course.begin(),
            end: course.end(),
            uid: course.uid(),
        }
    }
}

/// The calendars of a level.
#[derive(Debug, Clone)]
pub struct CalendarSet {
    level: String,
    calendars: BTreeMap<CalendarKind, Vec<CalendarEntry>>,
}

impl CalendarSet {
    /// Partitions `courses` into the four calendars, keeping their order.
    pub fn from_courses(level: &str, courses: &[Course]) -> Self {
        let mut calendars: BTreeMap<CalendarKind, Vec<CalendarEntry>> = CalendarKind::ALL
            .iter()
            .map(|kind| (*kind, Vec::new()))
            .collect();
        for course in courses {
            calendars
                .entry(CalendarKind::for_course(course))
                .or_default()
                .push(CalendarEntry::from_course(course));
        }
        Self {
            level: level.to_string(),
            calendars,
        }
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    /// Events of one calendar.
    pub fn entries(&self, kind: CalendarKind) -> &[CalendarEntry] {
        self.calendars.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Calendar name of one kind, e.g. `L3G1`.
    pub fn name(&self, kind: CalendarKind) -> String {
        kind.calendar_name(&self.level)
    }

    /// File names of the four calendars, e.g. `L3A.ics`.
    pub fn file_names(&self) -> Vec<String> {
        CalendarKind::ALL
            .iter()
            .map(|kind| format!("{}.ics", self.name(*kind)))
            .collect()
    }

    /// Calendars in fixed order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (CalendarKind, &[CalendarEntry])> + '_ {
        CalendarKind::ALL
            .iter()
            .map(move |kind| (*kind, self.entries(*kind)))
    }

    pub fn total_entries(&self) -> usize {
        self.calendars.values().map(Vec::len).sum()
    }
}
