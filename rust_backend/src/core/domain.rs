//! Course records produced by the extraction.
//!
//! A [`Course`] is created once per class cell and never mutated afterwards.
//! It does not borrow from the week it was extracted from.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Audience of a course inside a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// The cell spans the whole day row.
    WholeClass,
    /// Top half of the day row.
    Group1,
    /// Bottom half of the day row.
    Group2,
}

impl Group {
    /// Human-readable label, as printed on the timetable.
    pub fn label(&self) -> &'static str {
        match self {
            Group::WholeClass => "Classe Entière",
            Group::Group1 => "Groupe 1",
            Group::Group2 => "Groupe 2",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The calendar a course is published into.
///
/// Exams go to their own calendar whatever their group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    WholeClass,
    Group1,
    Group2,
    Exam,
}

impl CalendarKind {
    pub const ALL: [CalendarKind; 4] = [
        CalendarKind::WholeClass,
        CalendarKind::Group1,
        CalendarKind::Group2,
        CalendarKind::Exam,
    ];

    pub fn for_course(course: &Course) -> Self {
        if course.exam {
            return CalendarKind::Exam;
        }
        match course.group {
            Group::WholeClass => CalendarKind::WholeClass,
            Group::Group1 => CalendarKind::Group1,
            Group::Group2 => CalendarKind::Group2,
        }
    }

    /// Suffix appended to the level name to form the calendar name.
    pub fn suffix(&self) -> &'static str {
        match self {
            CalendarKind::WholeClass => "A",
            CalendarKind::Group1 => "G1",
            CalendarKind::Group2 => "G2",
            CalendarKind::Exam => "E",
        }
    }

    /// Calendar name for a level, e.g. `L3G1`.
    pub fn calendar_name(&self, level: &str) -> String {
        format!("{}{}", level, self.suffix())
    }
}

/// Text fields decomposed from a class cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CourseText {
    pub subject: String,
    pub teacher: String,
    pub location: String,
}

/// One course of the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    day_offset: i64,
    begin: DateTime<Tz>,
    end: DateTime<Tz>,
    group: Group,
    subject: String,
    teacher: String,
    location: String,
    exam: bool,
}

impl Course {
    /// Creates a course.
    ///
    /// # Arguments
    /// * `day_offset` - Day of the week, 0 for Monday
    /// * `begin` / `end` - Absolute timestamps in the timetable's time zone
    /// * `group` - Audience of the course
    /// * `text` - Subject, teacher and location
    /// * `exam` - Whether the cell was highlighted as an exam
    pub fn new(
        day_offset: i64,
        begin: DateTime<Tz>,
        end: DateTime<Tz>,
        group: Group,
        text: CourseText,
        exam: bool,
    ) -> Self {
        Self {
            day_offset,
            begin,
            end,
            group,
            subject: text.subject,
            teacher: text.teacher,
            location: text.location,
            exam,
        }
    }

    pub fn day_offset(&self) -> i64 {
        self.day_offset
    }

    pub fn weekday(&self) -> Weekday {
        self.begin.weekday()
    }

    pub fn begin(&self) -> DateTime<Tz> {
        self.begin
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.begin
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn teacher(&self) -> &str {
        &self.teacher
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_exam(&self) -> bool {
        self.exam
    }

    pub fn calendar_kind(&self) -> CalendarKind {
        CalendarKind::for_course(self)
    }

    /// Stable identifier, usable as a calendar event UID.
    ///
    /// Two extractions of the same course produce the same identifier.
    pub fn uid(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.begin.to_rfc3339().as_bytes());
        hasher.update(b"|");
        hasher.update(self.end.to_rfc3339().as_bytes());
        hasher.update(b"|");
        hasher.update(self.group.label().as_bytes());
        hasher.update(b"|");
        hasher.update(self.subject.as_bytes());
        hex::encode(hasher.finalize())
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : B[{}] - E[{}] - L[{}] - T[{}] - G[{}] E[{}]",
            self.subject,
            self.begin.format(TIMESTAMP_FORMAT),
            self.end.format(TIMESTAMP_FORMAT),
            self.location,
            self.teacher,
            self.group,
            self.exam
        )
    }
}
