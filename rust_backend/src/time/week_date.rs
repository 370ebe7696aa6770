//! Week reference dates parsed from `DD/Mon` labels.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::error::{ExtractError, ExtractResult};
use crate::parsing::labels::WEEK_DATE_PATTERN;

/// French month abbreviations found on timetables.
const MONTHS: &[(&str, u32)] = &[
    ("jan", 1),
    ("janv", 1),
    ("fév", 2),
    ("fev", 2),
    ("févr", 2),
    ("fevr", 2),
    ("mar", 3),
    ("mars", 3),
    ("avr", 4),
    ("avri", 4),
    ("mai", 5),
    ("jui", 6),
    ("juin", 6),
    ("juil", 7),
    ("aoû", 8),
    ("aou", 8),
    ("août", 8),
    ("aout", 8),
    ("sept", 9),
    ("sep", 9),
    ("oct", 10),
    ("octo", 10),
    ("nov", 11),
    ("nove", 11),
    ("déc", 12),
    ("dec", 12),
    ("déce", 12),
    ("dece", 12),
];

/// Month number of a month abbreviation (case-insensitive).
pub fn month_number(abbreviation: &str) -> Option<u32> {
    let lower = abbreviation.to_lowercase();
    MONTHS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, month)| *month)
}

/// Year of a month within the school year containing `reference`.
///
/// School years end in summer: a spring month read in autumn belongs to
/// next year, an autumn month read in spring to last year.
pub fn school_year(reference: NaiveDate, month: u32) -> i32 {
    if month < 7 && reference.month() > 7 {
        return reference.year() + 1;
    }
    if month > 7 && reference.month() < 7 {
        return reference.year() - 1;
    }
    reference.year()
}

/// The first day of a week, as printed next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekDate(NaiveDate);

impl WeekDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a `DD/Mon` or `DD-Mon` label.
    ///
    /// # Arguments
    /// * `label` - The label text, e.g. `"02/oct"`
    /// * `reference` - Date used to infer the year (usually today)
    ///
    /// # Returns
    /// * `Err(ExtractError::DateParseError)` if the label has the wrong shape,
    ///   an unknown month or an impossible day
    pub fn parse(label: &str, reference: NaiveDate) -> ExtractResult<Self> {
        if !WEEK_DATE_PATTERN.is_match(label) {
            return Err(ExtractError::DateParseError(format!(
                "\"{}\" must match {}",
                label,
                WEEK_DATE_PATTERN.as_str()
            )));
        }
        let (day, month) = label
            .split_once(['/', '-'])
            .ok_or_else(|| ExtractError::DateParseError(format!("no separator in \"{}\"", label)))?;
        let day: u32 = day
            .parse()
            .map_err(|e| ExtractError::DateParseError(format!("day of \"{}\": {}", label, e)))?;
        let month = month_number(month).ok_or_else(|| {
            ExtractError::DateParseError(format!("unknown month \"{}\"", month))
        })?;
        let year = school_year(reference, month);
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ExtractError::DateParseError(format!("invalid date \"{}\"", label)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Absolute timestamp `day_offset` days and `time_of_day` after the
    /// start of the week, read as wall-clock time in `tz`.
    ///
    /// An ambiguous wall-clock time takes its earlier instant.
    pub fn at(&self, day_offset: i64, time_of_day: Duration, tz: Tz) -> DateTime<Tz> {
        let local = self.0.and_time(NaiveTime::MIN) + Duration::days(day_offset) + time_of_day;
        // Times skipped by a forward DST change do not exist locally.
        tz.from_local_datetime(&local)
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Paris;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_autumn_label_in_autumn() {
        let date = WeekDate::parse("02/oct", ymd(2023, 9, 1)).unwrap();
        assert_eq!(date.date(), ymd(2023, 10, 2));
    }

    #[test]
    fn test_parse_spring_label_in_autumn_is_next_year() {
        let date = WeekDate::parse("15-janv", ymd(2023, 11, 20)).unwrap();
        assert_eq!(date.date(), ymd(2024, 1, 15));
    }

    #[test]
    fn test_parse_autumn_label_in_spring_is_last_year() {
        let date = WeekDate::parse("04/déc", ymd(2024, 3, 10)).unwrap();
        assert_eq!(date.date(), ymd(2023, 12, 4));
    }

    #[test]
    fn test_parse_rejects_bad_labels() {
        let reference = ymd(2023, 9, 1);
        assert!(WeekDate::parse("2/oct", reference).is_err());
        assert!(WeekDate::parse("02/xyz", reference).is_err());
        assert!(WeekDate::parse("31/nov", reference).is_err());
    }

    #[test]
    fn test_at_combines_day_and_time() {
        let week = WeekDate::new(ymd(2023, 10, 2));
        let ts = week.at(1, Duration::hours(10) + Duration::minutes(15), Paris);
        assert_eq!(ts, Paris.with_ymd_and_hms(2023, 10, 3, 10, 15, 0).unwrap());
    }

    #[test]
    fn test_at_follows_daylight_saving() {
        let nine = Duration::hours(9);
        let summer = WeekDate::new(ymd(2023, 10, 23)).at(0, nine, Paris);
        let winter = WeekDate::new(ymd(2023, 10, 30)).at(0, nine, Paris);
        assert_eq!(summer.naive_utc(), ymd(2023, 10, 23).and_hms_opt(7, 0, 0).unwrap());
        assert_eq!(winter.naive_utc(), ymd(2023, 10, 30).and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(summer.to_rfc3339(), "2023-10-23T09:00:00+02:00");
        assert_eq!(winter.to_rfc3339(), "2023-10-30T09:00:00+01:00");
    }

    #[test]
    fn test_at_in_skipped_hour_does_not_fail() {
        // 2024-03-31 02:30 does not exist in Paris.
        let week = WeekDate::new(ymd(2024, 3, 25));
        let ts = week.at(6, Duration::hours(2) + Duration::minutes(30), Paris);
        assert_eq!(ts.naive_utc(), ymd(2024, 3, 31).and_hms_opt(2, 30, 0).unwrap());
    }

    #[test]
    fn test_month_number_is_case_insensitive() {
        assert_eq!(month_number("Oct"), Some(10));
        assert_eq!(month_number("août"), Some(8));
        assert_eq!(month_number("foo"), None);
    }
}
