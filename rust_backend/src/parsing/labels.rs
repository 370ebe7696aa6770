//! Patterns recognising the printed labels of a timetable.

use once_cell::sync::Lazy;
use regex::Regex;

/// Week date printed left of each week, e.g. `02/oct` or `16-jan`.
pub static WEEK_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}[/-][a-zA-Zéû]{3,4}$").expect("valid week date pattern"));

/// Hour label of the time ruler, e.g. `8h`.
pub static HOUR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}h$").expect("valid hour pattern"));

/// Day name heading a day row.
pub static DAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Lundi|Mardi|Mercredi|Jeudi|Vendredi|Samedi|Dimanche)$")
        .expect("valid day pattern")
});

/// Week number, optionally prefixed by `S`, e.g. `S40` or `7`.
pub static WEEK_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[Ss]?((\d)|([0-4]\d)|(5[0-3]))$").expect("valid week id pattern")
});

const DAY_NAMES: [&str; 7] = [
    "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
];

/// Chronological index of a day name, 0 for Monday.
pub fn day_index(name: &str) -> Option<i64> {
    DAY_NAMES
        .iter()
        .position(|day| *day == name)
        .map(|index| index as i64)
}

/// Hour value of an hour label (`"9h"` → 9).
pub fn parse_hour(label: &str) -> Option<u32> {
    label.trim_end_matches('h').parse().ok()
}

/// Week number of a week id label (`"S40"` → 40).
pub fn parse_week_id(label: &str) -> Option<u32> {
    label.trim_start_matches(['S', 's']).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns() {
        assert!(WEEK_DATE_PATTERN.is_match("02/oct"));
        assert!(WEEK_DATE_PATTERN.is_match("14-févr"));
        assert!(!WEEK_DATE_PATTERN.is_match("2/oct"));
        assert!(HOUR_PATTERN.is_match("8h"));
        assert!(HOUR_PATTERN.is_match("12h"));
        assert!(!HOUR_PATTERN.is_match("12h30"));
        assert!(DAY_PATTERN.is_match("Mercredi"));
        assert!(!DAY_PATTERN.is_match("lundi"));
        assert!(WEEK_ID_PATTERN.is_match("S40"));
        assert!(WEEK_ID_PATTERN.is_match("7"));
        assert!(!WEEK_ID_PATTERN.is_match("S54"));
    }

    #[test]
    fn test_day_index() {
        assert_eq!(day_index("Lundi"), Some(0));
        assert_eq!(day_index("Dimanche"), Some(6));
        assert_eq!(day_index("Monday"), None);
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_hour("9h"), Some(9));
        assert_eq!(parse_hour("h"), None);
        assert_eq!(parse_week_id("S40"), Some(40));
        assert_eq!(parse_week_id("s7"), Some(7));
    }
}
