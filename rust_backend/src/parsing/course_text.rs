//! Splitting the text of a class cell into subject, teacher and location.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::domain::CourseText;

/// Room, amphitheatre or visio location, e.g. `U3-205`, `Amphi B`, `Zoom`.
static LOCATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z]\d-.*|\dA-.*|Amphi .*|.*Zoom|.*ZOOM").expect("valid location pattern")
});

/// Teacher initials at the end of the subject line, e.g. ` (ABC)`,
/// ` (AB/CD)` or `- XY`.
static TEACHER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"( \([A-Z]{2,3}\)$)|( \([A-Z]{2,3}/[A-Z]{2,3}\)$)|(-\s*[A-Z]{2,3}$)")
        .expect("valid teacher pattern")
});

static TEACHER_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ ()\-]").expect("valid teacher noise pattern"));

/// Decomposes the fragments of a class cell.
///
/// Locations are pulled out first, wherever they appear. With a single
/// fragment left, trailing teacher initials are split from the subject;
/// with two or more, the first is the subject and the second the teacher.
/// A cell with nothing left gets `unknown` as subject.
///
/// # Arguments
/// * `fragments` - Cell text, in reading order
/// * `unknown` - Subject used when the cell only holds a location
///
/// # Examples
///
/// ```
/// use edt_rust::parsing::course_text::decompose;
///
/// let text = decompose(&["Algorithmique (ABC)".to_string(), "U3-205".to_string()], "Inconnu");
/// assert_eq!(text.subject, "Algorithmique");
/// assert_eq!(text.teacher, "ABC");
/// assert_eq!(text.location, "U3-205");
/// ```
pub fn decompose(fragments: &[String], unknown: &str) -> CourseText {
    let mut remaining: Vec<String> = fragments.to_vec();
    let location = take_locations(&mut remaining);

    let (subject, teacher) = match remaining.as_slice() {
        [] => (unknown.to_string(), String::new()),
        [only] => split_teacher(only),
        [subject, teacher, ..] => (subject.clone(), teacher.clone()),
    };

    CourseText {
        subject,
        teacher,
        location,
    }
}

/// Removes location matches from `fragments` and returns them joined.
fn take_locations(fragments: &mut Vec<String>) -> String {
    let found: Vec<String> = fragments
        .iter()
        .filter_map(|fragment| LOCATION_PATTERN.find(fragment))
        .map(|m| m.as_str().to_string())
        .collect();

    for location in &found {
        if let Some(index) = fragments.iter().position(|f| f == location) {
            fragments.remove(index);
            continue;
        }
        for fragment in fragments.iter_mut() {
            if fragment.contains(location.as_str()) {
                *fragment = fragment.replace(location.as_str(), "").trim().to_string();
            }
        }
        fragments.retain(|f| !f.is_empty());
    }
    found.concat()
}

fn split_teacher(line: &str) -> (String, String) {
    match TEACHER_PATTERN.find(line) {
        Some(m) => {
            let subject = line.replacen(m.as_str(), "", 1).trim().to_string();
            let teacher = TEACHER_NOISE.replace_all(m.as_str(), "").into_owned();
            (subject, teacher)
        }
        None => (line.trim().to_string(), String::new()),
    }
}
