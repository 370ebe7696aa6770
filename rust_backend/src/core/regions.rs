//! Ordered collection of areas with the queries the reconstruction needs.

use regex::Regex;

use super::error::{ExtractError, ExtractResult};
use super::geometry::{Area, Point};

/// An ordered collection of [`Area`]s.
///
/// Extraction methods come in pairs: the borrowing form returns copies and
/// leaves the collection untouched, the `take_` form moves the matching
/// members out. Both preserve the relative order of members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionCollection {
    areas: Vec<Area>,
}

impl RegionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, area: Area) {
        self.areas.push(area);
    }

    pub fn extend(&mut self, other: RegionCollection) {
        self.areas.extend(other.areas);
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Area> {
        self.areas.get(index)
    }

    pub fn first(&self) -> Option<&Area> {
        self.areas.first()
    }

    pub fn last(&self) -> Option<&Area> {
        self.areas.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Area> {
        self.areas.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Area> {
        self.areas.iter_mut()
    }

    pub fn as_slice(&self) -> &[Area] {
        &self.areas
    }

    pub fn into_vec(self) -> Vec<Area> {
        self.areas
    }

    /// Stable sort by a key derived from each area.
    pub fn sort_by_key<K: Ord, F: FnMut(&Area) -> K>(&mut self, f: F) {
        self.areas.sort_by_key(f);
    }

    /// Copies of every member fully enclosed by `boundary`.
    pub fn contained(&self, boundary: &Area) -> RegionCollection {
        self.areas
            .iter()
            .filter(|area| boundary.contains(area))
            .cloned()
            .collect()
    }

    /// Moves every member fully enclosed by `boundary` out of the collection.
    pub fn take_contained(&mut self, boundary: &Area) -> RegionCollection {
        self.take_where(|area| boundary.contains(area))
    }

    /// Copies of every member whose text matches `pattern` at its start.
    pub fn matching(&self, pattern: &Regex) -> ExtractResult<RegionCollection> {
        let mut found = RegionCollection::new();
        for area in &self.areas {
            if matches_at_start(pattern, area)? {
                found.push(area.clone());
            }
        }
        Ok(found)
    }

    /// Moves every member whose text matches `pattern` at its start out of
    /// the collection.
    ///
    /// Fails without modifying the collection if a member carries no text.
    pub fn take_matching(&mut self, pattern: &Regex) -> ExtractResult<RegionCollection> {
        let mut selected = Vec::with_capacity(self.areas.len());
        for area in &self.areas {
            selected.push(matches_at_start(pattern, area)?);
        }
        let mut flags = selected.into_iter();
        Ok(self.take_where(|_| flags.next().unwrap_or(false)))
    }

    /// Subtracts `origin` from every member's corners.
    pub fn shift_origin(&mut self, origin: Point) {
        for area in &mut self.areas {
            area.shift_origin(origin);
        }
    }

    /// Removes every frame fully contained by a different frame of the
    /// collection, keeping outer boundaries only. Exact duplicates keep
    /// their first occurrence.
    pub fn overlap_prune(&mut self) {
        let mut unique: Vec<Area> = Vec::with_capacity(self.areas.len());
        for area in self.areas.drain(..) {
            if !unique.iter().any(|kept| kept.same_rect(&area)) {
                unique.push(area);
            }
        }
        let nested: Vec<bool> = unique
            .iter()
            .enumerate()
            .map(|(i, inner)| {
                unique
                    .iter()
                    .enumerate()
                    .any(|(j, outer)| i != j && outer.contains(inner))
            })
            .collect();
        self.areas = unique
            .into_iter()
            .zip(nested)
            .filter_map(|(area, is_nested)| (!is_nested).then_some(area))
            .collect();
    }

    fn take_where<F: FnMut(&Area) -> bool>(&mut self, mut predicate: F) -> RegionCollection {
        let (taken, kept): (Vec<Area>, Vec<Area>) =
            self.areas.drain(..).partition(|area| predicate(area));
        self.areas = kept;
        RegionCollection { areas: taken }
    }
}

fn matches_at_start(pattern: &Regex, area: &Area) -> ExtractResult<bool> {
    let text = area.text().ok_or_else(|| {
        ExtractError::ContentTypeError(format!(
            "area at ({}, {}) has no text content to match against {}",
            area.x1(),
            area.y1(),
            pattern.as_str()
        ))
    })?;
    Ok(pattern.find(text).map_or(false, |m| m.start() == 0))
}

impl From<Vec<Area>> for RegionCollection {
    fn from(areas: Vec<Area>) -> Self {
        Self { areas }
    }
}

impl FromIterator<Area> for RegionCollection {
    fn from_iter<I: IntoIterator<Item = Area>>(iter: I) -> Self {
        Self {
            areas: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RegionCollection {
    type Item = Area;
    type IntoIter = std::vec::IntoIter<Area>;

    fn into_iter(self) -> Self::IntoIter {
        self.areas.into_iter()
    }
}

impl<'a> IntoIterator for &'a RegionCollection {
    type Item = &'a Area;
    type IntoIter = std::slice::Iter<'a, Area>;

    fn into_iter(self) -> Self::IntoIter {
        self.areas.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::AreaContent;

    fn word(x: i32, y: i32, w: i32, h: i32, text: &str) -> Area {
        Area::with_text(Point::new(x, y), Point::new(x + w, y + h), text)
    }

    fn texts(regions: &RegionCollection) -> Vec<&str> {
        regions.iter().filter_map(|a| a.text()).collect()
    }

    #[test]
    fn test_contained_keeps_source() {
        let regions: RegionCollection =
            vec![word(0, 0, 10, 10, "a"), word(50, 50, 10, 10, "b")].into();
        let found = regions.contained(&Area::from_xywh(0, 0, 20, 20));
        assert_eq!(texts(&found), vec!["a"]);
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn test_take_contained_preserves_order() {
        let mut regions: RegionCollection = vec![
            word(0, 0, 10, 10, "a"),
            word(50, 50, 10, 10, "b"),
            word(5, 5, 5, 5, "c"),
            word(70, 0, 10, 10, "d"),
        ]
        .into();
        let taken = regions.take_contained(&Area::from_xywh(0, 0, 20, 20));
        assert_eq!(texts(&taken), vec!["a", "c"]);
        assert_eq!(texts(&regions), vec!["b", "d"]);
    }

    #[test]
    fn test_take_matching_is_anchored() {
        let pattern = Regex::new(r"\d{1,2}h$").unwrap();
        let mut regions: RegionCollection = vec![
            word(0, 0, 10, 10, "8h"),
            word(20, 0, 10, 10, "Cours 9h"),
            word(40, 0, 10, 10, "10h"),
        ]
        .into();
        let hours = regions.take_matching(&pattern).unwrap();
        assert_eq!(texts(&hours), vec!["8h", "10h"]);
        assert_eq!(texts(&regions), vec!["Cours 9h"]);
    }

    #[test]
    fn test_matching_rejects_non_text_content() {
        let pattern = Regex::new(r"^x").unwrap();
        let mut cell = Area::from_xywh(0, 0, 10, 10);
        cell.content = Some(AreaContent::Fragments(vec!["x".to_string()]));
        let mut regions: RegionCollection = vec![word(0, 0, 1, 1, "x"), cell].into();
        let result = regions.take_matching(&pattern);
        assert!(matches!(result, Err(ExtractError::ContentTypeError(_))));
        assert_eq!(regions.len(), 2, "failed extraction must not remove anything");
    }

    #[test]
    fn test_shift_origin_round_trip() {
        let original: RegionCollection =
            vec![word(10, 20, 5, 5, "a"), word(-3, 7, 2, 9, "b")].into();
        let mut shifted = original.clone();
        shifted.shift_origin(Point::new(4, -6));
        assert_eq!(shifted.first().unwrap().p1, Point::new(6, 26));
        shifted.shift_origin(Point::new(-4, 6));
        assert_eq!(shifted, original);
    }

    #[test]
    fn test_overlap_prune_keeps_outer_frames() {
        let mut frames: RegionCollection = vec![
            Area::from_xywh(0, 0, 100, 100),
            Area::from_xywh(10, 10, 20, 20),
            Area::from_xywh(200, 0, 50, 50),
            Area::from_xywh(200, 0, 50, 50),
        ]
        .into();
        frames.overlap_prune();
        assert_eq!(
            frames.into_vec(),
            vec![Area::from_xywh(0, 0, 100, 100), Area::from_xywh(200, 0, 50, 50)]
        );
    }
}
