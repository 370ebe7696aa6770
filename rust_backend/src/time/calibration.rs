//! Time-axis calibration of a week's hour ruler.
//!
//! The ruler above a week is a row of vertical tick marks (one per quarter
//! hour) with an hour label above some of them. Tick spacing is irregular,
//! so the pixel → time-of-day map is rebuilt for every week from the ticks
//! actually drawn.

use chrono::Duration;
use log::debug;

use crate::config::CalibrationConfig;
use crate::core::axe::Axe;
use crate::core::geometry::{Area, AxisRange, Point};
use crate::core::regions::RegionCollection;
use crate::io::providers::ProfileProvider;
use crate::parsing::labels::parse_hour;

/// Scans a brightness profile for tick marks.
///
/// A value below `dark` starts a tick, recorded at its index; the scan then
/// skips every following value below `release`.
///
/// # Examples
///
/// ```
/// use edt_rust::time::calibration::detect_ticks;
///
/// let profile = [255, 40, 120, 180, 255, 255, 90, 255];
/// assert_eq!(detect_ticks(&profile, 150, 200), vec![1, 6]);
/// ```
pub fn detect_ticks(profile: &[u8], dark: u8, release: u8) -> Vec<i32> {
    let mut ticks = Vec::new();
    let mut inside = false;
    for (index, &value) in profile.iter().enumerate() {
        if inside {
            if value < release {
                continue;
            }
            inside = false;
        }
        if value < dark {
            ticks.push(index as i32);
            inside = true;
        }
    }
    ticks
}

/// Binds hour labels to ticks.
///
/// Labels are read left to right. The ruler start is seeded with the hour
/// before the first label, then each label binds the last tick strictly
/// left of its horizontal midpoint. The hour after the last label is
/// extrapolated from the spacing of the last two bound hours, and may add
/// ticks to `ticks`.
///
/// # Arguments
/// * `labels` - Hour labels (`"9h"`) in the same space as `ticks`
/// * `ticks` - Tick positions, increasing
/// * `margin` - Horizontal extent of the week
///
/// # Returns
/// * The hour axis, empty when no label carries an hour
pub fn bind_hours(labels: &RegionCollection, ticks: &mut Vec<i32>, margin: AxisRange) -> Axe<u32> {
    let mut sorted: Vec<(&Area, u32)> = labels
        .iter()
        .filter_map(|label| label.text().and_then(parse_hour).map(|hour| (label, hour)))
        .collect();
    sorted.sort_by_key(|(label, _)| label.x1());

    let mut bound: Vec<(i32, u32)> = Vec::with_capacity(sorted.len() + 2);
    let Some(&(_, first_hour)) = sorted.first() else {
        return Axe::new();
    };
    bound.push((margin.a, first_hour.saturating_sub(1)));

    for (label, hour) in &sorted {
        let middle = label.to_range(margin.axis).middle();
        let Some(tick) = ticks.iter().rev().find(|&&t| f64::from(t) < middle).copied() else {
            debug!("No tick left of hour label \"{}h\", skipped", hour);
            continue;
        };
        push_binding(&mut bound, tick, *hour);
    }

    if let Some(&(_, last_hour)) = sorted.last() {
        extrapolate_last_hour(&mut bound, ticks, last_hour + 1);
    }
    bound.into_iter().collect()
}

/// Appends a binding if it keeps keys strictly increasing and hours
/// non-decreasing.
fn push_binding(bound: &mut Vec<(i32, u32)>, tick: i32, hour: u32) -> bool {
    if let Some(&(last_tick, last_hour)) = bound.last() {
        if tick <= last_tick || hour < last_hour {
            debug!("Hour {} at {} breaks axis order, skipped", hour, tick);
            return false;
        }
    }
    bound.push((tick, hour));
    true
}

fn extrapolate_last_hour(bound: &mut Vec<(i32, u32)>, ticks: &mut Vec<i32>, hour: u32) {
    if bound.len() < 2 {
        return;
    }
    let (previous_key, _) = bound[bound.len() - 2];
    let (last_key, _) = bound[bound.len() - 1];
    let previous = (previous_key - last_key).abs();

    let last_tick = match ticks.last() {
        Some(&tick) if tick > last_key => tick,
        _ => {
            // The ruler ends on the last label: close the hour one span later.
            let synthetic = last_key + previous;
            ticks.push(synthetic);
            push_binding(bound, synthetic, hour);
            return;
        }
    };
    let current = last_tick - last_key;

    if f64::from((previous - current).abs()) > (f64::from(previous) / 2.0 - f64::from(current)).abs() {
        ticks.push(last_tick + current / 2);
        ticks.push(last_tick + current);
        push_binding(bound, last_tick + current, hour);
    } else {
        push_binding(bound, last_tick, hour);
    }
}

/// Expands an hour axis into a quarter-hour time axis.
///
/// Ticks are grouped by the bound hour they follow. Each group should hold
/// four quarter ticks: a group of three gets the midpoint of its first two
/// ticks inserted, and any other size (except a lone closing tick) is
/// rebuilt as four evenly spaced ticks up to the next tick.
///
/// # Arguments
/// * `ticks` - Tick positions, increasing
/// * `hours` - Hour axis from [`bind_hours`]
///
/// # Returns
/// * Tick position → time of day, strictly increasing keys and
///   non-decreasing values
pub fn build_time_axis(ticks: &[i32], hours: &Axe<u32>) -> Axe<Duration> {
    let keys: Vec<(i32, u32)> = hours.iter().map(|(key, hour)| (key, *hour)).collect();
    let mut axis = Axe::new();
    let mut last: Option<(i32, Duration)> = None;

    for (index, &(key, hour)) in keys.iter().enumerate() {
        let upper = keys.get(index + 1).map(|(next, _)| *next);
        let mut group: Vec<i32> = ticks
            .iter()
            .copied()
            .filter(|&t| t >= key && upper.map_or(true, |u| t < u))
            .collect();
        if group.is_empty() {
            continue;
        }

        match group.len() {
            1 | 4 => {}
            3 => group.insert(1, (group[0] + group[1]) / 2),
            _ => {
                let group_last = group[group.len() - 1];
                if let Some(&next) = ticks.iter().find(|&&t| t > group_last) {
                    let first = group[0];
                    let step = f64::from(next - first) / 4.0;
                    group = (0..4i32)
                        .map(|i| first + (f64::from(i) * step) as i32)
                        .collect();
                }
            }
        }

        for (quarter, tick) in group.into_iter().enumerate() {
            let time = Duration::hours(i64::from(hour)) + Duration::minutes(15 * quarter as i64);
            let ordered = last.map_or(true, |(last_tick, last_time)| {
                tick > last_tick && time >= last_time
            });
            if ordered {
                axis.insert(tick, time);
                last = Some((tick, time));
            }
        }
    }
    axis
}

/// A calibrated hour ruler.
#[derive(Debug, Clone, Default)]
pub struct Hours {
    ticks: Vec<i32>,
    hour_axe: Axe<u32>,
    time_axe: Axe<Duration>,
}

impl Hours {
    /// Calibrates the ruler of a week.
    ///
    /// # Arguments
    /// * `hour_labels` - Hour labels, week-local
    /// * `id_labels` - Week id labels, week-local; blanked with the hour
    ///   labels so their strokes are not read as ticks
    /// * `margin` - Horizontal extent of the week, week-local
    /// * `origin` - Page position of the week's local origin
    /// * `profile` - Brightness profile source
    /// * `settings` - Tick thresholds
    ///
    /// # Returns
    /// * The calibrated ruler; its time axis is empty when there are no
    ///   hour labels
    pub fn calibrate(
        hour_labels: &RegionCollection,
        id_labels: &RegionCollection,
        margin: AxisRange,
        origin: Point,
        profile: &dyn ProfileProvider,
        settings: &CalibrationConfig,
    ) -> Self {
        let Some(first) = hour_labels.first() else {
            return Self::default();
        };

        let strip = Area::new(
            Point::new(margin.a, first.y1()),
            Point::new(margin.b, first.y2()),
        )
        .translated(origin);
        let blank_out: Vec<Area> = hour_labels
            .iter()
            .chain(id_labels.iter())
            .map(|label| label.translated(origin))
            .collect();

        let values = profile.average_row_intensity(&strip, &blank_out, true);
        let mut ticks: Vec<i32> = detect_ticks(&values, settings.dark_threshold, settings.release_threshold)
            .into_iter()
            .map(|tick| tick + margin.a)
            .collect();

        let hour_axe = bind_hours(hour_labels, &mut ticks, margin);
        let time_axe = build_time_axis(&ticks, &hour_axe);
        debug!(
            "Calibrated {} ticks against {} hours into {} time marks",
            ticks.len(),
            hour_axe.len(),
            time_axe.len()
        );

        Self {
            ticks,
            hour_axe,
            time_axe,
        }
    }

    /// Builds a ruler from an already known time axis.
    pub fn from_time_axe(time_axe: Axe<Duration>) -> Self {
        Self {
            ticks: time_axe.keys().collect(),
            hour_axe: Axe::new(),
            time_axe,
        }
    }

    pub fn ticks(&self) -> &[i32] {
        &self.ticks
    }

    pub fn hour_axe(&self) -> &Axe<u32> {
        &self.hour_axe
    }

    pub fn time_axe(&self) -> &Axe<Duration> {
        &self.time_axe
    }

    /// Time of day closest to horizontal position `x`.
    pub fn time_at(&self, x: i32) -> Option<Duration> {
        self.time_axe.nearest(x).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.time_axe.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Axis;

    fn hm(hours: i64, minutes: i64) -> Duration {
        Duration::hours(hours) + Duration::minutes(minutes)
    }

    fn hour_label(x1: i32, x2: i32, text: &str) -> Area {
        Area::with_text(Point::new(x1, 5), Point::new(x2, 30), text)
    }

    /// Ruler with black ticks at the given columns.
    struct Ruler {
        columns: Vec<i32>,
    }

    impl ProfileProvider for Ruler {
        fn average_row_intensity(&self, strip: &Area, blank_out: &[Area], _rotate: bool) -> Vec<u8> {
            (strip.x1()..strip.x2())
                .map(|x| {
                    let hidden = blank_out.iter().any(|a| a.x1() <= x && x <= a.x2());
                    if self.columns.contains(&x) && !hidden {
                        0
                    } else {
                        255
                    }
                })
                .collect()
        }
    }

    #[test]
    fn test_detect_ticks_skips_tick_body() {
        let profile = [255, 100, 140, 190, 199, 200, 149, 255];
        assert_eq!(detect_ticks(&profile, 150, 200), vec![1, 6]);
        assert!(detect_ticks(&[], 150, 200).is_empty());
    }

    #[test]
    fn test_four_tick_hour_group() {
        let ticks = [100, 140, 180, 220, 260];
        let hours: Axe<u32> = vec![(100, 8), (260, 9)].into_iter().collect();
        let axis = build_time_axis(&ticks, &hours);
        let entries: Vec<(i32, Duration)> = axis.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(
            entries,
            vec![
                (100, hm(8, 0)),
                (140, hm(8, 15)),
                (180, hm(8, 30)),
                (220, hm(8, 45)),
                (260, hm(9, 0)),
            ]
        );
    }

    #[test]
    fn test_short_hour_before_closing_tick() {
        // Only three quarter ticks between 8h and 9h.
        let ticks = [100, 140, 180, 220];
        let hours: Axe<u32> = vec![(100, 8), (220, 9)].into_iter().collect();
        let axis = build_time_axis(&ticks, &hours);
        let entries: Vec<(i32, Duration)> = axis.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(
            entries,
            vec![
                (100, hm(8, 0)),
                (120, hm(8, 15)),
                (140, hm(8, 30)),
                (180, hm(8, 45)),
                (220, hm(9, 0)),
            ]
        );
    }

    #[test]
    fn test_three_tick_group_gets_midpoint() {
        let ticks = [300, 320, 340];
        let hours: Axe<u32> = vec![(300, 10)].into_iter().collect();
        let axis = build_time_axis(&ticks, &hours);
        let entries: Vec<(i32, Duration)> = axis.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(
            entries,
            vec![
                (300, hm(10, 0)),
                (310, hm(10, 15)),
                (320, hm(10, 30)),
                (340, hm(10, 45)),
            ]
        );
    }

    #[test]
    fn test_two_tick_group_is_rebuilt_up_to_next_tick() {
        let ticks = [0, 50, 200];
        let hours: Axe<u32> = vec![(0, 8), (200, 9)].into_iter().collect();
        let axis = build_time_axis(&ticks, &hours);
        assert_eq!(axis.keys().collect::<Vec<_>>(), vec![0, 50, 100, 150, 200]);
        assert_eq!(axis.get(150), Some(&hm(8, 45)));
        assert_eq!(axis.get(200), Some(&hm(9, 0)));
    }

    #[test]
    fn test_bind_hours_seeds_and_extrapolates() {
        let labels: RegionCollection = vec![
            hour_label(105, 135, "9h"),
            hour_label(505, 535, "10h"),
        ]
        .into();
        let mut ticks = vec![100, 200, 300, 400, 500, 600, 700, 800, 900];
        let margin = AxisRange::new(0, 2000, Axis::Horizontal);
        let hours = bind_hours(&labels, &mut ticks, margin);
        let entries: Vec<(i32, u32)> = hours.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(entries, vec![(0, 8), (100, 9), (500, 10), (900, 11)]);
    }

    #[test]
    fn test_bind_hours_adds_missing_last_hour() {
        let labels: RegionCollection = vec![
            hour_label(105, 135, "9h"),
            hour_label(505, 535, "10h"),
        ]
        .into();
        // The ruler stops half way through the last hour.
        let mut ticks = vec![100, 200, 300, 400, 500, 600, 700];
        let margin = AxisRange::new(0, 2000, Axis::Horizontal);
        let hours = bind_hours(&labels, &mut ticks, margin);
        assert_eq!(hours.last().map(|(k, v)| (k, *v)), Some((900, 11)));
        assert_eq!(&ticks[ticks.len() - 2..], &[800, 900]);
    }

    #[test]
    fn test_label_without_tick_is_skipped() {
        let labels: RegionCollection = vec![hour_label(5, 15, "8h"), hour_label(105, 135, "9h")].into();
        let mut ticks = vec![100, 200, 300, 400, 500];
        let margin = AxisRange::new(0, 600, Axis::Horizontal);
        let hours = bind_hours(&labels, &mut ticks, margin);
        assert_eq!(hours.get(0), Some(&7));
        assert_eq!(hours.get(100), Some(&9));
    }

    #[test]
    fn test_calibrate_without_labels_is_empty() {
        let ruler = Ruler { columns: vec![10, 20] };
        let hours = Hours::calibrate(
            &RegionCollection::new(),
            &RegionCollection::new(),
            AxisRange::new(0, 100, Axis::Horizontal),
            Point::new(0, 0),
            &ruler,
            &CalibrationConfig::default(),
        );
        assert!(hours.is_empty());
        assert_eq!(hours.time_at(10), None);
    }

    #[test]
    fn test_calibrate_reads_page_space_ruler() {
        let origin = Point::new(50, 50);
        let ruler = Ruler {
            columns: (1..=13).map(|i| 50 + i * 100).collect(),
        };
        let labels: RegionCollection = vec![
            hour_label(105, 135, "9h"),
            hour_label(505, 535, "10h"),
            hour_label(905, 935, "11h"),
        ]
        .into();
        let hours = Hours::calibrate(
            &labels,
            &RegionCollection::new(),
            AxisRange::new(0, 2000, Axis::Horizontal),
            origin,
            &ruler,
            &CalibrationConfig::default(),
        );
        assert_eq!(hours.time_at(100), Some(hm(9, 0)));
        assert_eq!(hours.time_at(240), Some(hm(9, 15)));
        assert_eq!(hours.time_at(500), Some(hm(10, 0)));
        assert_eq!(hours.time_at(1200), Some(hm(11, 45)));
        assert_eq!(hours.time_at(1300), Some(hm(12, 0)));

        let keys: Vec<i32> = hours.time_axe().keys().collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        let values: Vec<Duration> = hours.time_axe().iter().map(|(_, v)| *v).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }
}
