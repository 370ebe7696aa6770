//! Detection overlays: the elements found on a page, drawn over its raster.
//!
//! Page overlays frame every word and every reconstructed week. Week
//! overlays are cropped to the week and frame its detected frames, class
//! cells and day rows, with a short mark at each calibrated tick.

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::path::Path;

use crate::algorithms::week::Week;
use crate::core::geometry::Area;
use crate::core::regions::RegionCollection;
use crate::io::raster::PageRaster;

pub const WORD_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const WEEK_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const FRAME_COLOR: Rgb<u8> = Rgb([216, 191, 216]);
pub const CLASS_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const DAY_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const TICK_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// Stroke width, in pixels.
const STROKE: i32 = 2;
/// Length of a tick mark, from the top of the week.
const TICK_LENGTH: i32 = 30;

/// Fills the rectangle `(x1, y1)..=(x2, y2)`, clipped to the image.
fn fill(image: &mut RgbImage, (x1, y1): (i32, i32), (x2, y2): (i32, i32), color: Rgb<u8>) {
    let (width, height) = (image.width() as i32, image.height() as i32);
    for y in y1.max(0)..=y2.min(height - 1) {
        for x in x1.max(0)..=x2.min(width - 1) {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draws the outline of `area`, strokes inside its edges.
pub fn frame(image: &mut RgbImage, area: &Area, color: Rgb<u8>) {
    let (left, right) = (area.x1().min(area.x2()), area.x1().max(area.x2()));
    let (top, bottom) = (area.y1().min(area.y2()), area.y1().max(area.y2()));
    let inset = STROKE - 1;
    fill(image, (left, top), (right, top + inset), color);
    fill(image, (left, bottom - inset), (right, bottom), color);
    fill(image, (left, top), (left + inset, bottom), color);
    fill(image, (right - inset, top), (right, bottom), color);
}

/// Draws a vertical tick mark at column `x`.
pub fn tick(image: &mut RgbImage, x: i32, color: Rgb<u8>) {
    fill(image, (x, 0), (x + STROKE - 1, TICK_LENGTH), color);
}

/// The page raster with its words and weeks framed.
///
/// # Arguments
/// * `raster` - The page raster
/// * `words` - Page words, page space
/// * `weeks` - Weeks reconstructed from the page
pub fn page_overlay(raster: &PageRaster, words: &RegionCollection, weeks: &[Week]) -> RgbImage {
    let mut image = raster.image().clone();
    for word in words {
        frame(&mut image, word, WORD_COLOR);
    }
    for week in weeks {
        frame(&mut image, &week.bounds.translated(week.origin), WEEK_COLOR);
    }
    image
}

/// The week's part of the page raster with its detected elements drawn.
///
/// # Returns
/// * `None` if the week lies outside the raster
pub fn week_overlay(raster: &PageRaster, week: &Week) -> Option<RgbImage> {
    let mut image = raster.crop(&week.bounds.translated(week.origin))?;
    for area in &week.frames {
        frame(&mut image, area, FRAME_COLOR);
    }
    for area in &week.classes {
        frame(&mut image, area, CLASS_COLOR);
    }
    for day in &week.days {
        frame(&mut image, &day.area, DAY_COLOR);
    }
    for x in week.hours.time_axe().keys() {
        tick(&mut image, x, TICK_COLOR);
    }
    Some(image)
}

/// Saves an overlay; the format follows the file extension.
pub fn save(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to save overlay: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::week::DayColumn;
    use crate::core::axe::Axe;
    use crate::core::geometry::Point;
    use crate::time::calibration::Hours;
    use crate::time::week_date::WeekDate;
    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, WHITE)
    }

    fn week() -> Week {
        let axe: Axe<Duration> = vec![(50, Duration::hours(9)), (90, Duration::hours(10))]
            .into_iter()
            .collect();
        Week {
            date: WeekDate::new(NaiveDate::from_ymd_opt(2023, 10, 2).unwrap()),
            id: None,
            origin: Point::new(20, 10),
            bounds: Area::from_xywh(0, 0, 150, 100),
            days: vec![DayColumn {
                name: "Lundi".to_string(),
                offset: 0,
                area: Area::from_xywh(0, 40, 40, 60),
            }],
            hours: Hours::from_time_axe(axe),
            frames: vec![Area::from_xywh(100, 40, 40, 30)].into(),
            classes: vec![Area::from_xywh(50, 40, 40, 60)].into(),
        }
    }

    #[test]
    fn test_frame_draws_outline_only() {
        let mut image = blank(20, 20);
        frame(&mut image, &Area::from_xywh(2, 2, 10, 10), CLASS_COLOR);
        assert_eq!(*image.get_pixel(2, 2), CLASS_COLOR);
        assert_eq!(*image.get_pixel(3, 7), CLASS_COLOR);
        assert_eq!(*image.get_pixel(12, 12), CLASS_COLOR);
        assert_eq!(*image.get_pixel(7, 7), WHITE);
        assert_eq!(*image.get_pixel(15, 15), WHITE);
    }

    #[test]
    fn test_frame_is_clipped_to_image() {
        let mut image = blank(10, 10);
        frame(&mut image, &Area::from_xywh(-5, -5, 30, 30), WEEK_COLOR);
        assert_eq!(*image.get_pixel(5, 5), WHITE);
        frame(&mut image, &Area::from_xywh(50, 50, 10, 10), WEEK_COLOR);
        assert!(image.pixels().all(|pixel| *pixel == WHITE));
    }

    #[test]
    fn test_page_overlay_frames_words_and_weeks() {
        let raster = PageRaster::new(blank(200, 150));
        let words: RegionCollection = vec![Area::with_text(Point::new(5, 5), Point::new(15, 12), "9h")].into();
        let image = page_overlay(&raster, &words, &[week()]);

        assert_eq!(*image.get_pixel(5, 8), WORD_COLOR);
        assert_eq!(*image.get_pixel(20, 50), WEEK_COLOR);
        assert_eq!(*image.get_pixel(170, 110), WEEK_COLOR);
        assert_eq!(*raster.image().get_pixel(5, 8), WHITE);
    }

    #[test]
    fn test_week_overlay_is_week_local() {
        let raster = PageRaster::new(blank(200, 150));
        let image = week_overlay(&raster, &week()).unwrap();

        assert_eq!(image.dimensions(), (150, 100));
        assert_eq!(*image.get_pixel(100, 55), FRAME_COLOR);
        assert_eq!(*image.get_pixel(70, 40), CLASS_COLOR);
        assert_eq!(*image.get_pixel(0, 70), DAY_COLOR);
        assert_eq!(*image.get_pixel(90, 10), TICK_COLOR);
        assert_eq!(*image.get_pixel(90, 31), WHITE);
    }

    #[test]
    fn test_week_outside_raster_has_no_overlay() {
        let raster = PageRaster::new(blank(10, 10));
        assert!(week_overlay(&raster, &week()).is_none());
    }

    #[test]
    fn test_save_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page-0.png");
        save(&blank(4, 4), &path).unwrap();
        assert_eq!(image::open(&path).unwrap().to_rgb8().dimensions(), (4, 4));

        assert!(save(&blank(4, 4), &dir.path().join("missing").join("page.png")).is_err());
    }
}
