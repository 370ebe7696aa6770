//! In-memory page raster serving brightness profiles and colour probes.

use image::{imageops, GrayImage, Luma, RgbImage};

use super::providers::{ColorProbe, ColorRange, ProfileProvider};
use crate::core::geometry::{Area, Point};

/// An RGB page raster.
///
/// Rectangles are clamped to the raster and read as half-open
/// (`x1..x2`, `y1..y2`), like image slicing.
#[derive(Debug, Clone)]
pub struct PageRaster {
    image: RgbImage,
}

impl PageRaster {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Clamped pixel bounds of `area` as `(x1, y1, x2, y2)`.
    fn bounds(&self, area: &Area) -> (u32, u32, u32, u32) {
        let clamp_x = |v: i32| v.clamp(0, self.image.width() as i32) as u32;
        let clamp_y = |v: i32| v.clamp(0, self.image.height() as i32) as u32;
        let (x1, x2) = (area.x1().min(area.x2()), area.x1().max(area.x2()));
        let (y1, y2) = (area.y1().min(area.y2()), area.y1().max(area.y2()));
        (clamp_x(x1), clamp_y(y1), clamp_x(x2), clamp_y(y2))
    }

    /// Copy of the pixels of `area`, `None` when nothing of it is on the
    /// raster.
    pub fn crop(&self, area: &Area) -> Option<RgbImage> {
        let (x1, y1, x2, y2) = self.bounds(area);
        if x2 == x1 || y2 == y1 {
            return None;
        }
        Some(imageops::crop_imm(&self.image, x1, y1, x2 - x1, y2 - y1).to_image())
    }
}

/// Paints `area` white, both corners included.
fn blank(gray: &mut GrayImage, area: &Area) {
    let (width, height) = (gray.width() as i32, gray.height() as i32);
    let left = area.x1().min(area.x2()).max(0);
    let right = area.x1().max(area.x2()).min(width - 1);
    let top = area.y1().min(area.y2()).max(0);
    let bottom = area.y1().max(area.y2()).min(height - 1);
    for y in top..=bottom {
        for x in left..=right {
            gray.put_pixel(x as u32, y as u32, Luma([u8::MAX]));
        }
    }
}

impl ProfileProvider for PageRaster {
    fn average_row_intensity(&self, strip: &Area, blank_out: &[Area], rotate: bool) -> Vec<u8> {
        let Some(crop) = self.crop(strip) else {
            return Vec::new();
        };
        let mut gray = imageops::grayscale(&crop);
        let (x1, y1, _, _) = self.bounds(strip);
        let offset = Point::new(-(x1 as i32), -(y1 as i32));
        for area in blank_out {
            blank(&mut gray, &area.translated(offset));
        }

        let gray = if rotate { imageops::rotate90(&gray) } else { gray };
        gray.rows()
            .map(|row| {
                let (sum, count) = row.fold((0u64, 0u64), |(sum, count), pixel| {
                    (sum + u64::from(pixel.0[0]), count + 1)
                });
                (sum / count) as u8
            })
            .collect()
    }
}

impl ColorProbe for PageRaster {
    fn percent_in_range(&self, region: &Area, range: &ColorRange, grayscale: bool) -> f64 {
        let Some(crop) = self.crop(region) else {
            return 0.0;
        };
        let total = crop.width() as usize * crop.height() as usize;
        let count = if grayscale {
            imageops::grayscale(&crop)
                .pixels()
                .filter(|pixel| range.contains_gray(pixel.0[0]))
                .count()
        } else {
            crop.pixels()
                .filter(|pixel| {
                    let [r, g, b] = pixel.0;
                    range.contains_bgr([b, g, r])
                })
                .count()
        };
        count as f64 * 100.0 / total as f64
    }
}
