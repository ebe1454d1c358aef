use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;
use nalgebra::Vector2;

use crate::plate::circle::{Circle, Rgb};
use crate::sim::units::Float;

pub(crate) trait Mask {
    fn is_marked(&self, point: &Vector2<Float>) -> bool;
}

/// Paints every circle whose center lies on the mask and returns how many
/// were painted.
pub(crate) fn recolor(circles: &mut [Circle], mask: &impl Mask, color: Rgb) -> usize {
    let mut painted = 0;
    for circle in circles.iter_mut().filter(|circle| mask.is_marked(&circle.position)) {
        circle.color = color;
        painted += 1;
    }
    painted
}

/// A black and white picture laid over the plate pixel for pixel. A point is
/// marked where the red channel of its pixel is 0.
pub(crate) struct ImageMask {
    image: RgbImage,
}

impl ImageMask {
    pub(crate) fn new(image: RgbImage) -> ImageMask {
        ImageMask { image }
    }

    pub(crate) fn open(path: &Path) -> Result<ImageMask> {
        let image = image::open(path)
            .with_context(|| format!("cannot read mask image {}", path.display()))?
            .to_rgb8();
        log::debug!("Mask image {}x{}", image.width(), image.height());
        Ok(ImageMask::new(image))
    }
}

impl Mask for ImageMask {
    fn is_marked(&self, point: &Vector2<Float>) -> bool {
        if point.x < 0. || point.y < 0. {
            return false;
        }
        self.image
            .get_pixel_checked(point.x as u32, point.y as u32)
            .is_some_and(|pixel| pixel.0[0] == 0)
    }
}

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
// One blank column between glyphs.
const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

#[rustfmt::skip]
const DIGITS: [[u8; GLYPH_HEIGHT]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

/// A row of decimal digits drawn with a 5x7 bitmap font, centered on a point
/// and scaled so that its longest side spans `extent`.
#[derive(Clone, Debug)]
pub(crate) struct DigitMask {
    glyphs: Vec<[u8; GLYPH_HEIGHT]>,
    origin: Vector2<Float>,
    cell: Float,
}

impl DigitMask {
    /// Returns `None` unless `text` is a non-empty string of ASCII digits.
    pub(crate) fn new(text: &str, center: Vector2<Float>, extent: Float) -> Option<DigitMask> {
        if text.is_empty() {
            return None;
        }
        let glyphs = text
            .chars()
            .map(|c| c.to_digit(10).map(|digit| DIGITS[digit as usize]))
            .collect::<Option<Vec<_>>>()?;

        let columns = glyphs.len() * GLYPH_ADVANCE - 1;
        let cell = extent / columns.max(GLYPH_HEIGHT) as Float;
        let size = Vector2::new(columns as Float, GLYPH_HEIGHT as Float) * cell;
        Some(DigitMask {
            glyphs,
            origin: center - size / 2.,
            cell,
        })
    }
}

impl Mask for DigitMask {
    fn is_marked(&self, point: &Vector2<Float>) -> bool {
        let local = (point - self.origin) / self.cell;
        if local.x < 0. || local.y < 0. {
            return false;
        }
        let (column, row) = (local.x as usize, local.y as usize);
        if row >= GLYPH_HEIGHT {
            return false;
        }
        let (glyph, offset) = (column / GLYPH_ADVANCE, column % GLYPH_ADVANCE);
        match self.glyphs.get(glyph) {
            Some(rows) if offset < GLYPH_WIDTH => {
                (rows[row] >> (GLYPH_WIDTH - 1 - offset)) & 1 == 1
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::circle::PALETTE;

    // "1" fills a 5x7 grid of 10-unit cells starting at (0, 0).
    fn one() -> DigitMask {
        DigitMask::new("1", Vector2::new(25., 35.), 70.).unwrap()
    }

    fn cell_center(column: usize, row: usize) -> Vector2<Float> {
        Vector2::new(column as Float * 10. + 5., row as Float * 10. + 5.)
    }

    #[test]
    fn rejects_non_digits() {
        assert!(DigitMask::new("", Vector2::zeros(), 10.).is_none());
        assert!(DigitMask::new("4x", Vector2::zeros(), 10.).is_none());
        assert!(DigitMask::new("42", Vector2::zeros(), 10.).is_some());
    }

    #[test]
    fn marks_the_strokes_of_a_digit() {
        let mask = one();
        assert!(mask.is_marked(&cell_center(2, 0)));
        assert!(mask.is_marked(&cell_center(1, 1)));
        assert!(mask.is_marked(&cell_center(2, 3)));
        assert!(mask.is_marked(&cell_center(3, 6)));
        assert!(!mask.is_marked(&cell_center(0, 0)));
        assert!(!mask.is_marked(&cell_center(4, 3)));
    }

    #[test]
    fn nothing_is_marked_outside_the_text() {
        let mask = one();
        assert!(!mask.is_marked(&Vector2::new(-5., 5.)));
        assert!(!mask.is_marked(&Vector2::new(25., -5.)));
        assert!(!mask.is_marked(&Vector2::new(25., 75.)));
        assert!(!mask.is_marked(&Vector2::new(55., 5.)));
    }

    #[test]
    fn glyphs_are_separated_by_a_blank_column() {
        // "88" spans 11 columns of 10 units.
        let mask = DigitMask::new("88", Vector2::new(55., 35.), 110.).unwrap();
        assert!(mask.is_marked(&cell_center(1, 0)));
        assert!(!mask.is_marked(&cell_center(5, 1)));
        assert!(mask.is_marked(&cell_center(6, 1)));
        assert!(mask.is_marked(&cell_center(10, 1)));
    }

    fn picture() -> ImageMask {
        // Black pixel at (1, 2), dark green one at (3, 0), white elsewhere.
        ImageMask::new(RgbImage::from_fn(4, 3, |x, y| match (x, y) {
            (1, 2) => image::Rgb([0, 0, 0]),
            (3, 0) => image::Rgb([0, 80, 0]),
            _ => image::Rgb([255, 255, 255]),
        }))
    }

    #[test]
    fn image_marks_pixels_with_no_red() {
        let mask = picture();
        assert!(mask.is_marked(&Vector2::new(1.5, 2.9)));
        assert!(mask.is_marked(&Vector2::new(3., 0.)));
        assert!(!mask.is_marked(&Vector2::new(0., 0.)));
        assert!(!mask.is_marked(&Vector2::new(2.2, 2.)));
    }

    #[test]
    fn image_marks_nothing_outside_its_pixels() {
        let mask = picture();
        assert!(!mask.is_marked(&Vector2::new(-0.5, 2.)));
        assert!(!mask.is_marked(&Vector2::new(1., -3.)));
        assert!(!mask.is_marked(&Vector2::new(4., 0.)));
        assert!(!mask.is_marked(&Vector2::new(1., 3.)));
    }

    #[test]
    fn image_mask_loads_from_png() {
        let path = std::env::temp_dir().join("many_body_demos_mask_test.png");
        RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 0]))
            .save(&path)
            .unwrap();
        let mask = ImageMask::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(mask.is_marked(&Vector2::new(1., 1.)));
        assert!(!mask.is_marked(&Vector2::new(2., 1.)));
        assert!(ImageMask::open(&path).is_err());
    }

    #[test]
    fn recolors_only_marked_circles() {
        let mask = one();
        let mut circles = vec![
            Circle::new(cell_center(2, 0), 2., PALETTE[0]),
            Circle::new(cell_center(0, 0), 2., PALETTE[1]),
            Circle::new(cell_center(2, 5), 2., PALETTE[2]),
        ];
        let painted = recolor(&mut circles, &mask, Rgb::BLACK);
        assert_eq!(painted, 2);
        assert_eq!(circles[0].color, Rgb::BLACK);
        assert_eq!(circles[1].color, PALETTE[1]);
        assert_eq!(circles[2].color, Rgb::BLACK);
    }
}
