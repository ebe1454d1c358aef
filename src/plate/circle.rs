use crate::sim::units::Float;
use nalgebra::Vector2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const BLACK: Rgb = Rgb::from_hex(0x000000);

    pub(crate) const fn from_hex(hex: u32) -> Rgb {
        Rgb {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }
}

/// Greens and reds that are hard to tell apart with red-green colorblindness.
pub(crate) const PALETTE: [Rgb; 5] = [
    Rgb::from_hex(0x3EC907),
    Rgb::from_hex(0x65A607),
    Rgb::from_hex(0x8D8E04),
    Rgb::from_hex(0xD34107),
    Rgb::from_hex(0xA52D18),
];

#[derive(Clone, Debug)]
pub(crate) struct Circle {
    pub(crate) position: Vector2<Float>,
    pub(crate) radius: Float,
    pub(crate) color: Rgb,
}

impl Circle {
    pub(crate) fn new(position: Vector2<Float>, radius: Float, color: Rgb) -> Circle {
        Circle {
            position,
            radius,
            color,
        }
    }

    /// Touching circles count as overlapping.
    pub(crate) fn overlaps(&self, other: &Self) -> bool {
        (self.position - other.position).norm() <= self.radius + other.radius
    }

    pub(crate) fn overlaps_any(&self, others: &[Circle]) -> bool {
        others.iter().any(|other| self.overlaps(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(PALETTE[0], Rgb { r: 0x3E, g: 0xC9, b: 0x07 });
        assert_eq!(Rgb::BLACK, Rgb { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn touching_circles_overlap() {
        let circle1 = Circle::new(Vector2::new(0., 0.), 2., Rgb::BLACK);
        let circle2 = Circle::new(Vector2::new(5., 0.), 3., Rgb::BLACK);
        let circle3 = Circle::new(Vector2::new(5.1, 0.), 3., Rgb::BLACK);
        assert!(circle1.overlaps(&circle2));
        assert!(!circle1.overlaps(&circle3));
        assert!(circle1.overlaps_any(&[circle3.clone(), circle2]));
        assert!(!circle1.overlaps_any(&[circle3]));
        assert!(!circle1.overlaps_any(&[]));
    }
}
