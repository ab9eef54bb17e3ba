// Controller memory addressing.
//
// Text plane: one byte per character cell, row-major.
// Graphic plane: `font_width` pixels per byte, MSB first, row-major.
// CG RAM: 8 bytes per glyph starting at the bank picked by the offset register.
//
// None of these clamp. Callers validate with `Geometry::coordinate` first;
// out-of-range inputs wrap instead of panicking.

use embedded_graphics::prelude::Point;

use crate::geometry::{Geometry, GLYPH_BYTES};

/// A pixel position known to lie inside the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub x: u16,
    pub y: u16,
}

impl From<Coordinate> for Point {
    fn from(c: Coordinate) -> Self {
        Point::new(c.x as i32, c.y as i32)
    }
}

/// Truncate a real-valued coordinate toward zero.
///
/// Callers pass centering arithmetic like `width / 2.0 - radius`. NaN and
/// infinities map to `i32::MIN` so they fail the range check later instead of
/// landing on pixel 0.
pub fn truncate(v: f32) -> i32 {
    if v.is_finite() {
        libm::truncf(v) as i32
    } else {
        i32::MIN
    }
}

/// `Point` from real-valued coordinates, truncated toward zero.
pub fn point_f32(x: f32, y: f32) -> Point {
    Point::new(truncate(x), truncate(y))
}

impl Geometry {
    /// Validate a pixel position against the panel size.
    pub fn coordinate(&self, x: i32, y: i32) -> Option<Coordinate> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        if x < self.pixels_per_line() && y < self.lines() {
            Some(Coordinate { x, y })
        } else {
            None
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.coordinate(p.x, p.y).is_some()
    }

    /// Address of text cell (`col`, `row`).
    #[inline]
    pub fn text_address(&self, col: u16, row: u16) -> u16 {
        self.text_home()
            .wrapping_add(col)
            .wrapping_add(self.text_area().wrapping_mul(row))
    }

    /// Address of the graphic byte holding pixel (`x`, `y`).
    #[inline]
    pub fn graphic_address(&self, x: u16, y: u16) -> u16 {
        self.graphic_home()
            .wrapping_add(x / self.font_width().pixels())
            .wrapping_add(self.graphic_area().wrapping_mul(y))
    }

    /// Address of the first byte of CG glyph `slot`.
    #[inline]
    pub fn cg_address(&self, slot: u8) -> u16 {
        self.cg_home().wrapping_add(GLYPH_BYTES * slot as u16)
    }

    /// Bit of the graphic byte holding column `x`.
    #[inline]
    pub fn bit_offset(&self, x: u16) -> u8 {
        let fw = self.font_width().pixels();
        (fw - 1 - (x % fw)) as u8
    }

    /// Mask for pixel column `x` within its graphic byte.
    #[inline]
    pub fn pixel_mask(&self, x: u16) -> u8 {
        1 << self.bit_offset(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Config, FontWidth};

    fn geometry(font: FontWidth) -> Geometry {
        Config::default().with_font_width(font).geometry().unwrap()
    }

    #[test]
    fn graphic_address_of_corners() {
        let g = geometry(FontWidth::Eight);
        assert_eq!(g.graphic_address(0, 0), 480);
        assert_eq!(g.graphic_address(7, 0), 480);
        assert_eq!(g.graphic_address(8, 0), 481);
        assert_eq!(g.graphic_address(239, 127), 480 + 29 + 30 * 127);
    }

    #[test]
    fn graphic_address_increases_down_and_across() {
        for font in [FontWidth::Six, FontWidth::Eight] {
            let g = geometry(font);
            for x in (0..g.pixels_per_line()).step_by(7) {
                for y in 1..g.lines() {
                    assert!(g.graphic_address(x, y) > g.graphic_address(x, y - 1));
                }
            }
            for y in (0..g.lines()).step_by(5) {
                for x in 1..g.pixels_per_line() {
                    assert!(g.graphic_address(x, y) >= g.graphic_address(x - 1, y));
                }
            }
        }
    }

    #[test]
    fn bit_offset_is_msb_first() {
        let g = geometry(FontWidth::Eight);
        assert_eq!(g.bit_offset(0), 7);
        assert_eq!(g.bit_offset(7), 0);
        assert_eq!(g.bit_offset(9), 6);
        assert_eq!(g.pixel_mask(0), 0x80);

        let g = geometry(FontWidth::Six);
        assert_eq!(g.bit_offset(0), 5);
        assert_eq!(g.bit_offset(5), 0);
        assert_eq!(g.bit_offset(6), 5);
        assert_eq!(g.pixel_mask(6), 0x20);
    }

    #[test]
    fn text_and_cg_addresses() {
        let g = geometry(FontWidth::Eight);
        assert_eq!(g.text_address(0, 0), 0);
        assert_eq!(g.text_address(3, 2), 3 + 60);
        assert_eq!(g.cg_address(0), 0x1000);
        assert_eq!(g.cg_address(0x80), 0x1400);
        assert_eq!(g.cg_address(255), 0x1000 + 8 * 255);
    }

    #[test]
    fn coordinate_bounds() {
        let g = geometry(FontWidth::Eight);
        assert_eq!(g.coordinate(0, 0), Some(Coordinate { x: 0, y: 0 }));
        assert_eq!(g.coordinate(239, 127), Some(Coordinate { x: 239, y: 127 }));
        assert_eq!(g.coordinate(240, 0), None);
        assert_eq!(g.coordinate(0, 128), None);
        assert_eq!(g.coordinate(-1, 5), None);
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(truncate(70.9), 70);
        assert_eq!(truncate(-0.5), 0);
        assert_eq!(truncate(-1.5), -1);
        assert_eq!(truncate(f32::NAN), i32::MIN);
        assert_eq!(point_f32(240.0 / 2.0 - 50.0, 128.0 / 2.0 - 50.0), Point::new(70, 14));
    }
}
