// Pixel drawing on the graphic plane.
//
// Every pixel is a full read-modify-write of its byte on the controller:
// pointer set, read-in-place, write-and-increment. Shapes are range-checked
// up front, so a rejected shape leaves the screen untouched.

use embedded_graphics::pixelcolor::BinaryColor;

use crate::addressing::Coordinate;
use crate::bus::Bus;
use crate::display::T6963;
use crate::error::{Error, Result};

impl<B: Bus> T6963<B> {
    /// Set or clear pixel (`x`, `y`).
    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) -> Result<(), B::Error> {
        let c = self.checked(x, y)?;
        self.plot(c, color)
    }

    /// Read back pixel (`x`, `y`).
    pub fn get_pixel(&mut self, x: i32, y: i32) -> Result<BinaryColor, B::Error> {
        let c = self.checked(x, y)?;
        let address = self.geometry.graphic_address(c.x, c.y);
        let byte = self.read_byte(address)?;
        Ok(BinaryColor::from(byte & self.geometry.pixel_mask(c.x) != 0))
    }

    /// Bresenham line from (`x1`, `y1`) to (`x2`, `y2`), both ends included.
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: BinaryColor,
    ) -> Result<(), B::Error> {
        let start = self.checked(x1, y1)?;
        self.checked(x2, y2)?;

        let (mut dx, mut dy) = (x2 - x1, y2 - y1);
        let x_inc = if dx < 0 { dx = -dx; -1 } else { 1 };
        let y_inc = if dy < 0 { dy = -dy; -1 } else { 1 };
        let (two_dx, two_dy) = (dx + dx, dy + dy);

        self.plot(start, color)?;

        let (mut x, mut y) = (x1, y1);
        let mut err = 0;
        // Step count, not endpoint equality, ends the loop.
        if dy <= dx {
            for _ in 0..dx {
                x += x_inc;
                err += two_dy;
                if err > dx {
                    y += y_inc;
                    err -= two_dx;
                }
                self.plot_unchecked(x, y, color)?;
            }
        } else {
            for _ in 0..dy {
                y += y_inc;
                err += two_dx;
                if err > dy {
                    x += x_inc;
                    err -= two_dy;
                }
                self.plot_unchecked(x, y, color)?;
            }
        }
        Ok(())
    }

    /// `len` pixels rightward from (`x`, `y`).
    pub fn draw_hline(&mut self, x: i32, y: i32, len: u16, color: BinaryColor) -> Result<(), B::Error> {
        if len == 0 {
            return Ok(());
        }
        self.checked(x, y)?;
        self.checked(x + len as i32 - 1, y)?;
        for i in 0..len as i32 {
            self.plot_unchecked(x + i, y, color)?;
        }
        Ok(())
    }

    /// `len` pixels downward from (`x`, `y`).
    pub fn draw_vline(&mut self, x: i32, y: i32, len: u16, color: BinaryColor) -> Result<(), B::Error> {
        if len == 0 {
            return Ok(());
        }
        self.checked(x, y)?;
        self.checked(x, y + len as i32 - 1)?;
        for i in 0..len as i32 {
            self.plot_unchecked(x, y + i, color)?;
        }
        Ok(())
    }

    /// One-pixel outline with top-left (`x`, `y`). Zero width or height
    /// draws nothing.
    pub fn draw_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        color: BinaryColor,
    ) -> Result<(), B::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let (w, h) = (width as i32, height as i32);
        self.checked(x, y)?;
        self.checked(x + w - 1, y + h - 1)?;

        for i in 0..h {
            self.plot_unchecked(x, y + i, color)?;
            self.plot_unchecked(x + w - 1, y + i, color)?;
        }
        for i in 0..w {
            self.plot_unchecked(x + i, y, color)?;
            self.plot_unchecked(x + i, y + h - 1, color)?;
        }
        Ok(())
    }

    /// Midpoint circle around (`cx`, `cy`). The whole circle must fit.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: u16, color: BinaryColor) -> Result<(), B::Error> {
        // Centre first: a valid centre keeps `cx ± r` inside i32.
        self.checked(cx, cy)?;
        let r = radius as i32;
        self.checked(cx - r, cy - r)?;
        self.checked(cx + r, cy + r)?;

        let mut x = r;
        let mut y = 0;
        let mut x_change = 1 - 2 * r;
        let mut y_change = 1;
        let mut radius_error = 0;

        while x >= y {
            for (px, py) in [
                (cx + x, cy + y),
                (cx - x, cy + y),
                (cx - x, cy - y),
                (cx + x, cy - y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx - y, cy - x),
                (cx + y, cy - x),
            ] {
                self.plot_unchecked(px, py, color)?;
            }

            y += 1;
            radius_error += y_change;
            y_change += 2;
            if 2 * radius_error + x_change > 0 {
                x -= 1;
                radius_error += x_change;
                x_change += 2;
            }
        }
        Ok(())
    }

    pub(crate) fn checked(&self, x: i32, y: i32) -> Result<Coordinate, B::Error> {
        self.geometry
            .coordinate(x, y)
            .ok_or(Error::CoordinateOutOfRange { x, y })
    }

    /// Read-modify-write of the byte holding `c`.
    pub(crate) fn plot(&mut self, c: Coordinate, color: BinaryColor) -> Result<(), B::Error> {
        let address = self.geometry.graphic_address(c.x, c.y);
        let mask = self.geometry.pixel_mask(c.x);

        self.ctl.set_address_pointer(address)?;
        let byte = self.ctl.read_in_place()?;
        let byte = match color {
            BinaryColor::On => byte | mask,
            BinaryColor::Off => byte & !mask,
        };
        self.ctl.write_and_increment(byte)
    }

    // Callers have range-checked the enclosing box.
    fn plot_unchecked(&mut self, x: i32, y: i32, color: BinaryColor) -> Result<(), B::Error> {
        self.plot(Coordinate { x: x as u16, y: y as u16 }, color)
    }
}
