// -------------------- embedded-graphics integration --------------------
//
// Pixels outside the panel are dropped, as embedded-graphics expects of a
// draw target. Each visible pixel costs one read-modify-write.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::bus::Bus;
use crate::display::T6963;
use crate::error::Error;

impl<B: Bus> OriginDimensions for T6963<B> {
    fn size(&self) -> Size {
        Size::new(
            self.geometry.pixels_per_line() as u32,
            self.geometry.lines() as u32,
        )
    }
}

impl<B: Bus> DrawTarget for T6963<B> {
    type Color = BinaryColor;
    type Error = Error<B::Error>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<BinaryColor>>,
    {
        for Pixel(p, color) in pixels {
            if let Some(c) = self.geometry.coordinate(p.x, p.y) {
                self.plot(c, color)?;
            }
        }
        Ok(())
    }

    // Whole-plane fill as one write run instead of per-pixel updates.
    fn clear(&mut self, color: BinaryColor) -> Result<(), Self::Error> {
        let value = match color {
            BinaryColor::On => ((1u16 << self.geometry.font_width().pixels()) - 1) as u8,
            BinaryColor::Off => 0,
        };
        self.fill_graphic(value)
    }
}
