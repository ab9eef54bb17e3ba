//! Owned T6963 display handle.
//!
//! `T6963::new` resets and programs the controller; `close` blanks both
//! planes and parks the bus. Between the two, every addressed operation sets
//! the device pointer itself right before its transfers. Pixel drawing lives
//! in `raster`, the embedded-graphics glue in `graphics`.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::bus::Bus;
use crate::command::{self, CgSource, CombineMode, DisplayMode};
use crate::error::{Error, Result};
use crate::geometry::{Config, ConfigError, Geometry};
use crate::protocol::Controller;

/// Bitmap for one CG slot, top row first, MSB leftmost.
pub type Glyph = [u8; 8];

/// Character code offset between ASCII and the controller's internal ROM.
pub const ROM_CODE_OFFSET: u32 = 32;

/// First character code served from CG RAM in internal-ROM mode.
pub const CG_RAM_CODE_BASE: u8 = 0x80;

/// Controller code for `ch`: ASCII 32 upward maps to code 0 upward.
pub fn char_code(ch: char) -> Option<u8> {
    (ch as u32)
        .checked_sub(ROM_CODE_OFFSET)
        .and_then(|code| u8::try_from(code).ok())
}

pub struct T6963<B> {
    pub(crate) ctl: Controller<B>,
    pub(crate) geometry: Geometry,
    config: Config,
}

impl<B: Bus> T6963<B> {
    /// Validate `config`, reset the controller and program it.
    ///
    /// If initialization fails the bus is driven back to its idle levels
    /// before the error is returned.
    pub fn new(bus: B, config: Config, delay: &mut impl DelayNs) -> Result<Self, B::Error> {
        let geometry = config.geometry()?;
        if geometry.cg_overlaps_planes() {
            warn!(
                "t6963: CG bank at {:#06x} overlaps display RAM ending at {:#06x}",
                geometry.cg_home(),
                geometry.graphic_home() as u32 + geometry.graphic_size() as u32
            );
        }

        let mut ctl = Controller::new(bus, config.poll_limit);
        if let Err(e) = ctl.initialize(&config, &geometry, delay) {
            let _ = ctl.release();
            return Err(e);
        }
        Ok(Self { ctl, geometry, config })
    }

    /// Open the display, run `body`, and close it whether `body` succeeded
    /// or not. The first error wins.
    pub fn scoped<R>(
        bus: B,
        config: Config,
        delay: &mut impl DelayNs,
        body: impl FnOnce(&mut Self) -> Result<R, B::Error>,
    ) -> Result<R, B::Error> {
        let mut lcd = Self::new(bus, config, delay)?;
        let out = body(&mut lcd);
        let closed = lcd.close();
        let r = out?;
        closed?;
        Ok(r)
    }

    /// Blank text and graphic planes, then park the bus.
    ///
    /// The bus is released even when clearing fails.
    pub fn close(mut self) -> Result<B, B::Error> {
        let cleared = self.clear_text().and_then(|_| self.clear_graphic());
        let released = self.ctl.release();
        cleared?;
        released?;
        Ok(self.ctl.into_inner())
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn bus(&self) -> &B {
        self.ctl.bus()
    }

    /// Raw controller access for commands this driver does not wrap.
    #[inline]
    pub fn controller(&mut self) -> &mut Controller<B> {
        &mut self.ctl
    }

    // ---- Registers ----

    /// Point the controller at text cell (`col`, `row`).
    pub fn set_address_pointer(&mut self, col: u16, row: u16) -> Result<(), B::Error> {
        self.check_text_cell(col, row)?;
        let address = self.geometry.text_address(col, row);
        self.ctl.set_address_pointer(address)
    }

    /// Move the hardware cursor to text cell (`col`, `row`).
    pub fn set_cursor_pointer(&mut self, col: u8, row: u8) -> Result<(), B::Error> {
        self.check_text_cell(col as u16, row as u16)?;
        self.ctl.command2(command::SET_CURSOR_POINTER, col, row)
    }

    /// Select the CG RAM bank. Addresses computed by this driver keep using
    /// the bank from `Config`.
    pub fn set_offset_register(&mut self, value: u8) -> Result<(), B::Error> {
        if value > 0x1F {
            return Err(Error::Config(ConfigError::OffsetOutOfRange(value)));
        }
        self.ctl.command2(command::SET_OFFSET_REGISTER, value, 0)
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), B::Error> {
        self.ctl.write_command(command::display_mode(mode))
    }

    pub fn set_mode(&mut self, combine: CombineMode, cg: CgSource) -> Result<(), B::Error> {
        self.ctl.write_command(command::mode_set(combine, cg))
    }

    /// Cursor height in lines, 1..=8.
    pub fn set_cursor_pattern(&mut self, lines: u8) -> Result<(), B::Error> {
        let cmd = command::cursor_pattern(lines).ok_or(Error::InvalidCursorPattern(lines))?;
        self.ctl.write_command(cmd)
    }

    /// One byte of controller RAM.
    pub fn read_byte(&mut self, address: u16) -> Result<u8, B::Error> {
        self.ctl.set_address_pointer(address)?;
        self.ctl.read_in_place()
    }

    // ---- Area clears ----

    pub fn clear_text(&mut self) -> Result<(), B::Error> {
        self.ctl.fill(self.geometry.text_home(), self.geometry.text_size(), 0)
    }

    pub fn clear_graphic(&mut self) -> Result<(), B::Error> {
        self.fill_graphic(0)
    }

    pub fn clear_character_generator(&mut self) -> Result<(), B::Error> {
        self.ctl.fill(self.geometry.cg_home(), self.geometry.cg_size(), 0)
    }

    pub(crate) fn fill_graphic(&mut self, value: u8) -> Result<(), B::Error> {
        self.ctl.fill(self.geometry.graphic_home(), self.geometry.graphic_size(), value)
    }

    // ---- Text ----

    /// Load `glyph` into CG slot `slot`.
    pub fn define_character(&mut self, slot: u8, glyph: &Glyph) -> Result<(), B::Error> {
        if slot as u16 >= self.geometry.cg_capacity() {
            return Err(Error::GlyphOutOfRange(slot as u16));
        }
        let address = self.geometry.cg_address(slot);
        self.ctl.write_run(address, glyph)
    }

    /// Write `ch` at the pointer and advance it.
    pub fn write_char(&mut self, ch: char) -> Result<(), B::Error> {
        let code = char_code(ch).ok_or(Error::UnsupportedCharacter(ch))?;
        self.ctl.write_and_increment(code)
    }

    /// Write `s` from the pointer onward. No wrapping: the caller positions
    /// each line. Nothing is written if any character is unsupported.
    pub fn write_string(&mut self, s: &str) -> Result<(), B::Error> {
        if let Some(bad) = s.chars().find(|&ch| char_code(ch).is_none()) {
            return Err(Error::UnsupportedCharacter(bad));
        }
        for ch in s.chars() {
            self.write_char(ch)?;
        }
        Ok(())
    }

    /// Position the pointer at (`col`, `row`) and write `s`.
    pub fn write_string_at(&mut self, col: u16, row: u16, s: &str) -> Result<(), B::Error> {
        self.set_address_pointer(col, row)?;
        self.write_string(s)
    }

    /// Show CG RAM character `index` (code `0x80 + index`) at the pointer.
    pub fn write_cg_char(&mut self, index: u8) -> Result<(), B::Error> {
        if index >= CG_RAM_CODE_BASE {
            return Err(Error::GlyphOutOfRange(index as u16));
        }
        self.ctl.write_and_increment(CG_RAM_CODE_BASE + index)
    }

    fn check_text_cell(&self, col: u16, row: u16) -> Result<(), B::Error> {
        if col < self.geometry.text_area() && row < self.geometry.text_rows() {
            Ok(())
        } else {
            Err(Error::CoordinateOutOfRange { x: col as i32, y: row as i32 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_maps_to_rom_codes() {
        assert_eq!(char_code(' '), Some(0));
        assert_eq!(char_code('A'), Some(33));
        assert_eq!(char_code('~'), Some(94));
        assert_eq!(char_code('\u{11F}'), Some(255));
    }

    #[test]
    fn control_and_wide_chars_have_no_code() {
        assert_eq!(char_code('\n'), None);
        assert_eq!(char_code('\u{1F}'), None);
        assert_eq!(char_code('\u{120}'), None);
        assert_eq!(char_code('€'), None);
    }
}
