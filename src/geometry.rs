//! Panel geometry and driver configuration.
//!
//! `Config` holds the options a board picks at construction time. It is
//! validated once into a `Geometry`, which carries every derived size and
//! home address the controller is programmed with. Neither changes after the
//! display is initialized.

use crate::command::{CgSource, CombineMode, DisplayMode};

/// Bytes per character-generator glyph.
pub const GLYPH_BYTES: u16 = 8;

/// Status reads allowed per transfer before giving up on the controller.
pub const DEFAULT_POLL_LIMIT: u32 = 100_000;

/// Character cell width, set by the FS strap on the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWidth {
    /// FS high.
    Six = 6,
    /// FS low.
    Eight = 8,
}

impl FontWidth {
    #[inline]
    pub const fn pixels(self) -> u16 {
        self as u16
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "font-6")] {
        pub const DEFAULT_FONT_WIDTH: FontWidth = FontWidth::Six;
    } else {
        pub const DEFAULT_FONT_WIDTH: FontWidth = FontWidth::Eight;
    }
}

/// Geometry validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroSize,
    /// Text rows are 8 pixel lines tall.
    LinesNotMultipleOf8(u16),
    /// Area registers take a single byte of columns.
    AreaTooWide(u16),
    /// The offset register only has 5 bits.
    OffsetOutOfRange(u8),
    CgCapacityTooLarge(u16),
    /// Text, graphic or CG area runs past the 64 KB address space.
    MemoryOverflow,
}

/// Options fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub pixels_per_line: u16,
    pub lines: u16,
    pub font_width: FontWidth,
    pub text_home: u16,
    pub offset_register: u8,
    /// Glyphs in the external CG bank.
    pub cg_capacity: u16,
    pub combine: CombineMode,
    pub cg_source: CgSource,
    pub display: DisplayMode,
    pub poll_limit: u32,
}

impl Default for Config {
    // 240x128 module, CG bank 2 at 0x1000, OR mode, text + graphic on.
    fn default() -> Self {
        Self {
            pixels_per_line: 240,
            lines: 128,
            font_width: DEFAULT_FONT_WIDTH,
            text_home: 0,
            offset_register: 2,
            cg_capacity: 256,
            combine: CombineMode::Or,
            cg_source: CgSource::InternalRom,
            display: DisplayMode::default(),
            poll_limit: DEFAULT_POLL_LIMIT,
        }
    }
}

impl Config {
    pub fn with_size(mut self, pixels_per_line: u16, lines: u16) -> Self {
        self.pixels_per_line = pixels_per_line;
        self.lines = lines;
        self
    }

    pub fn with_font_width(mut self, font_width: FontWidth) -> Self {
        self.font_width = font_width;
        self
    }

    pub fn with_text_home(mut self, text_home: u16) -> Self {
        self.text_home = text_home;
        self
    }

    pub fn with_offset_register(mut self, offset: u8) -> Self {
        self.offset_register = offset;
        self
    }

    pub fn with_cg_capacity(mut self, glyphs: u16) -> Self {
        self.cg_capacity = glyphs;
        self
    }

    pub fn with_combine(mut self, combine: CombineMode) -> Self {
        self.combine = combine;
        self
    }

    pub fn with_cg_source(mut self, cg_source: CgSource) -> Self {
        self.cg_source = cg_source;
        self
    }

    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    pub fn with_poll_limit(mut self, attempts: u32) -> Self {
        self.poll_limit = attempts;
        self
    }

    /// Validate the options and derive the memory layout.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        if self.pixels_per_line == 0 || self.lines == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.lines % 8 != 0 {
            return Err(ConfigError::LinesNotMultipleOf8(self.lines));
        }
        if self.offset_register > 0x1F {
            return Err(ConfigError::OffsetOutOfRange(self.offset_register));
        }
        if self.cg_capacity > 256 {
            return Err(ConfigError::CgCapacityTooLarge(self.cg_capacity));
        }

        // A partial last cell still needs a column of its own.
        let area = self.pixels_per_line.div_ceil(self.font_width.pixels());
        if area > u8::MAX as u16 {
            return Err(ConfigError::AreaTooWide(area));
        }

        let text_size = area as u32 * (self.lines / 8) as u32;
        let graphic_size = area as u32 * self.lines as u32;
        let graphic_home = self.text_home as u32 + text_size;
        if graphic_home + graphic_size > 0x1_0000 {
            return Err(ConfigError::MemoryOverflow);
        }

        let cg_home = (self.offset_register as u32) << 11;
        let cg_size = self.cg_capacity as u32 * GLYPH_BYTES as u32;
        if cg_home + cg_size > 0x1_0000 {
            return Err(ConfigError::MemoryOverflow);
        }

        Ok(Geometry {
            pixels_per_line: self.pixels_per_line,
            lines: self.lines,
            font_width: self.font_width,
            text_area: area,
            graphic_area: area,
            text_size: text_size as u16,
            graphic_size: graphic_size as u16,
            text_home: self.text_home,
            graphic_home: graphic_home as u16,
            offset_register: self.offset_register,
            cg_home: cg_home as u16,
            cg_size: cg_size as u16,
        })
    }
}

/// Derived controller memory layout.
///
/// Built only through [`Config::geometry`], so `graphic_home` always equals
/// `text_home + text_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pixels_per_line: u16,
    lines: u16,
    font_width: FontWidth,
    text_area: u16,
    graphic_area: u16,
    text_size: u16,
    graphic_size: u16,
    text_home: u16,
    graphic_home: u16,
    offset_register: u8,
    cg_home: u16,
    cg_size: u16,
}

impl Geometry {
    #[inline]
    pub fn pixels_per_line(&self) -> u16 { self.pixels_per_line }

    #[inline]
    pub fn lines(&self) -> u16 { self.lines }

    #[inline]
    pub fn font_width(&self) -> FontWidth { self.font_width }

    /// Text columns per row.
    #[inline]
    pub fn text_area(&self) -> u16 { self.text_area }

    /// Graphic bytes per pixel line.
    #[inline]
    pub fn graphic_area(&self) -> u16 { self.graphic_area }

    /// Text rows on screen.
    #[inline]
    pub fn text_rows(&self) -> u16 { self.lines / 8 }

    #[inline]
    pub fn text_size(&self) -> u16 { self.text_size }

    #[inline]
    pub fn graphic_size(&self) -> u16 { self.graphic_size }

    #[inline]
    pub fn text_home(&self) -> u16 { self.text_home }

    #[inline]
    pub fn graphic_home(&self) -> u16 { self.graphic_home }

    #[inline]
    pub fn offset_register(&self) -> u8 { self.offset_register }

    /// Start of the external CG bank selected by the offset register.
    #[inline]
    pub fn cg_home(&self) -> u16 { self.cg_home }

    /// Bytes in the external CG bank.
    #[inline]
    pub fn cg_size(&self) -> u16 { self.cg_size }

    /// Glyph slots in the external CG bank.
    #[inline]
    pub fn cg_capacity(&self) -> u16 { self.cg_size / GLYPH_BYTES }

    /// True when clearing the CG bank would also clear part of the text or
    /// graphic plane.
    pub fn cg_overlaps_planes(&self) -> bool {
        let graphic_end = self.graphic_home as u32 + self.graphic_size as u32;
        let cg_end = self.cg_home as u32 + self.cg_size as u32;
        (self.cg_home as u32) < graphic_end && (self.text_home as u32) < cg_end
    }
}
