// T6963 command set.
//
// Every command is a single byte written with C/D high. Commands that take
// parameters expect them as one or two data bytes (C/D low) written first,
// low byte before high byte.

// Register setting
pub const SET_CURSOR_POINTER: u8 = 0x21; // D1 = column, D2 = row
pub const SET_OFFSET_REGISTER: u8 = 0x22; // D1 = offset (5 bits), D2 = 0
pub const SET_ADDRESS_POINTER: u8 = 0x24; // D1 = low, D2 = high

// Control word setting
pub const SET_TEXT_HOME_ADDRESS: u8 = 0x40;
pub const SET_TEXT_AREA: u8 = 0x41;
pub const SET_GRAPHIC_HOME_ADDRESS: u8 = 0x42;
pub const SET_GRAPHIC_AREA: u8 = 0x43;

// Mode set, OR'd with one combine mode and optionally EXT_CG_MODE
pub const MODE_SET: u8 = 0x80;
pub const EXT_CG_MODE: u8 = 0x08;
pub const OR_MODE: u8 = 0x00;
pub const XOR_MODE: u8 = 0x01;
pub const AND_MODE: u8 = 0x03;
pub const TEXT_ATTR_MODE: u8 = 0x04;

// Display mode, OR'd with any of the plane flags
pub const DISPLAY_MODE: u8 = 0x90;
pub const CURSOR_BLINK_ON: u8 = 0x01;
pub const CURSOR_DISPLAY_ON: u8 = 0x02;
pub const TEXT_DISPLAY_ON: u8 = 0x04;
pub const GRAPHIC_DISPLAY_ON: u8 = 0x08;

// Cursor pattern select, OR'd with (lines - 1)
pub const CURSOR_PATTERN_SELECT: u8 = 0xA0;

// Single data transfers
pub const DATA_WRITE_AND_INCREMENT: u8 = 0xC0;
pub const DATA_READ_AND_NONVARIABLE: u8 = 0xC5;

// Status byte, read with C/D high
pub const STA_COMMAND_READY: u8 = 0x01; // STA0
pub const STA_DATA_READY: u8 = 0x02; // STA1

/// Both STA0 and STA1: the controller accepts the next command and data byte.
pub const STA_READY: u8 = STA_COMMAND_READY | STA_DATA_READY;

/// How text, graphic and cursor planes are combined on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CombineMode {
    #[default]
    Or,
    Xor,
    And,
    /// Graphic area holds per-character attributes for the text plane.
    TextAttribute,
}

impl CombineMode {
    pub const fn bits(self) -> u8 {
        match self {
            CombineMode::Or => OR_MODE,
            CombineMode::Xor => XOR_MODE,
            CombineMode::And => AND_MODE,
            CombineMode::TextAttribute => TEXT_ATTR_MODE,
        }
    }
}

/// Where character codes 0x00..=0x7F get their bitmaps from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CgSource {
    /// Built-in ROM for codes below 0x80, CG RAM above.
    #[default]
    InternalRom,
    /// CG RAM for all 256 codes.
    ExternalRam,
}

/// Plane enable flags for the display-mode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub text: bool,
    pub graphic: bool,
    pub cursor: bool,
    pub blink: bool,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self { text: true, graphic: true, cursor: false, blink: false }
    }
}

/// Mode-set command byte.
pub const fn mode_set(combine: CombineMode, cg: CgSource) -> u8 {
    let cg_bits = match cg {
        CgSource::InternalRom => 0,
        CgSource::ExternalRam => EXT_CG_MODE,
    };
    MODE_SET | cg_bits | combine.bits()
}

/// Display-mode command byte.
pub const fn display_mode(mode: DisplayMode) -> u8 {
    let mut cmd = DISPLAY_MODE;
    if mode.blink { cmd |= CURSOR_BLINK_ON; }
    if mode.cursor { cmd |= CURSOR_DISPLAY_ON; }
    if mode.text { cmd |= TEXT_DISPLAY_ON; }
    if mode.graphic { cmd |= GRAPHIC_DISPLAY_ON; }
    cmd
}

/// Cursor-pattern command byte for a cursor `lines` tall (1..=8).
pub const fn cursor_pattern(lines: u8) -> Option<u8> {
    if lines == 0 || lines > 8 {
        return None;
    }
    Some(CURSOR_PATTERN_SELECT | (lines - 1))
}
