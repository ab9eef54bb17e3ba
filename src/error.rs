use crate::geometry::ConfigError;

/// Driver error, generic over the bus transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<BusE> {
    /// The bus transport failed to drive or sample a line.
    Bus(BusE),
    /// The status never reached STA0|STA1 within the poll limit.
    /// Carries the last status byte read.
    DeviceTimeout { status: u8 },
    /// A pixel position outside the panel.
    CoordinateOutOfRange { x: i32, y: i32 },
    /// A character the controller's code table cannot express.
    UnsupportedCharacter(char),
    /// A CG slot or CG-RAM character index beyond what the bank holds.
    GlyphOutOfRange(u16),
    /// Cursor patterns are 1..=8 lines tall.
    InvalidCursorPattern(u8),
    Config(ConfigError),
}

impl<BusE> From<ConfigError> for Error<BusE> {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

pub type Result<T, BusE> = core::result::Result<T, Error<BusE>>;
