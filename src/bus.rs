//! Byte-parallel bus between the host and the T6963.
//!
//! The controller sees four control lines and an 8-bit data port:
//!
//! | Line  | Meaning                                    |
//! |-------|--------------------------------------------|
//! | /RST  | low holds the controller in reset          |
//! | /CE   | low pulse latches or presents one byte     |
//! | C/D   | high = command or status, low = data       |
//! | W/R   | shared /WR-/RD strobe, high = write        |
//! | D0-D7 | data port, direction switched by the host  |
//!
//! `Bus` is the capability the protocol layer drives. `PinBus` implements it
//! on top of `embedded-hal` 1.0 digital pins.

use core::fmt;

use embedded_hal::digital::{InputPin, OutputPin, PinState};

/// Data port direction as seen from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// Line-level access to the controller.
///
/// Every call returns once the line is driven or sampled; the controller
/// acknowledges nothing at this level. Handshaking lives in the protocol layer.
pub trait Bus {
    type Error: fmt::Debug;

    fn set_reset(&mut self, level: PinState) -> Result<(), Self::Error>;

    fn set_chip_enable(&mut self, level: PinState) -> Result<(), Self::Error>;

    fn set_command_data(&mut self, level: PinState) -> Result<(), Self::Error>;

    fn set_write_strobe(&mut self, level: PinState) -> Result<(), Self::Error>;

    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error>;

    fn write_data(&mut self, value: u8) -> Result<(), Self::Error>;

    fn read_data(&mut self) -> Result<u8, Self::Error>;
}

impl<B: Bus + ?Sized> Bus for &mut B {
    type Error = B::Error;

    #[inline]
    fn set_reset(&mut self, level: PinState) -> Result<(), Self::Error> {
        (**self).set_reset(level)
    }

    #[inline]
    fn set_chip_enable(&mut self, level: PinState) -> Result<(), Self::Error> {
        (**self).set_chip_enable(level)
    }

    #[inline]
    fn set_command_data(&mut self, level: PinState) -> Result<(), Self::Error> {
        (**self).set_command_data(level)
    }

    #[inline]
    fn set_write_strobe(&mut self, level: PinState) -> Result<(), Self::Error> {
        (**self).set_write_strobe(level)
    }

    #[inline]
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        (**self).set_direction(direction)
    }

    #[inline]
    fn write_data(&mut self, value: u8) -> Result<(), Self::Error> {
        (**self).write_data(value)
    }

    #[inline]
    fn read_data(&mut self) -> Result<u8, Self::Error> {
        (**self).read_data()
    }
}

/// Control pins, in the order the module header lists them.
pub struct ControlPins<CTL> {
    pub rst: CTL,
    pub ce: CTL,
    pub cd: CTL,
    pub wr: CTL,
}

/// `Bus` over GPIO pins.
///
/// Data pins must be open-drain with pull-ups (both `OutputPin` and
/// `InputPin`): switching to input releases every line high so the
/// controller can drive it.
pub struct PinBus<CTL, DAT> {
    ctl: ControlPins<CTL>,
    data: [DAT; 8], // D0..D7
}

impl<CTL, DAT, E> PinBus<CTL, DAT>
where
    CTL: OutputPin<Error = E>,
    DAT: OutputPin<Error = E> + InputPin<Error = E>,
    E: fmt::Debug,
{
    pub fn new(ctl: ControlPins<CTL>, data: [DAT; 8]) -> Self {
        Self { ctl, data }
    }

    /// Hand the pins back.
    pub fn into_inner(self) -> (ControlPins<CTL>, [DAT; 8]) {
        (self.ctl, self.data)
    }
}

impl<CTL, DAT, E> Bus for PinBus<CTL, DAT>
where
    CTL: OutputPin<Error = E>,
    DAT: OutputPin<Error = E> + InputPin<Error = E>,
    E: fmt::Debug,
{
    type Error = E;

    fn set_reset(&mut self, level: PinState) -> Result<(), E> {
        self.ctl.rst.set_state(level)
    }

    fn set_chip_enable(&mut self, level: PinState) -> Result<(), E> {
        self.ctl.ce.set_state(level)
    }

    fn set_command_data(&mut self, level: PinState) -> Result<(), E> {
        self.ctl.cd.set_state(level)
    }

    fn set_write_strobe(&mut self, level: PinState) -> Result<(), E> {
        self.ctl.wr.set_state(level)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), E> {
        if direction == Direction::Input {
            for pin in self.data.iter_mut() {
                pin.set_high()?;
            }
        }
        Ok(())
    }

    fn write_data(&mut self, value: u8) -> Result<(), E> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(PinState::from(value & (1 << bit) != 0))?;
        }
        Ok(())
    }

    fn read_data(&mut self) -> Result<u8, E> {
        let mut value = 0u8;
        for (bit, pin) in self.data.iter_mut().enumerate() {
            if pin.is_high()? {
                value |= 1 << bit;
            }
        }
        Ok(value)
    }
}
