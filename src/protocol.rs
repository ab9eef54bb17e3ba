//! T6963 command/status handshake.
//!
//! Every transfer starts by polling the status byte until STA0 and STA1 are
//! both set, then strobes one byte across the bus with /CE. The controller's
//! address pointer lives on the device; nothing here mirrors it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use log::{debug, warn};

use crate::bus::{Bus, Direction};
use crate::command::{self, STA_READY};
use crate::error::{Error, Result};
use crate::geometry::{Config, Geometry};

/// /RST low time during initialization.
pub const RESET_SETTLE_US: u32 = 100;

/// Read `sample` until `ready` accepts it, at most `max_attempts` times.
///
/// No delay between attempts. A zero budget still samples once.
pub fn poll_until<E>(
    max_attempts: u32,
    mut sample: impl FnMut() -> core::result::Result<u8, E>,
    ready: impl Fn(u8) -> bool,
) -> Result<u8, E> {
    let mut last = 0;
    for _ in 0..max_attempts.max(1) {
        last = sample().map_err(Error::Bus)?;
        if ready(last) {
            return Ok(last);
        }
    }
    Err(Error::DeviceTimeout { status: last })
}

/// Low-level controller access: status, data and command transfers.
pub struct Controller<B> {
    bus: B,
    poll_limit: u32,
}

impl<B: Bus> Controller<B> {
    pub fn new(bus: B, poll_limit: u32) -> Self {
        Self { bus, poll_limit }
    }

    #[inline]
    pub fn bus(&self) -> &B {
        &self.bus
    }

    #[inline]
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }

    /// Wait until the controller accepts both a command and a data byte.
    ///
    /// Holds /CE low with C/D high and samples the status until ready or the
    /// poll budget runs out. /CE is released on every path.
    pub fn wait_ready(&mut self) -> Result<u8, B::Error> {
        self.begin_status_read().map_err(Error::Bus)?;
        let limit = self.poll_limit;
        let bus = &mut self.bus;
        let polled = poll_until(limit, || bus.read_data(), |s| s & STA_READY == STA_READY);
        let released = self.bus.set_chip_enable(PinState::High).map_err(Error::Bus);

        if let Err(Error::DeviceTimeout { status }) = polled {
            warn!("t6963: not ready after {} status reads (status {:#04x})", limit, status);
        }
        let status = polled?;
        released?;
        Ok(status)
    }

    /// Write one byte. `is_command` selects C/D high.
    pub fn write(&mut self, value: u8, is_command: bool) -> Result<(), B::Error> {
        self.wait_ready()?;
        self.strobe_write(value, is_command).map_err(Error::Bus)
    }

    /// Read one byte. `is_command` selects C/D high.
    pub fn read(&mut self, is_command: bool) -> Result<u8, B::Error> {
        self.wait_ready()?;
        self.strobe_read(is_command).map_err(Error::Bus)
    }

    #[inline]
    pub fn write_data(&mut self, value: u8) -> Result<(), B::Error> {
        self.write(value, false)
    }

    #[inline]
    pub fn write_command(&mut self, cmd: u8) -> Result<(), B::Error> {
        self.write(cmd, true)
    }

    #[inline]
    pub fn read_data(&mut self) -> Result<u8, B::Error> {
        self.read(false)
    }

    /// Two parameter bytes then the command.
    pub fn command2(&mut self, cmd: u8, d1: u8, d2: u8) -> Result<(), B::Error> {
        self.write_data(d1)?;
        self.write_data(d2)?;
        self.write_command(cmd)
    }

    /// A 16-bit parameter, low byte first, then the command.
    #[inline]
    pub fn command_word(&mut self, cmd: u8, word: u16) -> Result<(), B::Error> {
        let [lo, hi] = word.to_le_bytes();
        self.command2(cmd, lo, hi)
    }

    /// Program the device address pointer.
    #[inline]
    pub fn set_address_pointer(&mut self, address: u16) -> Result<(), B::Error> {
        log::trace!("t6963: pointer -> {:#06x}", address);
        self.command_word(command::SET_ADDRESS_POINTER, address)
    }

    /// Store `value` at the pointer and advance it.
    #[inline]
    pub fn write_and_increment(&mut self, value: u8) -> Result<(), B::Error> {
        self.write_data(value)?;
        self.write_command(command::DATA_WRITE_AND_INCREMENT)
    }

    /// Fetch the byte at the pointer without moving it.
    #[inline]
    pub fn read_in_place(&mut self) -> Result<u8, B::Error> {
        self.write_command(command::DATA_READ_AND_NONVARIABLE)?;
        self.read_data()
    }

    /// Write `count` copies of `value` starting at `address`.
    pub fn fill(&mut self, address: u16, count: u16, value: u8) -> Result<(), B::Error> {
        self.set_address_pointer(address)?;
        for _ in 0..count {
            self.write_and_increment(value)?;
        }
        Ok(())
    }

    /// Write `bytes` starting at `address`.
    pub fn write_run(&mut self, address: u16, bytes: &[u8]) -> Result<(), B::Error> {
        self.set_address_pointer(address)?;
        for &b in bytes {
            self.write_and_increment(b)?;
        }
        Ok(())
    }

    /// Reset the controller and program areas, offset, pointer and modes.
    ///
    /// The order is fixed: area sizes go in before anything addresses them.
    pub fn initialize(
        &mut self,
        config: &Config,
        geometry: &Geometry,
        delay: &mut impl DelayNs,
    ) -> Result<(), B::Error> {
        // 1. hardware reset
        self.hard_reset(delay).map_err(Error::Bus)?;
        debug!(
            "t6963: reset, {}x{} font {} area {} cols",
            geometry.pixels_per_line(),
            geometry.lines(),
            geometry.font_width().pixels(),
            geometry.graphic_area()
        );

        // 2. text plane
        self.command_word(command::SET_TEXT_HOME_ADDRESS, geometry.text_home())?;
        self.command2(command::SET_TEXT_AREA, geometry.text_area() as u8, 0)?;
        debug!("t6963: text home {:#06x} size {}", geometry.text_home(), geometry.text_size());

        // 3. graphic plane
        self.command_word(command::SET_GRAPHIC_HOME_ADDRESS, geometry.graphic_home())?;
        self.command2(command::SET_GRAPHIC_AREA, geometry.graphic_area() as u8, 0)?;
        debug!("t6963: graphic home {:#06x} size {}", geometry.graphic_home(), geometry.graphic_size());

        // 4. CG bank
        self.command2(command::SET_OFFSET_REGISTER, geometry.offset_register(), 0)?;
        debug!("t6963: CG bank {} at {:#06x}", geometry.offset_register(), geometry.cg_home());

        // 5. pointer home
        self.set_address_pointer(0)?;

        // 6. planes on
        self.write_command(command::display_mode(config.display))?;

        // 7. plane combination
        self.write_command(command::mode_set(config.combine, config.cg_source))?;
        debug!("t6963: display mode {:?}, {:?}", config.display, config.combine);

        Ok(())
    }

    /// Drive every line to its idle level and pulse /RST.
    ///
    /// Leaves /CE high, the port as output carrying zero, C/D and the strobe
    /// low, and the controller out of reset.
    pub fn release(&mut self) -> Result<(), B::Error> {
        self.quiesce().map_err(Error::Bus)
    }

    // Every line is driven even after a failure; the first error is kept.
    fn quiesce(&mut self) -> core::result::Result<(), B::Error> {
        let bus = &mut self.bus;
        [
            bus.set_reset(PinState::Low),
            bus.set_chip_enable(PinState::High),
            bus.set_direction(Direction::Output),
            bus.write_data(0),
            bus.set_write_strobe(PinState::Low),
            bus.set_command_data(PinState::Low),
            bus.set_reset(PinState::High),
        ]
        .into_iter()
        .collect()
    }

    fn hard_reset(&mut self, delay: &mut impl DelayNs) -> core::result::Result<(), B::Error> {
        self.bus.set_reset(PinState::Low)?;
        self.bus.set_chip_enable(PinState::High)?;
        self.bus.set_command_data(PinState::Low)?;
        self.bus.set_direction(Direction::Output)?;
        self.bus.write_data(0)?;
        delay.delay_us(RESET_SETTLE_US);
        self.bus.set_reset(PinState::High)
    }

    fn begin_status_read(&mut self) -> core::result::Result<(), B::Error> {
        self.bus.set_chip_enable(PinState::High)?;
        self.bus.set_direction(Direction::Input)?;
        self.bus.set_write_strobe(PinState::Low)?;
        self.bus.set_command_data(PinState::High)?;
        self.bus.set_chip_enable(PinState::Low)
    }

    fn strobe_write(&mut self, value: u8, is_command: bool) -> core::result::Result<(), B::Error> {
        self.bus.set_direction(Direction::Output)?;
        self.bus.set_command_data(PinState::from(is_command))?;
        self.bus.set_write_strobe(PinState::High)?;
        self.bus.write_data(value)?;
        self.bus.set_chip_enable(PinState::Low)?;
        self.bus.set_chip_enable(PinState::High)
    }

    fn strobe_read(&mut self, is_command: bool) -> core::result::Result<u8, B::Error> {
        self.bus.set_direction(Direction::Input)?;
        self.bus.set_command_data(PinState::from(is_command))?;
        self.bus.set_write_strobe(PinState::Low)?;
        self.bus.set_chip_enable(PinState::Low)?;
        let value = self.bus.read_data();
        self.bus.set_chip_enable(PinState::High)?;
        value
    }
}
