// Board pin mapping for the ESP32-S3 bring-up board.
//
// The LCD module runs from 5 V with a 3.3 V-tolerant data port through
// 4.7k pull-ups, so D0..D7 are driven open-drain and read back in place.
//! The following wiring is assumed:
//! - /RST => GPIO4
//! - /CE  => GPIO5
//! - C/D  => GPIO6
//! - W/R  => GPIO7 (tied to both /WR and, inverted, /RD on the module)
//! - D0..D7 => GPIO8..GPIO15
//! - FS => GND (8 pixel font) or 3.3V with the `font-6` feature
//! - GND => GND

use esp_hal::gpio::{DriveMode, Flex, Level, Output, OutputConfig, Pull};
use esp_hal::peripherals::Peripherals;

use crate::bus::{ControlPins, PinBus};

/// The LCD bus as wired on this board.
pub type LcdBus<'a> = PinBus<Output<'a>, Flex<'a>>;

fn data_line<'a>(pin: impl esp_hal::gpio::OutputPin + esp_hal::gpio::InputPin + 'a) -> Flex<'a> {
    let mut line = Flex::new(pin);
    line.apply_output_config(
        &OutputConfig::default()
            .with_drive_mode(DriveMode::OpenDrain)
            .with_pull(Pull::Up),
    );
    line.set_level(Level::High);
    line.set_input_enable(true);
    line.set_output_enable(true);
    line
}

/// Claim the LCD pins. Control lines start idle: out of reset, /CE high.
pub fn init_lcd_bus<'a>(p: Peripherals) -> LcdBus<'a> {
    let ctl = ControlPins {
        rst: Output::new(p.GPIO4, Level::High, OutputConfig::default()),
        ce: Output::new(p.GPIO5, Level::High, OutputConfig::default()),
        cd: Output::new(p.GPIO6, Level::Low, OutputConfig::default()),
        wr: Output::new(p.GPIO7, Level::Low, OutputConfig::default()),
    };

    let data = [
        data_line(p.GPIO8),
        data_line(p.GPIO9),
        data_line(p.GPIO10),
        data_line(p.GPIO11),
        data_line(p.GPIO12),
        data_line(p.GPIO13),
        data_line(p.GPIO14),
        data_line(p.GPIO15),
    ];

    PinBus::new(ctl, data)
}
