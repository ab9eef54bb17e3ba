//! T6963 bring-up on an ESP32-S3 DevKitC
//!
//! Flash with `cargo run --release --features esp32s3` from a shell that has
//! the Xtensa toolchain on its path (espup). Pin map in `wiring.rs`.
//!
//! Initializes a 240x128 module, draws the test scene (frame, circle,
//! diagonals, grid, status line) and idles. Driver logs go to the serial
//! console.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

// App descriptor for the ESP-IDF second-stage bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

use core::fmt::Write as _;

use esp_backtrace as _;
use esp_hal::{delay::Delay, main, Config as HalConfig};
use esp_println::println;
use log::{info, LevelFilter};

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    prelude::*,
    text::Text,
};

use t6963::{
    wiring::{init_lcd_bus, LcdBus},
    BinaryColor, Config, Error, T6963,
};

type LcdError = Error<core::convert::Infallible>;

fn draw_scene(lcd: &mut T6963<LcdBus<'_>>) -> Result<(), LcdError> {
    let on = BinaryColor::On;
    let g = *lcd.geometry();
    let (w, h) = (g.pixels_per_line() as i32, g.lines() as i32);

    lcd.clear_graphic()?;
    lcd.clear_text()?;

    // frame, circle and both diagonals
    lcd.draw_rectangle(70, 14, 100, 100, on)?;
    lcd.draw_circle(120, 64, 45, on)?;
    lcd.draw_line(0, 0, w - 1, h - 1, on)?;
    lcd.draw_line(0, h - 1, w - 1, 0, on)?;

    // 10 px grid in the left margin
    for s in (0..60).step_by(10) {
        lcd.draw_hline(0, s + 5, 60, on)?;
        lcd.draw_vline(s + 5, 0, 60, on)?;
    }

    let mut status: heapless::String<32> = heapless::String::new();
    let _ = write!(status, "{}x{} area {}", w, h, g.graphic_area());
    lcd.write_string_at(0, g.text_rows() - 1, &status)?;

    Text::new("T6963", Point::new(184, 120), MonoTextStyle::new(&FONT_6X10, on)).draw(lcd)?;
    Ok(())
}

#[main]
fn main() -> ! {
    esp_println::logger::init_logger(LevelFilter::Debug);

    let peripherals = esp_hal::init(HalConfig::default());
    let bus = init_lcd_bus(peripherals);
    let mut delay = Delay::new();

    // Held until reset so the scene stays up.
    let _lcd = match T6963::new(bus, Config::default(), &mut delay) {
        Ok(mut lcd) => {
            info!("t6963 ready, geometry {:?}", lcd.geometry());
            if let Err(e) = draw_scene(&mut lcd) {
                println!("draw failed: {:?}", e);
            }
            Some(lcd)
        }
        Err(e) => {
            println!("LCD init failed: {:?}", e);
            None
        }
    };

    loop {
        delay.delay_millis(1000);
    }
}
