//! Driver for T6963-family graphic LCD controllers on a byte-parallel bus.
//!
//! ```text
//! raster / text / embedded-graphics   (display, raster, graphics)
//!        │
//!        ▼
//!   addressing                        (x, y) → controller RAM address
//!        │
//!        ▼
//!   protocol                          status handshake, commands, init
//!        │
//!        ▼
//!   bus                               /RST /CE C/D W/R + D0..D7
//! ```

#![cfg_attr(not(test), no_std)]

pub mod addressing;
pub mod bus;
pub mod command;
pub mod display;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod protocol;
pub mod raster;
pub mod shared;

#[cfg(feature = "esp32s3")]
pub mod wiring;

pub use addressing::{point_f32, truncate, Coordinate};
pub use bus::{Bus, ControlPins, Direction, PinBus};
pub use command::{CgSource, CombineMode, DisplayMode};
pub use display::{Glyph, T6963};
pub use error::Error;
pub use geometry::{Config, ConfigError, FontWidth, Geometry};
pub use shared::SharedDisplay;

pub use embedded_graphics::pixelcolor::BinaryColor;
