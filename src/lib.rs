//! Driver library for the Solomon Systech SSD1306 monochrome dot matrix OLED display driver.
//!
//! The driver keeps a page-organized framebuffer in RAM. Drawing operations only mutate that
//! framebuffer; the `sync_*` family of methods pushes selected pages or segments to the
//! controller's display RAM.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

extern crate embedded_hal as hal;

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod interface;

// Re-exports for primary API.
pub use crate::config::{Config, Geometry, Orientation};
pub use crate::display::bitmap::Bitmap;
pub use crate::display::framebuffer::Framebuffer;
pub use crate::display::Display;
pub use crate::error::{ConfigError, Error, RangeError};
pub use crate::interface::i2c::I2cInterface;
pub use crate::interface::DisplayInterface;
