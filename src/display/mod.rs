//! The main API to the display driver. `Display` owns the transport and the framebuffer: drawing
//! methods mutate the framebuffer only, and the `sync_*` methods copy parts of it to the
//! controller's display RAM.


pub mod bitmap;
pub mod framebuffer;
pub mod sync;
pub mod text;

use core::fmt;
use core::time::Duration;

use crate::command::{Command, CommandBatch};
use crate::config::{Config, Geometry};
use crate::display::bitmap::Bitmap;
use crate::display::framebuffer::Framebuffer;
use crate::error::{Error, RangeError};
use crate::interface::{self, i2c::I2cInterface};

/// A driver for an SSD1306 display.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    geometry: Geometry,
    timeout: Duration,
    framebuffer: Framebuffer,
}

impl<I2C> Display<I2cInterface<I2C>>
where
    I2C: hal::blocking::i2c::Write,
{
    /// Register an SSD1306 on the I2C bus `i2c` at the address and clock speed in `config`, then
    /// construct the driver as `Display::new` does.
    ///
    /// The bus is dropped if construction fails. To keep it, register with
    /// `I2cInterface::register`, which hands the bus back when the address or clock speed is
    /// rejected, and pass the interface to `Display::new`.
    pub fn i2c(i2c: I2C, config: Config) -> Result<Self, Error<I2C::Error>> {
        config.validate()?;
        let iface = I2cInterface::register(i2c, config.address, config.clock_hz)
            .map_err(|_| Error::Registration)?;
        Display::new(iface, config)
    }
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver for the display connected to `iface`. This validates
    /// `config`, allocates a zeroed framebuffer, and sends the power-up sequence. The display RAM
    /// is not cleared; call `sync_all` to show the (empty) framebuffer.
    pub fn new(iface: DI, config: Config) -> Result<Self, Error<DI::Error>> {
        let geometry = config.validate()?;
        let framebuffer = Framebuffer::try_new(geometry).ok_or(Error::Allocation)?;
        let mut disp = Display {
            iface,
            geometry,
            timeout: config.timeout,
            framebuffer,
        };
        let batch = config.init_batch(&geometry)?;
        disp.send_batch(&batch)?;
        log::info!(
            "SSD1306 {}x{} initialized",
            geometry.width(),
            geometry.height()
        );
        Ok(disp)
    }

    /// Give the transport back, dropping the framebuffer.
    pub fn release(self) -> DI {
        self.iface
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Read-only access to the framebuffer.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// A hex dump of the framebuffer, one line per page, for debugging.
    pub fn inspect(&self) -> impl fmt::Display + '_ {
        &self.framebuffer
    }

    /// Set every framebuffer byte to 0.
    pub fn clear(&mut self) {
        self.framebuffer.clear()
    }

    /// Light (`true`) or clear (`false`) the whole framebuffer.
    pub fn fill(&mut self, lit: bool) {
        self.framebuffer.fill(lit)
    }

    /// Light or clear one pixel.
    pub fn set_pixel(&mut self, x: u8, y: u8, lit: bool) -> Result<(), RangeError> {
        let res = self.framebuffer.set_pixel(x, y, lit);
        self.report(res, "pixel", x, y)
    }

    /// Light or clear every pixel in the inclusive rectangle `[x1, x2] x [y1, y2]`.
    pub fn fill_region(
        &mut self,
        x1: u8,
        x2: u8,
        y1: u8,
        y2: u8,
        lit: bool,
    ) -> Result<(), RangeError> {
        let res = self.framebuffer.fill_region(x1, x2, y1, y2, lit);
        self.report(res, "region", x1, y1)
    }

    /// Draw `text` at `(x, y)`. See `Framebuffer::draw_text`.
    pub fn draw_text(
        &mut self,
        x: u8,
        y: u8,
        text: &str,
        invert: bool,
    ) -> Result<(), RangeError> {
        let res = self.framebuffer.draw_text(x, y, text, invert);
        self.report(res, "text", x, y)
    }

    /// Draw the decimal representation of `value` at `(x, y)`.
    pub fn draw_int(
        &mut self,
        x: u8,
        y: u8,
        value: i32,
        invert: bool,
    ) -> Result<(), RangeError> {
        let res = self.framebuffer.draw_int(x, y, value, invert);
        self.report(res, "integer", x, y)
    }

    /// Draw `value` with `decimals` digits after the decimal point at `(x, y)`.
    pub fn draw_float(
        &mut self,
        x: u8,
        y: u8,
        value: f32,
        decimals: u8,
        invert: bool,
    ) -> Result<(), RangeError> {
        let res = self.framebuffer.draw_float(x, y, value, decimals, invert);
        self.report(res, "float", x, y)
    }

    /// Draw `bitmap` at `(x, y)`. See `Framebuffer::draw_bitmap`.
    pub fn draw_bitmap(
        &mut self,
        x: u8,
        y: u8,
        bitmap: &Bitmap<'_>,
        invert: bool,
    ) -> Result<(), RangeError> {
        let res = self.framebuffer.draw_bitmap(x, y, bitmap, invert);
        self.report(res, "bitmap", x, y)
    }

    /// Control sleep mode. The display RAM is retained while asleep.
    pub fn sleep(&mut self, enabled: bool) -> Result<(), Error<DI::Error>> {
        self.send_command(Command::DisplayOn(!enabled))
    }

    /// Set the contrast.
    pub fn contrast(&mut self, contrast: u8) -> Result<(), Error<DI::Error>> {
        self.send_command(Command::Contrast(contrast))
    }

    /// Show lit framebuffer bits as dark pixels and vice versa, without touching the display RAM.
    pub fn invert_display(&mut self, inverted: bool) -> Result<(), Error<DI::Error>> {
        self.send_command(Command::Inverse(inverted))
    }

    /// Set the vertical pan.
    ///
    /// This uses the `Command::StartLine` feature to roll the image upwards by `line` rows,
    /// wrapping the top rows around to the bottom. `line` must be less than the display height.
    pub fn vertical_pan(&mut self, line: u8) -> Result<(), Error<DI::Error>> {
        if line >= self.geometry.height() {
            log::warn!(
                "vertical pan {} outside 0..{}",
                line,
                self.geometry.height()
            );
            return Err(Error::Range(RangeError::OutOfRange));
        }
        self.send_command(Command::StartLine(line))
    }

    fn send_command(&mut self, cmd: Command) -> Result<(), Error<DI::Error>> {
        let mut batch = CommandBatch::new();
        batch.push(cmd)?;
        self.send_batch(&batch)
    }

    fn send_batch(&mut self, batch: &CommandBatch) -> Result<(), Error<DI::Error>> {
        self.iface
            .transmit(batch.as_bytes(), self.timeout)
            .map_err(Error::Transport)
    }

    fn report(
        &self,
        res: Result<(), RangeError>,
        what: &str,
        x: u8,
        y: u8,
    ) -> Result<(), RangeError> {
        if let Err(e) = res {
            log::warn!(
                "{} at ({}, {}) on {}x{} display: {}",
                what,
                x,
                y,
                self.geometry.width(),
                self.geometry.height(),
                e
            );
        }
        res
    }
}
