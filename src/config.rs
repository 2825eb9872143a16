//! Defines the display configuration and the power-up command sequence derived from it.

use core::time::Duration;

use crate::command::*;
use crate::error::ConfigError;
use crate::interface::i2c::MAX_CLOCK_HZ;

/// Vertical orientation of the image. This selects both the COM scan direction and the segment
/// remap, so `BottomToTop` rotates the image by 180 degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Row 0 of the framebuffer is the top row of the panel.
    TopToBottom,
    /// Row 0 of the framebuffer is the bottom row of the panel.
    BottomToTop,
}

impl Orientation {
    fn commands(self) -> [Command; 2] {
        match self {
            Orientation::TopToBottom => [
                Command::ComScanDirection(ComScanDirection::Normal),
                Command::SegmentRemap(SegmentRemap::Column0ToSeg0),
            ],
            Orientation::BottomToTop => [
                Command::ComScanDirection(ComScanDirection::Remapped),
                Command::SegmentRemap(SegmentRemap::Column127ToSeg0),
            ],
        }
    }
}

/// Validated display dimensions. A `Geometry` only exists for dimensions the SSD1306 supports,
/// and never changes once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    width: u8,
    height: u8,
    pages: u8,
}

impl Geometry {
    /// Check `width` and `height` against the controller's limits.
    pub fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        if width == 0 || width > NUM_SEGMENTS {
            return Err(ConfigError::Width);
        }
        if height < 16 || height > NUM_COM_LINES || height % 8 != 0 {
            return Err(ConfigError::Height);
        }
        Ok(Geometry {
            width,
            height,
            pages: height / 8,
        })
    }

    /// Number of pixel columns, which is also the number of segments per page.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of pixel rows.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of 8-row pages.
    pub fn pages(&self) -> u8 {
        self.pages
    }
}

/// A configuration for the display. Dimensions and orientation are mandatory; everything else
/// has a default that works for the common 0x3C modules and can be overridden with the builder
/// methods.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    width: u8,
    height: u8,
    orientation: Orientation,
    pub(crate) address: u8,
    pub(crate) clock_hz: u32,
    pub(crate) timeout: Duration,
    contrast: u8,
    clock_divide: u8,
}

impl Config {
    /// Create a new configuration for a `width` x `height` display. Validation is deferred until
    /// the display is constructed.
    pub fn new(width: u8, height: u8, orientation: Orientation) -> Self {
        Config {
            width,
            height,
            orientation,
            address: 0x3C,
            clock_hz: MAX_CLOCK_HZ,
            timeout: Duration::from_millis(1000),
            contrast: 0xFF,
            clock_divide: 0x80,
        }
    }

    /// Extend this `Config` with the 7-bit I2C device address.
    pub fn address(self, address: u8) -> Self {
        Self { address, ..self }
    }

    /// Extend this `Config` with the I2C SCL frequency, at most 400 kHz.
    pub fn clock_speed(self, clock_hz: u32) -> Self {
        Self { clock_hz, ..self }
    }

    /// Extend this `Config` with the timeout applied to each bus transaction.
    pub fn timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Extend this `Config` to set the initial contrast. See `Command::Contrast`.
    pub fn contrast(self, contrast: u8) -> Self {
        Self { contrast, ..self }
    }

    /// Extend this `Config` to set the clock divide ratio and oscillator frequency. See
    /// `Command::ClockDivide`.
    pub fn clock_divide(self, clock_divide: u8) -> Self {
        Self {
            clock_divide,
            ..self
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Check the configuration, producing the display geometry.
    pub fn validate(&self) -> Result<Geometry, ConfigError> {
        if self.clock_hz == 0 || self.clock_hz > MAX_CLOCK_HZ {
            return Err(ConfigError::ClockSpeed);
        }
        Geometry::new(self.width, self.height)
    }

    /// The power-up sequence, sent as a single command transaction.
    pub(crate) fn init_batch(&self, geometry: &Geometry) -> Result<CommandBatch, CommandError> {
        let [scan, remap] = self.orientation.commands();
        let cmds = [
            Command::DisplayOn(false),
            Command::MuxRatio(geometry.height()),
            Command::DisplayOffset(0),
            Command::StartLine(0),
            scan,
            remap,
            Command::ComPinConfig(0x12),
            Command::AddressingMode(AddressingMode::Page),
            Command::Contrast(self.contrast),
            Command::ClockDivide(self.clock_divide),
            Command::EntireDisplayOn(false),
            Command::Inverse(false),
            Command::ChargePump(true),
            Command::DisplayOn(true),
        ];
        let mut batch = CommandBatch::new();
        batch.extend(cmds.iter().cloned())?;
        Ok(batch)
    }
}
