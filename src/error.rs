//! Error types reported by the driver.

use core::fmt;

use crate::command::CommandError;

/// A construction parameter is outside what the SSD1306 supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Width must be between 1 and 128 columns.
    Width,
    /// Height must be between 16 and 64 rows, and a multiple of 8.
    Height,
    /// The bus clock must not exceed 400 kHz.
    ClockSpeed,
}

/// A drawing or sync request did not fit the display. The framebuffer is left valid and the
/// driver remains usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeError {
    /// A coordinate, page, or segment index lies outside the display.
    OutOfRange,
    /// Text ran past the right edge of the display. Characters drawn before the overflow stay
    /// in the framebuffer.
    WidthOverflow,
    /// Text at a non-aligned row needs a page below the last one.
    HeightOverflow,
    /// A bitmap's backing slice is shorter than its declared extents require.
    SourceTooShort,
}

/// Errors from constructing the driver or synchronizing the framebuffer to the display. `E` is
/// the error type of the underlying `DisplayInterface`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Invalid construction parameters; no driver was produced.
    Config(ConfigError),
    /// The framebuffer could not be allocated.
    Allocation,
    /// The device could not be registered on the bus.
    Registration,
    /// A bus transaction failed.
    Transport(E),
    /// A page or segment index was outside the display.
    Range(RangeError),
    /// A command argument was outside what the controller accepts.
    Command(CommandError),
}

impl<E> From<ConfigError> for Error<E> {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl<E> From<RangeError> for Error<E> {
    fn from(e: RangeError) -> Self {
        Error::Range(e)
    }
}

impl<E> From<CommandError> for Error<E> {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Width => f.write_str("width must be between 1 and 128"),
            ConfigError::Height => {
                f.write_str("height must be between 16 and 64 and a multiple of 8")
            }
            ConfigError::ClockSpeed => f.write_str("bus clock must not exceed 400 kHz"),
        }
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::OutOfRange => f.write_str("coordinates outside the display"),
            RangeError::WidthOverflow => f.write_str("content exceeds the display width"),
            RangeError::HeightOverflow => f.write_str("content exceeds the display height"),
            RangeError::SourceTooShort => f.write_str("bitmap data shorter than its extents"),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "invalid configuration: {}", e),
            Error::Allocation => f.write_str("framebuffer allocation failed"),
            Error::Registration => f.write_str("device registration failed"),
            Error::Transport(e) => write!(f, "transport error: {:?}", e),
            Error::Range(e) => write!(f, "{}", e),
            Error::Command(_) => f.write_str("command argument out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for RangeError {}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}
