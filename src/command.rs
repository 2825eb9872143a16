//! The command set for the SSD1306.
//!
//! Note 1: The display RAM of the SSD1306 is 128 columns ("segments") by 8 pages, each page being
//! a horizontal band of 8 pixel rows stored as one byte per column with bit 0 the top row. In page
//! addressing mode the column pointer advances after each data byte written and wraps within the
//! current page, so writing a run of segments is one address setup followed by one data burst.
//!
//! Note 2: Over I2C every write transaction starts with a control byte. `CONTROL_COMMAND` marks
//! the remaining bytes of the transaction as commands (opcodes and their arguments alike), and
//! `CONTROL_DATA` marks them as display RAM data.

use arrayvec::ArrayVec;

pub const CONTROL_COMMAND: u8 = 0x00;
pub const CONTROL_DATA: u8 = 0x40;

pub const NUM_SEGMENTS: u8 = 128;
pub const NUM_PAGES: u8 = 8;
pub const NUM_COM_LINES: u8 = 64;
pub const SEGMENT_MAX: u8 = NUM_SEGMENTS - 1;
pub const PAGE_MAX: u8 = NUM_PAGES - 1;
pub const COM_LINE_MAX: u8 = NUM_COM_LINES - 1;

/// The argument of a command was outside the range the controller accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandError;

/// How the display RAM address pointer advances as data is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    /// The column pointer advances left to right and moves to the next page at the end of a row.
    Horizontal,
    /// The page pointer advances top to bottom and moves to the next column at the last page.
    Vertical,
    /// The column pointer advances within the current page only. The driver uses this mode.
    Page,
}

/// Setting of the COM line scanning of rows. Changing this setting flips the image vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComScanDirection {
    /// COM0 is scanned first.
    Normal,
    /// COM[N-1] is scanned first.
    Remapped,
}

/// Setting of segment remapping. Changing this setting mirrors the image horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentRemap {
    /// Column address 0 maps to SEG0.
    Column0ToSeg0,
    /// Column address 127 maps to SEG0.
    Column127ToSeg0,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Turn the display panel on (`false` puts the controller to sleep).
    DisplayOn(bool),
    /// Set the multiplex ratio, the number of active COM lines. Range is 16-64.
    MuxRatio(u8),
    /// Set the vertical shift of the COM lines. Range is 0-63.
    DisplayOffset(u8),
    /// Set the display RAM row shown on the first COM line, rolling the image upwards. Range is
    /// 0-63.
    StartLine(u8),
    /// Set the segment remapping. See enum for details.
    SegmentRemap(SegmentRemap),
    /// Set the COM scan direction. See enum for details.
    ComScanDirection(ComScanDirection),
    /// Set the COM pins hardware configuration byte. Only bits 4 (alternative layout) and 5
    /// (left/right remap) may be set, and bit 1 is always set.
    ComPinConfig(u8),
    /// Set the memory addressing mode. See enum for details.
    AddressingMode(AddressingMode),
    /// Set the contrast. Range is 0-255.
    Contrast(u8),
    /// Set the display clock divide ratio (low nibble) and oscillator frequency (high nibble).
    ClockDivide(u8),
    /// Resume showing the display RAM contents (`false`), or light every pixel regardless of RAM
    /// (`true`).
    EntireDisplayOn(bool),
    /// Show lit RAM bits as dark pixels and vice versa.
    Inverse(bool),
    /// Enable or disable the internal charge pump regulator.
    ChargePump(bool),
    /// Select the page for page addressing mode. Range is 0-7.
    PageAddress(u8),
    /// Set the low nibble of the column start address for page addressing mode.
    LowerColumnStart(u8),
    /// Set the high nibble of the column start address for page addressing mode.
    HigherColumnStart(u8),
}

macro_rules! ok_command {
    ($buf:ident, []) => {
        Ok(&$buf[..0])
    };
    ($buf:ident, [$b0:expr]) => {{
        $buf[0] = $b0;
        Ok(&$buf[..1])
    }};
    ($buf:ident, [$b0:expr, $b1:expr]) => {{
        $buf[0] = $b0;
        $buf[1] = $b1;
        Ok(&$buf[..2])
    }};
}

impl Command {
    /// Encode the command into `buf`, returning the slice of it that holds the command bytes.
    pub fn encode(self, buf: &mut [u8; 2]) -> Result<&[u8], CommandError> {
        match self {
            Command::DisplayOn(on) => ok_command!(buf, [if on { 0xAF } else { 0xAE }]),
            Command::MuxRatio(ratio) => match ratio {
                16..=NUM_COM_LINES => ok_command!(buf, [0xA8, ratio - 1]),
                _ => Err(CommandError),
            },
            Command::DisplayOffset(offset) => match offset {
                0..=COM_LINE_MAX => ok_command!(buf, [0xD3, offset]),
                _ => Err(CommandError),
            },
            Command::StartLine(line) => match line {
                0..=COM_LINE_MAX => ok_command!(buf, [0x40 | line]),
                _ => Err(CommandError),
            },
            Command::SegmentRemap(remap) => ok_command!(
                buf,
                [match remap {
                    SegmentRemap::Column0ToSeg0 => 0xA0,
                    SegmentRemap::Column127ToSeg0 => 0xA1,
                }]
            ),
            Command::ComScanDirection(dir) => ok_command!(
                buf,
                [match dir {
                    ComScanDirection::Normal => 0xC0,
                    ComScanDirection::Remapped => 0xC8,
                }]
            ),
            Command::ComPinConfig(cfg) => match cfg & !0x30 {
                0x02 => ok_command!(buf, [0xDA, cfg]),
                _ => Err(CommandError),
            },
            Command::AddressingMode(mode) => ok_command!(
                buf,
                [
                    0x20,
                    match mode {
                        AddressingMode::Horizontal => 0x00,
                        AddressingMode::Vertical => 0x01,
                        AddressingMode::Page => 0x02,
                    }
                ]
            ),
            Command::Contrast(contrast) => ok_command!(buf, [0x81, contrast]),
            Command::ClockDivide(setting) => ok_command!(buf, [0xD5, setting]),
            Command::EntireDisplayOn(on) => ok_command!(buf, [if on { 0xA5 } else { 0xA4 }]),
            Command::Inverse(inv) => ok_command!(buf, [if inv { 0xA7 } else { 0xA6 }]),
            Command::ChargePump(on) => ok_command!(buf, [0x8D, if on { 0x14 } else { 0x10 }]),
            Command::PageAddress(page) => match page {
                0..=PAGE_MAX => ok_command!(buf, [0xB0 | page]),
                _ => Err(CommandError),
            },
            Command::LowerColumnStart(column) => match column {
                0..=SEGMENT_MAX => ok_command!(buf, [column & 0x0F]),
                _ => Err(CommandError),
            },
            Command::HigherColumnStart(column) => match column {
                0..=SEGMENT_MAX => ok_command!(buf, [0x10 | (column >> 4 & 0x0F)]),
                _ => Err(CommandError),
            },
        }
    }
}

/// The three commands that point the page-mode RAM address at `column` of `page`.
pub fn address_commands(page: u8, column: u8) -> [Command; 3] {
    [
        Command::PageAddress(page),
        Command::LowerColumnStart(column),
        Command::HigherColumnStart(column),
    ]
}

/// Capacity of a command batch, including the control byte.
pub const BATCH_CAPACITY: usize = 32;

/// A sequence of commands sent together in one command-marked transaction.
pub struct CommandBatch {
    bytes: ArrayVec<u8, BATCH_CAPACITY>,
}

impl CommandBatch {
    pub fn new() -> Self {
        let mut bytes = ArrayVec::new();
        bytes.push(CONTROL_COMMAND);
        Self { bytes }
    }

    /// Append one command. Fails if its arguments are out of range or the batch is full, in which
    /// case the batch is left unchanged.
    pub fn push(&mut self, cmd: Command) -> Result<&mut Self, CommandError> {
        let mut buf = [0u8; 2];
        let encoded = cmd.encode(&mut buf)?;
        self.bytes
            .try_extend_from_slice(encoded)
            .map_err(|_| CommandError)?;
        Ok(self)
    }

    /// Append every command in `cmds`.
    pub fn extend<I>(&mut self, cmds: I) -> Result<&mut Self, CommandError>
    where
        I: IntoIterator<Item = Command>,
    {
        for cmd in cmds {
            self.push(cmd)?;
        }
        Ok(self)
    }

    /// The bytes of the transaction, control byte first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for CommandBatch {
    fn default() -> Self {
        Self::new()
    }
}
