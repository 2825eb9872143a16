//! Text rendering with the 8x8 glyph table.
//!
//! A glyph drawn at an 8-aligned row replaces one page's bytes outright. At any other row each
//! glyph column straddles two pages: the low `8 - offset` bits are ORed into the upper page
//! shifted down by `offset`, and the high `offset` bits into the page below it.

use core::fmt::{self, Write};

use arrayvec::ArrayString;

use crate::display::framebuffer::Framebuffer;
use crate::error::RangeError;
use crate::font::{self, Glyph, GLYPHS, GLYPH_SIZE};

/// Staging capacity for formatted numbers. Far more glyphs than fit across the widest display,
/// so a truncated number still runs past the right edge and reports `WidthOverflow`.
const NUMBER_CAPACITY: usize = 96;

/// Formatting target that keeps as many leading characters as fit and drops the rest.
struct Truncating(ArrayString<NUMBER_CAPACITY>);

impl fmt::Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.try_push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

impl Framebuffer {
    /// Draw `text` with its top-left corner at `(x, y)`, one 8x8 glyph per character, left to
    /// right. `invert` complements every glyph byte.
    ///
    /// Characters are drawn until one would cross the right edge, which returns
    /// `RangeError::WidthOverflow` and leaves the characters already drawn in place.
    pub fn draw_text(
        &mut self,
        x: u8,
        y: u8,
        text: &str,
        invert: bool,
    ) -> Result<(), RangeError> {
        self.draw_glyphs(x, y, text.chars().map(font::glyph_index), invert)
    }

    /// Draw the decimal representation of `value`. See `draw_text`.
    pub fn draw_int(
        &mut self,
        x: u8,
        y: u8,
        value: i32,
        invert: bool,
    ) -> Result<(), RangeError> {
        let mut text = Truncating(ArrayString::new());
        let _ = write!(text, "{}", value);
        self.draw_text(x, y, &text.0, invert)
    }

    /// Draw `value` with exactly `decimals` digits after the decimal point. See `draw_text`.
    pub fn draw_float(
        &mut self,
        x: u8,
        y: u8,
        value: f32,
        decimals: u8,
        invert: bool,
    ) -> Result<(), RangeError> {
        let mut text = Truncating(ArrayString::new());
        let _ = write!(text, "{:.*}", decimals as usize, value);
        self.draw_text(x, y, &text.0, invert)
    }

    /// Draw the glyphs at the given `GLYPHS` indices. See `draw_text`.
    pub fn draw_glyphs<I>(
        &mut self,
        x: u8,
        y: u8,
        codes: I,
        invert: bool,
    ) -> Result<(), RangeError>
    where
        I: IntoIterator<Item = u8>,
    {
        let geometry = *self.geometry();
        if x >= geometry.width() || y >= geometry.height() {
            return Err(RangeError::OutOfRange);
        }
        let page = y / 8;
        let offset = y % 8;
        if offset != 0 && page + 1 >= geometry.pages() {
            return Err(RangeError::HeightOverflow);
        }

        let mut x = x as usize;
        for code in codes {
            if x + GLYPH_SIZE > geometry.width() as usize {
                return Err(RangeError::WidthOverflow);
            }
            let glyph = &GLYPHS[code as usize];
            if offset == 0 {
                self.copy_glyph(page, x, glyph, invert);
            } else {
                self.straddle_glyph(page, offset, x, glyph, invert);
            }
            x += GLYPH_SIZE;
        }
        Ok(())
    }

    fn copy_glyph(&mut self, page: u8, x: usize, glyph: &Glyph, invert: bool) {
        if let Some(dst) = self.page_mut(page) {
            for (seg, &col) in dst.segments_mut()[x..x + GLYPH_SIZE].iter_mut().zip(glyph) {
                *seg = if invert { !col } else { col };
            }
        }
    }

    fn straddle_glyph(&mut self, page: u8, offset: u8, x: usize, glyph: &Glyph, invert: bool) {
        for (i, &col) in glyph.iter().enumerate() {
            let col = if invert { !col } else { col };
            if let Some(upper) = self.page_mut(page) {
                upper.segments_mut()[x + i] |= col << offset;
            }
            if let Some(lower) = self.page_mut(page + 1) {
                lower.segments_mut()[x + i] |= col >> (8 - offset);
            }
        }
    }
}
