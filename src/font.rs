//! The fixed 8x8 glyph table.
//!
//! Each glyph is 8 bytes, one per pixel column from left to right, where bit `b` of a byte
//! lights row `b` of that column. This matches the page layout of the display RAM, so a glyph
//! drawn at an 8-aligned row is a straight copy into one page.
//!
//! The table is indexed by Latin-1 code. Bitmaps come from the `font8x8` crate, which stores
//! glyphs row-major with bit 0 as the leftmost pixel; they are transposed once at compile time.

use font8x8::legacy::{BASIC_LEGACY, LATIN_LEGACY};

/// Number of pixel columns (and rows) in a glyph.
pub const GLYPH_SIZE: usize = 8;

/// A single column-major glyph.
pub type Glyph = [u8; GLYPH_SIZE];

/// Glyph table keyed by Latin-1 character code. Codes 0x80-0x9F are blank.
pub static GLYPHS: [Glyph; 256] = build_table();

/// Code drawn in place of characters that have no Latin-1 encoding.
pub const REPLACEMENT: u8 = b'?';

/// Look up the glyph for `c`, substituting `REPLACEMENT` for characters beyond Latin-1.
pub fn glyph(c: char) -> &'static Glyph {
    &GLYPHS[glyph_index(c) as usize]
}

/// Map a character to its index in `GLYPHS`.
pub fn glyph_index(c: char) -> u8 {
    let code = c as u32;
    if code < 256 {
        code as u8
    } else {
        REPLACEMENT
    }
}

const fn transpose(rows: &[u8; GLYPH_SIZE]) -> Glyph {
    let mut cols = [0u8; GLYPH_SIZE];
    let mut row = 0;
    while row < GLYPH_SIZE {
        let mut col = 0;
        while col < GLYPH_SIZE {
            if rows[row] & (1 << col) != 0 {
                cols[col] |= 1 << row;
            }
            col += 1;
        }
        row += 1;
    }
    cols
}

const fn build_table() -> [Glyph; 256] {
    let mut table = [[0u8; GLYPH_SIZE]; 256];
    let mut i = 0;
    while i < BASIC_LEGACY.len() {
        table[i] = transpose(&BASIC_LEGACY[i]);
        i += 1;
    }
    let mut i = 0;
    while i < LATIN_LEGACY.len() {
        table[0xA0 + i] = transpose(&LATIN_LEGACY[i]);
        i += 1;
    }
    table
}
