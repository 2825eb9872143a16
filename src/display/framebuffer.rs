//! The in-memory image of the display RAM, and the pixel and region primitives that draw into it.

use alloc::vec::Vec;
use core::fmt;

use itertools::iproduct;

use crate::config::Geometry;
use crate::error::RangeError;

/// One 8-row band of the framebuffer: a byte per column, bit 0 being the top row of the band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    segments: Vec<u8>,
}

impl Page {
    /// The segment bytes of this page, left to right.
    pub fn segments(&self) -> &[u8] {
        &self.segments
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [u8] {
        &mut self.segments
    }
}

/// The framebuffer. It always holds exactly `geometry.pages()` pages of `geometry.width()`
/// segments each; indices are checked at every public accessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    geometry: Geometry,
    pages: Vec<Page>,
}

impl Framebuffer {
    /// Allocate a zeroed framebuffer for `geometry`. Returns `None` if the allocation fails.
    pub fn try_new(geometry: Geometry) -> Option<Self> {
        let mut pages = Vec::new();
        pages.try_reserve_exact(geometry.pages() as usize).ok()?;
        for _ in 0..geometry.pages() {
            let mut segments = Vec::new();
            segments.try_reserve_exact(geometry.width() as usize).ok()?;
            segments.resize(geometry.width() as usize, 0);
            pages.push(Page { segments });
        }
        Some(Framebuffer { geometry, pages })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The page at index `page`, if it exists.
    pub fn page(&self, page: u8) -> Option<&Page> {
        self.pages.get(page as usize)
    }

    /// All pages, top to bottom.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The byte at column `x` of `page`, if both exist.
    pub fn segment(&self, page: u8, x: u8) -> Option<u8> {
        self.page(page)
            .and_then(|p| p.segments.get(x as usize))
            .cloned()
    }

    pub(crate) fn page_mut(&mut self, page: u8) -> Option<&mut Page> {
        self.pages.get_mut(page as usize)
    }

    /// Whether the pixel at `(x, y)` is lit. Out-of-range pixels read as unlit.
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        self.segment(y / 8, x)
            .map_or(false, |byte| byte & (1 << (y % 8)) != 0)
    }

    /// Set every byte to 0.
    pub fn clear(&mut self) {
        self.fill(false)
    }

    /// Set every byte to 0xFF if `lit`, else to 0.
    pub fn fill(&mut self, lit: bool) {
        let value = if lit { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            for byte in page.segments.iter_mut() {
                *byte = value;
            }
        }
    }

    /// Light or clear the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u8, y: u8, lit: bool) -> Result<(), RangeError> {
        if x >= self.geometry.width() || y >= self.geometry.height() {
            return Err(RangeError::OutOfRange);
        }
        self.write_pixel(x, y, lit);
        Ok(())
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
        if false
            || x1 > x2
            || y1 > y2
            || x2 >= self.geometry.width()
            || y2 >= self.geometry.height()
        {
            return Err(RangeError::OutOfRange);
        }
        for (y, x) in iproduct!(y1..=y2, x1..=x2) {
            self.write_pixel(x, y, lit);
        }
        Ok(())
    }

    fn write_pixel(&mut self, x: u8, y: u8, lit: bool) {
        let byte = &mut self.pages[(y / 8) as usize].segments[x as usize];
        let mask = 1 << (y % 8);
        if lit {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }
}

/// A hex dump of the framebuffer, one line per page. Intended for debugging only.
impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for page in self.pages.iter() {
            for byte in page.segments.iter() {
                write!(f, "{:02X} ", byte)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
