//! Blitting pre-rendered monochrome images into the framebuffer.

use crate::display::framebuffer::Framebuffer;
use crate::error::RangeError;

/// A monochrome image packed the same way as the framebuffer: rows of 8-pixel-tall bands, each
/// band one byte per column with bit 0 at the top, bands stored one after another. A `height`
/// that is not a multiple of 8 leaves the high bits of the last band unused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap<'a> {
    data: &'a [u8],
    width: u8,
    height: u8,
}

impl<'a> Bitmap<'a> {
    /// Wrap `data` as a `width` x `height` image. `data` must hold at least
    /// `width * ceil(height / 8)` bytes; any excess is ignored.
    pub fn new(data: &'a [u8], width: u8, height: u8) -> Result<Self, RangeError> {
        if width == 0 || height == 0 {
            return Err(RangeError::OutOfRange);
        }
        let bitmap = Bitmap {
            data,
            width,
            height,
        };
        if data.len() < bitmap.bands() as usize * width as usize {
            return Err(RangeError::SourceTooShort);
        }
        Ok(bitmap)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of 8-row bands in the image.
    pub fn bands(&self) -> u8 {
        ((self.height as u16 + 7) / 8) as u8
    }

    /// The image bytes of `band`.
    fn band(&self, band: u8) -> &'a [u8] {
        let start = band as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// The bits of `band` that fall inside the image.
    fn band_mask(&self, band: u8) -> u8 {
        let rows = self.height - band * 8;
        if rows >= 8 {
            0xFF
        } else {
            (1 << rows) - 1
        }
    }
}

impl Framebuffer {
    /// Draw `bitmap` with its top-left corner at `(x, y)`. `invert` complements the image bits.
    ///
    /// At an 8-aligned row each image band replaces the image's rows in the corresponding page.
    /// At any other row each band is split across two pages the same way text is, and ORed in.
    /// Nothing outside the rectangle `[x, x + width) x [y, y + height)` is modified.
    pub fn draw_bitmap(
        &mut self,
        x: u8,
        y: u8,
        bitmap: &Bitmap<'_>,
        invert: bool,
    ) -> Result<(), RangeError> {
        let geometry = *self.geometry();
        if false
            || x >= geometry.width()
            || y >= geometry.height()
            || bitmap.width() > geometry.width()
            || bitmap.height() > geometry.height()
            || x as u16 + bitmap.width() as u16 > geometry.width() as u16
            || y as u16 + bitmap.height() as u16 > geometry.height() as u16
        {
            return Err(RangeError::OutOfRange);
        }

        let initial_page = y / 8;
        let final_page = (y + bitmap.height() - 1) / 8;
        let offset = y % 8;
        let x = x as usize;

        for band in 0..bitmap.bands() {
            let mask = bitmap.band_mask(band);
            let page = initial_page + band;
            for (col, &src) in bitmap.band(band).iter().enumerate() {
                let bits = (if invert { !src } else { src }) & mask;
                if offset == 0 {
                    if let Some(dst) = self.page_mut(page) {
                        let seg = &mut dst.segments_mut()[x + col];
                        *seg = *seg & !mask | bits;
                    }
                } else {
                    if let Some(upper) = self.page_mut(page) {
                        upper.segments_mut()[x + col] |= (bits << offset) & (0xFF << offset);
                    }
                    if page + 1 > final_page {
                        continue;
                    }
                    if let Some(lower) = self.page_mut(page + 1) {
                        lower.segments_mut()[x + col] |=
                            (bits >> (8 - offset)) & (0xFF >> (8 - offset));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Geometry;
    use itertools::iproduct;
    use std::vec::Vec;

    fn fb(width: u8, height: u8) -> Framebuffer {
        Framebuffer::try_new(Geometry::new(width, height).unwrap()).unwrap()
    }

    /// Image bytes where every column byte is distinct.
    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i as u8).wrapping_mul(37) ^ 0x5A).collect()
    }

    fn image_pixel(bitmap: &[u8], width: u8, x: u8, y: u8) -> bool {
        bitmap[(y / 8) as usize * width as usize + x as usize] & (1 << (y % 8)) != 0
    }

    #[test]
    fn new_checks_extents() {
        let data = [0u8; 64];
        assert!(Bitmap::new(&data, 32, 16).is_ok());
        assert!(Bitmap::new(&data, 32, 12).is_ok());
        assert_eq!(Bitmap::new(&data, 32, 17), Err(RangeError::SourceTooShort));
        assert_eq!(Bitmap::new(&data, 0, 8), Err(RangeError::OutOfRange));
        assert_eq!(Bitmap::new(&data, 8, 0), Err(RangeError::OutOfRange));
        assert_eq!(Bitmap::new(&data, 8, 12).unwrap().bands(), 2);
    }

    #[test]
    fn aligned_blit_is_a_direct_copy() {
        let data = pattern(32 * 4);
        let bitmap = Bitmap::new(&data, 32, 32).unwrap();
        let mut fb = fb(128, 64);
        fb.fill(true);
        fb.draw_bitmap(48, 16, &bitmap, false).unwrap();
        for band in 0..4u8 {
            let page = fb.page(2 + band).unwrap().segments();
            let start = band as usize * 32;
            assert_eq!(&page[48..80], &data[start..start + 32]);
            assert!(page[..48].iter().all(|&b| b == 0xFF));
            assert!(page[80..].iter().all(|&b| b == 0xFF));
        }
        assert!(fb.page(0).unwrap().segments().iter().all(|&b| b == 0xFF));
        assert!(fb.page(7).unwrap().segments().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn aligned_inverted_blit() {
        let data = pattern(8);
        let bitmap = Bitmap::new(&data, 8, 8).unwrap();
        let mut fb = fb(128, 64);
        fb.draw_bitmap(0, 0, &bitmap, true).unwrap();
        let expected: Vec<u8> = data.iter().map(|b| !b).collect();
        assert_eq!(&fb.page(0).unwrap().segments()[..8], &expected[..]);
    }

    #[test]
    fn aligned_partial_band_keeps_rows_below() {
        let data = [0xFFu8; 4];
        let bitmap = Bitmap::new(&data, 4, 3).unwrap();
        let mut fb = fb(128, 16);
        fb.fill_region(0, 3, 0, 7, true).unwrap();
        fb.draw_bitmap(0, 0, &bitmap, true).unwrap();
        // Rows 0-2 cleared by the inverted image, rows 3-7 untouched.
        for col in 0..4 {
            assert_eq!(fb.segment(0, col), Some(0xF8));
        }
    }

    #[test]
    fn offset_blit_places_every_pixel() {
        for &(y, height) in [(20u8, 32u8), (3, 8), (2, 4), (5, 12), (1, 62), (9, 13)].iter() {
            let width = 7;
            let bands = ((height as usize) + 7) / 8;
            let data = pattern(width as usize * bands);
            let bitmap = Bitmap::new(&data, width, height).unwrap();
            let mut fb = fb(128, 64);
            fb.draw_bitmap(10, y, &bitmap, false).unwrap();
            for (px, py) in iproduct!(0..128u8, 0..64u8) {
                let inside = px >= 10 && px < 10 + width && py >= y && py < y + height;
                let expected = inside && image_pixel(&data, width, px - 10, py - y);
                assert_eq!(
                    fb.pixel(px, py),
                    expected,
                    "y={} height={} pixel ({}, {})",
                    y,
                    height,
                    px,
                    py
                );
            }
        }
    }

    #[test]
    fn offset_blit_ors_into_existing_content() {
        let data = [0x00u8; 2];
        let bitmap = Bitmap::new(&data, 2, 8).unwrap();
        let mut fb = fb(128, 16);
        fb.fill(true);
        fb.draw_bitmap(0, 4, &bitmap, false).unwrap();
        assert_eq!(fb.segment(0, 0), Some(0xFF));
        assert_eq!(fb.segment(1, 1), Some(0xFF));
    }

    #[test]
    fn offset_inverted_blit_stays_inside_rectangle() {
        let data = [0x00u8; 3];
        let bitmap = Bitmap::new(&data, 3, 5).unwrap();
        let mut fb = fb(128, 16);
        fb.draw_bitmap(1, 6, &bitmap, true).unwrap();
        for (px, py) in iproduct!(0..128u8, 0..16u8) {
            let inside = px >= 1 && px < 4 && py >= 6 && py < 11;
            assert_eq!(fb.pixel(px, py), inside, "pixel ({}, {})", px, py);
        }
    }

    #[test]
    fn out_of_range_is_a_no_op() {
        let data = [0xFFu8; 128 * 8];
        let mut fb = fb(128, 64);
        let before = fb.clone();
        let wide = Bitmap::new(&data, 128, 8).unwrap();
        let tall = Bitmap::new(&data, 8, 64).unwrap();
        assert_eq!(fb.draw_bitmap(1, 0, &wide, false), Err(RangeError::OutOfRange));
        assert_eq!(fb.draw_bitmap(0, 1, &tall, false), Err(RangeError::OutOfRange));
        assert_eq!(fb.draw_bitmap(128, 0, &tall, false), Err(RangeError::OutOfRange));
        assert_eq!(fb.draw_bitmap(0, 64, &wide, false), Err(RangeError::OutOfRange));
        assert_eq!(fb, before);
        assert!(fb.draw_bitmap(0, 0, &wide, false).is_ok());
        assert!(fb.draw_bitmap(120, 0, &tall, false).is_ok());
    }

    #[test]
    fn oversized_bitmap_rejected() {
        let data = [0xFFu8; 128 * 8];
        let bitmap = Bitmap::new(&data, 128, 64).unwrap();
        let mut fb = fb(64, 32);
        assert_eq!(fb.draw_bitmap(0, 0, &bitmap, false), Err(RangeError::OutOfRange));
    }
}
