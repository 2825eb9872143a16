//! Copying framebuffer contents into the display RAM.
//!
//! Every sync is two transactions per page: a command transaction pointing the page-mode RAM
//! address at the first segment, and a data transaction carrying the segment bytes. The display
//! RAM is never read back, so it only reflects the framebuffer as of the last sync covering each
//! segment.

use arrayvec::ArrayVec;

use crate::command::{address_commands, CommandBatch, CONTROL_DATA, NUM_SEGMENTS};
use crate::display::Display;
use crate::error::{Error, RangeError};
use crate::interface;

/// Data marker plus one full page.
const DATA_CAPACITY: usize = NUM_SEGMENTS as usize + 1;

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Send the single byte at `segment` of `page`.
    pub fn sync_segment(&mut self, page: u8, segment: u8) -> Result<(), Error<DI::Error>> {
        self.sync_segments(page, segment, segment)
    }

    /// Send segments `first..=last` of `page`.
    pub fn sync_segments(
        &mut self,
        page: u8,
        first: u8,
        last: u8,
    ) -> Result<(), Error<DI::Error>> {
        if page >= self.geometry.pages() {
            log::warn!(
                "page {} outside 0..{}",
                page,
                self.geometry.pages()
            );
            return Err(Error::Range(RangeError::OutOfRange));
        }
        if first > last || last >= self.geometry.width() {
            log::warn!(
                "segments {}..={} outside 0..{}",
                first,
                last,
                self.geometry.width()
            );
            return Err(Error::Range(RangeError::OutOfRange));
        }

        let mut address = CommandBatch::new();
        address.extend(address_commands(page, first).iter().cloned())?;

        let mut data = ArrayVec::<u8, DATA_CAPACITY>::new();
        data.push(CONTROL_DATA);
        if let Some(p) = self.framebuffer.page(page) {
            data.extend(p.segments()[first as usize..=last as usize].iter().cloned());
        }

        log::trace!("sync page {} segments {}..={}", page, first, last);
        self.iface
            .transmit(address.as_bytes(), self.timeout)
            .map_err(Error::Transport)?;
        self.iface
            .transmit(&data, self.timeout)
            .map_err(Error::Transport)
    }

    /// Send every segment of `page`.
    pub fn sync_page(&mut self, page: u8) -> Result<(), Error<DI::Error>> {
        let last = self.geometry.width() - 1;
        self.sync_segments(page, 0, last)
    }

    /// Send every page, top to bottom. Stops at the first failure; pages sent before it stay
    /// updated on the display.
    pub fn sync_all(&mut self) -> Result<(), Error<DI::Error>> {
        log::debug!("sync {} pages", self.geometry.pages());
        for page in 0..self.geometry.pages() {
            self.sync_page(page)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, Orientation};
    use crate::display::Display;
    use crate::error::{Error, RangeError};
    use crate::interface::test_spy::{SpyFailure, TestSpyInterface};
    use std::iter;
    use std::vec::Vec;

    fn display(width: u8, height: u8, di: &TestSpyInterface) -> Display<TestSpyInterface> {
        let cfg = Config::new(width, height, Orientation::TopToBottom);
        let disp = Display::new(di.split(), cfg).unwrap();
        di.clear();
        disp
    }

    fn data(bytes: impl Iterator<Item = u8>) -> Vec<u8> {
        iter::once(0x40).chain(bytes).collect()
    }

    #[test]
    fn sync_segment() {
        let di = TestSpyInterface::new();
        let mut disp = display(128, 64, &di);
        disp.set_pixel(0x5A, 17, true).unwrap();
        disp.sync_segment(2, 0x5A).unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(txs!(
            [0x00, 0xB2, 0x0A, 0x15],
            [0x40, 0x02]
        ));
    }

    #[test]
    fn sync_segments() {
        let di = TestSpyInterface::new();
        let mut disp = display(128, 64, &di);
        disp.fill_region(100, 102, 56, 63, true).unwrap();
        disp.sync_segments(7, 99, 103).unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(txs!(
            [0x00, 0xB7, 0x03, 0x16],
            [0x40, 0x00, 0xFF, 0xFF, 0xFF, 0x00]
        ));
    }

    #[test]
    fn sync_zero_page() {
        let di = TestSpyInterface::new();
        let mut disp = display(96, 32, &di);
        disp.sync_page(3).unwrap();
        let expected = [
            vec![0x00, 0xB3, 0x00, 0x10],
            data(iter::repeat(0).take(96)),
        ];
        di.check_multi(&expected);
    }

    #[test]
    fn sync_all_filled() {
        let di = TestSpyInterface::new();
        let mut disp = display(128, 64, &di);
        disp.fill(true);
        disp.sync_all().unwrap();
        let sent = di.sent();
        assert_eq!(sent.len(), 16);
        for page in 0..8u8 {
            assert_eq!(sent[2 * page as usize], vec![0x00, 0xB0 | page, 0x00, 0x10]);
            assert_eq!(sent[2 * page as usize + 1], data(iter::repeat(0xFF).take(128)));
        }
    }

    #[test]
    fn sync_sends_text() {
        let di = TestSpyInterface::new();
        let mut disp = display(128, 64, &di);
        disp.draw_text(12, 0, "Hi", false).unwrap();
        disp.sync_segments(0, 12, 27).unwrap();
        let sent = di.sent();
        assert_eq!(
            &sent[1][1..],
            &disp.framebuffer().page(0).unwrap().segments()[12..28]
        );
    }

    #[test]
    fn out_of_range_sends_nothing() {
        let di = TestSpyInterface::new();
        let mut disp = display(100, 32, &di);
        let oor = Err(Error::Range(RangeError::OutOfRange));
        assert_eq!(disp.sync_segment(4, 0), oor);
        assert_eq!(disp.sync_segment(0, 100), oor);
        assert_eq!(disp.sync_segments(0, 10, 9), oor);
        assert_eq!(disp.sync_segments(0, 0, 100), oor);
        assert_eq!(disp.sync_page(4), oor);
        assert!(di.sent().is_empty());
        assert!(disp.sync_segments(3, 99, 99).is_ok());
    }

    #[test]
    fn transport_failure_on_address() {
        let di = TestSpyInterface::new();
        let mut disp = display(128, 64, &di);
        di.fail_after(0);
        assert_eq!(
            disp.sync_page(0),
            Err(Error::Transport(SpyFailure))
        );
        assert!(di.sent().is_empty());
    }

    #[test]
    fn sync_all_stops_at_first_failure() {
        let di = TestSpyInterface::new();
        let mut disp = display(128, 64, &di);
        // Pages 0-2 go through, page 3 fails on its data transaction.
        di.fail_after(7);
        assert_eq!(disp.sync_all(), Err(Error::Transport(SpyFailure)));
        let sent = di.sent();
        assert_eq!(sent.len(), 7);
        assert_eq!(sent[6], vec![0x00, 0xB3, 0x00, 0x10]);
    }
}
