//! The transport the driver sends controller traffic through.

use core::time::Duration;

/// A bus connection to an SSD1306. Every controller exchange is one write transaction whose first
/// byte is a control marker (see `command::CONTROL_COMMAND` and `command::CONTROL_DATA`).
pub trait DisplayInterface {
    type Error;

    /// Send `bytes` as a single bus transaction, giving up after `timeout`.
    fn transmit(&mut self, bytes: &[u8], timeout: Duration) -> Result<(), Self::Error>;
}

pub mod i2c {
    //! The I2C interface. The SSD1306 distinguishes command and data bytes by a control byte at
    //! the start of each I2C write, so no D/C pin is needed.

    use core::time::Duration;

    use hal;

    use super::DisplayInterface;

    /// Highest SCL frequency the SSD1306 supports (fast mode).
    pub const MAX_CLOCK_HZ: u32 = 400_000;

    /// An SSD1306 registered on an I2C bus.
    pub struct I2cInterface<I2C> {
        /// The I2C master the SSD1306 is attached to.
        i2c: I2C,
        /// 7-bit device address, usually 0x3C or 0x3D depending on the SA0 strap.
        address: u8,
        clock_hz: u32,
    }

    impl<I2C> I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write,
    {
        /// Register a device at the 7-bit `address` on the bus `i2c`. The bus itself must already
        /// be configured for `clock_hz`, which may not exceed `MAX_CLOCK_HZ`. Returns the bus back
        /// if the address or clock speed cannot be used.
        pub fn register(i2c: I2C, address: u8, clock_hz: u32) -> Result<Self, I2C> {
            if address > 0x7F || clock_hz == 0 || clock_hz > MAX_CLOCK_HZ {
                return Err(i2c);
            }
            Ok(Self {
                i2c,
                address,
                clock_hz,
            })
        }

        pub fn address(&self) -> u8 {
            self.address
        }

        pub fn clock_hz(&self) -> u32 {
            self.clock_hz
        }

        /// Give the bus back.
        pub fn release(self) -> I2C {
            self.i2c
        }
    }

    impl<I2C> DisplayInterface for I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write,
    {
        type Error = I2C::Error;

        /// The blocking embedded-hal bus applies its own timeout, configured when the bus was
        /// created, so `_timeout` is not forwarded.
        fn transmit(&mut self, bytes: &[u8], _timeout: Duration) -> Result<(), Self::Error> {
            self.i2c.write(self.address, bytes)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::vec::Vec;

        struct FakeBus {
            writes: Vec<(u8, Vec<u8>)>,
        }

        impl hal::blocking::i2c::Write for FakeBus {
            type Error = ();
            fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), ()> {
                self.writes.push((address, bytes.to_vec()));
                Ok(())
            }
        }

        #[test]
        fn register_checks_address_and_clock() {
            let bus = || FakeBus { writes: Vec::new() };
            assert!(I2cInterface::register(bus(), 0x3C, 400_000).is_ok());
            assert!(I2cInterface::register(bus(), 0x80, 400_000).is_err());
            assert!(I2cInterface::register(bus(), 0x3C, 400_001).is_err());
            assert!(I2cInterface::register(bus(), 0x3C, 0).is_err());
        }

        #[test]
        fn transmit_writes_to_device_address() {
            let bus = FakeBus { writes: Vec::new() };
            let mut iface = I2cInterface::register(bus, 0x3D, 100_000).ok().unwrap();
            iface
                .transmit(&[0x00, 0xAF], Duration::from_millis(10))
                .unwrap();
            let bus = iface.release();
            assert_eq!(bus.writes, vec![(0x3D, vec![0x00, 0xAF])]);
        }
    }
}
