//! Full example code for driving an SSD1306 display. This runs on an STM32F303RE, using a common
//! 128x64 0.96" I2C OLED module at address 0x3C connected to I2C1 on PB6 (SCL) and PB7 (SDA).

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate alloc;
extern crate alloc_cortex_m;
extern crate cortex_m;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;
extern crate ssd1306;

use alloc_cortex_m::CortexMHeap;
use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::i2c::I2c;
use hal::prelude::*;
use ssd1306 as oled;

#[global_allocator]
static ALLOCATOR: CortexMHeap = CortexMHeap::empty();

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

/// A 32x32 logo, packed as four 8-row bands of 32 columns.
#[cfg_attr(rustfmt, rustfmt_skip)]
const LOGO: [u8; 128] = [
    0x00, 0x00, 0x00, 0xC0, 0x60, 0x18, 0x00, 0x00, 0x70, 0x78, 0x78, 0x78, 0xF8, 0xF8, 0xF0, 0xF0,
    0xF2, 0xE6, 0xE6, 0xCE, 0x9E, 0x9C, 0x3C, 0x78, 0xF8, 0xF0, 0xE0, 0xC0, 0x80, 0x00, 0x00, 0x00,
    0x00, 0xFC, 0x07, 0x60, 0xF8, 0xFC, 0xFE, 0xFE, 0x9E, 0x9E, 0x9E, 0x3E, 0x3E, 0x7C, 0x7C, 0xF9,
    0xF9, 0xF3, 0xE7, 0xCF, 0x9F, 0x3F, 0x7F, 0xFE, 0xFC, 0xF1, 0xE3, 0x8F, 0x1F, 0xFE, 0xF8, 0x00,
    0x00, 0x07, 0x3C, 0xE0, 0x81, 0x03, 0x07, 0xC7, 0xE7, 0xC7, 0xCF, 0x1F, 0x7F, 0xFE, 0xFC, 0xF8,
    0xE1, 0x07, 0x3F, 0xFF, 0xFF, 0xFE, 0xF0, 0x01, 0x0F, 0xFF, 0xFF, 0xFF, 0x3C, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x06, 0x0D, 0x19, 0x11, 0x30, 0x20, 0x24, 0x4F, 0x4F, 0x4F,
    0x4F, 0x40, 0x40, 0x4F, 0x4F, 0x6F, 0x27, 0x20, 0x10, 0x10, 0x08, 0x0C, 0x04, 0x00, 0x00, 0x00,
];

fn main() -> ! {
    // The framebuffer lives on the heap; 4 KiB is plenty for a 128x64 display.
    let heap_start = cortex_m_rt::heap_start() as usize;
    unsafe { ALLOCATOR.init(heap_start, 4096) }

    // Get peripherals and set up RCC.
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    // Set up I2C1, which is Alternate Function 4 for GPIOs PB6,7.
    let mut gpiob = dp.GPIOB.split(&mut rcc.ahb);
    let scl = gpiob.pb6.into_af4(&mut gpiob.moder, &mut gpiob.afrl);
    let sda = gpiob.pb7.into_af4(&mut gpiob.moder, &mut gpiob.afrl);
    let i2c = I2c::i2c1(dp.I2C1, (scl, sda), 400.khz(), clocks, &mut rcc.apb1);

    // Register the display and run its power-up sequence.
    let mut disp = oled::Display::i2c(
        i2c,
        oled::Config::new(128, 64, oled::Orientation::TopToBottom)
            .address(0x3C)
            .clock_speed(400_000),
    ).unwrap();

    // Logo in the middle of the screen.
    let logo = oled::Bitmap::new(&LOGO, 32, 32).unwrap();
    disp.draw_bitmap(48, 16, &logo, false).unwrap();
    disp.sync_all().unwrap();
    delay.delay_ms(3000_u16);

    // A page of text. Rows 10 and up are not 8-aligned, so each line straddles two pages.
    disp.clear();
    disp.draw_text(12, 0, "Hello, World!", false).unwrap();
    disp.fill_region(0, 127, 8, 8, true).unwrap();
    disp.draw_text(0, 10, "ABCDEFGHIJKLMNOP", false).unwrap();
    disp.draw_text(0, 18, "QRSTUVWXYZabcdef", false).unwrap();
    disp.draw_text(0, 26, "ghijklmnopqrstuv", false).unwrap();
    disp.draw_text(0, 34, "wxyz1234567890!(", false).unwrap();
    disp.draw_text(0, 42, ")-=+[]{};:'\",.<>", false).unwrap();
    disp.draw_text(0, 50, "?/\\|_`~@#$%^&*", false).unwrap();
    disp.fill_region(0, 127, 58, 63, true).unwrap();
    disp.sync_all().unwrap();
    delay.delay_ms(3000_u16);

    // Numbers and an inverted logo at a non-aligned row.
    disp.clear();
    let x = 1234567890;
    disp.draw_int(24, 0, x, false).unwrap();
    disp.draw_float(20, 8, x as f32 / 100000.0, 5, false).unwrap();
    disp.draw_bitmap(48, 20, &logo, true).unwrap();
    disp.fill_region(0, 127, 58, 63, true).unwrap();
    disp.sync_all().unwrap();

    loop {
        asm::wfi();
    }
}
