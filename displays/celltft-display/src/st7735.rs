//! ST7735 TFT Panel Driver
//!
//! Driver for 160x128 ST7735 (red tab) panels over SPI, in landscape with
//! the connector on the left. Commands and data share the bus; the DC pin
//! selects between them.

use celltft_hal::{OutputPin, SpiBus, SpiDma};
use embedded_hal::delay::DelayNs;

use crate::color::Rgb565;
use crate::font::Font;
use crate::panel::{PanelWindow, PANEL_HEIGHT, PANEL_WIDTH};

/// ST7735 commands
#[allow(dead_code)]
mod cmd {
    pub const NOP: u8 = 0x00;
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const TEON: u8 = 0x35;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    pub const FRMCTR1: u8 = 0xB1;
    pub const FRMCTR2: u8 = 0xB2;
    pub const FRMCTR3: u8 = 0xB3;
    pub const INVCTR: u8 = 0xB4;
    pub const PWCTR1: u8 = 0xC0;
    pub const PWCTR2: u8 = 0xC1;
    pub const PWCTR3: u8 = 0xC2;
    pub const PWCTR4: u8 = 0xC3;
    pub const PWCTR5: u8 = 0xC4;
    pub const VMCTR1: u8 = 0xC5;
    pub const GMCTRP1: u8 = 0xE0;
    pub const GMCTRN1: u8 = 0xE1;
}

/// MADCTL bits
#[allow(dead_code)]
mod madctl {
    pub const MY: u8 = 0x80;
    pub const MX: u8 = 0x40;
    pub const MV: u8 = 0x20;
    pub const ML: u8 = 0x10;
    pub const RGB: u8 = 0x00;
    pub const BGR: u8 = 0x08;
}

/// One step of the power-on sequence
struct InitStep {
    cmd: u8,
    args: &'static [u8],
    delay_ms: u16,
}

const fn step(cmd: u8, args: &'static [u8], delay_ms: u16) -> InitStep {
    InitStep {
        cmd,
        args,
        delay_ms,
    }
}

/// Red tab power-on sequence
#[rustfmt::skip]
const INIT_SEQUENCE: [InitStep; 22] = [
    step(cmd::SWRESET, &[], 150),
    step(cmd::SLPOUT, &[], 500),
    step(cmd::FRMCTR1, &[0x01, 0x2C, 0x2D], 0),
    step(cmd::FRMCTR2, &[0x01, 0x2C, 0x2D], 0),
    step(cmd::FRMCTR3, &[0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D], 0),
    step(cmd::INVCTR, &[0x07], 0),
    step(cmd::PWCTR1, &[0xA2, 0x02, 0x84], 0),
    step(cmd::PWCTR2, &[0xC5], 0),
    step(cmd::PWCTR3, &[0x0A, 0x00], 0),
    step(cmd::PWCTR4, &[0x8A, 0x2A], 0),
    step(cmd::PWCTR5, &[0x8A, 0xEE], 0),
    step(cmd::VMCTR1, &[0x0E], 0),
    step(cmd::INVOFF, &[], 0),
    step(cmd::MADCTL, &[madctl::MY | madctl::MV | madctl::RGB], 0),
    step(cmd::COLMOD, &[0x05], 0), // 16-bit color
    step(cmd::CASET, &[0x00, 0x00, 0x00, 0x7F], 0),
    step(cmd::RASET, &[0x00, 0x00, 0x00, 0x9F], 0),
    step(cmd::GMCTRP1, &[
        0x02, 0x1C, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D,
        0x29, 0x25, 0x2B, 0x39, 0x00, 0x01, 0x03, 0x10,
    ], 0),
    step(cmd::GMCTRN1, &[
        0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D,
        0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00, 0x02, 0x10,
    ], 0),
    step(cmd::NORON, &[], 10),
    step(cmd::DISPON, &[], 100),
    step(cmd::TEON, &[0x00], 0),
];

/// ST7735 panel driver
pub struct St7735<SPI, CS, DC> {
    spi: SPI,
    cs: CS,
    dc: DC,
}

impl<SPI, CS, DC> St7735<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Create a new driver; the panel starts deselected
    pub fn new(spi: SPI, mut cs: CS, dc: DC) -> Self {
        cs.set_high();
        Self { spi, cs, dc }
    }

    /// Run the power-on sequence and clear the screen to black
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        for step in INIT_SEQUENCE.iter() {
            self.command(step.cmd);
            if !step.args.is_empty() {
                self.data(step.args);
            }
            if step.delay_ms > 0 {
                delay.delay_ms(step.delay_ms as u32);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ST7735 initialized");

        self.fill_screen(Rgb565::BLACK);
    }

    /// Fill a rectangle in a solid color, clipped to the panel
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) {
        let x1 = x.saturating_add(w).min(PANEL_WIDTH as u16);
        let y1 = y.saturating_add(h).min(PANEL_HEIGHT as u16);
        if x >= x1 || y >= y1 {
            return;
        }

        self.address(x, y, x1 - 1, y1 - 1);
        let [hi, lo] = color.to_be_bytes();
        for _ in 0..(x1 - x) as u32 * (y1 - y) as u32 {
            self.spi.transfer(hi);
            self.spi.transfer(lo);
        }
        self.cs.set_high();
    }

    /// Fill the entire screen in a solid color
    pub fn fill_screen(&mut self, color: Rgb565) {
        self.fill_rect(0, 0, PANEL_WIDTH as u16, PANEL_HEIGHT as u16, color);
    }

    /// Draw a single pixel
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Rgb565) {
        self.fill_rect(x, y, 1, 1, color);
    }

    /// Draw a horizontal line
    pub fn draw_hline(&mut self, x: u16, y: u16, w: u16, color: Rgb565) {
        self.fill_rect(x, y, w, 1, color);
    }

    /// Draw a vertical line
    pub fn draw_vline(&mut self, x: u16, y: u16, h: u16, color: Rgb565) {
        self.fill_rect(x, y, 1, h, color);
    }

    /// Outline a rectangle
    pub fn draw_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) {
        if w == 0 || h == 0 {
            return;
        }
        self.draw_hline(x, y, w, color);
        self.draw_hline(x, y + h - 1, w, color);
        self.draw_vline(x, y, h, color);
        self.draw_vline(x + w - 1, y, h, color);
    }

    /// Draw one glyph cell with its top-left corner at `(x, y)`
    ///
    /// Lit pixels get `fg`, the rest of the cell `bg`. Clipped to the panel.
    pub fn draw_char<F: Font>(&mut self, font: &F, x: u16, y: u16, ch: u8, fg: Rgb565, bg: Rgb565) {
        let x1 = x.saturating_add(F::WIDTH as u16).min(PANEL_WIDTH as u16);
        let y1 = y.saturating_add(F::HEIGHT as u16).min(PANEL_HEIGHT as u16);
        if x >= x1 || y >= y1 {
            return;
        }

        self.address(x, y, x1 - 1, y1 - 1);
        let fg = fg.to_be_bytes();
        let bg = bg.to_be_bytes();
        for row in 0..(y1 - y) as usize {
            let bits = font.glyph_row(ch, row);
            for col in 0..(x1 - x) as usize {
                let [hi, lo] = if (bits >> col) & 1 != 0 { fg } else { bg };
                self.spi.transfer(hi);
                self.spi.transfer(lo);
            }
        }
        self.cs.set_high();
    }

    /// Draw text left to right from `(x, y)`, stopping at NUL or the right edge
    pub fn draw_string<F: Font>(
        &mut self,
        font: &F,
        x: u16,
        y: u16,
        s: impl AsRef<[u8]>,
        fg: Rgb565,
        bg: Rgb565,
    ) {
        let mut x = x;
        for &ch in s.as_ref().iter().take_while(|&&c| c != 0) {
            if x >= PANEL_WIDTH as u16 {
                break;
            }
            self.draw_char(font, x, y, ch, fg, bg);
            x = x.saturating_add(F::WIDTH as u16);
        }
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, CS, DC) {
        (self.spi, self.cs, self.dc)
    }

    /// Send a command byte
    fn command(&mut self, c: u8) {
        self.dc.set_low();
        self.cs.set_low();
        self.spi.transfer(c);
        self.cs.set_high();
    }

    /// Send argument bytes
    fn data(&mut self, bytes: &[u8]) {
        self.dc.set_high();
        self.cs.set_low();
        self.spi.write(bytes);
        self.cs.set_high();
    }

    /// Set the address window and enter memory write, leaving CS asserted
    fn address(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();

        self.command(cmd::CASET);
        self.data(&[x0h, x0l, x1h, x1l]);
        self.command(cmd::RASET);
        self.data(&[y0h, y0l, y1h, y1l]);
        self.command(cmd::RAMWR);

        self.dc.set_high();
        self.cs.set_low();
    }
}

impl<SPI, CS, DC> PanelWindow for St7735<SPI, CS, DC>
where
    SPI: SpiDma,
    CS: OutputPin,
    DC: OutputPin,
{
    type Bus = SPI;

    fn size(&self) -> (u16, u16) {
        (PANEL_WIDTH as u16, PANEL_HEIGHT as u16)
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) {
        self.address(x0, y0, x1, y1);
    }

    fn end_write(&mut self) {
        self.cs.set_high();
    }

    fn bus(&mut self) -> &mut SPI {
        &mut self.spi
    }
}
