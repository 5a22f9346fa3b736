//! Dirty-rectangle scanline renderer
//!
//! Converts the dirty part of a [`CellBuffer`] into RGB565 scanlines and
//! streams them to the panel. Two scanline buffers alternate: while one is
//! being sent by DMA the CPU assembles the next into the other.
//!
//! ```text
//!  assemble[0] │ start[0] │ assemble[1] │ wait │ start[1] │ assemble[0] │ wait │ ...
//!              └──────── DMA[0] ───────────────┘└──────── DMA[1] ─────────────┘
//! ```

use celltft_hal::SpiDma;

use crate::buffer::{CellBuffer, SCREEN_COLS, SCREEN_ROWS};
use crate::cell::Cell;
use crate::color::Palette;
use crate::font::{Font, Font6x8};
use crate::panel::{DisplayError, PanelWindow, PANEL_WIDTH};

/// Bytes in one full-width RGB565 panel scanline
pub const SCANLINE_BYTES: usize = PANEL_WIDTH * 2;

/// Scanline slot, empty while its buffer is owned by a DMA transfer
type Slot = Option<&'static mut [u8]>;

/// Ping-pong scanline renderer
///
/// Only reachable through [`Console`], which checks the grid against the
/// panel and the buffers once at construction.
pub(crate) struct Renderer<F: Font = Font6x8> {
    font: F,
    palette: Palette,
    scanlines: [Slot; 2],
    capacity: usize,
}

impl<F: Font> Renderer<F> {
    /// Create a renderer over the ping (index 0) and pong (index 1) buffers
    pub(crate) fn new(font: F, palette: Palette, ping: &'static mut [u8], pong: &'static mut [u8]) -> Self {
        let capacity = ping.len().min(pong.len());
        Self {
            font,
            palette,
            scanlines: [Some(ping), Some(pong)],
            capacity,
        }
    }

    /// Check that a `W`×`H` grid fits the panel and the scanline buffers
    pub(crate) fn check_grid<P: PanelWindow, const W: usize, const H: usize>(
        &self,
        panel: &P,
    ) -> Result<(), DisplayError> {
        let (width, height) = panel.size();
        if W == 0 || H == 0 || W * F::WIDTH > width as usize || H * F::HEIGHT > height as usize {
            return Err(DisplayError::InvalidDimensions);
        }
        if W * F::WIDTH * 2 > self.capacity {
            return Err(DisplayError::BufferTooSmall);
        }
        Ok(())
    }

    /// Send the dirty rectangle of `cells` to the panel and mark it clean
    ///
    /// Does nothing when nothing is dirty. Blocks until the last scanline
    /// has left the bus. The grid must have passed
    /// [`check_grid`](Self::check_grid).
    pub(crate) fn render<P, const W: usize, const H: usize>(
        &mut self,
        panel: &mut P,
        cells: &mut CellBuffer<W, H>,
    ) where
        P: PanelWindow,
    {
        let Some(r) = cells.dirty().bounds() else {
            return;
        };
        let (x0, x1) = (r.x0 as usize, r.x1 as usize);
        let (y0, y1) = (r.y0 as usize, r.y1 as usize);
        let len = (x1 - x0) * F::WIDTH * 2;
        debug_assert!(len <= self.capacity);

        #[cfg(feature = "defmt")]
        defmt::trace!("render {}", r);

        panel.set_window(
            (x0 * F::WIDTH) as u16,
            (y0 * F::HEIGHT) as u16,
            (x1 * F::WIDTH - 1) as u16,
            (y1 * F::HEIGHT - 1) as u16,
        );

        let mut parity = 0;
        let mut in_flight = None;

        for y in y0..y1 {
            let Some(row) = cells.row(y) else {
                break;
            };
            let row = &row[x0..x1];
            for line in 0..F::HEIGHT {
                let Some(buf) = self.scanlines[parity].take() else {
                    unreachable!("scanline buffer {} still in flight", parity);
                };

                self.assemble(row, line, &mut buf[..len]);
                Self::retire(panel.bus(), &mut self.scanlines, &mut in_flight);
                panel.bus().start_write(buf, len);
                in_flight = Some(parity);
                parity ^= 1;
            }
        }

        Self::retire(panel.bus(), &mut self.scanlines, &mut in_flight);
        panel.end_write();
        cells.mark_clean();

        #[cfg(feature = "defmt")]
        defmt::trace!("render done");
    }

    /// Expand glyph row `line` of `cells` into RGB565 pixels
    fn assemble(&self, cells: &[Cell], line: usize, out: &mut [u8]) {
        for (cell, pixels) in cells.iter().zip(out.chunks_exact_mut(F::WIDTH * 2)) {
            let bits = self.font.glyph_row(cell.ch, line);
            let fg = self.palette.fg(cell.attr.fg()).to_be_bytes();
            let bg = self.palette.bg(cell.attr.bg()).to_be_bytes();
            for (x, pixel) in pixels.chunks_exact_mut(2).enumerate() {
                let color = if (bits >> x) & 1 != 0 { &fg } else { &bg };
                pixel.copy_from_slice(color);
            }
        }
    }

    /// Wait for the transfer in flight and put its buffer back in its slot
    ///
    /// A transport that finishes a transfer without handing its buffer back
    /// is broken beyond recovery, like a stalled bus.
    fn retire<B: SpiDma>(bus: &mut B, scanlines: &mut [Slot; 2], in_flight: &mut Option<usize>) {
        let done = bus.wait_write_done();
        if let Some(index) = in_flight.take() {
            match done.buffer {
                Some(buf) => scanlines[index] = Some(buf),
                None => panic!("transport lost scanline buffer {}", index),
            }
        }
    }
}

/// Cell buffer, renderer and panel bundled as one text console
pub struct Console<P, const W: usize = SCREEN_COLS, const H: usize = SCREEN_ROWS> {
    panel: P,
    cells: CellBuffer<W, H>,
    renderer: Renderer,
}

impl<P: PanelWindow, const W: usize, const H: usize> Console<P, W, H> {
    /// Create a console on an initialized panel
    ///
    /// Each scanline buffer must hold at least `W * 6 * 2` bytes
    /// ([`SCANLINE_BYTES`] always suffices for a grid that fits the panel).
    pub fn new(
        panel: P,
        ping: &'static mut [u8],
        pong: &'static mut [u8],
        palette: Palette,
    ) -> Result<Self, DisplayError> {
        let renderer = Renderer::new(Font6x8, palette, ping, pong);
        renderer.check_grid::<P, W, H>(&panel)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("console {}x{} cells", W, H);

        Ok(Self {
            panel,
            cells: CellBuffer::new(),
            renderer,
        })
    }

    /// Cell contents
    pub fn cells(&self) -> &CellBuffer<W, H> {
        &self.cells
    }

    /// Cell contents for drawing
    pub fn cells_mut(&mut self) -> &mut CellBuffer<W, H> {
        &mut self.cells
    }

    /// Push pending changes to the panel
    pub fn render(&mut self) {
        self.renderer.render(&mut self.panel, &mut self.cells);
    }

    /// Direct panel access, e.g. for primitive fills between renders
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Give the panel back
    pub fn release(self) -> P {
        self.panel
    }
}
