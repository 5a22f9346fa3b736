//! Panel addressing trait
//!
//! Defines the interface the renderer streams pixels through.

use celltft_hal::SpiDma;

/// Panel width in pixels (landscape)
pub const PANEL_WIDTH: usize = 160;

/// Panel height in pixels (landscape)
pub const PANEL_HEIGHT: usize = 128;

/// Display setup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Cell grid does not fit on the panel with the chosen font
    InvalidDimensions,
    /// Scanline buffer too small for a full-width row of the cell grid
    BufferTooSmall,
}

/// Pixel window addressing on an SPI panel controller
///
/// Used by the renderer and by the primitive fill routines alike.
pub trait PanelWindow {
    /// Bus the pixel data is streamed over
    type Bus: SpiDma;

    /// Panel size in pixels as (width, height)
    fn size(&self) -> (u16, u16);

    /// Address the inclusive pixel window `(x0, y0)..=(x1, y1)`
    ///
    /// Issues the column and row address commands followed by the memory
    /// write command, leaving the bus selected and in data mode so pixel
    /// bytes can be streamed.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16);

    /// Leave data-streaming mode (deselect the panel)
    ///
    /// Any DMA transfer must have completed before this is called.
    fn end_write(&mut self);

    /// Access the bus while streaming
    fn bus(&mut self) -> &mut Self::Bus;
}
