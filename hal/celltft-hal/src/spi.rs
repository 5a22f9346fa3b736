//! SPI bus abstractions
//!
//! Provides traits for SPI master operations that can be implemented
//! by chip-specific HALs: synchronous byte transfer for commands and a
//! single-channel DMA write for streaming pixel data.

/// SPI bus master
///
/// Synchronous transfers spin on the peripheral's status flags.
pub trait SpiBus {
    /// Transfer one byte (simultaneous write/read)
    ///
    /// Waits for the transmit register to be free, writes `byte`, then waits
    /// for the received byte and returns it.
    fn transfer(&mut self, byte: u8) -> u8;

    /// Write data without keeping the received bytes
    fn write(&mut self, data: &[u8]) {
        for &b in data {
            self.transfer(b);
        }
    }
}

/// Result of a completed DMA write
#[derive(Debug)]
pub struct WriteDone {
    /// Last byte left in the receive register after the transmitter drained
    pub rx: u8,
    /// Buffer of the finished transfer, or `None` if nothing was in flight
    pub buffer: Option<&'static mut [u8]>,
}

/// SPI bus with a one-shot memory-to-peripheral DMA channel
///
/// At most one transfer is in flight. The buffer is moved into the transfer
/// on [`start_write`](Self::start_write) and returned by
/// [`wait_write_done`](Self::wait_write_done), so the CPU cannot touch it
/// while the DMA engine is reading it.
pub trait SpiDma: SpiBus {
    /// Start streaming `buf[..len]` to the SPI transmit register
    ///
    /// Must only be called when no transfer is in flight.
    fn start_write(&mut self, buf: &'static mut [u8], len: usize);

    /// Block until the in-flight transfer has completed
    ///
    /// Spins on the DMA channel enable flag, then on the SPI transmitter
    /// empty flag. There is no timeout: a stalled bus never returns.
    /// Returns immediately with `buffer: None` if nothing is in flight.
    fn wait_write_done(&mut self) -> WriteDone;

    /// Check whether a transfer is currently in flight
    fn is_busy(&self) -> bool;
}
