//! celltft Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the display and knob logic is
//! written against. Chip-specific HALs implement them on top of their SPI,
//! DMA and GPIO peripherals; host tests implement them with simulations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  celltft-display (console, knob)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  celltft-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chip HAL (SPI + DMA controller, PIO)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::InterruptInput`] - Pull-up, edge-interrupt, debounced inputs
//! - [`spi::SpiBus`] - Synchronous SPI byte transfer
//! - [`spi::SpiDma`] - One-shot memory-to-SPI DMA writes

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{InputConfig, InputPin, InterruptInput, OutputPin, Pull, Trigger};
pub use spi::{SpiBus, SpiDma, WriteDone};
