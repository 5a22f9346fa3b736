//! Character-cell console and knob input for celltft instruments
//!
//! This crate provides:
//! - [`CellBuffer`] - a W×H grid of (character, attribute) cells with text,
//!   number, bar and frame widgets, tracking the dirty rectangle of every
//!   mutation
//! - [`Console`] - streams the dirty rectangle to the panel as
//!   RGB565 scanlines, assembling one scanline while the previous one is
//!   still going out over SPI DMA
//! - [`St7735`] - the panel addressing driver ([`PanelWindow`])
//! - [`knob`] - interrupt-driven quadrature and push-button decoding with a
//!   polling query
//!
//! # Architecture
//!
//! ```text
//!  application ──mutates──▶ CellBuffer ──dirty rect──▶ Renderer
//!                                                        │ set_window
//!                                                        ▼
//!                                             PanelWindow (St7735)
//!                                                        │ start_write / wait
//!                                                        ▼
//!                                                  SpiDma (chip HAL)
//!
//!  pin edge IRQ ──▶ KnobIrq::on_edge ──atomics──▶ KnobState::query ◀── application
//! ```
//!
//! Everything except [`KnobIrq::on_edge`] runs in the main context and is
//! not reentrant.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod cell;
pub mod color;
pub mod dirty;
pub mod font;
pub mod knob;
pub mod panel;
pub mod render;
pub mod st7735;

#[cfg(test)]
mod testing;

// Re-export key types
pub use buffer::{CellBuffer, SCREEN_COLS, SCREEN_ROWS};
pub use cell::{Attr, Cell};
pub use color::{Palette, Rgb565};
pub use dirty::{Coord, DirtyRect, Rect};
pub use font::{Font, Font6x8};
pub use knob::{KnobConfig, KnobIrq, KnobReport, KnobState, Pending};
pub use panel::{DisplayError, PanelWindow, PANEL_HEIGHT, PANEL_WIDTH};
pub use render::{Console, SCANLINE_BYTES};
pub use st7735::St7735;
