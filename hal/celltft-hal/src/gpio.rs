//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Digital output pin
///
/// Used for the panel's chip-select and command/data lines.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Input pull resistor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input
    None,
    /// Pull-up enabled
    Up,
    /// Pull-down enabled
    Down,
}

/// Edge that raises the pin's interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// Low to high transitions only
    RisingEdge,
    /// High to low transitions only
    FallingEdge,
    /// Any level change
    AnyEdge,
}

/// Configuration of an interrupt-capable input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Pull resistor
    pub pull: Pull,
    /// Interrupt trigger
    pub trigger: Trigger,
    /// Slow-clock divider of the input glitch/debounce filter.
    ///
    /// `0` disables the filter.
    pub debounce_divider: u16,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pull: Pull::Up,
            trigger: Trigger::AnyEdge,
            debounce_divider: 0,
        }
    }
}

/// Input pin wired to an interrupt source
///
/// The HAL owns the interrupt vector; after [`configure`](Self::configure)
/// every matching edge invokes whatever handler the firmware registered for
/// this pin.
pub trait InterruptInput: InputPin {
    /// Apply pull, trigger and debounce settings and unmask the interrupt
    fn configure(&mut self, config: InputConfig);
}
