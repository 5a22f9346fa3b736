//! Rotary knob decoder
//!
//! Phase A, phase B and the push button each raise an interrupt on every
//! edge. The interrupt side ([`KnobIrq`]) turns edges into pending bits and
//! relative motion in a shared [`KnobState`], and the main loop drains them
//! with [`KnobState::query`].
//!
//! Quadrature (levels `AB`, idle `11`):
//! ```text
//! right (+1): 11 -> 10 -> 00 -> 01 -> 11   B rises while A is low
//! left  (-1): 11 -> 01 -> 00 -> 10 -> 11   A rises while B is low
//! ```
//!
//! A direction's pending bit stays latched until the next query while the
//! accumulator keeps counting, so a slow poller still sees the net motion.

use core::ops::BitOr;

use celltft_hal::{InputConfig, InterruptInput, Pull, Trigger};
use portable_atomic::{AtomicI32, AtomicU8, Ordering};

/// Set of knob events waiting for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pending(u8);

impl Pending {
    pub const NONE: Self = Self(0);
    /// Turned counter-clockwise
    pub const LEFT: Self = Self(0b001);
    /// Turned clockwise
    pub const RIGHT: Self = Self(0b010);
    /// Button went down
    pub const PUSH: Self = Self(0b100);

    const ALL: u8 = 0b111;

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check whether every event in `other` is pending
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether any event in `other` is pending
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Pending {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Knob input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KnobConfig {
    /// Debounce filter divider applied to all three inputs
    pub debounce_divider: u16,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            debounce_divider: 20, // 32 kHz slow clock / 20 ≈ 1.6 kHz
        }
    }
}

impl KnobConfig {
    /// Pin configuration: pulled up, interrupt on both edges
    pub fn input_config(&self) -> InputConfig {
        InputConfig {
            pull: Pull::Up,
            trigger: Trigger::AnyEdge,
            debounce_divider: self.debounce_divider,
        }
    }
}

/// Result of one [`KnobState::query`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KnobReport {
    /// Events drained by this query
    pub pending: Pending,
    /// `Some(true)` if the button went down since the last query
    pub pressed: Option<bool>,
    /// Net detents since the last query, if the knob was turned
    pub relative: Option<i32>,
}

impl KnobReport {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Knob events shared between the edge interrupt and the main loop
///
/// Usually a `static`; the interrupt side holds it through [`KnobIrq`].
#[derive(Debug, Default)]
pub struct KnobState {
    pending: AtomicU8,
    relative: AtomicI32,
}

impl KnobState {
    pub const fn new() -> Self {
        Self {
            pending: AtomicU8::new(0),
            relative: AtomicI32::new(0),
        }
    }

    /// Drain pending events
    ///
    /// Each detent and each button press is reported once. An edge that
    /// arrives while draining is held off by the critical section and shows
    /// up in the next query.
    pub fn query(&self) -> KnobReport {
        if self.pending.load(Ordering::Acquire) == 0 {
            return KnobReport::default();
        }

        let (pending, relative) = critical_section::with(|_| {
            let pending = Pending::from_bits(self.pending.load(Ordering::Acquire));
            let relative = self.relative.load(Ordering::Relaxed);
            self.pending.store(0, Ordering::Relaxed);
            self.relative.store(0, Ordering::Release);
            (pending, relative)
        });

        KnobReport {
            pending,
            pressed: pending.contains(Pending::PUSH).then_some(true),
            relative: pending
                .intersects(Pending::LEFT | Pending::RIGHT)
                .then_some(relative),
        }
    }

    /// Drop everything pending
    pub fn clear(&self) {
        critical_section::with(|_| {
            self.pending.store(0, Ordering::Relaxed);
            self.relative.store(0, Ordering::Release);
        });
    }

    /// Count one detent and latch `dir`
    fn step(&self, dir: Pending, delta: i32) {
        self.relative.fetch_add(delta, Ordering::Relaxed);
        self.pending.fetch_or(dir.bits(), Ordering::Release);
    }

    fn raise(&self, event: Pending) {
        self.pending.fetch_or(event.bits(), Ordering::Release);
    }
}

/// Interrupt side of the knob: the three pins and their last levels
pub struct KnobIrq<'a, A, B, P> {
    a: A,
    b: B,
    push: P,
    state: &'a KnobState,
    a_high: bool,
    b_high: bool,
    down: bool,
}

impl<'a, A, B, P> KnobIrq<'a, A, B, P>
where
    A: InterruptInput,
    B: InterruptInput,
    P: InterruptInput,
{
    /// Take over the pins, sampling their current levels
    pub fn new(a: A, b: B, push: P, state: &'a KnobState) -> Self {
        let mut irq = Self {
            a,
            b,
            push,
            state,
            a_high: false,
            b_high: false,
            down: false,
        };
        irq.sample();
        irq
    }

    /// Configure pull-ups, edge interrupts and debouncing on all three pins
    ///
    /// Resamples the levels and drops anything pending.
    pub fn configure(&mut self, config: &KnobConfig) {
        let input = config.input_config();
        self.a.configure(input);
        self.b.configure(input);
        self.push.configure(input);
        self.sample();
        self.state.clear();

        #[cfg(feature = "defmt")]
        defmt::debug!("knob configured, debounce /{}", config.debounce_divider);
    }

    /// Edge interrupt handler, shared by all three pins
    pub fn on_edge(&mut self) {
        let a = self.a.is_high();
        if a != self.a_high {
            self.a_high = a;
            if a && !self.b_high {
                self.state.step(Pending::LEFT, -1);
            }
        }

        let b = self.b.is_high();
        if b != self.b_high {
            self.b_high = b;
            if b && !self.a_high {
                self.state.step(Pending::RIGHT, 1);
            }
        }

        // Active low
        let down = self.push.is_low();
        if down != self.down {
            self.down = down;
            if down {
                self.state.raise(Pending::PUSH);
            }
        }
    }

    /// Button level as of the last edge
    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Give the pins back
    pub fn release(self) -> (A, B, P) {
        (self.a, self.b, self.push)
    }

    fn sample(&mut self) {
        self.a_high = self.a.is_high();
        self.b_high = self.b.is_high();
        self.down = self.push.is_low();
    }
}
