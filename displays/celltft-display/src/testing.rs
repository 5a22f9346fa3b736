//! Simulated panel bus and pins for unit tests

use std::cell::RefCell;
use std::rc::Rc;

use celltft_hal::{InputConfig, InputPin, InterruptInput, OutputPin, SpiBus, SpiDma, WriteDone};
use embedded_hal::delay::DelayNs;

use crate::st7735::St7735;

/// One observable event on the panel bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    /// Byte sent with DC low
    Command(u8),
    /// Byte sent with DC high
    Data(u8),
    /// DMA transfer started from the buffer at `addr`
    Dma { addr: usize, bytes: Vec<u8> },
    /// DMA transfer waited for
    DmaDone,
}

#[derive(Default)]
struct BusState {
    ops: Vec<BusOp>,
    selected: bool,
    data_mode: bool,
    in_flight: Option<(usize, Vec<u8>)>,
}

/// Shared log of everything the bus and control pins saw
#[derive(Clone, Default)]
pub struct Trace(Rc<RefCell<BusState>>);

impl Trace {
    /// Drain the recorded operations
    pub fn take(&self) -> Vec<BusOp> {
        core::mem::take(&mut self.0.borrow_mut().ops)
    }

    /// CS currently asserted
    pub fn selected(&self) -> bool {
        self.0.borrow().selected
    }

    /// DC currently high
    pub fn data_mode(&self) -> bool {
        self.0.borrow().data_mode
    }
}

/// Buffer addresses and payloads of the DMA transfers in `ops`
pub fn dma_writes(ops: &[BusOp]) -> Vec<(usize, &[u8])> {
    ops.iter()
        .filter_map(|op| match op {
            BusOp::Dma { addr, bytes } => Some((*addr, bytes.as_slice())),
            _ => None,
        })
        .collect()
}

/// SPI bus that records traffic and checks the DMA ownership rules
pub struct SimBus {
    trace: Trace,
    pending: Option<&'static mut [u8]>,
    lossy: bool,
}

impl SimBus {
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            pending: None,
            lossy: false,
        }
    }

    /// Complete later transfers without handing their buffers back
    pub fn lose_buffers(&mut self) {
        self.lossy = true;
    }
}

impl SpiBus for SimBus {
    fn transfer(&mut self, byte: u8) -> u8 {
        assert!(self.pending.is_none(), "byte transfer during DMA");
        let mut state = self.trace.0.borrow_mut();
        assert!(state.selected, "transfer with panel deselected");
        let op = if state.data_mode {
            BusOp::Data(byte)
        } else {
            BusOp::Command(byte)
        };
        state.ops.push(op);
        0xFF
    }
}

impl SpiDma for SimBus {
    fn start_write(&mut self, buf: &'static mut [u8], len: usize) {
        assert!(self.pending.is_none(), "second DMA transfer started");
        let mut state = self.trace.0.borrow_mut();
        assert!(state.selected && state.data_mode, "DMA outside pixel write");

        let addr = buf.as_ptr() as usize;
        let bytes = buf[..len].to_vec();
        state.in_flight = Some((addr, bytes.clone()));
        state.ops.push(BusOp::Dma { addr, bytes });
        drop(state);
        self.pending = Some(buf);
    }

    fn wait_write_done(&mut self) -> WriteDone {
        let buffer = self.pending.take();
        if let Some(buf) = buffer.as_deref() {
            let mut state = self.trace.0.borrow_mut();
            let (addr, bytes) = state.in_flight.take().unwrap();
            assert_eq!(addr, buf.as_ptr() as usize);
            assert_eq!(&buf[..bytes.len()], bytes.as_slice(), "buffer changed in flight");
            state.ops.push(BusOp::DmaDone);
        }
        WriteDone {
            rx: 0xFF,
            buffer: if self.lossy { None } else { buffer },
        }
    }

    fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Clone, Copy)]
enum Line {
    ChipSelect,
    DataCommand,
}

/// Panel control pin feeding the trace
pub struct SimPin {
    line: Line,
    trace: Trace,
}

impl OutputPin for SimPin {
    fn set_high(&mut self) {
        let mut state = self.trace.0.borrow_mut();
        match self.line {
            Line::ChipSelect => {
                assert!(state.in_flight.is_none(), "deselected during DMA");
                state.selected = false;
            }
            Line::DataCommand => state.data_mode = true,
        }
    }

    fn set_low(&mut self) {
        let mut state = self.trace.0.borrow_mut();
        match self.line {
            Line::ChipSelect => state.selected = true,
            Line::DataCommand => state.data_mode = false,
        }
    }
}

pub type SimPanel = St7735<SimBus, SimPin, SimPin>;

/// A deselected panel on a fresh simulated bus
pub fn sim_panel() -> (SimPanel, Trace) {
    let trace = Trace::default();
    let cs = SimPin {
        line: Line::ChipSelect,
        trace: trace.clone(),
    };
    let dc = SimPin {
        line: Line::DataCommand,
        trace: trace.clone(),
    };
    (St7735::new(SimBus::new(trace.clone()), cs, dc), trace)
}

/// Delay that only adds up what it was asked for
#[derive(Default)]
pub struct MockDelay {
    pub total_ms: u32,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += ns / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
    }
}

#[derive(Default)]
struct InputState {
    high: bool,
    config: Option<InputConfig>,
}

/// Interrupt input whose level the test drives
///
/// Clones share the same line.
#[derive(Clone, Default)]
pub struct SimInput(Rc<RefCell<InputState>>);

impl SimInput {
    pub fn new(high: bool) -> Self {
        let pin = Self::default();
        pin.set(high);
        pin
    }

    pub fn set(&self, high: bool) {
        self.0.borrow_mut().high = high;
    }

    /// Last configuration applied to the pin
    pub fn config(&self) -> Option<InputConfig> {
        self.0.borrow().config
    }
}

impl InputPin for SimInput {
    fn is_high(&self) -> bool {
        self.0.borrow().high
    }
}

impl InterruptInput for SimInput {
    fn configure(&mut self, config: InputConfig) {
        self.0.borrow_mut().config = Some(config);
    }
}
