//! Shared test infrastructure for bcd-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bcd_clock::segment::DIGIT_PATTERNS;
use bcd_clock::{
    Clock, DisplayPosition, EdgeClearPolicy, InputPort, SegmentDisplay, Sleep, TimeDuration,
    TimerPort,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);
}

// ============================================================================
// Mock Sleep
// ============================================================================

/// Fake clock: records requested waits instead of blocking
pub struct MockSleep {
    slept: Cell<u64>,
    calls: Cell<u32>,
    bounce: RefCell<Option<(PioHandle, u32)>>,
}

impl MockSleep {
    pub fn new() -> Self {
        Self {
            slept: Cell::new(0),
            calls: Cell::new(0),
            bounce: RefCell::new(None),
        }
    }

    /// Latch `bits` into the given PIO on the next sleep, simulating contact bounce
    pub fn bounce_on_next_sleep(&self, pio: PioHandle, bits: u32) {
        *self.bounce.borrow_mut() = Some((pio, bits));
    }

    pub fn total_millis(&self) -> u64 {
        self.slept.get()
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl Sleep<TestDuration> for MockSleep {
    fn sleep(&self, duration: TestDuration) {
        self.slept.set(self.slept.get() + duration.0);
        self.calls.set(self.calls.get() + 1);
        if let Some((pio, bits)) = self.bounce.borrow_mut().take() {
            pio.borrow_mut().latch(bits);
        }
    }
}

// ============================================================================
// Mock Timer
// ============================================================================

#[derive(Debug, Default)]
pub struct MockTimer {
    pub status: u32,
    pub control: u32,
    pub period_low: u16,
    pub period_high: u16,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the counter reaching zero
    pub fn expire(&mut self) {
        self.status |= 1;
    }

    pub fn period(&self) -> u32 {
        (self.period_high as u32) << 16 | self.period_low as u32
    }
}

impl TimerPort for MockTimer {
    fn read_status(&mut self) -> u32 {
        self.status
    }

    fn write_status(&mut self, value: u32) {
        // Any write acknowledges the timeout
        let _ = value;
        self.status = 0;
    }

    fn write_control(&mut self, value: u32) {
        self.control = value;
    }

    fn write_period_low(&mut self, value: u16) {
        self.period_low = value;
    }

    fn write_period_high(&mut self, value: u16) {
        self.period_high = value;
    }
}

// ============================================================================
// Mock PIO
// ============================================================================

/// Register file of a mock parallel input block
#[derive(Debug)]
pub struct PioRegs {
    pub data: u32,
    pub direction: u32,
    pub irq_mask: u32,
    pub edges: u32,
    pub policy: EdgeClearPolicy,
    pub irq_mask_history: heapless::Vec<u32, 32>,
    pub capture_writes: u32,
    /// Reads of `data` left before the input releases (0 = never)
    pub release_after: u32,
    pub data_reads: u32,
}

impl PioRegs {
    /// Latch an edge without changing the level
    pub fn latch(&mut self, bits: u32) {
        self.edges |= bits;
    }

    /// Drive `bits` active and latch the edge
    pub fn press(&mut self, bits: u32) {
        self.data |= bits;
        self.edges |= bits;
    }
}

pub type PioHandle = Rc<RefCell<PioRegs>>;

/// Mock PIO block; clones share one register file
#[derive(Clone)]
pub struct MockPio {
    regs: PioHandle,
}

impl MockPio {
    pub fn new(policy: EdgeClearPolicy) -> Self {
        Self {
            regs: Rc::new(RefCell::new(PioRegs {
                data: 0,
                direction: 0xFFFF_FFFF,
                irq_mask: 0,
                edges: 0,
                policy,
                irq_mask_history: heapless::Vec::new(),
                capture_writes: 0,
                release_after: 0,
                data_reads: 0,
            })),
        }
    }

    pub fn handle(&self) -> PioHandle {
        Rc::clone(&self.regs)
    }
}

impl InputPort for MockPio {
    fn read_data(&mut self) -> u32 {
        let mut regs = self.regs.borrow_mut();
        regs.data_reads += 1;
        let data = regs.data;
        if regs.release_after > 0 {
            regs.release_after -= 1;
            if regs.release_after == 0 {
                regs.data = 0;
            }
        }
        data
    }

    fn write_direction(&mut self, value: u32) {
        self.regs.borrow_mut().direction = value;
    }

    fn write_irq_mask(&mut self, value: u32) {
        let mut regs = self.regs.borrow_mut();
        regs.irq_mask = value;
        let _ = regs.irq_mask_history.push(value);
    }

    fn read_edge_capture(&mut self) -> u32 {
        let mut regs = self.regs.borrow_mut();
        let edges = regs.edges;
        if regs.policy == EdgeClearPolicy::ClearOnRead {
            regs.edges = 0;
        }
        edges
    }

    fn write_edge_capture(&mut self, value: u32) {
        let mut regs = self.regs.borrow_mut();
        regs.capture_writes += 1;
        match regs.policy {
            EdgeClearPolicy::WriteOneToClear => regs.edges &= !value,
            EdgeClearPolicy::WriteAny => regs.edges = 0,
            EdgeClearPolicy::ClearOnRead => {}
        }
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Mock display that records every digit write
pub struct MockDisplay {
    patterns: [u8; 6],
    writes: u32,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            patterns: [0xFF; 6],
            writes: 0,
        }
    }

    /// Number of complete redraws
    pub fn renders(&self) -> u32 {
        self.writes / 6
    }

    pub fn patterns(&self) -> [u8; 6] {
        self.patterns
    }

    /// Decoded digits in render order (seconds ones first); 0xFF if dark
    pub fn digits(&self) -> [u8; 6] {
        self.patterns.map(|pattern| {
            DIGIT_PATTERNS
                .iter()
                .position(|&p| p == pattern)
                .map_or(0xFF, |d| d as u8)
        })
    }

    /// Display read as "HH:MM:SS"
    pub fn text(&self) -> String {
        let d = self.digits();
        format!("{}{}:{}{}:{}{}", d[5], d[4], d[3], d[2], d[1], d[0])
    }
}

impl SegmentDisplay for MockDisplay {
    fn write_digit(&mut self, position: DisplayPosition, pattern: u8) {
        self.patterns[position.index()] = pattern;
        self.writes += 1;
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestClock<'a> = Clock<'a, MockTimer, MockPio, MockDisplay, MockSleep, TestDuration, 4>;

/// Asserts every nibble of a packed time is a decimal digit in range
pub fn assert_valid_bcd(raw: u16) {
    let digits = [raw & 0xF, (raw >> 4) & 0xF, (raw >> 8) & 0xF, (raw >> 12) & 0xF];
    assert!(digits[0] <= 9, "seconds ones out of range in {:#06x}", raw);
    assert!(digits[1] <= 5, "seconds tens out of range in {:#06x}", raw);
    assert!(digits[2] <= 9, "minutes ones out of range in {:#06x}", raw);
    assert!(digits[3] <= 5, "minutes tens out of range in {:#06x}", raw);
}

/// Feeds `n` timer interrupts through the hardware path
pub fn run_timeouts(clock: &mut TestClock<'_>, n: u32) {
    for _ in 0..n {
        clock.timer_mut().port_mut().expire();
        clock.handle_interrupt(16);
    }
}
