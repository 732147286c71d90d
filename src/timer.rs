//! Periodic interval timer.

use crate::regs::timer::{CONTROL_CONT, CONTROL_ITO, CONTROL_START, STATUS_TO};
use crate::types::ClockError;

/// Cycles per 100 ms at the board's 30 MHz clock.
pub const DECISECOND_CYCLES: u32 = 3_000_000;

/// Trait for abstracting the interval timer registers.
pub trait TimerPort {
    /// Reads the status register.
    fn read_status(&mut self) -> u32;

    /// Writes the status register. Writing 0 clears a pending timeout.
    fn write_status(&mut self, value: u32);

    /// Writes the control register.
    fn write_control(&mut self, value: u32);

    /// Writes the low half of the period.
    fn write_period_low(&mut self, value: u16);

    /// Writes the high half of the period.
    fn write_period_high(&mut self, value: u16);
}

/// Owns a [`TimerPort`] and speaks its register protocol.
#[derive(Debug)]
pub struct TimerBlock<T: TimerPort> {
    port: T,
}

impl<T: TimerPort> TimerBlock<T> {
    /// Wraps `port`. Nothing is written until [`configure`](Self::configure).
    pub fn new(port: T) -> Self {
        Self { port }
    }

    /// Programs a repeating, interrupting timeout every `period_cycles`
    /// clock cycles and starts the timer.
    ///
    /// # Errors
    /// * `InvalidTimerConfig` - `period_cycles` is zero
    pub fn configure(&mut self, period_cycles: u32) -> Result<(), ClockError> {
        let period = period_cycles
            .checked_sub(1)
            .ok_or(ClockError::InvalidTimerConfig)?;

        self.port.write_period_low((period & 0xFFFF) as u16);
        self.port.write_period_high((period >> 16) as u16);
        self.port
            .write_control(CONTROL_START | CONTROL_CONT | CONTROL_ITO);
        Ok(())
    }

    /// Acknowledges a pending timeout. Returns `false` if none was pending.
    pub fn take_pending(&mut self) -> bool {
        if self.port.read_status() & STATUS_TO == 0 {
            return false;
        }
        self.port.write_status(0);
        true
    }

    /// Returns a reference to the underlying port.
    pub fn port(&self) -> &T {
        &self.port
    }

    /// Returns a mutable reference to the underlying port.
    pub fn port_mut(&mut self) -> &mut T {
        &mut self.port
    }
}
