//! Startup configuration of a [`Clock`](crate::Clock).

use crate::clock::{ClockState, DEFAULT_TIMEOUTS_PER_SECOND};
use crate::pio::EdgeDetection;
use crate::timer::DECISECOND_CYCLES;
use crate::types::Direction;

/// Fixed parameters of a clock deployment.
///
/// Defaults match the lab board: 00:59:57 at power-on, a 100 ms timer at
/// 30 MHz, ten timeouts per second, counting up, latched edges cleared by
/// writing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// State shown at startup.
    pub initial: ClockState,

    /// Timer period in clock cycles.
    pub timer_period_cycles: u32,

    /// Timer timeouts per elapsed second.
    pub timeouts_per_second: u8,

    /// Direction of the once-per-second tick.
    pub tick_direction: Direction,

    /// Poll the switches for a field assignment on every timeout while
    /// button 0 is held.
    pub time_set_polling: bool,

    /// Edge detection on the switch block.
    pub switch_detection: EdgeDetection,

    /// Edge detection on the button block.
    pub button_detection: EdgeDetection,
}

impl ClockConfig {
    /// Sets the state shown at startup.
    pub fn with_initial(mut self, initial: ClockState) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the timer period in cycles and how many timeouts make a second.
    pub fn with_timer_period(mut self, cycles: u32, timeouts_per_second: u8) -> Self {
        self.timer_period_cycles = cycles;
        self.timeouts_per_second = timeouts_per_second;
        self
    }

    /// Counts the clock down instead of up.
    pub fn with_tick_direction(mut self, direction: Direction) -> Self {
        self.tick_direction = direction;
        self
    }

    /// Enables setting fields from the switches while button 0 is held.
    pub fn with_time_set_polling(mut self, enabled: bool) -> Self {
        self.time_set_polling = enabled;
        self
    }

    /// Sets edge detection on the switch block.
    pub fn with_switch_detection(mut self, detection: EdgeDetection) -> Self {
        self.switch_detection = detection;
        self
    }

    /// Sets edge detection on the button block.
    pub fn with_button_detection(mut self, detection: EdgeDetection) -> Self {
        self.button_detection = detection;
        self
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            initial: ClockState::POWER_ON,
            timer_period_cycles: DECISECOND_CYCLES,
            timeouts_per_second: DEFAULT_TIMEOUTS_PER_SECOND,
            tick_direction: Direction::Forward,
            time_set_polling: false,
            switch_detection: EdgeDetection::default(),
            button_detection: EdgeDetection::default(),
        }
    }
}
