//! Clock state and sub-second timeout gating.

use crate::bcd::{BcdTime, Tick};
use crate::log::trace;
use crate::types::{ClockError, Direction};

/// Hours in a day; the hour counter wraps modulo this.
pub const HOURS_PER_DAY: u8 = 24;

/// Default number of timer timeouts per elapsed second (100 ms timer).
pub const DEFAULT_TIMEOUTS_PER_SECOND: u8 = 10;

/// Time of day: packed minutes/seconds plus an hour counter.
///
/// The only way the time moves is [`ClockState::step`], which applies one
/// BCD tick and carries or borrows into the hour counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockState {
    time: BcdTime,
    hours: u8,
}

impl ClockState {
    /// 00:59:57, the power-on state of the lab boards.
    pub const POWER_ON: ClockState = ClockState {
        time: BcdTime::POWER_ON,
        hours: 0,
    };

    /// Creates a clock state.
    ///
    /// # Errors
    /// * `HoursOutOfRange` - `hours` is 24 or more
    pub fn new(time: BcdTime, hours: u8) -> Result<Self, ClockError> {
        check_hours(hours)?;
        Ok(Self { time, hours })
    }

    /// Minutes and seconds.
    #[inline]
    pub fn time(&self) -> BcdTime {
        self.time
    }

    /// Hour counter, 0..=23.
    #[inline]
    pub fn hours(&self) -> u8 {
        self.hours
    }

    /// Hour digits as `[ones, tens]`.
    pub fn hour_digits(&self) -> [u8; 2] {
        [self.hours % 10, self.hours / 10]
    }

    /// Moves the clock by one second.
    pub fn step(&mut self, direction: Direction) {
        let tick = match direction {
            Direction::Forward => self.time.tick_forward(),
            Direction::Backward => self.time.tick_backward(),
        };

        match tick {
            Tick::Next(time) => self.time = time,
            Tick::Carry => {
                self.time = BcdTime::MIN;
                self.hours = (self.hours + 1) % HOURS_PER_DAY;
                trace!("hour rollover, hours now {}", self.hours);
            }
            Tick::Borrow => {
                self.time = BcdTime::MAX;
                self.hours = self.hours.checked_sub(1).unwrap_or(HOURS_PER_DAY - 1);
                trace!("hour underflow, hours now {}", self.hours);
            }
        }
    }

    /// Moves the clock by `seconds` single-second steps.
    pub fn adjust(&mut self, direction: Direction, seconds: u16) {
        for _ in 0..seconds {
            self.step(direction);
        }
    }

    /// Overwrites the seconds field.
    ///
    /// # Errors
    /// * `FieldOutOfRange` - `seconds` exceeds 59
    pub fn set_seconds(&mut self, seconds: u8) -> Result<(), ClockError> {
        self.time = self.time.with_seconds(seconds)?;
        Ok(())
    }

    /// Overwrites the minutes field.
    ///
    /// # Errors
    /// * `FieldOutOfRange` - `minutes` exceeds 59
    pub fn set_minutes(&mut self, minutes: u8) -> Result<(), ClockError> {
        self.time = self.time.with_minutes(minutes)?;
        Ok(())
    }

    /// Overwrites the hour counter.
    ///
    /// # Errors
    /// * `HoursOutOfRange` - `hours` is 24 or more
    pub fn set_hours(&mut self, hours: u8) -> Result<(), ClockError> {
        check_hours(hours)?;
        self.hours = hours;
        Ok(())
    }
}

impl core::fmt::Display for ClockState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}:{}", self.hours, self.time)
    }
}

fn check_hours(hours: u8) -> Result<(), ClockError> {
    if hours >= HOURS_PER_DAY {
        return Err(ClockError::HoursOutOfRange(hours));
    }
    Ok(())
}

/// Counts timer timeouts and reports each completed second.
///
/// Decouples the physical timer period from the one-second clock tick: with
/// a 100 ms timer, ten timeouts make one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeoutAccumulator {
    count: u8,
    per_second: u8,
}

impl TimeoutAccumulator {
    /// Creates an accumulator at zero.
    ///
    /// # Errors
    /// * `InvalidTimerConfig` - `per_second` is zero
    pub fn new(per_second: u8) -> Result<Self, ClockError> {
        if per_second == 0 {
            return Err(ClockError::InvalidTimerConfig);
        }
        Ok(Self {
            count: 0,
            per_second,
        })
    }

    /// Records one timeout. Returns `true` when a full second has elapsed,
    /// in which case the count is back at zero.
    pub fn on_timeout(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.per_second {
            self.count = 0;
            return true;
        }
        false
    }

    /// Timeouts counted toward the current second.
    #[inline]
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Timeouts that make up one second.
    #[inline]
    pub fn per_second(&self) -> u8 {
        self.per_second
    }
}

impl Default for TimeoutAccumulator {
    fn default() -> Self {
        Self {
            count: 0,
            per_second: DEFAULT_TIMEOUTS_PER_SECOND,
        }
    }
}
