//! Edge-triggered batch time adjustments with debounce.
//!
//! An [`EdgeAdjuster`] watches one bit of one input block. When an edge on
//! that bit arrives it moves the clock by a fixed number of seconds, redraws
//! the display, and holds the bit masked for a debounce interval so a single
//! physical press yields exactly one adjustment.

use crate::clock::ClockState;
use crate::display::{SegmentDisplay, render};
use crate::log::debug;
use crate::pio::{InputBlock, InputPort, bit_mask};
use crate::time::{Sleep, TimeDuration};
use crate::types::{ClockError, Direction, InputSource};

/// What an edge event did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// The clock moved by `seconds` in `direction` and was redrawn.
    Adjusted { direction: Direction, seconds: u16 },

    /// No edge on the watched bit; other edges were acknowledged.
    Ignored,
}

/// Moves the clock by a fixed amount on each edge of one input bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeAdjuster<D: TimeDuration> {
    source: InputSource,
    bit: u8,
    direction: Direction,
    seconds: u16,
    debounce: D,
    release_poll: Option<D>,
}

impl<D: TimeDuration> EdgeAdjuster<D> {
    /// Creates a new adjuster builder.
    pub fn builder() -> AdjusterBuilder<D> {
        AdjusterBuilder::new()
    }

    /// Switch `bit` adds `seconds` per edge.
    pub fn switch_increment(bit: u8, seconds: u16, debounce: D) -> Result<Self, ClockError> {
        Self::builder()
            .source(InputSource::Switches)
            .bit(bit)
            .step(Direction::Forward, seconds)
            .debounce(debounce)
            .build()
    }

    /// Switch `bit` subtracts `seconds` per edge.
    pub fn switch_decrement(bit: u8, seconds: u16, debounce: D) -> Result<Self, ClockError> {
        Self::builder()
            .source(InputSource::Switches)
            .bit(bit)
            .step(Direction::Backward, seconds)
            .debounce(debounce)
            .build()
    }

    /// Button `bit` adds `seconds` per press, then waits for release,
    /// polling every `poll`, so holding the button counts once.
    pub fn button_increment_with_release(
        bit: u8,
        seconds: u16,
        debounce: D,
        poll: D,
    ) -> Result<Self, ClockError> {
        Self::builder()
            .source(InputSource::Buttons)
            .bit(bit)
            .step(Direction::Forward, seconds)
            .debounce(debounce)
            .release_poll(poll)
            .build()
    }

    /// Returns the input block this adjuster watches.
    pub fn source(&self) -> InputSource {
        self.source
    }

    /// Returns the watched bit position.
    pub fn bit(&self) -> u8 {
        self.bit
    }

    /// Returns the direction of the adjustment.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Seconds moved per edge.
    pub fn seconds(&self) -> u16 {
        self.seconds
    }

    /// Returns how long the bit stays masked after an adjustment.
    pub fn debounce(&self) -> D {
        self.debounce
    }

    /// Returns the release poll interval, if the adjuster waits for release.
    pub fn release_poll(&self) -> Option<D> {
        self.release_poll
    }

    /// Returns `true` if `bits` from `source` contain this adjuster's edge.
    pub fn matches(&self, source: InputSource, bits: u32) -> bool {
        self.source == source && bits & bit_mask(self.bit) != 0
    }

    /// Handles one edge event from this adjuster's input block.
    ///
    /// If the watched bit is in `bits`: masks the bit, acknowledges the
    /// edges, applies the adjustment, redraws, waits out the debounce (and
    /// the release, if configured), drains residual edges on the bit and
    /// unmasks it.
    /// Otherwise only acknowledges `bits`.
    ///
    /// Blocks the caller for the whole debounce and release wait.
    pub fn on_edge<P, S, Z>(
        &self,
        bits: u32,
        block: &mut InputBlock<P>,
        state: &mut ClockState,
        display: &mut S,
        sleep: &Z,
    ) -> EdgeOutcome
    where
        P: InputPort,
        S: SegmentDisplay,
        Z: Sleep<D>,
    {
        if bits & bit_mask(self.bit) == 0 {
            block.acknowledge(bits);
            debug!("edge bits {=u32:b} ignored by bit {}", bits, self.bit);
            return EdgeOutcome::Ignored;
        }

        block.mask_bit(self.bit);
        block.acknowledge(bits);

        state.adjust(self.direction, self.seconds);
        render(display, state);
        debug!("bit {} moved clock {} seconds", self.bit, self.seconds);

        sleep.sleep(self.debounce);
        if let Some(poll) = self.release_poll {
            while block.is_active(self.bit) {
                sleep.sleep(poll);
            }
        }

        block.drain(bit_mask(self.bit));
        block.unmask_bit(self.bit);

        EdgeOutcome::Adjusted {
            direction: self.direction,
            seconds: self.seconds,
        }
    }
}

/// Builder for [`EdgeAdjuster`].
#[derive(Debug, Clone, Copy)]
pub struct AdjusterBuilder<D: TimeDuration> {
    source: InputSource,
    bit: u8,
    direction: Direction,
    seconds: u16,
    debounce: D,
    release_poll: Option<D>,
}

impl<D: TimeDuration> AdjusterBuilder<D> {
    /// Creates a builder for switch 0, +1 second, no debounce.
    pub fn new() -> Self {
        Self {
            source: InputSource::Switches,
            bit: 0,
            direction: Direction::Forward,
            seconds: 1,
            debounce: D::ZERO,
            release_poll: None,
        }
    }

    /// Sets the input block to watch.
    pub fn source(mut self, source: InputSource) -> Self {
        self.source = source;
        self
    }

    /// Sets the bit to watch. Switch #n on the board is bit n-1.
    pub fn bit(mut self, bit: u8) -> Self {
        self.bit = bit;
        self
    }

    /// Sets the adjustment as a signed number of seconds.
    pub fn seconds(mut self, seconds: i16) -> Self {
        self.direction = if seconds < 0 {
            Direction::Backward
        } else {
            Direction::Forward
        };
        self.seconds = seconds.unsigned_abs();
        self
    }

    /// Sets the adjustment as a direction and magnitude.
    pub fn step(mut self, direction: Direction, seconds: u16) -> Self {
        self.direction = direction;
        self.seconds = seconds;
        self
    }

    /// Sets how long the bit stays masked after an adjustment.
    pub fn debounce(mut self, debounce: D) -> Self {
        self.debounce = debounce;
        self
    }

    /// Waits for the input to go inactive after the debounce, polling at
    /// this interval.
    pub fn release_poll(mut self, poll: D) -> Self {
        self.release_poll = Some(poll);
        self
    }

    /// Builds and validates the adjuster.
    ///
    /// # Errors
    /// * `InvalidBit` - bit position is 32 or more
    /// * `ZeroMagnitude` - adjustment of zero seconds
    pub fn build(self) -> Result<EdgeAdjuster<D>, ClockError> {
        if self.bit >= 32 {
            return Err(ClockError::InvalidBit(self.bit));
        }
        if self.seconds == 0 {
            return Err(ClockError::ZeroMagnitude);
        }

        Ok(EdgeAdjuster {
            source: self.source,
            bit: self.bit,
            direction: self.direction,
            seconds: self.seconds,
            debounce: self.debounce,
            release_poll: self.release_poll,
        })
    }
}

impl<D: TimeDuration> Default for AdjusterBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
