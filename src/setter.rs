//! Setting the time from the switches while a button is held.
//!
//! The two leftmost switches select the field and the six rightmost switches
//! hold its binary value:
//!
//! | switch 9 | switch 8 | field   |
//! |----------|----------|---------|
//! | on       | off      | seconds |
//! | off      | on       | minutes |
//! | on       | on       | hours   |

use crate::clock::ClockState;

const SECONDS_SELECT: u32 = 1 << 9;
const MINUTES_SELECT: u32 = 1 << 8;
const VALUE_BITS: u32 = 0b11_1111;

/// A field assignment decoded from the switch word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetCommand {
    /// Set seconds, 0..=59.
    Seconds(u8),
    /// Set minutes, 0..=59.
    Minutes(u8),
    /// Set hours, 0..=23.
    Hours(u8),
}

impl SetCommand {
    /// Decodes a raw switch word. Returns `None` if no field is selected.
    pub fn decode(switches: u32) -> Option<Self> {
        let value = (switches & VALUE_BITS) as u8;
        match (switches & SECONDS_SELECT != 0, switches & MINUTES_SELECT != 0) {
            (true, false) => Some(SetCommand::Seconds(value)),
            (false, true) => Some(SetCommand::Minutes(value)),
            (true, true) => Some(SetCommand::Hours(value)),
            (false, false) => None,
        }
    }

    /// Applies the assignment. Out-of-range values leave the clock unchanged;
    /// returns whether the clock changed.
    pub fn apply(self, state: &mut ClockState) -> bool {
        let before = *state;
        let result = match self {
            SetCommand::Seconds(value) => state.set_seconds(value),
            SetCommand::Minutes(value) => state.set_minutes(value),
            SetCommand::Hours(value) => state.set_hours(value),
        };
        result.is_ok() && *state != before
    }
}
