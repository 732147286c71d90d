//! Six-digit seven-segment display driver.
//!
//! Defines the [`SegmentDisplay`] trait for hardware abstraction and
//! [`render`], which writes the whole clock to it.

use crate::clock::ClockState;
use crate::segment::encode;

/// Trait for abstracting a bank of six seven-segment digits.
///
/// Implement this for your display hardware. Each position is written
/// independently; the pattern is active-low as produced by
/// [`encode`](crate::segment::encode). This method cannot fail.
pub trait SegmentDisplay {
    /// Writes one digit pattern.
    fn write_digit(&mut self, position: DisplayPosition, pattern: u8);
}

/// The six digit positions, numbered as on the board (0 is rightmost).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayPosition {
    /// Rightmost digit.
    SecondsOnes = 0,
    /// Tens of seconds.
    SecondsTens = 1,
    /// Ones of minutes.
    MinutesOnes = 2,
    /// Tens of minutes.
    MinutesTens = 3,
    /// Ones of hours.
    HoursOnes = 4,
    /// Leftmost digit.
    HoursTens = 5,
}

impl DisplayPosition {
    /// All positions in render order.
    pub const ALL: [DisplayPosition; 6] = [
        DisplayPosition::SecondsOnes,
        DisplayPosition::SecondsTens,
        DisplayPosition::MinutesOnes,
        DisplayPosition::MinutesTens,
        DisplayPosition::HoursOnes,
        DisplayPosition::HoursTens,
    ];

    /// Slot index, 0..=5.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Returns the six digits of `state` in render order.
pub fn digits(state: &ClockState) -> [u8; 6] {
    let [sec_ones, sec_tens, min_ones, min_tens] = state.time().digits();
    let [hour_ones, hour_tens] = state.hour_digits();
    [sec_ones, sec_tens, min_ones, min_tens, hour_ones, hour_tens]
}

/// Writes every digit of `state` to `display`.
pub fn render<D: SegmentDisplay>(display: &mut D, state: &ClockState) {
    for (position, digit) in DisplayPosition::ALL.into_iter().zip(digits(state)) {
        display.write_digit(position, encode(digit));
    }
}
