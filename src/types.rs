//! Core types shared across the clock.

/// Which way a time adjustment moves the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Add seconds, carrying into minutes and hours.
    Forward,

    /// Subtract seconds, borrowing from minutes and hours.
    Backward,
}

/// Peripheral input blocks that can raise an edge interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputSource {
    /// The slide switch block.
    Switches,

    /// The push button block.
    Buttons,
}

/// Configuration and setting errors.
///
/// Ticking, rendering and interrupt handling never fail; only constructing
/// values from untrusted input does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Packed value has a nibble outside its digit range.
    InvalidBcd(u16),

    /// Minutes or seconds value not in 0..=59.
    FieldOutOfRange(u8),

    /// Hour value not in 0..=23.
    HoursOutOfRange(u8),

    /// Input bit position does not fit a 32-bit register.
    InvalidBit(u8),

    /// Adjustment of zero seconds.
    ZeroMagnitude,

    /// Zero timeouts per second or a timer period of zero cycles.
    InvalidTimerConfig,

    /// Adjuster capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClockError::InvalidBcd(raw) => {
                write!(f, "0x{:04x} is not a valid packed BCD time", raw)
            }
            ClockError::FieldOutOfRange(value) => {
                write!(f, "{} is not a valid minute or second value", value)
            }
            ClockError::HoursOutOfRange(value) => {
                write!(f, "{} is not a valid hour value", value)
            }
            ClockError::InvalidBit(bit) => {
                write!(f, "bit {} does not fit a 32-bit input register", bit)
            }
            ClockError::ZeroMagnitude => {
                write!(f, "adjustment must move the clock by at least one second")
            }
            ClockError::InvalidTimerConfig => {
                write!(f, "timer period and timeouts per second must be non-zero")
            }
            ClockError::CapacityExceeded => {
                write!(f, "adjuster capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClockError {}
