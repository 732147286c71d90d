//! Time abstraction traits for platform-agnostic waiting.

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;
}

/// Trait for abstracting a blocking wait.
///
/// Used for the debounce hold and the release poll of edge adjusters. On
/// hardware this is typically a cycle-counting delay; in tests a fake clock
/// that only records the requested durations.
pub trait Sleep<D: TimeDuration> {
    /// Blocks for the given duration.
    fn sleep(&self, duration: D);
}

/// Plain millisecond duration for targets without their own duration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl TimeDuration for Millis {
    const ZERO: Self = Millis(0);
}
