//! Packed BCD minutes/seconds and the one-second tick engine.
//!
//! A [`BcdTime`] stores four decimal digits in one `u16`:
//!
//! | bits    | digit        |
//! |---------|--------------|
//! | 15..12  | minutes tens |
//! | 11..8   | minutes ones |
//! | 7..4    | seconds tens |
//! | 3..0    | seconds ones |
//!
//! Every constructor validates the digits, and the tick operations carry or
//! borrow digit by digit, so a stored nibble is always a decimal digit and
//! the value stays within `00:00..=59:59`.

use crate::types::ClockError;

/// Packed value a forward tick past 59:59 produced in the legacy encoding.
pub const ROLLOVER_SENTINEL: i32 = 0x1_0000;

/// Packed value a backward tick past 00:00 produced in the legacy encoding.
pub const UNDERFLOW_SENTINEL: i32 = -1;

/// Minutes and seconds as four packed BCD digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BcdTime(u16);

/// Result of moving a [`BcdTime`] by one second.
///
/// Crossing the hour boundary is reported out of band instead of through an
/// out-of-range packed value; the caller adjusts its hour counter and
/// continues from [`BcdTime::MIN`] or [`BcdTime::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// The new time, still within the same hour.
    Next(BcdTime),

    /// Ticked forward past 59:59.
    Carry,

    /// Ticked backward past 00:00.
    Borrow,
}

impl Tick {
    /// Encodes the result the way the legacy handlers did: the packed value,
    /// or one of the overflow sentinels.
    pub fn to_legacy(self) -> i32 {
        match self {
            Tick::Next(time) => time.raw() as i32,
            Tick::Carry => ROLLOVER_SENTINEL,
            Tick::Borrow => UNDERFLOW_SENTINEL,
        }
    }
}

impl BcdTime {
    /// 00:00.
    pub const MIN: BcdTime = BcdTime(0x0000);

    /// 59:59.
    pub const MAX: BcdTime = BcdTime(0x5959);

    /// 59:57, the power-on time used by the lab boards.
    pub const POWER_ON: BcdTime = BcdTime(0x5957);

    /// Validates and wraps a packed value.
    ///
    /// # Errors
    /// * `InvalidBcd` - a nibble exceeds 9, or a tens digit exceeds 5
    pub fn new(raw: u16) -> Result<Self, ClockError> {
        let time = BcdTime(raw);
        let [sec_ones, sec_tens, min_ones, min_tens] = time.digits();
        if sec_ones > 9 || sec_tens > 5 || min_ones > 9 || min_tens > 5 {
            return Err(ClockError::InvalidBcd(raw));
        }
        Ok(time)
    }

    /// Builds a time from binary minutes and seconds.
    ///
    /// # Errors
    /// * `FieldOutOfRange` - either value exceeds 59
    pub fn from_min_sec(minutes: u8, seconds: u8) -> Result<Self, ClockError> {
        check_field(minutes)?;
        check_field(seconds)?;
        Ok(Self::pack(minutes / 10, minutes % 10, seconds / 10, seconds % 10))
    }

    /// Returns the packed representation.
    #[inline]
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Returns the digits in display order:
    /// `[seconds ones, seconds tens, minutes ones, minutes tens]`.
    #[inline]
    pub fn digits(self) -> [u8; 4] {
        [
            (self.0 & 0xF) as u8,
            ((self.0 >> 4) & 0xF) as u8,
            ((self.0 >> 8) & 0xF) as u8,
            ((self.0 >> 12) & 0xF) as u8,
        ]
    }

    /// Minutes as a binary value.
    pub fn minutes(self) -> u8 {
        let [_, _, ones, tens] = self.digits();
        tens * 10 + ones
    }

    /// Seconds as a binary value.
    pub fn seconds(self) -> u8 {
        let [ones, tens, _, _] = self.digits();
        tens * 10 + ones
    }

    /// Replaces the seconds, keeping the minutes.
    ///
    /// # Errors
    /// * `FieldOutOfRange` - `seconds` exceeds 59
    pub fn with_seconds(self, seconds: u8) -> Result<Self, ClockError> {
        check_field(seconds)?;
        let [_, _, min_ones, min_tens] = self.digits();
        Ok(Self::pack(min_tens, min_ones, seconds / 10, seconds % 10))
    }

    /// Replaces the minutes, keeping the seconds.
    ///
    /// # Errors
    /// * `FieldOutOfRange` - `minutes` exceeds 59
    pub fn with_minutes(self, minutes: u8) -> Result<Self, ClockError> {
        check_field(minutes)?;
        let [sec_ones, sec_tens, _, _] = self.digits();
        Ok(Self::pack(minutes / 10, minutes % 10, sec_tens, sec_ones))
    }

    /// Advances by one second.
    pub fn tick_forward(self) -> Tick {
        let [sec_ones, sec_tens, min_ones, min_tens] = self.digits();

        if sec_ones < 9 {
            return Tick::Next(Self::pack(min_tens, min_ones, sec_tens, sec_ones + 1));
        }
        if sec_tens < 5 {
            return Tick::Next(Self::pack(min_tens, min_ones, sec_tens + 1, 0));
        }
        if min_ones < 9 {
            return Tick::Next(Self::pack(min_tens, min_ones + 1, 0, 0));
        }
        if min_tens < 5 {
            return Tick::Next(Self::pack(min_tens + 1, 0, 0, 0));
        }
        Tick::Carry
    }

    /// Rewinds by one second.
    pub fn tick_backward(self) -> Tick {
        let [sec_ones, sec_tens, min_ones, min_tens] = self.digits();

        if sec_ones > 0 {
            return Tick::Next(Self::pack(min_tens, min_ones, sec_tens, sec_ones - 1));
        }
        if sec_tens > 0 {
            return Tick::Next(Self::pack(min_tens, min_ones, sec_tens - 1, 9));
        }
        if min_ones > 0 {
            return Tick::Next(Self::pack(min_tens, min_ones - 1, 5, 9));
        }
        if min_tens > 0 {
            return Tick::Next(Self::pack(min_tens - 1, 9, 5, 9));
        }
        Tick::Borrow
    }

    #[inline]
    fn pack(min_tens: u8, min_ones: u8, sec_tens: u8, sec_ones: u8) -> Self {
        BcdTime(
            (min_tens as u16) << 12
                | (min_ones as u16) << 8
                | (sec_tens as u16) << 4
                | sec_ones as u16,
        )
    }
}

impl TryFrom<u16> for BcdTime {
    type Error = ClockError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        BcdTime::new(raw)
    }
}

impl From<BcdTime> for u16 {
    fn from(time: BcdTime) -> Self {
        time.0
    }
}

impl core::fmt::Display for BcdTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [sec_ones, sec_tens, min_ones, min_tens] = self.digits();
        write!(f, "{}{}:{}{}", min_tens, min_ones, sec_tens, sec_ones)
    }
}

fn check_field(value: u8) -> Result<(), ClockError> {
    if value > 59 {
        return Err(ClockError::FieldOutOfRange(value));
    }
    Ok(())
}
