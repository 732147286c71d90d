//! Decimal digit to seven-segment pattern encoding.
//!
//! Patterns are active-low: a cleared bit lights its segment. Bit 0 is
//! segment `a`, bit 6 is segment `g`, bit 7 is the decimal point, which is
//! never lit.

/// Pattern with every segment dark.
pub const SEGMENTS_OFF: u8 = 0xFF;

/// Patterns for the digits 0 through 9.
pub const DIGIT_PATTERNS: [u8; 10] = [
    0b1100_0000, // 0
    0b1111_1001, // 1
    0b1010_0100, // 2
    0b1011_0000, // 3
    0b1001_1001, // 4
    0b1001_0010, // 5
    0b1000_0010, // 6
    0b1111_1000, // 7
    0b1000_0000, // 8
    0b1001_0000, // 9
];

/// Returns the pattern for `digit`, or [`SEGMENTS_OFF`] if it is not 0..=9.
#[inline]
pub fn encode(digit: u8) -> u8 {
    DIGIT_PATTERNS
        .get(digit as usize)
        .copied()
        .unwrap_or(SEGMENTS_OFF)
}
