//! Memory map and register bit layout of the lab board.
//!
//! The library itself only talks to hardware through the port traits; these
//! constants are for implementing those traits on the real bus.

/// Base of the LED output register.
pub const LEDS_BASE: usize = 0x0400_0000;

/// Base of the slide switch PIO block.
pub const SWITCHES_BASE: usize = 0x0400_0010;

/// Base of the interval timer block.
pub const TIMER_BASE: usize = 0x0400_0020;

/// Base of the first seven-segment digit.
pub const DISPLAYS_BASE: usize = 0x0400_0050;

/// Address distance between consecutive digits.
pub const DISPLAY_STRIDE: usize = 0x10;

/// Base of the push button PIO block.
pub const BUTTONS_BASE: usize = 0x0400_00d0;

/// PIO register offsets.
pub mod pio {
    /// Raw input level.
    pub const DATA: usize = 0x0;
    /// Direction, 0 = input.
    pub const DIRECTION: usize = 0x4;
    /// Interrupt mask, set bit = bit raises interrupts.
    pub const IRQ_MASK: usize = 0x8;
    /// Latched edges.
    pub const EDGE_CAPTURE: usize = 0xC;

    /// Direction value configuring every bit as input.
    pub const ALL_INPUTS: u32 = 0;
}

/// Interval timer register offsets and bits.
pub mod timer {
    /// Status; bit 0 set while a timeout is pending, cleared by writing 0.
    pub const STATUS: usize = 0x0;
    /// Control; see the `CONTROL_*` bits.
    pub const CONTROL: usize = 0x4;
    /// Low 16 bits of the period.
    pub const PERIOD_LOW: usize = 0x8;
    /// High 16 bits of the period.
    pub const PERIOD_HIGH: usize = 0xC;

    /// Timeout pending.
    pub const STATUS_TO: u32 = 1 << 0;

    /// Start counting.
    pub const CONTROL_START: u32 = 1 << 0;
    /// Reload and keep counting after a timeout.
    pub const CONTROL_CONT: u32 = 1 << 1;
    /// Interrupt on timeout.
    pub const CONTROL_ITO: u32 = 1 << 2;
}

/// Interrupt cause codes delivered to the trap handler.
pub mod cause {
    /// Interval timer.
    pub const TIMER: u32 = 16;
    /// Switch PIO block.
    pub const SWITCHES: u32 = 17;
    /// Button PIO block.
    pub const BUTTONS: u32 = 18;
}

/// Address of the digit at `index` (0 is seconds ones).
pub const fn display_address(index: usize) -> usize {
    DISPLAYS_BASE + index * DISPLAY_STRIDE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_bits_combine_to_the_lab_value() {
        assert_eq!(
            timer::CONTROL_START | timer::CONTROL_CONT | timer::CONTROL_ITO,
            0b111
        );
    }

    #[test]
    fn digits_are_sixteen_bytes_apart() {
        assert_eq!(display_address(0), 0x0400_0050);
        assert_eq!(display_address(5), 0x0400_00a0);
    }

    #[test]
    fn io_blocks_follow_the_board_memory_map() {
        assert_eq!(LEDS_BASE, 0x0400_0000);
        assert_eq!(SWITCHES_BASE, LEDS_BASE + 0x10);
        assert_eq!(TIMER_BASE, LEDS_BASE + 0x20);
        assert_eq!(BUTTONS_BASE, 0x0400_00d0);
    }
}
