//! Parallel input blocks (switches and buttons) and edge detection.
//!
//! Provides [`InputBlock`], which wraps an [`InputPort`] and turns its
//! registers into a bitmask of fresh edges. Two detection strategies are
//! supported:
//!
//! - **Latched**: the hardware edge-capture register records transitions and
//!   software clears them after reading. How a clear is performed differs
//!   between peripherals, so it is configured with [`EdgeClearPolicy`].
//! - **Compare**: software compares the raw level against the previous
//!   sample, for blocks without an edge-capture register.

use crate::regs::pio::ALL_INPUTS;

/// Width of the switch block: ten switches.
pub const SWITCH_BITS: u32 = 0x3FF;

/// Width of the button block as used by the clock: one button.
pub const BUTTON_BITS: u32 = 0x1;

/// Trait for abstracting a parallel input block's registers.
pub trait InputPort {
    /// Reads the raw input level.
    fn read_data(&mut self) -> u32;

    /// Writes the direction register (0 = input).
    fn write_direction(&mut self, value: u32);

    /// Writes the interrupt mask register.
    fn write_irq_mask(&mut self, value: u32);

    /// Reads the edge-capture register.
    fn read_edge_capture(&mut self) -> u32;

    /// Writes the edge-capture register.
    fn write_edge_capture(&mut self, value: u32);
}

/// How the edge-capture register is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeClearPolicy {
    /// Writing a 1 to a bit clears that bit only.
    #[default]
    WriteOneToClear,

    /// Any write clears every bit.
    WriteAny,

    /// Reading the register clears it; writes are ignored.
    ClearOnRead,
}

/// Which level transition counts as an edge in software comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// Inactive to active.
    #[default]
    Rising,

    /// Active to inactive.
    Falling,

    /// Any change.
    Toggle,
}

/// Edge detection strategy of an input block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeDetection {
    /// Hardware edge-capture register.
    Latched(EdgeClearPolicy),

    /// Software comparison against the previous raw level.
    Compare(Trigger),
}

impl Default for EdgeDetection {
    fn default() -> Self {
        EdgeDetection::Latched(EdgeClearPolicy::default())
    }
}

/// An input block with its detection state.
#[derive(Debug)]
pub struct InputBlock<P: InputPort> {
    port: P,
    detection: EdgeDetection,
    width: u32,
    irq_mask: u32,
    previous: u32,
    pending: u32,
}

impl<P: InputPort> InputBlock<P> {
    /// Wraps `port`. Only bits within `width` are ever reported.
    pub fn new(port: P, detection: EdgeDetection, width: u32) -> Self {
        Self {
            port,
            detection,
            width,
            irq_mask: 0,
            previous: 0,
            pending: 0,
        }
    }

    /// Configures all bits as inputs, clears stale edges, enables
    /// interrupts for `irq_mask` and snapshots the current level.
    pub fn init(&mut self, irq_mask: u32) {
        self.port.write_direction(ALL_INPUTS);
        self.clear_edges(self.width);
        self.pending = 0;
        self.irq_mask = irq_mask & self.width;
        self.port.write_irq_mask(self.irq_mask);
        self.previous = self.level();
    }

    /// Raw input level, limited to the block width.
    pub fn level(&mut self) -> u32 {
        self.port.read_data() & self.width
    }

    /// Returns `true` if input `bit` currently reads active.
    pub fn is_active(&mut self, bit: u8) -> bool {
        self.level() & bit_mask(bit) != 0
    }

    /// Returns the edges observed since the previous sample.
    ///
    /// Latched edges stay set in hardware until [`acknowledge`](Self::acknowledge)
    /// (or the read itself, under `ClearOnRead`). In compare mode the
    /// previous level is updated by every call.
    pub fn sample(&mut self) -> u32 {
        match self.detection {
            EdgeDetection::Latched(_) => {
                let edges = self.port.read_edge_capture() & self.width;
                edges | core::mem::take(&mut self.pending)
            }
            EdgeDetection::Compare(trigger) => {
                let current = self.level();
                let changed = current ^ self.previous;
                self.previous = current;
                match trigger {
                    Trigger::Rising => changed & current,
                    Trigger::Falling => changed & !current,
                    Trigger::Toggle => changed,
                }
            }
        }
    }

    /// Clears `bits` in the edge-capture register. No-op in compare mode.
    pub fn acknowledge(&mut self, bits: u32) {
        if let EdgeDetection::Latched(_) = self.detection {
            self.clear_edges(bits);
        }
    }

    /// Discards edges on `bits` accumulated while an adjustment was being
    /// held off. Edges on other bits stay pending.
    ///
    /// Under `WriteAny` and `ClearOnRead` the hardware cannot clear a
    /// single bit, so the other residual edges are kept in software and
    /// reported by the next [`sample`](Self::sample).
    pub fn drain(&mut self, bits: u32) {
        let bits = bits & self.width;
        match self.detection {
            EdgeDetection::Latched(policy) => {
                let residual = self.port.read_edge_capture() & self.width;
                match policy {
                    EdgeClearPolicy::WriteOneToClear => self.clear_edges(residual & bits),
                    EdgeClearPolicy::WriteAny => {
                        if residual & bits != 0 {
                            self.pending |= residual & !bits;
                            self.clear_edges(residual);
                        }
                    }
                    EdgeClearPolicy::ClearOnRead => self.pending |= residual & !bits,
                }
            }
            EdgeDetection::Compare(_) => {
                self.previous = (self.previous & !bits) | (self.level() & bits);
            }
        }
    }

    /// Stops `bit` from raising interrupts.
    pub fn mask_bit(&mut self, bit: u8) {
        self.irq_mask &= !bit_mask(bit);
        self.port.write_irq_mask(self.irq_mask);
    }

    /// Lets `bit` raise interrupts again.
    pub fn unmask_bit(&mut self, bit: u8) {
        self.irq_mask |= bit_mask(bit) & self.width;
        self.port.write_irq_mask(self.irq_mask);
    }

    /// Bits currently enabled to raise interrupts.
    pub fn irq_mask(&self) -> u32 {
        self.irq_mask
    }

    /// Returns the edge detection strategy.
    pub fn detection(&self) -> EdgeDetection {
        self.detection
    }

    /// Returns a reference to the underlying port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Returns a mutable reference to the underlying port.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    fn clear_edges(&mut self, bits: u32) {
        let EdgeDetection::Latched(policy) = self.detection else {
            return;
        };
        match policy {
            EdgeClearPolicy::WriteOneToClear => {
                if bits != 0 {
                    self.port.write_edge_capture(bits);
                }
            }
            EdgeClearPolicy::WriteAny => self.port.write_edge_capture(bits),
            EdgeClearPolicy::ClearOnRead => {
                let _ = self.port.read_edge_capture();
            }
        }
    }
}

/// Single-bit mask for `bit`, or 0 if it does not fit a `u32`.
#[inline]
pub(crate) fn bit_mask(bit: u8) -> u32 {
    1u32.checked_shl(bit as u32).unwrap_or(0)
}
