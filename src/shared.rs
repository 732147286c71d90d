//! Interrupt-safe sharing of the clock state.
//!
//! Interrupt handlers own the [`Clock`](crate::Clock) and publish its state
//! after every change; a background loop reads it without tearing. Every
//! access runs inside a `critical_section`, which is what a preemptive or
//! multi-core target needs around the read-modify-write of the time.

use core::cell::Cell;
use critical_section::Mutex;

use crate::clock::ClockState;
use crate::types::Direction;

/// A [`ClockState`] that can live in a `static`.
pub struct SharedClockState {
    state: Mutex<Cell<ClockState>>,
}

impl SharedClockState {
    /// Creates a shared state, usable in a `static` initializer.
    pub const fn new(state: ClockState) -> Self {
        Self {
            state: Mutex::new(Cell::new(state)),
        }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> ClockState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    /// Replaces the state.
    pub fn publish(&self, state: ClockState) {
        critical_section::with(|cs| self.state.borrow(cs).set(state));
    }

    /// Runs `f` on the state as one atomic read-modify-write.
    pub fn update<R>(&self, f: impl FnOnce(&mut ClockState) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            let result = f(&mut state);
            cell.set(state);
            result
        })
    }

    /// Moves the shared clock by `seconds` inside one critical section.
    pub fn adjust(&self, direction: Direction, seconds: u16) {
        self.update(|state| state.adjust(direction, seconds));
    }
}
