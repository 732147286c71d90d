#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`BcdTime`**: Minutes and seconds packed as four BCD digits, with the one-second `Tick` engine
//! - **`ClockState`**: `BcdTime` plus the hour counter; the only thing interrupts mutate
//! - **`TimeoutAccumulator`**: Turns sub-second timer timeouts into one-second ticks
//! - **`EdgeAdjuster`**: Moves the clock by a fixed number of seconds per switch or button edge, debounced
//! - **`Clock`**: Owns everything and dispatches `Event`s from the interrupt handler
//! - **`TimerPort`** / **`InputPort`** / **`SegmentDisplay`**: Traits to implement for your hardware
//! - **`Sleep`**: Trait to implement for your delay primitive
//!
//! The library never touches memory-mapped registers itself. The `regs` module
//! documents the lab board's memory map for implementing the port traits.

mod log;

pub mod adjuster;
pub mod bcd;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod display;
pub mod pio;
pub mod regs;
pub mod segment;
pub mod setter;
pub mod shared;
pub mod time;
pub mod timer;
pub mod types;

pub use adjuster::{AdjusterBuilder, EdgeAdjuster, EdgeOutcome};
pub use bcd::{BcdTime, Tick};
pub use clock::{ClockState, TimeoutAccumulator};
pub use config::ClockConfig;
pub use dispatch::{Clock, ClockUpdate, Event, InterruptCause};
pub use display::{DisplayPosition, SegmentDisplay, render};
pub use pio::{EdgeClearPolicy, EdgeDetection, InputBlock, InputPort, Trigger};
pub use segment::{SEGMENTS_OFF, encode};
pub use setter::SetCommand;
pub use shared::SharedClockState;
pub use time::{Millis, Sleep, TimeDuration};
pub use timer::{TimerBlock, TimerPort};
pub use types::{ClockError, Direction, InputSource};
