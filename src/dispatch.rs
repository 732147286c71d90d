//! Interrupt dispatch and the clock runtime.
//!
//! Provides [`Clock`], which owns the clock state together with the timer,
//! both input blocks, the display and the configured edge adjusters, and
//! routes [`Event`]s to them. The trap handler feeds raw cause codes into
//! [`Clock::handle_interrupt`]; tests inject synthetic events through
//! [`Clock::dispatch`].

use heapless::Vec;

use crate::adjuster::{EdgeAdjuster, EdgeOutcome};
use crate::clock::{ClockState, TimeoutAccumulator};
use crate::config::ClockConfig;
use crate::display::{SegmentDisplay, render};
use crate::log::{debug, trace};
use crate::pio::{BUTTON_BITS, InputBlock, InputPort, SWITCH_BITS, bit_mask};
use crate::regs::cause;
use crate::setter::SetCommand;
use crate::time::{Sleep, TimeDuration};
use crate::timer::{TimerBlock, TimerPort};
use crate::types::{ClockError, Direction, InputSource};

/// Button that enables setting the time from the switches.
const TIME_SET_BUTTON: u8 = 0;

/// Peripheral that raised an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptCause {
    /// Interval timer timeout.
    Timer,
    /// Edge on the switch block.
    Switches,
    /// Edge on the button block.
    Buttons,
}

impl InterruptCause {
    /// Maps a trap cause code. Returns `None` for causes the clock does
    /// not handle.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            cause::TIMER => Some(InterruptCause::Timer),
            cause::SWITCHES => Some(InterruptCause::Switches),
            cause::BUTTONS => Some(InterruptCause::Buttons),
            _ => None,
        }
    }

    /// Returns the trap cause code of this peripheral.
    pub fn code(self) -> u32 {
        match self {
            InterruptCause::Timer => cause::TIMER,
            InterruptCause::Switches => cause::SWITCHES,
            InterruptCause::Buttons => cause::BUTTONS,
        }
    }
}

/// Something that happened to the clock's peripherals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The interval timer timed out (already acknowledged).
    TimerExpired,

    /// Edges were observed on an input block.
    EdgeDetected { source: InputSource, bits: u32 },
}

/// How an event changed the clock. Every variant means the display was
/// redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockUpdate {
    /// One second elapsed.
    Ticked,

    /// An edge adjuster moved the clock.
    Adjusted {
        source: InputSource,
        direction: Direction,
        seconds: u16,
    },

    /// A field was set from the switches. Reported instead of `Ticked` when
    /// the same timeout also completed a second.
    Set(SetCommand),
}

/// The interrupt-driven clock.
///
/// # Type Parameters
/// * `'z` - Lifetime of the sleep source reference
/// * `T` - Timer port
/// * `P` - Input port type of both the switch and the button block
/// * `S` - Display implementation
/// * `Z` - Sleep implementation used for debounce
/// * `D` - Duration type of debounce intervals
/// * `N` - Maximum number of edge adjusters
pub struct Clock<'z, T, P, S, Z, D, const N: usize>
where
    T: TimerPort,
    P: InputPort,
    S: SegmentDisplay,
    Z: Sleep<D>,
    D: TimeDuration,
{
    state: ClockState,
    accumulator: TimeoutAccumulator,
    timer: TimerBlock<T>,
    switches: InputBlock<P>,
    buttons: InputBlock<P>,
    display: S,
    sleep: &'z Z,
    adjusters: Vec<EdgeAdjuster<D>, N>,
    timer_period_cycles: u32,
    tick_direction: Direction,
    time_set_polling: bool,
}

impl<'z, T, P, S, Z, D, const N: usize> Clock<'z, T, P, S, Z, D, N>
where
    T: TimerPort,
    P: InputPort,
    S: SegmentDisplay,
    Z: Sleep<D>,
    D: TimeDuration,
{
    /// Creates a clock. Nothing is written to the hardware until
    /// [`init`](Self::init).
    ///
    /// # Errors
    /// * `InvalidTimerConfig` - zero timer period or zero timeouts per second
    pub fn new(
        config: ClockConfig,
        timer: T,
        switches: P,
        buttons: P,
        display: S,
        sleep: &'z Z,
    ) -> Result<Self, ClockError> {
        if config.timer_period_cycles == 0 {
            return Err(ClockError::InvalidTimerConfig);
        }
        let accumulator = TimeoutAccumulator::new(config.timeouts_per_second)?;

        Ok(Self {
            state: config.initial,
            accumulator,
            timer: TimerBlock::new(timer),
            switches: InputBlock::new(switches, config.switch_detection, SWITCH_BITS),
            buttons: InputBlock::new(buttons, config.button_detection, BUTTON_BITS),
            display,
            sleep,
            adjusters: Vec::new(),
            timer_period_cycles: config.timer_period_cycles,
            tick_direction: config.tick_direction,
            time_set_polling: config.time_set_polling,
        })
    }

    /// Registers an edge adjuster. Must be called before [`init`](Self::init)
    /// so its bit gets enabled.
    ///
    /// # Errors
    /// * `CapacityExceeded` - already `N` adjusters
    pub fn add_adjuster(&mut self, adjuster: EdgeAdjuster<D>) -> Result<(), ClockError> {
        self.adjusters
            .push(adjuster)
            .map_err(|_| ClockError::CapacityExceeded)
    }

    /// Brings up the hardware in a race-free order: starts the timer,
    /// configures both input blocks with stale edges cleared and only the
    /// adjusters' bits enabled, snapshots the input levels, draws the
    /// initial time, and only then calls `enable_interrupts`.
    ///
    /// # Errors
    /// * `InvalidTimerConfig` - the timer rejected its period
    pub fn init(&mut self, enable_interrupts: impl FnOnce()) -> Result<(), ClockError> {
        self.timer.configure(self.timer_period_cycles)?;

        let switch_mask = self.irq_mask(InputSource::Switches);
        let button_mask = self.irq_mask(InputSource::Buttons);
        self.switches.init(switch_mask);
        self.buttons.init(button_mask);

        render(&mut self.display, &self.state);
        debug!(
            "clock initialized, switch mask {=u32:b}, button mask {=u32:b}",
            switch_mask, button_mask
        );

        enable_interrupts();
        Ok(())
    }

    /// Services one interrupt given its cause code.
    ///
    /// Acknowledges the timer or samples the input block's edges, then
    /// dispatches the resulting event. Unknown causes and spurious timer
    /// interrupts are ignored.
    pub fn handle_interrupt(&mut self, code: u32) -> Option<ClockUpdate> {
        let event = match InterruptCause::from_code(code)? {
            InterruptCause::Timer => {
                if !self.timer.take_pending() {
                    return None;
                }
                Event::TimerExpired
            }
            InterruptCause::Switches => Event::EdgeDetected {
                source: InputSource::Switches,
                bits: self.switches.sample(),
            },
            InterruptCause::Buttons => Event::EdgeDetected {
                source: InputSource::Buttons,
                bits: self.buttons.sample(),
            },
        };
        self.dispatch(event)
    }

    /// Applies one event.
    ///
    /// # Returns
    /// * `Some(update)` - the clock changed and was redrawn
    /// * `None` - a sub-second timeout was counted, or the edges were ignored
    pub fn dispatch(&mut self, event: Event) -> Option<ClockUpdate> {
        match event {
            Event::TimerExpired => self.on_timeout(),
            Event::EdgeDetected { source, bits } => self.on_edges(source, bits),
        }
    }

    fn on_timeout(&mut self) -> Option<ClockUpdate> {
        let mut update = None;

        if self.time_set_polling && self.buttons.is_active(TIME_SET_BUTTON) {
            if let Some(command) = SetCommand::decode(self.switches.level()) {
                if command.apply(&mut self.state) {
                    update = Some(ClockUpdate::Set(command));
                }
            }
        }

        if self.accumulator.on_timeout() {
            self.state.step(self.tick_direction);
            trace!("second elapsed");
            update = update.or(Some(ClockUpdate::Ticked));
        }

        if update.is_some() {
            render(&mut self.display, &self.state);
        }
        update
    }

    fn on_edges(&mut self, source: InputSource, bits: u32) -> Option<ClockUpdate> {
        let block = match source {
            InputSource::Switches => &mut self.switches,
            InputSource::Buttons => &mut self.buttons,
        };

        let mut update = None;
        let mut claimed = false;
        for adjuster in self.adjusters.iter().filter(|a| a.matches(source, bits)) {
            claimed = true;
            let outcome = adjuster.on_edge(
                bits,
                block,
                &mut self.state,
                &mut self.display,
                self.sleep,
            );
            if let EdgeOutcome::Adjusted { direction, seconds } = outcome {
                update = Some(ClockUpdate::Adjusted {
                    source,
                    direction,
                    seconds,
                });
            }
        }

        if !claimed {
            block.acknowledge(bits);
            debug!("no adjuster for edges {=u32:b}", bits);
        }
        update
    }

    fn irq_mask(&self, source: InputSource) -> u32 {
        self.adjusters
            .iter()
            .filter(|a| a.source() == source)
            .fold(0, |mask, a| mask | bit_mask(a.bit()))
    }

    /// Returns the current time of day.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Returns the sub-second timeout counter.
    pub fn accumulator(&self) -> &TimeoutAccumulator {
        &self.accumulator
    }

    /// Returns the registered edge adjusters.
    pub fn adjusters(&self) -> &[EdgeAdjuster<D>] {
        &self.adjusters
    }

    /// Returns a reference to the display.
    pub fn display(&self) -> &S {
        &self.display
    }

    /// Returns a reference to the timer block.
    pub fn timer(&self) -> &TimerBlock<T> {
        &self.timer
    }

    /// Returns a mutable reference to the timer block.
    pub fn timer_mut(&mut self) -> &mut TimerBlock<T> {
        &mut self.timer
    }

    /// Returns a reference to the switch block.
    pub fn switches(&self) -> &InputBlock<P> {
        &self.switches
    }

    /// Returns a mutable reference to the switch block.
    pub fn switches_mut(&mut self) -> &mut InputBlock<P> {
        &mut self.switches
    }

    /// Returns a reference to the button block.
    pub fn buttons(&self) -> &InputBlock<P> {
        &self.buttons
    }

    /// Returns a mutable reference to the button block.
    pub fn buttons_mut(&mut self) -> &mut InputBlock<P> {
        &mut self.buttons
    }
}
