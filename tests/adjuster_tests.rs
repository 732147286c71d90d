//! Integration tests for EdgeAdjuster

mod common;
use common::*;

use bcd_clock::{
    BcdTime, ClockState, Direction, EdgeAdjuster, EdgeClearPolicy, EdgeDetection, EdgeOutcome,
    InputBlock, InputSource, Trigger,
};
use bcd_clock::pio::{BUTTON_BITS, SWITCH_BITS};

fn switch_block(policy: EdgeClearPolicy, irq_mask: u32) -> (InputBlock<MockPio>, PioHandle) {
    let pio = MockPio::new(policy);
    let handle = pio.handle();
    let mut block = InputBlock::new(pio, EdgeDetection::Latched(policy), SWITCH_BITS);
    block.init(irq_mask);
    (block, handle)
}

#[test]
fn edge_on_watched_bit_ticks_three_times_and_renders_once() {
    let (mut block, pio) = switch_block(EdgeClearPolicy::WriteOneToClear, 0b10);
    let sleep = MockSleep::new();
    let mut display = MockDisplay::new();
    let mut state = ClockState::new(BcdTime::new(0x1000).unwrap(), 0).unwrap();
    let adjuster = EdgeAdjuster::switch_increment(1, 3, TestDuration(10)).unwrap();

    pio.borrow_mut().press(0b10);
    let bits = block.sample();
    let outcome = adjuster.on_edge(bits, &mut block, &mut state, &mut display, &sleep);

    assert_eq!(
        outcome,
        EdgeOutcome::Adjusted {
            direction: Direction::Forward,
            seconds: 3
        }
    );
    assert_eq!(state.time().raw(), 0x1003);
    assert_eq!(display.renders(), 1);
    assert_eq!(display.text(), "00:10:03");
    assert_eq!(pio.borrow().edges, 0);
}

#[test]
fn edge_on_another_bit_is_acknowledged_without_effect() {
    let (mut block, pio) = switch_block(EdgeClearPolicy::WriteOneToClear, 0b10);
    let sleep = MockSleep::new();
    let mut display = MockDisplay::new();
    let mut state = ClockState::POWER_ON;
    let adjuster = EdgeAdjuster::switch_increment(1, 3, TestDuration(10)).unwrap();

    pio.borrow_mut().press(0b01);
    let bits = block.sample();
    let outcome = adjuster.on_edge(bits, &mut block, &mut state, &mut display, &sleep);

    assert_eq!(outcome, EdgeOutcome::Ignored);
    assert_eq!(state, ClockState::POWER_ON);
    assert_eq!(display.renders(), 0);
    assert_eq!(sleep.calls(), 0);
    assert_eq!(pio.borrow().edges, 0);
    assert_eq!(pio.borrow().irq_mask, 0b10);
}

#[test]
fn watched_bit_is_masked_during_debounce_then_unmasked() {
    let (mut block, pio) = switch_block(EdgeClearPolicy::WriteOneToClear, 0b110);
    let sleep = MockSleep::new();
    let mut display = MockDisplay::new();
    let mut state = ClockState::POWER_ON;
    let adjuster = EdgeAdjuster::switch_increment(1, 2, TestDuration(10)).unwrap();

    pio.borrow_mut().press(0b10);
    let bits = block.sample();
    adjuster.on_edge(bits, &mut block, &mut state, &mut display, &sleep);

    assert_eq!(pio.borrow().irq_mask_history.as_slice(), &[0b110, 0b100, 0b110]);
    assert_eq!(sleep.total_millis(), 10);
}

#[test]
fn bounce_during_debounce_is_drained() {
    let (mut block, pio) = switch_block(EdgeClearPolicy::WriteOneToClear, 0b10);
    let sleep = MockSleep::new();
    let mut display = MockDisplay::new();
    let mut state = ClockState::new(BcdTime::MIN, 0).unwrap();
    let adjuster = EdgeAdjuster::switch_increment(1, 3, TestDuration(10)).unwrap();

    pio.borrow_mut().press(0b10);
    sleep.bounce_on_next_sleep(pio.clone(), 0b10);
    let bits = block.sample();
    adjuster.on_edge(bits, &mut block, &mut state, &mut display, &sleep);

    // The bounce edge must not trigger a second adjustment
    assert_eq!(pio.borrow().edges, 0);
    assert_eq!(block.sample(), 0);
    assert_eq!(state.time().raw(), 0x0003);
}

#[test]
fn decrement_preset_rewinds_across_the_hour() {
    let (mut block, pio) = switch_block(EdgeClearPolicy::WriteOneToClear, 0b10);
    let sleep = MockSleep::new();
    let mut display = MockDisplay::new();
    let mut state = ClockState::new(BcdTime::new(0x0001).unwrap(), 0).unwrap();
    let adjuster = EdgeAdjuster::switch_decrement(1, 3, TestDuration(10)).unwrap();

    pio.borrow_mut().press(0b10);
    let bits = block.sample();
    adjuster.on_edge(bits, &mut block, &mut state, &mut display, &sleep);

    assert_eq!(state.time().raw(), 0x5958);
    assert_eq!(state.hours(), 23);
    assert_eq!(display.text(), "23:59:58");
}

#[test]
fn release_wait_polls_until_the_button_lets_go() {
    let pio = MockPio::new(EdgeClearPolicy::WriteOneToClear);
    let handle = pio.handle();
    let mut block = InputBlock::new(pio, EdgeDetection::default(), BUTTON_BITS);
    block.init(0b1);

    let sleep = MockSleep::new();
    let mut display = MockDisplay::new();
    let mut state = ClockState::POWER_ON;
    let adjuster =
        EdgeAdjuster::button_increment_with_release(0, 3, TestDuration(10), TestDuration(1))
            .unwrap();
    assert_eq!(adjuster.source(), InputSource::Buttons);

    {
        let mut regs = handle.borrow_mut();
        regs.press(0b1);
        // Held for three more level reads, then released
        regs.release_after = 3;
    }
    let bits = block.sample();
    adjuster.on_edge(bits, &mut block, &mut state, &mut display, &sleep);

    // One debounce wait plus one poll per held read
    assert_eq!(sleep.calls(), 1 + 3);
    assert_eq!(sleep.total_millis(), 10 + 3);
    assert_eq!(handle.borrow().irq_mask, 0b1);
    assert_eq!(state.time().raw(), 0x0000);
    assert_eq!(state.hours(), 1);
}

#[test]
fn software_compare_detects_rising_switch_edge() {
    let pio = MockPio::new(EdgeClearPolicy::WriteOneToClear);
    let handle = pio.handle();
    let mut block = InputBlock::new(pio, EdgeDetection::Compare(Trigger::Rising), SWITCH_BITS);
    block.init(0b100);

    let sleep = MockSleep::new();
    let mut display = MockDisplay::new();
    let mut state = ClockState::new(BcdTime::MIN, 0).unwrap();
    let adjuster = EdgeAdjuster::switch_increment(2, 2, TestDuration(10)).unwrap();

    handle.borrow_mut().data = 0b100;
    let bits = block.sample();
    adjuster.on_edge(bits, &mut block, &mut state, &mut display, &sleep);
    assert_eq!(state.time().raw(), 0x0002);

    // Switching back off is a falling edge and does nothing
    handle.borrow_mut().data = 0;
    let bits = block.sample();
    let outcome = adjuster.on_edge(bits, &mut block, &mut state, &mut display, &sleep);
    assert_eq!(outcome, EdgeOutcome::Ignored);
    assert_eq!(state.time().raw(), 0x0002);
    assert_eq!(handle.borrow().capture_writes, 0);
}

#[test]
fn write_any_policy_clears_all_edges() {
    let (mut block, pio) = switch_block(EdgeClearPolicy::WriteAny, 0b10);
    let sleep = MockSleep::new();
    let mut display = MockDisplay::new();
    let mut state = ClockState::POWER_ON;
    let adjuster = EdgeAdjuster::switch_increment(1, 1, TestDuration(10)).unwrap();

    pio.borrow_mut().press(0b11);
    let bits = block.sample();
    adjuster.on_edge(bits, &mut block, &mut state, &mut display, &sleep);

    assert_eq!(pio.borrow().edges, 0);
    assert_eq!(state.time().raw(), 0x5958);
}

#[test]
fn clear_on_read_policy_never_writes_edges() {
    let (mut block, pio) = switch_block(EdgeClearPolicy::ClearOnRead, 0b10);
    let sleep = MockSleep::new();
    let mut display = MockDisplay::new();
    let mut state = ClockState::POWER_ON;
    let adjuster = EdgeAdjuster::switch_increment(1, 1, TestDuration(10)).unwrap();

    pio.borrow_mut().press(0b10);
    sleep.bounce_on_next_sleep(pio.clone(), 0b10);
    let bits = block.sample();
    adjuster.on_edge(bits, &mut block, &mut state, &mut display, &sleep);

    assert_eq!(pio.borrow().capture_writes, 0);
    assert_eq!(pio.borrow().edges, 0);
    assert_eq!(state.time().raw(), 0x5958);
}
