//! # SNES Pad Protocol Tests
//!
//! Shift sequencing, report order, output encoding and state restore.

use crate::common::mocks::input::{MockSampler, sampler_with};
use mockall::predicate::eq;
use proptest::prelude::*;
use retrobus_core::common::SnapshotError;
use retrobus_core::common::constants::{PB_CLOCK, PB_DATA, PB_LATCH};
use retrobus_core::input::{JoyPort, buttons};
use retrobus_core::port::UserportDevice;
use retrobus_core::port::devices::SnesPad;
use retrobus_core::port::devices::snespad::{EOS, REPORT_ORDER};
use retrobus_core::snapshot::ModuleBlob;
use rstest::rstest;

fn pulse_clock(pad: &mut SnesPad) {
    pad.store_pbx(PB_CLOCK);
    pad.store_pbx(0);
}

fn create_test_pad_at(counter: u8) -> SnesPad {
    let mut pad = SnesPad::new();
    pad.store_pbx(PB_LATCH);
    pad.store_pbx(0);
    for _ in 0..counter {
        pulse_clock(&mut pad);
    }
    pad
}

#[test]
fn test_shift_sequencing_saturates_at_eos() {
    let mut pad = SnesPad::new();
    pad.store_pbx(0);
    pad.store_pbx(PB_LATCH);
    pad.store_pbx(0);
    assert_eq!(pad.counter(), 0);

    for expected in 1..=EOS {
        pulse_clock(&mut pad);
        assert_eq!(pad.counter(), expected);
    }
    pulse_clock(&mut pad);
    assert_eq!(pad.counter(), EOS);
}

#[test]
fn test_latch_falling_edge_restarts_the_report() {
    let mut pad = create_test_pad_at(7);
    pad.store_pbx(PB_LATCH);
    assert_eq!(pad.counter(), 7);
    pad.store_pbx(0);
    assert_eq!(pad.counter(), 0);
}

#[test]
fn test_holding_lines_high_does_not_advance() {
    let mut pad = SnesPad::new();
    for _ in 0..5 {
        pad.store_pbx(PB_CLOCK | PB_LATCH);
    }
    assert_eq!(pad.counter(), 0);
    assert!(pad.clock_line());
    assert!(pad.latch_line());
}

#[test]
fn test_up_pressed_clears_only_the_data_bit() {
    let mut pad = create_test_pad_at(4);
    let out = pad.read_pbx(&sampler_with(buttons::UP));
    assert_eq!(out.value, 0xFF & !PB_DATA);
    assert_eq!(out.value, 0xBF);
    assert_eq!(out.mask, 0xFF);
}

#[test]
fn test_released_button_reads_all_ones() {
    let mut pad = create_test_pad_at(4);
    assert_eq!(pad.read_pbx(&sampler_with(!buttons::UP)).value, 0xFF);
}

#[test]
fn test_input_is_sampled_from_the_first_userport_joystick() {
    let mut sampler = MockSampler::new();
    let _ = sampler
        .expect_sample_word()
        .with(eq(JoyPort::Userport1))
        .times(1)
        .return_const(buttons::B);
    let mut pad = SnesPad::new();
    assert_eq!(pad.read_pbx(&sampler).value, 0xBF);
}

#[rstest]
#[case(0, buttons::B)]
#[case(1, buttons::Y)]
#[case(2, buttons::SELECT)]
#[case(3, buttons::START)]
#[case(4, buttons::UP)]
#[case(5, buttons::DOWN)]
#[case(6, buttons::LEFT)]
#[case(7, buttons::RIGHT)]
#[case(8, buttons::A)]
#[case(9, buttons::X)]
#[case(10, buttons::L)]
#[case(11, buttons::R)]
fn test_report_order(#[case] counter: u8, #[case] button: u16) {
    assert_eq!(REPORT_ORDER[usize::from(counter)], button);
    let pad = create_test_pad_at(counter);
    assert_eq!(pad.data_bit(button), 1);
    assert_eq!(pad.data_bit(!button), 0);
    assert_eq!(pad.output(button), 0xBF);
}

#[rstest]
#[case(0)]
#[case(0x0FFF)]
fn test_end_of_stream_ignores_input(#[case] word: u16) {
    let pad = create_test_pad_at(EOS);
    assert_eq!(pad.data_bit(word), 1);
    assert_eq!(pad.output(word), 0xBF);
}

#[test]
fn test_reset_returns_to_power_on() {
    let mut pad = create_test_pad_at(5);
    pad.store_pbx(PB_CLOCK);
    pad.reset();
    assert_eq!(pad, SnesPad::new());
}

#[test]
fn test_restore_assigns_state_without_replaying_edges() {
    let mut pad = SnesPad::new();
    let blob = ModuleBlob::new("USERPORT_SNESPAD", 0, 1, vec![9, 1, 0]);
    pad.restore(&blob).unwrap();
    assert_eq!(pad.counter(), 9);
    assert!(pad.clock_line());
    assert!(!pad.latch_line());
    assert_eq!(pad.snapshot(), Some(blob));
}

#[test]
fn test_restore_clamps_out_of_range_counter() {
    let mut pad = SnesPad::new();
    pad.restore(&ModuleBlob::new("USERPORT_SNESPAD", 0, 1, vec![200, 0, 0]))
        .unwrap();
    assert_eq!(pad.counter(), EOS);
}

#[test]
fn test_restore_rejects_truncated_blob() {
    let mut pad = create_test_pad_at(3);
    let err = pad
        .restore(&ModuleBlob::new("USERPORT_SNESPAD", 0, 1, vec![1]))
        .unwrap_err();
    assert!(matches!(err, SnapshotError::Truncated { expected: 3, found: 1, .. }));
    assert_eq!(pad.counter(), 3);
}

proptest! {
    #[test]
    fn test_counter_never_exceeds_eos(stores in proptest::collection::vec(any::<u8>(), 0..200)) {
        let mut pad = SnesPad::new();
        for value in stores {
            let before = pad.counter();
            let latch_fall = pad.latch_line() && value & PB_LATCH == 0;
            pad.store_pbx(value);
            prop_assert!(pad.counter() <= EOS);
            if !latch_fall {
                prop_assert!(pad.counter() >= before);
            }
        }
    }

    #[test]
    fn test_only_the_data_bit_is_ever_driven_low(counter in 0..=EOS, word in any::<u16>()) {
        let pad = create_test_pad_at(counter);
        prop_assert_eq!(pad.output(word) | PB_DATA, 0xFF);
    }
}
