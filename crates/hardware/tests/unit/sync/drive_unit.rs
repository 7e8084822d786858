//! # Drive Unit Tests
//!
//! Clock conversion between the drive's own cycles and host cycles.

use retrobus_core::bus::WiredBus;
use retrobus_core::common::constants::{DRIVE_HZ, PAL_HOST_HZ};
use retrobus_core::common::{ClockRatio, Cycle};
use retrobus_core::sync::{ClockDomain, DriveCpu, DriveOp, DriveUnit, ScriptedCpu};

fn create_test_drive(program: Vec<DriveOp>) -> DriveUnit {
    DriveUnit::new(
        8,
        ClockRatio::new(DRIVE_HZ, PAL_HOST_HZ),
        Box::new(ScriptedCpu::new(program)),
    )
}

#[test]
fn test_execute_until_reaches_but_does_not_stop_short_of_target() {
    let mut bus = WiredBus::new();
    let id = bus.attach("drive8");
    let mut drive = create_test_drive(vec![DriveOp::Idle(7)]);
    for target in [1u64, 100, 985_248, 1_000_000] {
        drive.execute_until(Cycle(target), &mut bus.writer(id));
        assert!(drive.clock() >= Cycle(target));
    }
}

#[test]
fn test_a_second_of_host_time_is_a_second_of_drive_time() {
    let mut bus = WiredBus::new();
    let id = bus.attach("drive8");
    let mut drive = create_test_drive(vec![]);
    drive.execute_until(Cycle(PAL_HOST_HZ), &mut bus.writer(id));
    assert_eq!(drive.own_cycles(), DRIVE_HZ);
    assert_eq!(drive.name(), "drive8");
    assert_eq!(drive.unit(), 8);
}

#[test]
fn test_zero_cycle_steps_still_make_progress() {
    struct Stalled;
    impl DriveCpu for Stalled {
        fn step(&mut self, _port: &mut retrobus_core::bus::SlotWriter<'_>) -> u32 {
            0
        }
    }

    let mut bus = WiredBus::new();
    let id = bus.attach("drive8");
    let mut drive = DriveUnit::new(8, ClockRatio::UNITY, Box::new(Stalled));
    drive.execute_until(Cycle(3), &mut bus.writer(id));
    assert_eq!(drive.own_cycles(), 3);
}

#[test]
fn test_scripted_cpu_parses_from_json() {
    let ops: Vec<DriveOp> = serde_json::from_str(r#"[{"write": 255}, {"idle": 12}]"#).unwrap();
    assert_eq!(ops, vec![DriveOp::Write(0xFF), DriveOp::Idle(12)]);
}

#[test]
fn test_clock_saturates_instead_of_overflowing() {
    let mut bus = WiredBus::new();
    let id = bus.attach("drive8");
    let mut drive = DriveUnit::new(
        8,
        ClockRatio::UNITY,
        Box::new(ScriptedCpu::new(vec![DriveOp::Idle(100)])),
    );
    drive.set_enabled(false, Cycle::ZERO);
    drive.set_enabled(true, Cycle(u64::MAX - 2));
    drive.execute_until(Cycle(u64::MAX), &mut bus.writer(id));
    assert_eq!(drive.own_cycles(), u64::MAX);
    assert_eq!(drive.clock(), Cycle(u64::MAX));
}

#[test]
fn test_saturated_slower_host_clock_still_returns() {
    let mut bus = WiredBus::new();
    let id = bus.attach("drive8");
    let mut drive = create_test_drive(vec![DriveOp::Idle(100)]);
    drive.set_enabled(false, Cycle::ZERO);
    drive.set_enabled(true, Cycle(u64::MAX - 2));
    // The drive's counter cannot represent this host cycle; execution stops at the cap.
    drive.execute_until(Cycle(u64::MAX), &mut bus.writer(id));
    assert_eq!(drive.own_cycles(), u64::MAX);
    assert!(drive.clock() < Cycle(u64::MAX));
}
