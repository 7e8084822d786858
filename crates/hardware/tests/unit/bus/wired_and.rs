//! # Wired-AND Line Tests
//!
//! Checks that the observed level is always the AND of the enabled slots.

use proptest::prelude::*;
use retrobus_core::bus::WiredBus;

#[test]
fn test_single_writer_with_idle_peer() {
    let mut bus = WiredBus::new();
    let a = bus.attach("a");
    let _b = bus.attach("b");
    bus.write(a, 0x0F);
    assert_eq!(bus.read(), 0x0F);
}

#[test]
fn test_undump_is_visible_immediately() {
    let mut bus = WiredBus::new();
    let d = bus.attach("drive8");
    bus.undump(d, 0x3C);
    assert_eq!(bus.read(), 0x3C);
    assert_eq!(bus.name(d), Some("drive8"));
}

proptest! {
    #[test]
    fn test_read_is_and_of_enabled_slots(
        writes in proptest::collection::vec((any::<u8>(), any::<bool>()), 0..6)
    ) {
        let mut bus = WiredBus::new();
        let mut expected = 0xFFu8;
        for (i, &(value, enabled)) in writes.iter().enumerate() {
            let id = bus.attach(format!("d{i}"));
            bus.write(id, value);
            bus.set_enabled(id, enabled);
            if enabled {
                expected &= value;
            }
        }
        prop_assert_eq!(bus.read(), expected);
    }

    #[test]
    fn test_read_never_sets_a_bit_some_driver_clears(a in any::<u8>(), b in any::<u8>()) {
        let mut bus = WiredBus::new();
        let da = bus.attach("a");
        let db = bus.attach("b");
        bus.write(da, a);
        bus.write(db, b);
        prop_assert_eq!(bus.read() & !a, 0);
        prop_assert_eq!(bus.read() & !b, 0);
    }
}
