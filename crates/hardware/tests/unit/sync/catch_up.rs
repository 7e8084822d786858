//! # Catch-Up Tests
//!
//! Exercises `DomainSync::catch_up_all` directly against a bare line.

use crate::common::mocks::domain::{MockTracked, TrackedDomain};
use mockall::Sequence;
use mockall::predicate::eq;
use retrobus_core::bus::WiredBus;
use retrobus_core::common::Cycle;
use retrobus_core::sync::DomainSync;

#[test]
fn test_no_domains_is_a_no_op() {
    let mut bus = WiredBus::new();
    let mut sync = DomainSync::new();
    let outcome = sync.catch_up_all(Cycle(1_000), &mut bus);
    assert_eq!(outcome.advanced, 0);
    assert!(!sync.any_enabled());
    assert!(sync.is_empty());
}

#[test]
fn test_only_enabled_domains_execute() {
    let mut on = MockTracked::new();
    let _ = on
        .expect_execute_until()
        .with(eq(Cycle(10)))
        .times(1)
        .return_const(());
    let mut off = MockTracked::new();
    let _ = off.expect_execute_until().never();

    let mut bus = WiredBus::new();
    let mut sync = DomainSync::new();
    let (on, on_mock) = TrackedDomain::new(on, "on");
    let (off, off_mock) = TrackedDomain::new(off, "off");
    let on_id = bus.attach("on");
    let off_id = bus.attach("off");
    sync.add(Box::new(on), on_id);
    sync.add(Box::new(off.disabled()), off_id);

    let outcome = sync.catch_up_all(Cycle(10), &mut bus);
    assert_eq!(outcome.advanced, 1);
    assert_eq!(outcome.target, Cycle(10));
    on_mock.lock().unwrap().checkpoint();
    off_mock.lock().unwrap().checkpoint();
}

#[test]
fn test_domains_advance_in_attach_order_with_increasing_targets() {
    let mut seq = Sequence::new();
    let mut mock = MockTracked::new();
    for target in [5, 9, 30] {
        let _ = mock
            .expect_execute_until()
            .with(eq(Cycle(target)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
    }

    let mut bus = WiredBus::new();
    let mut sync = DomainSync::new();
    let (domain, mock) = TrackedDomain::new(mock, "tracked");
    let id = bus.attach("tracked");
    sync.add(Box::new(domain), id);

    for target in [5, 5, 9, 3, 30] {
        let _ = sync.catch_up_all(Cycle(target), &mut bus);
    }
    mock.lock().unwrap().checkpoint();
}

#[test]
fn test_domain_writes_only_its_own_slot() {
    let mock = {
        let mut p = MockTracked::new();
        let _ = p.expect_execute_until().return_const(());
        p
    };
    let mut bus = WiredBus::new();
    let host = bus.attach("host");
    bus.write(host, 0xF0);
    let mut sync = DomainSync::new();
    let (domain, _mock) = TrackedDomain::new(mock, "tracked");
    let id = bus.attach("tracked");
    sync.add(Box::new(domain.driving(0x0F)), id);

    let _ = sync.catch_up_all(Cycle(1), &mut bus);
    assert_eq!(bus.slot(host), 0xF0);
    assert_eq!(bus.slot(id), 0x0F);
    assert_eq!(bus.read(), 0x00);
}
