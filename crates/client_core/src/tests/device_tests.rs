use super::*;

#[test]
fn initial_capabilities_follow_the_breakpoint() {
    assert!(DeviceSignals::new(390, false).current().is_mobile);
    assert!(!DeviceSignals::new(1_280, false).current().is_mobile);
    assert!(DeviceSignals::new(1_920, true).current().prefers_reduced_motion);
}

#[test]
fn resizes_within_a_layout_are_not_republished() {
    let signals = DeviceSignals::new(1_920, false);
    let mut rx = signals.subscribe();

    assert!(!signals.set_viewport_width(1_440));
    assert!(!rx.has_changed().unwrap_or(true));

    assert!(signals.set_viewport_width(800));
    assert!(rx.has_changed().unwrap_or(false));
    assert!(rx.borrow_and_update().is_mobile);
}

#[test]
fn reduced_motion_changes_are_published_once() {
    let signals = DeviceSignals::new(1_920, false);
    let mut rx = signals.subscribe();

    assert!(signals.set_prefers_reduced_motion(true));
    assert!(rx.borrow_and_update().prefers_reduced_motion);
    assert!(!signals.set_prefers_reduced_motion(true));
    assert!(!rx.has_changed().unwrap_or(true));
}
