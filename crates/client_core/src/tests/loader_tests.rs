use std::sync::Arc;

use super::*;
use crate::clock::ManualClock;

fn sequencer() -> (Arc<ManualClock>, LoaderSequencer) {
    let clock = ManualClock::new();
    let loader = LoaderSequencer::new(clock.clone());
    (clock, loader)
}

#[test]
fn steps_are_strictly_ordered() {
    assert!(FRAMES_TO_CENTER_DELAY < LOADER_DURATION);
    assert!(LOADER_DURATION < CONTENT_ANIMATE_DELAY);
    assert_eq!(CONTENT_ANIMATE_DELAY, LOADER_DURATION + LOADER_EXIT_DURATION);
}

#[test]
fn flags_flip_in_order_and_stay_set() {
    let (clock, mut loader) = sequencer();
    loader.activate();
    assert_eq!(loader.snapshot(), LoaderSnapshot::default());

    clock.advance_ms(399);
    assert!(loader.tick().is_empty());

    clock.advance_ms(1);
    assert_eq!(loader.tick(), vec![LoaderPhase::FramesAtCenter]);
    assert!(loader.snapshot().loader_frames_to_center);
    assert!(!loader.snapshot().app_ready);

    clock.set(LOADER_DURATION);
    assert_eq!(loader.tick(), vec![LoaderPhase::FramesReleasing]);
    let snapshot = loader.snapshot();
    assert!(snapshot.app_ready);
    assert!(snapshot.loader_frames_released);
    assert!(snapshot.loader_frames_to_center);
    assert!(!snapshot.content_can_animate);

    clock.set(CONTENT_ANIMATE_DELAY);
    assert_eq!(loader.tick(), vec![LoaderPhase::Ready]);
    assert_eq!(
        loader.snapshot(),
        LoaderSnapshot {
            app_ready: true,
            loader_frames_released: true,
            loader_frames_to_center: true,
            content_can_animate: true,
        }
    );
    assert_eq!(loader.next_deadline(), None);
}

#[test]
fn a_late_tick_applies_every_due_step_in_order() {
    let (clock, mut loader) = sequencer();
    loader.activate();
    clock.advance_ms(10_000);

    assert_eq!(
        loader.tick(),
        vec![
            LoaderPhase::FramesAtCenter,
            LoaderPhase::FramesReleasing,
            LoaderPhase::Ready
        ]
    );
}

#[test]
fn teardown_before_timers_fire_freezes_the_snapshot() {
    let (clock, mut loader) = sequencer();
    let mut rx = loader.subscribe();
    loader.activate();
    rx.borrow_and_update();

    loader.teardown();
    clock.advance_ms(10_000);

    assert!(loader.tick().is_empty());
    assert!(!rx.has_changed().unwrap_or(true));
    assert_eq!(loader.snapshot(), LoaderSnapshot::default());
    assert_eq!(loader.next_deadline(), None);
    assert!(!loader.is_active());
}

#[test]
fn reactivation_resets_flags_and_restarts_timers() {
    let (clock, mut loader) = sequencer();
    loader.activate();
    clock.advance_ms(2_600);
    loader.tick();
    assert!(loader.snapshot().app_ready);

    loader.activate();
    assert_eq!(loader.snapshot(), LoaderSnapshot::default());
    assert_eq!(
        loader.next_deadline(),
        Some(Duration::from_millis(2_600) + FRAMES_TO_CENTER_DELAY)
    );

    clock.advance_ms(400);
    assert_eq!(loader.tick(), vec![LoaderPhase::FramesAtCenter]);
}

#[test]
fn subscribers_observe_each_phase() {
    let (clock, mut loader) = sequencer();
    let mut rx = loader.subscribe();
    loader.activate();

    clock.advance_ms(400);
    loader.tick();
    assert!(rx.has_changed().unwrap_or(false));
    assert_eq!(rx.borrow_and_update().phase(), LoaderPhase::FramesAtCenter);
}
