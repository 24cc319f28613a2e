use super::*;

#[test]
fn manual_clock_starts_at_origin_and_advances() {
    let clock = ManualClock::new();
    assert_eq!(clock.now(), Duration::ZERO);

    clock.advance_ms(250);
    clock.advance(Duration::from_millis(50));
    assert_eq!(clock.now(), Duration::from_millis(300));
}

#[test]
fn manual_clock_set_never_moves_backwards() {
    let clock = ManualClock::new();
    clock.set(Duration::from_secs(2));
    clock.set(Duration::from_secs(1));
    assert_eq!(clock.now(), Duration::from_secs(2));
}

#[test]
fn manual_clock_is_usable_as_shared_clock() {
    let manual = ManualClock::new();
    let shared: SharedClock = manual.clone();
    manual.advance_ms(10);
    assert_eq!(shared.now(), Duration::from_millis(10));
}

#[tokio::test(start_paused = true)]
async fn tokio_clock_follows_paused_time() {
    let clock = TokioClock::new();
    assert_eq!(clock.now(), Duration::ZERO);

    tokio::time::advance(Duration::from_millis(400)).await;
    assert_eq!(clock.now(), Duration::from_millis(400));
    assert_eq!(
        clock.instant_at(Duration::from_millis(400)),
        tokio::time::Instant::now()
    );
}
