use std::sync::Arc;

use super::*;
use crate::{clock::ManualClock, decoration::CursorStyle, device::DeviceSignals};

fn shell_with(
    width: u32,
    reduced: bool,
    launch: LaunchOptions,
) -> (Arc<ManualClock>, DeviceSignals, PortfolioShell) {
    let clock = ManualClock::new();
    let device = DeviceSignals::new(width, reduced);
    let shell = PortfolioShell::new(clock.clone(), device.subscribe(), launch, Theme::Dark)
        .expect("shell");
    (clock, device, shell)
}

#[test]
fn desktop_intro_drives_the_frames() {
    let (clock, _device, mut shell) = shell_with(1_920, false, LaunchOptions::default());
    shell.start();
    assert_eq!(shell.layout(), Layout::Desktop);
    assert_eq!(shell.frame_state(), DecorationState::Rest);
    assert_eq!(shell.next_deadline(), Some(Duration::from_millis(400)));

    clock.advance_ms(400);
    assert_eq!(shell.tick().loader_phases, vec![LoaderPhase::FramesAtCenter]);
    assert_eq!(shell.frame_state(), DecorationState::Active);

    clock.set(Duration::from_millis(2_500));
    shell.tick();
    assert_eq!(shell.frame_state(), DecorationState::AboutFrame);
    assert!(!shell.content_can_animate());

    clock.set(Duration::from_millis(3_500));
    shell.tick();
    assert!(shell.content_can_animate());
    assert_eq!(shell.next_deadline(), None);
}

#[test]
fn section_change_flashes_frames_then_rests() {
    let (clock, _device, mut shell) = shell_with(1_920, false, LaunchOptions::default());
    shell.start();
    clock.advance_ms(3_500);
    shell.tick();

    assert!(shell.navigator_mut().navigate(2));
    assert_eq!(shell.frame_state(), DecorationState::Active);

    clock.advance_ms(1_000);
    let report = shell.tick();
    assert!(report.transition_settled);
    assert_eq!(shell.frame_state(), DecorationState::Rest);
}

#[test]
fn mobile_layout_hides_frames_and_uses_system_cursor() {
    let (_clock, device, mut shell) = shell_with(390, false, LaunchOptions::default());
    shell.start();
    assert_eq!(shell.layout(), Layout::Mobile);
    assert_eq!(shell.frame_state(), DecorationState::Hidden);
    assert_eq!(shell.cursor_style(), CursorStyle::System);

    device.set_viewport_width(1_600);
    assert_eq!(shell.layout(), Layout::Desktop);
    assert_eq!(shell.cursor_style(), CursorStyle::Custom(Theme::Dark));
}

#[test]
fn reduced_motion_keeps_frames_at_rest() {
    let (clock, _device, mut shell) = shell_with(1_920, true, LaunchOptions::default());
    shell.start();
    clock.advance_ms(400);
    shell.tick();
    assert_eq!(shell.frame_state(), DecorationState::Rest);
    assert_eq!(shell.cursor_style(), CursorStyle::Custom(Theme::Light));
}

#[test]
fn force_anim_shows_content_before_the_loader_finishes() {
    let (_clock, _device, mut shell) =
        shell_with(1_920, false, LaunchOptions { force_anim: true });
    shell.start();
    assert!(shell.content_can_animate());
    assert!(!shell.loader_snapshot().content_can_animate);
}

#[test]
fn next_deadline_is_the_earliest_component_deadline() {
    let (clock, _device, mut shell) = shell_with(390, false, LaunchOptions::default());
    shell.start();
    clock.advance_ms(200);
    shell.mobile_mut().on_scroll(40.0);
    assert_eq!(shell.next_deadline(), Some(Duration::from_millis(400)));

    clock.advance_ms(200);
    let report = shell.tick();
    assert_eq!(report.loader_phases, vec![LoaderPhase::FramesAtCenter]);
    assert!(!report.about_collapsed);
    assert_eq!(shell.next_deadline(), Some(Duration::from_millis(500)));

    clock.advance_ms(100);
    assert!(shell.tick().about_collapsed);
}

#[test]
fn teardown_stops_every_component() {
    let (clock, _device, mut shell) = shell_with(1_920, false, LaunchOptions::default());
    let mut loader_rx = shell.loader().subscribe();
    shell.start();
    shell.navigator_mut().navigate(1);
    loader_rx.borrow_and_update();

    shell.teardown();
    clock.advance_ms(10_000);

    assert!(shell.tick().is_empty());
    assert!(shell.is_torn_down());
    assert_eq!(shell.next_deadline(), None);
    assert!(!loader_rx.has_changed().unwrap_or(true));
    assert!(shell.navigator().is_transitioning());
}
