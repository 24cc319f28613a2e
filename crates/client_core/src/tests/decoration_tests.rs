use super::*;

fn inputs(
    prefers_reduced_motion: bool,
    app_ready: bool,
    loader_frames_released: bool,
    loader_frames_to_center: bool,
    section_transitioning: bool,
    current_section_index: usize,
) -> DecorationInputs {
    DecorationInputs {
        prefers_reduced_motion,
        app_ready,
        loader_frames_released,
        loader_frames_to_center,
        section_transitioning,
        current_section_index,
    }
}

fn expected(input: &DecorationInputs) -> DecorationState {
    if input.prefers_reduced_motion {
        DecorationState::Rest
    } else if !input.app_ready {
        match (input.loader_frames_released, input.loader_frames_to_center) {
            (true, _) => DecorationState::AboutFrame,
            (false, true) => DecorationState::Active,
            (false, false) => DecorationState::Rest,
        }
    } else if input.section_transitioning {
        DecorationState::Active
    } else if input.current_section_index == 0 {
        DecorationState::AboutFrame
    } else {
        DecorationState::Rest
    }
}

#[test]
fn matches_the_decoration_table_for_every_combination() {
    let flags = [false, true];
    for reduced in flags {
        for ready in flags {
            for released in flags {
                for to_center in flags {
                    for transitioning in flags {
                        for index in [0, 1, 3] {
                            let input =
                                inputs(reduced, ready, released, to_center, transitioning, index);
                            assert_eq!(decoration_state(&input), expected(&input), "{input:?}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn intro_walks_rest_active_about_frame() {
    assert_eq!(
        decoration_state(&inputs(false, false, false, false, false, 0)),
        DecorationState::Rest
    );
    assert_eq!(
        decoration_state(&inputs(false, false, false, true, false, 0)),
        DecorationState::Active
    );
    assert_eq!(
        decoration_state(&inputs(false, true, true, true, false, 0)),
        DecorationState::AboutFrame
    );
}

#[test]
fn reduced_motion_always_rests() {
    assert_eq!(
        decoration_state(&inputs(true, true, true, true, true, 0)),
        DecorationState::Rest
    );
}

#[test]
fn transitions_flash_active_then_settle() {
    assert_eq!(
        decoration_state(&inputs(false, true, true, true, true, 2)),
        DecorationState::Active
    );
    assert_eq!(
        decoration_state(&inputs(false, true, true, true, false, 2)),
        DecorationState::Rest
    );
}

#[test]
fn inputs_are_assembled_from_loader_snapshot() {
    let snapshot = LoaderSnapshot {
        app_ready: true,
        loader_frames_released: true,
        loader_frames_to_center: true,
        content_can_animate: false,
    };
    let input = DecorationInputs::from_parts(&snapshot, true, 2, false);
    assert_eq!(input, inputs(false, true, true, true, true, 2));
}

#[test]
fn frames_are_hidden_on_mobile() {
    assert_eq!(
        frame_presentation(true, DecorationState::AboutFrame),
        DecorationState::Hidden
    );
    assert_eq!(
        frame_presentation(false, DecorationState::Active),
        DecorationState::Active
    );
}

#[test]
fn cursor_follows_device_capabilities() {
    let desktop = DeviceCapabilities::default();
    assert_eq!(cursor_style(&desktop), CursorStyle::Custom(Theme::Dark));

    let reduced = DeviceCapabilities {
        prefers_reduced_motion: true,
        ..desktop
    };
    assert_eq!(cursor_style(&reduced), CursorStyle::Custom(Theme::Light));

    let mobile = DeviceCapabilities {
        is_mobile: true,
        prefers_reduced_motion: true,
    };
    assert_eq!(cursor_style(&mobile), CursorStyle::System);
}
