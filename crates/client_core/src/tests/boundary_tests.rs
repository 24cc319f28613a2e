use super::*;

fn quiet_panics<T>(f: impl FnOnce() -> T) -> T {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));
    let result = f();
    std::panic::set_hook(hook);
    result
}

#[test]
fn healthy_render_passes_content_through() {
    let mut boundary = RenderBoundary::new();
    assert_eq!(boundary.render(|| 7), Screen::Content(7));
    assert!(!boundary.has_failed());
}

#[test]
fn panic_latches_the_fallback_screen() {
    let mut boundary = RenderBoundary::new();
    let screen = quiet_panics(|| boundary.render(|| -> u32 { panic!("section exploded") }));
    assert_eq!(
        screen,
        Screen::Fallback(FallbackScreen {
            reason: "section exploded".to_string()
        })
    );

    let mut rendered = false;
    let again = boundary.render(|| rendered = true);
    assert!(matches!(again, Screen::Fallback(_)));
    assert!(!rendered);
}

#[test]
fn reload_home_clears_the_latch() {
    let mut boundary = RenderBoundary::new();
    quiet_panics(|| boundary.render(|| -> u8 { panic!("boom") }));

    assert_eq!(boundary.reload_home(), HOME_PATH);
    assert!(!boundary.has_failed());
    assert_eq!(boundary.render(|| "ok"), Screen::Content("ok"));
}

#[test]
fn fallback_button_goes_back_only_with_history() {
    let fallback = FallbackScreen {
        reason: String::new(),
    };
    assert_eq!(fallback.action(3), FallbackAction::GoBack);
    assert_eq!(fallback.action(1), FallbackAction::ReloadHome);
}
