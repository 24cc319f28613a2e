use super::*;

#[test]
fn force_anim_requires_value_one() {
    assert!(LaunchOptions::from_query("?forceAnim=1").force_anim);
    assert!(LaunchOptions::from_query("lang=en&forceAnim=1").force_anim);
    assert!(!LaunchOptions::from_query("forceAnim=true").force_anim);
    assert!(!LaunchOptions::from_query("").force_anim);
}

#[test]
fn first_occurrence_wins() {
    assert!(!LaunchOptions::from_query("forceAnim=0&forceAnim=1").force_anim);
}

#[test]
fn reads_the_query_of_a_full_url() {
    let url = Url::parse("https://example.com/?forceAnim=1#about").expect("url");
    assert_eq!(LaunchOptions::from_url(&url), LaunchOptions { force_anim: true });
}

#[test]
fn override_forces_content_animation() {
    let forced = LaunchOptions { force_anim: true };
    assert!(forced.effective_content_can_animate(false));

    let normal = LaunchOptions::default();
    assert!(!normal.effective_content_can_animate(false));
    assert!(normal.effective_content_can_animate(true));
}
