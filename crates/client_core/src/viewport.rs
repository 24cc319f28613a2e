/// Below this width the single-column scrolling layout is used and the
/// corner frames and custom cursor are not drawn.
pub const MOBILE_BREAKPOINT_PX: u32 = 1_280;
/// Width the fluid type scale is designed against.
pub const DESIGN_WIDTH_PX: f32 = 1_920.0;
pub const BASE_FONT_PX: f32 = 16.0;
pub const COMPACT_THRESHOLD_PX: f32 = 540.0;

const MIN_FLUID_SCALE: f32 = 0.75;
const MAX_FLUID_SCALE: f32 = 1.35;

pub fn is_mobile_width(width: u32) -> bool {
    width < MOBILE_BREAKPOINT_PX
}

/// Root font size for a viewport width; scales with the width on desktop.
pub fn fluid_root_font_px(width: u32) -> f32 {
    if is_mobile_width(width) {
        return BASE_FONT_PX;
    }
    let scale = (width as f32 / DESIGN_WIDTH_PX).clamp(MIN_FLUID_SCALE, MAX_FLUID_SCALE);
    BASE_FONT_PX * scale
}

/// Short content areas switch the desktop sections to their compact
/// arrangement. A zero height means "not measured yet".
pub fn is_compact_layout(content_height_px: f32) -> bool {
    content_height_px > 0.0 && content_height_px < COMPACT_THRESHOLD_PX
}

#[cfg(test)]
#[path = "tests/viewport_tests.rs"]
mod tests;
