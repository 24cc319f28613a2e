use shared::domain::{DecorationState, Theme};

use crate::{device::DeviceCapabilities, loader::LoaderSnapshot};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecorationInputs {
    pub prefers_reduced_motion: bool,
    pub app_ready: bool,
    pub loader_frames_released: bool,
    pub loader_frames_to_center: bool,
    pub section_transitioning: bool,
    pub current_section_index: usize,
}

impl DecorationInputs {
    pub fn from_parts(
        loader: &LoaderSnapshot,
        section_transitioning: bool,
        current_section_index: usize,
        prefers_reduced_motion: bool,
    ) -> Self {
        Self {
            prefers_reduced_motion,
            app_ready: loader.app_ready,
            loader_frames_released: loader.loader_frames_released,
            loader_frames_to_center: loader.loader_frames_to_center,
            section_transitioning,
            current_section_index,
        }
    }
}

/// Corner frames are lit during the intro, while About is showing, and
/// flash active for any section transition. Reduced motion keeps them at
/// rest.
pub fn decoration_state(inputs: &DecorationInputs) -> DecorationState {
    if inputs.prefers_reduced_motion {
        return DecorationState::Rest;
    }
    if !inputs.app_ready {
        return if inputs.loader_frames_released {
            DecorationState::AboutFrame
        } else if inputs.loader_frames_to_center {
            DecorationState::Active
        } else {
            DecorationState::Rest
        };
    }
    if inputs.section_transitioning {
        return DecorationState::Active;
    }
    if inputs.current_section_index == 0 {
        DecorationState::AboutFrame
    } else {
        DecorationState::Rest
    }
}

/// Frames are only drawn on the desktop layout.
pub fn frame_presentation(is_mobile: bool, state: DecorationState) -> DecorationState {
    if is_mobile {
        DecorationState::Hidden
    } else {
        state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    System,
    Custom(Theme),
}

pub fn cursor_style(capabilities: &DeviceCapabilities) -> CursorStyle {
    if capabilities.is_mobile {
        return CursorStyle::System;
    }
    if capabilities.prefers_reduced_motion {
        CursorStyle::Custom(Theme::Light)
    } else {
        CursorStyle::Custom(Theme::Dark)
    }
}

#[cfg(test)]
#[path = "tests/decoration_tests.rs"]
mod tests;
