//! Top-level render guard. A panic while rendering swaps the whole UI for a
//! fallback screen; nothing from the failed tree is kept.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::error;

pub const FALLBACK_TITLE: &str = "404";
pub const FALLBACK_SUBTITLE: &str = "NOT FOUND";
pub const FALLBACK_BUTTON_LABEL: &str = "GO BACK";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen<T> {
    Content(T),
    Fallback(FallbackScreen),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackScreen {
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackAction {
    GoBack,
    /// Navigate to [`HOME_PATH`] with fresh state.
    ReloadHome,
}

impl FallbackScreen {
    /// What the single button does: step back through history when there
    /// is somewhere to go, otherwise start over at the home page.
    pub fn action(&self, history_len: usize) -> FallbackAction {
        if history_len > 1 {
            FallbackAction::GoBack
        } else {
            FallbackAction::ReloadHome
        }
    }
}

#[derive(Debug, Default)]
pub struct RenderBoundary {
    failure: Option<FallbackScreen>,
}

impl RenderBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Runs `render` unless an earlier render already failed. Once latched,
    /// the fallback is returned until [`RenderBoundary::reload_home`].
    pub fn render<T>(&mut self, render: impl FnOnce() -> T) -> Screen<T> {
        if let Some(fallback) = &self.failure {
            return Screen::Fallback(fallback.clone());
        }

        match catch_unwind(AssertUnwindSafe(render)) {
            Ok(content) => Screen::Content(content),
            Err(payload) => {
                let reason = if let Some(s) = payload.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                error!(%reason, "render failed; showing fallback screen");
                let fallback = FallbackScreen { reason };
                self.failure = Some(fallback.clone());
                Screen::Fallback(fallback)
            }
        }
    }

    /// Clears the latch. The caller rebuilds application state from scratch.
    pub fn reload_home(&mut self) -> &'static str {
        self.failure = None;
        HOME_PATH
    }
}

#[cfg(test)]
#[path = "tests/boundary_tests.rs"]
mod tests;
