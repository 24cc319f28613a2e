//! Scroll state for the single-column mobile layout.

use std::time::Duration;

use tracing::debug;

use crate::{clock::SharedClock, timers::TimerSet};

pub const SCROLL_START_THRESHOLD_PX: f32 = 5.0;
pub const ABOUT_COLLAPSE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MobileTimer {
    CollapseAbout,
}

/// Tracks the first scroll: it hides the scroll-down indicator at once and
/// shrinks the full-height About panel shortly after.
pub struct MobileScrollTracker {
    clock: SharedClock,
    has_scrolled: bool,
    show_full_about: bool,
    timers: TimerSet<MobileTimer>,
    torn_down: bool,
}

impl MobileScrollTracker {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            clock,
            has_scrolled: false,
            show_full_about: true,
            timers: TimerSet::new(),
            torn_down: false,
        }
    }

    pub fn has_scrolled(&self) -> bool {
        self.has_scrolled
    }

    pub fn show_scroll_indicator(&self) -> bool {
        !self.has_scrolled
    }

    pub fn show_full_about(&self) -> bool {
        self.show_full_about
    }

    /// Returns whether this scroll position started the collapse.
    pub fn on_scroll(&mut self, scroll_y: f32) -> bool {
        if self.torn_down || self.has_scrolled || scroll_y <= SCROLL_START_THRESHOLD_PX {
            return false;
        }
        self.has_scrolled = true;
        let deadline = self.clock.now() + ABOUT_COLLAPSE_DELAY;
        self.timers.schedule(MobileTimer::CollapseAbout, deadline);
        debug!(scroll_y, "mobile scroll started");
        true
    }

    pub fn tick(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let now = self.clock.now();
        let mut changed = false;
        while let Some((MobileTimer::CollapseAbout, _)) = self.timers.pop_due(now) {
            changed |= self.show_full_about;
            self.show_full_about = false;
        }
        changed
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        if self.torn_down {
            return None;
        }
        self.timers.next_deadline()
    }

    pub fn teardown(&mut self) {
        self.timers.clear();
        self.torn_down = true;
    }
}

#[cfg(test)]
#[path = "tests/mobile_tests.rs"]
mod tests;
