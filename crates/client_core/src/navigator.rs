//! Paginated section cursor for the desktop layout.

use std::time::Duration;

use shared::domain::SectionId;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::{clock::SharedClock, timers::TimerSet};

/// Covers content fade-out, frames crossing the centre and returning, and
/// the start of the next fade-in.
pub const TOTAL_TRANSITION: Duration = Duration::from_millis(1_000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("a navigator needs at least one section")]
    NoSections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigatorTimer {
    LowerTransition,
}

pub struct SectionNavigator {
    clock: SharedClock,
    sections: Vec<SectionId>,
    current: watch::Sender<usize>,
    transitioning: watch::Sender<bool>,
    blocked: bool,
    content_visible: bool,
    timers: TimerSet<NavigatorTimer>,
    torn_down: bool,
}

impl SectionNavigator {
    pub fn new(clock: SharedClock, sections: Vec<SectionId>) -> Result<Self, NavigationError> {
        if sections.is_empty() {
            return Err(NavigationError::NoSections);
        }
        let (current, _) = watch::channel(0);
        let (transitioning, _) = watch::channel(false);
        Ok(Self {
            clock,
            sections,
            current,
            transitioning,
            blocked: false,
            content_visible: false,
            timers: TimerSet::new(),
            torn_down: false,
        })
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn current_section(&self) -> usize {
        *self.current.borrow()
    }

    pub fn current_section_id(&self) -> SectionId {
        self.sections[self.current_section()]
    }

    pub fn is_transitioning(&self) -> bool {
        *self.transitioning.borrow()
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Whether the active section finished its enter animation.
    pub fn content_visible(&self) -> bool {
        self.content_visible
    }

    pub fn is_last_section(&self) -> bool {
        self.current_section() + 1 == self.sections.len()
    }

    pub fn subscribe_section(&self) -> watch::Receiver<usize> {
        self.current.subscribe()
    }

    pub fn subscribe_transitioning(&self) -> watch::Receiver<bool> {
        self.transitioning.subscribe()
    }

    /// Moves the cursor; returns whether anything changed.
    ///
    /// Out-of-range targets, the current section and blocked navigation
    /// are ignored.
    pub fn navigate(&mut self, target: usize) -> bool {
        if self.torn_down {
            return false;
        }
        let current = self.current_section();
        if target >= self.sections.len() || target == current {
            trace!(target, current, "navigation ignored");
            return false;
        }
        if self.blocked {
            debug!(target, current, "navigation blocked");
            return false;
        }

        self.current.send_replace(target);
        self.transitioning.send_if_modified(|flag| {
            let raised = !*flag;
            *flag = true;
            raised
        });
        let deadline = self.clock.now() + TOTAL_TRANSITION;
        self.timers.schedule(NavigatorTimer::LowerTransition, deadline);
        debug!(
            from = current,
            to = target,
            section = self.sections[target].anchor(),
            "section changed"
        );
        true
    }

    /// Navigates to a nav link such as `#skills`.
    pub fn navigate_to_href(&mut self, href: &str) -> bool {
        let Some(section) = SectionId::from_href(href) else {
            return false;
        };
        match self.sections.iter().position(|s| *s == section) {
            Some(index) => self.navigate(index),
            None => false,
        }
    }

    /// Scroll-indicator action: advance one section.
    pub fn scroll_down(&mut self) -> bool {
        self.navigate(self.current_section() + 1)
    }

    /// Last write wins; callers restoring an earlier block recompute it.
    pub fn set_block_navigation(&mut self, blocked: bool) {
        if self.torn_down {
            return;
        }
        self.blocked = blocked;
    }

    pub fn on_animation_start(&mut self) {
        if self.torn_down {
            return;
        }
        self.set_block_navigation(true);
        self.content_visible = false;
    }

    /// The portfolio carousel owns wheel and swipe gestures while it is
    /// showing, so navigation stays blocked there until the carousel hands
    /// control back through `set_block_navigation(false)`.
    pub fn on_animation_complete(&mut self) {
        if self.torn_down {
            return;
        }
        let carousel_showing = self.current_section_id() == SectionId::Portfolio;
        self.set_block_navigation(carousel_showing);
        self.content_visible = true;
    }

    pub fn tick(&mut self) {
        if self.torn_down {
            return;
        }
        let now = self.clock.now();
        while let Some((NavigatorTimer::LowerTransition, _)) = self.timers.pop_due(now) {
            self.transitioning.send_if_modified(|flag| {
                let lowered = *flag;
                *flag = false;
                lowered
            });
            trace!("section transition settled");
        }
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
#[path = "tests/navigator_tests.rs"]
mod tests;
