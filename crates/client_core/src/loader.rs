//! Intro loader sequencing: frames move to the centre, the loader releases
//! them and fades, then page content may start animating.

use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::{clock::SharedClock, timers::TimerSet};

const FRAMES_TO_CENTER_MS: u64 = 400;
const LOADER_DURATION_MS: u64 = 2_500;
const LOADER_EXIT_MS: u64 = 1_000;

const _: () = assert!(
    FRAMES_TO_CENTER_MS < LOADER_DURATION_MS && LOADER_EXIT_MS > 0,
    "loader steps must fire in strictly increasing order"
);

pub const FRAMES_TO_CENTER_DELAY: Duration = Duration::from_millis(FRAMES_TO_CENTER_MS);
pub const LOADER_DURATION: Duration = Duration::from_millis(LOADER_DURATION_MS);
pub const LOADER_EXIT_DURATION: Duration = Duration::from_millis(LOADER_EXIT_MS);
pub const CONTENT_ANIMATE_DELAY: Duration =
    Duration::from_millis(LOADER_DURATION_MS + LOADER_EXIT_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoaderPhase {
    Loading,
    FramesAtCenter,
    FramesReleasing,
    Ready,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderSnapshot {
    pub app_ready: bool,
    /// Same instant as `app_ready`; kept separate for decoration inputs.
    pub loader_frames_released: bool,
    pub loader_frames_to_center: bool,
    pub content_can_animate: bool,
}

impl LoaderSnapshot {
    pub fn phase(&self) -> LoaderPhase {
        if self.content_can_animate {
            LoaderPhase::Ready
        } else if self.app_ready {
            LoaderPhase::FramesReleasing
        } else if self.loader_frames_to_center {
            LoaderPhase::FramesAtCenter
        } else {
            LoaderPhase::Loading
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoaderStep {
    FramesToCenter,
    AppReady,
    ContentCanAnimate,
}

impl LoaderStep {
    fn delay(self) -> Duration {
        match self {
            Self::FramesToCenter => FRAMES_TO_CENTER_DELAY,
            Self::AppReady => LOADER_DURATION,
            Self::ContentCanAnimate => CONTENT_ANIMATE_DELAY,
        }
    }
}

pub struct LoaderSequencer {
    clock: SharedClock,
    timers: TimerSet<LoaderStep>,
    state: watch::Sender<LoaderSnapshot>,
    active: bool,
}

impl LoaderSequencer {
    pub fn new(clock: SharedClock) -> Self {
        let (state, _) = watch::channel(LoaderSnapshot::default());
        Self {
            clock,
            timers: TimerSet::new(),
            state,
            active: false,
        }
    }

    /// Starts (or restarts) the sequence from all-false flags.
    pub fn activate(&mut self) {
        self.timers.clear();
        self.state.send_if_modified(|snapshot| {
            let reset = *snapshot != LoaderSnapshot::default();
            *snapshot = LoaderSnapshot::default();
            reset
        });

        let now = self.clock.now();
        for step in [
            LoaderStep::FramesToCenter,
            LoaderStep::AppReady,
            LoaderStep::ContentCanAnimate,
        ] {
            self.timers.schedule(step, now + step.delay());
        }
        self.active = true;
        debug!(started_at_ms = now.as_millis() as u64, "loader sequence activated");
    }

    /// Applies every step due by now, in deadline order, and returns the
    /// phases entered.
    pub fn tick(&mut self) -> Vec<LoaderPhase> {
        if !self.active {
            return Vec::new();
        }

        let now = self.clock.now();
        let mut entered = Vec::new();
        while let Some((step, _)) = self.timers.pop_due(now) {
            let changed = self.state.send_if_modified(|snapshot| apply_step(snapshot, step));
            if changed {
                let phase = self.state.borrow().phase();
                debug!(?phase, "loader phase entered");
                entered.push(phase);
            }
        }
        entered
    }

    /// Cancels pending steps; the snapshot is frozen from here on.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn snapshot(&self) -> LoaderSnapshot {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoaderSnapshot> {
        self.state.subscribe()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        if !self.active {
            return None;
        }
        self.timers.next_deadline()
    }
}

fn apply_step(snapshot: &mut LoaderSnapshot, step: LoaderStep) -> bool {
    let flag = match step {
        LoaderStep::FramesToCenter => &mut snapshot.loader_frames_to_center,
        LoaderStep::AppReady => {
            snapshot.loader_frames_released = true;
            &mut snapshot.app_ready
        }
        LoaderStep::ContentCanAnimate => &mut snapshot.content_can_animate,
    };
    let flipped = !*flag;
    *flag = true;
    flipped
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
