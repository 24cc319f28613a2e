//! The page as a whole: every timer-driven component behind one clock, plus
//! the read-only device and launch inputs the presentation depends on.

use std::time::Duration;

use shared::domain::{DecorationState, Theme, SECTIONS};
use tracing::{debug, info};

use crate::{
    clock::SharedClock,
    contact::ContactForm,
    decoration::{
        cursor_style, decoration_state, frame_presentation, CursorStyle, DecorationInputs,
    },
    device::{DeviceCapabilities, DeviceWatch},
    launch::LaunchOptions,
    loader::{LoaderPhase, LoaderSequencer, LoaderSnapshot},
    mobile::MobileScrollTracker,
    navigator::{NavigationError, SectionNavigator},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Paginated sections with corner frames.
    Desktop,
    /// One scrolling column.
    Mobile,
}

/// What changed during one [`PortfolioShell::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub loader_phases: Vec<LoaderPhase>,
    pub transition_settled: bool,
    pub about_collapsed: bool,
    pub contact_reset: bool,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub struct PortfolioShell {
    loader: LoaderSequencer,
    navigator: SectionNavigator,
    mobile: MobileScrollTracker,
    contact: ContactForm,
    device: DeviceWatch,
    launch: LaunchOptions,
    theme: Theme,
    torn_down: bool,
}

impl PortfolioShell {
    pub fn new(
        clock: SharedClock,
        device: DeviceWatch,
        launch: LaunchOptions,
        theme: Theme,
    ) -> Result<Self, NavigationError> {
        Ok(Self {
            loader: LoaderSequencer::new(clock.clone()),
            navigator: SectionNavigator::new(clock.clone(), SECTIONS.to_vec())?,
            mobile: MobileScrollTracker::new(clock.clone()),
            contact: ContactForm::new(clock),
            device,
            launch,
            theme,
            torn_down: false,
        })
    }

    /// Mounts the page: the intro loader starts counting from now.
    pub fn start(&mut self) {
        if self.torn_down {
            return;
        }
        info!(
            theme = self.theme.as_str(),
            layout = ?self.layout(),
            force_anim = self.launch.force_anim,
            "portfolio shell started"
        );
        self.loader.activate();
    }

    pub fn loader(&self) -> &LoaderSequencer {
        &self.loader
    }

    pub fn loader_snapshot(&self) -> LoaderSnapshot {
        self.loader.snapshot()
    }

    pub fn navigator(&self) -> &SectionNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut SectionNavigator {
        &mut self.navigator
    }

    pub fn mobile(&self) -> &MobileScrollTracker {
        &self.mobile
    }

    pub fn mobile_mut(&mut self) -> &mut MobileScrollTracker {
        &mut self.mobile
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn device_watch(&self) -> DeviceWatch {
        self.device.clone()
    }

    pub fn device(&self) -> DeviceCapabilities {
        *self.device.borrow()
    }

    pub fn launch_options(&self) -> LaunchOptions {
        self.launch
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn layout(&self) -> Layout {
        if self.device().is_mobile {
            Layout::Mobile
        } else {
            Layout::Desktop
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn decoration_inputs(&self) -> DecorationInputs {
        DecorationInputs::from_parts(
            &self.loader.snapshot(),
            self.navigator.is_transitioning(),
            self.navigator.current_section(),
            self.device().prefers_reduced_motion,
        )
    }

    pub fn frame_state(&self) -> DecorationState {
        frame_presentation(
            self.device().is_mobile,
            decoration_state(&self.decoration_inputs()),
        )
    }

    pub fn cursor_style(&self) -> CursorStyle {
        cursor_style(&self.device())
    }

    pub fn content_can_animate(&self) -> bool {
        self.launch
            .effective_content_can_animate(self.loader.snapshot().content_can_animate)
    }

    pub fn tick(&mut self) -> TickReport {
        if self.torn_down {
            return TickReport::default();
        }
        let was_transitioning = self.navigator.is_transitioning();
        let loader_phases = self.loader.tick();
        self.navigator.tick();
        let report = TickReport {
            loader_phases,
            transition_settled: was_transitioning && !self.navigator.is_transitioning(),
            about_collapsed: self.mobile.tick(),
            contact_reset: self.contact.tick(),
        };
        if !report.is_empty() {
            debug!(?report, frame = ?self.frame_state(), "shell ticked");
        }
        report
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.loader.next_deadline(),
            self.navigator.next_deadline(),
            self.mobile.next_deadline(),
            self.contact.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Unmounts everything; no signal changes after this returns.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.loader.teardown();
        self.navigator.teardown();
        self.mobile.teardown();
        self.contact.teardown();
        self.torn_down = true;
        info!("portfolio shell torn down");
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
