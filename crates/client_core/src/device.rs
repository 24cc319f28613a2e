//! Externally observed device capabilities.
//!
//! The environment (window resize, OS motion setting) owns the writer side.
//! Everything in this crate only ever holds a receiver.

use tokio::sync::watch;
use tracing::debug;

use crate::viewport::is_mobile_width;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub is_mobile: bool,
    pub prefers_reduced_motion: bool,
}

pub type DeviceWatch = watch::Receiver<DeviceCapabilities>;

pub struct DeviceSignals {
    tx: watch::Sender<DeviceCapabilities>,
}

impl DeviceSignals {
    pub fn new(viewport_width: u32, prefers_reduced_motion: bool) -> Self {
        let (tx, _) = watch::channel(DeviceCapabilities {
            is_mobile: is_mobile_width(viewport_width),
            prefers_reduced_motion,
        });
        Self { tx }
    }

    pub fn subscribe(&self) -> DeviceWatch {
        self.tx.subscribe()
    }

    pub fn current(&self) -> DeviceCapabilities {
        *self.tx.borrow()
    }

    /// Resize events that stay on the same side of the breakpoint are not
    /// republished.
    pub fn set_viewport_width(&self, width: u32) -> bool {
        let is_mobile = is_mobile_width(width);
        let changed = self.tx.send_if_modified(|caps| {
            let changed = caps.is_mobile != is_mobile;
            caps.is_mobile = is_mobile;
            changed
        });
        if changed {
            debug!(width, is_mobile, "layout breakpoint crossed");
        }
        changed
    }

    pub fn set_prefers_reduced_motion(&self, prefers_reduced_motion: bool) -> bool {
        self.tx.send_if_modified(|caps| {
            let changed = caps.prefers_reduced_motion != prefers_reduced_motion;
            caps.prefers_reduced_motion = prefers_reduced_motion;
            changed
        })
    }
}

#[cfg(test)]
#[path = "tests/device_tests.rs"]
mod tests;
