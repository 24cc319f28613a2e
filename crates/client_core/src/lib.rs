//! Presentation core of the portfolio site: intro loader, section
//! navigation, corner-frame decoration, mobile scroll state and the contact
//! form, all driven by explicit time so they can run headless.

pub mod boundary;
pub mod clock;
pub mod contact;
pub mod decoration;
pub mod device;
pub mod launch;
pub mod loader;
pub mod mobile;
pub mod navigator;
pub mod runtime;
pub mod shell;
pub mod timers;
pub mod viewport;

pub use clock::{Clock, ManualClock, SharedClock, TokioClock};
pub use contact::{
    ContactForm, ContactFormState, ContactReceipt, ContactSubmitter, HttpContactSubmitter,
    SubmitFailure,
};
pub use runtime::{run_shell, ShellCommand};
pub use shell::{Layout, PortfolioShell};
