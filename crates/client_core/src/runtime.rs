//! Drives a [`PortfolioShell`] on a tokio runtime.
//!
//! One loop owns the shell. It sleeps until the earliest pending deadline or
//! the next command, whichever comes first. Email round trips run in their
//! own tasks and report back through a channel, so a slow provider never
//! stalls the animations.

use std::{future, sync::Arc};

use shared::domain::FormField;
use tokio::{sync::mpsc, time::sleep_until};
use tracing::{debug, info, warn};

use crate::{
    clock::TokioClock,
    contact::{ContactReceipt, ContactSubmitter, SubmitFailure},
    shell::PortfolioShell,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Navigate(usize),
    NavigateHref(String),
    ScrollDown,
    SetBlockNavigation(bool),
    AnimationStart,
    AnimationComplete,
    Scroll(f32),
    Edit(FormField, String),
    Submit,
    Shutdown,
}

type SubmitOutcome = Result<ContactReceipt, SubmitFailure>;

/// Runs until `Shutdown` or until every command sender is dropped, then tears
/// the shell down and hands it back.
pub async fn run_shell(
    mut shell: PortfolioShell,
    clock: TokioClock,
    mut commands: mpsc::Receiver<ShellCommand>,
    submitter: Arc<dyn ContactSubmitter>,
) -> PortfolioShell {
    let (outcome_tx, mut outcomes) = mpsc::channel::<SubmitOutcome>(4);
    let mut device = shell.device_watch();
    let mut device_live = true;

    let ready_check = Arc::clone(&submitter);
    tokio::spawn(async move { ready_check.prepare().await });

    shell.start();
    loop {
        shell.tick();

        let deadline = shell.next_deadline();
        let wake = async {
            match deadline {
                Some(at) => sleep_until(clock.instant_at(at)).await,
                None => future::pending().await,
            }
        };

        tokio::select! {
            command = commands.recv() => match command {
                None | Some(ShellCommand::Shutdown) => break,
                Some(command) => apply(&mut shell, command, &submitter, &outcome_tx),
            },
            Some(outcome) = outcomes.recv() => {
                shell.contact_mut().complete_submit(outcome);
            }
            changed = device.changed(), if device_live => {
                if changed.is_ok() {
                    info!(
                        layout = ?shell.layout(),
                        cursor = ?shell.cursor_style(),
                        "device capabilities changed"
                    );
                } else {
                    device_live = false;
                }
            }
            () = wake => {}
        }
    }

    shell.teardown();
    shell
}

fn apply(
    shell: &mut PortfolioShell,
    command: ShellCommand,
    submitter: &Arc<dyn ContactSubmitter>,
    outcome_tx: &mpsc::Sender<SubmitOutcome>,
) {
    debug!(?command, "shell command");
    match command {
        ShellCommand::Navigate(index) => {
            shell.navigator_mut().navigate(index);
        }
        ShellCommand::NavigateHref(href) => {
            shell.navigator_mut().navigate_to_href(&href);
        }
        ShellCommand::ScrollDown => {
            shell.navigator_mut().scroll_down();
        }
        ShellCommand::SetBlockNavigation(blocked) => {
            shell.navigator_mut().set_block_navigation(blocked);
        }
        ShellCommand::AnimationStart => shell.navigator_mut().on_animation_start(),
        ShellCommand::AnimationComplete => shell.navigator_mut().on_animation_complete(),
        ShellCommand::Scroll(scroll_y) => {
            shell.mobile_mut().on_scroll(scroll_y);
        }
        ShellCommand::Edit(field, value) => shell.contact_mut().edit(field, value),
        ShellCommand::Submit => {
            let Some(request) = shell.contact_mut().begin_submit(&**submitter) else {
                return;
            };
            let submitter = Arc::clone(submitter);
            let outcome_tx = outcome_tx.clone();
            tokio::spawn(async move {
                let outcome = submitter.submit(&request).await;
                if outcome_tx.send(outcome).await.is_err() {
                    warn!("shell stopped before the contact submission finished");
                }
            });
        }
        ShellCommand::Shutdown => {}
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
