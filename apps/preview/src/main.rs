use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    decoration::{decoration_state, frame_presentation, DecorationInputs},
    device::DeviceSignals,
    launch::LaunchOptions,
    loader::LoaderSnapshot,
    navigator::TOTAL_TRANSITION,
    run_shell, ContactForm, ContactFormState, ContactSubmitter, HttpContactSubmitter,
    PortfolioShell, ShellCommand, TokioClock,
};
use shared::domain::{FormField, SectionId, Theme, SECTIONS};
use tokio::sync::{mpsc, watch};
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Headless driver for the portfolio presentation core.
#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the intro and optionally walk through sections.
    Intro(IntroArgs),
    /// Validate and send a contact message through the server.
    Contact(ContactArgs),
}

#[derive(Args, Debug)]
struct IntroArgs {
    #[arg(long, default_value_t = 1_920)]
    width: u32,
    #[arg(long)]
    reduced_motion: bool,
    #[arg(long)]
    force_anim: bool,
    /// Page address; `forceAnim=1` in its query also forces animation.
    #[arg(long)]
    page_url: Option<Url>,
    /// Stored theme preference (`light` or `dark`).
    #[arg(long)]
    theme: Option<String>,
    #[arg(long)]
    prefers_dark: bool,
    /// Section anchors to visit once content is ready, e.g. `skills`.
    #[arg(long = "visit")]
    visits: Vec<String>,
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,
}

#[derive(Args, Debug)]
struct ContactArgs {
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    message: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Intro(args) => run_intro(args).await,
        Command::Contact(args) => run_contact(args).await,
    }
}

async fn run_intro(args: IntroArgs) -> Result<()> {
    let clock = TokioClock::new();
    let device = DeviceSignals::new(args.width, args.reduced_motion);
    let from_page = args
        .page_url
        .as_ref()
        .map(LaunchOptions::from_url)
        .unwrap_or_default();
    let launch = LaunchOptions {
        force_anim: args.force_anim || from_page.force_anim,
    };
    let theme = Theme::resolve_boot(args.theme.as_deref(), args.prefers_dark);

    let shell = PortfolioShell::new(Arc::new(clock.clone()), device.subscribe(), launch, theme)?;
    let mut loader = shell.loader().subscribe();
    let section = shell.navigator().subscribe_section();
    let transitioning = shell.navigator().subscribe_transitioning();
    let is_mobile = device.current().is_mobile;
    let reduced_motion = device.current().prefers_reduced_motion;
    info!(
        width = args.width,
        is_mobile,
        theme = theme.as_str(),
        cursor = ?shell.cursor_style(),
        "previewing intro"
    );

    let frames = FrameProbe {
        loader: loader.clone(),
        section: section.clone(),
        transitioning: transitioning.clone(),
        is_mobile,
        reduced_motion,
    };
    tokio::spawn(log_loader(WatchStream::new(loader.clone()), frames.clone()));
    tokio::spawn(log_sections(WatchStream::from_changes(section.clone()), frames));

    let submitter: Arc<dyn ContactSubmitter> =
        Arc::new(HttpContactSubmitter::new(&args.server_url)?);
    let (commands, rx) = mpsc::channel(16);
    let task = tokio::spawn(run_shell(shell, clock, rx, submitter));

    if !launch.force_anim {
        loader
            .wait_for(|snapshot| snapshot.content_can_animate)
            .await
            .context("shell stopped before the intro finished")?;
    }

    for anchor in &args.visits {
        let Some(target) = SectionId::from_href(anchor) else {
            warn!(%anchor, "unknown section; known anchors: {}", known_anchors());
            continue;
        };
        commands
            .send(ShellCommand::NavigateHref(target.anchor().to_string()))
            .await?;
        tokio::time::sleep(TOTAL_TRANSITION).await;
    }

    commands.send(ShellCommand::Shutdown).await?;
    let shell = task.await?;
    println!(
        "final section={} frames={:?} content_can_animate={}",
        shell.navigator().current_section_id().nav_label(),
        shell.frame_state(),
        shell.content_can_animate()
    );
    Ok(())
}

#[derive(Clone)]
struct FrameProbe {
    loader: watch::Receiver<LoaderSnapshot>,
    section: watch::Receiver<usize>,
    transitioning: watch::Receiver<bool>,
    is_mobile: bool,
    reduced_motion: bool,
}

impl FrameProbe {
    fn describe(&self) -> String {
        let inputs = DecorationInputs::from_parts(
            &self.loader.borrow(),
            *self.transitioning.borrow(),
            *self.section.borrow(),
            self.reduced_motion,
        );
        format!(
            "{:?}",
            frame_presentation(self.is_mobile, decoration_state(&inputs))
        )
    }
}

async fn log_loader(mut updates: WatchStream<LoaderSnapshot>, frames: FrameProbe) {
    while let Some(snapshot) = updates.next().await {
        info!(phase = ?snapshot.phase(), frames = %frames.describe(), "loader");
    }
}

async fn log_sections(mut updates: WatchStream<usize>, frames: FrameProbe) {
    while let Some(index) = updates.next().await {
        let label = SectionId::from_index(index).map_or("?", SectionId::nav_label);
        info!(index, section = label, frames = %frames.describe(), "section");
    }
}

fn known_anchors() -> String {
    SECTIONS
        .iter()
        .map(|section| section.anchor())
        .collect::<Vec<_>>()
        .join(", ")
}

async fn run_contact(args: ContactArgs) -> Result<()> {
    let submitter = HttpContactSubmitter::new(&args.server_url)?;
    let mut form = ContactForm::new(Arc::new(TokioClock::new()));
    form.edit(FormField::Name, args.name);
    form.edit(FormField::Email, args.email);
    form.edit(FormField::Message, args.message);

    match form.submit(&submitter).await {
        ContactFormState::Succeeded { message, id } => {
            println!("{message}");
            if let Some(id) = id {
                println!("id: {id}");
            }
            Ok(())
        }
        ContactFormState::Failed { message, .. } => {
            print_field_errors(&form);
            bail!("{message}")
        }
        ContactFormState::Idle => {
            print_field_errors(&form);
            bail!("the form did not pass validation")
        }
        ContactFormState::Submitting => bail!("submission did not complete"),
    }
}

fn print_field_errors(form: &ContactForm) {
    for field in FormField::ALL {
        if let Some(error) = form.displayed_error(field) {
            eprintln!("{field:?}: {error}");
        }
    }
}
