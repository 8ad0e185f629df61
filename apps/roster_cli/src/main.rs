use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roster_client::HttpRosterClient;
use roster_ui::{
    page::SharedPage, render::UnregisterBinding, ControllerConfig, LoadOutcome, MutationOutcome,
    MutationStatus, PageEvent, RosterController,
};
use shared::domain::ActivityName;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, normalize_server_url};

#[derive(Parser, Debug)]
#[command(about = "Load the activity roster and apply one signup or unregistration")]
struct Args {
    /// Base URL of the activities API.
    #[arg(long)]
    server_url: Option<String>,
    /// Milliseconds before a notification hides itself.
    #[arg(long)]
    hide_ms: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print the roster page.
    Show,
    /// Sign an email up for an activity through the signup form.
    Signup {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Remove a participant through their unregister control.
    Unregister {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = &args.server_url {
        settings.server_url = normalize_server_url(server_url);
    }
    if let Some(hide_ms) = args.hide_ms {
        settings.notification_hide_ms = hide_ms;
    }

    let client = HttpRosterClient::with_timeout(&settings.server_url, settings.request_timeout())
        .with_context(|| format!("cannot use server url {}", settings.server_url))?;
    let controller = RosterController::new(
        Arc::new(client),
        ControllerConfig {
            notification_hide_delay: settings.hide_delay(),
        },
    );

    if controller.start().await == LoadOutcome::Failed {
        warn!(server_url = %settings.server_url, "roster: startup load failed");
    }

    match args.command {
        Command::Show => {}
        Command::Signup { activity, email } => {
            let activity = ActivityName::parse(activity)?;
            controller
                .handle_event(PageEvent::SelectActivity(activity.to_string()))
                .await;
            controller.handle_event(PageEvent::EditEmail(email)).await;
            let outcome = controller.handle_event(PageEvent::SubmitSignup).await;
            if let Some(mutation) = outcome.mutation {
                report_mutation(mutation, &format!("activity {activity} is not selectable"))
                    .await;
            }
        }
        Command::Unregister { activity, email } => {
            let binding = UnregisterBinding::new(ActivityName::parse(activity)?, email);
            let control = controller
                .page()
                .lock()
                .await
                .roster_list
                .controls()
                .into_iter()
                .find(|key| key.binding == binding);
            match control {
                Some(control) => {
                    let outcome = controller
                        .handle_event(PageEvent::ActivateUnregister(control))
                        .await;
                    if let Some(mutation) = outcome.mutation {
                        report_mutation(mutation, "unregister control is busy").await;
                    }
                }
                None => println!(
                    "no unregister control for {} in {}",
                    binding.email, binding.activity
                ),
            }
        }
    }

    print_page(controller.page()).await;
    Ok(())
}

async fn report_mutation(mutation: MutationOutcome, ignored_reason: &str) {
    if mutation.status == MutationStatus::Ignored {
        println!("nothing sent: {ignored_reason}");
        return;
    }
    if mutation.wait_for_reload().await == Some(LoadOutcome::Failed) {
        warn!("roster: reload after mutation failed");
    }
}

async fn print_page(page: &SharedPage) {
    let page = page.lock().await;
    if page.notification.is_visible() {
        let polarity = page
            .notification
            .polarity()
            .map(|polarity| polarity.class())
            .unwrap_or("info");
        println!("[{polarity}] {}", page.notification.text());
    }
    println!("{}", page.to_html());
}
