use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, Instrument};

use user_form::{setup_tracing, FormConfig, FormSystem, SubmitStatus, UserRecord};

/// Create or update one user through the form.
#[derive(Debug, Parser)]
#[command(name = "user_form")]
struct Cli {
    /// Origin the `/api/users/` endpoints live under.
    #[arg(long, env = "USER_FORM_API_BASE", default_value = user_form::config::DEFAULT_API_BASE)]
    api_base: String,

    /// Close the error notification after this many milliseconds; 0 keeps it.
    #[arg(long, env = "USER_FORM_AUTO_HIDE_MS", default_value_t = 6000)]
    auto_hide_ms: u64,

    /// Existing user to edit. Without it a new user is created.
    #[arg(long)]
    id: Option<String>,

    /// Username to save.
    #[arg(long)]
    username: String,

    /// Email address to save.
    #[arg(long)]
    email: String,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    let auto_hide = (cli.auto_hide_ms > 0).then(|| Duration::from_millis(cli.auto_hide_ms));
    let config = FormConfig::default()
        .with_api_base(&cli.api_base)
        .map_err(|e| e.to_string())?
        .with_notification_auto_hide(auto_hide);

    let user = cli.id.map(|id| Arc::new(UserRecord::new(id, "", "")));
    let system =
        FormSystem::mount(&config, user, || info!("Host notified of save")).map_err(|e| e.to_string())?;
    let form = system.form_client.clone();

    let span = tracing::info_span!("user_submission");
    let view = async {
        form.set_username(cli.username).await.map_err(|e| e.to_string())?;
        form.set_email(cli.email).await.map_err(|e| e.to_string())?;

        match form.submit().await.map_err(|e| e.to_string())? {
            SubmitStatus::Started(kind) => info!(?kind, "Request sent"),
            SubmitStatus::AlreadySubmitting => info!("Request already outstanding"),
        }
        form.settled().await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;

    if view.notification.visible {
        error!(reason = %view.notification.message, "Save failed");
        return Err(view.notification.message);
    }
    info!(title = view.title(), "Save completed");
    Ok(())
}
