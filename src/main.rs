use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use upload_form::config::Settings;
use upload_form::controller::{Collaborators, SubmitOutcome};
use upload_form::domain::Attachment;
use upload_form::repository::{HttpTransport, LogModal, LogNotifier};
use upload_form::util::FormError;
use upload_form::UploadFormContext;

/// Validate and submit an image upload form
#[derive(Parser)]
struct Opts {
    /// Image file to upload
    #[clap(long)]
    image: Option<PathBuf>,

    /// Free-text description
    #[clap(long, default_value = "")]
    description: String,

    /// Space separated hashtags, e.g. "#cat #sunset"
    #[clap(long, default_value = "")]
    hashtags: String,

    /// Override the configured upload endpoint
    #[clap(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let (mut settings, config_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(error) => (Settings::default(), Some(FormError::from(error))),
    };
    if let Some(endpoint) = opts.endpoint {
        settings.transport.endpoint = endpoint;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("upload_form={}", settings.logging.level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(error) = config_error {
        tracing::warn!(error = %error, "invalid configuration, using defaults");
    }

    let transport = HttpTransport::new(&settings.transport).map_err(FormError::from)?;
    tracing::info!("submitting upload form to {}", transport.endpoint());

    let context = UploadFormContext::new(
        &settings.form,
        Collaborators {
            transport: Arc::new(transport),
            notifier: Arc::new(LogNotifier),
            modal: Arc::new(LogModal),
        },
    );

    if let Some(path) = opts.image {
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(FormError::from)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        context
            .form()
            .attach(Attachment::new(file_name, content_type_for(&path), bytes));
    }
    context.form().description.set(opts.description);
    context.form().hashtags.set(opts.hashtags);

    let handler = context.set_form_submit()?;
    match handler.on_submit().await {
        SubmitOutcome::Sent => Ok(()),
        SubmitOutcome::Invalid => {
            for (field, message) in context.engine().errors() {
                eprintln!("{field}: {message}");
            }
            Err(anyhow!("form is invalid"))
        }
        SubmitOutcome::Failed => Err(anyhow!("upload failed")),
        SubmitOutcome::AlreadySending => Err(anyhow!("upload already in progress")),
    }
}

fn content_type_for(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
