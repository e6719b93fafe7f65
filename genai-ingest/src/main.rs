use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use genai_ingest::config::{load_env_file, IngestSettings};
use genai_ingest::files::WaitForFileConfig;
use genai_ingest::ingest::{self, IngestRequest};
use genai_ingest::report::DEFAULT_MODEL;
use genai_ingest::types::files::UploadFileConfig;
use genai_ingest::Client;
use tracing_subscriber::EnvFilter;

/// Upload a local document to the Gemini Files API and print its handle.
#[derive(Parser, Debug)]
#[clap(name = "genai-ingest", version, about)]
struct Cli {
    /// File to upload
    #[clap(default_value = "data/ILPB.pdf")]
    file: PathBuf,

    /// Model named in the printed usage hint
    #[clap(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Display name stored alongside the file
    #[clap(long)]
    display_name: Option<String>,

    /// MIME type; guessed from the extension when omitted
    #[clap(long)]
    mime_type: Option<String>,

    /// Settings file loaded before reading the environment (default: ./.env if present)
    #[clap(long)]
    env_file: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[clap(long)]
    timeout: Option<u64>,

    /// Wait until the uploaded file is ACTIVE before printing the usage hint
    #[clap(long)]
    wait: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file =
        load_env_file(cli.env_file.as_deref()).context("failed to load settings file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = env_file {
        tracing::debug!(path = %path.display(), "loaded settings file");
    }

    let mut builder = Client::builder().settings(IngestSettings::from_env());
    if let Some(timeout) = cli.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().context("failed to build client")?;

    let request = IngestRequest {
        path: cli.file,
        upload: UploadFileConfig {
            display_name: cli.display_name,
            mime_type: cli.mime_type,
            ..UploadFileConfig::default()
        },
        model: cli.model,
        wait: cli.wait.then(WaitForFileConfig::default),
    };

    let mut stdout = std::io::stdout().lock();
    ingest::run(&client, &request, &mut stdout)
        .await
        .with_context(|| format!("failed to upload {}", request.path.display()))?;
    stdout.flush()?;
    Ok(())
}
