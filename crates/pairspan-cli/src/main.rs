//! Pairspan CLI: upload a work log and show which employees worked together longest.
//!
//! Set PAIRSPAN_API_URL (or API_URL) to point at the processing service; defaults to
//! http://localhost:8080.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use pairspan_api_client::ApiClient;
use pairspan_cli::{init_tracing, DateFormatSelector, ResultsTable, RootView};
use pairspan_core::{AttachmentService, ClientConfig};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "pairspan", about = "Find the employee pairs that worked together longest")]
struct Cli {
    /// Base URL of the processing service (overrides PAIRSPAN_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a work-log file and show the computed pairs
    Upload {
        /// Path to the work-log file
        file: PathBuf,
        /// Date pattern used in the file (see `pairspan formats`)
        #[arg(long, default_value = "yyyy-MM-dd")]
        pattern: String,
        #[arg(long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
    /// Show the pairs computed for a file uploaded earlier
    Show {
        /// File name the work log was uploaded under
        identifier: String,
        #[arg(long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
    /// List the supported date patterns
    Formats,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn build_client(base_url: Option<String>) -> anyhow::Result<ApiClient> {
    let mut config = ClientConfig::from_env().context("Failed to read client configuration")?;
    if let Some(url) = base_url {
        config = config.with_base_url(url);
    }
    ApiClient::new(config).context("Failed to create API client")
}

async fn upload(
    client: ApiClient,
    file: PathBuf,
    pattern: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let session = CancellationToken::new();
    let service: Arc<dyn AttachmentService> = Arc::new(client);
    let mut view = RootView::with_cancellation(service, session.clone());
    view.select_pattern(pattern)?;

    let interrupt = session.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    view.submit(&file).await;
    if session.is_cancelled() {
        view.remove();
        tracing::info!("Upload abandoned");
        return Ok(());
    }

    if let Some(error) = view.error() {
        anyhow::bail!("{}", error);
    }

    match output {
        OutputFormat::Table => print!("{}", view.render()),
        OutputFormat::Json => match view.render_json().context("Serialize results")? {
            Some(json) => println!("{}", json),
            None => println!("[]"),
        },
    }
    Ok(())
}

async fn show(client: ApiClient, identifier: &str, output: OutputFormat) -> anyhow::Result<()> {
    let pairs = client
        .get_attachment_pairs(identifier)
        .await
        .with_context(|| format!("Failed to load results for {}", identifier))?;
    let table = ResultsTable::from_aggregates(&pairs);

    match output {
        OutputFormat::Table => print!("{}", table.render()),
        OutputFormat::Json => println!("{}", table.to_json().context("Serialize results")?),
    }
    Ok(())
}

fn print_formats() {
    let selector = DateFormatSelector::new();
    for format in selector.options() {
        if *format == selector.current() {
            println!("{} (default)", format);
        } else {
            println!("{}", format);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            file,
            pattern,
            output,
        } => upload(build_client(cli.base_url)?, file, &pattern, output).await,
        Commands::Show { identifier, output } => {
            show(build_client(cli.base_url)?, &identifier, output).await
        }
        Commands::Formats => {
            print_formats();
            Ok(())
        }
    }
}
