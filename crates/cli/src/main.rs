use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use github::{ApiConfig, GitHubClient};
use orchestrator::{AggregateStatus, BatchCreator, BulkReport, RepoCreator, RepositoryService};
use repoforge_core::CreateRepoRequest;
use server::config::{Settings, CONFIG_DIR, CONFIG_FILE};
use server::{create_router, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Client id the CLI reports in repository service logs.
const CLI_CLIENT_ID: &str = "repoforge-cli";

#[derive(Parser)]
#[command(name = "repoforge")]
#[command(about = "Create GitHub repositories one at a time or in batches", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the GitHub API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .repoforge/config.toml
    Init,
    /// Run the HTTP API
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create every repository named in a file, one name per line
    Bulk {
        file: PathBuf,

        /// Most repositories created at once
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    let mut settings = Settings::read(&cwd).await.with_env();
    if let Some(api_url) = cli.api_url {
        settings.github.api_url = api_url;
    }

    match cli.command {
        Commands::Init => init_project(&cwd).await,
        Commands::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            serve(settings).await
        }
        Commands::Bulk {
            file,
            concurrency,
            json,
        } => {
            if let Some(concurrency) = concurrency {
                settings.batch.max_concurrency = concurrency;
            }
            bulk(settings, &file, json).await
        }
    }
}

async fn init_project(cwd: &Path) -> Result<()> {
    let config_path = Settings::path(cwd);

    if config_path.exists() {
        println!("Project already initialized at {}", config_path.display());
        return Ok(());
    }

    Settings::default()
        .write(cwd)
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Initialized repoforge in {}", cwd.display());
    println!();
    println!("Created:");
    println!("  {}/", CONFIG_DIR);
    println!("  └── {}", CONFIG_FILE);
    println!();
    println!("Set GITHUB_TOKEN before running 'repoforge serve' or 'repoforge bulk'.");

    Ok(())
}

async fn serve(settings: Settings) -> Result<()> {
    init_tracing();

    let port = settings.server.port;
    tracing::info!("GitHub API: {}", settings.github.api_url);
    tracing::info!("Bulk concurrency: {}", settings.batch.max_concurrency);

    let state = AppState::from_settings(&settings)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    println!();
    println!("repoforge");
    println!("════════════════════════════════════════");
    println!();
    println!("  API Server:  http://localhost:{}", port);
    println!("  OpenAPI:     http://localhost:{}/api/openapi.json", port);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}

async fn bulk(settings: Settings, file: &Path, json: bool) -> Result<()> {
    init_tracing();

    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let requests = parse_requests(&content);

    let api_config = ApiConfig::new(settings.github.api_url.clone())
        .with_timeout(settings.github.timeout());
    let client = GitHubClient::from_env(api_config)
        .context("GITHUB_TOKEN must be set to create repositories")?;

    let creator: Arc<dyn RepoCreator> = Arc::new(RepositoryService::new(client));
    let batch = BatchCreator::new(creator).with_max_concurrency(settings.batch.max_concurrency)?;

    let report = batch.create_repos_bounded(CLI_CLIENT_ID, requests).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if report.status == AggregateStatus::AllFailed {
        bail!("no repositories were created (status {})", report.status_code);
    }

    Ok(())
}

/// One request per line. Blank lines stay in so they fail validation visibly.
fn parse_requests(content: &str) -> Vec<CreateRepoRequest> {
    content.lines().map(CreateRepoRequest::new).collect()
}

fn print_summary(report: &BulkReport) {
    println!();
    println!(
        "Batch finished: {} ({})",
        report.status.to_string().bold(),
        report.status_code
    );
    println!();

    if !report.succeeded.is_empty() {
        println!("Created ({}):", report.succeeded.len());
        for (name, response) in &report.succeeded {
            println!(
                "  {} {}/{} (id {})",
                "✓".green(),
                response.owner,
                name,
                response.id
            );
        }
    }

    if !report.failed.is_empty() {
        println!("Failed ({}):", report.failed.len());
        for (name, error) in &report.failed {
            let label = if name.trim().is_empty() {
                "<blank>"
            } else {
                name.as_str()
            };
            println!(
                "  {} {} [{}] {}",
                "✗".red(),
                label,
                error.status,
                error.message
            );
        }
    }

    println!();
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "repoforge=info,server=info,orchestrator=info,tower_http=info".into()
            }),
        )
        .init();
}
