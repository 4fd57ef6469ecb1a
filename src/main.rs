//! cloudnav CLI - terminal browser for cloud resources

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

use cloudnav::api::{CloudApi, MockCloud};
use cloudnav::config::NavConfig;
use cloudnav::error::{FixSuggestion, NavError, Result};
use cloudnav::tui::{self, Context};

#[derive(Parser)]
#[command(name = "cloudnav")]
#[command(about = "Browse instances, Kubernetes clusters and node pools from the terminal")]
#[command(version)]
struct Cli {
    /// Project to open (overrides CLOUDNAV_PROJECT and the config file)
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Use this config file instead of ~/.config/cloudnav/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Simulated API latency of the demo backend, in milliseconds
    #[arg(long, default_value_t = 300)]
    latency_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Store the default project
    SetProject {
        /// Project identifier
        id: String,
        /// Display name shown in the header
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        None => browse(cli.config.as_deref(), cli.project.as_deref(), cli.latency_ms).await,
        Some(Commands::Config { action }) => config_command(cli.config.as_deref(), action),
    };

    if let Err(e) = result {
        tracing::error!(code = e.code(), "{}", e);
        let suggestion = e.fix_suggestion().map(str::to_string);
        eprintln!("{:?}", miette::Report::new(e));
        if let Some(suggestion) = suggestion {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

/// The TUI owns stdout, so logs go to `cloudnav.log` next to the config
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let dir = NavConfig::config_dir();
    let file = std::fs::create_dir_all(&dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("cloudnav.log"))
    });
    let writer = match file {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<NavConfig> {
    let config = match path {
        Some(path) => NavConfig::load_from(path)?,
        None => NavConfig::load()?,
    };
    Ok(config.with_env())
}

async fn browse(config_path: Option<&Path>, project: Option<&str>, latency_ms: u64) -> Result<()> {
    let config = load_config(config_path)?;
    let selection = config.resolve_project(project)?;
    tracing::info!(project = %selection.id, "starting browser");

    let api: Arc<dyn CloudApi> =
        Arc::new(MockCloud::demo().with_latency(Duration::from_millis(latency_ms)));
    let context = Context::new(selection.id, selection.name)
        .with_notification_ttl(config.ui.notification_ttl());

    tui::run(api, context, config.ui.tick_rate()).await
}

fn config_command(config_path: Option<&Path>, action: ConfigAction) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(NavConfig::config_path);

    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => {
            let config = load_config(Some(&path))?;
            let text = toml::to_string_pretty(&config).map_err(|e| NavError::ConfigError {
                reason: format!("Failed to serialize config: {}", e),
            })?;
            println!("{} {}", "→".cyan(), path.display().to_string().cyan().bold());
            print!("{}", text);
        }
        ConfigAction::SetProject { id, name } => {
            let mut config = NavConfig::load_from(&path)?;
            config.project.id = Some(id.clone());
            config.project.name = name;
            config.save_to(&path)?;
            println!("{} Default project set to {}", "✓".green(), id.bold());
        }
    }
    Ok(())
}
