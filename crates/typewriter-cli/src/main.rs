use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use typewriter_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "typewriter")]
#[command(author, version, about = "Pull-to-refresh with a typewriter loading animation")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Seed for the typing randomness
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// How long a demo refresh takes, in milliseconds
    #[arg(long, global = true)]
    refresh_delay_ms: Option<u64>,

    /// Start fresh instead of resuming a refresh left running by the last session
    #[arg(long, global = true)]
    no_restore: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Print the configuration file location
    Path,
}

/// Log to a file; the terminal belongs to the TUI
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then apply command-line overrides
    let mut config = AppConfig::load()?;
    if let Some(seed) = cli.seed {
        config.animation.seed = Some(seed);
    }
    if let Some(delay) = cli.refresh_delay_ms {
        config.ui.refresh_delay_ms = delay;
    }

    init_logging(&config)?;
    let config = Arc::new(config);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, !cli.no_restore).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::config::init(force),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
