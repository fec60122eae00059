//! nested-route command line.
//!
//! ```text
//! nested-route --config rules.toml build site/category lang=en path=books/sci-fi
//!     → /cat/lang/en/books/sci-fi
//!
//! nested-route --config rules.toml match /cat/lang/en/books/sci-fi
//!     → {"route": "site/category", "params": {"lang": "en", "path": "books/sci-fi"}}
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use nested_route::config::loader::load_config;
use nested_route::config::watcher::ConfigWatcher;
use nested_route::observability::logging::init_logging;
use nested_route::routing::{Params, SharedManager, UrlManager};

#[derive(Parser)]
#[command(name = "nested-route")]
#[command(about = "Build and resolve URLs with nested path rules", long_about = None)]
struct Cli {
    /// Rule file (TOML).
    #[arg(short, long)]
    config: PathBuf,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a URL for a route
    Build {
        route: String,
        /// Parameters as key=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Resolve a path to a route and parameters
    Match { path: String },
    /// Validate the rule file
    Check,
    /// Keep the rules live-reloaded until Ctrl-C
    Watch,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_logging(&config.logging)?;

    tracing::info!(
        path = ?cli.config,
        rules = config.rules.len(),
        base_url = %config.base_url,
        "Configuration loaded"
    );

    let manager = UrlManager::from_config(&config)?;

    match cli.command {
        Commands::Build { route, params } => {
            let params: Params = params.into_iter().collect();
            println!("{}", manager.create_url(&route, &params)?);
        }
        Commands::Match { path } => {
            let found = manager.parse_url(&path)?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Commands::Check => {
            println!("ok: {} rule(s)", manager.len());
        }
        Commands::Watch => watch(cli.config, manager).await?,
    }

    Ok(())
}

async fn watch(path: PathBuf, manager: UrlManager) -> Result<(), Box<dyn std::error::Error>> {
    let shared = SharedManager::new(manager);
    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
            update = updates.recv() => match update {
                Some(next) => {
                    let rules = next.len();
                    shared.replace(next);
                    tracing::info!(rules, "Rules swapped in");
                }
                None => break,
            },
        }
    }

    tracing::info!(rules = shared.load().len(), "Watch stopped");
    Ok(())
}
