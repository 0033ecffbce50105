//! Gemlive - RubyGems dependency source resolver
//!
//! Usage:
//!   gemlive check              # Resolve every gem in ./Gemfile.lock
//!   gemlive check rake rspec   # Resolve specific gems
//!   gemlive lookup rails       # Resolve a single gem

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gemlive_core::client::GemsApiClient;
use gemlive_core::resolver::{ResolutionEngine, ResolutionResult};
use gemlive_core::{config, lockfile};

#[derive(Parser)]
#[command(name = "gemlive")]
#[command(about = "Resolve RubyGems dependencies to their source code repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve gems and print a grouped report
    Check {
        /// Gem names to resolve (defaults to the lockfile contents)
        gems: Vec<String>,

        /// Bundler lockfile to read gem names from
        #[arg(long, default_value = lockfile::DEFAULT_LOCKFILE)]
        lockfile: PathBuf,

        /// Override config file mapping gem names to repository URLs
        #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Resolve a single gem to its repository URL
    Lookup {
        /// Gem name
        name: String,

        /// Override config file mapping gem names to repository URLs
        #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemlive=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            gems,
            lockfile,
            config,
        } => check(gems, &lockfile, &config).await,
        Commands::Lookup { name, config } => lookup(&name, &config).await,
    }
}

async fn check(gems: Vec<String>, lockfile_path: &Path, config_path: &Path) -> Result<()> {
    let names = if gems.is_empty() {
        lockfile::load(lockfile_path)?
    } else {
        gems
    };
    if names.is_empty() {
        println!("No gems to resolve.");
        return Ok(());
    }
    tracing::debug!(count = names.len(), "resolving gems");

    let engine = build_engine(config_path)?;
    let result = engine
        .resolve(&names)
        .await
        .context("RubyGems.org lookup failed")?;

    render(&result);

    if !result.error_messages().is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

async fn lookup(name: &str, config_path: &Path) -> Result<()> {
    let engine = build_engine(config_path)?;
    let url = engine.lookup_one(name).await?;
    println!("{}", url.url());
    Ok(())
}

fn build_engine(config_path: &Path) -> Result<ResolutionEngine<GemsApiClient>> {
    let overrides = config::load_overrides(config_path)?;
    let client = GemsApiClient::new()?;
    Ok(ResolutionEngine::new(client, overrides))
}

fn render(result: &ResolutionResult) {
    for (service, urls) in result.service_urls() {
        println!("{}:", style(service).bold());
        let width = urls.iter().map(|u| u.gem_name().len()).max().unwrap_or(0);
        for url in urls {
            println!("  {:width$}  {}", url.gem_name(), url.url());
        }
    }

    if !result.error_messages().is_empty() {
        if result.resolved_count() > 0 {
            println!();
        }
        for message in result.error_messages() {
            eprintln!("{}", style(message).red());
        }
    }
}
