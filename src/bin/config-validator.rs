//! # Draft Publish Configuration Validator
//!
//! Validates configuration files and prints the effective configuration.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process;

use draft_publish::config::ConfigManager;
use draft_publish::logging;

#[derive(Parser)]
#[command(name = "config-validator")]
#[command(about = "Validate draft publish configuration")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Environment overlay to apply (development, test, production)
    #[arg(short, long)]
    environment: Option<String>,

    /// Configuration directory path (default: config)
    #[arg(short, long, conflicts_with = "file")]
    config_dir: Option<PathBuf>,

    /// Validate a single file instead of a directory
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the effective configuration as JSON
    #[arg(long)]
    print: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_structured_logging();

    if let Err(err) = run(&cli) {
        eprintln!("❌ {err:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let manager = match (&cli.file, &cli.environment) {
        (Some(file), _) => ConfigManager::load_from_file(file)
            .with_context(|| format!("loading {}", file.display()))?,
        (None, Some(environment)) => {
            ConfigManager::load_from_directory_with_env(cli.config_dir.clone(), environment)
                .context("loading configuration directory")?
        }
        (None, None) => ConfigManager::load_from_directory(cli.config_dir.clone())
            .context("loading configuration directory")?,
    };

    println!(
        "✅ Configuration valid (environment: {})",
        manager.environment()
    );

    if cli.print {
        println!("{}", serde_json::to_string_pretty(&manager.debug_config())?);
    }

    Ok(())
}
