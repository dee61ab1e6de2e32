//! Product finder - Entry Point

use clap::Parser;
use prodfind::state::NavPolicy;
use std::path::PathBuf;
use tracing::info;

/// Product finder - search a product catalog as you type
#[derive(Parser, Debug)]
#[command(name = "prodfind")]
#[command(version)]
#[command(about = "TUI for searching a product catalog with a debounced results dropdown")]
pub struct Args {
    /// Start with this text already typed
    #[arg(short, long)]
    pub query: Option<String>,

    /// Catalog endpoint (http or https URL)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Debounce delay in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// What arrow keys do past the first or last result
    #[arg(long, value_enum)]
    pub nav: Option<NavPolicy>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = prodfind::config::load_config_with_precedence(args.config.clone())?;
        let merged = prodfind::config::merge_config(config_file);
        let with_env = prodfind::config::apply_env_overrides(merged);

        prodfind::config::apply_cli_overrides(
            with_env,
            args.endpoint.clone(),
            args.debounce_ms,
            args.nav,
        )
    };

    prodfind::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let options = prodfind::view::RunOptions {
        initial_query: args.query,
        no_color: args.no_color,
    };

    prodfind::view::run_with_config(&config, options)?;

    Ok(())
}
