//! WebP Variants CLI - turn a folder of images into small, medium and large WebP files.
//!
//! Every supported image directly inside the folder is written three times into
//! a `resultado` subfolder, once per variant, with progress shown as it goes.
//!
//! # Usage
//!
//! ```bash
//! # Fixed presets (400/800/1200 px)
//! webp-variants convert ./photos
//!
//! # Custom sizes derived from a base width
//! webp-variants convert ./photos --mode custom --width 1600 --medium-percent 62,5 --small-percent 25
//!
//! # Guided mode
//! webp-variants
//!
//! # View configuration
//! webp-variants config show
//! ```

use clap::{CommandFactory, Parser, Subcommand};

mod cli;
mod logging;

/// WebP Variants - batch-convert images into resized WebP variants.
#[derive(Parser, Debug)]
#[command(name = "webp-variants")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert every image in a folder into WebP variants
    Convert(cli::convert::ConvertArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match webp_variants_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `webp-variants config path`."
            );
            webp_variants_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("webp-variants v{}", webp_variants_core::VERSION);

    match cli.command {
        Some(Commands::Convert(args)) => cli::convert::execute(args).await,
        Some(Commands::Config(args)) => cli::config::execute(args).await,
        None if console::user_attended_stderr() => cli::interactive::run(&config).await,
        None => {
            Cli::command().print_help()?;
            anyhow::bail!("No command given and not running in a terminal");
        }
    }
}
