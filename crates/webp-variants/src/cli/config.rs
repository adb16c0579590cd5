//! The `webp-variants config` command.

use clap::{Args, Subcommand};
use std::path::Path;
use webp_variants_core::variants::fixed_variants;
use webp_variants_core::{Config, VariantForm};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective settings (file values over defaults, validated)
    Show,

    /// Print the config file location
    Path,

    /// Write a commented config file with the default settings
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Validate the config file and preview the variants it produces
    Check,
}

pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    let path = Config::default_path();
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("# {}", source_label(&path));
            println!("{}", config.to_toml()?);
        }
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Init { force } => init(&path, force)?,
        ConfigCommand::Check => {
            let config = Config::load()?;
            eprintln!("  {}: OK", source_label(&path));
            for line in variant_preview(&config) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn source_label(path: &Path) -> String {
    if path.exists() {
        format!("from {}", path.display())
    } else {
        format!("defaults ({} not found)", path.display())
    }
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "A config file already exists at {}\n\n  Hint: Pass --force to replace it.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, Config::default().to_annotated_toml()?)?;
    tracing::info!("Wrote default config to {}", path.display());
    println!("{}", path.display());
    Ok(())
}

/// One line per variant for both modes, using the config's naming and
/// `[custom]` defaults.
fn variant_preview(config: &Config) -> Vec<String> {
    let naming = config.variants.naming;
    let mut lines = Vec::new();
    for v in fixed_variants(naming) {
        lines.push(format!("fixed   {:<8} {:>5}px q{}", v.name, v.target_width, v.quality));
    }
    match VariantForm::from_defaults(&config.custom).resolve(naming) {
        Ok(custom) => {
            for v in custom {
                lines.push(format!("custom  {:<8} {:>5}px q{}", v.name, v.target_width, v.quality));
            }
        }
        Err(e) => lines.push(format!("custom  invalid: {e}")),
    }
    lines
}
