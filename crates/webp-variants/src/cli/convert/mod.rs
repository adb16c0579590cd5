//! The `webp-variants convert` command.

mod batch;
mod setup;
pub mod types;

pub use types::{Encoder, Filter, Mode, Naming};

use clap::Args;
use std::path::PathBuf;
use webp_variants_core::pipeline::FileDiscovery;
use webp_variants_core::{BatchConverter, Config, VariantSpec};

use batch::{print_empty, run_batch};
use setup::setup_converter;

/// Arguments for the `convert` command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Folder containing the images to convert
    #[arg(required = true)]
    pub folder: PathBuf,

    /// Variant source: fixed presets or custom sizes
    #[arg(short, long, value_enum, default_value = "fixed")]
    pub mode: Mode,

    /// Custom mode: width of the large variant in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<String>,

    /// Custom mode: medium width as a percentage of --width (70 or 70,5)
    #[arg(long, allow_hyphen_values = true)]
    pub medium_percent: Option<String>,

    /// Custom mode: small width as a percentage of --width
    #[arg(long, allow_hyphen_values = true)]
    pub small_percent: Option<String>,

    /// Custom mode: WebP quality of the small variant (0-100)
    #[arg(long, allow_hyphen_values = true)]
    pub quality_small: Option<String>,

    /// Custom mode: WebP quality of the medium variant (0-100)
    #[arg(long, allow_hyphen_values = true)]
    pub quality_medium: Option<String>,

    /// Custom mode: WebP quality of the large variant (0-100)
    #[arg(long, allow_hyphen_values = true)]
    pub quality_large: Option<String>,

    /// Variant suffix language (overrides config)
    #[arg(long, value_enum)]
    pub naming: Option<Naming>,

    /// WebP encoder mode (overrides config)
    #[arg(long, value_enum)]
    pub encoder: Option<Encoder>,

    /// Resampling filter (overrides config)
    #[arg(long, value_enum)]
    pub filter: Option<Filter>,

    /// Name of the output subfolder (overrides config)
    #[arg(long)]
    pub output_folder: Option<String>,

    /// Print progress and the final report as JSON lines on stdout
    #[arg(long)]
    pub json: bool,
}

/// Manual Default impl for constructing ConvertArgs outside of clap.
///
/// Values match the clap annotations above. Used by the interactive module.
impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            folder: PathBuf::new(),
            mode: Mode::Fixed,
            width: None,
            medium_percent: None,
            small_percent: None,
            quality_small: None,
            quality_medium: None,
            quality_large: None,
            naming: None,
            encoder: None,
            filter: None,
            output_folder: None,
            json: false,
        }
    }
}

/// Conversion context assembled by setup_converter().
pub(crate) struct ConvertContext {
    pub converter: BatchConverter,
    pub variants: Vec<VariantSpec>,
    pub config: Config,
}

/// Execute the convert command with the config file on disk.
pub async fn execute(args: ConvertArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    execute_with_config(args, config).await
}

/// Execute the convert command against an already loaded config.
pub async fn execute_with_config(mut args: ConvertArgs, config: Config) -> anyhow::Result<()> {
    // Quoted paths reach us with `~` unexpanded.
    args.folder = FileDiscovery::resolve_folder(&args.folder.to_string_lossy());
    let ctx = setup_converter(&args, config)?;

    let Some(plan) = ctx.converter.plan(&args.folder, ctx.variants.clone())? else {
        print_empty(&args.folder, args.json)?;
        return Ok(());
    };

    tracing::info!(
        "Found {} image(s); writing {} variant(s) each into {}/",
        plan.files.len(),
        plan.variants.len(),
        ctx.config.output.folder_name
    );
    for variant in &plan.variants {
        tracing::debug!(
            "  {}: {}px q{}",
            variant.name,
            variant.target_width,
            variant.quality
        );
    }

    run_batch(&ctx.converter, plan, args.json).await?;
    Ok(())
}
