//! Converter setup: config overrides, folder check, variant resolution.

use webp_variants_core::config::CustomConfig;
use webp_variants_core::pipeline::FileDiscovery;
use webp_variants_core::{BatchConverter, Config, InputError, VariantForm, VariantMode};

use super::types::Mode;
use super::{ConvertArgs, ConvertContext};

/// Validate input, apply flag overrides to `config` and resolve the variants
/// for this run.
///
/// Nothing is written to disk here; any error leaves the folder untouched.
pub fn setup_converter(args: &ConvertArgs, mut config: Config) -> anyhow::Result<ConvertContext> {
    if let Err(e) = FileDiscovery::check_folder(&args.folder) {
        anyhow::bail!("{e}\n\n  Hint: Pass the folder that contains your images.");
    }

    apply_overrides(&mut config, args)?;

    let mode = variant_mode(args, &config.custom);
    let variants = mode
        .resolve(config.variants.naming)
        .map_err(|e| anyhow::anyhow!(field_hint(&e)))?;

    let converter = BatchConverter::new(&config);

    Ok(ConvertContext {
        converter,
        variants,
        config,
    })
}

/// Apply CLI flags on top of the loaded config and re-validate.
fn apply_overrides(config: &mut Config, args: &ConvertArgs) -> anyhow::Result<()> {
    if let Some(naming) = args.naming {
        config.variants.naming = naming.into();
    }
    if let Some(encoder) = args.encoder {
        config.encoding.mode = encoder.into();
    }
    if let Some(filter) = args.filter {
        config.resize.filter = filter.into();
    }
    if let Some(folder) = &args.output_folder {
        config.output.folder_name = folder.trim().to_string();
    }
    config.validate()?;
    Ok(())
}

/// Build the variant mode; custom fields missing on the command line fall
/// back to the config file's `[custom]` defaults.
fn variant_mode(args: &ConvertArgs, custom: &CustomConfig) -> VariantMode {
    match args.mode {
        Mode::Fixed => VariantMode::Fixed,
        Mode::Custom => {
            let defaults = VariantForm::from_defaults(custom);
            let pick = |arg: &Option<String>, default: String| arg.clone().unwrap_or(default);
            VariantMode::Custom(VariantForm {
                width: pick(&args.width, defaults.width),
                medium_percent: pick(&args.medium_percent, defaults.medium_percent),
                small_percent: pick(&args.small_percent, defaults.small_percent),
                quality_small: pick(&args.quality_small, defaults.quality_small),
                quality_medium: pick(&args.quality_medium, defaults.quality_medium),
                quality_large: pick(&args.quality_large, defaults.quality_large),
            })
        }
    }
}

/// Point the user at the flag that holds the bad value.
fn field_hint(err: &InputError) -> String {
    let flag = match err.field_name() {
        Some(webp_variants_core::variants::FIELD_WIDTH) => "--width",
        Some(webp_variants_core::variants::FIELD_MEDIUM_PERCENT) => "--medium-percent",
        Some(webp_variants_core::variants::FIELD_SMALL_PERCENT) => "--small-percent",
        Some(webp_variants_core::variants::FIELD_QUALITY_SMALL) => "--quality-small",
        Some(webp_variants_core::variants::FIELD_QUALITY_MEDIUM) => "--quality-medium",
        Some(webp_variants_core::variants::FIELD_QUALITY_LARGE) => "--quality-large",
        _ => return err.to_string(),
    };
    format!("Invalid {err}\n\n  Hint: Check the value passed to {flag}.")
}
