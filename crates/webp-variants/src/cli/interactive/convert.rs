//! Guided conversion flow.
//!
//! Walks the user through: folder → image discovery → variant mode →
//! custom sizes (if any) → confirmation → conversion.
//! Builds a `ConvertArgs` and delegates to `cli::convert::execute_with_config()`.

use crate::cli::convert::{ConvertArgs, Mode};
use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use webp_variants_core::pipeline::FileDiscovery;
use webp_variants_core::variants::{
    self, parse_percent, parse_quality, parse_width, FIELD_MEDIUM_PERCENT, FIELD_QUALITY_LARGE,
    FIELD_QUALITY_MEDIUM, FIELD_QUALITY_SMALL, FIELD_SMALL_PERCENT, FIELD_WIDTH,
};
use webp_variants_core::{Config, InputError, VariantForm, VariantMode};

use super::prompt_theme;

/// Walk the user through one folder conversion.
pub async fn guided_convert(config: &Config) -> anyhow::Result<()> {
    let theme = prompt_theme();
    let warn = Style::new().for_stderr().yellow();

    // ── Steps 1+2: Folder with image discovery ──────────────────────────────

    let discovery = FileDiscovery::new(config.discovery.clone());
    let (folder, files) = loop {
        let Some(raw_path) = super::handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Folder with images")
                .interact_text(),
        )?
        else {
            return Ok(());
        };

        let folder = FileDiscovery::resolve_folder(&raw_path);
        match discovery.discover(&folder) {
            Ok(found) if found.is_empty() => {
                eprintln!(
                    "  {}",
                    warn.apply_to("No supported images found in that folder.")
                );
            }
            Ok(found) => break (folder, found),
            Err(e) => eprintln!("  {}", warn.apply_to(e.to_string())),
        }
    };

    let dim = Style::new().for_stderr().dim();
    eprintln!(
        "  {}",
        dim.apply_to(format!(
            "Found {} image(s) ({:.1} MB)",
            files.len(),
            FileDiscovery::total_size(&files) as f64 / 1_000_000.0
        ))
    );

    // ── Step 3: Variant mode ────────────────────────────────────────────────

    let fixed_label = format!(
        "Fixed sizes ({})",
        variants::FIXED_PRESETS
            .iter()
            .map(|(w, _)| format!("{w}px"))
            .collect::<Vec<_>>()
            .join(" / ")
    );
    let mode_items = [fixed_label.as_str(), "Custom sizes"];
    let Some(mode_choice) = Select::with_theme(&theme)
        .with_prompt("Variant sizes")
        .items(&mode_items)
        .default(0)
        .interact_opt()?
    else {
        return Ok(());
    };

    // ── Step 4: Custom fields ───────────────────────────────────────────────

    let (mode, form) = if mode_choice == 1 {
        let Some(form) = prompt_custom_form(&theme, config)? else {
            return Ok(());
        };
        (Mode::Custom, Some(form))
    } else {
        (Mode::Fixed, None)
    };

    let variant_mode = match &form {
        Some(form) => VariantMode::Custom(form.clone()),
        None => VariantMode::Fixed,
    };
    let specs = variant_mode.resolve(config.variants.naming)?;

    // ── Step 5: Confirmation ────────────────────────────────────────────────

    eprintln!();
    let bold = Style::new().for_stderr().bold();
    eprintln!(
        "  {}",
        bold.apply_to(format!(
            "Ready to write {} file(s) into {}/{}",
            files.len() * specs.len(),
            folder.display(),
            config.output.folder_name
        ))
    );
    for spec in &specs {
        eprintln!(
            "  {}",
            dim.apply_to(format!(
                "{:<8} {:>5}px  q{}",
                spec.name, spec.target_width, spec.quality
            ))
        );
    }
    eprintln!();

    let confirm = Confirm::with_theme(&theme)
        .with_prompt("Start converting?")
        .default(true)
        .interact_opt()?;

    if !matches!(confirm, Some(true)) {
        return Ok(());
    }

    // ── Step 6: Build ConvertArgs and delegate ──────────────────────────────

    let mut args = ConvertArgs {
        folder,
        mode,
        ..ConvertArgs::default()
    };
    if let Some(form) = form {
        args.width = Some(form.width);
        args.medium_percent = Some(form.medium_percent);
        args.small_percent = Some(form.small_percent);
        args.quality_small = Some(form.quality_small);
        args.quality_medium = Some(form.quality_medium);
        args.quality_large = Some(form.quality_large);
    }

    // Same config the summary above was built from
    if let Err(e) = crate::cli::convert::execute_with_config(args, config.clone()).await {
        let err = Style::new().for_stderr().red();
        eprintln!("  {} {e:#}", err.apply_to("✗"));
    }

    // ── Post-conversion menu ────────────────────────────────────────────────

    eprintln!();
    let post_items = &["Convert another folder", "Back to main menu"];
    let post_choice = Select::with_theme(&theme)
        .with_prompt("What next?")
        .items(post_items)
        .default(0)
        .interact_opt()?;

    if matches!(post_choice, Some(0)) {
        Box::pin(guided_convert(config)).await?;
    }

    Ok(())
}

/// Ask for the six custom fields, pre-filled from the `[custom]` config
/// section. Each prompt rejects values the resolver would reject.
/// Returns `Ok(None)` if the user interrupts.
fn prompt_custom_form(
    theme: &ColorfulTheme,
    config: &Config,
) -> anyhow::Result<Option<VariantForm>> {
    let defaults = VariantForm::from_defaults(&config.custom);

    let Some(width) = prompt_field(theme, "Large width (px)", defaults.width, |s| {
        parse_width(FIELD_WIDTH, s).map(drop)
    })?
    else {
        return Ok(None);
    };
    let Some(medium_percent) = prompt_field(
        theme,
        "Medium width (% of large)",
        defaults.medium_percent,
        |s| parse_percent(FIELD_MEDIUM_PERCENT, s).map(drop),
    )?
    else {
        return Ok(None);
    };
    let Some(small_percent) = prompt_field(
        theme,
        "Small width (% of large)",
        defaults.small_percent,
        |s| parse_percent(FIELD_SMALL_PERCENT, s).map(drop),
    )?
    else {
        return Ok(None);
    };
    let Some(quality_small) = prompt_field(
        theme,
        "Small quality (0-100)",
        defaults.quality_small,
        |s| parse_quality(FIELD_QUALITY_SMALL, s).map(drop),
    )?
    else {
        return Ok(None);
    };
    let Some(quality_medium) = prompt_field(
        theme,
        "Medium quality (0-100)",
        defaults.quality_medium,
        |s| parse_quality(FIELD_QUALITY_MEDIUM, s).map(drop),
    )?
    else {
        return Ok(None);
    };
    let Some(quality_large) = prompt_field(
        theme,
        "Large quality (0-100)",
        defaults.quality_large,
        |s| parse_quality(FIELD_QUALITY_LARGE, s).map(drop),
    )?
    else {
        return Ok(None);
    };

    Ok(Some(VariantForm {
        width,
        medium_percent,
        small_percent,
        quality_small,
        quality_medium,
        quality_large,
    }))
}

fn prompt_field(
    theme: &ColorfulTheme,
    prompt: &str,
    default: String,
    check: impl Fn(&str) -> Result<(), InputError>,
) -> anyhow::Result<Option<String>> {
    super::handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt(prompt)
            .default(default)
            .validate_with(|input: &String| -> Result<(), String> {
                check(input).map_err(|e| e.to_string())
            })
            .interact_text(),
    )
}
