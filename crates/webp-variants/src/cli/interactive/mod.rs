//! Interactive CLI mode, the guided experience for a bare `webp-variants`
//! invocation on a TTY.
//!
//! Menu-driven front end that collects the same inputs as the flag-based CLI
//! and delegates to the same conversion logic.

pub mod convert;

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use webp_variants_core::variants::fixed_variants;
use webp_variants_core::Config;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Prompt style shared by every interactive screen. Output goes to stderr.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("›".to_string()).for_stderr().magenta(),
        active_item_prefix: style("•".to_string()).for_stderr().magenta(),
        active_item_style: Style::new().for_stderr().magenta().bold(),
        values_style: Style::new().for_stderr().magenta(),
        ..ColorfulTheme::default()
    }
}

/// One-line header naming the variants and where they will be written.
fn header(config: &Config) -> String {
    let names = config.variants.naming.names().join(" / ");
    format!(
        "webp-variants v{}  ·  {} → <folder>/{}/",
        webp_variants_core::VERSION,
        names,
        config.output.folder_name
    )
}

/// Main menu options presented to the user.
const MENU_ITEMS: &[&str] = &["Convert a folder", "Show settings", "Exit"];

/// Entry point for interactive mode.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    eprintln!();
    eprintln!("  {}", Style::new().for_stderr().magenta().bold().apply_to(header(config)));
    eprintln!();

    let theme = prompt_theme();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => convert::guided_convert(config).await?,
            Some(1) => show_config(config)?,
            Some(2) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// Print a summary of the active settings.
fn show_config(config: &Config) -> anyhow::Result<()> {
    let theme = prompt_theme();
    let dim = Style::new().for_stderr().dim();
    let accent = Style::new().for_stderr().magenta();
    let label = Style::new().for_stderr().bold();

    loop {
        eprintln!();
        eprintln!("  {}", accent.apply_to("Current settings:"));
        eprintln!();

        let config_path = Config::default_path();
        let path_note = if config_path.exists() {
            "(exists)"
        } else {
            "(using defaults)"
        };

        eprintln!(
            "    {:<20} {} {}",
            label.apply_to("Config file:"),
            config_path.display(),
            dim.apply_to(path_note)
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Fixed presets:"),
            fixed_variants(config.variants.naming)
                .iter()
                .map(|v| format!("{} {}px q{}", v.name, v.target_width, v.quality))
                .collect::<Vec<_>>()
                .join(", ")
        );
        eprintln!(
            "    {:<20} {}px, medium {}%, small {}%",
            label.apply_to("Custom defaults:"),
            config.custom.width,
            config.custom.medium_percent,
            config.custom.small_percent
        );
        eprintln!(
            "    {:<20} {:?}",
            label.apply_to("Encoder:"),
            config.encoding.mode
        );
        eprintln!(
            "    {:<20} {:?}",
            label.apply_to("Resize filter:"),
            config.resize.filter
        );
        eprintln!(
            "    {:<20} {}/",
            label.apply_to("Output folder:"),
            config.output.folder_name
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Formats:"),
            config.discovery.supported_formats.join(", ")
        );
        eprintln!();

        let items = &["View full config (TOML)", "Show config file path", "Back"];

        let selection = Select::with_theme(&theme)
            .with_prompt("Settings")
            .items(items)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => match config.to_toml() {
                Ok(toml) => {
                    eprintln!();
                    eprintln!("{}", dim.apply_to("─".repeat(50)));
                    eprintln!("{toml}");
                    eprintln!("{}", dim.apply_to("─".repeat(50)));
                    eprintln!();
                }
                Err(e) => {
                    let err = Style::new().for_stderr().red();
                    eprintln!("  {} Failed to serialize config: {e}", err.apply_to("✗"));
                    eprintln!();
                }
            },
            Some(1) => {
                eprintln!();
                eprintln!("  {}", Config::default_path().display());
                eprintln!();
            }
            Some(2) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}
