//! Configuration management.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section implements `Default`, so a partial file is fine.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which files are picked up
    pub discovery: DiscoveryConfig,

    /// Variant naming
    pub variants: VariantsConfig,

    /// Defaults for the configurable variant mode
    pub custom: CustomConfig,

    /// WebP encoder settings
    pub encoding: EncodingConfig,

    /// Resampling settings
    pub resize: ResizeConfig,

    /// Output folder settings
    pub output: OutputConfig,

    /// Background task settings
    pub pipeline: PipelineConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.webp-variants.webp-variants/config.toml
    /// - Linux: ~/.config/webp-variants/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\webp-variants\config\config.toml
    ///
    /// Falls back to ~/.webp-variants/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "webp-variants", "webp-variants")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home)
                    .join(".webp-variants")
                    .join("config.toml")
            })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Like [`Config::to_toml`], with a comment above each section header
    /// explaining what it controls. Used to seed a new config file.
    pub fn to_annotated_toml(&self) -> Result<String, ConfigError> {
        let plain = self.to_toml()?;
        let mut out = String::with_capacity(plain.len() + 1024);
        for line in plain.lines() {
            let section = line
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'));
            if let Some(note) = section.and_then(section_note) {
                for note_line in note.lines() {
                    out.push_str("# ");
                    out.push_str(note_line);
                    out.push('\n');
                }
            }
            out.push_str(line);
            out.push('\n');
        }
        Ok(out)
    }
}

fn section_note(section: &str) -> Option<&'static str> {
    let note = match section {
        "discovery" => "File extensions picked up from the top level of the source folder.",
        "variants" => "Suffix language: \"spanish\" (chico/mediano/grande) or \"english\".",
        "custom" => {
            "Pre-filled values for custom mode. `width` is the large variant;\n\
             medium and small are percentages of it. Qualities are 0-100."
        }
        "encoding" => {
            "\"lossy\" encodes every variant lossy at its quality.\n\
             \"auto\" switches to lossless for variants at quality 100."
        }
        "resize" => "nearest, triangle, catmull_rom, gaussian or lanczos3.",
        "output" => "Subfolder of the source folder that receives the variants.",
        "pipeline" => "Progress events buffered before the converter waits for the display.",
        "logging" => "level: error..trace. format: \"pretty\" or \"json\".",
        _ => return None,
    };
    Some(note)
}
