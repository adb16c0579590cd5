//! Sub-configuration structs with their defaults.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Which files count as convertible images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Case-insensitive extension allow-list
    pub supported_formats: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            supported_formats: ["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Language used for the variant suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantNaming {
    /// `chico`, `mediano`, `grande`
    #[default]
    Spanish,
    /// `small`, `medium`, `large`
    English,
}

impl VariantNaming {
    /// Suffixes in output order: small, medium, large.
    pub fn names(self) -> [&'static str; 3] {
        match self {
            VariantNaming::Spanish => ["chico", "mediano", "grande"],
            VariantNaming::English => ["small", "medium", "large"],
        }
    }
}

/// Variant naming settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantsConfig {
    pub naming: VariantNaming,
}

/// Defaults for the user-configurable variant mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomConfig {
    /// Width of the large variant
    pub width: u32,

    /// Medium width as a percentage of `width`
    pub medium_percent: f64,

    /// Small width as a percentage of `width`
    pub small_percent: f64,

    pub quality_small: u8,
    pub quality_medium: u8,
    pub quality_large: u8,
}

impl Default for CustomConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            medium_percent: 66.0,
            small_percent: 33.0,
            quality_small: 75,
            quality_medium: 80,
            quality_large: 85,
        }
    }
}

/// How the WebP encoder picks between lossy and lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderMode {
    /// Always lossy at the variant quality
    #[default]
    Lossy,
    /// Lossless at quality 100, lossy below
    Auto,
}

/// WebP encoding settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    pub mode: EncoderMode,
}

/// Resampling filter used when shrinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Resize settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub filter: ResizeFilter,
}

/// Output location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Subfolder created inside the source folder
    pub folder_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder_name: "resultado".to_string(),
        }
    }
}

/// Settings for the background task feeding the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Max progress events buffered before the worker waits on the consumer
    pub progress_buffer: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { progress_buffer: 64 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
