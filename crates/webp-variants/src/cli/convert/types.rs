//! CLI enum types for the convert command: variant mode, naming, encoder, filter.

use clap::ValueEnum;
use webp_variants_core::config::{EncoderMode, ResizeFilter, VariantNaming};

/// Where the three variants come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Fixed presets: 400px/q75, 800px/q80, 1200px/q85
    #[default]
    Fixed,
    /// Widths derived from --width and two percentages
    Custom,
}

/// Language of the variant suffixes.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Naming {
    /// chico, mediano, grande
    Spanish,
    /// small, medium, large
    English,
}

impl From<Naming> for VariantNaming {
    fn from(naming: Naming) -> Self {
        match naming {
            Naming::Spanish => VariantNaming::Spanish,
            Naming::English => VariantNaming::English,
        }
    }
}

/// WebP encoder mode.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Encoder {
    /// Always lossy
    Lossy,
    /// Lossless at quality 100, lossy below
    Auto,
}

impl From<Encoder> for EncoderMode {
    fn from(encoder: Encoder) -> Self {
        match encoder {
            Encoder::Lossy => EncoderMode::Lossy,
            Encoder::Auto => EncoderMode::Auto,
        }
    }
}

/// Resampling filter.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Filter {
    Nearest,
    Triangle,
    /// Same spelling as `[resize] filter` in the config file
    #[value(name = "catmull_rom")]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for ResizeFilter {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => ResizeFilter::Nearest,
            Filter::Triangle => ResizeFilter::Triangle,
            Filter::CatmullRom => ResizeFilter::CatmullRom,
            Filter::Gaussian => ResizeFilter::Gaussian,
            Filter::Lanczos3 => ResizeFilter::Lanczos3,
        }
    }
}
