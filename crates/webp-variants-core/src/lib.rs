//! WebP Variants Core - batch conversion of images into resized WebP files.
//!
//! Every supported image directly inside a folder is decoded once and written
//! as one WebP per variant (small, medium, large by default) into a
//! `resultado` subfolder, with a progress event after each file written.
//!
//! # Architecture
//!
//! ```text
//! Folder → Discover → (per file) Decode → (per variant) Resize → Encode WebP → Progress
//! ```
//!
//! The loop runs sequentially on one background task; the caller drains the
//! progress channel and then collects the final [`BatchReport`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use webp_variants_core::{BatchConverter, Config, VariantMode};
//!
//! #[tokio::main]
//! async fn main() -> webp_variants_core::Result<()> {
//!     let config = Config::load()?;
//!     let variants = VariantMode::Fixed.resolve(config.variants.naming)?;
//!     let converter = BatchConverter::new(&config);
//!
//!     if let Some(plan) = converter.plan("./photos".as_ref(), variants)? {
//!         let mut handle = converter.spawn(plan);
//!         while let Some(p) = handle.progress.recv().await {
//!             println!("{:.0}% {}", p.percent(), p.status_line());
//!         }
//!         let report = handle.finish().await?;
//!         println!("Wrote {} files", report.outputs.len());
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod variants;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, ConvertError, InputError, PipelineError, PipelineResult, Result};
pub use pipeline::{BatchConverter, BatchHandle, BatchPlan, DiscoveredFile};
pub use types::{BatchReport, ConversionProgress, VariantSpec};
pub use variants::{VariantForm, VariantMode};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_fixed_mode_from_default_config() {
        let config = Config::default();
        let variants = VariantMode::Fixed.resolve(config.variants.naming).unwrap();
        let names: Vec<_> = variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["chico", "mediano", "grande"]);
    }
}
