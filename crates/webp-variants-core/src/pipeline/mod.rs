//! Conversion pipeline components.
//!
//! This module contains all the stages of a batch:
//! - **discovery**: Find convertible images in a folder
//! - **decode**: Load and decode a source image once per file
//! - **resize**: Width-bounded downscaling, never enlarging
//! - **encode**: WebP encoding at the variant quality
//! - **channel**: Progress events from the batch to its presenter
//! - **processor**: Orchestrates the loop on a background task

pub mod channel;
pub mod decode;
pub mod discovery;
pub mod encode;
pub mod processor;
pub mod resize;

// Re-exports for convenient access
pub use channel::{progress_channel, ProgressReporter};
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use encode::WebpEncoder;
pub use processor::{BatchConverter, BatchHandle, BatchPlan};
pub use resize::{target_dimensions, Resizer};
