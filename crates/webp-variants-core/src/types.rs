//! Core data types shared between the pipeline and the presentation layer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One named output size: every source image yields one WebP per variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    /// Suffix used in the output file name (`<name>_<variant>.webp`)
    pub name: String,

    /// Maximum output width in pixels (always > 0)
    pub target_width: u32,

    /// WebP quality, 0..=100
    pub quality: u8,
}

impl VariantSpec {
    pub fn new(name: impl Into<String>, target_width: u32, quality: u8) -> Self {
        Self {
            name: name.into(),
            target_width,
            quality,
        }
    }
}

/// Emitted once per completed (file, variant) unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionProgress {
    /// Units finished so far, including this one
    pub completed_steps: u64,

    /// files × variants, fixed before the batch starts
    pub total_steps: u64,

    /// File name (with extension) of the source being processed
    pub current_file_name: String,

    /// Name of the variant that was just written
    pub current_variant: String,
}

impl ConversionProgress {
    /// Completion percentage in `0.0..=100.0`; 0 when there is nothing to do.
    pub fn percent(&self) -> f64 {
        if self.total_steps == 0 {
            return 0.0;
        }
        self.completed_steps as f64 / self.total_steps as f64 * 100.0
    }

    /// Whether this event closes the batch.
    pub fn is_last(&self) -> bool {
        self.completed_steps == self.total_steps
    }

    /// Human status string, e.g. `Processing photo.jpg → grande (3/6)`.
    pub fn status_line(&self) -> String {
        format!(
            "Processing {} → {} ({}/{})",
            self.current_file_name, self.current_variant, self.completed_steps, self.total_steps
        )
    }
}

/// Summary of a batch that ran to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Folder that received the variants
    pub output_folder: PathBuf,

    /// Number of source images converted
    pub files: usize,

    /// Variants written per source image
    pub variants_per_file: usize,

    /// Final value of the progress counter
    pub completed_steps: u64,

    /// Every file written, in processing order
    pub outputs: Vec<PathBuf>,

    /// Wall-clock time for the whole loop
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
