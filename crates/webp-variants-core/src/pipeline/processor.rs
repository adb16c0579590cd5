//! Batch orchestration: discovery, the per-file/per-variant loop, and the
//! background task that runs it.

use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{Config, OutputConfig, PipelineConfig};
use crate::error::{InputError, PipelineError, PipelineResult};
use crate::types::{BatchReport, ConversionProgress, VariantSpec};

use super::channel::{progress_channel, ProgressReporter};
use super::decode::{format_to_string, ImageDecoder};
use super::discovery::{DiscoveredFile, FileDiscovery};
use super::encode::WebpEncoder;
use super::resize::Resizer;

/// Everything a batch needs, fixed before the first decode.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    /// Folder the sources were discovered in
    pub source_folder: PathBuf,
    /// Folder receiving the variants
    pub output_folder: PathBuf,
    /// Sources in processing order
    pub files: Vec<DiscoveredFile>,
    /// Variants in output order
    pub variants: Vec<VariantSpec>,
}

impl BatchPlan {
    /// files × variants.
    pub fn total_steps(&self) -> u64 {
        (self.files.len() * self.variants.len()) as u64
    }

    /// `<output>/<base name>_<variant>.webp`
    pub fn output_path(&self, base_name: &str, variant: &VariantSpec) -> PathBuf {
        self.output_folder
            .join(format!("{}_{}.webp", base_name, variant.name))
    }
}

/// A batch running in the background.
///
/// Drain `progress` until it returns `None`, then call [`BatchHandle::finish`].
pub struct BatchHandle {
    pub progress: mpsc::Receiver<ConversionProgress>,
    task: JoinHandle<PipelineResult<BatchReport>>,
}

impl BatchHandle {
    /// Wait for the batch to end and return its report or the error that
    /// aborted it.
    pub async fn finish(self) -> PipelineResult<BatchReport> {
        drop(self.progress);
        self.task.await.map_err(|e| PipelineError::Task {
            stage: "batch",
            message: e.to_string(),
        })?
    }
}

/// Runs the conversion loop over a planned batch.
#[derive(Clone)]
pub struct BatchConverter {
    discovery: FileDiscovery,
    decoder: ImageDecoder,
    resizer: Resizer,
    encoder: WebpEncoder,
    output: OutputConfig,
    pipeline: PipelineConfig,
}

impl BatchConverter {
    /// Create a new converter with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            discovery: FileDiscovery::new(config.discovery.clone()),
            decoder: ImageDecoder::new(),
            resizer: Resizer::new(config.resize.clone()),
            encoder: WebpEncoder::new(config.encoding.clone()),
            output: config.output.clone(),
            pipeline: config.pipeline.clone(),
        }
    }

    /// Discover all convertible images directly inside `folder`.
    pub fn discover(&self, folder: &Path) -> Result<Vec<DiscoveredFile>, InputError> {
        self.discovery.discover(folder)
    }

    /// Validate the source folder and lay out the batch.
    ///
    /// Returns `Ok(None)` when the folder holds no supported images; nothing is
    /// created on disk in that case.
    pub fn plan(
        &self,
        source_folder: &Path,
        variants: Vec<VariantSpec>,
    ) -> Result<Option<BatchPlan>, InputError> {
        let files = self.discover(source_folder)?;
        if files.is_empty() {
            tracing::warn!("No supported image files found in {:?}", source_folder);
            return Ok(None);
        }
        Ok(Some(BatchPlan {
            source_folder: source_folder.to_path_buf(),
            output_folder: source_folder.join(self.output.folder_name.trim()),
            files,
            variants,
        }))
    }

    /// Start `plan` on a background task.
    pub fn spawn(&self, plan: BatchPlan) -> BatchHandle {
        let (tx, rx) = progress_channel(&self.pipeline);
        let converter = self.clone();
        let task = tokio::spawn(async move { converter.run(&plan, tx).await });
        BatchHandle { progress: rx, task }
    }

    /// Run the whole batch sequentially, publishing one event per variant
    /// written.
    ///
    /// The first failure aborts the batch. Files written before it stay.
    pub async fn run(
        &self,
        plan: &BatchPlan,
        progress: mpsc::Sender<ConversionProgress>,
    ) -> PipelineResult<BatchReport> {
        let start = Instant::now();
        std::fs::create_dir_all(&plan.output_folder).map_err(|source| {
            PipelineError::OutputFolder {
                path: plan.output_folder.clone(),
                source,
            }
        })?;

        tracing::info!(
            "Converting {} image(s) × {} variant(s) into {:?}",
            plan.files.len(),
            plan.variants.len(),
            plan.output_folder
        );

        let mut reporter = ProgressReporter::new(progress, plan.total_steps());
        let mut outputs = Vec::with_capacity(plan.total_steps() as usize);

        for file in &plan.files {
            let file_name = file.file_name();
            let base_name = file.base_name();

            let decode_start = Instant::now();
            let decoded = self.decoder.decode(&file.path).await?;
            tracing::debug!(
                "Decoded {} ({}x{} {}) in {:?}",
                file_name,
                decoded.width,
                decoded.height,
                format_to_string(decoded.format),
                decode_start.elapsed()
            );

            // Shared read-only with the blocking encode tasks; dropped before
            // the next file is decoded.
            let source = Arc::new(decoded.image);

            for variant in &plan.variants {
                let out_path = plan.output_path(&base_name, variant);
                let variant_start = Instant::now();
                let (w, h) = self
                    .write_variant(Arc::clone(&source), variant, &file.path, out_path.clone())
                    .await?;
                tracing::debug!(
                    "  {} → {}x{} q{} in {:?}",
                    variant.name,
                    w,
                    h,
                    variant.quality,
                    variant_start.elapsed()
                );
                outputs.push(out_path);
                reporter.step(&file_name, &variant.name).await;
            }
        }

        let elapsed = start.elapsed();
        tracing::info!(
            "Wrote {} file(s) in {:.1}s",
            outputs.len(),
            elapsed.as_secs_f64()
        );

        Ok(BatchReport {
            output_folder: plan.output_folder.clone(),
            files: plan.files.len(),
            variants_per_file: plan.variants.len(),
            completed_steps: reporter.completed(),
            outputs,
            elapsed,
        })
    }

    /// Resize, encode and write one variant on the blocking pool.
    async fn write_variant(
        &self,
        source: Arc<DynamicImage>,
        variant: &VariantSpec,
        source_path: &Path,
        out_path: PathBuf,
    ) -> PipelineResult<(u32, u32)> {
        let resizer = self.resizer.clone();
        let encoder = self.encoder;
        let target_width = variant.target_width;
        let quality = variant.quality;
        let variant_name = variant.name.clone();
        let source_path = source_path.to_path_buf();

        tokio::task::spawn_blocking(move || {
            let resized = resizer.resize(&source, target_width);
            let bytes = encoder
                .encode(&resized, quality)
                .map_err(|message| PipelineError::Encode {
                    path: source_path,
                    variant: variant_name,
                    message,
                })?;
            std::fs::write(&out_path, bytes).map_err(|source| PipelineError::Write {
                path: out_path.clone(),
                source,
            })?;
            Ok(resized.dimensions())
        })
        .await
        .map_err(|e| PipelineError::Task {
            stage: "encode",
            message: e.to_string(),
        })?
    }
}
