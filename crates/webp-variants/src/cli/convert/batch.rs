//! Batch execution: background conversion with a progress bar or JSON progress lines.

use serde::Serialize;
use std::path::Path;

use webp_variants_core::pipeline::FileDiscovery;
use webp_variants_core::{BatchConverter, BatchPlan, BatchReport, ConversionProgress};

/// One line of `--json` output.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Progress {
        #[serde(flatten)]
        progress: &'a ConversionProgress,
        percent: f64,
    },
    Finished {
        #[serde(flatten)]
        report: &'a BatchReport,
    },
    Empty {
        folder: &'a Path,
    },
    Failed {
        message: String,
    },
}

impl JsonEvent<'_> {
    fn emit(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string(self)?);
        Ok(())
    }
}

/// Report a folder without supported images. Not an error.
pub fn print_empty(folder: &Path, json: bool) -> anyhow::Result<()> {
    if json {
        JsonEvent::Empty { folder }.emit()?;
    } else {
        eprintln!("  No images to convert in {}", folder.display());
    }
    Ok(())
}

/// Run `plan` on the converter's background task and render its progress
/// until it finishes or fails.
pub async fn run_batch(
    converter: &BatchConverter,
    plan: BatchPlan,
    json: bool,
) -> anyhow::Result<BatchReport> {
    let total = plan.total_steps();
    let total_bytes = FileDiscovery::total_size(&plan.files);
    let progress = (!json).then(|| create_progress_bar(total));

    let mut handle = converter.spawn(plan);
    while let Some(event) = handle.progress.recv().await {
        match &progress {
            Some(pb) => {
                pb.set_position(event.completed_steps);
                pb.set_message(format!(
                    "{} → {}",
                    event.current_file_name, event.current_variant
                ));
            }
            None => JsonEvent::Progress {
                progress: &event,
                percent: event.percent(),
            }
            .emit()?,
        }
    }

    match handle.finish().await {
        Ok(report) => {
            if let Some(pb) = &progress {
                pb.finish_and_clear();
                print_summary(&report, total_bytes);
            } else {
                JsonEvent::Finished { report: &report }.emit()?;
            }
            Ok(report)
        }
        Err(e) => {
            if let Some(pb) = &progress {
                pb.abandon();
            } else {
                JsonEvent::Failed {
                    message: e.to_string(),
                }
                .emit()?;
            }
            tracing::error!("Conversion aborted: {e}");
            Err(anyhow::Error::new(e).context("Conversion aborted; files written so far were kept"))
        }
    }
}

/// Create a progress bar counting (file, variant) steps.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after a finished batch.
fn print_summary(report: &BatchReport, total_bytes: u64) {
    let secs = report.elapsed.as_secs_f64();
    let rate = if secs > 0.0 {
        report.completed_steps as f64 / secs
    } else {
        0.0
    };
    let throughput = if secs > 0.0 {
        total_bytes as f64 / 1_000_000.0 / secs
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Images:       {:>8}", report.files);
    eprintln!("    Variants:     {:>8}", report.variants_per_file);
    eprintln!("    Written:      {:>8}", report.outputs.len());
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", secs);
    eprintln!("    Rate:         {:>7.1} files/sec", rate);
    eprintln!("    Throughput:   {:>7.1} MB/sec", throughput);
    eprintln!("  ====================================");
    eprintln!("    Output: {}", report.output_folder.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_progress_event_json_shape() {
        let progress = ConversionProgress {
            completed_steps: 2,
            total_steps: 4,
            current_file_name: "a.jpg".to_string(),
            current_variant: "mediano".to_string(),
        };
        let value = serde_json::to_value(JsonEvent::Progress {
            progress: &progress,
            percent: progress.percent(),
        })
        .unwrap();

        assert_eq!(value["event"], "progress");
        assert_eq!(value["completed_steps"], 2);
        assert_eq!(value["total_steps"], 4);
        assert_eq!(value["current_variant"], "mediano");
        assert_eq!(value["percent"], 50.0);
    }

    #[test]
    fn test_finished_event_json_shape() {
        let report = BatchReport {
            output_folder: PathBuf::from("/photos/resultado"),
            files: 1,
            variants_per_file: 3,
            completed_steps: 3,
            outputs: vec![PathBuf::from("/photos/resultado/a_chico.webp")],
            elapsed: Duration::from_millis(250),
        };
        let value = serde_json::to_value(JsonEvent::Finished { report: &report }).unwrap();
        assert_eq!(value["event"], "finished");
        assert_eq!(value["completed_steps"], 3);
        assert_eq!(value["elapsed"], 250);
    }

    #[tokio::test]
    async fn test_run_batch_json_mode() {
        use image::DynamicImage;
        use webp_variants_core::config::VariantNaming;
        use webp_variants_core::variants::fixed_variants;
        use webp_variants_core::Config;

        let dir = tempfile::tempdir().unwrap();
        DynamicImage::new_rgb8(1000, 500)
            .save_with_format(dir.path().join("x.png"), image::ImageFormat::Png)
            .unwrap();
        let converter = BatchConverter::new(&Config::default());
        let plan = converter
            .plan(dir.path(), fixed_variants(VariantNaming::Spanish))
            .unwrap()
            .unwrap();

        let report = run_batch(&converter, plan, true).await.unwrap();
        assert_eq!(report.completed_steps, 3);
        assert!(dir.path().join("resultado/x_grande.webp").exists());
    }
}
