//! Image decoding with content-based format detection.

use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Decodes source images off the async runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

/// A decoded source image, owned by one loop iteration.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Read and decode `path` on the blocking pool.
    pub async fn decode(&self, path: &Path) -> PipelineResult<DecodedImage> {
        let path_owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::decode_sync(&path_owned))
            .await
            .map_err(|e| PipelineError::Task {
                stage: "decode",
                message: e.to_string(),
            })?
    }

    /// Synchronous decode (runs in spawn_blocking).
    ///
    /// The format is sniffed from the file contents first; the extension is
    /// only consulted when the magic bytes are not recognized.
    pub fn decode_sync(path: &Path) -> PipelineResult<DecodedImage> {
        let bytes = std::fs::read(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read file: {}", e),
        })?;

        let mut reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = match reader.format() {
            Some(f) => f,
            None => {
                let f = ImageFormat::from_path(path).map_err(|e| PipelineError::Decode {
                    path: path.to_path_buf(),
                    message: format!("Unrecognized image format: {}", e),
                })?;
                reader.set_format(f);
                f
            }
        };
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}

/// Short lowercase name of a source format, for logs.
pub fn format_to_string(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::Gif => "gif",
        ImageFormat::Tiff => "tiff",
        ImageFormat::Bmp => "bmp",
        ImageFormat::WebP => "webp",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_to_string() {
        assert_eq!(format_to_string(ImageFormat::Jpeg), "jpeg");
        assert_eq!(format_to_string(ImageFormat::Tiff), "tiff");
        assert_eq!(format_to_string(ImageFormat::Ico), "other");
    }

    #[test]
    fn test_format_detected_by_content() {
        // A PNG saved under a .jpg name is still decoded as PNG
        let dir = tempfile::tempdir().unwrap();
        let misnamed = dir.path().join("misnamed.jpg");
        DynamicImage::new_rgb8(20, 10)
            .save_with_format(&misnamed, ImageFormat::Png)
            .unwrap();

        let result = ImageDecoder::decode_sync(&misnamed).unwrap();
        assert_eq!(result.format, ImageFormat::Png);
        assert_eq!((result.width, result.height), (20, 10));
    }

    #[tokio::test]
    async fn test_decode_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"\x89PNG\r\n\x1a\nthis is not a png").unwrap();

        let err = ImageDecoder::new().decode(&broken).await.err().unwrap();
        assert!(matches!(err, PipelineError::Decode { .. }));
        assert!(err.to_string().contains("broken.png"));
    }

    #[tokio::test]
    async fn test_decode_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageDecoder::new()
            .decode(&dir.path().join("gone.jpg"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }
}
