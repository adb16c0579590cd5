//! WebP encoding through libwebp.

use image::DynamicImage;

use crate::config::{EncoderMode, EncodingConfig};

/// Encodes resized variants to WebP at a given quality.
#[derive(Debug, Clone, Copy)]
pub struct WebpEncoder {
    mode: EncoderMode,
}

impl WebpEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: EncodingConfig) -> Self {
        Self { mode: config.mode }
    }

    /// Whether a variant at `quality` is written losslessly.
    pub fn is_lossless(&self, quality: u8) -> bool {
        match self.mode {
            EncoderMode::Lossy => false,
            EncoderMode::Auto => quality >= 100,
        }
    }

    /// Encode `image` and return the WebP bytes.
    ///
    /// Images with an alpha channel keep it; everything else goes through as
    /// 8-bit RGB. The error string is libwebp's reason for rejecting the input.
    pub fn encode(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>, String> {
        let lossless = self.is_lossless(quality);
        let quality = f32::from(quality.min(100));

        let memory = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
                .encode_simple(lossless, quality)
        } else {
            let rgb = image.to_rgb8();
            webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height())
                .encode_simple(lossless, quality)
        }
        .map_err(|e| format!("WebP encoder error: {:?}", e))?;

        Ok(memory.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageFormat, Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn test_encode_produces_webp() {
        let encoder = WebpEncoder::new(EncodingConfig::default());
        let bytes = encoder.encode(&gradient(64, 48), 80).unwrap();

        // RIFF....WEBP container
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::WebP).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
    }

    #[test]
    fn test_encode_keeps_alpha() {
        let encoder = WebpEncoder::new(EncodingConfig::default());
        let bytes = encoder.encode(&DynamicImage::new_rgba8(32, 32), 75).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::WebP).unwrap();
        assert!(decoded.color().has_alpha());
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let encoder = WebpEncoder::new(EncodingConfig::default());
        let img = gradient(256, 256);
        let low = encoder.encode(&img, 10).unwrap();
        let high = encoder.encode(&img, 95).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_auto_mode_lossless_only_at_100() {
        let auto = WebpEncoder::new(EncodingConfig {
            mode: EncoderMode::Auto,
        });
        assert!(auto.is_lossless(100));
        assert!(!auto.is_lossless(99));

        let lossy = WebpEncoder::new(EncodingConfig::default());
        assert!(!lossy.is_lossless(100));
    }
}
