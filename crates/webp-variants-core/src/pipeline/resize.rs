//! Width-bounded downscaling that never enlarges.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::config::ResizeConfig;

/// Output size for a source of `width × height` limited to `target_width`.
///
/// Sources already at or below the target keep their size. Wider sources are
/// scaled to exactly `target_width` with the height following the aspect
/// ratio, rounded, and never below 1.
pub fn target_dimensions(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    if width <= target_width {
        return (width, height);
    }
    let ratio = target_width as f64 / width as f64;
    let target_height = ((height as f64 * ratio).round() as u32).max(1);
    (target_width, target_height)
}

/// Produces resized copies of a decoded image.
#[derive(Clone)]
pub struct Resizer {
    filter: FilterType,
}

impl Resizer {
    pub fn new(config: ResizeConfig) -> Self {
        Self {
            filter: config.filter.into(),
        }
    }

    /// Return a copy of `image` scaled to [`target_dimensions`].
    ///
    /// The size is applied exactly, so a downscaled width always equals
    /// `target_width`. The source is only borrowed, so one decode serves
    /// every variant.
    pub fn resize(&self, image: &DynamicImage, target_width: u32) -> DynamicImage {
        let (width, height) = image.dimensions();
        let (w, h) = target_dimensions(width, height, target_width);
        if (w, h) == (width, height) {
            return image.clone();
        }
        image.resize_exact(w, h, self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_upscales() {
        assert_eq!(target_dimensions(300, 200, 400), (300, 200));
        assert_eq!(target_dimensions(400, 200, 400), (400, 200));
    }

    #[test]
    fn test_downscale_keeps_aspect() {
        assert_eq!(target_dimensions(1600, 1200, 400), (400, 300));
        assert_eq!(target_dimensions(1600, 1200, 800), (800, 600));
        assert_eq!(target_dimensions(1600, 1200, 1200), (1200, 900));
        // 1000 * 400/3000 = 133.33 → 133
        assert_eq!(target_dimensions(3000, 1000, 400), (400, 133));
    }

    #[test]
    fn test_height_never_zero() {
        assert_eq!(target_dimensions(1000, 3, 100), (100, 1));
    }

    #[test]
    fn test_resize_copy_leaves_source_untouched() {
        let resizer = Resizer::new(ResizeConfig::default());
        let source = DynamicImage::new_rgb8(1600, 1200);

        let small = resizer.resize(&source, 400);
        let large = resizer.resize(&source, 1200);

        assert_eq!(small.dimensions(), (400, 300));
        assert_eq!(large.dimensions(), (1200, 900));
        assert_eq!(source.dimensions(), (1600, 1200));
    }

    #[test]
    fn test_resize_hits_target_width_when_height_rounds_down() {
        let resizer = Resizer::new(ResizeConfig::default());

        let wide = resizer.resize(&DynamicImage::new_rgb8(3000, 1000), 400);
        assert_eq!(wide.dimensions(), (400, 133));

        let strip = resizer.resize(&DynamicImage::new_rgb8(1600, 5), 400);
        assert_eq!(strip.dimensions(), (400, 1));
    }

    #[test]
    fn test_resize_small_source_is_clone() {
        let resizer = Resizer::new(ResizeConfig::default());
        let source = DynamicImage::new_rgba8(300, 100);
        let out = resizer.resize(&source, 400);
        assert_eq!(out.dimensions(), (300, 100));
        assert!(out.color().has_alpha());
    }
}
