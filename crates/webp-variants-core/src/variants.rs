//! Variant resolution: turns either the fixed preset table or the six
//! user-entered fields into the ordered `VariantSpec` list for one run.

use crate::config::{CustomConfig, VariantNaming};
use crate::error::InputError;
use crate::types::VariantSpec;

/// (width, quality) for small, medium, large in fixed mode.
pub const FIXED_PRESETS: [(u32, u8); 3] = [(400, 75), (800, 80), (1200, 85)];

pub const FIELD_WIDTH: &str = "width";
pub const FIELD_MEDIUM_PERCENT: &str = "medium percentage";
pub const FIELD_SMALL_PERCENT: &str = "small percentage";
pub const FIELD_QUALITY_SMALL: &str = "small quality";
pub const FIELD_QUALITY_MEDIUM: &str = "medium quality";
pub const FIELD_QUALITY_LARGE: &str = "large quality";

/// Where the variant list comes from.
#[derive(Debug, Clone)]
pub enum VariantMode {
    /// The three hardcoded presets
    Fixed,
    /// Widths and qualities derived from user input
    Custom(VariantForm),
}

impl VariantMode {
    /// Build the variant list for one run.
    pub fn resolve(&self, naming: VariantNaming) -> Result<Vec<VariantSpec>, InputError> {
        match self {
            VariantMode::Fixed => Ok(fixed_variants(naming)),
            VariantMode::Custom(form) => form.resolve(naming),
        }
    }
}

/// The fixed presets with the given naming, in small → large order.
pub fn fixed_variants(naming: VariantNaming) -> Vec<VariantSpec> {
    naming
        .names()
        .iter()
        .zip(FIXED_PRESETS)
        .map(|(name, (width, quality))| VariantSpec::new(*name, width, quality))
        .collect()
}

/// Raw text of the configurable-mode fields, exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantForm {
    pub width: String,
    pub medium_percent: String,
    pub small_percent: String,
    pub quality_small: String,
    pub quality_medium: String,
    pub quality_large: String,
}

impl VariantForm {
    /// Pre-fill the form from the config file's `[custom]` section.
    pub fn from_defaults(custom: &CustomConfig) -> Self {
        Self {
            width: custom.width.to_string(),
            medium_percent: custom.medium_percent.to_string(),
            small_percent: custom.small_percent.to_string(),
            quality_small: custom.quality_small.to_string(),
            quality_medium: custom.quality_medium.to_string(),
            quality_large: custom.quality_large.to_string(),
        }
    }

    /// Validate every field and derive the three variants.
    ///
    /// Fields are checked in form order and the first failure is returned,
    /// so nothing is built from a partially valid form.
    pub fn resolve(&self, naming: VariantNaming) -> Result<Vec<VariantSpec>, InputError> {
        let width = parse_width(FIELD_WIDTH, &self.width)?;
        let medium_pct = parse_percent(FIELD_MEDIUM_PERCENT, &self.medium_percent)?;
        let small_pct = parse_percent(FIELD_SMALL_PERCENT, &self.small_percent)?;
        let q_small = parse_quality(FIELD_QUALITY_SMALL, &self.quality_small)?;
        let q_medium = parse_quality(FIELD_QUALITY_MEDIUM, &self.quality_medium)?;
        let q_large = parse_quality(FIELD_QUALITY_LARGE, &self.quality_large)?;

        let [small, medium, large] = naming.names();
        Ok(vec![
            VariantSpec::new(small, derive_width(width, small_pct), q_small),
            VariantSpec::new(medium, derive_width(width, medium_pct), q_medium),
            VariantSpec::new(large, width, q_large),
        ])
    }
}

/// `max(1, round(base · percent / 100))`, saturating at `u32::MAX`.
pub fn derive_width(base: u32, percent: f64) -> u32 {
    let scaled = (base as f64 * percent / 100.0).round();
    if scaled >= u32::MAX as f64 {
        u32::MAX
    } else {
        (scaled as u32).max(1)
    }
}

/// Parse a strictly positive whole number of pixels.
pub fn parse_width(field: &'static str, raw: &str) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::field(field, raw, "is required"));
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputError::field(field, raw, "must be a whole number"))?;
    if value <= 0 {
        return Err(InputError::field(field, raw, "must be greater than 0"));
    }
    u32::try_from(value).map_err(|_| InputError::field(field, raw, "is too large"))
}

/// Parse a strictly positive percentage; `,` and `.` are both decimal separators.
pub fn parse_percent(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::field(field, raw, "is required"));
    }
    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| InputError::field(field, raw, "must be a number"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(InputError::field(field, raw, "must be greater than 0"));
    }
    Ok(value)
}

/// Parse a WebP quality in `0..=100`.
pub fn parse_quality(field: &'static str, raw: &str) -> Result<u8, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::field(field, raw, "is required"));
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputError::field(field, raw, "must be a whole number"))?;
    if !(0..=100).contains(&value) {
        return Err(InputError::field(field, raw, "must be between 0 and 100"));
    }
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(width: &str, medium: &str, small: &str) -> VariantForm {
        VariantForm {
            width: width.to_string(),
            medium_percent: medium.to_string(),
            small_percent: small.to_string(),
            quality_small: "75".to_string(),
            quality_medium: "80".to_string(),
            quality_large: "85".to_string(),
        }
    }

    #[test]
    fn test_fixed_variants_spanish() {
        let variants = fixed_variants(VariantNaming::Spanish);
        assert_eq!(
            variants,
            vec![
                VariantSpec::new("chico", 400, 75),
                VariantSpec::new("mediano", 800, 80),
                VariantSpec::new("grande", 1200, 85),
            ]
        );
    }

    #[test]
    fn test_fixed_variants_english() {
        let names: Vec<_> = fixed_variants(VariantNaming::English)
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, ["small", "medium", "large"]);
    }

    #[test]
    fn test_width_rejects_zero_and_negative() {
        assert!(parse_width(FIELD_WIDTH, "0").is_err());
        assert!(parse_width(FIELD_WIDTH, "-5").is_err());
        assert!(parse_width(FIELD_WIDTH, "abc").is_err());
        assert!(parse_width(FIELD_WIDTH, "").is_err());
        assert!(parse_width(FIELD_WIDTH, "12.5").is_err());
        assert_eq!(parse_width(FIELD_WIDTH, " 1200 ").unwrap(), 1200);
    }

    #[test]
    fn test_percent_accepts_both_separators() {
        assert_eq!(parse_percent(FIELD_MEDIUM_PERCENT, "70").unwrap(), 70.0);
        assert_eq!(parse_percent(FIELD_MEDIUM_PERCENT, "70,5").unwrap(), 70.5);
        assert_eq!(parse_percent(FIELD_MEDIUM_PERCENT, "70.5").unwrap(), 70.5);
    }

    #[test]
    fn test_percent_rejects_zero() {
        assert!(parse_percent(FIELD_SMALL_PERCENT, "0").is_err());
        assert!(parse_percent(FIELD_SMALL_PERCENT, "0,0").is_err());
        assert!(parse_percent(FIELD_SMALL_PERCENT, "-10").is_err());
        assert!(parse_percent(FIELD_SMALL_PERCENT, "NaN").is_err());
        assert!(parse_percent(FIELD_SMALL_PERCENT, "inf").is_err());
    }

    #[test]
    fn test_quality_bounds() {
        assert!(parse_quality(FIELD_QUALITY_SMALL, "101").is_err());
        assert!(parse_quality(FIELD_QUALITY_SMALL, "-1").is_err());
        assert_eq!(parse_quality(FIELD_QUALITY_SMALL, "0").unwrap(), 0);
        assert_eq!(parse_quality(FIELD_QUALITY_SMALL, "100").unwrap(), 100);
    }

    #[test]
    fn test_derive_width() {
        assert_eq!(derive_width(1200, 70.0), 840);
        assert_eq!(derive_width(1000, 70.5), 705);
        assert_eq!(derive_width(10, 1.0), 1); // 0.1 rounds to 0, clamped to 1
        assert_eq!(derive_width(3, 50.0), 2); // 1.5 rounds away from zero
    }

    #[test]
    fn test_form_resolves_in_small_medium_large_order() {
        let variants = form("1000", "70,5", "30")
            .resolve(VariantNaming::Spanish)
            .unwrap();
        assert_eq!(
            variants,
            vec![
                VariantSpec::new("chico", 300, 75),
                VariantSpec::new("mediano", 705, 80),
                VariantSpec::new("grande", 1000, 85),
            ]
        );
    }

    #[test]
    fn test_form_reports_first_invalid_field() {
        let err = form("0", "0", "30")
            .resolve(VariantNaming::Spanish)
            .unwrap_err();
        assert_eq!(err.field_name(), Some(FIELD_WIDTH));

        let err = form("800", "0", "30")
            .resolve(VariantNaming::Spanish)
            .unwrap_err();
        assert_eq!(err.field_name(), Some(FIELD_MEDIUM_PERCENT));

        let mut bad_quality = form("800", "50", "25");
        bad_quality.quality_large = "101".to_string();
        let err = bad_quality.resolve(VariantNaming::English).unwrap_err();
        assert_eq!(err.field_name(), Some(FIELD_QUALITY_LARGE));
    }

    #[test]
    fn test_form_from_defaults_resolves() {
        let form = VariantForm::from_defaults(&CustomConfig::default());
        let variants = form.resolve(VariantNaming::English).unwrap();
        assert_eq!(variants[0], VariantSpec::new("small", 396, 75));
        assert_eq!(variants[1], VariantSpec::new("medium", 792, 80));
        assert_eq!(variants[2], VariantSpec::new("large", 1200, 85));
    }

    #[test]
    fn test_mode_fixed_ignores_form() {
        let variants = VariantMode::Fixed.resolve(VariantNaming::Spanish).unwrap();
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[2].target_width, 1200);
    }
}
