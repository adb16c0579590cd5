//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discovery.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "discovery.supported_formats must not be empty".into(),
            ));
        }
        let folder = self.output.folder_name.trim();
        if folder.is_empty() || folder.contains(['/', '\\']) || folder == "." || folder == ".." {
            return Err(ConfigError::ValidationError(
                "output.folder_name must be a plain folder name".into(),
            ));
        }
        if self.pipeline.progress_buffer == 0 {
            return Err(ConfigError::ValidationError(
                "pipeline.progress_buffer must be > 0".into(),
            ));
        }
        if self.custom.width == 0 {
            return Err(ConfigError::ValidationError(
                "custom.width must be > 0".into(),
            ));
        }
        for (name, pct) in [
            ("custom.medium_percent", self.custom.medium_percent),
            ("custom.small_percent", self.custom.small_percent),
        ] {
            if !pct.is_finite() || pct <= 0.0 {
                return Err(ConfigError::ValidationError(format!("{name} must be > 0")));
            }
        }
        for (name, quality) in [
            ("custom.quality_small", self.custom.quality_small),
            ("custom.quality_medium", self.custom.quality_medium),
            ("custom.quality_large", self.custom.quality_large),
        ] {
            if quality > 100 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be between 0 and 100"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_formats() {
        let mut config = Config::default();
        config.discovery.supported_formats.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("supported_formats"));
    }

    #[test]
    fn test_validate_rejects_nested_output_folder() {
        let mut config = Config::default();
        config.output.folder_name = "out/nested".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("folder_name"));

        config.output.folder_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_progress_buffer() {
        let mut config = Config::default();
        config.pipeline.progress_buffer = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("progress_buffer"));
    }

    #[test]
    fn test_validate_rejects_bad_custom_defaults() {
        let mut config = Config::default();
        config.custom.small_percent = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("small_percent"));

        let mut config = Config::default();
        config.custom.quality_large = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quality_large"));
    }
}
