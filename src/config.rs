//! Configuration management and validation.
//!
//! Provides the run configuration for the validator: report format,
//! reference dataset location, the corrupt-input guard threshold, the vendor
//! extension prefix and progress display. Configuration is layered: built-in
//! defaults, then a TOML file, then command-line overrides.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_MAX_BAD_LENGTHS, DEFAULT_VENDOR_PREFIX,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output format of the compliance and consistency reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Plain text, one message per line
    #[default]
    Plain,
    /// HTML fragments with `<br />` line breaks and bold record headings
    Html,
}

/// Global configuration for a validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Report rendering format
    pub report_format: ReportFormat,

    /// Reference dataset replacing the built-in one
    pub reference_data: Option<PathBuf>,

    /// Consecutive non-numeric length fields tolerated before aborting
    pub max_bad_lengths: usize,

    /// Prefix of application-defined fields that are skipped entirely
    pub vendor_prefix: String,

    /// Show a progress bar on interactive terminals
    pub show_progress: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            report_format: ReportFormat::Plain,
            reference_data: None,
            max_bad_lengths: DEFAULT_MAX_BAD_LENGTHS,
            vendor_prefix: DEFAULT_VENDOR_PREFIX.to_string(),
            show_progress: true,
        }
    }
}

impl ValidatorConfig {
    /// Default location of the configuration file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let config: Self =
            toml::from_str(&text).map_err(|e| Error::toml_parsing(path.display().to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the file layer of the configuration
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise.
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading configuration from {}", path.display());
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                debug!("Loading configuration from {}", path.display());
                Self::load_from_file(&path)
            }
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check values that serde cannot constrain
    pub fn validate(&self) -> Result<()> {
        if self.max_bad_lengths == 0 {
            return Err(Error::configuration("max_bad_lengths must be at least 1"));
        }
        if self.vendor_prefix.trim().is_empty() {
            return Err(Error::configuration("vendor_prefix must not be empty"));
        }
        Ok(())
    }

    /// Set the report format
    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }

    /// Use a reference dataset from a file
    pub fn with_reference_data(mut self, path: PathBuf) -> Self {
        self.reference_data = Some(path);
        self
    }

    /// Set the corrupt-input guard threshold
    pub fn with_max_bad_lengths(mut self, max_bad_lengths: usize) -> Self {
        self.max_bad_lengths = max_bad_lengths;
        self
    }

    /// Set the vendor extension prefix
    pub fn with_vendor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.vendor_prefix = prefix.into().to_uppercase();
        self
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.report_format, ReportFormat::Plain);
        assert_eq!(config.max_bad_lengths, 500);
        assert_eq!(config.vendor_prefix, "APP_");
        assert!(config.reference_data.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ValidatorConfig::default()
            .with_report_format(ReportFormat::Html)
            .with_max_bad_lengths(10)
            .with_vendor_prefix("app_")
            .with_reference_data(PathBuf::from("/tmp/ref.toml"))
            .without_progress();

        assert_eq!(config.report_format, ReportFormat::Html);
        assert_eq!(config.max_bad_lengths, 10);
        assert_eq!(config.vendor_prefix, "APP_");
        assert_eq!(config.reference_data, Some(PathBuf::from("/tmp/ref.toml")));
        assert!(!config.show_progress);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "report_format = \"html\"").unwrap();

        let config = ValidatorConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.report_format, ReportFormat::Html);
        assert_eq!(config.max_bad_lengths, 500);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "workers = 4").unwrap();

        let result = ValidatorConfig::load_from_file(file.path());
        assert!(matches!(result, Err(Error::TomlParsing { .. })));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_bad_lengths = 0").unwrap();

        let result = ValidatorConfig::load_from_file(file.path());
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = ValidatorConfig::load_layered(Some(Path::new("/no/such/config.toml")));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
