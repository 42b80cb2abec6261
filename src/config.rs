//! Configuration management and validation.
//!
//! Collects the run settings a normalization needs in one serializable
//! structure, with builder methods for programmatic use and validation
//! of the paths it refers to.

use crate::app::services::normalizer::NormalizeOptions;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for one normalization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Replace existing output files instead of refusing to run
    pub overwrite: bool,

    /// Report unresolved parameter references without failing the run
    pub allow_missing_refs: bool,

    /// Reference-map CSV mapping `<formula>-<slot>-<ref_id>` keys to
    /// source identities
    pub reference_map: Option<PathBuf>,

    /// Existing states file to seed the state registry from, keeping
    /// identities stable across incremental runs
    pub states_seed: Option<PathBuf>,

    /// Logging level name passed to the tracing filter
    pub log_level: String,

    /// Draw a progress bar while processing
    pub show_progress: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            allow_missing_refs: false,
            reference_map: None,
            states_seed: None,
            log_level: "warn".to_string(),
            show_progress: true,
        }
    }
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_allow_missing_refs(mut self, allow: bool) -> Self {
        self.allow_missing_refs = allow;
        self
    }

    pub fn with_reference_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_map = Some(path.into());
        self
    }

    pub fn with_states_seed(mut self, path: impl Into<PathBuf>) -> Self {
        self.states_seed = Some(path.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.reference_map {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Reference map does not exist: {}",
                    path.display()
                )));
            }
            if !path.is_file() {
                return Err(Error::configuration(format!(
                    "Reference map is not a file: {}",
                    path.display()
                )));
            }
        }

        if let Some(path) = &self.states_seed {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "States seed file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// The pipeline options this configuration describes
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            overwrite: self.overwrite,
            allow_missing_refs: self.allow_missing_refs,
            states_seed: self.states_seed.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_validates() {
        let config = ProcessorConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.overwrite);
        assert!(!config.allow_missing_refs);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_builder_methods() {
        let config = ProcessorConfig::new()
            .with_overwrite(true)
            .with_allow_missing_refs(true)
            .with_log_level("debug");

        assert!(config.overwrite);
        assert!(config.allow_missing_refs);
        assert_eq!(config.log_level, "debug");

        let options = config.normalize_options();
        assert!(options.overwrite);
        assert!(options.allow_missing_refs);
        assert!(options.states_seed.is_none());
    }

    #[test]
    fn test_missing_reference_map_fails_validation() {
        let config = ProcessorConfig::new().with_reference_map("/nonexistent/refs.csv");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_existing_paths_pass_validation() {
        let temp_dir = TempDir::new().unwrap();
        let refs = temp_dir.path().join("refs.csv");
        let states = temp_dir.path().join("old.states");
        fs::write(&refs, "key,source_id\n").unwrap();
        fs::write(&states, "").unwrap();

        let config = ProcessorConfig::new()
            .with_reference_map(&refs)
            .with_states_seed(&states);
        assert!(config.validate().is_ok());
        assert_eq!(config.normalize_options().states_seed, Some(states));
    }
}
