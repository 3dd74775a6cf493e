use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::algorithm::HashingAlgorithm;
use crate::error::{Error, Result};
use crate::variants::AlgorithmKind;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Configuration for building a hashing algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Which algorithm to use
    pub algorithm: AlgorithmKind,

    /// Requested hash length in bits, excluding the guard bit
    pub bit_resolution: i32,

    /// Normalized Hamming distance at or below which two images count as similar (0-1)
    pub similarity_threshold: f64,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::Perceptual,
            bit_resolution: 64,
            similarity_threshold: 0.15,
            log_level: LogLevel::Info,
        }
    }
}

impl HasherConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: HasherConfig = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.bit_resolution < 0 {
            return Err(Error::Configuration(
                "Bit resolution must not be negative".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::Configuration(
                "Similarity threshold must be between 0 and 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate and construct the configured algorithm
    pub fn build(&self) -> Result<Box<dyn HashingAlgorithm>> {
        self.validate()?;
        self.algorithm.build(self.bit_resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image-hashing.json");

        let config = HasherConfig {
            algorithm: AlgorithmKind::Average,
            bit_resolution: 256,
            similarity_threshold: 0.2,
            log_level: LogLevel::Debug,
        };
        config.save_to_file(&path).unwrap();

        assert_eq!(HasherConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "algorithm": "average" }"#).unwrap();

        let config = HasherConfig::from_file(&path).unwrap();
        assert_eq!(config.algorithm, AlgorithmKind::Average);
        assert_eq!(config.bit_resolution, 64);
    }

    #[test]
    fn test_invalid_config() {
        let negative = HasherConfig {
            bit_resolution: -8,
            ..Default::default()
        };
        assert!(matches!(negative.validate(), Err(Error::Configuration(_))));
        assert!(negative.build().is_err());

        let threshold = HasherConfig {
            similarity_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(threshold.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempdir().unwrap();
        let result = HasherConfig::from_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_build_default() {
        let algorithm = HasherConfig::default().build().unwrap();
        assert_eq!(algorithm.bit_resolution().get(), 64);
        assert_eq!(algorithm.name(), "PerceptualHash");
    }
}
