//! Sampler configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HpcError, HpcResult};

/// Configuration of a periodic sampling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Device node to open; auto-detected when `None`
    pub device_path: Option<PathBuf>,
    /// Delay between two queries in milliseconds
    pub interval_ms: u64,
    /// Number of queries to take after the baseline
    pub samples: usize,
    /// Output verbosity
    pub verbosity: Verbosity,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            device_path: None,
            interval_ms: 1000,
            samples: 10,
            verbosity: Verbosity::Normal,
        }
    }
}

impl SamplerConfig {
    /// Single short sample with minimal output
    pub fn quick() -> Self {
        Self {
            device_path: None,
            interval_ms: 100,
            samples: 1,
            verbosity: Verbosity::Minimal,
        }
    }

    /// Frequent samples with everything printed
    pub fn debug() -> Self {
        Self {
            device_path: None,
            interval_ms: 100,
            samples: 100,
            verbosity: Verbosity::Debug,
        }
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> HpcResult<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(HpcError::Io)?;
        let config: SamplerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce samples
    pub fn validate(&self) -> HpcResult<()> {
        if self.interval_ms == 0 {
            return Err(HpcError::InvalidParameter("interval_ms must be greater than zero".to_string()));
        }
        if self.samples == 0 {
            return Err(HpcError::InvalidParameter("samples must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Verbosity level for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Only the final values
    Minimal,
    /// Values per sample
    Normal,
    /// Values plus slot and device details
    Detailed,
    /// Everything including lifecycle transitions
    Debug,
}

impl Verbosity {
    /// Whether this level includes output meant for `level`
    pub fn is_at_least(&self, level: Verbosity) -> bool {
        *self >= level
    }

    /// Level selected by a repeated `-v` flag
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Detailed,
            _ => Verbosity::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_presets_are_valid() {
        for config in [SamplerConfig::default(), SamplerConfig::quick(), SamplerConfig::debug()] {
            config.validate().unwrap();
        }
        assert_eq!(SamplerConfig::quick().samples, 1);
        assert_eq!(SamplerConfig::debug().verbosity, Verbosity::Debug);
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let config = SamplerConfig {
            interval_ms: 0,
            ..SamplerConfig::default()
        };
        assert!(matches!(config.validate(), Err(HpcError::InvalidParameter(_))));

        let config = SamplerConfig {
            samples: 0,
            ..SamplerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"device_path": "/dev/kgsl-3d0", "interval_ms": 250, "verbosity": "detailed"}}"#).unwrap();

        let config = SamplerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(
            config,
            SamplerConfig {
                device_path: Some(PathBuf::from("/dev/kgsl-3d0")),
                interval_ms: 250,
                samples: 10,
                verbosity: Verbosity::Detailed,
            }
        );
    }

    #[test]
    fn test_invalid_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(SamplerConfig::from_json_file(file.path()), Err(HpcError::Json(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"samples": 0}}"#).unwrap();
        assert!(matches!(SamplerConfig::from_json_file(file.path()), Err(HpcError::InvalidParameter(_))));
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Debug.is_at_least(Verbosity::Normal));
        assert!(!Verbosity::Minimal.is_at_least(Verbosity::Normal));
        assert_eq!(Verbosity::from_occurrences(0), Verbosity::Normal);
        assert_eq!(Verbosity::from_occurrences(5), Verbosity::Debug);
    }
}
