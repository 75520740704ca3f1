//! Pipeline configuration

use meshquant_algorithms::AdaptiveConfig;
use meshquant_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// All knobs for one pipeline run, passed explicitly into each stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Bin resolution for uniform quantization
    pub num_bins: u32,
    /// Density window and width bounds for adaptive quantization
    pub adaptive: AdaptiveConfig,
    /// Number of random rigid transforms in the comparison experiment
    pub versions: usize,
    /// Seed for the transform generator, for reproducible runs
    pub seed: u64,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_bins < 2 {
            return Err(Error::InvalidConfig(format!(
                "num_bins must be >= 2, got {}",
                self.num_bins
            )));
        }
        if self.versions == 0 {
            return Err(Error::InvalidConfig(
                "versions must be at least 1".to_string(),
            ));
        }
        self.adaptive.validate()
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            num_bins: 1024,
            adaptive: AdaptiveConfig::default(),
            versions: 5,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = PipelineConfig::default();
        config.num_bins = 1;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.versions = 0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.adaptive.neighborhood_radius = -1.0;
        assert!(config.validate().is_err());
    }
}
