//! Simulator configuration
//!
//! Features:
//! - Validation of frame size, frame count and policy
//! - Builder for programmatic setup

use crate::error::{Error, Result};
use crate::replacement::ReplacementPolicy;
use serde::{Deserialize, Serialize};

/// Widest supported frame size, in address bits
pub const MAX_FRAME_BITS: u32 = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Frame size as a power of two (offset width in bits)
    pub frame_bits: u32,

    /// Number of physical frames
    pub frames: usize,

    /// Replacement scheme; `None` is rejected by `validate`
    pub policy: Option<ReplacementPolicy>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            frame_bits: 0,
            frames: 0,
            policy: None,
        }
    }
}

impl SimulatorConfig {
    pub fn new(frame_bits: u32, frames: usize, policy: ReplacementPolicy) -> Self {
        Self {
            frame_bits,
            frames,
            policy: Some(policy),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.policy.is_none() {
            return Err(Error::ConfigError(
                "a replacement policy must be selected (fifo, lru or clock)".to_string(),
            ));
        }
        if self.frames == 0 {
            return Err(Error::ConfigError(
                "number of frames must be positive".to_string(),
            ));
        }
        if self.frame_bits == 0 || self.frame_bits > MAX_FRAME_BITS {
            return Err(Error::ConfigError(format!(
                "frame size must be between 1 and {} bits, got {}",
                MAX_FRAME_BITS, self.frame_bits
            )));
        }

        Ok(())
    }

    /// Bytes per frame
    pub fn frame_size(&self) -> u64 {
        1u64 << self.frame_bits
    }

    /// Mask selecting the in-frame offset of an address
    pub fn offset_mask(&self) -> u64 {
        self.frame_size() - 1
    }
}

/// Configuration builder for programmatic setup
pub struct ConfigBuilder {
    config: SimulatorConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SimulatorConfig::default(),
        }
    }

    pub fn with_frame_bits(mut self, bits: u32) -> Self {
        self.config.frame_bits = bits;
        self
    }

    pub fn with_frames(mut self, frames: usize) -> Self {
        self.config.frames = frames;
        self
    }

    pub fn with_policy(mut self, policy: ReplacementPolicy) -> Self {
        self.config.policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<SimulatorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_frame_bits(12)
            .with_frames(8)
            .with_policy(ReplacementPolicy::Clock)
            .build()
            .unwrap();

        assert_eq!(config.frame_size(), 4096);
        assert_eq!(config.offset_mask(), 0xfff);
        assert_eq!(config.policy, Some(ReplacementPolicy::Clock));
    }

    #[test]
    fn test_validation_requires_policy() {
        let config = SimulatorConfig {
            frame_bits: 4,
            frames: 2,
            policy: None,
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_validation_rejects_zero_sizes() {
        assert!(SimulatorConfig::new(0, 4, ReplacementPolicy::Fifo).validate().is_err());
        assert!(SimulatorConfig::new(4, 0, ReplacementPolicy::Fifo).validate().is_err());
        assert!(SimulatorConfig::new(64, 4, ReplacementPolicy::Fifo).validate().is_err());
        assert!(SimulatorConfig::new(63, 4, ReplacementPolicy::Fifo).validate().is_ok());
    }

    #[test]
    fn test_default_is_invalid() {
        assert!(ConfigBuilder::default().build().is_err());
    }
}
