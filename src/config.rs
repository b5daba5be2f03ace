//! Training and evaluation settings

use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};

/// Tuning parameters forwarded to the trainer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrainingParams {
    /// Number of optimization passes
    pub iterations: u32,

    /// Minimum occurrences for a feature to be retained
    pub cutoff: u32,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            iterations: 100,
            cutoff: 5,
        }
    }
}

impl TrainingParams {
    pub fn new(iterations: u32, cutoff: u32) -> Result<Self> {
        let params = Self { iterations, cutoff };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(DetectorError::InvalidParameter {
                name: "iterations".into(),
                details: "must be positive".into(),
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }
}

/// Operational policy applied to scored batches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvaluationPolicy {
    /// Probability above which an address counts as invalid
    pub invalid_threshold: f64,

    /// Bounces tolerated before a batch stops sending
    pub max_bounces: usize,
}

impl Default for EvaluationPolicy {
    fn default() -> Self {
        Self {
            invalid_threshold: 0.2497,
            max_bounces: 25,
        }
    }
}

impl EvaluationPolicy {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.invalid_threshold) {
            return Err(DetectorError::InvalidParameter {
                name: "invalid_threshold".into(),
                details: format!("{} is outside [0, 1]", self.invalid_threshold),
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }
}
