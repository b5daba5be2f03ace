//! Scoring labeled test sets against an operational policy

use crate::config::EvaluationPolicy;
use crate::detector::Detector;
use crate::error::Result;
use crate::model::Model;
use crate::types::LabeledExample;
use serde::{Deserialize, Serialize};

/// A labeled address with the probability the detector gave it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredAddress {
    pub email: String,
    pub is_invalid: bool,
    pub invalid_probability: f64,
}

/// Score every example, in order
pub fn score_examples<M: Model>(
    detector: &Detector<M>,
    examples: &[LabeledExample],
) -> Result<Vec<ScoredAddress>> {
    let emails: Vec<&str> = examples.iter().map(|e| e.email.as_str()).collect();
    let probabilities = detector.invalid_probabilities(&emails)?;

    Ok(examples
        .iter()
        .zip(probabilities)
        .map(|(example, invalid_probability)| ScoredAddress {
            email: example.email.clone(),
            is_invalid: example.is_invalid,
            invalid_probability,
        })
        .collect())
}

/// Classification counts at a fixed threshold
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThresholdSummary {
    pub samples: usize,
    pub correct: usize,
    /// Invalid addresses scored at or below the threshold
    pub not_detected: usize,
    /// Valid addresses scored above the threshold
    pub false_positives: usize,
}

impl ThresholdSummary {
    #[must_use]
    pub fn compute(scored: &[ScoredAddress], threshold: f64) -> Self {
        scored.iter().fold(
            Self {
                samples: scored.len(),
                ..Self::default()
            },
            |mut summary, s| {
                let flagged = s.invalid_probability > threshold;
                if flagged == s.is_invalid {
                    summary.correct += 1;
                }
                if s.is_invalid && !flagged {
                    summary.not_detected += 1;
                }
                if !s.is_invalid && flagged {
                    summary.false_positives += 1;
                }
                summary
            },
        )
    }
}

/// Outcome of sending to a batch, least suspicious addresses first
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendSimulation {
    pub sent: usize,
    pub bounced: usize,
}

impl SendSimulation {
    /// Send in ascending probability order while fewer than `max_bounces`
    /// invalid addresses have been hit
    #[must_use]
    pub fn run(scored: &[ScoredAddress], max_bounces: usize) -> Self {
        let mut ordered: Vec<&ScoredAddress> = scored.iter().collect();
        ordered.sort_by(|a, b| a.invalid_probability.total_cmp(&b.invalid_probability));

        let mut simulation = Self::default();
        for address in ordered {
            if simulation.bounced >= max_bounces {
                break;
            }
            simulation.sent += 1;
            if address.is_invalid {
                simulation.bounced += 1;
            }
        }
        simulation
    }
}

/// Threshold summary and send simulation under one policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationReport {
    pub policy: EvaluationPolicy,
    pub summary: ThresholdSummary,
    pub simulation: SendSimulation,
}

impl EvaluationReport {
    pub fn build(scored: &[ScoredAddress], policy: EvaluationPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            policy,
            summary: ThresholdSummary::compute(scored, policy.invalid_threshold),
            simulation: SendSimulation::run(scored, policy.max_bounces),
        })
    }

    /// Score `examples` with `detector` and evaluate them
    pub fn evaluate<M: Model>(
        detector: &Detector<M>,
        examples: &[LabeledExample],
        policy: EvaluationPolicy,
    ) -> Result<Self> {
        let scored = score_examples(detector, examples)?;
        Self::build(&scored, policy)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
