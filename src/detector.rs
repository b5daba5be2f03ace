//! Invalid-address probability at inference time

use crate::context::{ContextGenerator, FeatureExtractor};
use crate::error::{DetectorError, Result};
use crate::model::{Model, ModelLoader};
use crate::types::Outcome;
use rayon::prelude::*;
use tracing::debug;

/// Returned when the model cannot interpret a feature of the address
pub const NEUTRAL_PROBABILITY: f64 = 0.5;

/// Scores addresses with a trained model.
///
/// The detector always extracts features with [`FeatureExtractor`], the same
/// extractor the training sources use, so contexts match what the model saw.
#[derive(Debug, Clone)]
pub struct Detector<M> {
    model: M,
    extractor: FeatureExtractor,
}

impl<M: Model> Detector<M> {
    pub const fn new(model: M) -> Self {
        Self {
            model,
            extractor: FeatureExtractor::new(),
        }
    }

    /// Build a detector from a persisted model
    pub fn from_resource<L>(loader: &L, name: &str) -> Result<Self>
    where
        L: ModelLoader<Model = M>,
    {
        Ok(Self::new(loader.load(name)?))
    }

    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Probability that `email` is invalid.
    ///
    /// The `INV` outcome is looked up by label. A model that never saw an
    /// invalid example assigns it no mass, giving `0.0`. Unknown features
    /// yield [`NEUTRAL_PROBABILITY`].
    pub fn get_invalid_probability(&self, email: &str) -> Result<f64> {
        let context = self.extractor.context(email)?;
        match self.model.evaluate(&context) {
            Ok(distribution) => Ok(distribution
                .probability(Outcome::Invalid.label())
                .unwrap_or(0.0)),
            Err(DetectorError::UnknownFeature(feature)) => {
                debug!(
                    "Unknown feature {} for {}, returning neutral probability",
                    feature, email
                );
                Ok(NEUTRAL_PROBABILITY)
            }
            Err(e) => Err(e),
        }
    }

    /// Score a batch of addresses in parallel, preserving input order
    pub fn invalid_probabilities<S>(&self, emails: &[S]) -> Result<Vec<f64>>
    where
        S: AsRef<str> + Sync,
    {
        emails
            .par_iter()
            .map(|email| self.get_invalid_probability(email.as_ref()))
            .collect()
    }
}
