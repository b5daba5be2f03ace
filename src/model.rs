//! Capabilities supplied by the maximum-entropy backend
//!
//! Parameter estimation and probability evaluation live outside this crate.
//! A backend plugs in by implementing [`Trainer`] and [`Model`], and
//! optionally [`ModelLoader`] for persisted models.

use crate::config::TrainingParams;
use crate::error::Result;
use crate::types::{Context, OutcomeDistribution, TrainingEvent};
use std::sync::Arc;

/// Estimates a model from a stream of training events
pub trait Trainer {
    type Model: Model;

    /// Accumulate one event; statistics are global across every source fed in
    fn observe(&mut self, event: TrainingEvent) -> Result<()>;

    /// Run the estimation and produce the model
    fn finish(self, params: &TrainingParams) -> Result<Self::Model>;
}

/// A trained model, evaluated read-only from any thread
pub trait Model: Send + Sync {
    /// Distribution over the outcome labels seen during training.
    ///
    /// Returns [`DetectorError::UnknownFeature`](crate::DetectorError::UnknownFeature)
    /// when the context holds a token the model cannot interpret.
    fn evaluate(&self, context: &Context) -> Result<OutcomeDistribution>;
}

impl<M: Model + ?Sized> Model for Arc<M> {
    fn evaluate(&self, context: &Context) -> Result<OutcomeDistribution> {
        (**self).evaluate(context)
    }
}

impl<M: Model + ?Sized> Model for Box<M> {
    fn evaluate(&self, context: &Context) -> Result<OutcomeDistribution> {
        (**self).evaluate(context)
    }
}

/// Loads a persisted model by name; the storage format is the backend's
pub trait ModelLoader {
    type Model: Model;

    fn load(&self, name: &str) -> Result<Self::Model>;
}
