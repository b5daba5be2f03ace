// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Invalid Email Detector
//!
//! Turns email addresses into a fixed vocabulary of named features and wires
//! them into a maximum-entropy backend, for training and for scoring.
//!
//! # Features
//!
//! - Deterministic, order-stable feature contexts
//! - Single-pass event sources over in-memory examples or `<email>\t<flag>` text
//! - Training orchestration over any number of sources into one trainer
//! - A thread-safe detector with a neutral fallback for unknown features
//! - Threshold and send-simulation evaluation of labeled test sets
//!
//! The estimation algorithm and the model are supplied by the caller through
//! the [`Trainer`] and [`Model`] traits.
//!
//! # Example
//!
//! ```rust
//! use invalid_email_detector::get_context;
//!
//! let context = get_context("john.doe@gmail.com").unwrap();
//!
//! assert!(context.contains("nb=8"));
//! assert!(context.contains("hDot=True"));
//! assert!(context.contains("oTld"));
//! ```

mod config;
mod context;
mod detector;
mod error;
mod evaluation;
mod events;
mod model;
mod training;
mod types;

pub use config::{EvaluationPolicy, TrainingParams};
pub use context::{ContextGenerator, FeatureExtractor, TldClass, get_context, split_address};
pub use detector::{Detector, NEUTRAL_PROBABILITY};
pub use error::{DetectorError, Result};
pub use evaluation::{
    EvaluationReport, ScoredAddress, SendSimulation, ThresholdSummary, score_examples,
};
pub use events::{
    DataReader, DelimitedTextSource, EventSource, LabeledExampleSource, PlainTextByLineReader,
};
pub use model::{Model, ModelLoader, Trainer};
pub use training::{train_from_examples, train_from_file, train_from_files, train_model};
pub use types::*;
