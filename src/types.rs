//! Core types exchanged between the extractor, the event sources and the model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome label of a training event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Address looks deliverable
    #[serde(rename = "OK")]
    Valid,
    /// Address looks invalid
    #[serde(rename = "INV")]
    Invalid,
}

impl Outcome {
    /// Map an invalidity flag to its outcome
    #[must_use]
    pub const fn from_invalid(is_invalid: bool) -> Self {
        if is_invalid { Self::Invalid } else { Self::Valid }
    }

    /// Label used when talking to the model
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Valid => "OK",
            Self::Invalid => "INV",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An email address together with its known validity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabeledExample {
    pub email: String,
    pub is_invalid: bool,
}

impl LabeledExample {
    pub fn new(email: impl Into<String>, is_invalid: bool) -> Self {
        Self {
            email: email.into(),
            is_invalid,
        }
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        Outcome::from_invalid(self.is_invalid)
    }
}

/// Ordered feature tokens extracted from one address
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Context(Vec<String>);

impl Context {
    #[must_use]
    pub const fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Value of a `name=value` token, if present
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .filter_map(|t| t.split_once('='))
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// One labeled context handed to a trainer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingEvent {
    pub outcome: Outcome,
    pub context: Context,
}

impl TrainingEvent {
    #[must_use]
    pub const fn new(outcome: Outcome, context: Context) -> Self {
        Self { outcome, context }
    }
}

/// Probability per outcome label, in the order the model reports them
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutcomeDistribution(Vec<(String, f64)>);

impl OutcomeDistribution {
    #[must_use]
    pub const fn new(entries: Vec<(String, f64)>) -> Self {
        Self(entries)
    }

    /// Probability mass assigned to `label`
    #[must_use]
    pub fn probability(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, p)| *p)
    }

    /// Last entry, for callers relying on positional ordering
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.0.last().map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(l, p)| (l.as_str(), *p))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
