#![allow(dead_code)]

use invalid_email_detector::{
    Context, DetectorError, LabeledExample, Model, ModelLoader, OutcomeDistribution, Result,
    Trainer, TrainingEvent, TrainingParams,
};
use std::collections::HashMap;

/// Records every event and estimates per-feature outcome frequencies
#[derive(Debug, Default)]
pub struct CountingTrainer {
    events: Vec<TrainingEvent>,
    lenient: bool,
}

impl CountingTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce a model that skips unseen tokens instead of rejecting them
    pub fn lenient() -> Self {
        Self {
            events: Vec::new(),
            lenient: true,
        }
    }
}

impl Trainer for CountingTrainer {
    type Model = FrequencyModel;

    fn observe(&mut self, event: TrainingEvent) -> Result<()> {
        self.events.push(event);
        Ok(())
    }

    fn finish(self, params: &TrainingParams) -> Result<FrequencyModel> {
        let mut outcomes: Vec<String> = Vec::new();
        for event in &self.events {
            let label = event.outcome.label().to_string();
            if !outcomes.contains(&label) {
                outcomes.push(label);
            }
        }
        if outcomes.len() < 2 {
            return Err(DetectorError::Training(format!(
                "need at least two outcomes, saw {}",
                outcomes.len()
            )));
        }

        let mut counts: HashMap<String, Vec<u32>> = HashMap::new();
        for event in &self.events {
            let index = outcomes
                .iter()
                .position(|o| o == event.outcome.label())
                .unwrap();
            for token in event.context.iter() {
                counts
                    .entry(token.to_string())
                    .or_insert_with(|| vec![0; outcomes.len()])[index] += 1;
            }
        }
        counts.retain(|_, c| c.iter().sum::<u32>() >= params.cutoff);

        Ok(FrequencyModel {
            outcomes,
            counts,
            events: self.events,
            params: *params,
            lenient: self.lenient,
        })
    }
}

/// Averages smoothed per-token outcome frequencies
#[derive(Debug, Clone)]
pub struct FrequencyModel {
    pub outcomes: Vec<String>,
    pub counts: HashMap<String, Vec<u32>>,
    pub events: Vec<TrainingEvent>,
    pub params: TrainingParams,
    pub lenient: bool,
}

impl Model for FrequencyModel {
    fn evaluate(&self, context: &Context) -> Result<OutcomeDistribution> {
        let k = self.outcomes.len();
        let mut sums = vec![0.0; k];
        let mut used = 0u32;
        for token in context.iter() {
            let Some(counts) = self.counts.get(token) else {
                if self.lenient {
                    continue;
                }
                return Err(DetectorError::UnknownFeature(token.to_string()));
            };
            let total: u32 = counts.iter().sum();
            for (sum, count) in sums.iter_mut().zip(counts) {
                *sum += f64::from(count + 1) / f64::from(total + k as u32);
            }
            used += 1;
        }

        let entries = self
            .outcomes
            .iter()
            .zip(sums)
            .map(|(label, sum)| {
                let p = if used == 0 {
                    1.0 / k as f64
                } else {
                    sum / f64::from(used)
                };
                (label.clone(), p)
            })
            .collect();
        Ok(OutcomeDistribution::new(entries))
    }
}

/// Returns the same distribution for every context
#[derive(Debug, Clone)]
pub struct FixedModel(pub OutcomeDistribution);

impl Model for FixedModel {
    fn evaluate(&self, _context: &Context) -> Result<OutcomeDistribution> {
        Ok(self.0.clone())
    }
}

/// Always fails with a non-recoverable error
#[derive(Debug, Clone)]
pub struct BrokenModel;

impl Model for BrokenModel {
    fn evaluate(&self, _context: &Context) -> Result<OutcomeDistribution> {
        Err(DetectorError::Training("weights unavailable".into()))
    }
}

/// Named models held in memory
#[derive(Debug, Default)]
pub struct MemoryLoader {
    pub models: HashMap<String, FrequencyModel>,
}

impl ModelLoader for MemoryLoader {
    type Model = FrequencyModel;

    fn load(&self, name: &str) -> Result<FrequencyModel> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| DetectorError::ModelLoad {
                name: name.to_string(),
                details: "no such model".into(),
            })
    }
}

pub fn no_cutoff() -> TrainingParams {
    TrainingParams::new(100, 0).unwrap()
}

/// The labeled set from the sample program
pub fn sample_examples() -> Vec<LabeledExample> {
    vec![
        LabeledExample::new("john.doe@gmail.com", false),
        LabeledExample::new("jane.doe@gmail.com", false),
        LabeledExample::new("john.doe@hotmail.fr", false),
        LabeledExample::new("jane.doe@hotmail.com", false),
        LabeledExample::new("mkqljsdmqlskfmldwx@gmail.com", true),
        LabeledExample::new("sqmldklsqmdkxmkqds@qsldkjsqd.qsld", true),
        LabeledExample::new("thisisnotavalidemail@qmsldjk.qsd", true),
        LabeledExample::new("qs@qq.ss", true),
    ]
}
