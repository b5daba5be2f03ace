//! Single-pass training event streams

use crate::context::{ContextGenerator, FeatureExtractor};
use crate::error::{DetectorError, Result};
use crate::types::{LabeledExample, Outcome, TrainingEvent};
use std::io::BufRead;
use tracing::warn;

/// A stateful, single-pass stream of training events.
///
/// Instances are driven by one consumer at a time; nothing here is locked.
pub trait EventSource {
    /// True while unread events remain
    fn has_next(&mut self) -> bool;

    /// Consume the next event; fails with [`DetectorError::Exhausted`] once drained
    fn read_next_event(&mut self) -> Result<TrainingEvent>;
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn read_next_event(&mut self) -> Result<TrainingEvent> {
        (**self).read_next_event()
    }
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn read_next_event(&mut self) -> Result<TrainingEvent> {
        (**self).read_next_event()
    }
}

/// Events from an in-memory list of labeled examples
#[derive(Debug, Clone)]
pub struct LabeledExampleSource {
    examples: Vec<LabeledExample>,
    cursor: usize,
    extractor: FeatureExtractor,
}

impl LabeledExampleSource {
    pub fn new(examples: impl IntoIterator<Item = LabeledExample>) -> Self {
        Self {
            examples: examples.into_iter().collect(),
            cursor: 0,
            extractor: FeatureExtractor::new(),
        }
    }

    /// Examples not yet read
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.examples.len() - self.cursor
    }
}

impl EventSource for LabeledExampleSource {
    fn has_next(&mut self) -> bool {
        self.cursor < self.examples.len()
    }

    fn read_next_event(&mut self) -> Result<TrainingEvent> {
        let example = self
            .examples
            .get(self.cursor)
            .ok_or(DetectorError::Exhausted)?;
        let context = self.extractor.context(&example.email)?;
        let event = TrainingEvent::new(example.outcome(), context);
        self.cursor += 1;
        Ok(event)
    }
}

/// Line-oriented text supplier
pub trait DataReader {
    fn next_token(&mut self) -> Result<String>;

    fn has_next(&mut self) -> bool;
}

/// Reads a buffered stream one line at a time, without line terminators
#[derive(Debug)]
pub struct PlainTextByLineReader<R> {
    reader: R,
    peeked: Option<String>,
    failure: Option<std::io::Error>,
}

impl<R: BufRead> PlainTextByLineReader<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            failure: None,
        }
    }

    fn fill(&mut self) {
        if self.peeked.is_some() || self.failure.is_some() {
            return;
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {}
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                self.peeked = Some(line);
            }
            Err(e) => self.failure = Some(e),
        }
    }
}

impl<R: BufRead> DataReader for PlainTextByLineReader<R> {
    fn next_token(&mut self) -> Result<String> {
        self.fill();
        if let Some(e) = self.failure.take() {
            return Err(e.into());
        }
        self.peeked.take().ok_or(DetectorError::Exhausted)
    }

    // A pending read error counts as more data so that next_token can report it.
    fn has_next(&mut self) -> bool {
        self.fill();
        self.peeked.is_some() || self.failure.is_some()
    }
}

/// Events from `<email>\t<flag>` lines.
///
/// The email is the first tab-separated field and the flag the last. Only a
/// flag of exactly `"1"` marks the address invalid; any other value,
/// including a missing tab, is read as valid.
#[derive(Debug)]
pub struct DelimitedTextSource<D, G = FeatureExtractor> {
    reader: D,
    generator: G,
}

impl<D: DataReader> DelimitedTextSource<D> {
    pub const fn new(reader: D) -> Self {
        Self {
            reader,
            generator: FeatureExtractor::new(),
        }
    }
}

impl<D: DataReader, G: ContextGenerator> DelimitedTextSource<D, G> {
    pub const fn with_generator(reader: D, generator: G) -> Self {
        Self { reader, generator }
    }
}

impl<R: BufRead> DelimitedTextSource<PlainTextByLineReader<R>> {
    /// Events from a buffered text stream
    pub const fn from_reader(reader: R) -> Self {
        Self::new(PlainTextByLineReader::new(reader))
    }
}

impl<D: DataReader, G: ContextGenerator> EventSource for DelimitedTextSource<D, G> {
    fn has_next(&mut self) -> bool {
        self.reader.has_next()
    }

    fn read_next_event(&mut self) -> Result<TrainingEvent> {
        let line = self.reader.next_token()?;
        let (email, flag) = parse_line(&line);
        if flag != "0" && flag != "1" {
            warn!("Flag {:?} for {} is not 0 or 1, reading as valid", flag, email);
        }
        let outcome = Outcome::from_invalid(flag == "1");
        Ok(TrainingEvent::new(outcome, self.generator.context(email)?))
    }
}

/// First and last tab-separated fields of a line
fn parse_line(line: &str) -> (&str, &str) {
    let email = line.split('\t').next().unwrap_or(line);
    let flag = line.rsplit('\t').next().unwrap_or(line);
    (email, flag)
}
