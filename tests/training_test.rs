mod common;

use common::{CountingTrainer, no_cutoff, sample_examples};
use invalid_email_detector::*;
use std::io::{Cursor, Write};

fn labels(events: &[TrainingEvent]) -> Vec<&'static str> {
    events.iter().map(|e| e.outcome.label()).collect()
}

// --- In-memory training ---

#[test]
fn test_train_from_examples() {
    let model = train_from_examples(CountingTrainer::new(), sample_examples(), &no_cutoff()).unwrap();

    assert_eq!(model.events.len(), 8);
    assert_eq!(
        labels(&model.events),
        vec!["OK", "OK", "OK", "OK", "INV", "INV", "INV", "INV"]
    );
    assert_eq!(model.outcomes, vec!["OK", "INV"]);
}

#[test]
fn test_params_reach_trainer() {
    let params = TrainingParams::new(42, 3).unwrap();
    let model = train_from_examples(CountingTrainer::new(), sample_examples(), &params).unwrap();
    assert_eq!(model.params, params);
}

#[test]
fn test_cutoff_drops_rare_features() {
    let params = TrainingParams::new(100, 5).unwrap();
    let model = train_from_examples(CountingTrainer::new(), sample_examples(), &params).unwrap();

    // Every address shares hDig=False, but nb=18 appears only twice
    assert!(model.counts.contains_key("hDig=False"));
    assert!(!model.counts.contains_key("nb=18"));
}

// --- Multiple sources ---

#[test]
fn test_sources_drained_in_order() {
    let sources: Vec<Box<dyn EventSource>> = vec![
        Box::new(DelimitedTextSource::from_reader(Cursor::new(
            "x@y.org\t1\nqs@qq.ss\t1\n",
        ))),
        Box::new(LabeledExampleSource::new(vec![
            LabeledExample::new("john.doe@gmail.com", false),
            LabeledExample::new("tt@s.s", true),
        ])),
    ];

    let model = train_model(CountingTrainer::new(), sources, &no_cutoff()).unwrap();

    assert_eq!(labels(&model.events), vec!["INV", "INV", "OK", "INV"]);
    assert_eq!(
        model.events[2].context,
        get_context("john.doe@gmail.com").unwrap()
    );
}

/// Panics on any read once it has reported no more events
struct StrictSource {
    inner: LabeledExampleSource,
    reads: usize,
    finished: bool,
}

impl EventSource for StrictSource {
    fn has_next(&mut self) -> bool {
        let has_next = self.inner.has_next();
        self.finished = !has_next;
        has_next
    }

    fn read_next_event(&mut self) -> Result<TrainingEvent> {
        assert!(!self.finished, "read after has_next returned false");
        self.reads += 1;
        self.inner.read_next_event()
    }
}

#[test]
fn test_no_read_after_exhaustion() {
    let mut strict = StrictSource {
        inner: LabeledExampleSource::new(sample_examples()),
        reads: 0,
        finished: false,
    };

    let model = train_model(CountingTrainer::new(), [&mut strict], &no_cutoff()).unwrap();

    assert_eq!(strict.reads, 8);
    assert!(strict.finished);
    assert_eq!(model.events.len(), 8);
}

// --- Failures ---

#[test]
fn test_trainer_failure_propagates() {
    let examples = vec![
        LabeledExample::new("a@b.com", false),
        LabeledExample::new("c@d.com", false),
    ];

    let result = train_from_examples(CountingTrainer::new(), examples, &no_cutoff());

    assert!(matches!(result, Err(DetectorError::Training(_))));
}

#[test]
fn test_malformed_example_aborts_training() {
    let mut examples = sample_examples();
    examples.push(LabeledExample::new("missing-at", true));

    let result = train_from_examples(CountingTrainer::new(), examples, &no_cutoff());

    assert!(matches!(result, Err(DetectorError::MalformedAddress(_))));
}

#[test]
fn test_zero_iterations_rejected() {
    let params = TrainingParams {
        iterations: 0,
        cutoff: 0,
    };

    let result = train_from_examples(CountingTrainer::new(), sample_examples(), &params);

    assert!(matches!(
        result,
        Err(DetectorError::InvalidParameter { .. })
    ));
}

// --- Files ---

fn training_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_train_from_file() {
    let file = training_file(&[
        "jane.doe@gmail.com\t0",
        "sqmldklsqmdkxmkqds@qsldkjsqd.qsld\t1",
    ]);

    let model = train_from_file(CountingTrainer::new(), file.path(), &no_cutoff()).unwrap();

    assert_eq!(labels(&model.events), vec!["OK", "INV"]);
}

#[test]
fn test_train_from_files_shares_trainer() {
    let first = training_file(&["jane.doe@gmail.com\t0", "john.doe@hotmail.fr\t0"]);
    let second = training_file(&["qs@qq.ss\t1"]);

    let model = train_from_files(
        CountingTrainer::new(),
        [first.path(), second.path()],
        &no_cutoff(),
    )
    .unwrap();

    assert_eq!(labels(&model.events), vec!["OK", "OK", "INV"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.train");

    let result = train_from_file(CountingTrainer::new(), &missing, &no_cutoff());

    assert!(matches!(result, Err(DetectorError::Io(_))));
}
