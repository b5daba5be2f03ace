//! Drives event sources into a trainer

use crate::config::TrainingParams;
use crate::error::Result;
use crate::events::{DelimitedTextSource, EventSource, LabeledExampleSource};
use crate::model::Trainer;
use crate::types::LabeledExample;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Drain every source, in order, into one trainer and finalize the model.
///
/// Trainer failures are returned as-is; no partial model is produced.
pub fn train_model<T, I>(mut trainer: T, sources: I, params: &TrainingParams) -> Result<T::Model>
where
    T: Trainer,
    I: IntoIterator,
    I::Item: EventSource,
{
    params.validate()?;

    let mut total_events = 0usize;
    let mut source_count = 0usize;
    for mut source in sources {
        let events = drain(&mut source, &mut trainer)?;
        debug!("Drained source {} ({} events)", source_count, events);
        total_events += events;
        source_count += 1;
    }

    let model = trainer.finish(params)?;
    info!(
        "Trained model from {} events across {} sources ({} iterations, cutoff {})",
        total_events, source_count, params.iterations, params.cutoff
    );
    Ok(model)
}

/// Train from an in-memory list of labeled examples
pub fn train_from_examples<T: Trainer>(
    trainer: T,
    examples: impl IntoIterator<Item = LabeledExample>,
    params: &TrainingParams,
) -> Result<T::Model> {
    train_model(trainer, [LabeledExampleSource::new(examples)], params)
}

/// Train from one `<email>\t<flag>` file
pub fn train_from_file<T: Trainer>(
    trainer: T,
    path: impl AsRef<Path>,
    params: &TrainingParams,
) -> Result<T::Model> {
    train_from_files(trainer, [path], params)
}

/// Train from several `<email>\t<flag>` files sharing one trainer.
///
/// Files are opened one at a time, as each previous file is drained.
pub fn train_from_files<T, P>(
    mut trainer: T,
    paths: impl IntoIterator<Item = P>,
    params: &TrainingParams,
) -> Result<T::Model>
where
    T: Trainer,
    P: AsRef<Path>,
{
    params.validate()?;

    let mut total_events = 0usize;
    let mut file_count = 0usize;
    for path in paths {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut source = DelimitedTextSource::from_reader(BufReader::new(file));
        let events = drain(&mut source, &mut trainer)?;
        debug!("Drained {} ({} events)", path.display(), events);
        total_events += events;
        file_count += 1;
    }

    let model = trainer.finish(params)?;
    info!(
        "Trained model from {} events across {} files ({} iterations, cutoff {})",
        total_events, file_count, params.iterations, params.cutoff
    );
    Ok(model)
}

fn drain<S: EventSource, T: Trainer>(source: &mut S, trainer: &mut T) -> Result<usize> {
    let mut count = 0;
    while source.has_next() {
        trainer.observe(source.read_next_event()?)?;
        count += 1;
    }
    Ok(count)
}
