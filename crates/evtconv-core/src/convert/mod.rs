use std::path::Path;

use thiserror::Error;

use crate::formats::faster::{FasterError, LabeledEvent, expand_event};
use crate::formats::ring::{RingError, layout::PHYSICS_EVENT_TYPE, parse_physics_event};
use crate::source::{EvtFileSource, ItemSource, RingItem, SourceError};
use crate::{ConversionSummary, DEFAULT_BUILD_LABEL, DEFAULT_CHUNK_SIZE, make_stub_summary};

mod batch;
mod jsonl;
mod sink;

pub use batch::ChunkedBatcher;
pub use jsonl::JsonlSink;
pub use sink::{HitSink, MemorySink, SinkError};

/// Conversion knobs; defaults match the legacy converter.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Hits buffered before each sink flush.
    pub chunk_size: usize,
    /// Label marking a built (aggregate) labeled event.
    pub build_label: u16,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            build_label: DEFAULT_BUILD_LABEL,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("physics item {index} decode failed: {source}")]
    Ring {
        index: u64,
        #[source]
        source: RingError,
    },
    #[error("labeled event {index} rejected: {source}")]
    Faster {
        index: u64,
        #[source]
        source: FasterError,
    },
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Convert one ring-item capture file into the sink.
pub fn convert_evt_file<K: HitSink>(
    path: &Path,
    sink: &mut K,
    config: &ConvertConfig,
) -> Result<ConversionSummary, ConvertError> {
    let source = EvtFileSource::open(path)?;
    let bytes = path.metadata()?.len();
    convert_evt_source(&path.display().to_string(), bytes, source, sink, config)
}

/// Convert ring items from any source into the sink.
///
/// Dispatches on the item type: physics items are decoded through the DDAS
/// path, everything else is skipped whole. Decode failures abort the run
/// with the failing item's index; end-of-stream at the item boundary is
/// the normal termination.
pub fn convert_evt_source<S: ItemSource, K: HitSink>(
    input_path: &str,
    input_bytes: u64,
    mut source: S,
    sink: &mut K,
    config: &ConvertConfig,
) -> Result<ConversionSummary, ConvertError> {
    let mut summary = make_stub_summary(input_path, input_bytes);
    let mut batcher = ChunkedBatcher::new(config.chunk_size);

    while let Some(RingItem { item_type, payload }) = source.next_item()? {
        summary.items_total += 1;
        if item_type != PHYSICS_EVENT_TYPE {
            summary.skipped_items += 1;
            continue;
        }
        summary.physics_items += 1;
        let hits = parse_physics_event(&payload).map_err(|source| ConvertError::Ring {
            index: summary.items_total,
            source,
        })?;
        for hit in hits {
            summary.hits_total += 1;
            if !hit.trace.is_empty() {
                summary.traces_total += 1;
            }
            batcher.push(hit, sink)?;
        }
    }

    batcher.finish(sink)?;
    summary.flushes = batcher.flushes();
    Ok(summary)
}

/// Convert a stream of labeled events into the sink.
///
/// Events arrive as results so a lazy source (file lines parsed on pull)
/// can surface its own failures; the first bad event aborts the run with
/// the event index. Labels 1 and 2 yield single hits, the configured build
/// label expands into one hit per nested event, and all other labels are
/// counted as skipped.
pub fn convert_labeled_events<I, K>(
    input_path: &str,
    input_bytes: u64,
    events: I,
    sink: &mut K,
    config: &ConvertConfig,
) -> Result<ConversionSummary, ConvertError>
where
    I: IntoIterator<Item = Result<LabeledEvent, FasterError>>,
    K: HitSink,
{
    let mut summary = make_stub_summary(input_path, input_bytes);
    let mut batcher = ChunkedBatcher::new(config.chunk_size);

    for event in events {
        summary.items_total += 1;
        let event = event.map_err(|source| ConvertError::Faster {
            index: summary.items_total,
            source,
        })?;
        let hits = expand_event(&event, config.build_label).map_err(|source| {
            ConvertError::Faster {
                index: summary.items_total,
                source,
            }
        })?;
        if hits.is_empty() {
            summary.skipped_items += 1;
            continue;
        }
        summary.physics_items += 1;
        for hit in hits {
            summary.hits_total += 1;
            batcher.push(hit, sink)?;
        }
    }

    batcher.finish(sink)?;
    summary.flushes = batcher.flushes();
    Ok(summary)
}
