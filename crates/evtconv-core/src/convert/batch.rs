use crate::{HitRow, NormalizedHit};

use super::sink::{HitSink, SinkError};

/// Accumulates hits and flushes them to the sink in bounded chunks.
///
/// Hits reach the sink in exactly their arrival order; a batch is cleared
/// only after a successful flush, so nothing is dropped or duplicated
/// across the flush boundary.
pub struct ChunkedBatcher {
    hits: Vec<NormalizedHit>,
    chunk_size: usize,
    flushes: u64,
}

impl ChunkedBatcher {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            hits: Vec::new(),
            chunk_size: chunk_size.max(1),
            flushes: 0,
        }
    }

    /// Append one hit, flushing the batch when it reaches the chunk size.
    pub fn push<K: HitSink>(&mut self, hit: NormalizedHit, sink: &mut K) -> Result<(), SinkError> {
        self.hits.push(hit);
        if self.hits.len() >= self.chunk_size {
            self.flush_batch(sink)?;
        }
        Ok(())
    }

    /// Flush any remaining hits once, at end of stream.
    pub fn finish<K: HitSink>(&mut self, sink: &mut K) -> Result<(), SinkError> {
        if !self.hits.is_empty() {
            self.flush_batch(sink)?;
        }
        Ok(())
    }

    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    fn flush_batch<K: HitSink>(&mut self, sink: &mut K) -> Result<(), SinkError> {
        for hit in self.hits.drain(..) {
            let trace_idx = if hit.trace.is_empty() {
                None
            } else {
                Some(sink.append_trace(&hit.trace)?)
            };
            sink.append(&HitRow::from_hit(&hit, trace_idx))?;
        }
        sink.flush()?;
        self.flushes += 1;
        Ok(())
    }
}
