//! evtconv core library for offline conversion of detector-hit captures.
//!
//! This crate implements the conversion pipeline used by the CLI: ring-item
//! sources feed the convert layer, which drives format decoders
//! (layout/reader/parser) and batches normalized hits into an external
//! columnar sink. Decoding is byte-oriented and side-effect free; all I/O is
//! isolated in `source` and sink modules. Container conventions are captured
//! in readers so parsers stay minimal and byte-exact with the legacy formats.
//!
//! Invariants:
//! - Hits are appended to the sink in exactly the order they are decoded.
//! - A hit is never mutated after construction and never crosses a flush
//!   boundary twice.
//! - Timing correction is dispatched once per record on a closed frequency
//!   set (100/250/500 MHz).
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use evtconv_core::{ConvertConfig, JsonlSink, convert_evt_file};
//!
//! let mut sink = JsonlSink::create(Path::new("run.hits.jsonl"), Path::new("run.traces.jsonl"))?;
//! let summary = convert_evt_file(Path::new("run-0001-00.evt"), &mut sink, &ConvertConfig::default())?;
//! println!("hits decoded: {}", summary.hits_total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod convert;
mod formats;
mod source;

pub use convert::{
    ChunkedBatcher, ConvertConfig, ConvertError, HitSink, JsonlSink, MemorySink, SinkError,
    convert_evt_file, convert_evt_source, convert_labeled_events,
};
pub use formats::ddas::{DdasError, EventTime, ModuleFrequency};
pub use formats::faster::{FasterError, LabeledData, LabeledEvent};
pub use formats::ring::RingError;
pub use source::{EvtFileSource, ItemSource, LabeledEventFile, RingItem, SourceError};

/// Current conversion summary schema version.
pub const SUMMARY_VERSION: u32 = 1;
/// Default timestamp used when the wall clock cannot be formatted.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";
/// Default number of hits buffered before a sink flush.
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;
/// Default label marking a built (aggregate) labeled event.
pub const DEFAULT_BUILD_LABEL: u16 = 3000;
/// Number of QDC integration-window integrals per hit.
pub const QDC_LEN: usize = 8;

/// One decoded detector hit in normalized form.
///
/// `crate_id`, `slot` and `channel` are 4-bit module addresses in the ring
/// container; the labeled container does not encode addressing and leaves
/// `crate_id` and `slot` at zero with the event label as `channel`. Times
/// are nanoseconds: `time_raw` is the frequency-scaled coarse timestamp,
/// `time` additionally carries the CFD fractional correction.
///
/// # Examples
/// ```
/// use evtconv_core::NormalizedHit;
///
/// let hit = NormalizedHit {
///     crate_id: 0,
///     slot: 2,
///     channel: 3,
///     energy: 1234,
///     overflow: false,
///     time_raw: 1000.0,
///     time: 1005.0,
///     qdc: [0; 8],
///     trace: Vec::new(),
/// };
/// assert_eq!(hit.channel, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedHit {
    /// Crate address (0-15 in the ring container).
    pub crate_id: u8,
    /// Slot address (0-15 in the ring container).
    pub slot: u8,
    /// Channel address, or the event label for labeled captures.
    pub channel: u16,
    /// 16-bit energy magnitude.
    pub energy: u16,
    /// Energy filter overflow flag.
    pub overflow: bool,
    /// Coarse timestamp in nanoseconds.
    pub time_raw: f64,
    /// CFD-corrected timestamp in nanoseconds.
    pub time: f64,
    /// QDC sums; zero-filled when the record carries none.
    pub qdc: [i32; QDC_LEN],
    /// Trace samples sign-widened from 16-bit; empty when absent.
    pub trace: Vec<i32>,
}

/// Flattened sink row for one hit.
///
/// Trace samples are stored out of row; `trace_idx` references the trace
/// appended for this hit (1-based, matching the legacy table layout) and is
/// omitted from serialized output when the hit has no trace.
///
/// # Examples
/// ```
/// use evtconv_core::{HitRow, NormalizedHit};
///
/// let hit = NormalizedHit {
///     crate_id: 0,
///     slot: 0,
///     channel: 1,
///     energy: 10,
///     overflow: false,
///     time_raw: 5.0,
///     time: 10.0,
///     qdc: [0; 8],
///     trace: Vec::new(),
/// };
/// let row = HitRow::from_hit(&hit, None);
/// assert!(!row.is_trace);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRow {
    /// Crate address.
    pub crate_id: u8,
    /// Slot address.
    pub slot: u8,
    /// Channel address or event label.
    pub channel: u16,
    /// Energy magnitude.
    pub energy: u16,
    /// Energy filter overflow flag.
    pub overflow: bool,
    /// Coarse timestamp in nanoseconds.
    pub time_raw: f64,
    /// Corrected timestamp in nanoseconds.
    pub time: f64,
    /// QDC sums.
    pub qdc: [i32; QDC_LEN],
    /// Whether a trace was stored for this hit.
    pub is_trace: bool,
    /// 1-based index of the stored trace, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_idx: Option<u64>,
}

impl HitRow {
    /// Flatten a hit into a sink row, attaching the stored trace index.
    pub fn from_hit(hit: &NormalizedHit, trace_idx: Option<u64>) -> Self {
        Self {
            crate_id: hit.crate_id,
            slot: hit.slot,
            channel: hit.channel,
            energy: hit.energy,
            overflow: hit.overflow,
            time_raw: hit.time_raw,
            time: hit.time,
            qdc: hit.qdc,
            is_trace: trace_idx.is_some(),
            trace_idx,
        }
    }
}

/// Aggregated conversion summary with deterministic counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSummary {
    /// Summary schema version (not the binary version).
    pub summary_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the summary generation time.
    pub generated_at: String,
    /// Input capture metadata.
    pub input: InputInfo,
    /// Total ring items (or labeled events) read.
    pub items_total: u64,
    /// Items that carried decodable hit payloads.
    pub physics_items: u64,
    /// Items skipped without a decode attempt.
    pub skipped_items: u64,
    /// Hits decoded and appended to the sink.
    pub hits_total: u64,
    /// Hits that carried a trace.
    pub traces_total: u64,
    /// Sink flushes performed, including the final remainder flush.
    pub flushes: u64,
}

/// Tool metadata embedded in summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "evtconv").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the converter.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Build a summary with base fields filled and zeroed counters.
///
/// # Examples
/// ```
/// use evtconv_core::make_stub_summary;
///
/// let summary = make_stub_summary("run-0001-00.evt", 123);
/// assert_eq!(summary.summary_version, evtconv_core::SUMMARY_VERSION);
/// assert_eq!(summary.hits_total, 0);
/// ```
pub fn make_stub_summary(input_path: &str, input_bytes: u64) -> ConversionSummary {
    ConversionSummary {
        summary_version: SUMMARY_VERSION,
        tool: ToolInfo {
            name: "evtconv".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: now_rfc3339(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        items_total: 0,
        physics_items: 0,
        skipped_items: 0,
        hits_total: 0,
        traces_total: 0,
        flushes: 0,
    }
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_row_omits_trace_idx_when_none() {
        let hit = NormalizedHit {
            crate_id: 0,
            slot: 2,
            channel: 3,
            energy: 1234,
            overflow: false,
            time_raw: 1000.0,
            time: 1005.0,
            qdc: [0; QDC_LEN],
            trace: Vec::new(),
        };

        let row = HitRow::from_hit(&hit, None);
        let value = serde_json::to_value(&row).expect("row json");
        assert!(value.get("trace_idx").is_none());
        assert_eq!(value["is_trace"], serde_json::Value::Bool(false));

        let row = HitRow::from_hit(&hit, Some(7));
        let value = serde_json::to_value(&row).expect("row json");
        assert_eq!(value["trace_idx"], serde_json::json!(7));
        assert_eq!(value["is_trace"], serde_json::Value::Bool(true));
    }

    #[test]
    fn stub_summary_has_zeroed_counters() {
        let summary = make_stub_summary("run.evt", 42);
        assert_eq!(summary.input.bytes, 42);
        assert_eq!(summary.items_total, 0);
        assert_eq!(summary.flushes, 0);
        assert_eq!(summary.tool.name, "evtconv");
    }
}
