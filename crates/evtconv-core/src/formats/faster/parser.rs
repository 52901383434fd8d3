use serde::{Deserialize, Serialize};

use crate::{NormalizedHit, QDC_LEN};

use super::error::FasterError;

/// Labels that map directly to a single hit.
pub const SINGLE_HIT_LABELS: [u16; 2] = [1, 2];

/// One pre-parsed labeled event.
///
/// Serde-deserializable so callers can feed events from JSON lines; the
/// converter itself only needs the iterator contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabeledEvent {
    pub label: u16,
    pub time: f64,
    #[serde(default)]
    pub data: LabeledData,
}

/// Event payload: a value for plain hits, nested events for built events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabeledData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<LabeledEvent>,
}

/// Expand one labeled event into zero or more hits.
///
/// Labels 1 and 2 yield one hit, the build label yields one hit per nested
/// event, and anything else yields nothing.
pub fn expand_event(
    event: &LabeledEvent,
    build_label: u16,
) -> Result<Vec<NormalizedHit>, FasterError> {
    if SINGLE_HIT_LABELS.contains(&event.label) {
        return Ok(vec![hit_from_event(event)?]);
    }
    if event.label == build_label {
        return event.data.events.iter().map(hit_from_event).collect();
    }
    Ok(Vec::new())
}

fn hit_from_event(event: &LabeledEvent) -> Result<NormalizedHit, FasterError> {
    let energy = event
        .data
        .value
        .ok_or(FasterError::MissingValue { label: event.label })?;
    Ok(NormalizedHit {
        crate_id: 0,
        slot: 0,
        channel: event.label,
        energy,
        overflow: false,
        time_raw: event.time,
        time: event.time * 2.0,
        qdc: [0; QDC_LEN],
        trace: Vec::new(),
    })
}
