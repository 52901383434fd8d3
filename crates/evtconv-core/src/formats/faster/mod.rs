//! Labeled-event construction.
//!
//! The labeled container arrives pre-parsed: an external iterator yields
//! `(label, time, data)` triples. Labels 1 and 2 map to single hits; the
//! configured build label (default 3000) marks an aggregate whose nested
//! events each map to a hit. This format encodes no module addressing, so
//! crate and slot are zero and the label stands in for the channel. Any
//! other label is ignored.

pub mod error;
pub mod parser;

pub use error::FasterError;
pub use parser::{LabeledData, LabeledEvent, expand_event};
