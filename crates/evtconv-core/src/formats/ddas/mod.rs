//! DDAS hit record decoding.
//!
//! A hit record is a sequence of little-endian 32-bit words consumed in
//! strict order: header, coarse timestamp, CFD word, energy word, then an
//! optional QDC block and an optional trace. The CFD correction depends on
//! the digitizer frequency (100/250/500 MHz) and is dispatched through
//! [`ModuleFrequency`], selected once per record.
//!
//! Optional blocks other than the 8-word QDC record are skipped using their
//! declared length without decoding; the consumed byte count is checked
//! against the record's declared length and any disagreement is fatal for
//! the container. Masks and shifts live in `layout`, word access in
//! `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod timing;

pub use error::DdasError;
pub use parser::parse_hit;
pub use reader::WordReader;
pub use timing::{EventTime, ModuleFrequency};
