//! Physics ring-item payload decoding.
//!
//! A type-30 ("physics event") ring item wraps one or more DDAS hit records
//! in a nested framing of fixed-size header blocks. The skip lengths have
//! no documented structure in this repository and are preserved as an
//! opaque contract of the legacy container format: one 20-byte body header
//! and a 4-byte fragment-size word open the payload, then each fragment is
//! a 20-byte fragment header, an 8-byte physics header, another 20-byte
//! body header, an 8-byte device descriptor, and the hit record itself.
//!
//! The descriptor supplies the digitizer frequency; everything after it is
//! handed to the DDAS decoder. Errors carry the payload byte offset so a
//! malformed capture can be located.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::RingError;
pub use parser::parse_physics_event;
