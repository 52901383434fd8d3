//! Ring-item (.evt) source implementation.
//!
//! This module provides an `ItemSource` backed by a capture file. It
//! handles file I/O and item framing only, emitting raw ring items for the
//! convert layer; payload decoding lives in `formats`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::EvtFileSource;
