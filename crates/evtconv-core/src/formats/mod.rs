//! Container format decoding modules.
//!
//! Each format follows a layered structure:
//! - `layout`: bit masks, shifts and magic byte lengths (source of truth)
//! - `reader`: safe byte access and container conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; sources and the convert layer handle
//! file access and batching.

pub mod ddas;
pub mod faster;
pub mod ring;
