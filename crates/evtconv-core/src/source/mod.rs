mod evt;
mod labeled;

pub use evt::EvtFileSource;
pub use labeled::LabeledEventFile;

use thiserror::Error;

/// One framed ring item: its type code and the payload after the 8-byte
/// item header.
#[derive(Debug, Clone)]
pub struct RingItem {
    pub item_type: u32,
    pub payload: Vec<u8>,
}

/// Sequential source of ring items.
///
/// `Ok(None)` is normal end-of-stream; errors mean the stream position can
/// no longer be trusted.
pub trait ItemSource {
    fn next_item(&mut self) -> Result<Option<RingItem>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated ring item at offset {offset}: declared {declared} payload bytes, got {actual}")]
    TruncatedItem {
        offset: u64,
        declared: usize,
        actual: usize,
    },
    #[error("invalid ring item size {size} at offset {offset}")]
    InvalidItemSize { size: u32, offset: u64 },
}

impl From<evt::error::EvtSourceError> for SourceError {
    fn from(value: evt::error::EvtSourceError) -> Self {
        match value {
            evt::error::EvtSourceError::Io(err) => SourceError::Io(err),
            evt::error::EvtSourceError::TruncatedItem {
                offset,
                declared,
                actual,
            } => SourceError::TruncatedItem {
                offset,
                declared,
                actual,
            },
            evt::error::EvtSourceError::InvalidItemSize { size, offset } => {
                SourceError::InvalidItemSize { size, offset }
            }
        }
    }
}
