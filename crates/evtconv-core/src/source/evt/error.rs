use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvtSourceError {
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
