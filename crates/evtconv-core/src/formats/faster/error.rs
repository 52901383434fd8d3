use thiserror::Error;

#[derive(Debug, Error)]
pub enum FasterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid labeled event on line {line}: {source}")]
    InvalidLine {
        line: u64,
        #[source]
        source: serde_json::Error,
    },
    #[error("labeled event {label} has no value field")]
    MissingValue { label: u16 },
}
