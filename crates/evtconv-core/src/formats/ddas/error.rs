use thiserror::Error;

#[derive(Debug, Error)]
pub enum DdasError {
    #[error("truncated read: need {needed} bytes, {remaining} remaining")]
    TruncatedRead { needed: usize, remaining: usize },
    #[error("unknown module frequency: {value}")]
    UnknownFrequency { value: i16 },
    #[error("record length mismatch: declared {declared} bytes, consumed {consumed}")]
    LengthMismatch { declared: usize, consumed: usize },
}
