use thiserror::Error;

use crate::formats::ddas::DdasError;

#[derive(Debug, Error)]
pub enum RingError {
    #[error("physics payload too short at offset {offset}: need {needed} bytes, {remaining} remaining")]
    TooShort {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("hit decode failed at payload offset {offset}: {source}")]
    Hit {
        offset: usize,
        #[source]
        source: DdasError,
    },
}
