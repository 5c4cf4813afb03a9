// Wed Jan 14 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("Storage exhausted at field {0}")]
    Exhausted(usize),
    #[error("Field {index}: cannot parse {value:?} as {expected}: {reason}")]
    Parse {
        index: usize,
        value: String,
        expected: &'static str,
        reason: String,
    },
    #[error("Field {index}: expected {expected}: {reason}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        reason: String,
    },
    #[error("Encoding failed: {0}")]
    Encode(String),
}

pub type AccessResult<T> = Result<T, AccessError>;
