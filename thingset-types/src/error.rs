//! Internal codec error type (§10.1): richer than the wire `StatusCode`,
//! with an explicit conversion to it at the handler boundary.

use thiserror::Error;

use crate::status::StatusCode;
use crate::value::TypeTag;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unexpected end of buffer")]
    UnexpectedEof,
    #[error("response buffer too small")]
    BufferTooSmall,
    #[error("indefinite-length encoding is not supported")]
    IndefiniteLength,
    #[error("malformed input: {0}")]
    Malformed(&'static str),
    #[error("value out of range for the declared width")]
    OutOfRange,
    #[error("type mismatch: expected {expected:?}")]
    TypeMismatch { expected: TypeTag },
}

impl CodecError {
    pub fn status(&self) -> StatusCode {
        match self {
            CodecError::UnexpectedEof | CodecError::IndefiniteLength | CodecError::Malformed(_) => {
                StatusCode::WrongFormat
            }
            CodecError::BufferTooSmall => StatusCode::ResponseTooLong,
            CodecError::OutOfRange => StatusCode::InvalidValue,
            CodecError::TypeMismatch { .. } => StatusCode::WrongType,
        }
    }
}
