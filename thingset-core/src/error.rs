//! Engine-level error type (§10.1): wraps the lower-level `CodecError` and
//! adds the failure modes that only make sense once an object table and a
//! session exist (unknown object, unauthorized, auth conflict).

use thiserror::Error;
use thingset_types::{CodecError, StatusCode};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("unknown category or function")]
    UnknownFunction,
    #[error("unknown data object")]
    UnknownDataObject,
    #[error("wrong category for this request")]
    WrongCategory,
    #[error("access denied at the current authentication level")]
    Unauthorized,
    #[error("request exceeds the engine's scratch capacity")]
    RequestTooLong,
    #[error("response would exceed the caller's buffer capacity")]
    ResponseTooLong,
    #[error("authentication failed")]
    Conflict,
    #[error("internal engine fault: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Converts this internal error into the wire-visible status. Per
    /// spec.md §7, the wire protocol itself never propagates a `Result` —
    /// every operation handler catches its `EngineError` at the boundary
    /// and emits this status instead.
    pub fn status(&self) -> StatusCode {
        match self {
            EngineError::Codec(e) => e.status(),
            EngineError::UnknownFunction => StatusCode::UnknownFunction,
            EngineError::UnknownDataObject => StatusCode::UnknownDataObject,
            EngineError::WrongCategory => StatusCode::WrongCategory,
            EngineError::Unauthorized => StatusCode::Unauthorized,
            EngineError::RequestTooLong => StatusCode::RequestTooLong,
            EngineError::ResponseTooLong => StatusCode::ResponseTooLong,
            EngineError::Conflict => StatusCode::Conflict,
            EngineError::Internal(_) => StatusCode::InternalError,
        }
    }
}
