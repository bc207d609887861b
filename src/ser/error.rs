use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Context markers used when reporting serialization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerKind {
    /// Canonical inclusion proof framing.
    Proof,
    /// Flat sibling digest section inside a proof.
    Siblings,
}

impl fmt::Display for SerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerKind::Proof => write!(f, "proof"),
            SerKind::Siblings => write!(f, "siblings"),
        }
    }
}

/// Canonical serialization error surfaced while encoding or decoding data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerError {
    /// Input ended before the expected number of bytes were read.
    #[error("unexpected end of {kind} input while reading `{field}`")]
    UnexpectedEnd {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// A length prefix exceeded the configured bounds or remaining buffer.
    #[error("invalid {kind} length for `{field}`")]
    InvalidLength {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// Encountered an unexpected discriminant or out-of-range value.
    #[error("invalid {kind} value for `{field}`")]
    InvalidValue {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// Additional bytes remained after consuming the expected payload.
    #[error("{remaining} trailing {kind} bytes after offset {consumed}")]
    TrailingBytes {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Position reached by the decoder.
        consumed: usize,
        /// Number of remaining bytes.
        remaining: usize,
    },
}

impl SerError {
    pub fn unexpected_end(kind: SerKind, field: &'static str) -> Self {
        SerError::UnexpectedEnd { kind, field }
    }

    pub fn invalid_length(kind: SerKind, field: &'static str) -> Self {
        SerError::InvalidLength { kind, field }
    }

    pub fn invalid_value(kind: SerKind, field: &'static str) -> Self {
        SerError::InvalidValue { kind, field }
    }

    pub fn trailing_bytes(kind: SerKind, consumed: usize, remaining: usize) -> Self {
        SerError::TrailingBytes {
            kind,
            consumed,
            remaining,
        }
    }

    /// Returns the serialization context associated with the error.
    pub fn kind(&self) -> SerKind {
        match *self {
            SerError::UnexpectedEnd { kind, .. }
            | SerError::InvalidLength { kind, .. }
            | SerError::InvalidValue { kind, .. }
            | SerError::TrailingBytes { kind, .. } => kind,
        }
    }
}

/// Convenient alias for serialization results.
pub type SerResult<T> = core::result::Result<T, SerError>;
