//! Error types for OBJ reading and writing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for OBJ operations.
pub type ObjResult<T> = Result<T, ObjError>;

/// Errors that can occur while reading or writing OBJ data.
///
/// The `Display` text of each variant is stable; callers that match on
/// message content can rely on it.
#[derive(Debug, Error)]
pub enum ObjError {
    /// The first token of a line is not one of `v`, `vt`, `vn`, `f` or a comment.
    #[error("unrecognized line prefix '{prefix}'")]
    UnrecognizedPrefix {
        /// The offending prefix token.
        prefix: String,
    },

    /// A token could not be parsed as the expected numeric type.
    #[error("failed parsing '{token}'")]
    Parse {
        /// The token that failed to parse.
        token: String,
    },

    /// A record line carried more values than its kind allows.
    #[error("expected at most {max} values")]
    TooManyValues {
        /// Maximum number of values for the record kind.
        max: usize,
    },

    /// A record line carried fewer values than its kind requires.
    #[error("{message}")]
    InvalidAttributeArity {
        /// Description of the expected arity.
        message: &'static str,
    },

    /// A texture coordinate component lies outside `[0, 1]`.
    #[error("texture coordinate values must be in range [0, 1], found {value}")]
    TexCoordOutOfRange {
        /// The offending component, as text.
        value: String,
    },

    /// A one-based index token was zero or negative.
    #[error("parsed index must be greater than zero")]
    IndexNotPositive,

    /// A component of a slash-delimited index group was empty.
    #[error("empty {component} index")]
    EmptyIndex {
        /// Which component was empty: `position`, `texture` or `normal`.
        component: &'static str,
    },

    /// An index group had more than three slash-delimited components.
    #[error("index group must have at most 3 components, found {count}")]
    TooManyIndexComponents {
        /// Number of components found.
        count: usize,
    },

    /// A face had fewer than three corners.
    #[error("face must have at least three indices, found {count}")]
    TooFewFaceIndices {
        /// Number of corners found.
        count: usize,
    },

    /// A face did not have the corner count the reader was configured for.
    #[error("face must have exactly {expected} indices, found {found}")]
    FaceArityMismatch {
        /// Configured corner count.
        expected: usize,
        /// Number of corners found.
        found: usize,
    },

    /// A zero-based index cannot be written as a one-based index.
    #[error("invalid index: {value}")]
    InvalidIndex {
        /// The offending zero-based index, as text.
        value: String,
    },

    /// A flat attribute or index channel violates its layout.
    #[error("invalid channel: {message}")]
    InvalidChannel {
        /// Description of what was invalid.
        message: String,
    },

    /// Attribute channels disagree with each other.
    #[error("inconsistent channels: {message}")]
    Inconsistent {
        /// Description of the mismatch.
        message: String,
    },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`ObjError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjErrorKind {
    /// Unrecognized line prefix.
    Grammar,
    /// A numeric token could not be parsed.
    Parse,
    /// Wrong number of values or face corners.
    Arity,
    /// A value or index is out of its valid range.
    Range,
    /// Malformed slash-delimited index group.
    StructuralIndex,
    /// Channel layout or cross-channel mismatch.
    Consistency,
    /// Failure of the underlying stream.
    Io,
}

impl ObjError {
    /// Create an `InvalidChannel` error with the given message.
    #[must_use]
    pub fn invalid_channel(message: impl Into<String>) -> Self {
        Self::InvalidChannel {
            message: message.into(),
        }
    }

    /// Create an `Inconsistent` error with the given message.
    #[must_use]
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::Inconsistent {
            message: message.into(),
        }
    }

    /// The logical kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ObjErrorKind {
        match self {
            Self::UnrecognizedPrefix { .. } => ObjErrorKind::Grammar,
            Self::Parse { .. } => ObjErrorKind::Parse,
            Self::TooManyValues { .. }
            | Self::InvalidAttributeArity { .. }
            | Self::TooFewFaceIndices { .. }
            | Self::FaceArityMismatch { .. } => ObjErrorKind::Arity,
            Self::TexCoordOutOfRange { .. } | Self::IndexNotPositive | Self::InvalidIndex { .. } => {
                ObjErrorKind::Range
            }
            Self::EmptyIndex { .. } | Self::TooManyIndexComponents { .. } => {
                ObjErrorKind::StructuralIndex
            }
            Self::InvalidChannel { .. } | Self::Inconsistent { .. } => ObjErrorKind::Consistency,
            Self::FileNotFound { .. } | Self::Io(_) => ObjErrorKind::Io,
        }
    }
}
