//! Reader and writer configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ObjError, ObjResult};

/// Header comment written by default.
pub const DEFAULT_HEADER: &str = "Generated by CortenForge mesh-obj";

/// Which face corner counts the reader accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FaceArity {
    /// Any face with at least three corners.
    #[default]
    Any,
    /// Exactly three corners.
    Triangles,
    /// Exactly four corners.
    Quads,
}

impl FaceArity {
    /// The required corner count, or `None` for [`FaceArity::Any`].
    #[must_use]
    pub const fn fixed(self) -> Option<usize> {
        match self {
            Self::Any => None,
            Self::Triangles => Some(3),
            Self::Quads => Some(4),
        }
    }

    /// Check a face corner count.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::FaceArityMismatch`] when a fixed arity is not met,
    /// or [`ObjError::TooFewFaceIndices`] for fewer than three corners.
    pub fn check(self, count: usize) -> ObjResult<()> {
        match self.fixed() {
            Some(expected) if count != expected => Err(ObjError::FaceArityMismatch {
                expected,
                found: count,
            }),
            _ if count < 3 => Err(ObjError::TooFewFaceIndices { count }),
            _ => Ok(()),
        }
    }
}

/// Parameters for [`read_obj`](crate::read_obj).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadParams {
    /// Accepted face corner counts.
    ///
    /// Default: [`FaceArity::Any`]
    pub face_arity: FaceArity,
}

impl ReadParams {
    /// Accept only triangles.
    #[must_use]
    pub const fn triangles() -> Self {
        Self {
            face_arity: FaceArity::Triangles,
        }
    }

    /// Set the accepted face corner counts.
    #[must_use]
    pub const fn with_face_arity(mut self, face_arity: FaceArity) -> Self {
        self.face_arity = face_arity;
        self
    }
}

/// Parameters for [`write_obj`](crate::write_obj).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WriteParams {
    /// Comment text written before any record, one `#` line per text line.
    /// `None` writes no header.
    ///
    /// Default: [`DEFAULT_HEADER`]
    pub header: Option<String>,

    /// Terminator written after every line.
    ///
    /// Default: `"\n"`
    pub newline: String,
}

impl Default for WriteParams {
    fn default() -> Self {
        Self {
            header: Some(DEFAULT_HEADER.to_string()),
            newline: "\n".to_string(),
        }
    }
}

impl WriteParams {
    /// Default parameters with `\r\n` line endings.
    #[must_use]
    pub fn crlf() -> Self {
        Self::default().with_newline("\r\n")
    }

    /// Set the header comment text.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_obj::WriteParams;
    ///
    /// let params = WriteParams::default().with_header("exported from scan 42");
    /// assert_eq!(params.header.as_deref(), Some("exported from scan 42"));
    /// ```
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Write no header comment.
    #[must_use]
    pub fn without_header(mut self) -> Self {
        self.header = None;
        self
    }

    /// Set the line terminator.
    #[must_use]
    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }
}
