//! Line classification and tokenizing.
//!
//! ```text
//! # comment              ignored, as are blank lines
//! v x y z [w]            position
//! vt u v [w]             texture coordinate
//! vn x y z               normal
//! f g1 g2 g3 [g4 ...]    face
//! ```

use std::io::BufRead;
use std::str::SplitWhitespace;

use crate::error::{ObjError, ObjResult};

/// The record kind of a line, decided by its first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Blank line or comment.
    Ignored,
    /// `v`
    Position,
    /// `vt`
    TexCoord,
    /// `vn`
    Normal,
    /// `f`
    Face,
}

impl LineKind {
    /// The prefix token that introduces this kind, if any.
    #[must_use]
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Ignored => None,
            Self::Position => Some("v"),
            Self::TexCoord => Some("vt"),
            Self::Normal => Some("vn"),
            Self::Face => Some("f"),
        }
    }
}

/// A classified line and its remaining field tokens.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    kind: LineKind,
    fields: SplitWhitespace<'a>,
}

impl<'a> Line<'a> {
    /// The record kind.
    #[must_use]
    pub const fn kind(&self) -> LineKind {
        self.kind
    }

    /// The whitespace-separated tokens after the prefix.
    #[must_use]
    pub fn into_fields(self) -> SplitWhitespace<'a> {
        self.fields
    }
}

/// Classify a line by its prefix token.
///
/// # Errors
///
/// Returns [`ObjError::UnrecognizedPrefix`] for any prefix other than
/// `v`, `vt`, `vn`, `f` or one starting with `#`.
///
/// # Example
///
/// ```
/// use mesh_obj::{classify_line, LineKind};
///
/// let line = classify_line("vn 0 0 1").unwrap();
/// assert_eq!(line.kind(), LineKind::Normal);
/// assert_eq!(line.into_fields().count(), 3);
///
/// assert!(classify_line("usemtl steel").is_err());
/// ```
pub fn classify_line(line: &str) -> ObjResult<Line<'_>> {
    let mut fields = line.split_whitespace();
    let kind = match fields.next() {
        None => LineKind::Ignored,
        Some(prefix) if prefix.starts_with('#') => LineKind::Ignored,
        Some("v") => LineKind::Position,
        Some("vt") => LineKind::TexCoord,
        Some("vn") => LineKind::Normal,
        Some("f") => LineKind::Face,
        Some(prefix) => {
            return Err(ObjError::UnrecognizedPrefix {
                prefix: prefix.to_string(),
            });
        }
    };
    Ok(Line { kind, fields })
}

/// Reads lines into one reused buffer, counting them.
pub(crate) struct LineReader<R> {
    reader: R,
    buffer: String,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(128),
            line_number: 0,
        }
    }

    /// The next line without its terminator, or `None` at end of input.
    pub(crate) fn next_line(&mut self) -> ObjResult<Option<&str>> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(self.buffer.trim_end_matches(['\n', '\r'])))
    }

    /// One-based number of the line last returned.
    pub(crate) const fn line_number(&self) -> usize {
        self.line_number
    }
}
