//! Rendering of typed records as OBJ lines.
//!
//! Each `write_*_line` function validates its record before writing
//! anything, so a failed call leaves `out` untouched.

use std::io::Write;

use crate::attribute::{Normal, Position, TexCoord};
use crate::error::ObjResult;
use crate::face::{Face, FaceCorner, Index, IndexGroup};
use crate::scalar::{IndexValue, Scalar};

/// Write a `v x y z [w]` line.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_position_line<W: Write, T: Scalar>(
    out: &mut W,
    position: &Position<T>,
    newline: &str,
) -> ObjResult<()> {
    write!(out, "v {} {} {}", position.x, position.y, position.z)?;
    if let Some(w) = position.w {
        write!(out, " {w}")?;
    }
    out.write_all(newline.as_bytes())?;
    Ok(())
}

/// Write a `vt u v [w]` line.
///
/// # Errors
///
/// Returns [`ObjError::TexCoordOutOfRange`](crate::ObjError::TexCoordOutOfRange)
/// if a component lies outside `[0, 1]`, or an error if the writer fails.
pub fn write_tex_coord_line<W: Write, T: Scalar>(
    out: &mut W,
    tex_coord: &TexCoord<T>,
    newline: &str,
) -> ObjResult<()> {
    tex_coord.validate()?;
    write!(out, "vt {} {}", tex_coord.u, tex_coord.v)?;
    if let Some(w) = tex_coord.w {
        write!(out, " {w}")?;
    }
    out.write_all(newline.as_bytes())?;
    Ok(())
}

/// Write a `vn x y z` line.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_normal_line<W: Write, T: Scalar>(
    out: &mut W,
    normal: &Normal<T>,
    newline: &str,
) -> ObjResult<()> {
    write!(out, "vn {} {} {}", normal.x, normal.y, normal.z)?;
    out.write_all(newline.as_bytes())?;
    Ok(())
}

/// Write an index in its one-based form.
///
/// # Errors
///
/// Returns [`ObjError::InvalidIndex`](crate::ObjError::InvalidIndex) for a
/// negative index or one at the maximum of its type.
pub fn write_index<W: Write, I: IndexValue>(out: &mut W, index: Index<I>) -> ObjResult<()> {
    write!(out, "{}", index.to_one_based()?)?;
    Ok(())
}

/// Write an index group as `p`, `p/t`, `p//n` or `p/t/n`.
///
/// # Errors
///
/// See [`write_index`].
pub fn write_index_group<W: Write, I: IndexValue>(
    out: &mut W,
    group: &IndexGroup<I>,
) -> ObjResult<()> {
    let position = group.position.to_one_based()?;
    let tex_coord = group.tex_coord.map(Index::to_one_based).transpose()?;
    let normal = group.normal.map(Index::to_one_based).transpose()?;
    match (tex_coord, normal) {
        (None, None) => write!(out, "{position}")?,
        (Some(t), None) => write!(out, "{position}/{t}")?,
        (None, Some(n)) => write!(out, "{position}//{n}")?,
        (Some(t), Some(n)) => write!(out, "{position}/{t}/{n}")?,
    }
    Ok(())
}

/// Write an `f g1 g2 g3 ...` line.
///
/// The line is rendered into a scratch buffer first, so an invalid corner
/// leaves `out` untouched.
///
/// # Errors
///
/// Returns [`ObjError::TooFewFaceIndices`](crate::ObjError::TooFewFaceIndices)
/// for a polygon with fewer than three corners, the errors of
/// [`write_index`] for its corners, or an error if the writer fails.
///
/// # Example
///
/// ```
/// use mesh_obj::{write_face_line, Face, Index, IndexGroup};
///
/// let corner = |p: u32, n: u32| IndexGroup::new(Index::new(p)).with_normal(Index::new(n));
/// let face = Face::Triangle([corner(0, 0), corner(1, 0), corner(2, 0)]);
///
/// let mut out = Vec::new();
/// write_face_line(&mut out, &face, "\n").unwrap();
/// assert_eq!(out, b"f 1//1 2//1 3//1\n");
/// ```
pub fn write_face_line<W: Write, C: FaceCorner>(
    out: &mut W,
    face: &Face<C>,
    newline: &str,
) -> ObjResult<()> {
    let mut line = Vec::with_capacity(16 * face.len());
    render_face(&mut line, face, newline)?;
    out.write_all(&line)?;
    Ok(())
}

/// Append a face line to `line` without any intermediate buffer.
pub(crate) fn render_face<C: FaceCorner>(
    line: &mut Vec<u8>,
    face: &Face<C>,
    newline: &str,
) -> ObjResult<()> {
    face.validate()?;
    line.push(b'f');
    for corner in face.corners() {
        line.push(b' ');
        corner.write_corner(line)?;
    }
    line.extend_from_slice(newline.as_bytes());
    Ok(())
}
