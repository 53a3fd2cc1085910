//! Push-based reading: the engine parses lines and hands each record to an
//! [`ObjSink`].

use std::io::BufRead;

use tracing::debug;

use crate::ObjCounts;
use crate::attribute::{Normal, Position, TexCoord};
use crate::error::ObjResult;
use crate::face::{Face, FaceCorner};
use crate::line::{LineKind, LineReader, classify_line};
use crate::params::ReadParams;
use crate::parse::{parse_face_into, parse_normal, parse_position, parse_tex_coord};
use crate::scalar::Scalar;

/// Receiver for records parsed by [`read_obj`].
///
/// The associated types declare how records are parsed: `Scalar` is the
/// component type of positions, texture coordinates and normals, and
/// `Corner` picks plain [`Index`](crate::Index) faces or
/// [`IndexGroup`](crate::IndexGroup) faces.
///
/// Texture coordinates and normals are optional: the default methods
/// discard them. The lines are still parsed and validated.
///
/// Every method may fail; the error aborts the read and is returned from
/// [`read_obj`] unchanged.
pub trait ObjSink {
    /// Component type of attribute records.
    type Scalar: Scalar;

    /// Face corner type.
    type Corner: FaceCorner;

    /// Receive a position.
    ///
    /// # Errors
    ///
    /// Any error aborts the read.
    fn add_position(&mut self, position: Position<Self::Scalar>) -> ObjResult<()>;

    /// Receive a texture coordinate. Discarded by default.
    ///
    /// # Errors
    ///
    /// Any error aborts the read.
    fn add_tex_coord(&mut self, _tex_coord: TexCoord<Self::Scalar>) -> ObjResult<()> {
        Ok(())
    }

    /// Receive a normal. Discarded by default.
    ///
    /// # Errors
    ///
    /// Any error aborts the read.
    fn add_normal(&mut self, _normal: Normal<Self::Scalar>) -> ObjResult<()> {
        Ok(())
    }

    /// Receive a face.
    ///
    /// # Errors
    ///
    /// Any error aborts the read.
    fn add_face(&mut self, face: Face<Self::Corner>) -> ObjResult<()>;
}

impl<S: ObjSink + ?Sized> ObjSink for &mut S {
    type Scalar = S::Scalar;
    type Corner = S::Corner;

    fn add_position(&mut self, position: Position<Self::Scalar>) -> ObjResult<()> {
        (**self).add_position(position)
    }

    fn add_tex_coord(&mut self, tex_coord: TexCoord<Self::Scalar>) -> ObjResult<()> {
        (**self).add_tex_coord(tex_coord)
    }

    fn add_normal(&mut self, normal: Normal<Self::Scalar>) -> ObjResult<()> {
        (**self).add_normal(normal)
    }

    fn add_face(&mut self, face: Face<Self::Corner>) -> ObjResult<()> {
        (**self).add_face(face)
    }
}

/// Read OBJ text, pushing every record to `sink` in file order.
///
/// Blank lines and `#` comments are skipped. Reading stops at the first
/// error; whatever `sink` received before it should be discarded.
///
/// # Arguments
///
/// * `reader` - Buffered source of OBJ text
/// * `sink` - Receiver for parsed records
/// * `params` - Reader configuration
///
/// # Errors
///
/// Returns the first grammar, parse, arity, range or index error
/// encountered, an error from `sink`, or an I/O error.
///
/// # Example
///
/// ```
/// use mesh_obj::{read_obj, Face, Index, ObjResult, ObjSink, Position, ReadParams};
///
/// #[derive(Default)]
/// struct Soup {
///     positions: Vec<Position<f32>>,
///     faces: Vec<Face<Index<u32>>>,
/// }
///
/// impl ObjSink for Soup {
///     type Scalar = f32;
///     type Corner = Index<u32>;
///
///     fn add_position(&mut self, position: Position<f32>) -> ObjResult<()> {
///         self.positions.push(position);
///         Ok(())
///     }
///
///     fn add_face(&mut self, face: Face<Index<u32>>) -> ObjResult<()> {
///         self.faces.push(face);
///         Ok(())
///     }
/// }
///
/// let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
/// let mut soup = Soup::default();
/// let counts = read_obj(text.as_bytes(), &mut soup, &ReadParams::default()).unwrap();
/// assert_eq!(counts.position_count, 3);
/// assert_eq!(soup.faces.len(), 1);
/// ```
pub fn read_obj<R: BufRead, S: ObjSink + ?Sized>(
    reader: R,
    sink: &mut S,
    params: &ReadParams,
) -> ObjResult<ObjCounts> {
    let mut lines = LineReader::new(reader);
    let mut corners = Vec::new();
    let mut counts = ObjCounts::default();

    while let Some(line) = lines.next_line()? {
        if let Err(err) = read_line(line, sink, params, &mut corners, &mut counts) {
            debug!("OBJ read failed at line {}: {}", lines.line_number(), err);
            return Err(err);
        }
    }

    debug!(
        "OBJ read: {} positions, {} texture coordinates, {} normals, {} faces",
        counts.position_count, counts.tex_coord_count, counts.normal_count, counts.face_count
    );
    Ok(counts)
}

/// Parse one line and dispatch its record.
fn read_line<S: ObjSink + ?Sized>(
    line: &str,
    sink: &mut S,
    params: &ReadParams,
    corners: &mut Vec<S::Corner>,
    counts: &mut ObjCounts,
) -> ObjResult<()> {
    let line = classify_line(line)?;
    let kind = line.kind();
    let fields = line.into_fields();
    match kind {
        LineKind::Ignored => {}
        LineKind::Position => {
            sink.add_position(parse_position(fields)?)?;
            counts.position_count += 1;
        }
        LineKind::TexCoord => {
            sink.add_tex_coord(parse_tex_coord(fields)?)?;
            counts.tex_coord_count += 1;
        }
        LineKind::Normal => {
            sink.add_normal(parse_normal(fields)?)?;
            counts.normal_count += 1;
        }
        LineKind::Face => {
            sink.add_face(parse_face_into(fields, params.face_arity, corners)?)?;
            counts.face_count += 1;
        }
    }
    Ok(())
}
