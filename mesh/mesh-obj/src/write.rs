//! Pull-based writing: the engine asks an [`ObjSource`] for records until
//! each channel is exhausted.

use std::io::Write;
use std::iter::Empty;

use tracing::debug;

use crate::ObjCounts;
use crate::attribute::{Normal, Position, TexCoord};
use crate::error::ObjResult;
use crate::face::{Face, FaceCorner};
use crate::params::WriteParams;
use crate::scalar::Scalar;
use crate::serialize::{render_face, write_normal_line, write_position_line, write_tex_coord_line};

/// Supplier of records for [`write_obj`].
///
/// Each `next_*` method returns `None` once its channel is exhausted. The
/// texture coordinate and normal channels are empty by default.
pub trait ObjSource {
    /// Component type of attribute records.
    type Scalar: Scalar;

    /// Face corner type.
    type Corner: FaceCorner;

    /// The next position.
    fn next_position(&mut self) -> Option<Position<Self::Scalar>>;

    /// The next texture coordinate. Empty by default.
    fn next_tex_coord(&mut self) -> Option<TexCoord<Self::Scalar>> {
        None
    }

    /// The next normal. Empty by default.
    fn next_normal(&mut self) -> Option<Normal<Self::Scalar>> {
        None
    }

    /// The next face.
    fn next_face(&mut self) -> Option<Face<Self::Corner>>;
}

impl<S: ObjSource + ?Sized> ObjSource for &mut S {
    type Scalar = S::Scalar;
    type Corner = S::Corner;

    fn next_position(&mut self) -> Option<Position<Self::Scalar>> {
        (**self).next_position()
    }

    fn next_tex_coord(&mut self) -> Option<TexCoord<Self::Scalar>> {
        (**self).next_tex_coord()
    }

    fn next_normal(&mut self) -> Option<Normal<Self::Scalar>> {
        (**self).next_normal()
    }

    fn next_face(&mut self) -> Option<Face<Self::Corner>> {
        (**self).next_face()
    }
}

/// An [`ObjSource`] over one iterator per channel.
///
/// # Example
///
/// ```
/// use mesh_obj::{write_obj, Face, Index, IterSource, Normal, Position, WriteParams};
///
/// let positions = [
///     Position::new(0.0_f32, 0.0, 0.0),
///     Position::new(1.0, 0.0, 0.0),
///     Position::new(0.0, 1.0, 0.0),
/// ];
/// let faces = [Face::Triangle([Index::new(0_u32), Index::new(1), Index::new(2)])];
///
/// let mut source = IterSource::new(positions, faces)
///     .with_normals([Normal::new(0.0, 0.0, 1.0)]);
///
/// let mut out = Vec::new();
/// write_obj(&mut out, &mut source, &WriteParams::default().without_header()).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1 2 3\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct IterSource<P, T, N, F> {
    positions: P,
    tex_coords: T,
    normals: N,
    faces: F,
}

impl<S, P, F> IterSource<P, Empty<TexCoord<S>>, Empty<Normal<S>>, F>
where
    S: Scalar,
    P: Iterator<Item = Position<S>>,
    F: Iterator,
{
    /// A source with positions and faces only.
    pub fn new(
        positions: impl IntoIterator<IntoIter = P>,
        faces: impl IntoIterator<IntoIter = F>,
    ) -> Self {
        Self {
            positions: positions.into_iter(),
            tex_coords: std::iter::empty(),
            normals: std::iter::empty(),
            faces: faces.into_iter(),
        }
    }
}

impl<P, T, N, F> IterSource<P, T, N, F> {
    /// Add a texture coordinate channel.
    #[must_use]
    pub fn with_tex_coords<T2: IntoIterator>(
        self,
        tex_coords: T2,
    ) -> IterSource<P, T2::IntoIter, N, F> {
        IterSource {
            positions: self.positions,
            tex_coords: tex_coords.into_iter(),
            normals: self.normals,
            faces: self.faces,
        }
    }

    /// Add a normal channel.
    #[must_use]
    pub fn with_normals<N2: IntoIterator>(
        self,
        normals: N2,
    ) -> IterSource<P, T, N2::IntoIter, F> {
        IterSource {
            positions: self.positions,
            tex_coords: self.tex_coords,
            normals: normals.into_iter(),
            faces: self.faces,
        }
    }
}

impl<S, C, P, T, N, F> ObjSource for IterSource<P, T, N, F>
where
    S: Scalar,
    C: FaceCorner,
    P: Iterator<Item = Position<S>>,
    T: Iterator<Item = TexCoord<S>>,
    N: Iterator<Item = Normal<S>>,
    F: Iterator<Item = Face<C>>,
{
    type Scalar = S;
    type Corner = C;

    fn next_position(&mut self) -> Option<Position<S>> {
        self.positions.next()
    }

    fn next_tex_coord(&mut self) -> Option<TexCoord<S>> {
        self.tex_coords.next()
    }

    fn next_normal(&mut self) -> Option<Normal<S>> {
        self.normals.next()
    }

    fn next_face(&mut self) -> Option<Face<C>> {
        self.faces.next()
    }
}

/// Write OBJ text, pulling every record from `source`.
///
/// Sections are written in a fixed order: the header comment, positions,
/// texture coordinates, normals, faces. Each line is rendered in full
/// before it reaches `writer`, so a record that fails validation writes
/// nothing of itself; earlier lines have already been written.
///
/// # Arguments
///
/// * `writer` - Destination of the OBJ text
/// * `source` - Supplier of records
/// * `params` - Writer configuration
///
/// # Errors
///
/// Returns [`ObjError::TexCoordOutOfRange`](crate::ObjError::TexCoordOutOfRange)
/// for a texture coordinate outside `[0, 1]`,
/// [`ObjError::TooFewFaceIndices`](crate::ObjError::TooFewFaceIndices) for a
/// short polygon, [`ObjError::InvalidIndex`](crate::ObjError::InvalidIndex)
/// for an index with no one-based form, or an I/O error.
pub fn write_obj<W: Write, S: ObjSource + ?Sized>(
    mut writer: W,
    source: &mut S,
    params: &WriteParams,
) -> ObjResult<ObjCounts> {
    let newline = params.newline.as_str();
    let mut counts = ObjCounts::default();
    let mut line = Vec::with_capacity(128);

    if let Some(header) = &params.header {
        for text in header.lines() {
            if text.is_empty() {
                write!(writer, "#{newline}")?;
            } else {
                write!(writer, "# {text}{newline}")?;
            }
        }
    }

    while let Some(position) = source.next_position() {
        line.clear();
        write_position_line(&mut line, &position, newline)?;
        writer.write_all(&line)?;
        counts.position_count += 1;
    }

    while let Some(tex_coord) = source.next_tex_coord() {
        line.clear();
        write_tex_coord_line(&mut line, &tex_coord, newline)?;
        writer.write_all(&line)?;
        counts.tex_coord_count += 1;
    }

    while let Some(normal) = source.next_normal() {
        line.clear();
        write_normal_line(&mut line, &normal, newline)?;
        writer.write_all(&line)?;
        counts.normal_count += 1;
    }

    while let Some(face) = source.next_face() {
        line.clear();
        render_face(&mut line, &face, newline)?;
        writer.write_all(&line)?;
        counts.face_count += 1;
    }

    writer.flush()?;

    debug!(
        "OBJ write: {} positions, {} texture coordinates, {} normals, {} faces",
        counts.position_count, counts.tex_coord_count, counts.normal_count, counts.face_count
    );
    Ok(counts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ObjError;
    use crate::face::{Index, IndexGroup};
    use crate::params::DEFAULT_HEADER;

    fn triangle() -> Face<Index<u32>> {
        Face::Triangle([Index::new(0), Index::new(1), Index::new(2)])
    }

    fn corners() -> [Position<f32>; 3] {
        [
            Position::new(0.0, 0.0, 0.0),
            Position::new(1.0, 0.0, 0.0),
            Position::new(0.0, 1.0, 0.0),
        ]
    }

    fn write_to_string<S: ObjSource>(mut source: S, params: &WriteParams) -> ObjResult<String> {
        let mut out = Vec::new();
        write_obj(&mut out, &mut source, params)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn default_header_comes_first() {
        let text = write_to_string(IterSource::new(corners(), [triangle()]), &WriteParams::default())
            .unwrap();
        assert!(text.starts_with(&format!("# {DEFAULT_HEADER}\nv 0 0 0\n")));
        assert!(text.ends_with("f 1 2 3\n"));
    }

    #[test]
    fn multi_line_header() {
        let params = WriteParams::default().with_header("first\n\nthird");
        let text = write_to_string(IterSource::new(corners(), [triangle()]), &params).unwrap();
        assert!(text.starts_with("# first\n#\n# third\nv "));
    }

    #[test]
    fn sections_in_fixed_order() {
        let face = Face::Triangle([
            IndexGroup::new(Index::new(0_u32)).with_tex_coord(Index::new(0)),
            IndexGroup::new(Index::new(1)).with_tex_coord(Index::new(1)),
            IndexGroup::new(Index::new(2)).with_tex_coord(Index::new(0)),
        ]);
        let source = IterSource::new(corners(), [face])
            .with_normals([Normal::new(0.0_f32, 0.0, 1.0)])
            .with_tex_coords([TexCoord::new(0.0_f32, 0.0), TexCoord::new(1.0, 0.5)]);

        let text = write_to_string(source, &WriteParams::crlf().without_header()).unwrap();
        assert_eq!(
            text,
            "v 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\n\
             vt 0 0\r\nvt 1 0.5\r\n\
             vn 0 0 1\r\n\
             f 1/1 2/2 3/1\r\n"
        );
    }

    #[test]
    fn counts_match_output() {
        let mut source = IterSource::new(corners(), [triangle(), triangle()])
            .with_normals([Normal::new(0.0_f32, 1.0, 0.0)]);
        let counts = write_obj(std::io::sink(), &mut source, &WriteParams::default()).unwrap();
        assert_eq!(
            counts,
            ObjCounts {
                position_count: 3,
                tex_coord_count: 0,
                normal_count: 1,
                face_count: 2,
            }
        );
    }

    #[test]
    fn invalid_tex_coord_aborts() {
        let source =
            IterSource::new(corners(), [triangle()]).with_tex_coords([TexCoord::new(0.0_f32, -0.5)]);
        let err = write_to_string(source, &WriteParams::default()).unwrap_err();
        assert!(matches!(err, ObjError::TexCoordOutOfRange { .. }));
    }

    /// Hand-written source over borrowed storage.
    struct Borrowed<'a> {
        positions: std::slice::Iter<'a, [f64; 3]>,
        faces: std::slice::Iter<'a, [u16; 3]>,
    }

    impl ObjSource for Borrowed<'_> {
        type Scalar = f64;
        type Corner = Index<u16>;

        fn next_position(&mut self) -> Option<Position<f64>> {
            self.positions.next().map(|&[x, y, z]| Position::new(x, y, z))
        }

        fn next_face(&mut self) -> Option<Face<Index<u16>>> {
            self.faces.next().map(|&face| Face::Triangle(face.map(Index::new)))
        }
    }

    #[test]
    fn trait_impl_with_default_channels() {
        let positions = [[0.5, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.5]];
        let faces = [[0, 1, 2], [2, 1, 0]];
        let source = Borrowed {
            positions: positions.iter(),
            faces: faces.iter(),
        };
        let text = write_to_string(source, &WriteParams::default().without_header()).unwrap();
        assert_eq!(text, "v 0.5 0 0\nv 0 0.5 0\nv 0 0 0.5\nf 1 2 3\nf 3 2 1\n");
    }

    #[test]
    fn max_index_fails() {
        let face = Face::Triangle([Index::new(0_u16), Index::new(1), Index::new(u16::MAX)]);
        let source = IterSource::new(corners(), [face]);
        let err = write_to_string(source, &WriteParams::default()).unwrap_err();
        assert!(matches!(err, ObjError::InvalidIndex { .. }));
    }
}
