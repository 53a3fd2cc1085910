//! Bulk reading and writing of meshes stored as flat slices.
//!
//! A channel is a flat slice of values read `stride` at a time, with a
//! second flat slice of zero-based indices read `indices_per_face` at a
//! time. Positions, texture coordinates and normals each have their own
//! index slice, as in OBJ itself.
//!
//! ```text
//! positions  [x0 y0 z0 x1 y1 z1 ...]   stride 3 (or 4 with w)
//! indices    [a0 b0 c0 a1 b1 c1 ...]   indices_per_face 3
//! ```

use std::io::{BufRead, Write};
use std::slice::ChunksExact;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ObjCounts;
use crate::attribute::{Normal, Position, TexCoord};
use crate::error::{ObjError, ObjResult};
use crate::face::{Face, Index, IndexGroup};
use crate::params::{ReadParams, WriteParams};
use crate::read::{ObjSink, read_obj};
use crate::scalar::{IndexValue, Scalar};
use crate::write::{ObjSource, write_obj};

/// A flat slice of attribute values grouped into records of `stride` values.
#[derive(Debug)]
pub struct Channel<'a, T> {
    values: &'a [T],
    stride: usize,
}

impl<T> Clone for Channel<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Channel<'_, T> {}

impl<'a, T> Channel<'a, T> {
    /// Wrap `values` as records of `stride` values each.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::InvalidChannel`] if `stride` is zero or does not
    /// divide the number of values.
    pub fn new(values: &'a [T], stride: usize) -> ObjResult<Self> {
        if stride == 0 {
            return Err(ObjError::invalid_channel("stride must be greater than zero"));
        }
        if values.len() % stride != 0 {
            return Err(ObjError::invalid_channel(format!(
                "{} values is not a multiple of stride {stride}",
                values.len()
            )));
        }
        Ok(Self { values, stride })
    }

    /// Number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len() / self.stride
    }

    /// `true` if there are no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values per record.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// The flat values.
    #[must_use]
    pub const fn values(&self) -> &'a [T] {
        self.values
    }

    /// The values of record `index`.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<&'a [T]> {
        let start = index.checked_mul(self.stride)?;
        self.values.get(start..start.checked_add(self.stride)?)
    }

    /// Iterate over the records.
    pub fn records(&self) -> ChunksExact<'a, T> {
        self.values.chunks_exact(self.stride)
    }
}

/// A [`Channel`] paired with per-face indices into its records.
#[derive(Debug)]
pub struct IndexedChannel<'a, T, I> {
    channel: Channel<'a, T>,
    indices: &'a [I],
    indices_per_face: usize,
}

impl<T, I> Clone for IndexedChannel<'_, T, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, I> Copy for IndexedChannel<'_, T, I> {}

impl<'a, T, I: IndexValue> IndexedChannel<'a, T, I> {
    /// Pair `channel` with `indices`, read `indices_per_face` at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::InvalidChannel`] if `indices_per_face` is below
    /// three or does not divide the number of indices, or if an index does
    /// not name a record of `channel`.
    pub fn new(
        channel: Channel<'a, T>,
        indices: &'a [I],
        indices_per_face: usize,
    ) -> ObjResult<Self> {
        if indices_per_face < 3 {
            return Err(ObjError::invalid_channel(format!(
                "indices per face must be at least 3, found {indices_per_face}"
            )));
        }
        if indices.len() % indices_per_face != 0 {
            return Err(ObjError::invalid_channel(format!(
                "{} indices is not a multiple of {indices_per_face} per face",
                indices.len()
            )));
        }
        let records = channel.len();
        if let Some(bad) = indices
            .iter()
            .find(|index| index.to_usize().is_none_or(|i| i >= records))
        {
            return Err(ObjError::invalid_channel(format!(
                "index {bad} out of range for {records} records"
            )));
        }
        Ok(Self {
            channel,
            indices,
            indices_per_face,
        })
    }

    /// The indexed records.
    #[must_use]
    pub const fn channel(&self) -> Channel<'a, T> {
        self.channel
    }

    /// The flat indices.
    #[must_use]
    pub const fn indices(&self) -> &'a [I] {
        self.indices
    }

    /// Indices per face.
    #[must_use]
    pub const fn indices_per_face(&self) -> usize {
        self.indices_per_face
    }

    /// Number of faces.
    #[must_use]
    pub const fn face_count(&self) -> usize {
        self.indices.len() / self.indices_per_face
    }

    /// The indices of face `face`.
    #[must_use]
    pub fn face(&self, face: usize) -> Option<&'a [I]> {
        let start = face.checked_mul(self.indices_per_face)?;
        self.indices.get(start..start.checked_add(self.indices_per_face)?)
    }
}

/// Borrowed flat mesh for [`write_channels`].
///
/// Positions are required; texture coordinates and normals are optional.
/// Every indexed channel must describe the same faces: equal
/// `indices_per_face` and equal index counts.
///
/// # Example
///
/// ```
/// use mesh_obj::{write_channels, Channel, ChannelMeshRef, IndexedChannel, WriteParams};
///
/// let positions = [0.0_f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let indices = [0_u32, 1, 2];
///
/// let mesh = ChannelMeshRef::new(
///     IndexedChannel::new(Channel::new(&positions, 3).unwrap(), &indices, 3).unwrap(),
/// )
/// .unwrap();
///
/// let mut out = Vec::new();
/// write_channels(&mut out, &mesh, &WriteParams::default().without_header()).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
/// ```
#[derive(Debug)]
pub struct ChannelMeshRef<'a, T, I> {
    positions: IndexedChannel<'a, T, I>,
    tex_coords: Option<IndexedChannel<'a, T, I>>,
    normals: Option<IndexedChannel<'a, T, I>>,
}

impl<T, I> Clone for ChannelMeshRef<'_, T, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, I> Copy for ChannelMeshRef<'_, T, I> {}

impl<'a, T, I: IndexValue> ChannelMeshRef<'a, T, I> {
    /// A mesh with positions only.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::InvalidChannel`] unless the position stride is
    /// 3 or 4.
    pub fn new(positions: IndexedChannel<'a, T, I>) -> ObjResult<Self> {
        check_stride("position", positions.channel.stride, &[3, 4])?;
        Ok(Self {
            positions,
            tex_coords: None,
            normals: None,
        })
    }

    /// Add a texture coordinate channel.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::InvalidChannel`] unless the stride is 2 or 3, or
    /// [`ObjError::Inconsistent`] if the channel describes different faces
    /// than the positions.
    pub fn with_tex_coords(mut self, tex_coords: IndexedChannel<'a, T, I>) -> ObjResult<Self> {
        check_stride("texture coordinate", tex_coords.channel.stride, &[2, 3])?;
        self.check_faces("texture coordinate", &tex_coords)?;
        self.tex_coords = Some(tex_coords);
        Ok(self)
    }

    /// Add a normal channel.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::InvalidChannel`] unless the stride is 3, or
    /// [`ObjError::Inconsistent`] if the channel describes different faces
    /// than the positions.
    pub fn with_normals(mut self, normals: IndexedChannel<'a, T, I>) -> ObjResult<Self> {
        check_stride("normal", normals.channel.stride, &[3])?;
        self.check_faces("normal", &normals)?;
        self.normals = Some(normals);
        Ok(self)
    }

    /// The position channel.
    #[must_use]
    pub const fn positions(&self) -> &IndexedChannel<'a, T, I> {
        &self.positions
    }

    /// The texture coordinate channel, if any.
    #[must_use]
    pub const fn tex_coords(&self) -> Option<&IndexedChannel<'a, T, I>> {
        self.tex_coords.as_ref()
    }

    /// The normal channel, if any.
    #[must_use]
    pub const fn normals(&self) -> Option<&IndexedChannel<'a, T, I>> {
        self.normals.as_ref()
    }

    /// Number of faces.
    #[must_use]
    pub const fn face_count(&self) -> usize {
        self.positions.face_count()
    }

    fn check_faces(&self, name: &str, other: &IndexedChannel<'a, T, I>) -> ObjResult<()> {
        if other.indices_per_face != self.positions.indices_per_face {
            return Err(ObjError::inconsistent(format!(
                "{name} channel has {} indices per face, positions have {}",
                other.indices_per_face, self.positions.indices_per_face
            )));
        }
        if other.indices.len() != self.positions.indices.len() {
            return Err(ObjError::inconsistent(format!(
                "{name} channel has {} indices, positions have {}",
                other.indices.len(),
                self.positions.indices.len()
            )));
        }
        Ok(())
    }
}

fn check_stride(name: &str, stride: usize, allowed: &[usize]) -> ObjResult<()> {
    if allowed.contains(&stride) {
        Ok(())
    } else {
        Err(ObjError::invalid_channel(format!(
            "{name} stride must be one of {allowed:?}, found {stride}"
        )))
    }
}

/// Write a flat mesh as OBJ text.
///
/// # Errors
///
/// Returns any error of [`write_obj`].
pub fn write_channels<W: Write, T: Scalar, I: IndexValue>(
    writer: W,
    mesh: &ChannelMeshRef<'_, T, I>,
    params: &WriteParams,
) -> ObjResult<ObjCounts> {
    let mut source = ChannelSource {
        mesh,
        positions: mesh.positions.channel.records(),
        tex_coords: mesh.tex_coords.map(|channel| channel.channel.records()),
        normals: mesh.normals.map(|channel| channel.channel.records()),
        face: 0,
        corners: Vec::with_capacity(mesh.positions.indices_per_face),
    };
    write_obj(writer, &mut source, params)
}

struct ChannelSource<'m, 'a, T, I> {
    mesh: &'m ChannelMeshRef<'a, T, I>,
    positions: ChunksExact<'a, T>,
    tex_coords: Option<ChunksExact<'a, T>>,
    normals: Option<ChunksExact<'a, T>>,
    face: usize,
    corners: Vec<IndexGroup<I>>,
}

impl<T: Scalar, I: IndexValue> ObjSource for ChannelSource<'_, '_, T, I> {
    type Scalar = T;
    type Corner = IndexGroup<I>;

    fn next_position(&mut self) -> Option<Position<T>> {
        match *self.positions.next()? {
            [x, y, z] => Some(Position::new(x, y, z)),
            [x, y, z, w] => Some(Position::with_w(x, y, z, w)),
            _ => None,
        }
    }

    fn next_tex_coord(&mut self) -> Option<TexCoord<T>> {
        match *self.tex_coords.as_mut()?.next()? {
            [u, v] => Some(TexCoord::new(u, v)),
            [u, v, w] => Some(TexCoord::with_w(u, v, w)),
            _ => None,
        }
    }

    fn next_normal(&mut self) -> Option<Normal<T>> {
        match *self.normals.as_mut()?.next()? {
            [x, y, z] => Some(Normal::new(x, y, z)),
            _ => None,
        }
    }

    fn next_face(&mut self) -> Option<Face<IndexGroup<I>>> {
        let face = self.face;
        let positions = self.mesh.positions.face(face)?;
        let tex_coords = self.mesh.tex_coords.and_then(|channel| channel.face(face));
        let normals = self.mesh.normals.and_then(|channel| channel.face(face));

        self.corners.clear();
        for (corner, &position) in positions.iter().enumerate() {
            self.corners.push(IndexGroup {
                position: Index::new(position),
                tex_coord: tex_coords.map(|indices| Index::new(indices[corner])),
                normal: normals.map(|indices| Index::new(indices[corner])),
            });
        }
        self.face += 1;
        // At least three corners per face is checked when the channel is built.
        Face::from_slice(&self.corners).ok()
    }
}

/// Layout of the flat mesh produced by [`read_channels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelLayout {
    /// Values per position: 3 drops `w`, 4 keeps it.
    ///
    /// Default: 3
    pub position_stride: usize,

    /// Values per texture coordinate: 2 drops `w`, 3 keeps it.
    ///
    /// Default: 2
    pub tex_coord_stride: usize,

    /// Corners every face must have.
    ///
    /// Default: 3
    pub indices_per_face: usize,
}

impl Default for ChannelLayout {
    fn default() -> Self {
        Self {
            position_stride: 3,
            tex_coord_stride: 2,
            indices_per_face: 3,
        }
    }
}

impl ChannelLayout {
    /// Layout for quad meshes.
    #[must_use]
    pub fn quads() -> Self {
        Self {
            indices_per_face: 4,
            ..Self::default()
        }
    }

    /// Set the position stride.
    #[must_use]
    pub const fn with_position_stride(mut self, stride: usize) -> Self {
        self.position_stride = stride;
        self
    }

    /// Set the texture coordinate stride.
    #[must_use]
    pub const fn with_tex_coord_stride(mut self, stride: usize) -> Self {
        self.tex_coord_stride = stride;
        self
    }

    /// Set the corners per face.
    #[must_use]
    pub const fn with_indices_per_face(mut self, indices_per_face: usize) -> Self {
        self.indices_per_face = indices_per_face;
        self
    }

    fn validate(&self) -> ObjResult<()> {
        check_stride("position", self.position_stride, &[3, 4])?;
        check_stride("texture coordinate", self.tex_coord_stride, &[2, 3])?;
        if self.indices_per_face < 3 {
            return Err(ObjError::invalid_channel(format!(
                "indices per face must be at least 3, found {}",
                self.indices_per_face
            )));
        }
        Ok(())
    }
}

/// A flat mesh owned by the caller, as produced by [`read_channels`].
///
/// An optional channel's index vector is either empty or as long as
/// `position_indices`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelMesh<T, I> {
    /// Position values, `layout.position_stride` per record.
    pub positions: Vec<T>,
    /// Position indices, `layout.indices_per_face` per face.
    pub position_indices: Vec<I>,
    /// Texture coordinate values, `layout.tex_coord_stride` per record.
    pub tex_coords: Vec<T>,
    /// Texture coordinate indices; empty if faces carry none.
    pub tex_coord_indices: Vec<I>,
    /// Normal values, 3 per record.
    pub normals: Vec<T>,
    /// Normal indices; empty if faces carry none.
    pub normal_indices: Vec<I>,
    /// Strides and face size of the vectors above.
    pub layout: ChannelLayout,
}

impl<T, I> ChannelMesh<T, I> {
    /// An empty mesh with the given layout.
    #[must_use]
    pub const fn new(layout: ChannelLayout) -> Self {
        Self {
            positions: Vec::new(),
            position_indices: Vec::new(),
            tex_coords: Vec::new(),
            tex_coord_indices: Vec::new(),
            normals: Vec::new(),
            normal_indices: Vec::new(),
            layout,
        }
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.position_indices.len() / self.layout.indices_per_face.max(1)
    }
}

impl<T: Scalar, I: IndexValue> ChannelMesh<T, I> {
    /// Borrow as a validated [`ChannelMeshRef`].
    ///
    /// An optional channel is included when faces reference it, or when
    /// there are no faces and it has records. Records that no face
    /// references are otherwise left out.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ChannelMeshRef`]'s constructors.
    pub fn as_mesh_ref(&self) -> ObjResult<ChannelMeshRef<'_, T, I>> {
        let layout = self.layout;
        let faces = layout.indices_per_face;
        let mut mesh = ChannelMeshRef::new(IndexedChannel::new(
            Channel::new(&self.positions, layout.position_stride)?,
            &self.position_indices,
            faces,
        )?)?;
        if self.uses_channel(&self.tex_coords, &self.tex_coord_indices) {
            mesh = mesh.with_tex_coords(IndexedChannel::new(
                Channel::new(&self.tex_coords, layout.tex_coord_stride)?,
                &self.tex_coord_indices,
                faces,
            )?)?;
        }
        if self.uses_channel(&self.normals, &self.normal_indices) {
            mesh = mesh.with_normals(IndexedChannel::new(
                Channel::new(&self.normals, 3)?,
                &self.normal_indices,
                faces,
            )?)?;
        }
        Ok(mesh)
    }

    fn uses_channel(&self, values: &[T], indices: &[I]) -> bool {
        !indices.is_empty() || (self.position_indices.is_empty() && !values.is_empty())
    }
}

/// Read OBJ text into a flat mesh.
///
/// Every face must have exactly `layout.indices_per_face` corners. Either
/// every corner carries a texture index or none does, and the same holds
/// for normal indices.
///
/// # Errors
///
/// Returns [`ObjError::InvalidChannel`] for an invalid `layout` or an index
/// naming a record that does not exist,
/// [`ObjError::FaceArityMismatch`] for a face of the wrong size,
/// [`ObjError::Inconsistent`] for faces that mix corners with and without
/// texture or normal indices, or any error of [`read_obj`].
///
/// # Example
///
/// ```
/// use mesh_obj::{read_channels, ChannelLayout, ChannelMesh};
///
/// let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
/// let mesh: ChannelMesh<f32, u32> =
///     read_channels(text.as_bytes(), ChannelLayout::default()).unwrap();
///
/// assert_eq!(mesh.positions.len(), 9);
/// assert_eq!(mesh.position_indices, [0, 1, 2]);
/// assert_eq!(mesh.normal_indices, [0, 0, 0]);
/// assert!(mesh.tex_coord_indices.is_empty());
/// ```
pub fn read_channels<R: BufRead, T: Scalar, I: IndexValue>(
    reader: R,
    layout: ChannelLayout,
) -> ObjResult<ChannelMesh<T, I>> {
    layout.validate()?;
    let mut sink = ChannelSink {
        mesh: ChannelMesh::new(layout),
        corner_shape: None,
    };
    read_obj(reader, &mut sink, &ReadParams::default())?;
    let mesh = sink.mesh;
    mesh.as_mesh_ref()?;
    Ok(mesh)
}

struct ChannelSink<T, I> {
    mesh: ChannelMesh<T, I>,
    /// Whether corners carry texture and normal indices, fixed by the
    /// first face.
    corner_shape: Option<(bool, bool)>,
}

impl<T: Scalar, I: IndexValue> ObjSink for ChannelSink<T, I> {
    type Scalar = T;
    type Corner = IndexGroup<I>;

    fn add_position(&mut self, position: Position<T>) -> ObjResult<()> {
        let values = &mut self.mesh.positions;
        values.extend([position.x, position.y, position.z]);
        if self.mesh.layout.position_stride == 4 {
            values.push(position.w());
        }
        Ok(())
    }

    fn add_tex_coord(&mut self, tex_coord: TexCoord<T>) -> ObjResult<()> {
        let values = &mut self.mesh.tex_coords;
        values.extend([tex_coord.u, tex_coord.v]);
        if self.mesh.layout.tex_coord_stride == 3 {
            values.push(tex_coord.w());
        }
        Ok(())
    }

    fn add_normal(&mut self, normal: Normal<T>) -> ObjResult<()> {
        self.mesh.normals.extend([normal.x, normal.y, normal.z]);
        Ok(())
    }

    fn add_face(&mut self, face: Face<IndexGroup<I>>) -> ObjResult<()> {
        let expected = self.mesh.layout.indices_per_face;
        if face.len() != expected {
            return Err(ObjError::FaceArityMismatch {
                expected,
                found: face.len(),
            });
        }
        for corner in face.corners() {
            let shape = (corner.tex_coord.is_some(), corner.normal.is_some());
            let first = *self.corner_shape.get_or_insert(shape);
            if shape.0 != first.0 {
                warn!("OBJ faces mix corners with and without texture indices");
                return Err(ObjError::inconsistent(
                    "faces mix corners with and without texture indices",
                ));
            }
            if shape.1 != first.1 {
                warn!("OBJ faces mix corners with and without normal indices");
                return Err(ObjError::inconsistent(
                    "faces mix corners with and without normal indices",
                ));
            }
            self.mesh.position_indices.push(corner.position.get());
            if let Some(index) = corner.tex_coord {
                self.mesh.tex_coord_indices.push(index.get());
            }
            if let Some(index) = corner.normal {
                self.mesh.normal_indices.push(index.get());
            }
        }
        Ok(())
    }
}
