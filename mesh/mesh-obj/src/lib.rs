//! Streaming reader and writer for the geometry subset of Wavefront OBJ.
//!
//! The crate understands four line kinds:
//!
//! - `v x y z [w]` positions
//! - `vt u v [w]` texture coordinates, every component in `[0, 1]`
//! - `vn x y z` normals
//! - `f g1 g2 g3 [g4 ...]` faces, each corner `p`, `p/t`, `p//n` or `p/t/n`
//!
//! Blank lines and `#` comments are skipped; any other line is an error.
//! Indices are one-based in the text and zero-based everywhere else.
//!
//! # Adapters
//!
//! The engine never owns a mesh. Reading pushes each record to an
//! [`ObjSink`] as soon as it is parsed; writing pulls records from an
//! [`ObjSource`] until each channel runs dry. Memory use is bounded by one
//! line, whatever the size of the mesh.
//!
//! Meshes kept as flat slices can skip the adapter and use
//! [`read_channels`] and [`write_channels`].
//!
//! # Example
//!
//! ```
//! use mesh_obj::{read_obj, write_obj, Face, IndexGroup, IterSource, ObjResult, ObjSink};
//! use mesh_obj::{Normal, Position, ReadParams, WriteParams};
//!
//! #[derive(Default)]
//! struct Mesh {
//!     positions: Vec<Position<f64>>,
//!     normals: Vec<Normal<f64>>,
//!     faces: Vec<Face<IndexGroup<u32>>>,
//! }
//!
//! impl ObjSink for Mesh {
//!     type Scalar = f64;
//!     type Corner = IndexGroup<u32>;
//!
//!     fn add_position(&mut self, position: Position<f64>) -> ObjResult<()> {
//!         self.positions.push(position);
//!         Ok(())
//!     }
//!
//!     fn add_normal(&mut self, normal: Normal<f64>) -> ObjResult<()> {
//!         self.normals.push(normal);
//!         Ok(())
//!     }
//!
//!     fn add_face(&mut self, face: Face<IndexGroup<u32>>) -> ObjResult<()> {
//!         self.faces.push(face);
//!         Ok(())
//!     }
//! }
//!
//! let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
//! let mut mesh = Mesh::default();
//! read_obj(text.as_bytes(), &mut mesh, &ReadParams::default()).unwrap();
//!
//! let mut source = IterSource::new(mesh.positions, mesh.faces).with_normals(mesh.normals);
//! let mut out = Vec::new();
//! write_obj(&mut out, &mut source, &WriteParams::default().without_header()).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), text);
//! ```
//!
//! # Logging
//!
//! Reads and writes emit [`tracing`] events at `debug` level with record
//! counts, and the line number of a failed read.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod attribute;
mod channel;
mod error;
mod face;
mod line;
mod params;
mod parse;
mod read;
mod scalar;
mod serialize;
mod write;

pub use attribute::{Normal, Position, TexCoord};
pub use channel::{
    Channel, ChannelLayout, ChannelMesh, ChannelMeshRef, IndexedChannel, read_channels,
    write_channels,
};
pub use error::{ObjError, ObjErrorKind, ObjResult};
pub use face::{Face, FaceCorner, Index, IndexGroup};
pub use line::{Line, LineKind, classify_line};
pub use params::{DEFAULT_HEADER, FaceArity, ReadParams, WriteParams};
pub use parse::{
    parse_face, parse_face_into, parse_index, parse_index_group, parse_normal, parse_position,
    parse_tex_coord, parse_value,
};
pub use read::{ObjSink, read_obj};
pub use scalar::{IndexValue, Scalar};
pub use serialize::{
    write_face_line, write_index, write_index_group, write_normal_line, write_position_line,
    write_tex_coord_line,
};
pub use write::{IterSource, ObjSource, write_obj};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Number of records of each kind read or written by one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjCounts {
    /// `v` records.
    pub position_count: usize,
    /// `vt` records.
    pub tex_coord_count: usize,
    /// `vn` records.
    pub normal_count: usize,
    /// `f` records.
    pub face_count: usize,
}

/// Read an OBJ file, pushing every record to `sink`.
///
/// # Arguments
///
/// * `path` - Path to the OBJ file
/// * `sink` - Receiver for parsed records
/// * `params` - Reader configuration
///
/// # Errors
///
/// Returns [`ObjError::FileNotFound`] if the file does not exist, or any
/// error of [`read_obj`].
///
/// # Example
///
/// ```no_run
/// use mesh_obj::{load_obj, ReadParams};
/// # use mesh_obj::{Face, Index, ObjResult, ObjSink, Position};
/// # #[derive(Default)]
/// # struct Mesh;
/// # impl ObjSink for Mesh {
/// #     type Scalar = f32;
/// #     type Corner = Index<u32>;
/// #     fn add_position(&mut self, _: Position<f32>) -> ObjResult<()> { Ok(()) }
/// #     fn add_face(&mut self, _: Face<Index<u32>>) -> ObjResult<()> { Ok(()) }
/// # }
///
/// let mut mesh = Mesh::default();
/// let counts = load_obj("model.obj", &mut mesh, &ReadParams::default()).unwrap();
/// println!("{} faces", counts.face_count);
/// ```
pub fn load_obj<P: AsRef<Path>, S: ObjSink + ?Sized>(
    path: P,
    sink: &mut S,
    params: &ReadParams,
) -> ObjResult<ObjCounts> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ObjError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ObjError::Io(e)
        }
    })?;
    read_obj(BufReader::new(file), sink, params)
}

/// Write an OBJ file, pulling every record from `source`.
///
/// The file is created or truncated.
///
/// # Errors
///
/// Returns an error if the file cannot be created, or any error of
/// [`write_obj`].
pub fn save_obj<P: AsRef<Path>, S: ObjSource + ?Sized>(
    path: P,
    source: &mut S,
    params: &WriteParams,
) -> ObjResult<ObjCounts> {
    let file = File::create(path)?;
    write_obj(BufWriter::new(file), source, params)
}
