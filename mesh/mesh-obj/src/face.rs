//! Face records and the index types their corners are made of.
//!
//! Indices are stored zero-based. The one-based form only exists in text:
//! [`Index::from_one_based`] is applied while parsing and
//! [`Index::to_one_based`] while writing.

use std::io::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ObjError, ObjResult};
use crate::parse::{parse_index, parse_index_group};
use crate::scalar::IndexValue;
use crate::serialize::{write_index, write_index_group};

/// A zero-based index into an attribute list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Index<I>(I);

impl<I: IndexValue> Index<I> {
    /// Wrap a zero-based index value.
    ///
    /// No range check is made here; writing an index that has no one-based
    /// form fails with [`ObjError::InvalidIndex`].
    #[inline]
    #[must_use]
    pub const fn new(value: I) -> Self {
        Self(value)
    }

    /// The zero-based value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> I {
        self.0
    }

    /// Convert a one-based index, as found in OBJ text, to zero-based.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::IndexNotPositive`] if `value` is not greater than zero.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_obj::Index;
    ///
    /// assert_eq!(Index::from_one_based(1_u32).unwrap().get(), 0);
    /// assert!(Index::from_one_based(0_u32).is_err());
    /// ```
    pub fn from_one_based(value: I) -> ObjResult<Self> {
        if value <= I::ZERO {
            return Err(ObjError::IndexNotPositive);
        }
        value
            .checked_decrement()
            .map(Self)
            .ok_or(ObjError::IndexNotPositive)
    }

    /// Convert to the one-based value written to OBJ text.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::InvalidIndex`] if the value is negative or is the
    /// largest value of its type, so that adding one would overflow. One
    /// below the largest value is accepted and becomes the largest value.
    pub fn to_one_based(self) -> ObjResult<I> {
        if self.0 < I::ZERO {
            return Err(self.invalid());
        }
        self.0.checked_increment().ok_or_else(|| self.invalid())
    }

    fn invalid(self) -> ObjError {
        ObjError::InvalidIndex {
            value: self.0.to_string(),
        }
    }
}

/// A face corner that references a position and, optionally, a texture
/// coordinate and a normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexGroup<I> {
    /// Position index.
    pub position: Index<I>,
    /// Texture coordinate index, if referenced.
    pub tex_coord: Option<Index<I>>,
    /// Normal index, if referenced.
    pub normal: Option<Index<I>>,
}

impl<I: IndexValue> IndexGroup<I> {
    /// A group referencing only a position.
    #[inline]
    #[must_use]
    pub const fn new(position: Index<I>) -> Self {
        Self {
            position,
            tex_coord: None,
            normal: None,
        }
    }

    /// Set the texture coordinate index.
    #[inline]
    #[must_use]
    pub fn with_tex_coord(mut self, tex_coord: Index<I>) -> Self {
        self.tex_coord = Some(tex_coord);
        self
    }

    /// Set the normal index.
    #[inline]
    #[must_use]
    pub fn with_normal(mut self, normal: Index<I>) -> Self {
        self.normal = Some(normal);
        self
    }
}

/// The corner type of a [`Face`].
///
/// Implemented by [`Index`] for position-only faces and by [`IndexGroup`]
/// for faces that may reference texture coordinates and normals. The choice
/// decides how face tokens are parsed: an `Index` corner rejects
/// slash-delimited tokens.
pub trait FaceCorner: Copy {
    /// Integer type of the indices.
    type Value: IndexValue;

    /// Parse one face token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid corner of this type.
    fn parse_corner(token: &str) -> ObjResult<Self>;

    /// Write the one-based text form of this corner.
    ///
    /// # Errors
    ///
    /// Returns an error if an index has no one-based form or the writer fails.
    fn write_corner<W: Write>(&self, out: &mut W) -> ObjResult<()>;

    /// The position index.
    fn position(&self) -> Index<Self::Value>;

    /// The texture coordinate index, if referenced.
    fn tex_coord(&self) -> Option<Index<Self::Value>> {
        None
    }

    /// The normal index, if referenced.
    fn normal(&self) -> Option<Index<Self::Value>> {
        None
    }
}

impl<I: IndexValue> FaceCorner for Index<I> {
    type Value = I;

    fn parse_corner(token: &str) -> ObjResult<Self> {
        parse_index(token)
    }

    fn write_corner<W: Write>(&self, out: &mut W) -> ObjResult<()> {
        write_index(out, *self)
    }

    fn position(&self) -> Index<I> {
        *self
    }
}

impl<I: IndexValue> FaceCorner for IndexGroup<I> {
    type Value = I;

    fn parse_corner(token: &str) -> ObjResult<Self> {
        parse_index_group(token)
    }

    fn write_corner<W: Write>(&self, out: &mut W) -> ObjResult<()> {
        write_index_group(out, self)
    }

    fn position(&self) -> Index<I> {
        self.position
    }

    fn tex_coord(&self) -> Option<Index<I>> {
        self.tex_coord
    }

    fn normal(&self) -> Option<Index<I>> {
        self.normal
    }
}

/// A face: a triangle, a quad, or a polygon with any number of corners.
///
/// The fixed-arity variants cannot hold the wrong number of corners. A
/// `Polygon` built by hand can, so [`Face::validate`] checks it has at
/// least three.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Face<C> {
    /// Three corners.
    Triangle([C; 3]),
    /// Four corners.
    Quad([C; 4]),
    /// Any number of corners from three up.
    ///
    /// Parsing only produces this variant for five or more corners. A
    /// polygon of three or four corners built by hand is valid and is
    /// written normally, but reads back as a `Triangle` or `Quad`.
    Polygon(Vec<C>),
}

impl<C> Face<C> {
    /// Build a face from its corners, choosing the variant by corner count.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::TooFewFaceIndices`] for fewer than three corners.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_obj::{Face, Index};
    ///
    /// let face = Face::from_corners(vec![Index::new(0_u32), Index::new(1), Index::new(2)]).unwrap();
    /// assert!(matches!(face, Face::Triangle(_)));
    /// ```
    pub fn from_corners(corners: Vec<C>) -> ObjResult<Self> {
        let corners = match <[C; 3]>::try_from(corners) {
            Ok(triangle) => return Ok(Self::Triangle(triangle)),
            Err(corners) => corners,
        };
        let corners = match <[C; 4]>::try_from(corners) {
            Ok(quad) => return Ok(Self::Quad(quad)),
            Err(corners) => corners,
        };
        if corners.len() < 3 {
            return Err(ObjError::TooFewFaceIndices {
                count: corners.len(),
            });
        }
        Ok(Self::Polygon(corners))
    }

    /// The corners in order.
    #[must_use]
    pub fn corners(&self) -> &[C] {
        match self {
            Self::Triangle(corners) => corners,
            Self::Quad(corners) => corners,
            Self::Polygon(corners) => corners,
        }
    }

    /// Number of corners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.corners().len()
    }

    /// `true` only for a polygon with no corners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.corners().is_empty()
    }

    /// Check the corner count of a `Polygon`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::TooFewFaceIndices`] for a polygon with fewer than
    /// three corners.
    pub fn validate(&self) -> ObjResult<()> {
        match self {
            Self::Polygon(corners) if corners.len() < 3 => Err(ObjError::TooFewFaceIndices {
                count: corners.len(),
            }),
            _ => Ok(()),
        }
    }

    /// Convert every corner, keeping the variant.
    #[must_use]
    pub fn map<D>(self, f: impl FnMut(C) -> D) -> Face<D> {
        match self {
            Self::Triangle(corners) => Face::Triangle(corners.map(f)),
            Self::Quad(corners) => Face::Quad(corners.map(f)),
            Self::Polygon(corners) => Face::Polygon(corners.into_iter().map(f).collect()),
        }
    }
}

impl<C: Copy> Face<C> {
    /// Build a face from a slice of corners. Only polygons allocate.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::TooFewFaceIndices`] for fewer than three corners.
    pub fn from_slice(corners: &[C]) -> ObjResult<Self> {
        match corners.len() {
            0..=2 => Err(ObjError::TooFewFaceIndices {
                count: corners.len(),
            }),
            3 => Ok(Self::Triangle([corners[0], corners[1], corners[2]])),
            4 => Ok(Self::Quad([corners[0], corners[1], corners[2], corners[3]])),
            _ => Ok(Self::Polygon(corners.to_vec())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn idx(value: u32) -> Index<u32> {
        Index::new(value)
    }

    #[test]
    fn one_based_round_trip() {
        for value in [0_u32, 1, 41, u32::MAX - 1] {
            let one_based = Index::new(value).to_one_based().unwrap();
            assert_eq!(Index::from_one_based(one_based).unwrap().get(), value);
        }
    }

    #[test]
    fn max_index_cannot_be_written() {
        let err = Index::new(u32::MAX).to_one_based().unwrap_err();
        assert!(matches!(err, ObjError::InvalidIndex { .. }));
        assert_eq!(err.to_string(), format!("invalid index: {}", u32::MAX));
    }

    #[test]
    fn index_below_max_writes_as_max() {
        assert_eq!(Index::new(u16::MAX - 1).to_one_based().unwrap(), u16::MAX);
        assert_eq!(Index::new(i64::MAX - 1).to_one_based().unwrap(), i64::MAX);
        assert_eq!(Index::from_one_based(u16::MAX).unwrap().get(), u16::MAX - 1);
    }

    #[test]
    fn hand_built_short_polygon_reads_back_as_triangle() {
        let face = Face::Polygon(vec![idx(0), idx(1), idx(2)]);
        assert!(face.validate().is_ok());

        let mut line = Vec::new();
        crate::serialize::write_face_line(&mut line, &face, "\n").unwrap();
        assert_eq!(line, b"f 1 2 3\n");

        let text = std::str::from_utf8(&line).unwrap();
        let fields = text.split_whitespace().skip(1);
        let read: Face<Index<u32>> =
            crate::parse::parse_face(fields, crate::params::FaceArity::Any).unwrap();
        assert_eq!(read, Face::Triangle([idx(0), idx(1), idx(2)]));
    }

    #[test]
    fn negative_index_cannot_be_written() {
        assert!(matches!(
            Index::new(-1_i32).to_one_based(),
            Err(ObjError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn zero_and_negative_one_based_rejected() {
        assert!(matches!(
            Index::from_one_based(0_u16),
            Err(ObjError::IndexNotPositive)
        ));
        assert!(matches!(
            Index::from_one_based(-4_i64),
            Err(ObjError::IndexNotPositive)
        ));
    }

    #[test]
    fn variant_chosen_by_corner_count() {
        let tri = Face::from_corners(vec![idx(0), idx(1), idx(2)]).unwrap();
        assert!(matches!(tri, Face::Triangle(_)));

        let quad = Face::from_slice(&[idx(0), idx(1), idx(2), idx(3)]).unwrap();
        assert!(matches!(quad, Face::Quad(_)));

        let poly = Face::from_corners((0..6).map(idx).collect()).unwrap();
        assert_eq!(poly.len(), 6);
        assert!(matches!(poly, Face::Polygon(_)));

        assert!(matches!(
            Face::from_corners(vec![idx(0), idx(1)]),
            Err(ObjError::TooFewFaceIndices { count: 2 })
        ));
        assert!(Face::<Index<u32>>::from_slice(&[]).is_err());
    }

    #[test]
    fn short_polygon_fails_validation() {
        let face = Face::Polygon(vec![idx(0), idx(1)]);
        assert!(face.validate().is_err());
        assert!(Face::Triangle([idx(0), idx(1), idx(2)]).validate().is_ok());
    }

    #[test]
    fn map_keeps_variant() {
        let face = Face::Quad([idx(0), idx(1), idx(2), idx(3)]).map(IndexGroup::new);
        assert!(matches!(face, Face::Quad(_)));
        assert_eq!(face.corners()[3].position, idx(3));
        assert_eq!(face.corners()[3].normal, None);
    }

    #[test]
    fn group_accessors() {
        let group = IndexGroup::new(idx(2)).with_normal(idx(5));
        assert_eq!(group.position(), idx(2));
        assert_eq!(FaceCorner::tex_coord(&group), None);
        assert_eq!(FaceCorner::normal(&group), Some(idx(5)));
        assert_eq!(FaceCorner::normal(&idx(2)), None);
    }
}
