//! Vertex attribute records: positions, texture coordinates and normals.

use nalgebra::{Point2, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ObjError, ObjResult};
use crate::scalar::Scalar;

/// A vertex position (`v x y z [w]`).
///
/// `w` is `None` when the source line had three values; [`Position::w`]
/// then reports the homogeneous default of one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position<T> {
    /// X coordinate.
    pub x: T,
    /// Y coordinate.
    pub y: T,
    /// Z coordinate.
    pub z: T,
    /// Explicit homogeneous weight, if one was given.
    pub w: Option<T>,
}

impl<T: Scalar> Position<T> {
    /// Create a three-component position.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_obj::Position;
    ///
    /// let p = Position::new(1.0_f32, 2.0, 3.0);
    /// assert_eq!(p.w(), 1.0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z, w: None }
    }

    /// Create a four-component position with an explicit `w`.
    #[inline]
    #[must_use]
    pub const fn with_w(x: T, y: T, z: T, w: T) -> Self {
        Self {
            x,
            y,
            z,
            w: Some(w),
        }
    }

    /// The homogeneous weight, defaulting to one.
    #[inline]
    #[must_use]
    pub fn w(&self) -> T {
        self.w.unwrap_or(T::ONE)
    }

    /// All four components `[x, y, z, w]`.
    #[inline]
    #[must_use]
    pub fn to_homogeneous(&self) -> [T; 4] {
        [self.x, self.y, self.z, self.w()]
    }

    /// Number of components the record carries (3 or 4).
    #[inline]
    #[must_use]
    pub const fn arity(&self) -> usize {
        if self.w.is_some() { 4 } else { 3 }
    }
}

/// A texture coordinate (`vt u v [w]`).
///
/// Every present component must lie in `[0, 1]`. Construction does not
/// check this; [`TexCoord::validate`] does, and both the parser and the
/// writer call it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TexCoord<T> {
    /// Horizontal coordinate.
    pub u: T,
    /// Vertical coordinate.
    pub v: T,
    /// Optional depth coordinate.
    pub w: Option<T>,
}

impl<T: Scalar> TexCoord<T> {
    /// Create a two-component texture coordinate.
    #[inline]
    #[must_use]
    pub const fn new(u: T, v: T) -> Self {
        Self { u, v, w: None }
    }

    /// Create a three-component texture coordinate.
    #[inline]
    #[must_use]
    pub const fn with_w(u: T, v: T, w: T) -> Self {
        Self { u, v, w: Some(w) }
    }

    /// The depth coordinate, defaulting to zero.
    #[inline]
    #[must_use]
    pub fn w(&self) -> T {
        self.w.unwrap_or(T::ZERO)
    }

    /// Number of components the record carries (2 or 3).
    #[inline]
    #[must_use]
    pub const fn arity(&self) -> usize {
        if self.w.is_some() { 3 } else { 2 }
    }

    /// Check that every present component lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjError::TexCoordOutOfRange`] naming the first offending
    /// component. NaN is out of range.
    pub fn validate(&self) -> ObjResult<()> {
        for value in [Some(self.u), Some(self.v), self.w].into_iter().flatten() {
            check_unit_range(value)?;
        }
        Ok(())
    }
}

/// Reject values outside `[0, 1]`.
pub(crate) fn check_unit_range<T: Scalar>(value: T) -> ObjResult<()> {
    if T::ZERO <= value && value <= T::ONE {
        Ok(())
    } else {
        Err(ObjError::TexCoordOutOfRange {
            value: value.to_string(),
        })
    }
}

/// A vertex normal (`vn x y z`). Not required to be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Normal<T> {
    /// X component.
    pub x: T,
    /// Y component.
    pub y: T,
    /// Z component.
    pub z: T,
}

impl<T: Scalar> Normal<T> {
    /// Create a normal.
    #[inline]
    #[must_use]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Scalar + nalgebra::Scalar> From<Position<T>> for Point3<T> {
    fn from(p: Position<T>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl<T: Scalar + nalgebra::Scalar> From<Point3<T>> for Position<T> {
    fn from(p: Point3<T>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl<T: Scalar + nalgebra::Scalar> From<TexCoord<T>> for Point2<T> {
    fn from(t: TexCoord<T>) -> Self {
        Self::new(t.u, t.v)
    }
}

impl<T: Scalar + nalgebra::Scalar> From<Point2<T>> for TexCoord<T> {
    fn from(p: Point2<T>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl<T: Scalar + nalgebra::Scalar> From<Normal<T>> for Vector3<T> {
    fn from(n: Normal<T>) -> Self {
        Self::new(n.x, n.y, n.z)
    }
}

impl<T: Scalar + nalgebra::Scalar> From<Vector3<T>> for Normal<T> {
    fn from(v: Vector3<T>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
