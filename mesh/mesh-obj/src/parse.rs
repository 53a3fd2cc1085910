//! Parsing of record fields into typed values.
//!
//! Every function here works on the field tokens of one line, as produced
//! by [`classify_line`](crate::classify_line), and keeps no state between
//! calls.

use std::str::FromStr;

use crate::attribute::{Normal, Position, TexCoord};
use crate::error::{ObjError, ObjResult};
use crate::face::{Face, FaceCorner, Index, IndexGroup};
use crate::params::FaceArity;
use crate::scalar::{IndexValue, Scalar};

/// Parse a whole token as `T`.
///
/// # Errors
///
/// Returns [`ObjError::Parse`] if the token is not entirely a valid `T`.
pub fn parse_value<T: FromStr>(token: &str) -> ObjResult<T> {
    token.parse().map_err(|_| ObjError::Parse {
        token: token.to_string(),
    })
}

/// Parse at most `MAX` values, returning them and how many there were.
fn parse_values<'a, T: Scalar, const MAX: usize>(
    fields: impl IntoIterator<Item = &'a str>,
) -> ObjResult<([T; MAX], usize)> {
    let mut values = [T::ZERO; MAX];
    let mut count = 0;
    for token in fields {
        if count == MAX {
            return Err(ObjError::TooManyValues { max: MAX });
        }
        values[count] = parse_value(token)?;
        count += 1;
    }
    Ok((values, count))
}

/// Parse the fields of a `v` line.
///
/// # Errors
///
/// Fails unless there are exactly 3 or 4 numeric values.
///
/// # Example
///
/// ```
/// use mesh_obj::{parse_position, Position};
///
/// let p: Position<f32> = parse_position("1 2 3".split_whitespace()).unwrap();
/// assert_eq!(p, Position::new(1.0, 2.0, 3.0));
/// ```
pub fn parse_position<'a, T: Scalar>(
    fields: impl IntoIterator<Item = &'a str>,
) -> ObjResult<Position<T>> {
    match parse_values::<T, 4>(fields)? {
        ([x, y, z, _], 3) => Ok(Position::new(x, y, z)),
        ([x, y, z, w], 4) => Ok(Position::with_w(x, y, z, w)),
        _ => Err(ObjError::InvalidAttributeArity {
            message: "positions must have 3 or 4 values",
        }),
    }
}

/// Parse the fields of a `vt` line.
///
/// # Errors
///
/// Fails unless there are exactly 2 or 3 numeric values, all in `[0, 1]`.
pub fn parse_tex_coord<'a, T: Scalar>(
    fields: impl IntoIterator<Item = &'a str>,
) -> ObjResult<TexCoord<T>> {
    let tex_coord = match parse_values::<T, 3>(fields)? {
        ([u, v, _], 2) => TexCoord::new(u, v),
        ([u, v, w], 3) => TexCoord::with_w(u, v, w),
        _ => {
            return Err(ObjError::InvalidAttributeArity {
                message: "texture coordinates must have 2 or 3 values",
            });
        }
    };
    tex_coord.validate()?;
    Ok(tex_coord)
}

/// Parse the fields of a `vn` line.
///
/// # Errors
///
/// Fails unless there are exactly 3 numeric values.
pub fn parse_normal<'a, T: Scalar>(
    fields: impl IntoIterator<Item = &'a str>,
) -> ObjResult<Normal<T>> {
    match parse_values::<T, 3>(fields)? {
        ([x, y, z], 3) => Ok(Normal::new(x, y, z)),
        _ => Err(ObjError::InvalidAttributeArity {
            message: "normals must have 3 values",
        }),
    }
}

/// Parse a one-based index token into a zero-based [`Index`].
///
/// # Errors
///
/// Returns [`ObjError::Parse`] if the token is not an integer of type `I`
/// (including any token containing `/`), or
/// [`ObjError::IndexNotPositive`] if it is not greater than zero.
pub fn parse_index<I: IndexValue>(token: &str) -> ObjResult<Index<I>> {
    Index::from_one_based(parse_value(token)?)
}

/// Parse a slash-delimited index group token.
///
/// Accepted forms:
///
/// | token   | result                          |
/// |---------|---------------------------------|
/// | `p`     | position                        |
/// | `p/t`   | position, texture               |
/// | `p/t/n` | position, texture, normal       |
/// | `p//n`  | position, normal                |
/// | `/t`    | error: empty position index     |
/// | `p/`    | error: empty texture index      |
/// | `p//`   | error: empty normal index       |
/// | `p/t/`  | error: empty normal index       |
/// | `a/b/c/d` | error: more than 3 components |
///
/// # Errors
///
/// Returns a structural error for empty or surplus components, and the
/// errors of [`parse_index`] for each non-empty component.
pub fn parse_index_group<I: IndexValue>(token: &str) -> ObjResult<IndexGroup<I>> {
    let mut components = [""; 3];
    let mut count = 0;
    for component in token.split('/') {
        if count == components.len() {
            return Err(ObjError::TooManyIndexComponents {
                count: token.split('/').count(),
            });
        }
        components[count] = component;
        count += 1;
    }

    let [position, tex_coord, normal] = components;
    if position.is_empty() {
        return Err(ObjError::EmptyIndex {
            component: "position",
        });
    }
    let mut group = IndexGroup::new(parse_index(position)?);

    if count >= 2 {
        if !tex_coord.is_empty() {
            group.tex_coord = Some(parse_index(tex_coord)?);
        } else if count == 2 {
            return Err(ObjError::EmptyIndex {
                component: "texture",
            });
        }
    }
    if count == 3 {
        if normal.is_empty() {
            return Err(ObjError::EmptyIndex {
                component: "normal",
            });
        }
        group.normal = Some(parse_index(normal)?);
    }
    Ok(group)
}

/// Parse the fields of an `f` line into `corners`, then build the face.
///
/// `corners` is cleared first and left holding the parsed corners, so one
/// buffer can serve a whole file; only polygons allocate.
///
/// # Errors
///
/// Fails on the first malformed corner token, or if the corner count does
/// not satisfy `arity`.
pub fn parse_face_into<'a, C: FaceCorner>(
    fields: impl IntoIterator<Item = &'a str>,
    arity: FaceArity,
    corners: &mut Vec<C>,
) -> ObjResult<Face<C>> {
    corners.clear();
    for token in fields {
        corners.push(C::parse_corner(token)?);
    }
    arity.check(corners.len())?;
    Face::from_slice(corners)
}

/// Parse the fields of an `f` line.
///
/// # Errors
///
/// See [`parse_face_into`].
///
/// # Example
///
/// ```
/// use mesh_obj::{parse_face, Face, FaceArity, Index};
///
/// let face: Face<Index<u32>> = parse_face("1 2 3".split_whitespace(), FaceArity::Any).unwrap();
/// assert_eq!(face, Face::Triangle([Index::new(0), Index::new(1), Index::new(2)]));
/// ```
pub fn parse_face<'a, C: FaceCorner>(
    fields: impl IntoIterator<Item = &'a str>,
    arity: FaceArity,
) -> ObjResult<Face<C>> {
    parse_face_into(fields, arity, &mut Vec::new())
}
