//! Line grammar conformance: which lines are accepted, and the exact error
//! each rejected line produces.

#![allow(clippy::unwrap_used)]

use mesh_obj::{
    Face, FaceArity, Index, IndexGroup, ObjError, ObjErrorKind, ObjResult, ObjSink, Position,
    ReadParams, TexCoord, parse_index_group, read_obj,
};

// =============================================================================
// Helpers
// =============================================================================

/// Sink that keeps faces and the number of attribute records.
#[derive(Default)]
struct Faces {
    positions: usize,
    faces: Vec<Face<IndexGroup<u32>>>,
}

impl ObjSink for Faces {
    type Scalar = f32;
    type Corner = IndexGroup<u32>;

    fn add_position(&mut self, _position: Position<f32>) -> ObjResult<()> {
        self.positions += 1;
        Ok(())
    }

    fn add_face(&mut self, face: Face<IndexGroup<u32>>) -> ObjResult<()> {
        self.faces.push(face);
        Ok(())
    }
}

fn read_with(text: &str, params: &ReadParams) -> ObjResult<Faces> {
    let mut sink = Faces::default();
    read_obj(text.as_bytes(), &mut sink, params)?;
    Ok(sink)
}

fn read(text: &str) -> ObjResult<Faces> {
    read_with(text, &ReadParams::default())
}

fn error(text: &str) -> String {
    match read(text) {
        Ok(_) => panic!("expected {text:?} to be rejected"),
        Err(err) => err.to_string(),
    }
}

fn group(position: u32, tex_coord: Option<u32>, normal: Option<u32>) -> IndexGroup<u32> {
    IndexGroup {
        position: Index::new(position),
        tex_coord: tex_coord.map(Index::new),
        normal: normal.map(Index::new),
    }
}

// =============================================================================
// Index groups
// =============================================================================

#[test]
fn index_group_table() {
    let accepted: &[(&str, IndexGroup<u32>)] = &[
        ("1", group(0, None, None)),
        ("7/2", group(6, Some(1), None)),
        ("7/2/3", group(6, Some(1), Some(2))),
        ("7//3", group(6, None, Some(2))),
        ("12//1", group(11, None, Some(0))),
    ];
    for (token, expected) in accepted {
        assert_eq!(parse_index_group::<u32>(token).unwrap(), *expected, "{token}");
    }

    let rejected: &[(&str, &str)] = &[
        ("/2", "empty position index"),
        ("/", "empty position index"),
        ("//3", "empty position index"),
        ("", "empty position index"),
        ("1/", "empty texture index"),
        ("1//", "empty normal index"),
        ("1/2/", "empty normal index"),
        ("1/2/3/4", "index group must have at most 3 components, found 4"),
        ("1///", "index group must have at most 3 components, found 4"),
        ("0/1/1", "parsed index must be greater than zero"),
        ("1/0", "parsed index must be greater than zero"),
        ("1/1/x", "failed parsing 'x'"),
        ("-1", "failed parsing '-1'"),
    ];
    for (token, message) in rejected {
        let err = parse_index_group::<u32>(token).unwrap_err();
        assert_eq!(err.to_string(), *message, "{token:?}");
    }
}

#[test]
fn signed_index_types_reject_non_positive() {
    let err = parse_index_group::<i64>("-3").unwrap_err();
    assert!(matches!(err, ObjError::IndexNotPositive));
    assert_eq!(err.kind(), ObjErrorKind::Range);
}

#[test]
fn index_overflowing_its_type_fails_to_parse() {
    let err = parse_index_group::<u16>("65536").unwrap_err();
    assert_eq!(err.kind(), ObjErrorKind::Parse);
    assert_eq!(parse_index_group::<u16>("65535").unwrap().position.get(), 65534);
}

// =============================================================================
// Faces
// =============================================================================

const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\n";

#[test]
fn face_variants_by_corner_count() {
    let mesh = read(&format!("{TRIANGLE}f 1 2 3\nf 1 2 3 1\nf 1 2 3 1 2\n")).unwrap();
    assert_eq!(mesh.positions, 3);
    assert_eq!(
        mesh.faces[0],
        Face::Triangle([group(0, None, None), group(1, None, None), group(2, None, None)])
    );
    assert!(matches!(mesh.faces[1], Face::Quad(_)));
    assert!(matches!(&mesh.faces[2], Face::Polygon(corners) if corners.len() == 5));
}

#[test]
fn face_with_all_attributes() {
    let mesh = read("f 1/3/3 2/2/2 3/1/1\n").unwrap();
    let Face::Triangle(corners) = mesh.faces[0] else {
        panic!("expected a triangle");
    };
    assert_eq!(corners[0], group(0, Some(2), Some(2)));
    assert_eq!(corners[2], group(2, Some(0), Some(0)));
}

#[test]
fn face_errors() {
    assert_eq!(error("f 1 2"), "face must have at least three indices, found 2");
    assert_eq!(error("f"), "face must have at least three indices, found 0");
    assert_eq!(error("f 1 2 /3"), "empty position index");
    assert_eq!(error("f 1 2 3/3/"), "empty normal index");
    assert_eq!(error("f 1 2 0"), "parsed index must be greater than zero");
    assert_eq!(error("f 1 2 3.0"), "failed parsing '3.0'");
}

#[test]
fn fixed_arity_messages() {
    let triangles = ReadParams::triangles();
    let err = read_with("f 1 2", &triangles).err().unwrap();
    assert_eq!(err.to_string(), "face must have exactly 3 indices, found 2");

    let quads = ReadParams::default().with_face_arity(FaceArity::Quads);
    let err = read_with("f 1 2 3", &quads).err().unwrap();
    assert_eq!(err.to_string(), "face must have exactly 4 indices, found 3");
    assert!(read_with("f 1 2 3 4", &quads).is_ok());
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn attribute_arity_messages() {
    assert_eq!(error("v 1 2"), "positions must have 3 or 4 values");
    assert_eq!(error("v 1 2 3 4 5"), "expected at most 4 values");
    assert_eq!(error("vt 0.5"), "texture coordinates must have 2 or 3 values");
    assert_eq!(error("vt 0 0 0 0"), "expected at most 3 values");
    assert_eq!(error("vn 1 2"), "normals must have 3 values");
    assert_eq!(error("vn 1 2 3 4"), "expected at most 3 values");
}

#[test]
fn attribute_value_messages() {
    assert_eq!(error("v 1 2 abc"), "failed parsing 'abc'");
    assert_eq!(
        error("vt 0.0 1.1"),
        "texture coordinate values must be in range [0, 1], found 1.1"
    );
    assert_eq!(
        error("vt -0.5 0.5"),
        "texture coordinate values must be in range [0, 1], found -0.5"
    );
}

#[test]
fn texture_range_is_inclusive() {
    #[derive(Default)]
    struct TexCoords(Vec<TexCoord<f64>>);

    impl ObjSink for TexCoords {
        type Scalar = f64;
        type Corner = Index<u32>;

        fn add_position(&mut self, _position: Position<f64>) -> ObjResult<()> {
            Ok(())
        }

        fn add_tex_coord(&mut self, tex_coord: TexCoord<f64>) -> ObjResult<()> {
            self.0.push(tex_coord);
            Ok(())
        }

        fn add_face(&mut self, _face: Face<Index<u32>>) -> ObjResult<()> {
            Ok(())
        }
    }

    let mut sink = TexCoords::default();
    read_obj("vt 0 1 1\nvt 1 0\n".as_bytes(), &mut sink, &ReadParams::default()).unwrap();
    assert_eq!(sink.0, [TexCoord::with_w(0.0, 1.0, 1.0), TexCoord::new(1.0, 0.0)]);
}

// =============================================================================
// Line kinds
// =============================================================================

#[test]
fn unsupported_statements_are_rejected() {
    for line in ["o cube", "g group", "s off", "usemtl steel", "mtllib a.mtl", "vp 0.5", "l 1 2"] {
        let err = read(line).err().unwrap();
        assert_eq!(err.kind(), ObjErrorKind::Grammar, "{line}");
    }
    assert_eq!(error("mtllib a.mtl"), "unrecognized line prefix 'mtllib'");
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let mesh = read("#\n   \n\t\n# v 1 2\n#f 1 2\nv 1 2 3\n").unwrap();
    assert_eq!(mesh.positions, 1);

    let mesh = read("#only comments\n\n").unwrap();
    assert_eq!(mesh.positions, 0);
    assert!(mesh.faces.is_empty());
}
