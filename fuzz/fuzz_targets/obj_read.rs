#![no_main]

use libfuzzer_sys::fuzz_target;
use mesh_obj::{
    Face, IndexGroup, IterSource, Normal, ObjResult, ObjSink, Position, ReadParams, TexCoord,
    WriteParams, read_obj, write_obj,
};

#[derive(Default)]
struct Mesh {
    positions: Vec<Position<f64>>,
    tex_coords: Vec<TexCoord<f64>>,
    normals: Vec<Normal<f64>>,
    faces: Vec<Face<IndexGroup<u32>>>,
}

impl ObjSink for Mesh {
    type Scalar = f64;
    type Corner = IndexGroup<u32>;

    fn add_position(&mut self, position: Position<f64>) -> ObjResult<()> {
        self.positions.push(position);
        Ok(())
    }

    fn add_tex_coord(&mut self, tex_coord: TexCoord<f64>) -> ObjResult<()> {
        self.tex_coords.push(tex_coord);
        Ok(())
    }

    fn add_normal(&mut self, normal: Normal<f64>) -> ObjResult<()> {
        self.normals.push(normal);
        Ok(())
    }

    fn add_face(&mut self, face: Face<IndexGroup<u32>>) -> ObjResult<()> {
        self.faces.push(face);
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    // read_obj should never panic on any input
    let mut mesh = Mesh::default();
    if read_obj(data, &mut mesh, &ReadParams::default()).is_err() {
        return;
    }

    // Anything accepted must be writable again
    let mut source = IterSource::new(mesh.positions, mesh.faces)
        .with_tex_coords(mesh.tex_coords)
        .with_normals(mesh.normals);
    let mut out = Vec::new();
    assert!(write_obj(&mut out, &mut source, &WriteParams::default()).is_ok());
});
