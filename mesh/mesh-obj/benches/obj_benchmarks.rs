//! Benchmarks for OBJ reading and writing.
//!
//! Run with: cargo bench -p mesh-obj
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-obj -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-obj -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_obj::{
    ChannelLayout, ChannelMesh, Face, IndexGroup, ObjResult, ObjSink, Position, ReadParams,
    WriteParams, load_obj, read_channels, read_obj, write_channels,
};
use tempfile::tempdir;

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Create a flat `n` x `n` cell grid with per-vertex texture coordinates and
/// a single shared normal.
fn create_grid(n: u32) -> ChannelMesh<f32, u32> {
    let mut mesh = ChannelMesh::new(ChannelLayout::default());
    let side = n + 1;

    for j in 0..side {
        for i in 0..side {
            let (u, v) = (i as f32 / n as f32, j as f32 / n as f32);
            mesh.positions.extend([u * 10.0, v * 10.0, 0.0]);
            mesh.tex_coords.extend([u, v]);
        }
    }
    mesh.normals.extend([0.0, 0.0, 1.0]);

    for j in 0..n {
        for i in 0..n {
            let a = j * side + i;
            let (b, c, d) = (a + 1, a + side + 1, a + side);
            for corner in [a, b, c, a, c, d] {
                mesh.position_indices.push(corner);
                mesh.tex_coord_indices.push(corner);
                mesh.normal_indices.push(0);
            }
        }
    }

    mesh
}

fn to_obj(mesh: &ChannelMesh<f32, u32>) -> Vec<u8> {
    let mut out = Vec::new();
    let view = mesh.as_mesh_ref().expect("grid mesh is valid");
    write_channels(&mut out, &view, &WriteParams::default()).expect("failed to write OBJ");
    out
}

/// Sink that only counts, isolating parse cost from storage cost.
#[derive(Default)]
struct Counter {
    positions: usize,
    faces: usize,
}

impl ObjSink for Counter {
    type Scalar = f32;
    type Corner = IndexGroup<u32>;

    fn add_position(&mut self, _position: Position<f32>) -> ObjResult<()> {
        self.positions += 1;
        Ok(())
    }

    fn add_face(&mut self, _face: Face<IndexGroup<u32>>) -> ObjResult<()> {
        self.faces += 1;
        Ok(())
    }
}

// =============================================================================
// Read Benchmarks
// =============================================================================

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");

    for n in [16, 64, 256] {
        let mesh = create_grid(n);
        let text = to_obj(&mesh);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("read_obj_counting", n), &text, |b, text| {
            b.iter(|| {
                let mut counter = Counter::default();
                read_obj(black_box(text.as_slice()), &mut counter, &ReadParams::default())
                    .expect("failed to read OBJ");
                (counter.positions, counter.faces)
            });
        });

        group.bench_with_input(BenchmarkId::new("read_channels", n), &text, |b, text| {
            b.iter(|| {
                read_channels::<_, f32, u32>(black_box(text.as_slice()), ChannelLayout::default())
                    .expect("failed to read OBJ")
            });
        });
    }

    group.finish();
}

// =============================================================================
// Write Benchmarks
// =============================================================================

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");

    for n in [16, 64, 256] {
        let mesh = create_grid(n);
        group.throughput(Throughput::Elements(mesh.face_count() as u64));

        group.bench_with_input(BenchmarkId::new("write_channels", n), &mesh, |b, mesh| {
            let view = mesh.as_mesh_ref().expect("grid mesh is valid");
            let mut out = Vec::with_capacity(1 << 20);
            b.iter(|| {
                out.clear();
                write_channels(&mut out, black_box(&view), &WriteParams::default())
                    .expect("failed to write OBJ")
            });
        });
    }

    group.finish();
}

// =============================================================================
// File Benchmarks
// =============================================================================

fn bench_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("file");

    let mesh = create_grid(128);
    let temp_dir = tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("bench_grid.obj");
    std::fs::write(&path, to_obj(&mesh)).expect("failed to save OBJ");

    group.throughput(Throughput::Elements(mesh.face_count() as u64));
    group.bench_function("load_obj", |b| {
        b.iter(|| {
            let mut counter = Counter::default();
            load_obj(black_box(&path), &mut counter, &ReadParams::default())
        });
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_read, bench_write, bench_file);
criterion_main!(benches);
