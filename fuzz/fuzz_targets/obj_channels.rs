#![no_main]

use libfuzzer_sys::fuzz_target;
use mesh_obj::{ChannelLayout, ChannelMesh, read_channels};

fuzz_target!(|data: &[u8]| {
    // read_channels should never panic, and never return dangling indices
    let Ok(mesh) = read_channels::<_, f32, u32>(data, ChannelLayout::default()) else {
        return;
    };
    let mesh: ChannelMesh<f32, u32> = mesh;
    assert!(mesh.as_mesh_ref().is_ok());
});
