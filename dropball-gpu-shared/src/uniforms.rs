//! GPU-side data layouts. Every struct here mirrors a WGSL struct in
//! `shaders/` and must keep 16-byte aligned members.

use bytemuck::{Pod, Zeroable};

/// Per-frame uniforms shared by every pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    /// xyz = light direction, w = intensity
    pub light_dir: [f32; 4],
    /// xyz = camera position, w = unused
    pub camera_pos: [f32; 4],
}

/// Per-mesh uniforms.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x = receives shadows (0 or 1), y = specular power, zw = unused
    pub params: [f32; 4],
}

/// Interleaved mesh vertex: position then normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Debug line vertex: position then RGBA colour.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}
