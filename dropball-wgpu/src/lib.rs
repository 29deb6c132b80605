//! Dropball WebGPU renderer.
//!
//! A small forward renderer: one directional-light shadow map, lit meshes,
//! and a debug line list. The caller describes each frame with a
//! [`FrameDesc`]; the renderer owns every GPU resource.

mod backend;
mod handle;

pub use backend::Renderer;
pub use handle::MeshHandle;
pub use wgpu;

use dropball_gpu_shared::uniforms::LineVertex;
use glam::{Mat4, Vec3};

/// One mesh draw for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawMesh {
    pub mesh: MeshHandle,
    pub model: Mat4,
    pub color: [f32; 4],
    pub specular_power: f32,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

/// Debug line vertices with a version stamp; the GPU copy is only refreshed
/// when the version changes.
#[derive(Debug, Clone, Copy)]
pub struct LineBatch<'a> {
    pub vertices: &'a [LineVertex],
    pub version: u64,
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameDesc<'a> {
    pub view_proj: Mat4,
    pub camera_position: Vec3,
    pub light_direction: Vec3,
    pub light_intensity: f32,
    pub light_view_proj: Mat4,
    pub clear_color: [f64; 4],
    pub meshes: &'a [DrawMesh],
    pub lines: Option<LineBatch<'a>>,
}
