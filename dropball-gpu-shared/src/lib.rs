//! Types shared between the Dropball renderer and the web runtime:
//! uniform layouts, WGSL sources, procedural meshes, and camera/light math.

pub mod geometry;
pub mod math;
pub mod shaders;
pub mod uniforms;
