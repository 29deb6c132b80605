/// Embedded WGSL shader source strings for the Dropball render passes.

pub const MESH: &str = include_str!("../shaders/mesh.wgsl");
pub const SHADOW_DEPTH: &str = include_str!("../shaders/shadow_depth.wgsl");
pub const LINES: &str = include_str!("../shaders/lines.wgsl");
