//! Debug line overlay.
//!
//! The physics world reports the segments it wants drawn through the
//! three-call [`DebugDraw`] protocol; [`DebugDrawer`] collects them and turns
//! each cycle into a single line-list primitive.

use glam::{Vec3, Vec4};

use dropball_gpu_shared::uniforms::LineVertex;

/// Receiver of a stream of debug line segments.
pub trait DebugDraw {
    /// Start a new cycle, discarding the previous one.
    fn begin(&mut self);
    /// One world-space segment with an RGB colour.
    fn line(&mut self, from: Vec3, to: Vec3, color: Vec3);
    /// Finish the cycle.
    fn end(&mut self);
}

/// Line-list primitive: consecutive vertex pairs are segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSystem {
    vertices: Vec<LineVertex>,
    version: u64,
}

impl LineSystem {
    fn build(points: &[Vec3], colors: &[Vec4], version: u64) -> Self {
        let vertices = points
            .iter()
            .zip(colors)
            .map(|(p, c)| LineVertex {
                position: p.to_array(),
                color: c.to_array(),
            })
            .collect();
        Self { vertices, version }
    }

    /// Overwrite the vertices in place. The vertex count must not change.
    fn update(&mut self, points: &[Vec3], colors: &[Vec4], version: u64) {
        for ((vertex, p), c) in self.vertices.iter_mut().zip(points).zip(colors) {
            vertex.position = p.to_array();
            vertex.color = c.to_array();
        }
        self.version = version;
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Bumped every time the contents are rewritten.
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Collects debug segments and maintains the overlay's [`LineSystem`].
#[derive(Debug, Default)]
pub struct DebugDrawer {
    points: Vec<Vec3>,
    colors: Vec<Vec4>,
    line_system: Option<LineSystem>,
    cycles: u64,
    builds: u64,
}

impl DebugDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() / 2
    }

    /// The primitive produced by the last `end`, if any.
    pub fn line_system(&self) -> Option<&LineSystem> {
        self.line_system.as_ref()
    }

    /// How many times the primitive was built from scratch.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}

impl DebugDraw for DebugDrawer {
    fn begin(&mut self) {
        self.points.clear();
        self.colors.clear();
    }

    fn line(&mut self, from: Vec3, to: Vec3, color: Vec3) {
        self.points.push(from);
        self.points.push(to);

        // one colour per vertex
        let color = color.extend(1.0);
        self.colors.push(color);
        self.colors.push(color);
    }

    fn end(&mut self) {
        self.cycles += 1;
        match &mut self.line_system {
            Some(system) if system.vertex_count() == self.points.len() => {
                system.update(&self.points, &self.colors, self.cycles);
            }
            _ => {
                self.line_system = Some(LineSystem::build(&self.points, &self.colors, self.cycles));
                self.builds += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_segments(drawer: &mut DebugDrawer, k: usize) {
        for i in 0..k {
            let x = i as f32;
            drawer.line(
                Vec3::new(x, 0.0, 0.0),
                Vec3::new(x, 1.0, 0.0),
                Vec3::new(x / 10.0, 0.5, 1.0),
            );
        }
    }

    #[test]
    fn test_begin_empties_buffers() {
        let mut drawer = DebugDrawer::new();
        draw_segments(&mut drawer, 3);
        drawer.begin();
        assert!(drawer.points().is_empty());
        assert!(drawer.colors().is_empty());
    }

    #[test]
    fn test_k_lines_give_two_k_entries_with_paired_colors() {
        let mut drawer = DebugDrawer::new();
        drawer.begin();
        draw_segments(&mut drawer, 5);
        assert_eq!(drawer.points().len(), 10);
        assert_eq!(drawer.colors().len(), 10);
        assert_eq!(drawer.segment_count(), 5);
        for pair in drawer.colors().chunks(2) {
            assert_eq!(pair[0], pair[1]);
            assert_eq!(pair[0].w, 1.0);
        }
        assert_eq!(drawer.points()[2], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(drawer.points()[3], Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_no_accumulation_across_cycles() {
        let mut drawer = DebugDrawer::new();
        for _ in 0..3 {
            drawer.begin();
            draw_segments(&mut drawer, 4);
            drawer.end();
        }
        assert_eq!(drawer.points().len(), 8);
        assert_eq!(drawer.line_system().unwrap().vertex_count(), 8);
    }

    #[test]
    fn test_end_builds_once_then_updates_in_place() {
        let mut drawer = DebugDrawer::new();
        assert!(drawer.line_system().is_none());

        drawer.begin();
        draw_segments(&mut drawer, 2);
        drawer.end();
        assert_eq!(drawer.builds(), 1);
        let first_version = drawer.line_system().unwrap().version();

        drawer.begin();
        drawer.line(Vec3::ZERO, Vec3::ONE, Vec3::X);
        drawer.line(Vec3::ONE, Vec3::ZERO, Vec3::Y);
        drawer.end();
        assert_eq!(drawer.builds(), 1);

        let system = drawer.line_system().unwrap();
        assert!(system.version() > first_version);
        assert_eq!(system.vertices()[1].position, [1.0, 1.0, 1.0]);
        assert_eq!(system.vertices()[2].color, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_end_rebuilds_when_count_changes() {
        let mut drawer = DebugDrawer::new();
        drawer.begin();
        draw_segments(&mut drawer, 2);
        drawer.end();

        drawer.begin();
        draw_segments(&mut drawer, 3);
        drawer.end();
        assert_eq!(drawer.builds(), 2);
        assert_eq!(drawer.line_system().unwrap().vertex_count(), 6);
    }

    #[test]
    fn test_empty_cycle_yields_empty_primitive() {
        let mut drawer = DebugDrawer::new();
        drawer.begin();
        drawer.end();
        assert_eq!(drawer.line_system().unwrap().vertex_count(), 0);
    }
}
