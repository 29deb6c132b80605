use glam::Vec3;
use std::f32::consts::PI;

use crate::uniforms::MeshVertex;

/// Indexed triangle mesh in local space.
#[derive(Debug, Clone, Default)]
pub struct MeshGeometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub minimum: Vec3,
    pub maximum: Vec3,
}

impl MeshGeometry {
    /// UV sphere centred on the origin. `segments` is the number of rings;
    /// each ring has twice as many slices.
    pub fn sphere(diameter: f32, segments: u32) -> Self {
        let radius = diameter * 0.5;
        let rings = segments.max(2);
        let slices = rings * 2;

        let mut geometry = Self::default();
        for ring in 0..=rings {
            let theta = ring as f32 * PI / rings as f32;
            let (sin_t, cos_t) = theta.sin_cos();
            for slice in 0..=slices {
                let phi = slice as f32 * 2.0 * PI / slices as f32;
                let (sin_p, cos_p) = phi.sin_cos();
                let normal = [sin_t * cos_p, cos_t, sin_t * sin_p];
                geometry
                    .positions
                    .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
                geometry.normals.push(normal);
            }
        }

        let stride = slices + 1;
        for ring in 0..rings {
            for slice in 0..slices {
                let a = ring * stride + slice;
                let b = a + stride;
                geometry.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
        geometry
    }

    /// Axis-aligned box centred on the origin with flat face normals.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let h = Vec3::new(width, height, depth) * 0.5;
        // (normal, tangent u, tangent v) per face
        let faces = [
            (Vec3::X, Vec3::Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::X, Vec3::Y),
        ];

        let mut geometry = Self::default();
        for (normal, u, v) in faces {
            let base = geometry.positions.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = (normal + u * su + v * sv) * h;
                geometry.positions.push(p.to_array());
                geometry.normals.push(normal.to_array());
            }
            geometry
                .indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        geometry
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut minimum = Vec3::splat(f32::INFINITY);
        let mut maximum = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            let p = Vec3::from_array(*p);
            minimum = minimum.min(p);
            maximum = maximum.max(p);
        }
        if self.positions.is_empty() {
            minimum = Vec3::ZERO;
            maximum = Vec3::ZERO;
        }
        BoundingBox { minimum, maximum }
    }

    /// Interleave positions and normals for upload.
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(&position, &normal)| MeshVertex { position, normal })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // ── sphere ──

    #[test]
    fn test_sphere_bounds_match_radius() {
        let bounds = MeshGeometry::sphere(2.0, 32).bounding_box();
        assert!(approx_eq(bounds.maximum.y, 1.0));
        assert!(approx_eq(bounds.minimum.y, -1.0));
        assert!(approx_eq(bounds.maximum.x, 1.0));
    }

    #[test]
    fn test_sphere_normals_are_unit() {
        let sphere = MeshGeometry::sphere(3.0, 8);
        for n in &sphere.normals {
            assert!(approx_eq(Vec3::from_array(*n).length(), 1.0));
        }
    }

    #[test]
    fn test_sphere_indices_in_range() {
        let sphere = MeshGeometry::sphere(2.0, 16);
        let count = sphere.positions.len() as u32;
        assert_eq!(sphere.indices.len() % 3, 0);
        assert!(sphere.indices.iter().all(|&i| i < count));
    }

    // ── cuboid ──

    #[test]
    fn test_cuboid_bounds_are_half_sizes() {
        let bounds = MeshGeometry::cuboid(6.0, 0.1, 6.0).bounding_box();
        assert!(approx_eq(bounds.maximum.x, 3.0));
        assert!(approx_eq(bounds.maximum.y, 0.05));
        assert!(approx_eq(bounds.maximum.z, 3.0));
        assert!(approx_eq(bounds.minimum.y, -0.05));
        assert_eq!(bounds.minimum, -bounds.maximum);
    }

    #[test]
    fn test_cuboid_has_six_faces() {
        let cuboid = MeshGeometry::cuboid(1.0, 2.0, 3.0);
        assert_eq!(cuboid.positions.len(), 24);
        assert_eq!(cuboid.indices.len(), 36);
    }

    #[test]
    fn test_cuboid_vertices_lie_on_their_face() {
        let cuboid = MeshGeometry::cuboid(2.0, 4.0, 6.0);
        let half = Vec3::new(1.0, 2.0, 3.0);
        for (p, n) in cuboid.positions.iter().zip(&cuboid.normals) {
            let p = Vec3::from_array(*p);
            let n = Vec3::from_array(*n);
            assert!(approx_eq(p.dot(n), half.dot(n.abs())));
        }
    }

    #[test]
    fn test_vertices_interleave() {
        let cuboid = MeshGeometry::cuboid(1.0, 1.0, 1.0);
        let vertices = cuboid.vertices();
        assert_eq!(vertices.len(), cuboid.positions.len());
        assert_eq!(vertices[0].position, cuboid.positions[0]);
        assert_eq!(vertices[0].normal, cuboid.normals[0]);
    }

    #[test]
    fn test_empty_bounds_are_zero() {
        let bounds = MeshGeometry::default().bounding_box();
        assert_eq!(bounds.minimum, Vec3::ZERO);
        assert_eq!(bounds.maximum, Vec3::ZERO);
    }
}
