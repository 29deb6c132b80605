use glam::{Mat4, Quat, Vec3};

use dropball_gpu_shared::geometry::{BoundingBox, MeshGeometry};
use dropball_gpu_shared::math::directional_light_view_proj;

use crate::camera::ArcRotateCamera;
use crate::transform::{euler_to_quaternion, quaternion_to_euler};

/// Index of a mesh in its [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

/// Runtime transform state of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    pub position: Vec3,
    /// Euler angles, ignored while `rotation_quaternion` is set.
    pub rotation: Vec3,
    pub rotation_quaternion: Option<Quat>,
    pub scale: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            rotation_quaternion: None,
            scale: Vec3::ONE,
        }
    }
}

/// Flat-coloured Blinn-Phong material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub diffuse_color: [f32; 3],
    pub alpha: f32,
    pub specular_power: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: [1.0, 1.0, 1.0],
            alpha: 1.0,
            specular_power: 64.0,
        }
    }
}

/// A visual mesh with its geometry and transform.
pub struct Mesh {
    pub name: String,
    pub geometry: MeshGeometry,
    pub transform: TransformState,
    pub world_matrix: Mat4,
    pub material: Material,
    pub receive_shadows: bool,
    bounding_box: BoundingBox,
}

impl Mesh {
    fn new(name: &str, geometry: MeshGeometry) -> Self {
        let bounding_box = geometry.bounding_box();
        Self {
            name: name.to_string(),
            geometry,
            transform: TransformState::default(),
            world_matrix: Mat4::IDENTITY,
            material: Material::default(),
            receive_shadows: false,
            bounding_box,
        }
    }

    /// Local-space bounds of the geometry.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Meshes have no parent, so absolute and local position coincide.
    pub fn set_absolute_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn absolute_position(&self) -> Vec3 {
        self.transform.position
    }

    /// Compose an additional rotation (yaw `y`, pitch `x`, roll `z`) onto the
    /// current one. Without a rotation quaternion the result stays in Euler
    /// form.
    pub fn add_rotation(&mut self, x: f32, y: f32, z: f32) {
        let current = self.rotation_to_quaternion();
        let combined = current * euler_to_quaternion(Vec3::new(x, y, z));
        match self.transform.rotation_quaternion {
            Some(_) => self.transform.rotation_quaternion = Some(combined),
            None => self.transform.rotation = quaternion_to_euler(combined),
        }
    }

    /// Current rotation as a quaternion, whichever form it is stored in.
    pub fn rotation_to_quaternion(&self) -> Quat {
        self.transform
            .rotation_quaternion
            .unwrap_or_else(|| euler_to_quaternion(self.transform.rotation))
    }

    pub fn set_rotation_quaternion(&mut self, rotation: Quat) {
        self.transform.rotation_quaternion = Some(rotation);
    }
}

/// Directional light.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub intensity: f32,
}

/// Shadow map settings for the directional light.
#[derive(Debug, Clone)]
pub struct ShadowGenerator {
    pub map_size: u32,
    /// Half size of the light's orthographic frustum.
    pub frustum_extent: f32,
    casters: Vec<MeshId>,
}

impl ShadowGenerator {
    pub fn new(map_size: u32) -> Self {
        Self {
            map_size,
            frustum_extent: 10.0,
            casters: Vec::new(),
        }
    }

    pub fn add_shadow_caster(&mut self, mesh: MeshId) {
        if !self.casters.contains(&mesh) {
            self.casters.push(mesh);
        }
    }

    pub fn is_caster(&self, mesh: MeshId) -> bool {
        self.casters.contains(&mesh)
    }

    pub fn light_view_proj(&self, light: &DirectionalLight, focus: Vec3) -> Mat4 {
        directional_light_view_proj(light.direction, focus, self.frustum_extent)
    }
}

/// Pixel size of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// The visual side of the demo.
pub struct Scene {
    meshes: Vec<Mesh>,
    pub camera: ArcRotateCamera,
    pub light: DirectionalLight,
    pub shadow_generator: ShadowGenerator,
    pub clear_color: [f32; 4],
    viewport: Viewport,
}

impl Scene {
    pub fn new(
        camera: ArcRotateCamera,
        light: DirectionalLight,
        shadow_generator: ShadowGenerator,
        clear_color: [f32; 4],
    ) -> Self {
        Self {
            meshes: Vec::new(),
            camera,
            light,
            shadow_generator,
            clear_color,
            viewport: Viewport::default(),
        }
    }

    pub fn create_sphere(&mut self, name: &str, diameter: f32, segments: u32) -> MeshId {
        self.add_mesh(Mesh::new(name, MeshGeometry::sphere(diameter, segments)))
    }

    pub fn create_box(&mut self, name: &str, width: f32, height: f32, depth: f32) -> MeshId {
        self.add_mesh(Mesh::new(name, MeshGeometry::cuboid(width, height, depth)))
    }

    fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    /// First mesh with the given name.
    pub fn mesh_by_name(&self, name: &str) -> Option<MeshId> {
        self.meshes.iter().position(|m| m.name == name).map(MeshId)
    }

    pub fn mesh(&self, id: MeshId) -> &Mesh {
        &self.meshes[id.0]
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> &mut Mesh {
        &mut self.meshes[id.0]
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.meshes.iter().enumerate().map(|(i, m)| (MeshId(i), m))
    }

    pub fn meshes_mut(&mut self) -> impl Iterator<Item = &mut Mesh> {
        self.meshes.iter_mut()
    }

    pub fn num_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Change the surface pixel size. Nothing else in the scene changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport { width, height };
    }
}
