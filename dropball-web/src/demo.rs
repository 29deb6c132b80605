//! The dropping-ball demo: a tilted ground box and a bouncing sphere, with
//! the physics world driving the visual scene.

use glam::{Quat, Vec3};

use crate::camera::ArcRotateCamera;
use crate::config::DemoConfig;
use crate::debug_draw::{DebugDraw, DebugDrawer};
use crate::physics::{
    BodyId, BodyState, BodyType, PhysicsWorld, RigidBodyConfig, ShapeConfig, ShapeGeometry,
};
use crate::scene::{DirectionalLight, MeshId, Scene, ShadowGenerator};

/// What one [`Demo::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Frame counter after the tick.
    pub frame: u32,
    /// The sphere was put back at its spawn point.
    pub reset: bool,
    pub debug_segments: usize,
    /// Seconds the physics world advanced.
    pub dt: f32,
}

pub struct Demo {
    config: DemoConfig,
    scene: Scene,
    world: PhysicsWorld,
    debug_drawer: DebugDrawer,
    sphere_mesh: MeshId,
    sphere_body: BodyId,
    ground_mesh: MeshId,
    ground_body: BodyId,
    frame: u32,
}

impl Demo {
    /// Build the scene and the physics world from `config`.
    pub fn new(config: DemoConfig) -> Result<Self, String> {
        config.validate()?;

        let light = DirectionalLight {
            direction: Vec3::from_array(config.light.direction),
            intensity: config.light.intensity,
        };
        let mut scene = Scene::new(
            ArcRotateCamera::from_config(&config.camera),
            light,
            ShadowGenerator::new(config.light.shadow_map_size),
            config.scene.clear_color,
        );

        let spawn = Vec3::from_array(config.physics.spawn_position);

        let sphere_mesh = scene.create_sphere(
            "Sphere",
            config.scene.sphere_diameter,
            config.scene.sphere_segments,
        );
        scene.mesh_mut(sphere_mesh).set_absolute_position(spawn);
        scene.shadow_generator.add_shadow_caster(sphere_mesh);

        let [width, height, depth] = config.scene.ground_size;
        let ground_mesh = scene.create_box("Ground", width, height, depth);
        {
            let ground = scene.mesh_mut(ground_mesh);
            ground.add_rotation(0.0, 0.0, config.scene.ground_tilt);
            ground.receive_shadows = true;
        }

        let physics = &config.physics;
        let mut world = PhysicsWorld::new(Vec3::from_array(physics.gravity));
        world.set_debug_draw_mode(&config.debug_draw);

        let ground = scene.mesh(ground_mesh);
        let ground_body = world.add_rigid_body(
            RigidBodyConfig {
                body_type: BodyType::Static,
                position: ground.absolute_position(),
                orientation: ground.rotation_to_quaternion(),
            },
            ShapeConfig {
                geometry: ShapeGeometry::Box {
                    half_extents: ground.bounding_box().maximum,
                },
                density: physics.density,
                restitution: physics.restitution,
                friction: physics.friction,
            },
        );

        let sphere = scene.mesh(sphere_mesh);
        let sphere_body = world.add_rigid_body(
            RigidBodyConfig {
                body_type: BodyType::Dynamic,
                position: sphere.absolute_position(),
                orientation: Quat::IDENTITY,
            },
            ShapeConfig {
                geometry: ShapeGeometry::Sphere {
                    radius: sphere.bounding_box().maximum.y + physics.collider_margin,
                },
                density: physics.density,
                restitution: physics.restitution,
                friction: physics.friction,
            },
        );

        log::info!(
            "Demo ready: {} meshes, {} bodies, reset every {} frames",
            scene.num_meshes(),
            world.num_bodies(),
            physics.reset_interval,
        );

        Ok(Self {
            config,
            scene,
            world,
            debug_drawer: DebugDrawer::new(),
            sphere_mesh,
            sphere_body,
            ground_mesh,
            ground_body,
            frame: 0,
        })
    }

    /// Advance the demo by one rendered frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        // visuals show the state from before this step
        self.sync_transforms();
        self.world.step(dt);

        self.debug_drawer.begin();
        if self.config.debug_draw.enabled {
            self.world.debug_draw(&mut self.debug_drawer);
        }
        self.debug_drawer.end();

        let reset = self.frame >= self.config.physics.reset_interval;
        if reset {
            self.reset_sphere();
            self.frame = 0;
        } else {
            self.frame += 1;
        }

        TickReport {
            frame: self.frame,
            reset,
            debug_segments: self.debug_drawer.segment_count(),
            dt,
        }
    }

    /// Copy the sphere body's pose onto the sphere mesh.
    pub fn sync_transforms(&mut self) {
        let (Some(position), Some(orientation)) = (
            self.world.position(self.sphere_body),
            self.world.orientation(self.sphere_body),
        ) else {
            return;
        };
        let mesh = self.scene.mesh_mut(self.sphere_mesh);
        mesh.set_absolute_position(position);
        mesh.set_rotation_quaternion(orientation);
    }

    /// Put the sphere back at its spawn point, at rest.
    pub fn reset_sphere(&mut self) {
        let body = self.sphere_body;
        self.world
            .set_position(body, Vec3::from_array(self.config.physics.spawn_position));
        self.world.set_orientation(body, Quat::IDENTITY);
        self.world.set_linear_velocity(body, Vec3::ZERO);
        self.world.set_angular_velocity(body, Vec3::ZERO);
        log::debug!(
            "Sphere reset after {} frames ({} physics steps so far)",
            self.frame,
            self.world.steps()
        );
    }

    /// New surface pixel size. Simulation state is untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height);
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn debug_drawer(&self) -> &DebugDrawer {
        &self.debug_drawer
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn sphere_mesh(&self) -> MeshId {
        self.sphere_mesh
    }

    pub fn sphere_body(&self) -> BodyId {
        self.sphere_body
    }

    pub fn ground_mesh(&self) -> MeshId {
        self.ground_mesh
    }

    pub fn ground_body(&self) -> BodyId {
        self.ground_body
    }

    pub fn sphere_state(&self) -> Option<BodyState> {
        self.world.body_state(self.sphere_body)
    }
}
