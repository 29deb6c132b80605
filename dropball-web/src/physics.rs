//! Rapier3D physics world and the glam ↔ nalgebra conversions around it.

use glam::{Quat, Vec3};
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude::*;

use dropball_gpu_shared::math::hsl_to_rgb;

use crate::config::DebugDrawConfig;
use crate::debug_draw::DebugDraw;

/// Handle to a rigid body in a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(RigidBodyHandle);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Static,
    Dynamic,
}

/// Initial placement of a rigid body.
#[derive(Debug, Clone, Copy)]
pub struct RigidBodyConfig {
    pub body_type: BodyType,
    pub position: Vec3,
    pub orientation: Quat,
}

impl RigidBodyConfig {
    pub fn new(body_type: BodyType) -> Self {
        Self {
            body_type,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

/// Collider attached to a rigid body.
#[derive(Debug, Clone, Copy)]
pub struct ShapeConfig {
    pub geometry: ShapeGeometry,
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
}

impl ShapeConfig {
    pub fn new(geometry: ShapeGeometry) -> Self {
        Self {
            geometry,
            density: 1.0,
            restitution: 0.2,
            friction: 0.2,
        }
    }
}

/// Snapshot of a body's kinematic state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

/// All rapier state in one place.
///
/// `PhysicsPipeline::step()` requires mutable access to every set
/// simultaneously, so they must all live together.
pub struct PhysicsWorld {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,

    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    debug_pipeline: DebugRenderPipeline,

    integration_parameters: IntegrationParameters,
    gravity: Vec3,
    steps: u64,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            debug_pipeline: DebugRenderPipeline::new(
                DebugRenderStyle::default(),
                DebugRenderMode::COLLIDER_SHAPES,
            ),
            integration_parameters: IntegrationParameters::default(),
            gravity,
            steps: 0,
        }
    }

    /// Number of steps that actually advanced the simulation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn num_bodies(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Create a rigid body with one collider and add it to the world.
    pub fn add_rigid_body(&mut self, config: RigidBodyConfig, shape: ShapeConfig) -> BodyId {
        let builder = match config.body_type {
            BodyType::Static => RigidBodyBuilder::fixed(),
            // a long first step from rest would otherwise put it to sleep mid-air
            BodyType::Dynamic => RigidBodyBuilder::dynamic().can_sleep(false),
        };
        let mut body = builder.translation(to_vector(config.position)).build();
        body.set_rotation(to_rotation(config.orientation), false);
        let handle = self.rigid_body_set.insert(body);

        let collider = match shape.geometry {
            ShapeGeometry::Box { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            ShapeGeometry::Sphere { radius } => ColliderBuilder::ball(radius),
        }
        .density(shape.density)
        .restitution(shape.restitution)
        .friction(shape.friction)
        .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        BodyId(handle)
    }

    pub fn position(&self, body: BodyId) -> Option<Vec3> {
        self.rigid_body_set
            .get(body.0)
            .map(|b| from_vector(b.translation()))
    }

    pub fn orientation(&self, body: BodyId) -> Option<Quat> {
        self.rigid_body_set
            .get(body.0)
            .map(|b| from_rotation(b.rotation()))
    }

    pub fn body_state(&self, body: BodyId) -> Option<BodyState> {
        self.rigid_body_set.get(body.0).map(|b| BodyState {
            position: from_vector(b.translation()),
            orientation: from_rotation(b.rotation()),
            linear_velocity: from_vector(b.linvel()),
            angular_velocity: from_vector(b.angvel()),
        })
    }

    pub fn set_position(&mut self, body: BodyId, position: Vec3) {
        if let Some(b) = self.rigid_body_set.get_mut(body.0) {
            b.set_translation(to_vector(position), true);
        }
    }

    pub fn set_orientation(&mut self, body: BodyId, orientation: Quat) {
        if let Some(b) = self.rigid_body_set.get_mut(body.0) {
            b.set_rotation(to_rotation(orientation), true);
        }
    }

    pub fn set_linear_velocity(&mut self, body: BodyId, velocity: Vec3) {
        if let Some(b) = self.rigid_body_set.get_mut(body.0) {
            b.set_linvel(to_vector(velocity), true);
        }
    }

    pub fn set_angular_velocity(&mut self, body: BodyId, velocity: Vec3) {
        if let Some(b) = self.rigid_body_set.get_mut(body.0) {
            b.set_angvel(to_vector(velocity), true);
        }
    }

    /// Advance the simulation by `dt` seconds. Zero, negative and non-finite
    /// steps leave the world untouched.
    pub fn step(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &to_vector(self.gravity),
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.steps += 1;
    }

    /// Choose which internals `debug_draw` reports.
    pub fn set_debug_draw_mode(&mut self, config: &DebugDrawConfig) {
        self.debug_pipeline =
            DebugRenderPipeline::new(DebugRenderStyle::default(), debug_render_mode(config));
    }

    /// Report the current debug geometry as line segments, synchronously.
    /// The caller brackets this with `begin` and `end`.
    pub fn debug_draw(&mut self, drawer: &mut dyn DebugDraw) {
        let mut forwarder = LineForwarder { drawer };
        self.debug_pipeline.render(
            &mut forwarder,
            &self.rigid_body_set,
            &self.collider_set,
            &self.impulse_joint_set,
            &self.multibody_joint_set,
            &self.narrow_phase,
        );
    }
}

fn debug_render_mode(config: &DebugDrawConfig) -> DebugRenderMode {
    let mut mode = DebugRenderMode::empty();
    if config.shapes {
        mode.insert(DebugRenderMode::COLLIDER_SHAPES);
    }
    if config.axes {
        mode.insert(DebugRenderMode::RIGID_BODY_AXES);
    }
    if config.aabbs {
        mode.insert(DebugRenderMode::COLLIDER_AABBS);
    }
    if config.contacts {
        mode.insert(DebugRenderMode::CONTACTS);
    }
    if config.joints {
        mode.insert(DebugRenderMode::JOINTS);
    }
    mode
}

/// Adapts rapier's debug-render backend to [`DebugDraw::line`].
/// Rapier hands out HSLA colours; the overlay takes RGB.
struct LineForwarder<'a> {
    drawer: &'a mut dyn DebugDraw,
}

impl DebugRenderBackend for LineForwarder<'_> {
    fn draw_line(
        &mut self,
        _object: DebugRenderObject<'_>,
        a: Point<Real>,
        b: Point<Real>,
        color: [f32; 4],
    ) {
        let [r, g, bl] = hsl_to_rgb(color[0], color[1], color[2]);
        self.drawer.line(
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, b.y, b.z),
            Vec3::new(r, g, bl),
        );
    }
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn to_rotation(q: Quat) -> Rotation<Real> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

fn from_rotation(r: &Rotation<Real>) -> Quat {
    let c = r.coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;
    const DT: f32 = 1.0 / 60.0;

    fn ball_over_ground() -> (PhysicsWorld, BodyId, BodyId) {
        let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.80665, 0.0));
        let ground = world.add_rigid_body(
            RigidBodyConfig::new(BodyType::Static),
            ShapeConfig::new(ShapeGeometry::Box {
                half_extents: Vec3::new(3.0, 0.05, 3.0),
            }),
        );
        let mut ball_config = RigidBodyConfig::new(BodyType::Dynamic);
        ball_config.position = Vec3::new(0.0, 5.0, 0.0);
        let ball = world.add_rigid_body(
            ball_config,
            ShapeConfig::new(ShapeGeometry::Sphere { radius: 1.1 }),
        );
        (world, ground, ball)
    }

    #[derive(Default)]
    struct CountingDrawer {
        lines: usize,
        colors: Vec<Vec3>,
    }

    impl DebugDraw for CountingDrawer {
        fn begin(&mut self) {}
        fn line(&mut self, _from: Vec3, _to: Vec3, color: Vec3) {
            self.lines += 1;
            self.colors.push(color);
        }
        fn end(&mut self) {}
    }

    // ── conversions ──

    #[test]
    fn test_rotation_conversion_preserves_components() {
        let q = Quat::from_rotation_z(0.1) * Quat::from_rotation_y(0.4);
        let back = from_rotation(&to_rotation(q));
        assert!(back.abs_diff_eq(q, EPSILON));
        assert!((back.x - q.x).abs() < EPSILON && (back.w - q.w).abs() < EPSILON);
    }

    #[test]
    fn test_vector_conversion() {
        let v = Vec3::new(2.5, 5.0, -1.0);
        assert_eq!(from_vector(&to_vector(v)), v);
    }

    // ── stepping ──

    #[test]
    fn test_ball_falls_under_gravity() {
        let (mut world, _, ball) = ball_over_ground();
        for _ in 0..10 {
            world.step(DT);
        }
        let state = world.body_state(ball).unwrap();
        assert!(state.position.y < 5.0);
        assert!(state.linear_velocity.y < 0.0);
        assert_eq!(world.steps(), 10);
    }

    #[test]
    fn test_ball_comes_to_rest_on_ground() {
        let (mut world, _, ball) = ball_over_ground();
        for _ in 0..1200 {
            world.step(DT);
        }
        let y = world.position(ball).unwrap().y;
        // ground top at 0.05, ball radius 1.1
        assert!(y > 1.0 && y < 1.3, "ball rests at y={y}");
    }

    #[test]
    fn test_static_body_does_not_move() {
        let (mut world, ground, _) = ball_over_ground();
        for _ in 0..120 {
            world.step(DT);
        }
        assert!(world.position(ground).unwrap().abs_diff_eq(Vec3::ZERO, EPSILON));
    }

    #[test]
    fn test_zero_and_invalid_dt_do_nothing() {
        let (mut world, _, ball) = ball_over_ground();
        let before = world.body_state(ball).unwrap();
        world.step(0.0);
        world.step(-1.0);
        world.step(f32::NAN);
        assert_eq!(world.body_state(ball).unwrap(), before);
        assert_eq!(world.steps(), 0);
    }

    #[test]
    fn test_setters_overwrite_state() {
        let (mut world, _, ball) = ball_over_ground();
        for _ in 0..30 {
            world.step(DT);
        }
        world.set_position(ball, Vec3::new(2.5, 5.0, 0.0));
        world.set_orientation(ball, Quat::IDENTITY);
        world.set_linear_velocity(ball, Vec3::ZERO);
        world.set_angular_velocity(ball, Vec3::ZERO);
        let state = world.body_state(ball).unwrap();
        assert_eq!(state.position, Vec3::new(2.5, 5.0, 0.0));
        assert!(state.orientation.abs_diff_eq(Quat::IDENTITY, EPSILON));
        assert_eq!(state.linear_velocity, Vec3::ZERO);
        assert_eq!(state.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_initial_orientation_applied() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let mut config = RigidBodyConfig::new(BodyType::Static);
        config.orientation = Quat::from_rotation_z(0.1);
        let body = world.add_rigid_body(
            config,
            ShapeConfig::new(ShapeGeometry::Box {
                half_extents: Vec3::ONE,
            }),
        );
        let q = world.orientation(body).unwrap();
        assert!(q.abs_diff_eq(Quat::from_rotation_z(0.1), EPSILON));
    }

    // ── debug draw ──

    #[test]
    fn test_debug_draw_reports_shape_lines() {
        let (mut world, _, _) = ball_over_ground();
        world.step(DT);
        let mut drawer = CountingDrawer::default();
        world.debug_draw(&mut drawer);
        assert!(drawer.lines > 0);
        for c in &drawer.colors {
            assert!(c.min_element() >= -EPSILON && c.max_element() <= 1.0 + EPSILON);
        }
    }

    #[test]
    fn test_debug_draw_empty_mode_draws_nothing() {
        let (mut world, _, _) = ball_over_ground();
        world.set_debug_draw_mode(&DebugDrawConfig {
            shapes: false,
            ..DebugDrawConfig::default()
        });
        let mut drawer = CountingDrawer::default();
        world.debug_draw(&mut drawer);
        assert_eq!(drawer.lines, 0);
    }

    #[test]
    fn test_debug_draw_aabbs_add_lines() {
        let (mut world, _, _) = ball_over_ground();
        world.step(DT);
        let mut shapes_only = CountingDrawer::default();
        world.debug_draw(&mut shapes_only);

        world.set_debug_draw_mode(&DebugDrawConfig {
            aabbs: true,
            ..DebugDrawConfig::default()
        });
        let mut with_aabbs = CountingDrawer::default();
        world.debug_draw(&mut with_aabbs);
        assert!(with_aabbs.lines > shapes_only.lines);
    }
}
