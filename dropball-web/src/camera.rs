use glam::{Mat4, Vec3};

use dropball_gpu_shared::math::{arc_rotate_position, perspective_view_proj};

use crate::config::CameraConfig;
use crate::input::InputState;

/// Radians per dragged pixel is `1 / ANGULAR_SENSIBILITY`.
const ANGULAR_SENSIBILITY: f32 = 1000.0;
/// Wheel delta units per unit of radius.
const WHEEL_PRECISION: f32 = 100.0;

/// Camera orbiting a target, controlled by pointer drag and wheel.
#[derive(Debug, Clone)]
pub struct ArcRotateCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub lower_beta: f32,
    pub upper_beta: f32,
    pub lower_radius: f32,
    pub upper_radius: f32,
}

impl ArcRotateCamera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            alpha: config.alpha,
            beta: config.beta,
            radius: config.radius,
            target: Vec3::from_array(config.target),
            fov: config.fov,
            near: config.near,
            far: config.far,
            lower_beta: 0.01,
            upper_beta: std::f32::consts::PI - 0.01,
            lower_radius: 1.0,
            upper_radius: 1000.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        arc_rotate_position(self.alpha, self.beta, self.radius, self.target)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        perspective_view_proj(self.position(), self.target, self.fov, aspect, self.near, self.far)
    }

    /// Rotate by a pointer drag of `dx`, `dy` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.alpha -= dx / ANGULAR_SENSIBILITY;
        self.beta = (self.beta - dy / ANGULAR_SENSIBILITY).clamp(self.lower_beta, self.upper_beta);
    }

    /// Move towards (negative) or away from (positive) the target.
    pub fn zoom(&mut self, wheel_delta: f32) {
        self.radius =
            (self.radius + wheel_delta / WHEEL_PRECISION).clamp(self.lower_radius, self.upper_radius);
    }

    /// Apply this frame's pointer and wheel deltas.
    pub fn apply_input(&mut self, input: &InputState) {
        if input.pointer_dx != 0.0 || input.pointer_dy != 0.0 {
            self.orbit(input.pointer_dx as f32, input.pointer_dy as f32);
        }
        if input.wheel_delta != 0.0 {
            self.zoom(input.wheel_delta as f32);
        }
    }
}
