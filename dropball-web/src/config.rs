use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

/// Every tunable literal of the demo. All sections and fields are optional
/// in TOML; missing values take the defaults below.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub scene: SceneConfig,
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub debug_draw: DebugDrawConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub sphere_diameter: f32,
    pub sphere_segments: u32,
    /// Ground box width, height, depth.
    pub ground_size: [f32; 3],
    /// Rotation of the ground about Z, in radians.
    pub ground_tilt: f32,
    pub clear_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sphere_diameter: 2.0,
            sphere_segments: 32,
            ground_size: [6.0, 0.1, 6.0],
            ground_tilt: 0.1,
            clear_color: [0.2, 0.2, 0.3, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
    /// Where the sphere starts and where every reset puts it back.
    pub spawn_position: [f32; 3],
    /// Added to the sphere's visual radius so debug lines stay outside the mesh.
    pub collider_margin: f32,
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
    /// Rendered frames between sphere resets.
    pub reset_interval: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.80665, 0.0],
            spawn_position: [2.5, 5.0, 0.0],
            collider_margin: 0.1,
            density: 1.0,
            restitution: 0.8,
            friction: 0.2,
            reset_interval: 350,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: [f32; 3],
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            alpha: -FRAC_PI_2,
            beta: PI / 2.5,
            radius: 15.0,
            target: [0.0, 0.0, 0.0],
            fov: 0.8,
            near: 1.0,
            far: 10000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    pub direction: [f32; 3],
    pub intensity: f32,
    pub shadow_map_size: u32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: [0.0, -8.0, 2.0],
            intensity: 0.7,
            shadow_map_size: 1024,
        }
    }
}

/// Which physics internals the debug overlay draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugDrawConfig {
    pub enabled: bool,
    pub shapes: bool,
    pub axes: bool,
    pub aabbs: bool,
    pub contacts: bool,
    pub joints: bool,
}

impl Default for DebugDrawConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            shapes: true,
            axes: false,
            aabbs: false,
            contacts: false,
            joints: false,
        }
    }
}

impl DemoConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self, String> {
        let config: DemoConfig =
            toml::from_str(src).map_err(|e| format!("Invalid config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))
    }

    /// Reject values the scene or the physics world cannot be built from.
    pub fn validate(&self) -> Result<(), String> {
        let scene = &self.scene;
        if !(scene.sphere_diameter > 0.0) {
            return Err(format!("scene.sphere_diameter must be positive, got {}", scene.sphere_diameter));
        }
        if scene.sphere_segments < 2 {
            return Err(format!("scene.sphere_segments must be at least 2, got {}", scene.sphere_segments));
        }
        if scene.ground_size.iter().any(|s| !(*s > 0.0)) {
            return Err(format!("scene.ground_size must be positive, got {:?}", scene.ground_size));
        }

        let physics = &self.physics;
        if physics.reset_interval == 0 {
            return Err("physics.reset_interval must be at least 1".into());
        }
        if !(physics.density > 0.0) {
            return Err(format!("physics.density must be positive, got {}", physics.density));
        }
        if physics.restitution < 0.0 || physics.friction < 0.0 || physics.collider_margin < 0.0 {
            return Err("physics.restitution, friction and collider_margin must not be negative".into());
        }
        if physics.gravity.iter().chain(&physics.spawn_position).any(|v| !v.is_finite()) {
            return Err("physics.gravity and spawn_position must be finite".into());
        }

        let camera = &self.camera;
        if !(camera.radius > 0.0) {
            return Err(format!("camera.radius must be positive, got {}", camera.radius));
        }
        if !(camera.fov > 0.0 && camera.fov < PI) {
            return Err(format!("camera.fov must be within (0, pi), got {}", camera.fov));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(format!(
                "camera.near/far must satisfy 0 < near < far, got {}/{}",
                camera.near, camera.far
            ));
        }

        let light = &self.light;
        if light.direction.iter().all(|d| *d == 0.0) {
            return Err("light.direction must not be zero".into());
        }
        if !(1..=8192).contains(&light.shadow_map_size) {
            return Err(format!(
                "light.shadow_map_size must be within 1..=8192, got {}",
                light.shadow_map_size
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_literals() {
        let config = DemoConfig::default();
        assert_eq!(config.scene.sphere_diameter, 2.0);
        assert_eq!(config.scene.sphere_segments, 32);
        assert_eq!(config.scene.ground_size, [6.0, 0.1, 6.0]);
        assert_eq!(config.scene.ground_tilt, 0.1);
        assert_eq!(config.physics.spawn_position, [2.5, 5.0, 0.0]);
        assert_eq!(config.physics.restitution, 0.8);
        assert_eq!(config.physics.density, 1.0);
        assert_eq!(config.physics.reset_interval, 350);
        assert_eq!(config.camera.radius, 15.0);
        assert_eq!(config.light.direction, [0.0, -8.0, 2.0]);
        assert_eq!(config.light.intensity, 0.7);
        assert_eq!(config.light.shadow_map_size, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = DemoConfig::from_toml_str("").unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = DemoConfig::from_toml_str(
            "[physics]\nreset_interval = 100\n\n[debug_draw]\naabbs = true\n",
        )
        .unwrap();
        assert_eq!(config.physics.reset_interval, 100);
        assert_eq!(config.physics.restitution, 0.8);
        assert!(config.debug_draw.aabbs);
        assert!(config.debug_draw.shapes);
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = DemoConfig::from_toml_str("[physics]\nrestitusion = 0.5\n").unwrap_err();
        assert!(err.contains("Invalid config"), "{err}");
    }

    #[test]
    fn test_invalid_values_rejected() {
        for src in [
            "[scene]\nsphere_diameter = 0.0\n",
            "[scene]\nground_size = [6.0, -1.0, 6.0]\n",
            "[physics]\nreset_interval = 0\n",
            "[physics]\ndensity = -1.0\n",
            "[camera]\nnear = 10.0\nfar = 5.0\n",
            "[light]\ndirection = [0.0, 0.0, 0.0]\n",
            "[light]\nshadow_map_size = 0\n",
        ] {
            assert!(DemoConfig::from_toml_str(src).is_err(), "accepted: {src}");
        }
    }

    #[test]
    fn test_serialized_config_parses_back() {
        let mut config = DemoConfig::default();
        config.physics.reset_interval = 42;
        config.debug_draw.enabled = false;
        let text = config.to_toml_string().unwrap();
        assert_eq!(DemoConfig::from_toml_str(&text).unwrap(), config);
    }
}
