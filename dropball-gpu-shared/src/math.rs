use glam::{Mat4, Vec3};

/// Position of an arc-rotate camera orbiting `target`.
///
/// `alpha` is the longitudinal angle around the Y axis, `beta` the latitudinal
/// angle measured from +Y. Both in radians.
pub fn arc_rotate_position(alpha: f32, beta: f32, radius: f32, target: Vec3) -> Vec3 {
    let (sin_a, cos_a) = alpha.sin_cos();
    let (sin_b, cos_b) = beta.sin_cos();
    target + Vec3::new(radius * cos_a * sin_b, radius * cos_b, radius * sin_a * sin_b)
}

/// Left-handed perspective view-projection (Y up, depth in [0, 1]).
pub fn perspective_view_proj(
    eye: Vec3,
    target: Vec3,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    let view = Mat4::look_at_lh(eye, target, Vec3::Y);
    let proj = Mat4::perspective_lh(fov_y, aspect, near, far);
    proj * view
}

/// Orthographic view-projection for a directional light, covering a sphere
/// of `extent` around `focus`.
pub fn directional_light_view_proj(direction: Vec3, focus: Vec3, extent: f32) -> Mat4 {
    let dir = direction.normalize_or(Vec3::NEG_Y);
    let eye = focus - dir * extent * 2.0;
    // look_at degenerates when the light points straight along the up vector
    let up = if dir.cross(Vec3::Y).length_squared() < 1e-6 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let view = Mat4::look_at_lh(eye, focus, up);
    let proj = Mat4::orthographic_lh(-extent, extent, -extent, extent, 0.0, extent * 4.0);
    proj * view
}

/// Convert an HSL colour (hue in degrees, saturation and lightness in [0, 1])
/// to linear RGB.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    [r + m, g + m, b + m]
}
