//! Math type aliases and texture-space helpers.
//!
//! Texture coordinates live in `[0, 1]`; the helpers below build the 4x4
//! matrices applied to `(u, v, 0, 1)` by the texture transform.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Inverse scale about the texture centre `(0.5, 0.5)`.
///
/// A scale of 2 shows the texture twice as large, so the coordinates are
/// multiplied by `1 / scale` and re-centred.
pub fn texture_scale(u_scale: f32, v_scale: f32) -> Mat4 {
    let su = 1.0 / u_scale;
    let sv = 1.0 / v_scale;
    #[rustfmt::skip]
    let result = Mat4::new(
        su,  0.0, 0.0, -0.5 * su + 0.5,
        0.0, sv,  0.0, -0.5 * sv + 0.5,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    result
}

/// Translation of texture coordinates by `(u, v)`.
pub fn texture_translation(u: f32, v: f32) -> Mat4 {
    #[rustfmt::skip]
    let result = Mat4::new(
        1.0, 0.0, 0.0, u,
        0.0, 1.0, 0.0, v,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    result
}

/// Rotation of texture coordinates by `angle` radians about the texture centre.
pub fn texture_rotation(angle: f32) -> Mat4 {
    let (sin, cos) = angle.sin_cos();
    #[rustfmt::skip]
    let result = Mat4::new(
        cos, -sin, 0.0, 0.5 + ((-0.5 * cos) - (-0.5 * sin)),
        sin, cos,  0.0, 0.5 + ((-0.5 * sin) + (-0.5 * cos)),
        0.0, 0.0,  1.0, 0.0,
        0.0, 0.0,  0.0, 1.0,
    );
    result
}

/// Apply a texture-space matrix to a `(u, v)` coordinate.
pub fn transform_uv(m: &Mat4, uv: Vec2) -> Vec2 {
    let p = m * Vec4::new(uv.x, uv.y, 0.0, 1.0);
    Vec2::new(p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn unit_scale_is_identity() {
        assert!((texture_scale(1.0, 1.0) - Mat4::identity()).norm() < 1e-6);
    }

    #[test]
    fn scale_keeps_centre_fixed() {
        let m = texture_scale(2.0, 4.0);
        let centre = Vec2::new(0.5, 0.5);
        assert!(approx(transform_uv(&m, centre), centre));
        assert!(approx(transform_uv(&m, Vec2::new(1.0, 1.0)), Vec2::new(0.75, 0.625)));
    }

    #[test]
    fn translation_offsets_coordinates() {
        let m = texture_translation(0.25, -0.5);
        assert!(approx(
            transform_uv(&m, Vec2::new(0.0, 0.0)),
            Vec2::new(0.25, -0.5)
        ));
    }

    #[test]
    fn rotation_turns_about_centre() {
        let m = texture_rotation(FRAC_PI_2);
        let centre = Vec2::new(0.5, 0.5);
        assert!(approx(transform_uv(&m, centre), centre));
        // (1, 0.5) is half a unit right of centre; a quarter turn moves it above.
        assert!(approx(transform_uv(&m, Vec2::new(1.0, 0.5)), Vec2::new(0.5, 1.0)));
    }
}
