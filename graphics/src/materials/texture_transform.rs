//! Lazily recomputed texture-coordinate transform.

use camelot_core::math::{self, Mat4};

/// Scroll, scale and rotation of texture coordinates, plus the matrix they
/// produce.
///
/// Every component setter marks the matrix dirty; [`TextureTransform::matrix`]
/// recomputes it on the next read. The matrix is built as scale, then
/// translation, then rotation, each left-multiplying the running transform,
/// so the rotation is applied last.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureTransform {
    u_scroll: f32,
    v_scroll: f32,
    u_scale: f32,
    v_scale: f32,
    rotate: f32,
    matrix: Mat4,
    dirty: bool,
}

impl TextureTransform {
    pub fn new() -> Self {
        Self {
            u_scroll: 0.0,
            v_scroll: 0.0,
            u_scale: 1.0,
            v_scale: 1.0,
            rotate: 0.0,
            matrix: Mat4::identity(),
            dirty: false,
        }
    }

    pub fn set_scroll(&mut self, u: f32, v: f32) {
        self.u_scroll = u;
        self.v_scroll = v;
        self.dirty = true;
    }

    pub fn set_u_scroll(&mut self, u: f32) {
        self.u_scroll = u;
        self.dirty = true;
    }

    pub fn set_v_scroll(&mut self, v: f32) {
        self.v_scroll = v;
        self.dirty = true;
    }

    pub fn set_scale(&mut self, u: f32, v: f32) {
        self.u_scale = u;
        self.v_scale = v;
        self.dirty = true;
    }

    pub fn set_u_scale(&mut self, u: f32) {
        self.u_scale = u;
        self.dirty = true;
    }

    pub fn set_v_scale(&mut self, v: f32) {
        self.v_scale = v;
        self.dirty = true;
    }

    /// Rotation angle in radians.
    pub fn set_rotate(&mut self, angle: f32) {
        self.rotate = angle;
        self.dirty = true;
    }

    /// Override the matrix directly. Components are left untouched and the
    /// matrix is no longer dirty.
    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
        self.dirty = false;
    }

    pub fn u_scroll(&self) -> f32 {
        self.u_scroll
    }

    pub fn v_scroll(&self) -> f32 {
        self.v_scroll
    }

    pub fn u_scale(&self) -> f32 {
        self.u_scale
    }

    pub fn v_scale(&self) -> f32 {
        self.v_scale
    }

    pub fn rotate(&self) -> f32 {
        self.rotate
    }

    /// Whether the next [`TextureTransform::matrix`] call recomputes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The current matrix, recomputed first if any component changed.
    pub fn matrix(&mut self) -> &Mat4 {
        if self.dirty {
            self.matrix = self.compute();
            self.dirty = false;
        }
        &self.matrix
    }

    /// Build the matrix from the current components.
    pub fn compute(&self) -> Mat4 {
        let mut xform = Mat4::identity();
        if self.u_scale != 1.0 || self.v_scale != 1.0 {
            xform = math::texture_scale(self.u_scale, self.v_scale);
        }
        if self.u_scroll != 0.0 || self.v_scroll != 0.0 {
            xform = math::texture_translation(self.u_scroll, self.v_scroll) * xform;
        }
        if self.rotate != 0.0 {
            xform = math::texture_rotation(self.rotate) * xform;
        }
        xform
    }
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self::new()
    }
}
