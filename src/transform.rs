use std::ops::Mul;

use crate::utils::{Position, Size, TransformUniform};

/// Column-major 4x4 matrix; the inner arrays are columns, matching the
/// layout WGSL expects for a `mat4x4<f32>` uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub fn identity() -> Self {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.0[3] = [x, y, z, 1.0];
        m
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.0[0][0] = x;
        m.0[1][1] = y;
        m.0[2][2] = z;
        m
    }

    pub fn rotation_z(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let mut m = Self::identity();
        m.0[0] = [c, s, 0.0, 0.0];
        m.0[1] = [-s, c, 0.0, 0.0];
        m
    }

    /// Orthographic projection mapping to WGPU clip space (z in 0..1).
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut m = Self::identity();
        m.0[0][0] = 2.0 / (right - left);
        m.0[1][1] = 2.0 / (top - bottom);
        m.0[2][2] = 1.0 / (near - far);
        m.0[3] = [
            -(right + left) / (right - left),
            -(top + bottom) / (top - bottom),
            -far / (near - far),
            1.0,
        ];
        m
    }

    /// Right-handed look-at view matrix.
    pub fn look_at(eye: [f32; 3], center: [f32; 3], up: [f32; 3]) -> Self {
        let f = normalize(sub(center, eye));
        let s = normalize(cross(f, up));
        let u = cross(s, f);
        Mat4([
            [s[0], u[0], -f[0], 0.0],
            [s[1], u[1], -f[1], 0.0],
            [s[2], u[2], -f[2], 0.0],
            [-dot(s, eye), -dot(u, eye), dot(f, eye), 1.0],
        ])
    }

    /// Applies the matrix to a point (w = 1), with perspective divide.
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        let x = m[0][0] * p[0] + m[1][0] * p[1] + m[2][0] * p[2] + m[3][0];
        let y = m[0][1] * p[0] + m[1][1] * p[1] + m[2][1] * p[2] + m[3][1];
        let z = m[0][2] * p[0] + m[1][2] * p[1] + m[2][2] * p[2] + m[3][2];
        let w = m[0][3] * p[0] + m[1][3] * p[1] + m[2][3] * p[2] + m[3][3];
        [x / w, y / w, z / w]
    }

    pub fn to_uniform(self) -> TransformUniform {
        TransformUniform {
            transform: self.0,
        }
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.0[k][row] * rhs.0[col][k];
                }
                out[col][row] = acc;
            }
        }
        Mat4(out)
    }
}

/// Model matrix for a unit quad placed at `position`, rotated about z and
/// scaled to `size`. Recomputed per frame; the pick pass and the visible
/// pass use different rotations.
pub fn model_matrix(position: Position, size: Size, rotation_deg: f32) -> Mat4 {
    Mat4::translation(position.x, position.y, 0.0)
        * Mat4::rotation_z(rotation_deg.to_radians())
        * Mat4::scale(size.width, size.height, 1.0)
}

/// Maps NDC to framebuffer pixels (top-left origin, matching both winit
/// cursor coordinates and WGPU texture rows).
pub fn ndc_to_pixel(ndc: [f32; 2], width: f32, height: f32) -> Position {
    Position {
        x: (ndc[0] + 1.0) * 0.5 * width,
        y: (1.0 - ndc[1]) * 0.5 * height,
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = dot(v, v).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}
