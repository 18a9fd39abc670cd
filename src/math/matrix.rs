use super::Vec3;

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[0] = x;
        m.data[5] = y;
        m.data[10] = z;
        m
    }

    /// Rotation about the vertical axis
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Object transform: scale, then spin about Y, then translate
    pub fn model(position: Vec3, rotation_y: f32, scale: f32) -> Self {
        Self::translation(position.x, position.y, position.z)
            .mul(&Self::rotation_y(rotation_y))
            .mul(&Self::scale(scale, scale, scale))
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    /// Matrix multiplication
    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// Transform a point (applies translation)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    /// Get as slice for WebGL
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_translation() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        let result = m.transform_point(Vec3::ZERO);
        assert!((result.x - 1.0).abs() < 0.0001);
        assert!((result.y - 2.0).abs() < 0.0001);
        assert!((result.z - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_rotation_y_keeps_height() {
        let m = Mat4::rotation_y(FRAC_PI_2);
        let result = m.transform_point(Vec3::new(1.0, 5.0, 0.0));
        assert!(result.x.abs() < 0.0001);
        assert!((result.y - 5.0).abs() < 0.0001);
        assert!((result.z + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_model_scales_before_translating() {
        let m = Mat4::model(Vec3::new(0.0, 42.0, 0.0), 0.0, 2.0);
        let result = m.transform_point(Vec3::new(1.0, 1.0, 0.0));
        assert!((result.x - 2.0).abs() < 0.0001);
        assert!((result.y - 44.0).abs() < 0.0001);
    }

    #[test]
    fn test_look_at_moves_target_onto_negative_z() {
        let eye = Vec3::new(0.0, 0.0, 100.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        let p = view.transform_point(Vec3::ZERO);
        assert!(p.x.abs() < 0.0001);
        assert!(p.y.abs() < 0.0001);
        assert!((p.z + 100.0).abs() < 0.0001);
    }

    #[test]
    fn test_perspective_aspect() {
        let p = Mat4::perspective(FRAC_PI_2, 2.0, 0.1, 1000.0);
        assert!((p.data[5] - 1.0).abs() < 0.0001);
        assert!((p.data[0] - 0.5).abs() < 0.0001);
        assert_eq!(p.data[11], -1.0);
    }
}
