use std::ops::{Add, Sub, Mul, Neg};
use serde::{Serialize, Deserialize};

/// 3D vector for particle positions and directions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point on a horizontal circle of `radius` around the vertical axis at height `y`
    pub fn from_polar(angle: f32, radius: f32, y: f32) -> Self {
        Self {
            x: angle.cos() * radius,
            y,
            z: angle.sin() * radius,
        }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Distance from the vertical (y) axis
    pub fn radial_distance(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            *self
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Per-axis linear interpolation: `self + (other - self) * t`
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    pub fn scale(&self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Convert to array for WebGL
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_from_polar() {
        let p = Vec3::from_polar(0.0, 5.0, 2.0);
        assert!((p.x - 5.0).abs() < 0.0001);
        assert_eq!(p.y, 2.0);
        assert!(p.z.abs() < 0.0001);

        let q = Vec3::from_polar(FRAC_PI_2, 3.0, -1.0);
        assert!(q.x.abs() < 0.0001);
        assert!((q.z - 3.0).abs() < 0.0001);
        assert!((q.radial_distance() - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_radial_distance_ignores_height() {
        let p = Vec3::new(3.0, 100.0, 4.0);
        assert!((p.radial_distance() - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_lerp_per_axis() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, 20.0, 30.0);
        let p = a.lerp(&b, 0.4);
        assert!((p.x - 4.0).abs() < 0.0001);
        assert!((p.y - 8.0).abs() < 0.0001);
        assert!((p.z - 12.0).abs() < 0.0001);
    }

    #[test]
    fn test_normalize_and_cross() {
        let n = Vec3::new(3.0, 4.0, 0.0).normalize();
        assert!((n.length() - 1.0).abs() < 0.0001);

        let c = Vec3::new(1.0, 0.0, 0.0).cross(&Vec3::UP);
        assert!((c.z - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_vec3_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!((a + b).x, 5.0);
        assert_eq!((b - a).y, 3.0);
        assert_eq!((a * 2.0).z, 6.0);
        assert_eq!((-a).x, -1.0);
        assert_eq!(a.dot(&b), 32.0);
    }
}
