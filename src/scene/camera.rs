//! Cameras: a damped orbit camera for the world and a fixed camera for
//! the text overlay.

use std::f32::consts::{PI, TAU};

use crate::math::{Mat4, Vec3};

const FOV_DEGREES: f32 = 60.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Radians of orbit per pixel of pointer drag
const ORBIT_SPEED: f32 = 0.01;
/// Keeps the polar angle off the exact poles
const POLE_EPSILON: f32 = 1e-6;

/// Perspective parameters shared by both cameras
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(aspect: f32) -> Self {
        Self {
            fov: FOV_DEGREES.to_radians(),
            aspect,
            near: NEAR,
            far: FAR,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }
}

/// Limits and feel of the orbit camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar: f32,
    /// Fraction of pending motion applied per update
    pub damping: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 50.0,
            max_distance: 300.0,
            max_polar: PI / 1.5,
            damping: 0.05,
        }
    }
}

/// Orbit around a target with damped rotation and zoom, on spherical coordinates
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub projection: Projection,
    pub limits: OrbitLimits,
    /// Full turns per minute, as a 60 fps orbit control would count them
    pub auto_rotate_speed: f32,
    distance: f32,
    /// Angle around the vertical axis, measured from +z toward +x
    azimuth: f32,
    /// Angle down from +y
    polar: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_distance: f32,
}

impl OrbitCamera {
    /// Camera at `eye` looking at `target`
    pub fn looking_at(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let azimuth = offset.x.atan2(offset.z);
        let polar = (offset.y / distance).clamp(-1.0, 1.0).acos();

        Self {
            target,
            projection: Projection::new(aspect),
            limits: OrbitLimits::default(),
            auto_rotate_speed: 0.0,
            distance,
            azimuth,
            polar,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_distance: 0.0,
        }
    }

    /// Default world camera: 20 up and 180 back from the origin
    pub fn world(aspect: f32, auto_rotate_speed: f32) -> Self {
        let mut camera = Self::looking_at(Vec3::new(0.0, 20.0, 180.0), Vec3::ZERO, aspect);
        camera.auto_rotate_speed = auto_rotate_speed;
        camera
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    /// Queue a drag; it eases in over the following updates
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.pending_azimuth -= delta_x * ORBIT_SPEED;
        self.pending_polar -= delta_y * ORBIT_SPEED;
    }

    /// Queue a zoom; positive moves away from the target
    pub fn zoom(&mut self, delta: f32) {
        self.pending_distance += delta;
    }

    pub fn update(&mut self, dt: f32) {
        let damping = self.limits.damping;

        self.azimuth += self.pending_azimuth * damping + self.auto_rotate_angle(dt);
        self.polar += self.pending_polar * damping;
        self.distance += self.pending_distance * damping;

        self.azimuth = self.azimuth.rem_euclid(TAU);
        self.polar = self
            .polar
            .clamp(0.0, self.limits.max_polar)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.distance = self.distance.clamp(self.limits.min_distance, self.limits.max_distance);

        self.pending_azimuth *= 1.0 - damping;
        self.pending_polar *= 1.0 - damping;
        self.pending_distance *= 1.0 - damping;
    }

    fn auto_rotate_angle(&self, dt: f32) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed * dt
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + Vec3::new(
                self.distance * sin_polar * self.azimuth.sin(),
                self.distance * self.polar.cos(),
                self.distance * sin_polar * self.azimuth.cos(),
            )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.position(), self.target, Vec3::UP)
    }
}

/// Screen-fixed camera for overlay content
#[derive(Debug, Clone)]
pub struct FixedCamera {
    pub position: Vec3,
    pub projection: Projection,
}

impl FixedCamera {
    pub fn overlay(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 100.0),
            projection: Projection::new(aspect),
        }
    }

    /// Looks straight down -z
    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position - Vec3::new(0.0, 0.0, 1.0), Vec3::UP)
    }
}
