//! Snow volume and the two galaxy layers beneath the tree

use std::f32::consts::TAU;

use rand::Rng;

use super::buffers::{Particle, ParticleCloud};
use crate::config::{BackdropConfig, TreeConfig};
use crate::math::{Color, Vec3};

const SNOW_SIZE: f32 = 0.5;
const SPIRAL_SPIN: f32 = 0.05;
/// Galaxies float this far below the base of the tree
const GALAXY_DROP: f32 = 10.0;

/// Uniform point in the cube [-extent, extent)^3
pub fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * 2.0 * extent,
        (rng.gen::<f32>() - 0.5) * 2.0 * extent,
        (rng.gen::<f32>() - 0.5) * 2.0 * extent,
    )
}

pub fn generate_snow<R: Rng + ?Sized>(backdrop: &BackdropConfig, rng: &mut R) -> ParticleCloud {
    let mut cloud = ParticleCloud::with_capacity(backdrop.snow_count);
    for _ in 0..backdrop.snow_count {
        let position = random_in_cube(rng, backdrop.snow_extent);
        cloud.push(Particle::new(position, Color::WHITE).with_size(SNOW_SIZE));
    }
    cloud
}

fn galaxy_plane(tree: &TreeConfig) -> f32 {
    -tree.height / 2.0 - GALAXY_DROP
}

/// Signed offset with a cubic falloff toward zero
fn scatter<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> f32 {
    let magnitude = rng.gen::<f32>().powi(3);
    let sign = if rng.gen::<f32>() < 0.5 { 1.0 } else { -1.0 };
    magnitude * sign * scale
}

/// Logarithmic-looking spiral with `spiral_arms` arms, cool toward the rim
pub fn generate_spiral_galaxy<R: Rng + ?Sized>(tree: &TreeConfig, backdrop: &BackdropConfig, rng: &mut R) -> ParticleCloud {
    let mut cloud = ParticleCloud::with_capacity(backdrop.spiral_count);
    let arms = backdrop.spiral_arms.max(1);
    let plane = galaxy_plane(tree);

    for i in 0..backdrop.spiral_count {
        let r = rng.gen::<f32>() * backdrop.spiral_radius;
        let spin = r * SPIRAL_SPIN;
        let arm_angle = (i % arms) as f32 / arms as f32 * TAU;

        let offset_x = scatter(rng, r * 0.5);
        let offset_y = scatter(rng, r * 0.2);
        let offset_z = scatter(rng, r * 0.5);

        let mut position = Vec3::from_polar(arm_angle + spin, r, plane + offset_y);
        position.x += offset_x;
        position.z += offset_z;

        let color = backdrop
            .spiral_inner_color
            .lerp(&backdrop.spiral_outer_color, r / backdrop.spiral_radius);

        let size = rng.gen::<f32>() * 2.0;
        let phase = rng.gen::<f32>() * TAU;
        cloud.push(Particle::new(position, color).with_size(size).with_motion(0.0, phase));
    }

    cloud
}

/// Dense rolling disk of warm-to-deep-blue points
pub fn generate_cloud_sea<R: Rng + ?Sized>(tree: &TreeConfig, backdrop: &BackdropConfig, rng: &mut R) -> ParticleCloud {
    let mut cloud = ParticleCloud::with_capacity(backdrop.cloud_count);
    let plane = galaxy_plane(tree);

    for _ in 0..backdrop.cloud_count {
        let r = rng.gen::<f32>().sqrt() * backdrop.cloud_radius;
        let theta = rng.gen::<f32>() * TAU;

        let x = theta.cos() * r;
        let z = theta.sin() * r;
        let y = plane + cloud_wave(x, z) + (rng.gen::<f32>() - 0.5) * 6.0;

        let color = backdrop
            .cloud_inner_color
            .lerp(&backdrop.cloud_outer_color, rng.gen());

        let size = rng.gen::<f32>() * 1.5 + 0.5;
        let phase = rng.gen::<f32>() * TAU;
        cloud.push(Particle::new(Vec3::new(x, y, z), color).with_size(size).with_motion(0.0, phase));
    }

    cloud
}

/// Height of the cloud surface above the galaxy plane
pub fn cloud_wave(x: f32, z: f32) -> f32 {
    let swell = (x * 0.05).sin() * (z * 0.05).cos() * 5.0;
    let chop = (x * 0.1 + 10.0).sin() * (z * 0.15).sin() * 2.0;
    swell + chop
}
