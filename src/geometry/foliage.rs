//! Foliage point cloud: spiral branches with ornaments, garland
//! ribbons and a darker inner fill, concatenated in that order.

use std::f32::consts::TAU;
use std::ops::Range;

use rand::Rng;

use super::buffers::{Particle, ParticleCloud};
use crate::config::TreeConfig;
use crate::math::{Color, Vec3};

const BRANCH_SHARE: f32 = 0.7;
const GARLAND_SHARE: f32 = 0.2;

const BRANCH_SPIRAL_TURNS: f32 = 12.0;
const BRANCH_ANGLE_JITTER: f32 = 2.5;
const ORNAMENT_PROBABILITY: f32 = 0.08;

const GARLAND_STRANDS: usize = 3;
const GARLAND_SPIRAL_TURNS: f32 = 8.0;
const GARLAND_OFFSET: f32 = 1.5;
const GARLAND_SIZE: f32 = 1.2;

const FILL_RADIUS_RATIO: f32 = 0.7;
const FILL_DARKEN: f32 = 0.7;
const FILL_SIZE: f32 = 0.5;

/// Point counts of the three foliage populations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoliagePopulations {
    pub branches: usize,
    pub garlands: usize,
    pub fill: usize,
}

impl FoliagePopulations {
    /// Split `total` 70/20/10; the fill absorbs rounding so the sum is exact
    pub fn split(total: usize) -> Self {
        let branches = (total as f32 * BRANCH_SHARE).round() as usize;
        let garlands = ((total as f32 * GARLAND_SHARE).round() as usize).min(total - branches);
        Self {
            branches,
            garlands,
            fill: total - branches - garlands,
        }
    }

    pub fn branch_range(&self) -> Range<usize> {
        0..self.branches
    }

    pub fn garland_range(&self) -> Range<usize> {
        self.branches..self.branches + self.garlands
    }

    pub fn fill_range(&self) -> Range<usize> {
        self.branches + self.garlands..self.total()
    }

    pub fn total(&self) -> usize {
        self.branches + self.garlands + self.fill
    }
}

/// Generate the complete foliage cloud
pub fn generate_foliage<R: Rng + ?Sized>(tree: &TreeConfig, rng: &mut R) -> ParticleCloud {
    let populations = FoliagePopulations::split(tree.particle_count);

    let mut cloud = ParticleCloud::with_capacity(populations.total());
    cloud.extend(generate_branches(tree, populations.branches, rng));
    cloud.extend(generate_garlands(tree, populations.garlands, rng));
    cloud.extend(generate_fill(tree, populations.fill, rng));
    cloud
}

fn height_of(tree: &TreeConfig, height_ratio: f32) -> f32 {
    height_ratio * tree.height - tree.height / 2.0
}

/// Chaotic 12-turn spiral in an annulus just under the cone surface
fn generate_branches<R: Rng + ?Sized>(tree: &TreeConfig, count: usize, rng: &mut R) -> ParticleCloud {
    let mut cloud = ParticleCloud::with_capacity(count);
    let palette = &tree.ornament_colors;

    for _ in 0..count {
        let u: f32 = rng.gen();
        let radius_at_height = tree.radius_at(u);

        let spiral_angle = u * TAU * BRANCH_SPIRAL_TURNS;
        let jitter = (rng.gen::<f32>() - 0.5) * BRANCH_ANGLE_JITTER;
        let r = radius_at_height * (0.6 + rng.gen::<f32>() * 0.4);

        let position = Vec3::from_polar(spiral_angle + jitter, r, height_of(tree, u));

        let (color, size) = if rng.gen::<f32>() < ORNAMENT_PROBABILITY {
            let color = palette[rng.gen_range(0..palette.len())];
            (color, rng.gen::<f32>() * 1.5 + 1.2)
        } else {
            let color = tree.leaf_color.lerp(&tree.leaf_color_bright, rng.gen());
            (color, rng.gen::<f32>() * 0.8 + 0.4)
        };

        let speed = rng.gen();
        let phase = rng.gen::<f32>() * TAU;
        cloud.push(Particle::new(position, color).with_size(size).with_motion(speed, phase));
    }

    cloud
}

/// Three smooth ribbons sitting just outside the foliage
fn generate_garlands<R: Rng + ?Sized>(tree: &TreeConfig, count: usize, rng: &mut R) -> ParticleCloud {
    let mut cloud = ParticleCloud::with_capacity(count);
    let gold = Color::from_hex(0xffd700);

    for _ in 0..count {
        let strand = (rng.gen::<f32>() * GARLAND_STRANDS as f32) as usize;
        let strand_offset = strand as f32 / GARLAND_STRANDS as f32 * TAU;

        let u: f32 = rng.gen();
        let r = tree.radius_at(u) + GARLAND_OFFSET;
        let angle = u * TAU * GARLAND_SPIRAL_TURNS + strand_offset;

        let position = Vec3::from_polar(angle, r, height_of(tree, u));
        let color = gold.lerp(&Color::WHITE, rng.gen::<f32>() * 0.5);

        // phase follows height so a flowing light can run along the ribbon
        cloud.push(
            Particle::new(position, color)
                .with_size(GARLAND_SIZE)
                .with_motion(0.0, u * 10.0),
        );
    }

    cloud
}

/// Uniform-area disk sampling inside the cone
fn generate_fill<R: Rng + ?Sized>(tree: &TreeConfig, count: usize, rng: &mut R) -> ParticleCloud {
    let mut cloud = ParticleCloud::with_capacity(count);
    let color = tree.leaf_color.scale(FILL_DARKEN);

    for _ in 0..count {
        let u: f32 = rng.gen();
        let r = rng.gen::<f32>().sqrt() * tree.radius_at(u) * FILL_RADIUS_RATIO;
        let angle = rng.gen::<f32>() * TAU;

        let position = Vec3::from_polar(angle, r, height_of(tree, u));
        cloud.push(
            Particle::new(position, color)
                .with_size(FILL_SIZE)
                .with_motion(rng.gen(), 0.0),
        );
    }

    cloud
}
