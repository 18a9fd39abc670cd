//! Trunk, flared roots and internal branches as continuous line strands.
//!
//! Each strand starts at the bottom of the trunk, twists half a turn up
//! to the base of the foliage, then wanders outward through the inside
//! of the cone. Branch radii are clamped to stay at least
//! [`FOLIAGE_MARGIN`] inside the foliage surface.

use std::f32::consts::{PI, TAU};

use rand::Rng;

use super::buffers::{LineSegment, LineStrandSet};
use crate::config::{TreeConfig, TrunkConfig};
use crate::math::{Color, Vec3};

pub const FOLIAGE_MARGIN: f32 = 2.0;
const MIN_BRANCH_RADIUS: f32 = 0.1;
const ROOT_FLARE: f32 = 8.0;
const ROOT_JITTER: f32 = 0.2;
const ROOT_NOISE: f32 = 0.3;
const BRANCH_SPREAD: f32 = 0.6;

/// Foliage cone radius at a height relative to the base of the tree
pub fn cone_radius_at(tree: &TreeConfig, y_rel: f32) -> f32 {
    tree.radius * (1.0 - y_rel / tree.height)
}

/// Largest radius a branch sample may have at `y_rel`
pub fn max_branch_radius(tree: &TreeConfig, y_rel: f32) -> f32 {
    (cone_radius_at(tree, y_rel) - FOLIAGE_MARGIN).max(MIN_BRANCH_RADIUS)
}

/// Generate `line_count` strands of `segments` segments each
pub fn generate_trunk<R: Rng + ?Sized>(tree: &TreeConfig, trunk: &TrunkConfig, rng: &mut R) -> LineStrandSet {
    let mut lines = LineStrandSet::with_capacity(trunk.segments, trunk.line_count);
    let branch_height = tree.height * trunk.branch_height_ratio;
    let y_base = -tree.height / 2.0;

    for i in 0..trunk.line_count {
        let start_angle = i as f32 / trunk.line_count as f32 * TAU + rng.gen::<f32>() * 0.5;
        let my_branch_height = branch_height * (0.5 + rng.gen::<f32>() * 0.5);
        let strand = i as f32;

        let mut previous: Option<(Vec3, Color)> = None;

        for j in 0..=trunk.segments {
            let t = j as f32 / trunk.segments as f32;
            let y_rel = t * (trunk.height + my_branch_height) - trunk.height;

            let (radius, angle, noise_x, noise_z, color) = if y_rel < 0.0 {
                let t_trunk = (y_rel + trunk.height) / trunk.height;
                let flare = (1.0 - t_trunk).powi(3) * ROOT_FLARE;
                let radius = trunk.radius + flare + rng.gen::<f32>() * ROOT_JITTER;
                let angle = start_angle + t_trunk * PI;
                let wobble = t_trunk * 20.0 + strand;
                let color = trunk.root_color.lerp(&trunk.trunk_color, t_trunk);
                (radius, angle, wobble.sin() * ROOT_NOISE, wobble.cos() * ROOT_NOISE, color)
            } else {
                let t_branch = y_rel / my_branch_height;
                let radius = branch_radius(tree, trunk, y_rel, t_branch, strand);
                let angle = start_angle + PI + (t_branch * 5.0 + strand).sin();
                let color = trunk.trunk_color.lerp(&trunk.branch_color, t_branch);
                (radius, angle, 0.0, 0.0, color)
            };

            let mut position = Vec3::from_polar(angle, radius, y_base + y_rel);
            position.x += noise_x;
            position.z += noise_z;

            if let Some((prev_position, prev_color)) = previous {
                lines.push(LineSegment {
                    start: prev_position,
                    end: position,
                    start_color: prev_color,
                    end_color: color,
                });
            }
            previous = Some((position, color));
        }
    }

    lines
}

/// Square-root spread toward 60% of the cone, plus per-strand chaos, clamped inside the foliage.
///
/// The chaos term can push the radius negative, which mirrors the sample
/// across the axis. The clamp bounds the magnitude on both sides, so a
/// strongly negative radius no longer overshoots to the far side of the
/// cone as it would with an upper bound alone.
fn branch_radius(tree: &TreeConfig, trunk: &TrunkConfig, y_rel: f32, t_branch: f32, strand: f32) -> f32 {
    let cone = cone_radius_at(tree, y_rel);
    let max_spread = trunk.radius.max(cone * BRANCH_SPREAD);
    let spread = trunk.radius + (max_spread - trunk.radius) * t_branch.sqrt();
    let chaos = ((t_branch * 10.0 + strand * 5.0).sin() + (t_branch * 15.0).cos()) * (t_branch * 5.0);

    let limit = max_branch_radius(tree, y_rel);
    (spread + chaos).clamp(-limit, limit)
}
