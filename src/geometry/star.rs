//! Extruded five-point star on top of the tree, its white outline and
//! the glow halo point that pulses with it.

use std::f32::consts::PI;

use super::buffers::{LineSegment, LineStrandSet, Particle, ParticleCloud};
use super::mesh::{Mesh, Vertex};
use crate::config::TreeConfig;
use crate::math::{Color, Vec3};

const STAR_POINTS: usize = 5;
const STAR_RADIUS: f32 = 3.0;
const STAR_DEPTH: f32 = 1.5;
const INNER_RATIO: f32 = 0.5;
/// Height of the star centre above the tip of the foliage
const STAR_LIFT: f32 = 2.0;
const HALO_SIZE: f32 = 20.0;

/// Everything that makes up the tree-top star
#[derive(Debug, Clone)]
pub struct StarGeometry {
    /// Centred on the origin; place with [`StarGeometry::position`]
    pub body: Mesh,
    pub outline: LineStrandSet,
    pub halo: ParticleCloud,
    pub position: Vec3,
    pub color: Color,
}

/// Outline corners, alternating outer and inner radius, clockwise from the top
pub fn star_outline(radius: f32) -> Vec<(f32, f32)> {
    (0..STAR_POINTS * 2)
        .map(|i| {
            let l = if i % 2 == 1 { radius * INNER_RATIO } else { radius };
            let a = i as f32 / STAR_POINTS as f32 * PI;
            (a.sin() * l, a.cos() * l)
        })
        .collect()
}

pub fn generate_star(tree: &TreeConfig) -> StarGeometry {
    let (mut body, edges) = extrude(&star_outline(STAR_RADIUS), STAR_DEPTH);
    let offset = body.center();

    let mut outline = LineStrandSet::with_capacity(1, edges.len());
    for (a, b) in edges {
        outline.push(LineSegment {
            start: a + offset,
            end: b + offset,
            start_color: Color::WHITE,
            end_color: Color::WHITE,
        });
    }

    let position = Vec3::new(0.0, tree.height / 2.0 + STAR_LIFT, 0.0);

    // halo is authored at the origin and placed through the same transform as the star
    let mut halo = ParticleCloud::with_capacity(1);
    halo.push(Particle::new(Vec3::ZERO, Color::from_hex(0xaaddff)).with_size(HALO_SIZE));

    StarGeometry {
        body,
        outline,
        halo,
        position,
        color: Color::from_hex(0x88ccff),
    }
}

/// Extrude a clockwise polygon along +z; returns the solid and its feature edges
fn extrude(outline: &[(f32, f32)], depth: f32) -> (Mesh, Vec<(Vec3, Vec3)>) {
    let mut mesh = Mesh::new();
    let n = outline.len() as u32;
    let front_normal = Vec3::new(0.0, 0.0, 1.0);
    let back_normal = Vec3::new(0.0, 0.0, -1.0);

    // caps: fan from the centre, the star is star-shaped around it
    let front_center = mesh.add_vertices([Vertex::new(Vec3::new(0.0, 0.0, depth), front_normal)]);
    let front = mesh.add_vertices(outline.iter().map(|&(x, y)| Vertex::new(Vec3::new(x, y, depth), front_normal)));
    let back_center = mesh.add_vertices([Vertex::new(Vec3::ZERO, back_normal)]);
    let back = mesh.add_vertices(outline.iter().map(|&(x, y)| Vertex::new(Vec3::new(x, y, 0.0), back_normal)));

    for i in 0..n {
        let next = (i + 1) % n;
        mesh.add_triangle(front_center, front + next, front + i);
        mesh.add_triangle(back_center, back + i, back + next);
    }

    let mut edges = Vec::with_capacity(outline.len() * 3);

    for i in 0..outline.len() {
        let (ax, ay) = outline[i];
        let (bx, by) = outline[(i + 1) % outline.len()];
        let normal = Vec3::new(-(by - ay), bx - ax, 0.0).normalize();

        let side = mesh.add_vertices([
            Vertex::new(Vec3::new(ax, ay, 0.0), normal),
            Vertex::new(Vec3::new(bx, by, 0.0), normal),
            Vertex::new(Vec3::new(bx, by, depth), normal),
            Vertex::new(Vec3::new(ax, ay, depth), normal),
        ]);
        mesh.add_quad(side, side + 1, side + 2, side + 3);

        edges.push((Vec3::new(ax, ay, depth), Vec3::new(bx, by, depth)));
        edges.push((Vec3::new(ax, ay, 0.0), Vec3::new(bx, by, 0.0)));
        edges.push((Vec3::new(ax, ay, 0.0), Vec3::new(ax, ay, depth)));
    }

    (mesh, edges)
}
