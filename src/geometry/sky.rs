//! Sky sphere, viewed from the inside with the starfield shader

use std::f32::consts::{PI, TAU};

use super::mesh::{Mesh, Vertex};
use crate::math::Vec3;

/// UV sphere with `segments` slices around and `segments` stacks top to bottom
pub fn generate_sky_sphere(radius: f32, segments: usize) -> Mesh {
    let mut mesh = Mesh::new();
    let columns = segments as u32 + 1;

    for stack in 0..=segments {
        let v = stack as f32 / segments as f32;
        let polar = v * PI;
        for slice in 0..=segments {
            let u = slice as f32 / segments as f32;
            let azimuth = u * TAU;
            let normal = Vec3::new(
                -azimuth.cos() * polar.sin(),
                polar.cos(),
                azimuth.sin() * polar.sin(),
            );
            mesh.add_vertices([Vertex::new(normal.scale(radius), normal)]);
        }
    }

    for stack in 0..segments as u32 {
        for slice in 0..segments as u32 {
            let a = stack * columns + slice + 1;
            let b = stack * columns + slice;
            let c = (stack + 1) * columns + slice;
            let d = (stack + 1) * columns + slice + 1;

            // the poles collapse one triangle of each quad
            if stack != 0 {
                mesh.add_triangle(a, b, d);
            }
            if stack != segments as u32 - 1 {
                mesh.add_triangle(b, c, d);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_on_sphere() {
        let mesh = generate_sky_sphere(400.0, 16);
        assert_eq!(mesh.vertices.len(), 17 * 17);
        for v in &mesh.vertices {
            assert!((v.position.length() - 400.0).abs() < 1e-2);
            assert!((v.normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_triangle_count_skips_degenerate_poles() {
        let segments = 8;
        let mesh = generate_sky_sphere(1.0, segments);
        assert_eq!(mesh.triangle_count(), segments * segments * 2 - 2 * segments);
        let max = *mesh.indices.iter().max().unwrap();
        assert!((max as usize) < mesh.vertices.len());
    }
}
