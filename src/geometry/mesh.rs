use crate::math::Vec3;

/// Floats per vertex in [`Mesh::vertex_data`]
pub const MESH_STRIDE: usize = 6;

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    /// Layout: position(3) + normal(3)
    pub fn to_array(&self) -> [f32; MESH_STRIDE] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
        ]
    }
}

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vec3::new(f32::MIN, f32::MIN, f32::MIN);
        for v in &self.vertices {
            let p = v.position;
            min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        (min, max)
    }

    /// Translate so the bounding box is centred on the origin; returns the applied offset
    pub fn center(&mut self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        let (min, max) = self.bounds();
        let offset = -(min + max).scale(0.5);
        for v in &mut self.vertices {
            v.position = v.position + offset;
        }
        offset
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }
}
