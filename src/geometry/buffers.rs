//! Typed attribute buffers for points and lines
//!
//! Buffers are struct-of-arrays so animation can rewrite one attribute
//! (usually position) without touching the others. Every array holds
//! exactly one entry per point.

use std::ops::Range;

use crate::math::{Color, Vec3};

/// Floats per point in [`ParticleCloud::vertex_data`]
pub const POINT_STRIDE: usize = 8;
/// Floats per vertex in [`LineStrandSet::vertex_data`]
pub const LINE_STRIDE: usize = 6;

/// A single point with all of its attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub color: Color,
    pub size: f32,
    /// Twinkle speed; 0 for points that do not twinkle
    pub speed: f32,
    pub phase: f32,
}

impl Particle {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position,
            color,
            size: 1.0,
            speed: 0.0,
            phase: 0.0,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_motion(mut self, speed: f32, phase: f32) -> Self {
        self.speed = speed;
        self.phase = phase;
        self
    }
}

/// Ordered collection of independently rendered points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleCloud {
    positions: Vec<Vec3>,
    colors: Vec<Color>,
    sizes: Vec<f32>,
    speeds: Vec<f32>,
    phases: Vec<f32>,
}

impl ParticleCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            sizes: Vec::with_capacity(capacity),
            speeds: Vec::with_capacity(capacity),
            phases: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, particle: Particle) {
        self.positions.push(particle.position);
        self.colors.push(particle.color);
        self.sizes.push(particle.size);
        self.speeds.push(particle.speed);
        self.phases.push(particle.phase);
    }

    /// Append another cloud; returns the index range its points now occupy
    pub fn extend(&mut self, other: ParticleCloud) -> Range<usize> {
        let start = self.len();
        self.positions.extend(other.positions);
        self.colors.extend(other.colors);
        self.sizes.extend(other.sizes);
        self.speeds.extend(other.speeds);
        self.phases.extend(other.phases);
        start..self.len()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    pub fn set_position(&mut self, index: usize, position: Vec3) {
        self.positions[index] = position;
    }

    pub fn color(&self, index: usize) -> Color {
        self.colors[index]
    }

    pub fn particle(&self, index: usize) -> Particle {
        Particle {
            position: self.positions[index],
            color: self.colors[index],
            size: self.sizes[index],
            speed: self.speeds[index],
            phase: self.phases[index],
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn speeds(&self) -> &[f32] {
        &self.speeds
    }

    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    /// Interleaved GPU layout: position(3) + color(3) + size(1) + phase(1)
    pub fn vertex_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.len() * POINT_STRIDE);
        for i in 0..self.len() {
            let p = self.positions[i];
            let c = self.colors[i];
            data.extend_from_slice(&[p.x, p.y, p.z, c.r, c.g, c.b, self.sizes[i], self.phases[i]]);
        }
        data
    }
}

/// One straight piece of a strand, colored at both ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub start_color: Color,
    pub end_color: Color,
}

/// Line segments grouped into equally long continuous strands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStrandSet {
    segments: Vec<LineSegment>,
    segments_per_strand: usize,
}

impl LineStrandSet {
    pub fn new(segments_per_strand: usize) -> Self {
        Self {
            segments: Vec::new(),
            segments_per_strand,
        }
    }

    pub fn with_capacity(segments_per_strand: usize, strands: usize) -> Self {
        Self {
            segments: Vec::with_capacity(segments_per_strand * strands),
            segments_per_strand,
        }
    }

    pub fn push(&mut self, segment: LineSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segments_per_strand(&self) -> usize {
        self.segments_per_strand
    }

    pub fn strand_count(&self) -> usize {
        if self.segments_per_strand == 0 {
            0
        } else {
            self.segments.len() / self.segments_per_strand
        }
    }

    pub fn strand(&self, index: usize) -> &[LineSegment] {
        let start = index * self.segments_per_strand;
        &self.segments[start..start + self.segments_per_strand]
    }

    /// Number of vertices drawn as `LINES`
    pub fn vertex_count(&self) -> usize {
        self.segments.len() * 2
    }

    /// Interleaved GPU layout, two vertices per segment: position(3) + color(3)
    pub fn vertex_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertex_count() * LINE_STRIDE);
        for s in &self.segments {
            data.extend_from_slice(&[s.start.x, s.start.y, s.start.z, s.start_color.r, s.start_color.g, s.start_color.b]);
            data.extend_from_slice(&[s.end.x, s.end.y, s.end.z, s.end_color.r, s.end_color.g, s.end_color.b]);
        }
        data
    }
}
