//! Procedural geometry for every visual feature of the scene.
//!
//! Generators are pure functions of configuration and a random source;
//! each returns buffers it owns outright.

pub mod buffers;
pub mod foliage;
pub mod trunk;
pub mod backdrop;
pub mod star;
pub mod sky;
pub mod mesh;

pub use buffers::{LineSegment, LineStrandSet, Particle, ParticleCloud};
pub use foliage::{generate_foliage, FoliagePopulations};
pub use trunk::generate_trunk;
pub use backdrop::{generate_cloud_sea, generate_snow, generate_spiral_galaxy, random_in_cube};
pub use star::{generate_star, StarGeometry};
pub use sky::generate_sky_sphere;
pub use mesh::{Mesh, Vertex};
