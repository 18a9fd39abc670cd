pub mod vec3;
pub mod matrix;
pub mod color;

pub use vec3::Vec3;
pub use matrix::Mat4;
pub use color::Color;
