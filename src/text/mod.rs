//! Text overlay: rasterize a string offscreen, then sample it into a
//! converging point cloud.

pub mod layout;
pub mod rasterizer;
pub mod glyph_cloud;
pub mod font;

pub use layout::{PlacedLine, TextLayout};
pub use rasterizer::{CanvasRasterizer, GlyphBitmap, GlyphRasterizer};
pub use glyph_cloud::{generate_text_cloud, target_to_pixel, TextGlyphCloud};
pub use font::load_font;
