//! Point cloud that flies in from a scattered cube and settles into the
//! shape of rasterized text.

use rand::Rng;

use super::rasterizer::GlyphBitmap;
use crate::config::TextConfig;
use crate::error::SceneError;
use crate::geometry::{random_in_cube, Particle, ParticleCloud};
use crate::math::{Color, Vec3};

/// Glyph points with fixed endpoints and animated current positions
#[derive(Debug, Clone)]
pub struct TextGlyphCloud {
    start: Vec<Vec3>,
    target: Vec<Vec3>,
    current: ParticleCloud,
}

impl TextGlyphCloud {
    /// Points start at `start`; the two vectors pair up index by index
    pub fn from_points(start: Vec<Vec3>, target: Vec<Vec3>, color: Color) -> Result<Self, SceneError> {
        if start.len() != target.len() {
            return Err(SceneError::UnpairedGlyphs { start: start.len(), target: target.len() });
        }
        Ok(Self::paired(start, target, color))
    }

    fn paired(start: Vec<Vec3>, target: Vec<Vec3>, color: Color) -> Self {
        let mut current = ParticleCloud::with_capacity(start.len());
        for &position in &start {
            current.push(Particle::new(position, color));
        }
        Self { start, target, current }
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    pub fn start(&self) -> &[Vec3] {
        &self.start
    }

    pub fn target(&self) -> &[Vec3] {
        &self.target
    }

    pub fn current(&self) -> &ParticleCloud {
        &self.current
    }

    /// Place every point `progress` of the way from start to target
    pub fn interpolate(&mut self, progress: f32) {
        for (i, (start, target)) in self.start.iter().zip(&self.target).enumerate() {
            self.current.set_position(i, *start + (*target - *start) * progress);
        }
    }

    /// Copy the targets verbatim so settled points carry no interpolation error
    pub fn snap_to_target(&mut self) {
        self.current.positions_mut().copy_from_slice(&self.target);
    }
}

/// Sample the bitmap on a `sample_stride` grid; every bright pixel becomes a point
pub fn generate_text_cloud<R: Rng + ?Sized>(bitmap: &GlyphBitmap, config: &TextConfig, rng: &mut R) -> TextGlyphCloud {
    let stride = config.sample_stride.max(1);
    let mut start = Vec::new();
    let mut target = Vec::new();

    for y in (0..bitmap.height).step_by(stride) {
        for x in (0..bitmap.width).step_by(stride) {
            if bitmap.red(x, y) > config.threshold {
                target.push(pixel_to_target(x as f32, y as f32, bitmap, config));
                start.push(random_in_cube(rng, config.scatter_extent));
            }
        }
    }

    // pushed together above, so always the same length
    TextGlyphCloud::paired(start, target, config.color)
}

pub fn pixel_to_target(x: f32, y: f32, bitmap: &GlyphBitmap, config: &TextConfig) -> Vec3 {
    let half_w = bitmap.width as f32 / 2.0;
    let half_h = bitmap.height as f32 / 2.0;
    Vec3::new(
        (x - half_w) * config.size,
        -(y - half_h) * config.size + config.y,
        0.0,
    )
}

/// Inverse of the pixel mapping: which bitmap pixel a target came from
pub fn target_to_pixel(target: Vec3, bitmap: &GlyphBitmap, config: &TextConfig) -> (f32, f32) {
    let half_w = bitmap.width as f32 / 2.0;
    let half_h = bitmap.height as f32 / 2.0;
    (
        target.x / config.size + half_w,
        -(target.y - config.y) / config.size + half_h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_bitmap() -> GlyphBitmap {
        let mut bitmap = GlyphBitmap::blank(100, 40);
        bitmap.fill_rect(10, 10, 6, 4);
        bitmap.fill_rect(60, 20, 3, 3);
        bitmap
    }

    #[test]
    fn test_targets_map_back_to_bright_pixels() {
        let bitmap = sample_bitmap();
        let config = TextConfig::default();
        let cloud = generate_text_cloud(&bitmap, &config, &mut StdRng::seed_from_u64(1));

        assert!(!cloud.is_empty());
        for &t in cloud.target() {
            assert_eq!(t.z, 0.0);
            let (x, y) = target_to_pixel(t, &bitmap, &config);
            let (px, py) = (x.round() as u32, y.round() as u32);
            assert!((x - px as f32).abs() < 1e-2 && (y - py as f32).abs() < 1e-2);
            assert!(bitmap.red(px, py) > config.threshold);
        }
    }

    #[test]
    fn test_stride_grid_sampling() {
        let bitmap = sample_bitmap();
        let cloud = generate_text_cloud(&bitmap, &TextConfig::default(), &mut StdRng::seed_from_u64(1));
        // even coordinates only: 3x2 in the first block, 2x2 in the second
        assert_eq!(cloud.len(), 6 + 4);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut bitmap = GlyphBitmap::blank(4, 4);
        bitmap.rgba[0] = 128;
        bitmap.rgba[(2 * 4 + 2) * 4] = 129;
        let cloud = generate_text_cloud(&bitmap, &TextConfig::default(), &mut StdRng::seed_from_u64(1));
        assert_eq!(cloud.len(), 1);
    }

    #[test]
    fn test_starts_scattered_with_text_color() {
        let bitmap = sample_bitmap();
        let config = TextConfig::default();
        let cloud = generate_text_cloud(&bitmap, &config, &mut StdRng::seed_from_u64(9));

        assert_eq!(cloud.current().positions(), cloud.start());
        for (i, p) in cloud.start().iter().enumerate() {
            assert!(p.x >= -100.0 && p.x < 100.0);
            assert!(p.y >= -100.0 && p.y < 100.0);
            assert!(p.z >= -100.0 && p.z < 100.0);
            assert_eq!(cloud.current().color(i), config.color);
        }
    }

    #[test]
    fn test_interpolation_and_snap() {
        let bitmap = sample_bitmap();
        let mut cloud = generate_text_cloud(&bitmap, &TextConfig::default(), &mut StdRng::seed_from_u64(3));

        cloud.interpolate(0.0);
        assert_eq!(cloud.current().positions(), cloud.start());

        cloud.interpolate(0.5);
        let mid = cloud.current().position(0);
        let expected = cloud.start()[0].lerp(&cloud.target()[0], 0.5);
        assert!((mid - expected).length() < 1e-4);

        cloud.snap_to_target();
        assert_eq!(cloud.current().positions(), cloud.target());
    }

    #[test]
    fn test_interpolation_is_per_axis() {
        let mut cloud = TextGlyphCloud::from_points(
            vec![Vec3::ZERO],
            vec![Vec3::new(10.0, 20.0, 30.0)],
            Color::WHITE,
        )
        .unwrap();
        cloud.interpolate(0.4);
        let p = cloud.current().position(0);
        assert!((p.x - 4.0).abs() < 1e-5);
        assert!((p.y - 8.0).abs() < 1e-5);
        assert!((p.z - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_seeded_generation_is_identical() {
        let bitmap = sample_bitmap();
        let config = TextConfig::default();
        let a = generate_text_cloud(&bitmap, &config, &mut StdRng::seed_from_u64(5));
        let b = generate_text_cloud(&bitmap, &config, &mut StdRng::seed_from_u64(5));

        assert!(!a.is_empty());
        assert_eq!(a.start(), b.start());
        assert_eq!(a.target(), b.target());
        assert_eq!(a.current(), b.current());
        assert_eq!(a.start().len(), a.target().len());

        let c = generate_text_cloud(&bitmap, &config, &mut StdRng::seed_from_u64(6));
        assert_eq!(a.target(), c.target());
        assert_ne!(a.start(), c.start());
    }

    #[test]
    fn test_unpaired_points_are_rejected() {
        let err = TextGlyphCloud::from_points(vec![Vec3::ZERO, Vec3::ZERO], vec![Vec3::ZERO], Color::WHITE).unwrap_err();
        assert!(matches!(err, SceneError::UnpairedGlyphs { start: 2, target: 1 }));
    }

    #[test]
    fn test_centre_pixel_maps_to_text_height() {
        let bitmap = GlyphBitmap::blank(1000, 300);
        let config = TextConfig::default();
        let t = pixel_to_target(500.0, 150.0, &bitmap, &config);
        assert_eq!(t, Vec3::new(0.0, 40.0, 0.0));
    }
}
