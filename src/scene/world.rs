//! First initialization phase: everything except the text

use rand::Rng;

use crate::config::SceneConfig;
use crate::geometry::{
    generate_cloud_sea, generate_foliage, generate_sky_sphere, generate_snow, generate_spiral_galaxy,
    generate_star, generate_trunk, LineStrandSet, Mesh, ParticleCloud, StarGeometry,
};

/// Generated world geometry, before upload
#[derive(Debug, Clone)]
pub struct WorldScene {
    pub foliage: ParticleCloud,
    pub trunk: LineStrandSet,
    pub star: StarGeometry,
    pub snow: ParticleCloud,
    pub spiral_galaxy: ParticleCloud,
    pub cloud_sea: ParticleCloud,
    pub sky: Mesh,
}

impl WorldScene {
    pub fn build<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let foliage = generate_foliage(&config.tree, rng);
        let trunk = generate_trunk(&config.tree, &config.trunk, rng);
        let star = generate_star(&config.tree);
        let snow = generate_snow(&config.backdrop, rng);
        let spiral_galaxy = generate_spiral_galaxy(&config.tree, &config.backdrop, rng);
        let cloud_sea = generate_cloud_sea(&config.tree, &config.backdrop, rng);
        let sky = generate_sky_sphere(config.backdrop.sky_radius, config.backdrop.sky_segments);

        Self {
            foliage,
            trunk,
            star,
            snow,
            spiral_galaxy,
            cloud_sea,
            sky,
        }
    }

    /// Points across every point group
    pub fn point_count(&self) -> usize {
        self.foliage.len() + self.star.halo.len() + self.snow.len() + self.spiral_galaxy.len() + self.cloud_sea.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.tree.particle_count = 200;
        config.trunk.line_count = 10;
        config.backdrop.snow_count = 50;
        config.backdrop.spiral_count = 100;
        config.backdrop.cloud_count = 300;
        config.backdrop.sky_segments = 8;
        config
    }

    #[test]
    fn test_build_counts() {
        let config = small_config();
        let world = WorldScene::build(&config, &mut StdRng::seed_from_u64(5));
        assert_eq!(world.foliage.len(), 200);
        assert_eq!(world.trunk.segment_count(), 10 * 40);
        assert_eq!(world.snow.len(), 50);
        assert_eq!(world.spiral_galaxy.len(), 100);
        assert_eq!(world.cloud_sea.len(), 300);
        assert_eq!(world.point_count(), 200 + 1 + 50 + 100 + 300);
    }

    #[test]
    fn test_same_seed_same_world() {
        let config = small_config();
        let a = WorldScene::build(&config, &mut StdRng::seed_from_u64(11));
        let b = WorldScene::build(&config, &mut StdRng::seed_from_u64(11));
        assert_eq!(a.foliage, b.foliage);
        assert_eq!(a.trunk, b.trunk);
        assert_eq!(a.cloud_sea, b.cloud_sea);
    }
}
