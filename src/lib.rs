use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use web_sys::{WebGl2RenderingContext, HtmlCanvasElement};

pub mod animation;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod render;
pub mod scene;
pub mod text;

pub use clock::{clock_text, update_clock};
pub use config::SceneConfig;
pub use error::SceneError;
pub use text::load_font;

use animation::{ConvergenceTiming, TextConvergence};
use render::RenderPipeline;
use scene::{FixedCamera, FrameDriver, OrbitCamera, RenderPass, TextOverlay, WorldScene, DEFAULT_PASSES};
use text::{generate_text_cloud, CanvasRasterizer, GlyphRasterizer, TextLayout};

/// Initialize panic hook and browser logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // already installed if the module is initialized twice
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Scene state exposed to JavaScript
#[wasm_bindgen]
pub struct ParticleTreeScene {
    config: SceneConfig,
    pipeline: RenderPipeline,
    frames: FrameDriver,
    orbit: OrbitCamera,
    fixed: FixedCamera,
    passes: Vec<RenderPass>,
    rng: StdRng,
    /// Seconds since the scene was built
    time: f32,
}

#[wasm_bindgen]
impl ParticleTreeScene {
    /// Build the world scene with default configuration
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<ParticleTreeScene, JsValue> {
        Ok(Self::build(canvas, SceneConfig::default())?)
    }

    /// Build the world scene from a YAML configuration overriding the defaults
    #[wasm_bindgen]
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> Result<ParticleTreeScene, JsValue> {
        let config = SceneConfig::from_yaml(yaml).map_err(SceneError::from)?;
        Ok(Self::build(canvas, config)?)
    }

    /// CSS font shorthand the host should wait for before attaching text
    #[wasm_bindgen]
    pub fn font_descriptor(&self) -> String {
        self.config.text.font_descriptor(&self.config.text.font)
    }

    /// Second phase: rasterize the text and start its convergence
    #[wasm_bindgen]
    pub fn attach_text(&mut self, font_loaded: bool) -> Result<(), JsValue> {
        let rasterizer = CanvasRasterizer::from_window()?;
        Ok(self.attach_text_with(&rasterizer, font_loaded)?)
    }

    #[wasm_bindgen]
    pub fn has_text(&self) -> bool {
        self.frames.text().is_some()
    }

    /// Update and render a frame
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.time += dt;
        self.orbit.update(dt);

        let update = self.frames.tick(self.time);

        if update.snow_dirty {
            self.pipeline.update_snow(self.frames.snow());
        }
        if update.text_dirty {
            if let Some(text) = self.frames.text() {
                self.pipeline.update_text(text.cloud.current());
            }
        }

        self.pipeline.render(&update, &self.orbit, &self.fixed, &self.passes);
    }

    /// Resize the canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) {
        let aspect = width as f32 / height.max(1) as f32;
        self.orbit.projection.aspect = aspect;
        self.fixed.projection.aspect = aspect;
        self.pipeline.resize(width, height);
    }

    /// Orbit camera
    #[wasm_bindgen]
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.orbit.orbit(delta_x, delta_y);
    }

    /// Zoom camera
    #[wasm_bindgen]
    pub fn zoom(&mut self, delta: f32) {
        self.orbit.zoom(delta);
    }

    /// Text convergence progress (0.0 to 1.0); 0 before the text is attached
    #[wasm_bindgen]
    pub fn text_progress(&self) -> f32 {
        self.frames.text().map_or(0.0, |t| t.convergence.progress())
    }

    /// Check if the text has snapped onto its glyphs
    #[wasm_bindgen]
    pub fn is_text_settled(&self) -> bool {
        self.frames.text().is_some_and(|t| t.convergence.is_finalized())
    }

    #[wasm_bindgen(getter)]
    pub fn clock_time_zone(&self) -> String {
        self.config.clock.time_zone.clone()
    }

    /// Current time in the configured time zone
    #[wasm_bindgen]
    pub fn clock_text(&self) -> Result<String, JsValue> {
        clock::clock_text(&self.config.clock.time_zone)
    }

    /// Refresh the configured clock element; the host calls this once a second
    #[wasm_bindgen]
    pub fn update_clock(&self) -> Result<(), JsValue> {
        clock::update_clock(&self.config.clock.element_id, &self.config.clock.time_zone)
    }
}

impl ParticleTreeScene {
    fn build(canvas: HtmlCanvasElement, config: SceneConfig) -> Result<Self, SceneError> {
        if let Some(level) = config.log_level() {
            log::set_max_level(level);
        }

        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")
            .map_err(|e| gl_error(format!("{:?}", e)))?
            .ok_or_else(|| gl_error("Failed to get WebGL2 context".to_string()))?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| gl_error("Context is not WebGL2".to_string()))?;

        let mut pipeline = RenderPipeline::new(gl, width, height).map_err(gl_error)?;

        let seed = config.seed.unwrap_or_else(random_seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut world = WorldScene::build(&config, &mut rng);
        pipeline.upload_world(&world).map_err(gl_error)?;

        log::info!(
            "world built: {} points, {} trunk segments (seed {})",
            world.point_count(),
            world.trunk.segment_count(),
            seed
        );

        let snow = std::mem::take(&mut world.snow);
        let frames = FrameDriver::new(config.animation.clone(), config.backdrop.snow_extent, snow);

        let aspect = width as f32 / height.max(1) as f32;

        Ok(Self {
            orbit: OrbitCamera::world(aspect, config.tree.auto_rotate_speed),
            fixed: FixedCamera::overlay(aspect),
            passes: DEFAULT_PASSES.to_vec(),
            config,
            pipeline,
            frames,
            rng,
            time: 0.0,
        })
    }

    fn attach_text_with(&mut self, rasterizer: &dyn GlyphRasterizer, font_loaded: bool) -> Result<(), SceneError> {
        if self.frames.text().is_some() {
            return Err(SceneError::TextAlreadyAttached);
        }

        let text = &self.config.text;
        let family = if font_loaded {
            &text.font
        } else {
            log::warn!("font '{}' not loaded, rasterizing with '{}'", text.font, text.fallback_font);
            &text.fallback_font
        };

        let bitmap = rasterizer.rasterize(&text.text, &TextLayout::from_config(text), family)?;
        let cloud = generate_text_cloud(&bitmap, text, &mut self.rng);

        self.pipeline.upload_text(cloud.current(), text).map_err(gl_error)?;

        log::info!("text attached: {} glyph points", cloud.len());

        self.frames.attach_text(TextOverlay {
            cloud,
            convergence: TextConvergence::new(ConvergenceTiming::from_config(&self.config.animation)),
        })
    }
}

fn gl_error(message: String) -> SceneError {
    log::error!("{}", message);
    SceneError::Gl(message)
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}
