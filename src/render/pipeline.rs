use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation, WebGlVertexArrayObject,
};
use crate::config::TextConfig;
use crate::geometry::buffers::{LINE_STRIDE, POINT_STRIDE};
use crate::geometry::mesh::MESH_STRIDE;
use crate::geometry::{LineStrandSet, Mesh, ParticleCloud};
use crate::math::{Color, Mat4, Vec3};
use crate::scene::{CameraSlot, ClearMode, FixedCamera, FrameUpdate, OrbitCamera, RenderPass, SceneGroup, WorldScene};
use super::webgl::WebGLContext;
use super::shaders::*;

/// Scene background, written straight to the framebuffer
const BACKGROUND: u32 = 0x050505;
const FOG_DENSITY: f32 = 0.002;

const TREE_OPACITY: f32 = 0.9;
const SNOW_OPACITY: f32 = 0.8;
const SPIRAL_OPACITY: f32 = 0.8;
const CLOUD_OPACITY: f32 = 0.5;
const TRUNK_OPACITY: f32 = 0.6;
const HALO_OPACITY: f32 = 0.6;
/// Cloud sea points are drawn a little smaller for density
const CLOUD_POINT_SIZE: f32 = 0.8;

/// Which time-driven transform a drawable follows
#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Fixed,
    SpiralSpin,
    CloudSpin,
    SkySpin,
    /// Placed at the star position, scaled by the pulse
    StarPulse,
}

/// Cached uniform locations for the point shader
struct PointUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    size: Option<WebGlUniformLocation>,
    point_scale: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
    fog_color: Option<WebGlUniformLocation>,
    fog_density: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the line shader
struct LineUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
    fog_color: Option<WebGlUniformLocation>,
    fog_density: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the star body shader
struct StarUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    fog_color: Option<WebGlUniformLocation>,
    fog_density: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the sky shader
struct SkyUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the text shader
struct TextUniforms {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    point_scale: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    brightness: Option<WebGlUniformLocation>,
    saturation: Option<WebGlUniformLocation>,
    twinkle_speed: Option<WebGlUniformLocation>,
    glow_intensity: Option<WebGlUniformLocation>,
}

/// Vertex buffer drawn with `draw_arrays`
struct GpuArray {
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
    count: i32,
}

/// Indexed triangle mesh
struct GpuMesh {
    vao: WebGlVertexArrayObject,
    _vertex_buffer: WebGlBuffer,
    _index_buffer: WebGlBuffer,
    index_count: i32,
}

struct PointGroup {
    gpu: GpuArray,
    size: f32,
    opacity: f32,
    motion: Motion,
}

struct LineGroup {
    gpu: GpuArray,
    opacity: f32,
    motion: Motion,
}

/// Uploaded world scene
struct WorldGpu {
    sky: GpuMesh,
    star_body: GpuMesh,
    star_position: Vec3,
    star_color: Color,
    lines: Vec<LineGroup>,
    /// Drawn in order; snow is at `snow_index`
    points: Vec<PointGroup>,
    snow_index: usize,
}

/// Uploaded text overlay and its shading parameters
struct TextGpu {
    gpu: GpuArray,
    brightness: f32,
    saturation: f32,
    twinkle_speed: f32,
    glow_intensity: f32,
}

/// Render pipeline for the world scene and the text overlay
pub struct RenderPipeline {
    ctx: WebGLContext,

    // Shaders
    point_program: WebGlProgram,
    line_program: WebGlProgram,
    star_program: WebGlProgram,
    sky_program: WebGlProgram,
    text_program: WebGlProgram,

    // Uniform locations
    point_uniforms: PointUniforms,
    line_uniforms: LineUniforms,
    star_uniforms: StarUniforms,
    sky_uniforms: SkyUniforms,
    text_uniforms: TextUniforms,

    world: Option<WorldGpu>,
    text: Option<TextGpu>,

    fog_color: Color,

    // Dimensions
    width: i32,
    height: i32,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32) -> Result<Self, String> {
        let ctx = WebGLContext::new(gl);

        // Compile shaders
        let point_program = ctx.create_program(POINTS_VERTEX_SHADER, POINTS_FRAGMENT_SHADER)?;
        let line_program = ctx.create_program(LINES_VERTEX_SHADER, LINES_FRAGMENT_SHADER)?;
        let star_program = ctx.create_program(STAR_VERTEX_SHADER, STAR_FRAGMENT_SHADER)?;
        let sky_program = ctx.create_program(SKY_VERTEX_SHADER, SKY_FRAGMENT_SHADER)?;
        let text_program = ctx.create_program(TEXT_VERTEX_SHADER, TEXT_FRAGMENT_SHADER)?;

        // Get uniform locations
        let point_uniforms = PointUniforms {
            model: ctx.get_uniform_location(&point_program, "u_model"),
            view: ctx.get_uniform_location(&point_program, "u_view"),
            projection: ctx.get_uniform_location(&point_program, "u_projection"),
            size: ctx.get_uniform_location(&point_program, "u_size"),
            point_scale: ctx.get_uniform_location(&point_program, "u_point_scale"),
            opacity: ctx.get_uniform_location(&point_program, "u_opacity"),
            fog_color: ctx.get_uniform_location(&point_program, "u_fog_color"),
            fog_density: ctx.get_uniform_location(&point_program, "u_fog_density"),
        };

        let line_uniforms = LineUniforms {
            model: ctx.get_uniform_location(&line_program, "u_model"),
            view: ctx.get_uniform_location(&line_program, "u_view"),
            projection: ctx.get_uniform_location(&line_program, "u_projection"),
            opacity: ctx.get_uniform_location(&line_program, "u_opacity"),
            fog_color: ctx.get_uniform_location(&line_program, "u_fog_color"),
            fog_density: ctx.get_uniform_location(&line_program, "u_fog_density"),
        };

        let star_uniforms = StarUniforms {
            model: ctx.get_uniform_location(&star_program, "u_model"),
            view: ctx.get_uniform_location(&star_program, "u_view"),
            projection: ctx.get_uniform_location(&star_program, "u_projection"),
            color: ctx.get_uniform_location(&star_program, "u_color"),
            fog_color: ctx.get_uniform_location(&star_program, "u_fog_color"),
            fog_density: ctx.get_uniform_location(&star_program, "u_fog_density"),
        };

        let sky_uniforms = SkyUniforms {
            model: ctx.get_uniform_location(&sky_program, "u_model"),
            view: ctx.get_uniform_location(&sky_program, "u_view"),
            projection: ctx.get_uniform_location(&sky_program, "u_projection"),
            time: ctx.get_uniform_location(&sky_program, "u_time"),
        };

        let text_uniforms = TextUniforms {
            view: ctx.get_uniform_location(&text_program, "u_view"),
            projection: ctx.get_uniform_location(&text_program, "u_projection"),
            point_scale: ctx.get_uniform_location(&text_program, "u_point_scale"),
            time: ctx.get_uniform_location(&text_program, "u_time"),
            brightness: ctx.get_uniform_location(&text_program, "u_brightness"),
            saturation: ctx.get_uniform_location(&text_program, "u_saturation"),
            twinkle_speed: ctx.get_uniform_location(&text_program, "u_twinkle_speed"),
            glow_intensity: ctx.get_uniform_location(&text_program, "u_glow_intensity"),
        };

        ctx.viewport(0, 0, width, height);

        Ok(Self {
            ctx,
            point_program,
            line_program,
            star_program,
            sky_program,
            text_program,
            point_uniforms,
            line_uniforms,
            star_uniforms,
            sky_uniforms,
            text_uniforms,
            world: None,
            text: None,
            fog_color: Color::from_hex(BACKGROUND),
            width,
            height,
        })
    }

    /// Upload every world buffer. Snow is uploaded dynamic; the rest is static.
    pub fn upload_world(&mut self, world: &WorldScene) -> Result<(), String> {
        let sky = self.upload_mesh(&world.sky)?;
        let star_body = self.upload_mesh(&world.star.body)?;

        let lines = vec![
            LineGroup {
                gpu: self.upload_lines(&world.star.outline)?,
                opacity: 1.0,
                motion: Motion::StarPulse,
            },
            LineGroup {
                gpu: self.upload_lines(&world.trunk)?,
                opacity: TRUNK_OPACITY,
                motion: Motion::Fixed,
            },
        ];

        let static_draw = WebGl2RenderingContext::STATIC_DRAW;
        let points = vec![
            self.point_group(&world.cloud_sea, static_draw, CLOUD_POINT_SIZE, CLOUD_OPACITY, Motion::CloudSpin)?,
            self.point_group(&world.spiral_galaxy, static_draw, 1.0, SPIRAL_OPACITY, Motion::SpiralSpin)?,
            self.point_group(&world.foliage, static_draw, 1.0, TREE_OPACITY, Motion::Fixed)?,
            self.point_group(&world.snow, WebGl2RenderingContext::DYNAMIC_DRAW, 1.0, SNOW_OPACITY, Motion::Fixed)?,
            self.point_group(&world.star.halo, static_draw, 1.0, HALO_OPACITY, Motion::StarPulse)?,
        ];

        self.world = Some(WorldGpu {
            sky,
            star_body,
            star_position: world.star.position,
            star_color: world.star.color,
            lines,
            points,
            snow_index: 3,
        });

        Ok(())
    }

    /// Upload the text cloud at its current positions
    pub fn upload_text(&mut self, cloud: &ParticleCloud, config: &TextConfig) -> Result<(), String> {
        let gpu = self.upload_points(cloud, WebGl2RenderingContext::DYNAMIC_DRAW)?;
        self.text = Some(TextGpu {
            gpu,
            brightness: config.brightness,
            saturation: config.saturation,
            twinkle_speed: config.twinkle_speed,
            glow_intensity: config.glow_intensity,
        });
        Ok(())
    }

    pub fn update_snow(&self, snow: &ParticleCloud) {
        if let Some(world) = &self.world {
            self.ctx.update_buffer_f32(&world.points[world.snow_index].gpu.buffer, &snow.vertex_data());
        }
    }

    pub fn update_text(&self, cloud: &ParticleCloud) {
        if let Some(text) = &self.text {
            self.ctx.update_buffer_f32(&text.gpu.buffer, &cloud.vertex_data());
        }
    }

    fn point_group(
        &self,
        cloud: &ParticleCloud,
        usage: u32,
        size: f32,
        opacity: f32,
        motion: Motion,
    ) -> Result<PointGroup, String> {
        Ok(PointGroup {
            gpu: self.upload_points(cloud, usage)?,
            size,
            opacity,
            motion,
        })
    }

    /// Layout: position(3) + color(3) + size(1) + phase(1)
    fn upload_points(&self, cloud: &ParticleCloud, usage: u32) -> Result<GpuArray, String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = self.ctx.create_buffer_f32(&cloud.vertex_data(), usage)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));

        self.ctx.float_attribute(0, 3, POINT_STRIDE, 0);
        self.ctx.float_attribute(1, 3, POINT_STRIDE, 3);
        self.ctx.float_attribute(2, 1, POINT_STRIDE, 6);
        self.ctx.float_attribute(3, 1, POINT_STRIDE, 7);

        gl.bind_vertex_array(None);

        Ok(GpuArray {
            vao,
            buffer,
            count: cloud.len() as i32,
        })
    }

    /// Layout: position(3) + color(3), two vertices per segment
    fn upload_lines(&self, lines: &LineStrandSet) -> Result<GpuArray, String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = self.ctx.create_buffer_f32(&lines.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));

        self.ctx.float_attribute(0, 3, LINE_STRIDE, 0);
        self.ctx.float_attribute(1, 3, LINE_STRIDE, 3);

        gl.bind_vertex_array(None);

        Ok(GpuArray {
            vao,
            buffer,
            count: lines.vertex_count() as i32,
        })
    }

    /// Layout: position(3) + normal(3)
    fn upload_mesh(&self, mesh: &Mesh) -> Result<GpuMesh, String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = self.ctx.create_buffer_f32(&mesh.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        let index_data = mesh.index_data();
        let index_buffer = self.ctx.create_index_buffer(index_data, WebGl2RenderingContext::STATIC_DRAW)?;

        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&vertex_buffer));
        gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));

        self.ctx.float_attribute(0, 3, MESH_STRIDE, 0);
        self.ctx.float_attribute(1, 3, MESH_STRIDE, 3);

        gl.bind_vertex_array(None);

        Ok(GpuMesh {
            vao,
            _vertex_buffer: vertex_buffer,
            _index_buffer: index_buffer,
            index_count: index_data.len() as i32,
        })
    }

    /// Render a frame by running `passes` in order
    pub fn render(&self, frame: &FrameUpdate, orbit: &OrbitCamera, fixed: &FixedCamera, passes: &[RenderPass]) {
        for pass in passes {
            match pass.clear {
                ClearMode::ColorAndDepth => {
                    let [r, g, b] = display_rgb(BACKGROUND);
                    self.ctx.clear(r, g, b, 1.0);
                }
                ClearMode::DepthOnly => self.ctx.clear_depth(),
            }

            let (view, projection) = match pass.camera {
                CameraSlot::Orbit => (orbit.view(), orbit.projection.matrix()),
                CameraSlot::Fixed => (fixed.view(), fixed.projection.matrix()),
            };

            match pass.group {
                SceneGroup::World => self.draw_world(frame, &view, &projection),
                SceneGroup::Overlay => self.draw_text(frame, &view, &projection),
            }
        }
    }

    fn model_matrix(&self, motion: Motion, frame: &FrameUpdate, star_position: Vec3) -> Mat4 {
        match motion {
            Motion::Fixed => Mat4::identity(),
            Motion::SpiralSpin => Mat4::rotation_y(frame.rotations.spiral),
            Motion::CloudSpin => Mat4::rotation_y(frame.rotations.cloud),
            Motion::SkySpin => Mat4::rotation_y(frame.rotations.sky),
            Motion::StarPulse => Mat4::model(star_position, 0.0, frame.star_scale),
        }
    }

    fn draw_world(&self, frame: &FrameUpdate, view: &Mat4, projection: &Mat4) {
        let Some(world) = &self.world else {
            return;
        };
        let gl = &self.ctx.gl;

        // === Opaque: sky, star body ===
        self.ctx.opaque_state();

        gl.use_program(Some(&self.sky_program));
        self.ctx.uniform_matrix(self.sky_uniforms.model.as_ref(), &self.model_matrix(Motion::SkySpin, frame, world.star_position));
        self.ctx.uniform_matrix(self.sky_uniforms.view.as_ref(), view);
        self.ctx.uniform_matrix(self.sky_uniforms.projection.as_ref(), projection);
        self.ctx.uniform_1f(self.sky_uniforms.time.as_ref(), frame.time);
        self.draw_mesh(&world.sky);

        gl.use_program(Some(&self.star_program));
        self.ctx.uniform_matrix(self.star_uniforms.model.as_ref(), &self.model_matrix(Motion::StarPulse, frame, world.star_position));
        self.ctx.uniform_matrix(self.star_uniforms.view.as_ref(), view);
        self.ctx.uniform_matrix(self.star_uniforms.projection.as_ref(), projection);
        self.ctx.uniform_color(self.star_uniforms.color.as_ref(), world.star_color);
        self.ctx.uniform_color(self.star_uniforms.fog_color.as_ref(), self.fog_color);
        self.ctx.uniform_1f(self.star_uniforms.fog_density.as_ref(), FOG_DENSITY);
        self.draw_mesh(&world.star_body);

        // === Lines: star outline opaque, trunk additive ===
        gl.use_program(Some(&self.line_program));
        self.ctx.uniform_matrix(self.line_uniforms.view.as_ref(), view);
        self.ctx.uniform_matrix(self.line_uniforms.projection.as_ref(), projection);
        self.ctx.uniform_color(self.line_uniforms.fog_color.as_ref(), self.fog_color);
        self.ctx.uniform_1f(self.line_uniforms.fog_density.as_ref(), FOG_DENSITY);

        for group in &world.lines {
            if group.opacity < 1.0 {
                self.ctx.additive_state();
            } else {
                self.ctx.opaque_state();
            }
            self.ctx.uniform_matrix(self.line_uniforms.model.as_ref(), &self.model_matrix(group.motion, frame, world.star_position));
            self.ctx.uniform_1f(self.line_uniforms.opacity.as_ref(), group.opacity);
            gl.bind_vertex_array(Some(&group.gpu.vao));
            gl.draw_arrays(WebGl2RenderingContext::LINES, 0, group.gpu.count);
        }

        // === Additive glowing points ===
        self.ctx.additive_state();
        gl.use_program(Some(&self.point_program));
        self.ctx.uniform_matrix(self.point_uniforms.view.as_ref(), view);
        self.ctx.uniform_matrix(self.point_uniforms.projection.as_ref(), projection);
        self.ctx.uniform_1f(self.point_uniforms.point_scale.as_ref(), self.point_scale());
        self.ctx.uniform_color(self.point_uniforms.fog_color.as_ref(), self.fog_color);
        self.ctx.uniform_1f(self.point_uniforms.fog_density.as_ref(), FOG_DENSITY);

        for group in &world.points {
            if group.gpu.count == 0 {
                continue;
            }
            self.ctx.uniform_matrix(self.point_uniforms.model.as_ref(), &self.model_matrix(group.motion, frame, world.star_position));
            self.ctx.uniform_1f(self.point_uniforms.size.as_ref(), group.size);
            self.ctx.uniform_1f(self.point_uniforms.opacity.as_ref(), group.opacity);
            gl.bind_vertex_array(Some(&group.gpu.vao));
            gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, group.gpu.count);
        }

        gl.bind_vertex_array(None);
    }

    fn draw_text(&self, frame: &FrameUpdate, view: &Mat4, projection: &Mat4) {
        let Some(text) = &self.text else {
            return;
        };
        if text.gpu.count == 0 {
            return;
        }
        let gl = &self.ctx.gl;

        self.ctx.additive_state();
        gl.use_program(Some(&self.text_program));
        self.ctx.uniform_matrix(self.text_uniforms.view.as_ref(), view);
        self.ctx.uniform_matrix(self.text_uniforms.projection.as_ref(), projection);
        self.ctx.uniform_1f(self.text_uniforms.point_scale.as_ref(), self.point_scale());
        self.ctx.uniform_1f(self.text_uniforms.time.as_ref(), frame.time);
        self.ctx.uniform_1f(self.text_uniforms.brightness.as_ref(), text.brightness);
        self.ctx.uniform_1f(self.text_uniforms.saturation.as_ref(), text.saturation);
        self.ctx.uniform_1f(self.text_uniforms.twinkle_speed.as_ref(), text.twinkle_speed);
        self.ctx.uniform_1f(self.text_uniforms.glow_intensity.as_ref(), text.glow_intensity);

        gl.bind_vertex_array(Some(&text.gpu.vao));
        gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, text.gpu.count);
        gl.bind_vertex_array(None);
    }

    fn draw_mesh(&self, mesh: &GpuMesh) {
        let gl = &self.ctx.gl;
        gl.bind_vertex_array(Some(&mesh.vao));
        gl.draw_elements_with_i32(
            WebGl2RenderingContext::TRIANGLES,
            mesh.index_count,
            WebGl2RenderingContext::UNSIGNED_INT,
            0,
        );
    }

    /// Pixels per world unit of point size at unit depth
    fn point_scale(&self) -> f32 {
        self.height as f32 / 2.0
    }

    /// Only the viewport and the stored size change
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.ctx.viewport(0, 0, width, height);
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

/// The framebuffer holds display values, so clears use the raw sRGB channels
fn display_rgb(hex: u32) -> [f32; 3] {
    [16, 8, 0].map(|shift| ((hex >> shift) & 0xff) as f32 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rgb() {
        let [r, g, b] = display_rgb(BACKGROUND);
        assert!((r - 5.0 / 255.0).abs() < 1e-6);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!(Color::from_hex(BACKGROUND).r < r);
    }
}
