/// Vertex shader for glowing point groups (foliage, snow, galaxies, halo)
pub const POINTS_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_color;
layout(location = 2) in float a_size;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_size;
uniform float u_point_scale;

out vec3 v_color;
out float v_depth;

void main() {
    vec4 view_pos = u_view * u_model * vec4(a_position, 1.0);
    v_color = a_color;
    v_depth = -view_pos.z;

    gl_Position = u_projection * view_pos;
    // Perspective size attenuation
    gl_PointSize = a_size * u_size * (u_point_scale / -view_pos.z);
}
"#;

/// Fragment shader for glowing point groups
pub const POINTS_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_color;
in float v_depth;

uniform float u_opacity;
uniform vec3 u_fog_color;
uniform float u_fog_density;

out vec4 fragColor;

// Radial glow sprite: 1.0 at the centre, 0.8 at 20%, 0.2 at 50%, 0.0 at the rim
float glow(float d) {
    if (d < 0.2) return mix(1.0, 0.8, d / 0.2);
    if (d < 0.5) return mix(0.8, 0.2, (d - 0.2) / 0.3);
    return mix(0.2, 0.0, (d - 0.5) / 0.5);
}

vec3 linear_to_srgb(vec3 c) {
    return mix(c * 12.92, 1.055 * pow(c, vec3(1.0 / 2.4)) - 0.055, step(vec3(0.0031308), c));
}

void main() {
    float d = length(gl_PointCoord - vec2(0.5)) * 2.0;
    if (d > 1.0) {
        discard;
    }

    float fog = 1.0 - exp(-u_fog_density * u_fog_density * v_depth * v_depth);
    vec3 color = mix(v_color, u_fog_color, fog);

    fragColor = vec4(linear_to_srgb(color), glow(d) * u_opacity);
}
"#;

/// Vertex shader for colored line segments (trunk, star outline)
pub const LINES_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_color;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_color;
out float v_depth;

void main() {
    vec4 view_pos = u_view * u_model * vec4(a_position, 1.0);
    v_color = a_color;
    v_depth = -view_pos.z;
    gl_Position = u_projection * view_pos;
}
"#;

/// Fragment shader for line segments
pub const LINES_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_color;
in float v_depth;

uniform float u_opacity;
uniform vec3 u_fog_color;
uniform float u_fog_density;

out vec4 fragColor;

vec3 linear_to_srgb(vec3 c) {
    return mix(c * 12.92, 1.055 * pow(c, vec3(1.0 / 2.4)) - 0.055, step(vec3(0.0031308), c));
}

void main() {
    float fog = 1.0 - exp(-u_fog_density * u_fog_density * v_depth * v_depth);
    vec3 color = mix(v_color, u_fog_color, fog);
    fragColor = vec4(linear_to_srgb(color), u_opacity);
}
"#;

/// Vertex shader for the star body
pub const STAR_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;
out float v_depth;

void main() {
    vec4 view_pos = u_view * u_model * vec4(a_position, 1.0);
    v_normal = mat3(u_model) * a_normal;
    v_depth = -view_pos.z;
    gl_Position = u_projection * view_pos;
}
"#;

/// Fragment shader for the star body: flat color with a faint facet shade
pub const STAR_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in float v_depth;

uniform vec3 u_color;
uniform vec3 u_fog_color;
uniform float u_fog_density;

out vec4 fragColor;

vec3 linear_to_srgb(vec3 c) {
    return mix(c * 12.92, 1.055 * pow(c, vec3(1.0 / 2.4)) - 0.055, step(vec3(0.0031308), c));
}

void main() {
    vec3 light_dir = normalize(vec3(0.3, 0.5, 1.0));
    float shade = 0.85 + 0.15 * max(dot(normalize(v_normal), light_dir), 0.0);

    float fog = 1.0 - exp(-u_fog_density * u_fog_density * v_depth * v_depth);
    vec3 color = mix(u_color * shade, u_fog_color, fog);

    fragColor = vec4(linear_to_srgb(color), 1.0);
}
"#;

/// Vertex shader for the starfield sky sphere
pub const SKY_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_direction;

void main() {
    v_direction = a_normal;
    gl_Position = u_projection * u_view * u_model * vec4(a_position, 1.0);
}
"#;

/// Fragment shader for the starfield: hashed cells, each holding at most one twinkling star
pub const SKY_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_direction;

uniform float u_time;

out vec4 fragColor;

float hash(vec3 p) {
    p = fract(p * vec3(443.897, 441.423, 437.195));
    p += dot(p, p.yxz + 19.19);
    return fract((p.x + p.y) * p.z);
}

void main() {
    vec3 dir = normalize(v_direction);
    vec3 cell = floor(dir * 180.0);
    vec3 local = fract(dir * 180.0) - 0.5;

    float h = hash(cell);
    float star = 0.0;
    if (h > 0.985) {
        float size = 0.15 + 0.2 * hash(cell + 7.0);
        star = 1.0 - smoothstep(0.0, size, length(local));
        star *= 0.6 + 0.4 * sin(u_time * (1.0 + 3.0 * hash(cell + 3.0)) + h * 40.0);
    }

    vec3 tint = mix(vec3(0.8, 0.9, 1.0), vec3(1.0, 0.9, 0.8), hash(cell + 11.0));
    vec3 color = vec3(0.0196) + tint * star;

    fragColor = vec4(color, 1.0);
}
"#;

/// Vertex shader for the text overlay points
pub const TEXT_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_color;
layout(location = 2) in float a_size;
layout(location = 3) in float a_phase;

uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_point_scale;

out vec3 v_color;
out float v_seed;

void main() {
    vec4 view_pos = u_view * vec4(a_position, 1.0);
    v_color = a_color;
    // Per-point seed that does not move with the point
    v_seed = fract(sin(float(gl_VertexID) * 12.9898) * 43758.5453) * 6.2831853 + a_phase;

    gl_Position = u_projection * view_pos;
    gl_PointSize = a_size * (u_point_scale / -view_pos.z);
}
"#;

/// Fragment shader for the text overlay: saturated, twinkling, glowing
pub const TEXT_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_color;
in float v_seed;

uniform float u_time;
uniform float u_brightness;
uniform float u_saturation;
uniform float u_twinkle_speed;
uniform float u_glow_intensity;

out vec4 fragColor;

float glow(float d) {
    if (d < 0.2) return mix(1.0, 0.8, d / 0.2);
    if (d < 0.5) return mix(0.8, 0.2, (d - 0.2) / 0.3);
    return mix(0.2, 0.0, (d - 0.5) / 0.5);
}

vec3 linear_to_srgb(vec3 c) {
    return mix(c * 12.92, 1.055 * pow(c, vec3(1.0 / 2.4)) - 0.055, step(vec3(0.0031308), c));
}

void main() {
    float d = length(gl_PointCoord - vec2(0.5)) * 2.0;
    if (d > 1.0) {
        discard;
    }
    float a = glow(d);

    vec3 color = v_color * u_brightness;
    float luma = dot(color, vec3(0.2126, 0.7152, 0.0722));
    color = max(mix(vec3(luma), color, u_saturation), 0.0);

    float twinkle = 0.75 + 0.25 * sin(u_time * u_twinkle_speed + v_seed);
    color = color * twinkle + color * u_glow_intensity * a;

    fragColor = vec4(linear_to_srgb(color), a);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [&str; 10] = [
        POINTS_VERTEX_SHADER,
        POINTS_FRAGMENT_SHADER,
        LINES_VERTEX_SHADER,
        LINES_FRAGMENT_SHADER,
        STAR_VERTEX_SHADER,
        STAR_FRAGMENT_SHADER,
        SKY_VERTEX_SHADER,
        SKY_FRAGMENT_SHADER,
        TEXT_VERTEX_SHADER,
        TEXT_FRAGMENT_SHADER,
    ];

    #[test]
    fn test_shader_version() {
        for source in ALL {
            assert!(source.starts_with("#version 300 es"));
        }
    }

    #[test]
    fn test_lit_output_is_srgb_encoded() {
        for source in [POINTS_FRAGMENT_SHADER, LINES_FRAGMENT_SHADER, STAR_FRAGMENT_SHADER, TEXT_FRAGMENT_SHADER] {
            assert!(source.contains("linear_to_srgb("));
        }
    }
}
