//! WGSL sources for the trail and composite passes.

/// Geometry and fade shader, drawn into the persistent trail texture.
///
/// `vs_main`/`fs_main` draw tessellated shapes in pixel coordinates with
/// straight-alpha vertex colors, premultiplying in the fragment stage.
/// `vs_fade`/`fs_fade` draw a full-screen triangle whose alpha is the fade
/// amount; the pipeline blends it as `dst * (1 - fade)`.
pub const GEOMETRY_SHADER: &str = r#"
struct Screen {
    size: vec2<f32>,
    fade: f32,
    _pad: f32,
};

@group(0) @binding(0)
var<uniform> screen: Screen;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    let ndc = position / screen.size * 2.0 - 1.0;
    out.clip_position = vec4<f32>(ndc.x, -ndc.y, 0.0, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color.rgb * in.color.a, in.color.a);
}

@vertex
fn vs_fade(@builtin(vertex_index) index: u32) -> @builtin(position) vec4<f32> {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    return vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
}

@fragment
fn fs_fade() -> @location(0) vec4<f32> {
    return vec4<f32>(0.0, 0.0, 0.0, screen.fade);
}
"#;

/// Composite shader: paints the background gradient and lays the trail
/// texture over it.
///
/// Gradients follow CSS conventions. Linear gradients use a gradient line
/// through the center whose length makes the corners land on the first and
/// last stop; radial gradients reach the last stop at the farthest corner.
/// Stops are spaced evenly.
pub const COMPOSITE_SHADER: &str = r#"
const KIND_SOLID: u32 = 0u;
const KIND_LINEAR: u32 = 1u;
const KIND_RADIAL: u32 = 2u;

struct Background {
    stops: array<vec4<f32>, 4>,
    size: vec2<f32>,
    angle: f32,
    kind: u32,
    stop_count: u32,
};

@group(0) @binding(0)
var<uniform> background: Background;

@group(0) @binding(1)
var trail: texture_2d<f32>;

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> @builtin(position) vec4<f32> {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    return vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
}

fn gradient_t(pixel: vec2<f32>) -> f32 {
    let offset = pixel - background.size * 0.5;
    if background.kind == KIND_LINEAR {
        let dir = vec2<f32>(sin(background.angle), -cos(background.angle));
        let span = abs(background.size.x * dir.x) + abs(background.size.y * dir.y);
        return dot(offset, dir) / max(span, 1.0) + 0.5;
    }
    if background.kind == KIND_RADIAL {
        let corner = length(background.size * 0.5);
        return length(offset) / max(corner, 1.0);
    }
    return 0.0;
}

fn stop_color(t: f32) -> vec3<f32> {
    let count = max(background.stop_count, 1u);
    if count == 1u {
        return background.stops[0].rgb;
    }
    let scaled = clamp(t, 0.0, 1.0) * f32(count - 1u);
    let i = min(u32(floor(scaled)), count - 2u);
    let f = scaled - f32(i);
    return mix(background.stops[i].rgb, background.stops[i + 1u].rgb, f);
}

@fragment
fn fs_main(@builtin(position) frag: vec4<f32>) -> @location(0) vec4<f32> {
    let bg = stop_color(gradient_t(frag.xy));
    let texel = textureLoad(trail, vec2<i32>(frag.xy), 0);
    return vec4<f32>(texel.rgb + bg * (1.0 - texel.a), 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(code: &str) {
        let module = naga::front::wgsl::parse_str(code)
            .unwrap_or_else(|e| panic!("WGSL parse error: {}", e.emit_to_string(code)));
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        if let Err(e) = validator.validate(&module) {
            panic!("WGSL validation error: {:?}", e);
        }
    }

    #[test]
    fn test_geometry_shader_is_valid() {
        validate(GEOMETRY_SHADER);
    }

    #[test]
    fn test_composite_shader_is_valid() {
        validate(COMPOSITE_SHADER);
    }
}
