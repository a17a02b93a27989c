//! Turns recorded draw commands into triangle lists.
//!
//! Fills are fanned from the shape origin (every filled outline is
//! star-shaped around it), strokes become one quad per segment and discs a
//! fixed-segment fan. Glow is a feathered band around the outline whose
//! alpha falls to zero over the blur radius; it is drawn additively in its
//! own list so halos brighten each other.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::color::Rgba;
use crate::draw::{DrawCommand, DrawList};
use crate::shapes::{Outline, Paint};

/// Segments used to approximate a disc.
const DISC_SEGMENTS: usize = 32;

/// Alpha of the glow band at the outline, relative to the shape alpha.
const GLOW_STRENGTH: f32 = 0.6;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn new(position: Vec2, color: Rgba) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Triangle lists for one frame.
#[derive(Debug, Default)]
pub struct Mesh {
    /// Additive halo geometry.
    pub glow: Vec<Vertex>,
    /// Shape geometry, alpha blended over the glow.
    pub shapes: Vec<Vertex>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from `list`, reusing the allocations.
    pub fn build(&mut self, list: &DrawList) {
        self.glow.clear();
        self.shapes.clear();
        for command in list.commands() {
            self.push(command);
        }
    }

    fn push(&mut self, cmd: &DrawCommand) {
        match &cmd.outline {
            Outline::Disc { radius } => {
                let ring = disc_ring(*radius);
                fill(&mut self.shapes, cmd, &ring, cmd.color);
                if let Some(glow) = cmd.glow {
                    fill_glow(&mut self.glow, cmd, &ring, glow.blur, glow.color);
                }
            }
            Outline::Path { path, paint } => match *paint {
                Paint::Fill => {
                    fill(&mut self.shapes, cmd, &path.points, cmd.color);
                    if let Some(glow) = cmd.glow {
                        fill_glow(&mut self.glow, cmd, &path.points, glow.blur, glow.color);
                    }
                }
                Paint::Stroke { width } => {
                    for (a, b) in segments(&path.points, path.closed) {
                        stroke_segment(&mut self.shapes, cmd, a, b, width, cmd.color);
                        if let Some(glow) = cmd.glow {
                            stroke_glow(&mut self.glow, cmd, a, b, width, glow.blur, glow.color);
                        }
                    }
                }
            },
        }
    }
}

fn disc_ring(radius: f32) -> Vec<Vec2> {
    let step = std::f32::consts::TAU / DISC_SEGMENTS as f32;
    (0..DISC_SEGMENTS)
        .map(|i| Vec2::from_angle(step * i as f32) * radius)
        .collect()
}

/// Consecutive point pairs, including the closing edge when `closed`.
fn segments(points: &[Vec2], closed: bool) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let closing = if closed && points.len() > 2 {
        points.last().copied().zip(points.first().copied())
    } else {
        None
    };
    points.windows(2).map(|w| (w[0], w[1])).chain(closing)
}

fn fill(out: &mut Vec<Vertex>, cmd: &DrawCommand, ring: &[Vec2], color: Rgba) {
    let center = Vertex::new(cmd.center, color);
    for (a, b) in segments(ring, true) {
        out.push(center);
        out.push(Vertex::new(cmd.to_surface(a), color));
        out.push(Vertex::new(cmd.to_surface(b), color));
    }
}

fn fill_glow(out: &mut Vec<Vertex>, cmd: &DrawCommand, ring: &[Vec2], blur: f32, color: Rgba) {
    let inner_color = color.with_alpha(color.a * GLOW_STRENGTH);
    let outer_color = color.with_alpha(0.0);
    let outward = |p: Vec2| p + p.normalize_or_zero() * blur;
    for (a, b) in segments(ring, true) {
        quad(
            out,
            [
                Vertex::new(cmd.to_surface(a), inner_color),
                Vertex::new(cmd.to_surface(b), inner_color),
                Vertex::new(cmd.to_surface(outward(b)), outer_color),
                Vertex::new(cmd.to_surface(outward(a)), outer_color),
            ],
        );
    }
}

fn stroke_segment(out: &mut Vec<Vertex>, cmd: &DrawCommand, a: Vec2, b: Vec2, width: f32, color: Rgba) {
    let Some(normal) = segment_normal(a, b) else {
        return;
    };
    let offset = normal * (width * 0.5);
    quad(
        out,
        [
            Vertex::new(cmd.to_surface(a + offset), color),
            Vertex::new(cmd.to_surface(b + offset), color),
            Vertex::new(cmd.to_surface(b - offset), color),
            Vertex::new(cmd.to_surface(a - offset), color),
        ],
    );
}

fn stroke_glow(
    out: &mut Vec<Vertex>,
    cmd: &DrawCommand,
    a: Vec2,
    b: Vec2,
    width: f32,
    blur: f32,
    color: Rgba,
) {
    let Some(normal) = segment_normal(a, b) else {
        return;
    };
    let inner_color = color.with_alpha(color.a * GLOW_STRENGTH);
    let outer_color = color.with_alpha(0.0);
    let reach = width * 0.5 + blur;
    for side in [normal, -normal] {
        let edge = side * reach;
        quad(
            out,
            [
                Vertex::new(cmd.to_surface(a), inner_color),
                Vertex::new(cmd.to_surface(b), inner_color),
                Vertex::new(cmd.to_surface(b + edge), outer_color),
                Vertex::new(cmd.to_surface(a + edge), outer_color),
            ],
        );
    }
}

fn segment_normal(a: Vec2, b: Vec2) -> Option<Vec2> {
    (b - a).try_normalize().map(|d| d.perp())
}

/// Two triangles covering the quad `v0 v1 v2 v3`.
fn quad(out: &mut Vec<Vertex>, [v0, v1, v2, v3]: [Vertex; 4]) {
    out.extend_from_slice(&[v0, v1, v2, v0, v2, v3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Glow, Surface};
    use crate::shapes::Shape;

    fn command(shape: Shape) -> DrawCommand {
        let color = Rgba::new(1.0, 0.5, 0.25, 0.8);
        DrawCommand {
            center: Vec2::new(50.0, 50.0),
            rotation: 0.3,
            outline: shape.outline(10.0, 0.0),
            color,
            glow: shape.glow_blur().map(|blur| Glow { blur, color }),
        }
    }

    fn mesh_of(shape: Shape) -> Mesh {
        let mut list = DrawList::new(100, 100);
        list.draw(command(shape));
        let mut mesh = Mesh::new();
        mesh.build(&list);
        mesh
    }

    #[test]
    fn test_vertex_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::layout().array_stride, 24);
    }

    #[test]
    fn test_star_fan_and_glow_band() {
        let mesh = mesh_of(Shape::Star);
        // 10 outline points: one fan triangle and one glow quad per edge
        assert_eq!(mesh.shapes.len(), 10 * 3);
        assert_eq!(mesh.glow.len(), 10 * 6);
        assert!(mesh.glow.iter().any(|v| v.color[3] == 0.0));
    }

    #[test]
    fn test_open_stroke_has_no_closing_edge() {
        let mesh = mesh_of(Shape::Wave);
        // 17 points make 16 segments
        assert_eq!(mesh.shapes.len(), 16 * 6);
        assert_eq!(mesh.glow.len(), 16 * 12);
    }

    #[test]
    fn test_closed_stroke_wraps() {
        let mesh = mesh_of(Shape::Burst);
        assert_eq!(mesh.shapes.len(), 12 * 6);
    }

    #[test]
    fn test_disc_without_glow() {
        let mesh = mesh_of(Shape::Circle);
        assert_eq!(mesh.shapes.len(), DISC_SEGMENTS * 3);
        assert!(mesh.glow.is_empty());
    }

    #[test]
    fn test_geometry_stays_near_center() {
        let mesh = mesh_of(Shape::Hexagon);
        let reach = 10.0 + 15.0 + 1e-3;
        for v in mesh.shapes.iter().chain(&mesh.glow) {
            let p = Vec2::from_array(v.position);
            assert!(p.distance(Vec2::new(50.0, 50.0)) <= reach);
        }
    }

    #[test]
    fn test_rebuild_reuses_buffers() {
        let mut list = DrawList::new(100, 100);
        list.draw(command(Shape::Flame));
        let mut mesh = Mesh::new();
        mesh.build(&list);
        let first = mesh.shapes.len();
        mesh.build(&list);
        assert_eq!(mesh.shapes.len(), first);

        list.clear();
        mesh.build(&list);
        assert!(mesh.shapes.is_empty() && mesh.glow.is_empty());
    }
}
