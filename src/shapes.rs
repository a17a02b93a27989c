//! Particle shapes and their outlines.
//!
//! Every shape is a pure function of `size` and the particle's `angle`
//! (used as a drawing phase). Outlines are produced in local space around
//! the origin; the renderer applies the particle rotation and position.
//!
//! | Shape | Geometry | Paint | Glow |
//! |-------|----------|-------|------|
//! | [`Shape::Star`] | 5 spikes, inner radius 0.4 | fill | 20 |
//! | [`Shape::Flame`] | two quadratic curves | fill | 20 |
//! | [`Shape::Wave`] | one sine period | stroke 2.0 | 10 |
//! | [`Shape::Spiral`] | two-turn Archimedean spiral | stroke 1.5 | 10 |
//! | [`Shape::Hexagon`] | regular hexagon | fill | 15 |
//! | [`Shape::Flower`] | `r = size * (1 + sin 4θ) / 2` | fill | 12 |
//! | [`Shape::Burst`] | 12 alternating radii | stroke 1.5 | 15 |
//! | [`Shape::Circle`] | disc | fill | none |

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Segments used when flattening each quadratic curve of a flame.
const FLAME_SEGMENTS: usize = 8;
/// Points sampled along a wave.
const WAVE_POINTS: usize = 17;
/// Points sampled along a spiral.
const SPIRAL_POINTS: usize = 48;

/// Particle shape.
///
/// A closed set: every variant has exactly one outline generator in
/// [`Shape::outline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// 5-pointed star.
    #[default]
    Star,
    /// Teardrop flame.
    Flame,
    /// Single sine period.
    Wave,
    /// Two-turn spiral.
    Spiral,
    /// Regular hexagon.
    Hexagon,
    /// Four-petal rose curve sampled at 8 points.
    Flower,
    /// 12-point starburst outline.
    Burst,
    /// Plain disc, drawn without glow.
    Circle,
}

impl Shape {
    /// All shapes, in declaration order.
    pub const ALL: [Shape; 8] = [
        Shape::Star,
        Shape::Flame,
        Shape::Wave,
        Shape::Spiral,
        Shape::Hexagon,
        Shape::Flower,
        Shape::Burst,
        Shape::Circle,
    ];

    /// Build the outline of this shape for a particle of the given `size`.
    ///
    /// `angle` is the particle's heading, used as a phase by the shapes that
    /// animate with it (flower, burst, hexagon, wave, spiral).
    pub fn outline(self, size: f32, angle: f32) -> Outline {
        match self {
            Shape::Star => Outline::fill(star(5, size, size * 0.4)),
            Shape::Flame => Outline::fill(flame(size)),
            Shape::Wave => Outline::stroke(wave(size, angle), 2.0),
            Shape::Spiral => Outline::stroke(spiral(size, angle), 1.5),
            Shape::Hexagon => Outline::fill(polygon(6, size, angle)),
            Shape::Flower => Outline::fill(flower(size, angle)),
            Shape::Burst => Outline::stroke(burst(size, angle), 1.5),
            Shape::Circle => Outline::Disc { radius: size },
        }
    }

    /// Glow blur radius in pixels, or `None` for shapes drawn flat.
    pub fn glow_blur(self) -> Option<f32> {
        match self {
            Shape::Star | Shape::Flame => Some(20.0),
            Shape::Burst | Shape::Hexagon => Some(15.0),
            Shape::Flower => Some(12.0),
            Shape::Wave | Shape::Spiral => Some(10.0),
            Shape::Circle => None,
        }
    }
}

/// How a path is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Fill the interior.
    Fill,
    /// Stroke the path with the given line width in pixels.
    Stroke {
        /// Line width in pixels.
        width: f32,
    },
}

/// A polyline in local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Vertices in drawing order.
    pub points: Vec<Vec2>,
    /// Whether the last point connects back to the first.
    pub closed: bool,
}

/// Local-space geometry for one particle.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// A path painted as fill or stroke.
    Path {
        /// The vertices.
        path: Path,
        /// Fill or stroke.
        paint: Paint,
    },
    /// A filled disc centred on the origin.
    Disc {
        /// Disc radius in pixels.
        radius: f32,
    },
}

impl Outline {
    fn fill(points: Vec<Vec2>) -> Self {
        Outline::Path {
            path: Path { points, closed: true },
            paint: Paint::Fill,
        }
    }

    fn stroke(path: Path, width: f32) -> Self {
        Outline::Path {
            path,
            paint: Paint::Stroke { width },
        }
    }

    /// Largest distance of any outline point from the origin.
    pub fn extent(&self) -> f32 {
        match self {
            Outline::Path { path, .. } => path
                .points
                .iter()
                .map(|p| p.length())
                .fold(0.0, f32::max),
            Outline::Disc { radius } => *radius,
        }
    }
}

/// Star with `spikes` points, starting straight up and alternating
/// between the outer and inner radius every `π / spikes`.
fn star(spikes: usize, outer: f32, inner: f32) -> Vec<Vec2> {
    let step = PI / spikes as f32;
    let start = 3.0 * FRAC_PI_2;
    (0..spikes * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            Vec2::from_angle(start + step * i as f32) * radius
        })
        .collect()
}

/// Teardrop: from the bottom tip, bulge left up to the top tip, then
/// bulge right back down.
fn flame(size: f32) -> Vec<Vec2> {
    let bottom = Vec2::new(0.0, size);
    let top = Vec2::new(0.0, -size * 1.2);
    let left = Vec2::new(-size * 0.5, 0.0);
    let right = Vec2::new(size * 0.5, 0.0);

    let mut points = Vec::with_capacity(FLAME_SEGMENTS * 2);
    for i in 0..FLAME_SEGMENTS {
        points.push(quadratic(bottom, left, top, i as f32 / FLAME_SEGMENTS as f32));
    }
    for i in 0..FLAME_SEGMENTS {
        points.push(quadratic(top, right, bottom, i as f32 / FLAME_SEGMENTS as f32));
    }
    points
}

fn quadratic(from: Vec2, control: Vec2, to: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    from * (u * u) + control * (2.0 * u * t) + to * (t * t)
}

fn wave(size: f32, phase: f32) -> Path {
    let points = (0..WAVE_POINTS)
        .map(|i| {
            let u = 2.0 * i as f32 / (WAVE_POINTS - 1) as f32 - 1.0;
            Vec2::new(size * u, 0.35 * size * (PI * u + phase).sin())
        })
        .collect();
    Path { points, closed: false }
}

fn spiral(size: f32, phase: f32) -> Path {
    let points = (0..SPIRAL_POINTS)
        .map(|i| {
            let t = i as f32 / (SPIRAL_POINTS - 1) as f32;
            Vec2::from_angle(phase + t * 2.0 * TAU) * (size * t)
        })
        .collect();
    Path { points, closed: false }
}

/// Regular polygon with `sides` vertices, first vertex at `phase`.
fn polygon(sides: usize, radius: f32, phase: f32) -> Vec<Vec2> {
    let step = TAU / sides as f32;
    (0..sides)
        .map(|i| Vec2::from_angle(phase + step * i as f32) * radius)
        .collect()
}

fn flower(size: f32, phase: f32) -> Vec<Vec2> {
    (0..8)
        .map(|i| {
            let theta = PI / 4.0 * i as f32 + phase;
            let r = size * (1.0 + (theta * 4.0).sin()) * 0.5;
            Vec2::from_angle(theta) * r
        })
        .collect()
}

fn burst(size: f32, phase: f32) -> Path {
    let points = (0..12)
        .map(|i| {
            let theta = PI / 6.0 * i as f32 + phase;
            let r = if i % 2 == 0 { size } else { size * 0.5 };
            Vec2::from_angle(theta) * r
        })
        .collect();
    Path { points, closed: true }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(outline: &Outline) -> &[Vec2] {
        match outline {
            Outline::Path { path, .. } => &path.points,
            Outline::Disc { .. } => &[],
        }
    }

    #[test]
    fn test_star_vertices() {
        let outline = Shape::Star.outline(10.0, 0.0);
        let pts = points(&outline);
        assert_eq!(pts.len(), 10);
        // First spike points straight up (negative y in screen space)
        assert!((pts[0] - Vec2::new(0.0, -10.0)).length() < 1e-4);
        for (i, p) in pts.iter().enumerate() {
            let expected = if i % 2 == 0 { 10.0 } else { 4.0 };
            assert!((p.length() - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_star_ignores_angle() {
        assert_eq!(Shape::Star.outline(8.0, 0.0), Shape::Star.outline(8.0, 1.3));
    }

    #[test]
    fn test_flower_petal_radius() {
        let angle = 0.4;
        let outline = Shape::Flower.outline(12.0, angle);
        let pts = points(&outline);
        assert_eq!(pts.len(), 8);
        for (i, p) in pts.iter().enumerate() {
            let theta = PI / 4.0 * i as f32 + angle;
            let r = 12.0 * (1.0 + (4.0 * theta).sin()) / 2.0;
            assert!((p.length() - r).abs() < 1e-3);
        }
    }

    #[test]
    fn test_burst_alternates_radius() {
        let outline = Shape::Burst.outline(9.0, 0.2);
        let pts = points(&outline);
        assert_eq!(pts.len(), 12);
        assert!((pts[0].length() - 9.0).abs() < 1e-4);
        assert!((pts[1].length() - 4.5).abs() < 1e-4);
        assert!(matches!(outline, Outline::Path { paint: Paint::Stroke { .. }, .. }));
    }

    #[test]
    fn test_hexagon_is_regular() {
        let outline = Shape::Hexagon.outline(5.0, 0.0);
        let pts = points(&outline);
        assert_eq!(pts.len(), 6);
        for i in 0..6 {
            let edge = (pts[(i + 1) % 6] - pts[i]).length();
            assert!((edge - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_flame_tips() {
        let outline = Shape::Flame.outline(10.0, 0.0);
        let pts = points(&outline);
        assert!((pts[0] - Vec2::new(0.0, 10.0)).length() < 1e-4);
        assert!((pts[FLAME_SEGMENTS] - Vec2::new(0.0, -12.0)).length() < 1e-4);
        // Left half bulges left, right half bulges right
        assert!(pts[1..FLAME_SEGMENTS].iter().all(|p| p.x < 0.0));
        assert!(pts[FLAME_SEGMENTS + 1..].iter().all(|p| p.x > 0.0));
    }

    #[test]
    fn test_open_paths() {
        for shape in [Shape::Wave, Shape::Spiral] {
            match shape.outline(6.0, 0.5) {
                Outline::Path { path, paint } => {
                    assert!(!path.closed);
                    assert!(matches!(paint, Paint::Stroke { .. }));
                }
                Outline::Disc { .. } => panic!("{:?} should be a path", shape),
            }
        }
    }

    #[test]
    fn test_spiral_grows_from_center() {
        let outline = Shape::Spiral.outline(10.0, 0.0);
        let pts = points(&outline);
        assert_eq!(pts[0], Vec2::ZERO);
        assert!((pts[pts.len() - 1].length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_outlines_scale_linearly() {
        for shape in Shape::ALL {
            let small = shape.outline(4.0, 0.7).extent();
            let large = shape.outline(8.0, 0.7).extent();
            assert!(small.is_finite() && large.is_finite());
            assert!((large - 2.0 * small).abs() < 1e-3, "{:?}", shape);
        }
    }

    #[test]
    fn test_zero_size_outlines_are_finite() {
        for shape in Shape::ALL {
            let outline = shape.outline(0.0, 1.1);
            assert!(points(&outline).iter().all(|p| p.is_finite()), "{:?}", shape);
            assert_eq!(outline.extent(), 0.0, "{:?}", shape);
        }
    }

    #[test]
    fn test_only_circle_has_no_glow() {
        for shape in Shape::ALL {
            assert_eq!(shape.glow_blur().is_none(), shape == Shape::Circle);
        }
    }

    #[test]
    fn test_shape_serde_names() {
        assert_eq!(serde_json::to_string(&Shape::Hexagon).unwrap(), "\"hexagon\"");
        let s: Shape = serde_json::from_str("\"burst\"").unwrap();
        assert_eq!(s, Shape::Burst);
    }
}
