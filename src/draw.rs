//! Drawing surface abstraction.
//!
//! The particle engine renders by emitting one [`DrawCommand`] per particle
//! into a [`Surface`]. [`DrawList`] is the surface the window uses: it
//! records a frame's commands, which the GPU renderer then tessellates.

use glam::Vec2;

use crate::color::Rgba;
use crate::shapes::Outline;

/// Soft glow drawn around a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Blur radius in pixels.
    pub blur: f32,
    /// Glow color, normally the shape color.
    pub color: Rgba,
}

/// One shape to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Position in surface pixels.
    pub center: Vec2,
    /// Rotation in radians applied to the outline.
    pub rotation: f32,
    /// Local-space geometry.
    pub outline: Outline,
    /// Fill or stroke color.
    pub color: Rgba,
    /// Optional glow.
    pub glow: Option<Glow>,
}

impl DrawCommand {
    /// Map a local outline point into surface space.
    #[inline]
    pub fn to_surface(&self, local: Vec2) -> Vec2 {
        self.center + Vec2::from_angle(self.rotation).rotate(local)
    }
}

/// Something particles can be drawn onto.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Draw one shape.
    fn draw(&mut self, command: DrawCommand);
}

/// A surface that records draw commands for one frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty list for a surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Update the surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Drop all recorded commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded commands in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn disc(center: Vec2, rotation: f32) -> DrawCommand {
        DrawCommand {
            center,
            rotation,
            outline: Outline::Disc { radius: 2.0 },
            color: Rgba::new(1.0, 1.0, 1.0, 1.0),
            glow: None,
        }
    }

    #[test]
    fn test_draw_list_records_and_clears() {
        let mut list = DrawList::new(640, 480);
        list.draw(disc(Vec2::ZERO, 0.0));
        list.draw(disc(Vec2::ONE, 0.0));
        assert_eq!(list.len(), 2);
        assert_eq!(list.commands()[1].center, Vec2::ONE);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.size(), (640, 480));

        list.resize(100, 50);
        assert_eq!(list.size(), (100, 50));
    }

    #[test]
    fn test_to_surface_rotates_then_translates() {
        let cmd = disc(Vec2::new(10.0, 10.0), FRAC_PI_2);
        let p = cmd.to_surface(Vec2::new(1.0, 0.0));
        assert!((p - Vec2::new(10.0, 11.0)).length() < 1e-5);
    }
}
