//! Pointer input for glowtrail effects.
//!
//! [`Input`] turns raw window events into [`PointerEvent`]s (the only thing
//! the particle engine cares about) and tracks where the pointer currently
//! is, which the engine uses for attraction every tick.
//!
//! | Window event | Pointer event |
//! |--------------|---------------|
//! | cursor moved | [`PointerKind::Move`] |
//! | left button pressed | [`PointerKind::Press`] |
//! | touch started | [`PointerKind::Press`] |
//! | touch moved | [`PointerKind::Drag`] |

use glam::Vec2;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// The cursor moved.
    Move,
    /// A button was pressed or a finger touched down.
    Press,
    /// A finger moved while touching.
    Drag,
}

/// A pointer event in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Where it happened.
    pub position: Vec2,
}

impl PointerEvent {
    /// Create an event at `position`.
    pub fn new(kind: PointerKind, position: Vec2) -> Self {
        Self { kind, position }
    }
}

/// Pointer state tracking.
///
/// Only the first touch is followed; additional fingers are ignored until
/// it lifts.
#[derive(Debug)]
pub struct Input {
    pointer: Vec2,
    active_touch: Option<u64>,
    pending: Vec<PointerEvent>,
}

impl Input {
    /// Create a tracker with the pointer resting at the window center.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pointer: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
            active_touch: None,
            pending: Vec::new(),
        }
    }

    /// Current pointer position in window pixels.
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Take all events recorded since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, PointerEvent> {
        self.pending.drain(..)
    }

    /// Record a cursor move.
    pub fn cursor_moved(&mut self, position: Vec2) {
        self.push(PointerKind::Move, position);
    }

    /// Record a mouse button change. Only the left button spawns.
    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left && state == ElementState::Pressed {
            self.push(PointerKind::Press, self.pointer);
        }
    }

    /// Record a touch update for finger `id`.
    pub fn touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        match phase {
            TouchPhase::Started => {
                if self.active_touch.is_none() {
                    self.active_touch = Some(id);
                    self.push(PointerKind::Press, position);
                }
            }
            TouchPhase::Moved => {
                if self.active_touch == Some(id) {
                    self.push(PointerKind::Drag, position);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active_touch == Some(id) {
                    self.active_touch = None;
                }
            }
        }
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_button(*button, *state);
            }
            WindowEvent::Touch(touch) => {
                let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                self.touch(touch.id, touch.phase, position);
            }
            _ => {}
        }
    }

    fn push(&mut self, kind: PointerKind, position: Vec2) {
        self.pointer = position;
        self.pending.push(PointerEvent::new(kind, position));
    }
}
