//! Pointer tracking over the render surface.
//!
//! Wraps raw window events into the one piece of input state the field
//! cares about: where the pointer is, if it is over the surface at all.

use glam::Vec2;
use winit::event::WindowEvent;

/// Tracks the pointer position relative to the surface.
///
/// The position is absent until the pointer first moves over the surface
/// and is cleared again whenever it leaves.
#[derive(Debug, Default)]
pub struct PointerTracker {
    position: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pointer position in physical surface pixels, or `None`
    /// when the pointer is not over the surface.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.position = Some(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.position = None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_absent() {
        let tracker = PointerTracker::new();
        assert!(tracker.position().is_none());
    }

    #[test]
    fn test_move_then_leave() {
        let mut tracker = PointerTracker::new();

        // Simulate a move via direct state (normally set by handle_event).
        tracker.position = Some(Vec2::new(320.0, 240.0));
        assert_eq!(tracker.position(), Some(Vec2::new(320.0, 240.0)));

        tracker.handle_event(&WindowEvent::Destroyed); // unrelated event: no change
        assert!(tracker.position().is_some());

        tracker.position = None;
        assert!(tracker.position().is_none());
    }
}
