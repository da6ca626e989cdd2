//! Frame timing for the host loop.

use std::time::{Duration, Instant};

/// Tracks elapsed time, per-frame delta, frame count, and a periodically
/// refreshed FPS figure.
///
/// The simulation itself advances by whole frames, not wall time; this
/// clock exists for the host loop (FPS in the window title) rather than
/// for integration.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Advance the clock one frame. Call once per redraw.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }
    }

    /// Seconds since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Seconds between the last two frames.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames counted so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_clock() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_update_advances() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        clock.update();

        assert_eq!(clock.frame(), 1);
        assert!(clock.delta() > 0.0);
        assert!(clock.elapsed() > 0.0);
    }

    #[test]
    fn test_fps_refreshes_after_interval() {
        let mut clock = FrameClock::new();
        clock.fps_update_interval = Duration::from_millis(1);

        clock.update();
        thread::sleep(Duration::from_millis(5));
        clock.update();

        assert!(clock.fps() > 0.0);
    }
}
