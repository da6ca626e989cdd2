//! Windowed host for the field.
//!
//! [`Plexus`] is the builder; [`Plexus::run`] opens a window, sizes the
//! field from the surface, and drives tick + render on every redraw,
//! re-requesting the next redraw so the loop runs continuously. A
//! [`StopSignal`] ends the loop from outside; a close request ends it
//! from the window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::{FieldConfig, Theme};
use crate::error::RunError;
use crate::field::ParticleField;
use crate::frame::Frame;
use crate::gpu::GpuState;
use crate::input::PointerTracker;
use crate::time::FrameClock;

/// Shared flag for stopping the render loop from another thread.
///
/// The loop checks the flag once per frame and exits cleanly when it has
/// been raised.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop after the current frame.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A windowed particle-field backdrop builder.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// # Example
///
/// ```no_run
/// use plexus::Plexus;
///
/// fn main() -> Result<(), plexus::RunError> {
///     Plexus::new().with_title("backdrop").run()
/// }
/// ```
pub struct Plexus {
    config: FieldConfig,
    theme: Theme,
    title: String,
    inner_size: (u32, u32),
    stop: StopSignal,
}

impl Plexus {
    /// Create a builder with the stock field configuration and theme.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            theme: Theme::default(),
            title: "plexus".to_string(),
            inner_size: (1280, 720),
            stop: StopSignal::new(),
        }
    }

    /// Set the field tuning parameters.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the renderer colors.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_inner_size(mut self, width: u32, height: u32) -> Self {
        self.inner_size = (width, height);
        self
    }

    /// Attach a stop signal; raising it ends the loop after the frame in
    /// flight.
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Run the backdrop. Blocks until the window is closed or the stop
    /// signal is raised.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for Plexus {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    field: ParticleField,
    frame: Frame,
    pointer: PointerTracker,
    clock: FrameClock,
    theme: Theme,
    title: String,
    inner_size: (u32, u32),
    stop: StopSignal,
}

impl App {
    fn new(builder: Plexus) -> Self {
        Self {
            window: None,
            gpu: None,
            field: ParticleField::new(builder.config),
            frame: Frame::new(),
            pointer: PointerTracker::new(),
            clock: FrameClock::new(),
            theme: builder.theme,
            title: builder.title,
            inner_size: builder.inner_size,
            stop: builder.stop,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let (width, height) = self.inner_size;
            let window_attrs = Window::default_attributes()
                .with_title(self.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(width, height));

            let window = match event_loop.create_window(window_attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };
            self.window = Some(window.clone());

            match pollster::block_on(GpuState::new(window.clone(), &self.theme)) {
                Ok(gpu) => self.gpu = Some(gpu),
                Err(e) => {
                    eprintln!("GPU initialization failed: {}", e);
                    event_loop.exit();
                    return;
                }
            }

            // Field dimensions come from the measured surface, not the
            // requested logical size.
            let size = window.inner_size();
            self.field.resize(size.width, size.height);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.pointer.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                    // Wholesale regeneration: the dot count follows the
                    // new area and accumulated positions are discarded.
                    self.field.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.stop.is_stopped() {
                    event_loop.exit();
                    return;
                }

                if let Some(gpu) = &mut self.gpu {
                    match self.pointer.position() {
                        Some(position) => self.field.set_pointer(position),
                        None => self.field.clear_pointer(),
                    }

                    self.clock.update();
                    self.field.tick(&mut self.frame);

                    match gpu.render(&self.frame) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                            width: gpu.config.width,
                            height: gpu.config.height,
                        }),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }

                    if let Some(window) = &self.window {
                        if self.clock.frame() % 60 == 0 {
                            window.set_title(&format!(
                                "{} - {:.0} fps - {} dots",
                                self.title,
                                self.clock.fps(),
                                self.field.len()
                            ));
                        }
                        window.request_redraw();
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_signal_round_trip() {
        let stop = StopSignal::new();
        assert!(!stop.is_stopped());

        let shared = stop.clone();
        shared.stop();
        assert!(stop.is_stopped());
    }

    #[test]
    fn test_builder_defaults_are_usable() {
        let builder = Plexus::new();
        assert_eq!(builder.config, FieldConfig::default());
        assert_eq!(builder.theme, Theme::default());

        let app = App::new(builder);
        assert!(app.field.is_empty());
        assert!(app.gpu.is_none());
    }
}
