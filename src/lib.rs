//! # Plexus
//!
//! An interactive particle-field backdrop: drifting dots over a surface,
//! linked by lines whose opacity falls off with distance, with a pointer
//! halo that links nearby dots to the cursor.
//!
//! The simulation is plain CPU state. Dot count follows the surface area
//! (one dot per 10 000 square pixels by default), each dot takes one Euler
//! step per frame and bounces off the surface edges, and every close pair
//! gets a link each frame. Rendering is instanced quads on `wgpu`.
//!
//! ## Quick start
//!
//! ```no_run
//! use plexus::Plexus;
//!
//! fn main() -> Result<(), plexus::RunError> {
//!     Plexus::new().with_title("backdrop").run()
//! }
//! ```
//!
//! ## Driving the field yourself
//!
//! The simulation is usable without the windowed host, for tests or a
//! custom renderer:
//!
//! ```
//! use plexus::{FieldConfig, Frame, ParticleField};
//!
//! let mut field = ParticleField::new(FieldConfig::default());
//! field.resize(1000, 500);
//! assert_eq!(field.len(), 50);
//!
//! let mut frame = Frame::new();
//! field.tick(&mut frame);
//! assert_eq!(frame.dots.len(), 50);
//! ```

mod app;
pub mod config;
mod error;
mod field;
mod frame;
mod gpu;
pub mod input;
pub mod time;

pub use app::{Plexus, StopSignal};
pub use config::{FieldConfig, Theme};
pub use error::{GpuError, RunError};
pub use field::{Particle, ParticleField};
pub use frame::{DotInstance, Frame, LinkInstance};
pub use glam::Vec2;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::{FieldConfig, Theme};
    pub use crate::field::{Particle, ParticleField};
    pub use crate::frame::Frame;
    pub use crate::input::PointerTracker;
    pub use crate::time::FrameClock;
    pub use crate::Vec2;
    pub use crate::{Plexus, RunError, StopSignal};
}
