//! Per-frame geometry passed from the simulation to the renderer.
//!
//! The simulation fills a [`Frame`] each tick; the renderer uploads the
//! instance vectors verbatim, so both structs are `Pod` with explicit
//! padding to match their WGSL counterparts.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One dot, as uploaded to the dot instance buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DotInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
}

impl DotInstance {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position: position.to_array(),
            radius,
            _pad: 0.0,
        }
    }
}

/// One link line segment with its stroke opacity.
///
/// Layout matches the `Link` struct in the link render shader: two vec2
/// endpoints, an alpha, and padding up to a 32-byte stride.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LinkInstance {
    pub a: [f32; 2],
    pub b: [f32; 2],
    pub alpha: f32,
    pub _pad: [f32; 3],
}

impl LinkInstance {
    pub fn new(a: Vec2, b: Vec2, alpha: f32) -> Self {
        Self {
            a: a.to_array(),
            b: b.to_array(),
            alpha,
            _pad: [0.0; 3],
        }
    }
}

/// Geometry for one frame: every dot and every link line to draw.
#[derive(Debug, Default)]
pub struct Frame {
    pub dots: Vec<DotInstance>,
    pub links: Vec<LinkInstance>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty both vectors, keeping their allocations for the next tick.
    pub fn clear(&mut self) {
        self.dots.clear();
        self.links.clear();
    }
}
