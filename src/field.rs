//! The particle-field simulation.
//!
//! A [`ParticleField`] owns a collection of drifting dots sized to the
//! surface area, advances them one Euler step per tick, and emits the dot
//! and link geometry for the frame. It knows nothing about windows or the
//! GPU, which keeps every behavior here testable on the CPU.

use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;
use crate::frame::{DotInstance, Frame, LinkInstance};

/// A single dot in the field.
///
/// Velocity components are drawn once at spawn and afterwards only ever
/// flip sign when the dot bounces off an edge; they are never re-drawn.
/// The radius is fixed for the dot's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

/// A field of drifting dots over a `[0, width] x [0, height]` surface.
///
/// The collection is replaced wholesale by [`resize`](Self::resize) and is
/// never mutated mid-frame; [`tick`](Self::tick) advances every dot in
/// order and fills a [`Frame`] with the geometry to draw.
pub struct ParticleField {
    config: FieldConfig,
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    pointer: Option<Vec2>,
}

impl ParticleField {
    /// Create an empty, zero-sized field. Call [`resize`](Self::resize)
    /// once the surface has been measured.
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer: None,
        }
    }

    /// Store the new surface dimensions and regenerate the whole
    /// collection from scratch.
    ///
    /// This is a deliberate reset, not a resize-preserving transform: all
    /// accumulated positions are discarded. A zero-area surface yields an
    /// empty field.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.resize_with(width, height, &mut rand::thread_rng());
    }

    /// [`resize`](Self::resize) with a caller-supplied RNG, for
    /// deterministic spawning.
    pub fn resize_with(&mut self, width: u32, height: u32, rng: &mut impl Rng) {
        self.width = width as f32;
        self.height = height as f32;

        // f64 so the count stays exact for large surfaces.
        let area = width as f64 * height as f64;
        let count = (area / self.config.density_divisor as f64).floor() as usize;

        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle {
                position: Vec2::new(
                    rng.gen_range(0.0..self.width),
                    rng.gen_range(0.0..self.height),
                ),
                velocity: Vec2::new(
                    rng.gen_range(-self.config.max_speed..=self.config.max_speed),
                    rng.gen_range(-self.config.max_speed..=self.config.max_speed),
                ),
                radius: rng.gen_range(self.config.min_radius..self.config.max_radius),
            });
        }
    }

    /// Set the pointer position, in surface coordinates.
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    /// Clear the pointer; subsequent ticks draw no pointer links.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Advance the field one frame and fill `frame` with its geometry.
    ///
    /// Each dot takes one Euler step, then bounces: a component that
    /// leaves `[0, bound]` has its velocity sign flipped, but the position
    /// is not clamped back inside, so a dot may sit slightly out of bounds
    /// for a frame before the reversed velocity walks it back in.
    ///
    /// Links pair each dot with every dot later in the sweep, so each
    /// unordered pair is considered exactly once; later dots are still at
    /// their previous-frame positions when compared. O(n^2) over the
    /// frame.
    pub fn tick(&mut self, frame: &mut Frame) {
        frame.clear();

        for i in 0..self.particles.len() {
            let mut p = self.particles[i];
            p.position += p.velocity;

            if p.position.x < 0.0 || p.position.x > self.width {
                p.velocity.x = -p.velocity.x;
            }
            if p.position.y < 0.0 || p.position.y > self.height {
                p.velocity.y = -p.velocity.y;
            }
            self.particles[i] = p;

            frame.dots.push(DotInstance::new(p.position, p.radius));

            for j in (i + 1)..self.particles.len() {
                let other = self.particles[j].position;
                let dist = p.position.distance(other);
                if dist < self.config.link_distance {
                    let alpha =
                        self.config.link_alpha * (1.0 - dist / self.config.link_distance);
                    frame.links.push(LinkInstance::new(p.position, other, alpha));
                }
            }

            if let Some(pointer) = self.pointer {
                let dist = p.position.distance(pointer);
                if dist < self.config.pointer_radius {
                    let alpha = self.config.pointer_alpha
                        * (1.0 - dist / self.config.pointer_radius);
                    frame
                        .links
                        .push(LinkInstance::new(p.position, pointer, alpha));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field_with(particles: Vec<Particle>, width: f32, height: f32) -> ParticleField {
        let mut field = ParticleField::new(FieldConfig::default());
        field.width = width;
        field.height = height;
        field.particles = particles;
        field
    }

    fn particle(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            radius: 1.5,
        }
    }

    #[test]
    fn test_count_tracks_area() {
        let mut field = ParticleField::new(FieldConfig::default());

        field.resize(1000, 500);
        assert_eq!(field.len(), 50);

        field.resize(1920, 1080);
        assert_eq!(field.len(), 207); // floor(2_073_600 / 10_000)

        field.resize(99, 99);
        assert_eq!(field.len(), 0);
    }

    #[test]
    fn test_zero_area_is_empty_and_ticks() {
        let mut field = ParticleField::new(FieldConfig::default());
        field.resize(0, 0);
        assert!(field.is_empty());

        let mut frame = Frame::new();
        field.tick(&mut frame);
        assert!(frame.dots.is_empty());
        assert!(frame.links.is_empty());
    }

    #[test]
    fn test_spawn_ranges() {
        let config = FieldConfig::default();
        let mut field = ParticleField::new(config);
        let mut rng = StdRng::seed_from_u64(7);
        field.resize_with(2000, 1000, &mut rng);
        assert_eq!(field.len(), 200);

        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 2000.0);
            assert!(p.position.y >= 0.0 && p.position.y < 1000.0);
            assert!(p.velocity.x >= -config.max_speed && p.velocity.x <= config.max_speed);
            assert!(p.velocity.y >= -config.max_speed && p.velocity.y <= config.max_speed);
            assert!(p.radius >= config.min_radius && p.radius < config.max_radius);
        }
    }

    #[test]
    fn test_resize_discards_previous_particles() {
        let mut field = ParticleField::new(FieldConfig::default());
        field.resize(1000, 500);
        let before: Vec<Particle> = field.particles().to_vec();

        field.resize(1000, 500);
        // Same count, fresh draws.
        assert_eq!(field.len(), before.len());
        assert!(field
            .particles()
            .iter()
            .zip(&before)
            .any(|(a, b)| a.position != b.position));
    }

    #[test]
    fn test_euler_step() {
        let mut field = field_with(vec![particle(100.0, 100.0, 0.4, -0.3)], 500.0, 500.0);
        let mut frame = Frame::new();
        field.tick(&mut frame);

        let p = field.particles()[0];
        assert!((p.position.x - 100.4).abs() < 1e-5);
        assert!((p.position.y - 99.7).abs() < 1e-5);
        assert_eq!(p.velocity, Vec2::new(0.4, -0.3));
        assert_eq!(frame.dots.len(), 1);
    }

    #[test]
    fn test_bounce_flips_sign_without_clamping() {
        let mut field = field_with(vec![particle(499.9, 250.0, 0.3, 0.0)], 500.0, 500.0);
        let mut frame = Frame::new();
        field.tick(&mut frame);

        let p = field.particles()[0];
        // Overshoots the right edge; sign flips but position stays outside.
        assert!((p.position.x - 500.2).abs() < 1e-4);
        assert_eq!(p.velocity.x, -0.3);

        // The reversed velocity walks it back in on the next tick.
        field.tick(&mut frame);
        let p = field.particles()[0];
        assert!((p.position.x - 499.9).abs() < 1e-4);
        assert_eq!(p.velocity.x, -0.3);
    }

    #[test]
    fn test_bounce_axes_independent() {
        let mut field = field_with(vec![particle(0.1, 0.1, -0.5, -0.5)], 500.0, 500.0);
        let mut frame = Frame::new();
        field.tick(&mut frame);

        let p = field.particles()[0];
        assert_eq!(p.velocity, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_no_bounce_inside_bounds() {
        let mut field = field_with(vec![particle(250.0, 250.0, 0.5, -0.5)], 500.0, 500.0);
        let mut frame = Frame::new();
        for _ in 0..10 {
            field.tick(&mut frame);
        }
        assert_eq!(field.particles()[0].velocity, Vec2::new(0.5, -0.5));
    }

    #[test]
    fn test_links_only_under_threshold() {
        let mut field = field_with(
            vec![
                particle(100.0, 100.0, 0.0, 0.0),
                particle(150.0, 100.0, 0.0, 0.0), // 50 away: linked
                particle(300.0, 100.0, 0.0, 0.0), // 150+ away from both: not linked
            ],
            1000.0,
            1000.0,
        );
        let mut frame = Frame::new();
        field.tick(&mut frame);

        assert_eq!(frame.links.len(), 1);
        let link = frame.links[0];
        // opacity = 0.1 - 50/1000
        assert!((link.alpha - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_each_pair_considered_once() {
        // Three mutually-close dots produce exactly three links.
        let mut field = field_with(
            vec![
                particle(100.0, 100.0, 0.0, 0.0),
                particle(120.0, 100.0, 0.0, 0.0),
                particle(110.0, 120.0, 0.0, 0.0),
            ],
            1000.0,
            1000.0,
        );
        let mut frame = Frame::new();
        field.tick(&mut frame);
        assert_eq!(frame.links.len(), 3);
    }

    #[test]
    fn test_pointer_link_opacity() {
        let mut field = field_with(vec![particle(500.0, 425.0, 0.0, 0.0)], 1000.0, 1000.0);
        field.set_pointer(Vec2::new(500.0, 500.0));

        let mut frame = Frame::new();
        field.tick(&mut frame);

        // 75 from the pointer with radius 150: 0.2 - (75/150)*0.2 = 0.1.
        assert_eq!(frame.links.len(), 1);
        assert!((frame.links[0].alpha - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_outside_radius_draws_nothing() {
        let mut field = field_with(vec![particle(100.0, 100.0, 0.0, 0.0)], 1000.0, 1000.0);
        field.set_pointer(Vec2::new(500.0, 500.0));

        let mut frame = Frame::new();
        field.tick(&mut frame);
        assert!(frame.links.is_empty());
    }

    #[test]
    fn test_pointer_clear_stops_links() {
        let mut field = field_with(vec![particle(500.0, 450.0, 0.0, 0.0)], 1000.0, 1000.0);
        field.set_pointer(Vec2::new(500.0, 500.0));

        let mut frame = Frame::new();
        field.tick(&mut frame);
        assert_eq!(frame.links.len(), 1);

        field.clear_pointer();
        field.tick(&mut frame);
        assert!(frame.links.is_empty());
        assert!(field.pointer().is_none());
    }
}
