//! Tuning parameters for the field and its presentation.

/// Tuning parameters for a [`ParticleField`](crate::ParticleField).
///
/// The defaults reproduce the stock backdrop: one dot per 10 000 square
/// pixels of surface, dot-to-dot links under 100 px, and a 150 px pointer
/// halo.
///
/// # Example
///
/// ```
/// use plexus::FieldConfig;
///
/// let config = FieldConfig {
///     link_distance: 140.0,
///     ..FieldConfig::default()
/// };
/// assert_eq!(config.density_divisor, 10_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Square pixels of surface area per dot. The dot count for a surface
    /// is `floor(width * height / density_divisor)`, so larger surfaces get
    /// proportionally more dots.
    pub density_divisor: f32,
    /// Maximum distance at which two dots are linked by a line.
    pub link_distance: f32,
    /// Opacity of a dot-to-dot link at zero distance. Opacity falls off
    /// linearly, reaching zero at `link_distance`.
    pub link_alpha: f32,
    /// Distance within which dots link to the pointer.
    pub pointer_radius: f32,
    /// Opacity of a pointer link at zero distance, falling off linearly to
    /// zero at `pointer_radius`.
    pub pointer_alpha: f32,
    /// Velocity components are drawn once at spawn from
    /// `[-max_speed, max_speed]`, in pixels per frame.
    pub max_speed: f32,
    /// Dot radii are drawn once at spawn from `[min_radius, max_radius)`.
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density_divisor: 10_000.0,
            link_distance: 100.0,
            link_alpha: 0.1,
            pointer_radius: 150.0,
            pointer_alpha: 0.2,
            max_speed: 0.5,
            min_radius: 1.0,
            max_radius: 3.0,
        }
    }
}

/// Colors used by the renderer.
///
/// RGB components are linear, 0.0-1.0. The default is dark dots and links
/// over a near-white surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Clear color for the surface (RGBA).
    pub background: [f32; 4],
    /// Fill color for dots.
    pub dot_color: [f32; 3],
    /// Stroke color for links; per-link opacity comes from the simulation.
    pub link_color: [f32; 3],
    /// Width of link lines in pixels.
    pub link_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: [0.96, 0.96, 0.97, 1.0],
            dot_color: [0.2, 0.2, 0.2],
            link_color: [0.2, 0.2, 0.2],
            link_width: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = FieldConfig::default();
        assert_eq!(config.density_divisor, 10_000.0);
        assert_eq!(config.link_distance, 100.0);
        assert_eq!(config.link_alpha, 0.1);
        assert_eq!(config.pointer_radius, 150.0);
        assert_eq!(config.pointer_alpha, 0.2);
        assert_eq!(config.max_speed, 0.5);
        assert_eq!(config.min_radius, 1.0);
        assert_eq!(config.max_radius, 3.0);
    }

    #[test]
    fn test_link_falloff_matches_fixed_form() {
        // At the default constants, link_alpha * (1 - d / link_distance)
        // reduces to 0.1 - d / 1000.
        let config = FieldConfig::default();
        for d in [0.0_f32, 25.0, 50.0, 75.0, 99.9] {
            let scaled = config.link_alpha * (1.0 - d / config.link_distance);
            let fixed = 0.1 - d / 1000.0;
            assert!((scaled - fixed).abs() < 1e-6);
        }
    }
}
