use std::time::Duration;

use crate::error::ConfigError;

/// Characters bound to the keyboard commands. Matched case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub clear: char,
    pub randomize: char,
    pub grow: char,
    pub min_radius: char,
    pub max_radius: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            clear: 'c',
            randomize: 'r',
            grow: 'g',
            min_radius: 'm',
            max_radius: 'n',
        }
    }
}

/// Every tunable of the tool.
///
/// Radii and extents are in world units, sizes in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Multisampled antialiasing of cone intersections; 1 disables it.
    pub msaa_samples: u32,

    /// Orthographic half-extent along the shorter window axis.
    pub ortho_scale: f32,
    pub near: f32,
    pub far: f32,

    /// Unselected handle disc radius.
    pub base_radius: f32,
    /// Selected handle disc radius, also the pick radius.
    pub hover_radius: f32,

    pub min_cone_radius: f32,
    pub max_cone_radius: f32,
    pub cone_radius: f32,

    pub cone_height: f32,
    pub cone_depth: f32,
    pub cone_resolution: u32,
    pub disc_resolution: u32,

    pub random_count: usize,
    pub growth_duration: Duration,

    pub enable_growth: bool,
    pub pin_selection_during_drag: bool,
    pub enable_frame_time_log: bool,

    pub keys: KeyBindings,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            title: "Voronoi Diagram Tool".to_string(),
            window_width: 800,
            window_height: 800,
            msaa_samples: 4,
            ortho_scale: 1.0,
            near: 0.1,
            far: 100.0,
            base_radius: 0.01,
            hover_radius: 0.025,
            min_cone_radius: 0.03,
            max_cone_radius: 2.2,
            cone_radius: 2.2,
            cone_height: 1.0,
            cone_depth: -1.0,
            cone_resolution: 64,
            disc_resolution: 16,
            random_count: 40,
            growth_duration: Duration::from_millis(7000),
            enable_growth: true,
            pin_selection_during_drag: true,
            enable_frame_time_log: false,
            keys: KeyBindings::default(),
        }
    }
}

impl ToolConfig {
    /// Checks the configuration once, before anything is created from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cone_resolution < 3 {
            return Err(ConfigError::TooFewRingPoints {
                shape: "cone",
                count: self.cone_resolution,
            });
        }
        if self.disc_resolution < 3 {
            return Err(ConfigError::TooFewRingPoints {
                shape: "disc",
                count: self.disc_resolution,
            });
        }

        if !self.ortho_scale.is_finite() || self.ortho_scale <= 0.0 {
            return Err(ConfigError::InvalidOrthoScale(self.ortho_scale));
        }

        for (name, value) in [("base", self.base_radius), ("hover", self.hover_radius)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidHandleRadius { name, value });
            }
        }

        let (min, max) = (self.min_cone_radius, self.max_cone_radius);
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigError::InvalidConeBounds { min, max });
        }
        if !(min..=max).contains(&self.cone_radius) {
            return Err(ConfigError::ConeRadiusOutOfBounds {
                value: self.cone_radius,
                min,
                max,
            });
        }

        if self.growth_duration.is_zero() {
            return Err(ConfigError::ZeroGrowthDuration);
        }

        if !self.msaa_samples.is_power_of_two() || self.msaa_samples > 16 {
            return Err(ConfigError::InvalidSampleCount(self.msaa_samples));
        }

        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::ZeroWindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ToolConfig::default().validate(), Ok(()));
    }

    #[test]
    fn defaults_match_tool_constants() {
        let c = ToolConfig::default();
        assert_eq!((c.window_width, c.window_height), (800, 800));
        assert_eq!(c.cone_resolution, 64);
        assert_eq!(c.disc_resolution, 16);
        assert_eq!(c.random_count, 40);
        assert_eq!(c.growth_duration, Duration::from_millis(7000));
        assert!(c.pin_selection_during_drag);
        assert_eq!(c.title, "Voronoi Diagram Tool");
        assert_eq!(c.msaa_samples, 4);
    }

    #[test]
    fn rejects_unusable_sample_counts() {
        for n in [0u32, 3, 32] {
            let c = ToolConfig { msaa_samples: n, ..ToolConfig::default() };
            assert_eq!(c.validate(), Err(ConfigError::InvalidSampleCount(n)));
        }
        let c = ToolConfig { msaa_samples: 1, ..ToolConfig::default() };
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn rejects_small_ring_resolution() {
        let c = ToolConfig { disc_resolution: 2, ..ToolConfig::default() };
        assert_eq!(
            c.validate(),
            Err(ConfigError::TooFewRingPoints { shape: "disc", count: 2 })
        );
    }

    #[test]
    fn rejects_bad_ortho_scale() {
        for s in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let c = ToolConfig { ortho_scale: s, ..ToolConfig::default() };
            assert!(matches!(c.validate(), Err(ConfigError::InvalidOrthoScale(_))));
        }
    }

    #[test]
    fn rejects_negative_handle_radius() {
        let c = ToolConfig { hover_radius: -0.1, ..ToolConfig::default() };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidHandleRadius { name: "hover", .. })
        ));
    }

    #[test]
    fn rejects_inverted_cone_bounds() {
        let c = ToolConfig {
            min_cone_radius: 3.0,
            max_cone_radius: 2.0,
            ..ToolConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::InvalidConeBounds { .. })));
    }

    #[test]
    fn rejects_default_radius_outside_bounds() {
        let c = ToolConfig { cone_radius: 5.0, ..ToolConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::ConeRadiusOutOfBounds { .. })));
    }

    #[test]
    fn rejects_zero_duration_and_window() {
        let c = ToolConfig { growth_duration: Duration::ZERO, ..ToolConfig::default() };
        assert_eq!(c.validate(), Err(ConfigError::ZeroGrowthDuration));

        let c = ToolConfig { window_height: 0, ..ToolConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::ZeroWindowSize { .. })));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let msg = ConfigError::TooFewRingPoints { shape: "cone", count: 1 }.to_string();
        assert!(msg.contains("cone"));
        assert!(msg.contains('1'));
    }
}
