use std::fmt;

/// A rejected tool configuration or mesh parameter.
///
/// Raised before any window or GPU object exists.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A radial mesh needs at least three ring points.
    TooFewRingPoints { shape: &'static str, count: u32 },
    /// Orthographic half-extent must be finite and positive.
    InvalidOrthoScale(f32),
    /// Handle radii must be finite and non-negative.
    InvalidHandleRadius { name: &'static str, value: f32 },
    /// `min > max`, or either bound is not finite.
    InvalidConeBounds { min: f32, max: f32 },
    /// Default cone radius outside `[min, max]`.
    ConeRadiusOutOfBounds { value: f32, min: f32, max: f32 },
    ZeroGrowthDuration,
    /// MSAA sample count must be a power of two in `1..=16`.
    InvalidSampleCount(u32),
    ZeroWindowSize { width: u32, height: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewRingPoints { shape, count } => {
                write!(f, "{shape} mesh needs at least 3 ring points, got {count}")
            }
            Self::InvalidOrthoScale(s) => {
                write!(f, "orthographic scale must be finite and positive, got {s}")
            }
            Self::InvalidHandleRadius { name, value } => {
                write!(f, "{name} radius must be finite and non-negative, got {value}")
            }
            Self::InvalidConeBounds { min, max } => {
                write!(f, "cone radius bounds are invalid: min {min}, max {max}")
            }
            Self::ConeRadiusOutOfBounds { value, min, max } => {
                write!(f, "default cone radius {value} is outside [{min}, {max}]")
            }
            Self::ZeroGrowthDuration => write!(f, "growth duration must be non-zero"),
            Self::InvalidSampleCount(n) => {
                write!(f, "msaa sample count must be a power of two up to 16, got {n}")
            }
            Self::ZeroWindowSize { width, height } => {
                write!(f, "initial window size must be non-zero, got {width}x{height}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
