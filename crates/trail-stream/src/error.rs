use std::fmt;

/// Rejected encoder configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid too small to hold a point plus the two reserved cells.
    ResolutionTooSmall(u32),
    /// Grid larger than the texture side the renderer is willing to allocate.
    ResolutionTooLarge(u32),
    /// Scale factor is zero, negative, or not finite.
    InvalidScale(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ResolutionTooSmall(r) => {
                write!(f, "point grid resolution {r} is too small (minimum 2)")
            }
            ConfigError::ResolutionTooLarge(r) => {
                write!(
                    f,
                    "point grid resolution {r} exceeds the maximum of {}",
                    crate::config::MAX_RESOLUTION
                )
            }
            ConfigError::InvalidScale(s) => {
                write!(f, "scale factor must be finite and positive, got {s}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
