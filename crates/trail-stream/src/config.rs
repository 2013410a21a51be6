use crate::error::ConfigError;

/// Default side length of the point grid.
pub const DEFAULT_RESOLUTION: u32 = 32;

/// Default screen → working-space down-scaling factor.
pub const DEFAULT_SCALE: f32 = 4.0;

/// Largest accepted grid side (65 536 cells).
pub const MAX_RESOLUTION: u32 = 256;

/// Cells kept free at the end of the grid so a stroke terminator always fits
/// after the last coordinate.
pub const RESERVED_CELLS: u32 = 2;

/// Manhattan distance (in working units, before scaling) below which
/// consecutive samples are considered duplicates.
const DECIMATION_DISTANCE: f32 = 16.0;

/// Encoder configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EncoderConfig {
    /// Side length `R` of the `R × R` point grid.
    pub resolution: u32,

    /// Global scale factor. Also divides the decimation distance.
    pub scale: f32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            scale: DEFAULT_SCALE,
        }
    }
}

impl EncoderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution < 2 {
            return Err(ConfigError::ResolutionTooSmall(self.resolution));
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(ConfigError::ResolutionTooLarge(self.resolution));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Total number of cells (`R²`).
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.resolution * self.resolution
    }

    /// First cursor value at which writes are refused.
    #[inline]
    pub fn write_limit(&self) -> u32 {
        self.capacity() - RESERVED_CELLS
    }

    /// Minimum Manhattan distance between two accepted, non-forced samples.
    #[inline]
    pub fn decimation_threshold(&self) -> f32 {
        DECIMATION_DISTANCE / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_grid_and_threshold() {
        let c = EncoderConfig::default();
        assert_eq!(c.capacity(), 1024);
        assert_eq!(c.write_limit(), 1022);
        assert_eq!(c.decimation_threshold(), 4.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_resolution() {
        let c = EncoderConfig { resolution: 1, ..Default::default() };
        assert_eq!(c.validate(), Err(ConfigError::ResolutionTooSmall(1)));

        let c = EncoderConfig { resolution: 512, ..Default::default() };
        assert_eq!(c.validate(), Err(ConfigError::ResolutionTooLarge(512)));
    }

    #[test]
    fn rejects_bad_scale() {
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let c = EncoderConfig { scale, ..Default::default() };
            assert!(matches!(c.validate(), Err(ConfigError::InvalidScale(_))));
        }
    }

    #[test]
    fn smallest_grid_leaves_two_writable_cells() {
        let c = EncoderConfig { resolution: 2, scale: 1.0 };
        assert_eq!(c.write_limit(), 2);
    }
}
