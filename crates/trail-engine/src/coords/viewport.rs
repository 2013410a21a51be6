/// Viewport size in logical pixels plus the pixel ratio of the surface.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        Self { width, height, scale_factor }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.scale_factor > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Height in physical pixels.
    #[inline]
    pub fn physical_height(self) -> f32 {
        self.height * self.scale_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_height_applies_scale() {
        assert_eq!(Viewport::new(800.0, 600.0, 2.0).physical_height(), 1200.0);
    }

    #[test]
    fn zero_or_nan_is_invalid() {
        assert!(Viewport::new(800.0, 600.0, 1.0).is_valid());
        assert!(!Viewport::new(0.0, 600.0, 1.0).is_valid());
        assert!(!Viewport::new(800.0, f32::NAN, 1.0).is_valid());
        assert!(!Viewport::new(800.0, 600.0, 0.0).is_valid());
    }
}
