/// Screen → working-space mapping.
///
/// Working space is the surface divided by `device_pixel_ratio * scale`, with
/// the origin at the bottom-left and `+Y` up. Input sizes and positions are
/// logical pixels (top-left origin, `+Y` down).
///
/// Resizing changes the mapping for future samples only; cells already in the
/// point grid are never reinterpreted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
    pub scale: f32,
}

impl Layout {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32, scale: f32) -> Self {
        Self { width, height, device_pixel_ratio, scale }
    }

    /// Updates the surface size and pixel ratio, keeping `scale`.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.width = width;
        self.height = height;
        self.device_pixel_ratio = device_pixel_ratio;
    }

    /// Working units per logical pixel.
    #[inline]
    pub fn factor(&self) -> f32 {
        let d = self.device_pixel_ratio * self.scale;
        if d > 0.0 && d.is_finite() { 1.0 / d } else { 0.0 }
    }

    /// Working units per physical pixel.
    #[inline]
    pub fn physical_factor(&self) -> f32 {
        if self.device_pixel_ratio > 0.0 {
            self.factor() / self.device_pixel_ratio
        } else {
            0.0
        }
    }

    /// Maps a logical-pixel position to working space (y flipped upward).
    #[inline]
    pub fn to_working(&self, x: f32, y: f32) -> (f32, f32) {
        let k = self.factor();
        (x * k, (self.height - y) * k)
    }

    /// Surface size in whole working units.
    pub fn working_size(&self) -> (u32, u32) {
        let k = self.factor();
        ((self.width * k).max(0.0) as u32, (self.height * k).max(0.0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_and_flips() {
        let layout = Layout::new(800.0, 600.0, 1.0, 4.0);
        assert_eq!(layout.to_working(0.0, 600.0), (0.0, 0.0));
        assert_eq!(layout.to_working(400.0, 0.0), (100.0, 150.0));
        assert_eq!(layout.working_size(), (200, 150));
    }

    #[test]
    fn pixel_ratio_divides_logical_positions() {
        let layout = Layout::new(800.0, 600.0, 2.0, 4.0);
        assert_eq!(layout.factor(), 0.125);
        assert_eq!(layout.physical_factor(), 0.0625);
        assert_eq!(layout.to_working(80.0, 600.0), (10.0, 0.0));
    }

    #[test]
    fn resize_keeps_scale() {
        let mut layout = Layout::new(800.0, 600.0, 1.0, 4.0);
        layout.resize(400.0, 400.0, 2.0);
        assert_eq!(layout.scale, 4.0);
        assert_eq!(layout.to_working(0.0, 0.0), (0.0, 50.0));
    }

    #[test]
    fn degenerate_ratio_collapses_to_origin() {
        let layout = Layout::new(800.0, 600.0, 0.0, 4.0);
        assert_eq!(layout.to_working(100.0, 100.0), (0.0, 0.0));
        assert_eq!(layout.working_size(), (0, 0));
    }
}
