use crate::encoder::PointStreamEncoder;

/// Pointer/touch transition in working-space coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Gesture {
    /// Button or finger went down.
    Press { x: f32, y: f32 },
    /// Pointer moved (ignored unless pressed).
    Drag { x: f32, y: f32 },
    /// Button released.
    Release { x: f32, y: f32 },
    /// Pointer left the surface.
    Leave { x: f32, y: f32 },
    /// Finger lifted. Touch ends carry no final position.
    TouchEnd,
    /// Touch sequence cancelled by the platform.
    TouchCancel,
}

/// Drives a [`PointStreamEncoder`] from press/drag/release transitions.
///
/// - press: forced sample (a stroke always records its first point)
/// - drag while pressed: decimated sample
/// - release / leave while pressed: forced sample, then pen-up
/// - touch end / cancel while pressed: pen-up only
#[derive(Debug, Default)]
pub struct GestureRecorder {
    pressed: bool,
}

impl GestureRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Applies one transition and returns how many cells were written.
    pub fn apply(&mut self, encoder: &mut PointStreamEncoder, gesture: Gesture) -> u32 {
        match gesture {
            Gesture::Press { x, y } => {
                self.pressed = true;
                u32::from(encoder.submit_point(x, y, true))
            }

            Gesture::Drag { x, y } => {
                if !self.pressed {
                    return 0;
                }
                u32::from(encoder.submit_point(x, y, false))
            }

            Gesture::Release { x, y } | Gesture::Leave { x, y } => {
                if !self.pressed {
                    return 0;
                }
                self.pressed = false;
                let point = u32::from(encoder.submit_point(x, y, true));
                let pen_up = u32::from(encoder.end_stroke());
                log::debug!("stroke finished at cell {}", encoder.cursor());
                point + pen_up
            }

            Gesture::TouchEnd | Gesture::TouchCancel => {
                if !self.pressed {
                    return 0;
                }
                self.pressed = false;
                let pen_up = u32::from(encoder.end_stroke());
                log::debug!("stroke finished at cell {}", encoder.cursor());
                pen_up
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::config::EncoderConfig;

    fn setup() -> (PointStreamEncoder, GestureRecorder) {
        let enc = PointStreamEncoder::new(EncoderConfig::default()).unwrap();
        (enc, GestureRecorder::new())
    }

    #[test]
    fn mouse_stroke_records_start_moves_end_and_pen_up() {
        let (mut enc, mut pen) = setup();

        assert_eq!(pen.apply(&mut enc, Gesture::Press { x: 10.0, y: 10.0 }), 1);
        assert!(pen.is_pressed());
        assert_eq!(pen.apply(&mut enc, Gesture::Drag { x: 11.0, y: 10.0 }), 0);
        assert_eq!(pen.apply(&mut enc, Gesture::Drag { x: 20.0, y: 10.0 }), 1);
        assert_eq!(pen.apply(&mut enc, Gesture::Release { x: 21.0, y: 10.0 }), 2);
        assert!(!pen.is_pressed());

        assert_eq!(enc.cursor(), 4);
        assert_eq!(enc.buffer().cell(3), Some(Cell::PEN_UP));
        assert_eq!(enc.strokes(), vec![vec![(10, 10), (20, 10), (21, 10)]]);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let (mut enc, mut pen) = setup();
        assert_eq!(pen.apply(&mut enc, Gesture::Drag { x: 50.0, y: 50.0 }), 0);
        assert_eq!(pen.apply(&mut enc, Gesture::Release { x: 50.0, y: 50.0 }), 0);
        assert_eq!(pen.apply(&mut enc, Gesture::Leave { x: 50.0, y: 50.0 }), 0);
        assert_eq!(pen.apply(&mut enc, Gesture::TouchEnd), 0);
        assert_eq!(enc.cursor(), 0);
    }

    #[test]
    fn leave_closes_stroke_like_release() {
        let (mut enc, mut pen) = setup();
        pen.apply(&mut enc, Gesture::Press { x: 0.0, y: 0.0 });
        assert_eq!(pen.apply(&mut enc, Gesture::Leave { x: 30.0, y: 0.0 }), 2);
        assert!(!pen.is_pressed());
        assert_eq!(enc.strokes(), vec![vec![(0, 0), (30, 0)]]);
    }

    #[test]
    fn touch_end_writes_only_pen_up() {
        let (mut enc, mut pen) = setup();
        pen.apply(&mut enc, Gesture::Press { x: 5.0, y: 5.0 });
        pen.apply(&mut enc, Gesture::Drag { x: 25.0, y: 5.0 });
        assert_eq!(pen.apply(&mut enc, Gesture::TouchCancel), 1);
        assert_eq!(enc.cursor(), 3);
        assert_eq!(enc.buffer().cell(2), Some(Cell::PEN_UP));
    }

    #[test]
    fn new_stroke_start_is_forced_even_near_previous_end() {
        let (mut enc, mut pen) = setup();
        pen.apply(&mut enc, Gesture::Press { x: 5.0, y: 5.0 });
        pen.apply(&mut enc, Gesture::TouchEnd);
        // Last point is now the pen-up marker; a press right next to the first
        // stroke is still recorded.
        assert_eq!(pen.apply(&mut enc, Gesture::Press { x: 5.0, y: 5.0 }), 1);
        assert_eq!(enc.strokes(), vec![vec![(5, 5)], vec![(5, 5)]]);
    }

    #[test]
    fn release_on_full_grid_writes_nothing() {
        let mut enc = PointStreamEncoder::new(EncoderConfig { resolution: 2, scale: 4.0 }).unwrap();
        let mut pen = GestureRecorder::new();
        pen.apply(&mut enc, Gesture::Press { x: 0.0, y: 0.0 });
        pen.apply(&mut enc, Gesture::Drag { x: 50.0, y: 0.0 });
        assert!(enc.is_full());
        assert_eq!(pen.apply(&mut enc, Gesture::Release { x: 90.0, y: 0.0 }), 0);
        assert!(!pen.is_pressed());
        assert_eq!(enc.cursor(), 2);
    }
}
