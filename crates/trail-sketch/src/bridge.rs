use trail_engine::input::{
    InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent, TouchEvent,
    TouchPhase,
};
use trail_stream::{Gesture, Layout};

/// Turns engine input events into working-space gestures.
///
/// Only the left button draws. Pointer-leave carries no position in winit, so
/// the last known pointer position is used for the closing sample.
#[derive(Debug, Default)]
pub struct InputBridge {
    pointer: Option<(f32, f32)>,
}

impl InputBridge {
    pub fn translate(&mut self, ev: &InputEvent, layout: &Layout) -> Option<Gesture> {
        match ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer = Some((*x, *y));
                let (x, y) = layout.to_working(*x, *y);
                Some(Gesture::Drag { x, y })
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                x,
                y,
            }) => {
                self.pointer = Some((*x, *y));
                let (x, y) = layout.to_working(*x, *y);
                Some(match state {
                    MouseButtonState::Pressed => Gesture::Press { x, y },
                    MouseButtonState::Released => Gesture::Release { x, y },
                })
            }

            InputEvent::PointerLeft => {
                let (x, y) = self.pointer.take()?;
                let (x, y) = layout.to_working(x, y);
                Some(Gesture::Leave { x, y })
            }

            InputEvent::Touch(TouchEvent { phase, x, y, .. }) => {
                let (x, y) = layout.to_working(*x, *y);
                Some(match phase {
                    TouchPhase::Started => Gesture::Press { x, y },
                    TouchPhase::Moved => Gesture::Drag { x, y },
                    TouchPhase::Ended => Gesture::TouchEnd,
                    TouchPhase::Cancelled => Gesture::TouchCancel,
                })
            }

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_engine::input::{Key, KeyState};

    fn layout() -> Layout {
        Layout::new(400.0, 300.0, 1.0, 4.0)
    }

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x, y })
    }

    #[test]
    fn mouse_press_and_release_are_normalized() {
        let mut bridge = InputBridge::default();
        assert_eq!(
            bridge.translate(&left(MouseButtonState::Pressed, 40.0, 300.0), &layout()),
            Some(Gesture::Press { x: 10.0, y: 0.0 })
        );
        assert_eq!(
            bridge.translate(&left(MouseButtonState::Released, 0.0, 100.0), &layout()),
            Some(Gesture::Release { x: 0.0, y: 50.0 })
        );
    }

    #[test]
    fn other_buttons_do_not_draw() {
        let mut bridge = InputBridge::default();
        let ev = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            x: 1.0,
            y: 1.0,
        });
        assert_eq!(bridge.translate(&ev, &layout()), None);
    }

    #[test]
    fn leave_uses_last_pointer_position() {
        let mut bridge = InputBridge::default();
        bridge.translate(&InputEvent::PointerMoved(PointerMoveEvent { x: 80.0, y: 200.0 }), &layout());
        assert_eq!(
            bridge.translate(&InputEvent::PointerLeft, &layout()),
            Some(Gesture::Leave { x: 20.0, y: 25.0 })
        );
        // Position is forgotten once the pointer is gone.
        assert_eq!(bridge.translate(&InputEvent::PointerLeft, &layout()), None);
    }

    #[test]
    fn touch_phases_follow_protocol() {
        let mut bridge = InputBridge::default();
        let t = |phase| InputEvent::Touch(TouchEvent { id: 1, phase, x: 4.0, y: 296.0 });

        assert_eq!(bridge.translate(&t(TouchPhase::Started), &layout()), Some(Gesture::Press { x: 1.0, y: 1.0 }));
        assert_eq!(bridge.translate(&t(TouchPhase::Moved), &layout()), Some(Gesture::Drag { x: 1.0, y: 1.0 }));
        assert_eq!(bridge.translate(&t(TouchPhase::Ended), &layout()), Some(Gesture::TouchEnd));
        assert_eq!(bridge.translate(&t(TouchPhase::Cancelled), &layout()), Some(Gesture::TouchCancel));
    }

    #[test]
    fn keys_and_focus_are_ignored() {
        let mut bridge = InputBridge::default();
        let key = InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, repeat: false };
        assert_eq!(bridge.translate(&key, &layout()), None);
        assert_eq!(bridge.translate(&InputEvent::Focused(false), &layout()), None);
    }
}
