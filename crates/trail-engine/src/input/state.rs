use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
    TouchEvent,
    TouchPhase,
};

/// Current input state for a single window.
///
/// Only one finger is tracked at a time: touches that start while another is
/// down are dropped, as are all their later phases.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,

    /// Id of the finger currently being followed.
    pub active_touch: Option<u64>,
}

impl InputState {
    /// Applies an event and records it in `frame`.
    ///
    /// Returns `false` if the event was filtered out (secondary fingers).
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) -> bool {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::Touch(TouchEvent { id, phase, .. }) => match (phase, self.active_touch) {
                (TouchPhase::Started, None) => self.active_touch = Some(*id),
                (TouchPhase::Moved, Some(active)) if active == *id => {}
                (TouchPhase::Ended | TouchPhase::Cancelled, Some(active)) if active == *id => {
                    self.active_touch = None;
                }
                _ => {
                    log::trace!("ignoring secondary touch {id} ({phase:?})");
                    return false;
                }
            },
        }

        frame.push_event(ev);
        true
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}
