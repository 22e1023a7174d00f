use crate::pipeline::frame::Command;
use crate::scene::camera::{CameraInput, DragMode};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};
use nalgebra::Vector2;

/// Function keys and the command each one issues.
pub const COMMAND_KEYS: [(Key, Command); 7] = [
    (Key::F2, Command::ToggleRotation),
    (Key::F5, Command::CycleColorMode),
    (Key::F6, Command::ToggleNormalMapping),
    (Key::F7, Command::CycleRenderMode),
    (Key::F9, Command::CycleCullMode),
    (Key::F10, Command::ToggleClearColor),
    (Key::F11, Command::TogglePrintFps),
];

pub fn command_for_key(key: Key) -> Option<Command> {
    COMMAND_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, command)| *command)
}

/// Left drags dolly, right drags look around, both together move vertically.
pub fn drag_mode(left: bool, right: bool) -> DragMode {
    match (left, right) {
        (true, true) => DragMode::Vertical,
        (true, false) => DragMode::Dolly,
        (false, true) => DragMode::Look,
        (false, false) => DragMode::None,
    }
}

/// Turns window state into camera input and commands, once per frame.
#[derive(Default)]
pub struct InputMapper {
    last_mouse_pos: Option<(f32, f32)>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera_input(&mut self, window: &Window) -> CameraInput {
        let drag = drag_mode(
            window.get_mouse_down(MouseButton::Left),
            window.get_mouse_down(MouseButton::Right),
        );

        let mut pointer_delta = Vector2::zeros();
        if drag == DragMode::None {
            self.last_mouse_pos = None;
        } else if let Some((x, y)) = window.get_mouse_pos(MouseMode::Pass) {
            if let Some((last_x, last_y)) = self.last_mouse_pos {
                pointer_delta = Vector2::new(x - last_x, y - last_y);
            }
            self.last_mouse_pos = Some((x, y));
        }

        let down = |a: Key, b: Key| window.is_key_down(a) || window.is_key_down(b);
        CameraInput {
            forward: down(Key::W, Key::Up),
            backward: down(Key::S, Key::Down),
            left: down(Key::A, Key::Left),
            right: down(Key::D, Key::Right),
            pointer_delta,
            drag,
        }
    }

    /// Commands whose key went down this frame.
    pub fn commands(&self, window: &Window) -> Vec<Command> {
        window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(command_for_key)
            .collect()
    }
}
