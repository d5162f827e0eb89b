use std::collections::HashSet;

use glutin::event::VirtualKeyCode;

use lander_core::entity::Direction;
use lander_core::glam::Vec3;

/// Keyboard state rebuilt from window events, polled once per frame.
#[derive(Default)]
pub struct InputManager {
    state: HashSet<VirtualKeyCode>,
}

impl InputManager {
    pub fn is_pressed(&self, key: VirtualKeyCode) -> bool {
        self.state.contains(&key)
    }

    pub fn set_pressed(&mut self, key: VirtualKeyCode, pressed: bool) {
        if pressed {
            self.state.insert(key);
        } else {
            self.state.remove(&key);
        }
    }

    /// Arrow-key state as a steering intent plus the facing it implies.
    /// One direction wins per frame, left through down in that order.
    pub fn steering(&self) -> Option<(Vec3, Direction)> {
        if self.is_pressed(VirtualKeyCode::Left) {
            Some((Vec3::new(-1.0, 0.0, 0.0), Direction::Left))
        } else if self.is_pressed(VirtualKeyCode::Right) {
            Some((Vec3::new(1.0, 0.0, 0.0), Direction::Right))
        } else if self.is_pressed(VirtualKeyCode::Up) {
            Some((Vec3::new(0.0, 1.0, 0.0), Direction::Up))
        } else if self.is_pressed(VirtualKeyCode::Down) {
            Some((Vec3::new(0.0, -1.0, 0.0), Direction::Down))
        } else {
            None
        }
    }
}
