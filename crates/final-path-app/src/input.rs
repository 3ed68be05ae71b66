//! Edge-triggered pointer input.
//!
//! A click counts only on the press transition, so holding a button down
//! never repeats an action.

use serde::{Deserialize, Serialize};

use final_path_core::commands::PlayerCommand;

/// Raw pointer state sampled once per rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerFrame {
    pub x: f32,
    pub y: f32,
    pub left: bool,
    pub right: bool,
}

/// Remembers the previous button state and reports rising edges.
#[derive(Debug, Default)]
pub struct PointerLatch {
    was_pressed: bool,
}

impl PointerLatch {
    /// Feed the current button state. True only on the frame it goes down.
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        edge
    }
}

/// Turns pointer frames into playfield commands: left press builds,
/// right press sells.
#[derive(Debug, Default)]
pub struct InputTranslator {
    left: PointerLatch,
    right: PointerLatch,
}

impl InputTranslator {
    pub fn translate(&mut self, frame: &PointerFrame) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        if self.left.update(frame.left) {
            commands.push(PlayerCommand::PlaceTower {
                x: frame.x,
                y: frame.y,
            });
        }
        if self.right.update(frame.right) {
            commands.push(PlayerCommand::RemoveTower {
                x: frame.x,
                y: frame.y,
            });
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(left: bool, right: bool) -> PointerFrame {
        PointerFrame {
            x: 100.0,
            y: 200.0,
            left,
            right,
        }
    }

    #[test]
    fn test_latch_fires_on_press_only() {
        let mut latch = PointerLatch::default();
        assert!(!latch.update(false));
        assert!(latch.update(true));
        assert!(!latch.update(true), "held button does not repeat");
        assert!(!latch.update(false));
        assert!(latch.update(true));
    }

    #[test]
    fn test_held_left_button_places_once() {
        let mut input = InputTranslator::default();
        let mut commands = Vec::new();
        for _ in 0..30 {
            commands.extend(input.translate(&frame(true, false)));
        }
        assert_eq!(
            commands,
            vec![PlayerCommand::PlaceTower { x: 100.0, y: 200.0 }]
        );
    }

    #[test]
    fn test_right_button_removes() {
        let mut input = InputTranslator::default();
        assert!(input.translate(&frame(false, false)).is_empty());
        assert_eq!(
            input.translate(&frame(false, true)),
            vec![PlayerCommand::RemoveTower { x: 100.0, y: 200.0 }]
        );
        assert_eq!(input.translate(&frame(true, true)).len(), 1);
    }
}
