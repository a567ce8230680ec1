//! Input state management
//!
//! Polls macroquad's keyboard state and exposes it through an action-based
//! API, then flattens the actions the core cares about into one `FrameInput`
//! sample per tick. The session never sees key codes.

use macroquad::prelude::*;
use crate::game::FrameInput;

/// All possible game actions that can be triggered by input
///
/// Key mappings:
/// - Left/Right arrows = steer
/// - Space = start / restart
/// - C = continue past a story snippet
/// - 1 / 2 = pick the game variant on the title screen
/// - F5 / F9 = save / load the running session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveLeft,
    MoveRight,

    // Flow (edge-triggered)
    Start,
    Continue,
    Restart,

    // Variant select (title screen)
    PickEndlessAscent,
    PickTower,

    // System
    SaveSession,
    LoadSession,
}

/// Keyboard-backed input state
pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_down(KeyCode::Left),
            Action::MoveRight => is_key_down(KeyCode::Right),
            _ => false,
        }
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        match action {
            Action::Start => is_key_pressed(KeyCode::Space),
            Action::Restart => is_key_pressed(KeyCode::Space),
            Action::Continue => is_key_pressed(KeyCode::C),
            Action::PickEndlessAscent => is_key_pressed(KeyCode::Key1),
            Action::PickTower => is_key_pressed(KeyCode::Key2),
            Action::SaveSession => is_key_pressed(KeyCode::F5),
            Action::LoadSession => is_key_pressed(KeyCode::F9),
            _ => false,
        }
    }

    /// Flatten the current keyboard state into this tick's input sample
    pub fn sample(&self) -> FrameInput {
        FrameInput {
            left: self.action_down(Action::MoveLeft),
            right: self.action_down(Action::MoveRight),
            start: self.action_pressed(Action::Start),
            advance: self.action_pressed(Action::Continue),
            restart: self.action_pressed(Action::Restart),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
