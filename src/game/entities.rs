//! Session entities
//!
//! Plain data structs owned by the session. Behavior lives in the physics
//! and generator systems.

use serde::{Serialize, Deserialize};
use super::vec::Vec2;
use crate::config::GameConfig;

/// Which way the player sprite faces (render hint, flipped by movement input)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player avatar. Position is the top-left corner of its AABB.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub size: Vec2,
    pub facing: Facing,
}

impl Player {
    /// Place the player standing on top of a platform
    pub fn on_platform(platform: &Platform, config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                platform.pos.x + platform.size.x / 2.0 - config.player_size.x / 2.0,
                platform.pos.y - config.player_size.y,
            ),
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            size: config.player_size,
            facing: Facing::default(),
        }
    }

    /// Center of the player AABB (used for pickup distance checks)
    pub fn center(&self) -> Vec2 {
        self.pos + self.size.scale(0.5)
    }

    /// Bottom edge of the player AABB
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A bounce platform. Position is the top-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once the platform has scrolled below the camera midpoint and
    /// contributed to the score
    pub scored: bool,
    /// Landings on this platform so far (drives crumbling variants)
    pub jump_count: u32,
    /// The designated final platform of a capped tower
    pub is_goal: bool,
}

impl Platform {
    pub fn new(x: f32, y: f32, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size,
            scored: false,
            jump_count: 0,
            is_goal: false,
        }
    }

    /// Top edge (the landing surface)
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Does `[x_min, x_max]` overlap this platform horizontally?
    pub fn overlaps_x(&self, x_min: f32, x_max: f32) -> bool {
        x_max > self.pos.x && x_min < self.pos.x + self.size.x
    }
}

/// A collectible memory fragment. Removed from the session on pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fragment {
    pub pos: Vec2,
}

impl Fragment {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }
}
