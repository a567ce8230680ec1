//! Entity physics
//!
//! Per-tick integration and landing resolution for the player. Units are
//! pixels/tick and pixels/tick²; there is no delta-time scaling because the
//! loop is frame-locked.
//!
//! Landing rules:
//! - Only evaluated while the player is descending (vel.y > 0).
//! - A platform is landed on when the player's bottom edge is at or above
//!   its top edge and would cross it within this tick's vertical travel,
//!   with the horizontal ranges overlapping.
//! - Platforms are scanned highest index first (newest first). First match
//!   wins. The reverse scan also makes in-loop removal safe: removing index
//!   i never shifts the unvisited lower indices.

use super::entities::{Facing, Platform, Player};
use super::vec::Vec2;

/// What a landing did, for event reporting
#[derive(Debug, Clone, Copy)]
pub struct LandingOutcome {
    /// Index of the platform landed on (pre-removal index)
    pub platform_index: usize,
    /// Contact point at the platform's top edge
    pub position: Vec2,
    /// The landing removed the platform
    pub crumbled: bool,
    /// The platform was the goal platform
    pub on_goal: bool,
}

/// Set horizontal velocity from held movement inputs
pub fn apply_movement(player: &mut Player, left: bool, right: bool, move_speed: f32) {
    player.vel.x = match (left, right) {
        (true, false) => -move_speed,
        (false, true) => move_speed,
        _ => 0.0,
    };
    if left && !right {
        player.facing = Facing::Left;
    } else if right && !left {
        player.facing = Facing::Right;
    }
}

/// Accumulate gravity and advance position by one tick
pub fn integrate(player: &mut Player, gravity: Vec2) {
    player.acc += gravity;
    player.vel += player.acc;
    player.pos += player.vel;
    player.acc = Vec2::ZERO;
}

/// Horizontal wraparound at the viewport edges (wrap, not clamp)
pub fn wrap_horizontal(player: &mut Player, viewport_width: f32) {
    if player.pos.x > viewport_width {
        player.pos.x = 0.0;
    }
    if player.pos.x < 0.0 {
        player.pos.x = viewport_width;
    }
}

/// Resolve a landing against the platform collection.
///
/// On a hit, sets the player's vertical velocity to `bounce_velocity`
/// (regardless of the incoming magnitude), bumps the platform's landing
/// count, and removes the platform once it has been landed on
/// `crumble_after` times.
pub fn resolve_landing(
    player: &mut Player,
    platforms: &mut Vec<Platform>,
    bounce_velocity: f32,
    crumble_after: Option<u32>,
) -> Option<LandingOutcome> {
    if player.vel.y <= 0.0 {
        return None;
    }

    let bottom = player.bottom();
    for i in (0..platforms.len()).rev() {
        let platform = &mut platforms[i];
        let top = platform.top();

        if platform.overlaps_x(player.pos.x, player.pos.x + player.size.x)
            && bottom <= top
            && bottom + player.vel.y >= top
        {
            player.vel.y = bounce_velocity;
            platform.jump_count += 1;

            let on_goal = platform.is_goal;
            // The goal platform never crumbles, or the run could become
            // unwinnable
            let crumbled =
                !platform.is_goal && crumble_after.is_some_and(|n| platform.jump_count >= n);
            let position = Vec2::new(player.center().x, top);
            if crumbled {
                platforms.remove(i);
            }

            return Some(LandingOutcome {
                platform_index: i,
                position,
                crumbled,
                on_goal,
            });
        }
    }

    None
}
