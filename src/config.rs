//! Session configuration
//!
//! Every physics and generator constant lives here with named fields and
//! documented units, instead of being scattered through the update code.
//! Units: positions/sizes in pixels, velocities in pixels/tick,
//! accelerations in pixels/tick². One tick corresponds to one rendered frame.
//!
//! A config is validated once, before a session is built. Invalid values
//! abort initialization; nothing downstream re-checks them.

use serde::{Serialize, Deserialize};
use crate::game::Vec2;

/// Error type for session configuration
#[derive(Debug)]
pub enum ConfigError {
    InvalidViewport(String),
    InvalidPhysics(String),
    InvalidGenerator(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidViewport(e) => write!(f, "Invalid viewport: {}", e),
            ConfigError::InvalidPhysics(e) => write!(f, "Invalid physics: {}", e),
            ConfigError::InvalidGenerator(e) => write!(f, "Invalid generator: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A horizontal slab the player must not cross inside its gate window.
/// Touching it while within [gate_x_min, gate_x_max] ends the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Barrier {
    /// Top edge of the slab (world y, negative = high above the start)
    pub y: f32,
    /// Slab height in pixels
    pub height: f32,
    /// Left edge of the gate window (world x)
    pub gate_x_min: f32,
    /// Right edge of the gate window (world x)
    pub gate_x_max: f32,
}

/// All tunables for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Logical viewport width in pixels
    pub viewport_width: f32,
    /// Logical viewport height in pixels
    pub viewport_height: f32,

    /// Constant acceleration applied every tick (pixels/tick²)
    pub gravity: Vec2,
    /// Vertical velocity set on landing (pixels/tick, negative = upward)
    pub bounce_velocity: f32,
    /// Horizontal speed while a move key is held (pixels/tick)
    pub move_speed: f32,
    /// Player AABB size in pixels
    pub player_size: Vec2,

    /// Platform AABB size in pixels
    pub platform_size: Vec2,
    /// Vertical gap between generated platforms (pixels)
    pub platform_spacing: f32,
    /// Horizontal placement range for generated platforms (world x)
    pub platform_x_min: f32,
    pub platform_x_max: f32,
    /// Extra distance above the viewport that must stay populated (pixels)
    pub spawn_buffer: f32,
    /// Platforms created at session start
    pub initial_platforms: usize,
    /// Stop generating past this many platforms; the last one is the goal.
    /// None = endless.
    pub max_platforms: Option<usize>,
    /// Remove a platform after this many landings. None = indestructible.
    pub crumble_after: Option<u32>,

    /// Fragment placement, in platform-spacing steps above the start
    /// (a fragment at level n sits at y = viewport_height - n * spacing)
    pub fragment_levels: Vec<f32>,
    /// Pickup distance from player center to fragment center (pixels,
    /// collection uses strict less-than)
    pub pickup_radius: f32,

    /// How far below the viewport bottom the player may fall before the
    /// session ends (pixels)
    pub fall_margin: f32,
    /// Optional kill barrier near the top of the climb
    pub barrier: Option<Barrier>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 500.0,
            viewport_height: 600.0,
            gravity: Vec2::new(0.0, 0.5),
            bounce_velocity: -10.0,
            move_speed: 5.0,
            player_size: Vec2::new(40.0, 40.0),
            platform_size: Vec2::new(80.0, 15.0),
            platform_spacing: 60.0,
            platform_x_min: 50.0,
            platform_x_max: 400.0,
            spawn_buffer: 100.0,
            initial_platforms: 10,
            max_platforms: None,
            crumble_after: None,
            fragment_levels: vec![100.0, 200.0, 300.0, 400.0],
            pickup_radius: 30.0,
            fall_margin: 100.0,
            barrier: None,
        }
    }
}

impl GameConfig {
    /// Add a kill barrier above the climb
    pub fn with_barrier(mut self, barrier: Barrier) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// Cap the tower at `count` platforms; the last one becomes the goal
    pub fn with_platform_cap(mut self, count: usize) -> Self {
        self.max_platforms = Some(count);
        self
    }

    /// Make platforms crumble after `landings` bounces
    pub fn with_crumbling(mut self, landings: u32) -> Self {
        self.crumble_after = Some(landings);
        self
    }

    /// Validate the configuration. Called once at session init; an error
    /// here aborts initialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_width > 0.0 && self.viewport_width.is_finite()) {
            return Err(ConfigError::InvalidViewport(format!(
                "viewport_width must be positive and finite, got {}",
                self.viewport_width
            )));
        }
        if !(self.viewport_height > 0.0 && self.viewport_height.is_finite()) {
            return Err(ConfigError::InvalidViewport(format!(
                "viewport_height must be positive and finite, got {}",
                self.viewport_height
            )));
        }

        if !self.gravity.x.is_finite() || !self.gravity.y.is_finite() {
            return Err(ConfigError::InvalidPhysics("gravity must be finite".into()));
        }
        if !(self.bounce_velocity < 0.0) {
            return Err(ConfigError::InvalidPhysics(format!(
                "bounce_velocity must be negative (upward), got {}",
                self.bounce_velocity
            )));
        }
        if !(self.move_speed >= 0.0 && self.move_speed.is_finite()) {
            return Err(ConfigError::InvalidPhysics(format!(
                "move_speed must be non-negative and finite, got {}",
                self.move_speed
            )));
        }
        if self.player_size.x <= 0.0 || self.player_size.y <= 0.0 {
            return Err(ConfigError::InvalidPhysics("player_size must be positive".into()));
        }

        if self.platform_size.x <= 0.0 || self.platform_size.y <= 0.0 {
            return Err(ConfigError::InvalidGenerator("platform_size must be positive".into()));
        }
        if !(self.platform_spacing > 0.0 && self.platform_spacing.is_finite()) {
            return Err(ConfigError::InvalidGenerator(format!(
                "platform_spacing must be positive and finite, got {}",
                self.platform_spacing
            )));
        }
        if !(self.spawn_buffer >= 0.0 && self.spawn_buffer.is_finite()) {
            return Err(ConfigError::InvalidGenerator(format!(
                "spawn_buffer must be non-negative and finite, got {}",
                self.spawn_buffer
            )));
        }
        if self.platform_x_min >= self.platform_x_max {
            return Err(ConfigError::InvalidGenerator(format!(
                "platform x range is empty: [{}, {})",
                self.platform_x_min, self.platform_x_max
            )));
        }
        if self.initial_platforms == 0 {
            return Err(ConfigError::InvalidGenerator(
                "initial_platforms must be at least 1".into(),
            ));
        }
        if let Some(cap) = self.max_platforms {
            if cap < self.initial_platforms {
                return Err(ConfigError::InvalidGenerator(format!(
                    "max_platforms ({}) is below initial_platforms ({})",
                    cap, self.initial_platforms
                )));
            }
        }
        if self.crumble_after == Some(0) {
            return Err(ConfigError::InvalidGenerator(
                "crumble_after must be at least 1 landing".into(),
            ));
        }

        if !(self.pickup_radius > 0.0 && self.pickup_radius.is_finite()) {
            return Err(ConfigError::InvalidGenerator(format!(
                "pickup_radius must be positive and finite, got {}",
                self.pickup_radius
            )));
        }
        if !(self.fall_margin >= 0.0 && self.fall_margin.is_finite()) {
            return Err(ConfigError::InvalidPhysics(format!(
                "fall_margin must be non-negative and finite, got {}",
                self.fall_margin
            )));
        }
        if let Some(b) = &self.barrier {
            if !b.y.is_finite() || !(b.height > 0.0 && b.height.is_finite()) {
                return Err(ConfigError::InvalidPhysics("barrier extents must be finite".into()));
            }
            if b.gate_x_min >= b.gate_x_max {
                return Err(ConfigError::InvalidPhysics(format!(
                    "barrier gate window is empty: [{}, {}]",
                    b.gate_x_min, b.gate_x_max
                )));
            }
        }

        Ok(())
    }
}
