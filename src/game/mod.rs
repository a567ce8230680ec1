//! Game Core Module
//!
//! The deterministic heart of the vertical scroller: a fixed-rate tick loop
//! over an explicit session state, with no window or input dependencies so
//! every rule is unit-testable headless.
//!
//! Key concepts:
//! - Session: owns the state tag and all entity collections
//! - State machine: one transition table declares every legal state change
//! - Physics: per-tick gravity integration and landing resolution
//! - Generator: keeps platforms covering the climb ahead of the player
//!
//! Design philosophy:
//! - Explicit state over global mutables (sessions are values)
//! - Every constant named and unit-documented in the config
//! - Seeded randomness so trajectories replay exactly

// Allow unused code - event payload fields and introspection helpers are
// part of the module's API surface even where the shell doesn't read them yet
#![allow(dead_code)]

pub mod vec;
pub mod rng;
pub mod entities;
pub mod state;
pub mod events;
pub mod physics;
pub mod generator;
pub mod particles;
pub mod session;

// Re-export main types
pub use vec::Vec2;
pub use rng::GameRng;
pub use entities::{Facing, Fragment, Platform, Player};
pub use state::GameState;
pub use session::{FrameInput, Session, SessionSnapshot};
