//! Event queues
//!
//! Decoupled communication between the session systems. Physics reports a
//! landing; scoring, particles, and audio hooks each read it without knowing
//! about the others. Queues are filled during a tick and cleared when the
//! tick ends.

use super::vec::Vec2;
use super::state::GameState;

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Check if there are any events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of events in queue
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all session events
#[derive(Debug, Default)]
pub struct Events {
    /// The player landed on a platform
    pub landed: EventQueue<LandedEvent>,

    /// A memory fragment was picked up
    pub fragment_collected: EventQueue<FragmentCollectedEvent>,

    /// The state tag changed
    pub state_changed: EventQueue<StateChangedEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Call at end of tick.
    pub fn clear_all(&mut self) {
        self.landed.clear();
        self.fragment_collected.clear();
        self.state_changed.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// The player landed on a platform
#[derive(Debug, Clone, Copy)]
pub struct LandedEvent {
    /// Index of the platform in the session's collection at landing time
    pub platform_index: usize,
    /// Where the player's feet touched (world space, for VFX)
    pub position: Vec2,
    /// Whether the landing removed the platform (crumble variants)
    pub crumbled: bool,
    /// Whether the platform was the goal platform
    pub on_goal: bool,
}

/// A memory fragment was picked up
#[derive(Debug, Clone, Copy)]
pub struct FragmentCollectedEvent {
    /// Where the fragment was (world space, for VFX)
    pub position: Vec2,
    /// How many fragments are collected now
    pub total_collected: usize,
}

/// The state tag changed
#[derive(Debug, Clone, Copy)]
pub struct StateChangedEvent {
    pub from: GameState,
    pub to: GameState,
}
