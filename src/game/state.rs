//! Session state machine
//!
//! The state tag plus the single transition table. All legal transitions are
//! declared here once; the session never rewrites its state tag except
//! through `transition()`. Playing⇄StorySnippet is the only two-way pair,
//! and the terminal states only leave via Restart.

use serde::{Serialize, Deserialize};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Title / instructions, waiting for the start input
    #[default]
    Title,
    /// Live simulation
    Playing,
    /// Static story overlay; the simulation is frozen underneath
    StorySnippet,
    /// The player fell or hit the barrier
    GameOver,
    /// All fragments collected (and the goal reached, when one exists)
    Victory,
}

impl GameState {
    /// Is the session in a terminal screen waiting for a restart?
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::GameOver | GameState::Victory)
    }
}

/// Everything that can drive a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// Start input on the title screen
    Start,
    /// A fragment was picked up mid-climb
    FragmentCollected,
    /// Continue input on the story overlay
    Continue,
    /// The player dropped below the bottom-of-world threshold
    Fell,
    /// The player crossed the barrier inside its gate window
    BarrierHit,
    /// The victory condition was satisfied
    Won,
    /// Restart input on a terminal screen
    Restart,
}

/// The transition table. Returns None for illegal (state, event) pairs,
/// which callers must treat as "stay put".
pub fn transition(state: GameState, event: StateEvent) -> Option<GameState> {
    use GameState::*;
    use StateEvent::*;

    match (state, event) {
        (Title, Start) => Some(Playing),

        (Playing, FragmentCollected) => Some(StorySnippet),
        (Playing, Fell) => Some(GameOver),
        (Playing, BarrierHit) => Some(GameOver),
        (Playing, Won) => Some(Victory),

        (StorySnippet, Continue) => Some(Playing),

        (GameOver, Restart) => Some(Title),
        (Victory, Restart) => Some(Title),

        _ => None,
    }
}
