//! Game session
//!
//! The session owns the state tag and every entity collection, and advances
//! them one tick at a time. Exactly one `tick()` runs to completion per
//! rendered frame; input arrives pre-sampled in a `FrameInput`, so the core
//! never touches the window layer and runs headless in tests.
//!
//! End conditions are evaluated once per Playing tick, in priority order:
//! falling off the world, then the barrier, then victory. At most one fires,
//! and a story transition triggered by a pickup yields to all of them.

use serde::{Serialize, Deserialize};
use super::entities::{Fragment, Platform, Player};
use super::events::{Events, FragmentCollectedEvent, LandedEvent, StateChangedEvent};
use super::generator::{self, PlatformGenerator};
use super::particles::{BurstDef, ParticlePool};
use super::physics;
use super::rng::GameRng;
use super::state::{transition, GameState, StateEvent};
use crate::config::{ConfigError, GameConfig};

/// One tick's worth of sampled input. Held flags reflect current key state;
/// the pressed flags are edge-triggered.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Move-left control is held
    pub left: bool,
    /// Move-right control is held
    pub right: bool,
    /// Start was just pressed (title screen)
    pub start: bool,
    /// Continue was just pressed (story overlay)
    pub advance: bool,
    /// Restart was just pressed (terminal screens)
    pub restart: bool,
}

/// A complete game session: state machine, entities, score, RNG.
pub struct Session {
    config: GameConfig,
    state: GameState,

    pub player: Player,
    pub platforms: Vec<Platform>,
    pub fragments: Vec<Fragment>,
    pub score: u32,
    /// Fragments picked up so far this run
    pub collected_fragments: usize,
    /// Index of the story snippet to show while in StorySnippet
    pub snippet_index: Option<usize>,
    /// Set while the player bounces on the goal platform without having
    /// collected every fragment (render hint, cleared every tick)
    pub goal_landing_hint: bool,

    rng: GameRng,
    generator: PlatformGenerator,

    /// Intra-tick event plumbing, cleared when the tick ends
    pub events: Events,
    /// Cosmetic particles, not part of snapshots
    pub particles: ParticlePool,
}

impl Session {
    /// Validate the config and build a session sitting on the title screen
    /// with a fresh set of entities behind it.
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(seed);
        let mut platform_gen = PlatformGenerator::new();
        let platforms = platform_gen.seed_initial(&config, &mut rng);
        let fragments = generator::place_fragments(&config);
        let spawn_perch = platforms[platforms.len() - 1];
        let player = Player::on_platform(&spawn_perch, &config);

        Ok(Self {
            config,
            state: GameState::Title,
            player,
            platforms,
            fragments,
            score: 0,
            collected_fragments: 0,
            snippet_index: None,
            goal_landing_hint: false,
            rng,
            generator: platform_gen,
            events: Events::new(),
            particles: ParticlePool::new(),
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Vertical render translation simulating the scroll
    pub fn camera_offset(&self) -> f32 {
        (self.config.viewport_height / 2.0 - self.player.pos.y).max(0.0)
    }

    /// Total fragments this session places
    pub fn total_fragments(&self) -> usize {
        self.config.fragment_levels.len()
    }

    /// Reset all session entities for a fresh run. The RNG keeps running so
    /// every run gets a different tower.
    fn init_entities(&mut self) {
        self.generator = PlatformGenerator::new();
        self.platforms = self.generator.seed_initial(&self.config, &mut self.rng);
        self.fragments = generator::place_fragments(&self.config);
        let spawn_perch = self.platforms[self.platforms.len() - 1];
        self.player = Player::on_platform(&spawn_perch, &self.config);
        self.score = 0;
        self.collected_fragments = 0;
        self.snippet_index = None;
        self.goal_landing_hint = false;
        self.particles.clear();
    }

    /// Run one tick. Dispatches on the current state; only Playing advances
    /// the simulation.
    pub fn tick(&mut self, input: &FrameInput) {
        match self.state {
            GameState::Title => {
                if input.start {
                    self.init_entities();
                    self.apply(StateEvent::Start);
                }
            }
            GameState::Playing => self.tick_playing(input),
            GameState::StorySnippet => {
                if input.advance {
                    self.apply(StateEvent::Continue);
                }
            }
            GameState::GameOver | GameState::Victory => {
                if input.restart {
                    self.apply(StateEvent::Restart);
                }
            }
        }

        self.events.clear_all();
    }

    fn tick_playing(&mut self, input: &FrameInput) {
        self.goal_landing_hint = false;

        // Physics
        physics::apply_movement(&mut self.player, input.left, input.right, self.config.move_speed);
        physics::integrate(&mut self.player, self.config.gravity);
        physics::wrap_horizontal(&mut self.player, self.config.viewport_width);

        let mut landed_on_goal = false;
        if let Some(outcome) = physics::resolve_landing(
            &mut self.player,
            &mut self.platforms,
            self.config.bounce_velocity,
            self.config.crumble_after,
        ) {
            landed_on_goal = outcome.on_goal;
            self.events.landed.send(LandedEvent {
                platform_index: outcome.platform_index,
                position: outcome.position,
                crumbled: outcome.crumbled,
                on_goal: outcome.on_goal,
            });
        }

        // Platform window maintenance: extend coverage above, then drop what
        // scrolled past below. Coverage runs first so the collection is never
        // empty when the generator reads it.
        self.generator.ensure_coverage(
            &mut self.platforms,
            self.player.pos.y,
            &self.config,
            &mut self.rng,
        );
        generator::prune_passed(
            &mut self.platforms,
            self.player.pos.y,
            self.config.viewport_height,
        );

        // Fragment pickup (at most one per tick); the story transition is
        // deferred until the end conditions have had their say
        let story_pending = self.collect_fragments();

        // Score platforms that scrolled below the camera midpoint
        let score_line = self.player.pos.y + self.config.viewport_height / 2.0;
        for platform in &mut self.platforms {
            if platform.pos.y > score_line && !platform.scored {
                platform.scored = true;
                self.score += 1;
            }
        }

        // End conditions beat the story transition; at most one fires
        if let Some(end_event) = self.evaluate_end_conditions(landed_on_goal) {
            self.apply(end_event);
        } else if story_pending {
            self.apply(StateEvent::FragmentCollected);
        }

        self.spawn_effects();
        self.particles.update();
    }

    /// Check the end conditions in priority order: falling off the world,
    /// then the barrier, then victory.
    fn evaluate_end_conditions(&mut self, landed_on_goal: bool) -> Option<StateEvent> {
        if self.player.pos.y > self.config.viewport_height + self.config.fall_margin {
            return Some(StateEvent::Fell);
        }
        if let Some(barrier) = &self.config.barrier {
            if self.player.pos.y <= barrier.y + barrier.height
                && self.player.pos.x > barrier.gate_x_min
                && self.player.pos.x < barrier.gate_x_max
            {
                return Some(StateEvent::BarrierHit);
            }
        }
        if self.victory_reached(landed_on_goal) {
            return Some(StateEvent::Won);
        }
        None
    }

    /// Scan fragments (reverse index order, removal-safe) and pick up the
    /// first one in reach. Returns whether a story snippet is due.
    fn collect_fragments(&mut self) -> bool {
        let center = self.player.center();
        for i in (0..self.fragments.len()).rev() {
            if center.dist(self.fragments[i].pos) < self.config.pickup_radius {
                let fragment = self.fragments.remove(i);
                self.collected_fragments += 1;
                self.snippet_index = Some(self.collected_fragments - 1);
                self.events.fragment_collected.send(FragmentCollectedEvent {
                    position: fragment.pos,
                    total_collected: self.collected_fragments,
                });
                return true;
            }
        }
        false
    }

    fn victory_reached(&mut self, landed_on_goal: bool) -> bool {
        let all_collected = self.collected_fragments == self.total_fragments();
        if self.config.max_platforms.is_some() {
            // Capped tower: the run ends on the goal platform
            if landed_on_goal && !all_collected {
                self.goal_landing_hint = true;
            }
            landed_on_goal && all_collected
        } else {
            all_collected
        }
    }

    /// Turn this tick's events into particle bursts
    fn spawn_effects(&mut self) {
        for landed in self.events.landed.iter() {
            let count = if landed.crumbled { 16 } else { 6 };
            self.particles
                .spawn_burst(&BurstDef::dust(), landed.position, count);
        }
        for collected in self.events.fragment_collected.iter() {
            self.particles
                .spawn_burst(&BurstDef::sparks(), collected.position, 24);
        }
        for change in self.events.state_changed.iter() {
            if change.to == GameState::GameOver {
                self.particles
                    .spawn_burst(&BurstDef::dust(), self.player.center(), 24);
            }
        }
    }

    /// Route every state change through the transition table. Illegal
    /// events are ignored.
    fn apply(&mut self, event: StateEvent) -> bool {
        match transition(self.state, event) {
            Some(next) => {
                self.events.state_changed.send(StateChangedEvent {
                    from: self.state,
                    to: next,
                });
                self.state = next;
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Capture everything needed to resume this session with an identical
    /// trajectory. Particles and in-flight events are cosmetic and excluded.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config.clone(),
            state: self.state,
            player: self.player,
            platforms: self.platforms.clone(),
            fragments: self.fragments.clone(),
            score: self.score,
            collected_fragments: self.collected_fragments,
            snippet_index: self.snippet_index,
            rng: self.rng,
            generator: self.generator,
        }
    }

    /// Rebuild a session from a snapshot. The config is re-validated; a
    /// tampered snapshot fails the same way a bad config does.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self, ConfigError> {
        snapshot.config.validate()?;
        Ok(Self {
            config: snapshot.config,
            state: snapshot.state,
            player: snapshot.player,
            platforms: snapshot.platforms,
            fragments: snapshot.fragments,
            score: snapshot.score,
            collected_fragments: snapshot.collected_fragments,
            snippet_index: snapshot.snippet_index,
            goal_landing_hint: false,
            rng: snapshot.rng,
            generator: snapshot.generator,
            events: Events::new(),
            particles: ParticlePool::new(),
        })
    }
}

/// Serializable mid-session capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub config: GameConfig,
    pub state: GameState,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub fragments: Vec<Fragment>,
    pub score: u32,
    pub collected_fragments: usize,
    pub snippet_index: Option<usize>,
    pub rng: GameRng,
    pub generator: PlatformGenerator,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Barrier;
    use crate::game::Vec2;

    fn started_session(config: GameConfig) -> Session {
        let mut session = Session::new(config, 42).unwrap();
        session.tick(&FrameInput {
            start: true,
            ..Default::default()
        });
        assert_eq!(session.state(), GameState::Playing);
        session
    }

    /// Place the player so that this tick's integration carries its bottom
    /// edge into the landing window of the platform's top edge.
    fn drop_onto(session: &mut Session, platform: Platform, fall_speed: f32) {
        let gravity = session.config().gravity.y;
        let incoming = fall_speed + gravity;
        session.player.pos = Vec2::new(
            platform.pos.x,
            platform.top() - session.player.size.y - incoming - 1.0,
        );
        session.player.vel = Vec2::new(0.0, fall_speed);
    }

    #[test]
    fn test_first_tick_applies_one_gravity_step() {
        let mut session = started_session(GameConfig::default());

        // Spawn perch: ten platforms from y=600 down to y=60, player on top
        assert_eq!(session.platforms.len(), 10);
        assert_eq!(session.platforms[9].pos.y, 60.0);
        let y0 = session.player.pos.y;

        session.tick(&FrameInput::default());
        assert_eq!(session.player.vel.y, 0.5);
        assert_eq!(session.player.pos.y, y0 + 0.5);
    }

    #[test]
    fn test_fall_past_threshold_is_game_over_and_sticky() {
        let mut session = started_session(GameConfig::default());
        let threshold = session.config().viewport_height + session.config().fall_margin;

        session.player.pos.y = threshold + 1.0;
        session.player.vel = Vec2::ZERO;
        session.tick(&FrameInput::default());
        assert_eq!(session.state(), GameState::GameOver);

        // Force the victory condition; the terminal state must hold anyway
        session.collected_fragments = session.total_fragments();
        for _ in 0..5 {
            session.tick(&FrameInput::default());
            assert_eq!(session.state(), GameState::GameOver);
        }

        // Only the restart input leaves the terminal screen
        session.tick(&FrameInput {
            restart: true,
            ..Default::default()
        });
        assert_eq!(session.state(), GameState::Title);
    }

    #[test]
    fn test_pickup_boundary_is_strict() {
        let mut config = GameConfig::default();
        config.gravity = Vec2::ZERO; // hold the player still for an exact distance
        let mut session = started_session(config);

        let fragment_pos = session.fragments[0].pos;
        let half = session.player.size.scale(0.5);

        // Exactly at the pickup radius: not collected
        session.player.pos = Vec2::new(fragment_pos.x + 30.0, fragment_pos.y) - half;
        session.player.vel = Vec2::ZERO;
        session.tick(&FrameInput::default());
        assert_eq!(session.collected_fragments, 0);
        assert_eq!(session.state(), GameState::Playing);

        // Just inside: collected, and the story overlay comes up
        session.player.pos = Vec2::new(fragment_pos.x + 29.999, fragment_pos.y) - half;
        session.tick(&FrameInput::default());
        assert_eq!(session.collected_fragments, 1);
        assert_eq!(session.snippet_index, Some(0));
        assert_eq!(session.state(), GameState::StorySnippet);
    }

    #[test]
    fn test_story_overlay_freezes_the_simulation() {
        let mut config = GameConfig::default();
        config.gravity = Vec2::ZERO;
        let mut session = started_session(config);

        let fragment_pos = session.fragments[0].pos;
        session.player.pos = fragment_pos - session.player.size.scale(0.5);
        session.tick(&FrameInput::default());
        assert_eq!(session.state(), GameState::StorySnippet);

        let frozen_pos = session.player.pos;
        let frozen_score = session.score;
        for _ in 0..10 {
            session.tick(&FrameInput {
                left: true,
                ..Default::default()
            });
        }
        assert_eq!(session.player.pos, frozen_pos);
        assert_eq!(session.score, frozen_score);

        session.tick(&FrameInput {
            advance: true,
            ..Default::default()
        });
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn test_collecting_every_fragment_wins_an_uncapped_run() {
        let mut config = GameConfig::default();
        config.gravity = Vec2::ZERO;
        config.fragment_levels = vec![100.0];
        let mut session = started_session(config);

        let fragment_pos = session.fragments[0].pos;
        session.player.pos = fragment_pos - session.player.size.scale(0.5);
        session.tick(&FrameInput::default());

        // The last fragment wins outright; no story stop first
        assert_eq!(session.state(), GameState::Victory);
    }

    #[test]
    fn test_capped_run_needs_the_goal_platform() {
        let mut config = GameConfig::default().with_platform_cap(10);
        config.fragment_levels = vec![100.0];
        let mut session = started_session(config);

        // All fragments in hand, but not on the goal platform yet
        session.fragments.clear();
        session.collected_fragments = 1;

        let goal = session.platforms[9];
        assert!(goal.is_goal);
        drop_onto(&mut session, goal, 8.0);
        session.tick(&FrameInput::default());
        assert_eq!(session.state(), GameState::Victory);
    }

    #[test]
    fn test_goal_landing_without_fragments_only_hints() {
        let mut config = GameConfig::default().with_platform_cap(10);
        config.fragment_levels = vec![100.0];
        let mut session = started_session(config);

        let goal = session.platforms[9];
        drop_onto(&mut session, goal, 8.0);
        session.tick(&FrameInput::default());

        assert_eq!(session.state(), GameState::Playing);
        assert!(session.goal_landing_hint);
        // The bounce itself still happened
        assert_eq!(session.player.vel.y, session.config().bounce_velocity);
    }

    #[test]
    fn test_barrier_gate_ends_the_run() {
        let config = GameConfig::default().with_barrier(Barrier {
            y: -1000.0,
            height: 500.0,
            gate_x_min: 210.0,
            gate_x_max: 290.0,
        });
        let mut session = started_session(config);

        // Inside the gate window, at the slab's lower edge
        session.player.pos = Vec2::new(250.0, -510.0);
        session.player.vel = Vec2::ZERO;
        session.tick(&FrameInput::default());
        assert_eq!(session.state(), GameState::GameOver);
    }

    #[test]
    fn test_outside_the_gate_window_survives_the_barrier_line() {
        let config = GameConfig::default().with_barrier(Barrier {
            y: -1000.0,
            height: 500.0,
            gate_x_min: 210.0,
            gate_x_max: 290.0,
        });
        let mut session = started_session(config);

        session.player.pos = Vec2::new(100.0, -510.0);
        session.player.vel = Vec2::ZERO;
        session.tick(&FrameInput::default());
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn test_camera_offset_tracks_the_climb() {
        let mut session = started_session(GameConfig::default());

        // Below the midpoint the camera stays put
        session.player.pos.y = 400.0;
        assert_eq!(session.camera_offset(), 0.0);

        // Above it the offset follows the player
        session.player.pos.y = 100.0;
        assert_eq!(session.camera_offset(), 200.0);
    }

    #[test]
    fn test_score_counts_platforms_passed_below_the_midpoint() {
        let mut session = started_session(GameConfig::default());
        let before = session.score;

        // Climb one spacing's worth; the platforms crossing the midpoint
        // line score exactly once
        session.player.pos.y -= 60.0;
        session.player.vel = Vec2::ZERO;
        session.tick(&FrameInput::default());
        let after_first = session.score;
        assert!(after_first > before);

        session.tick(&FrameInput::default());
        assert_eq!(session.score, after_first);
    }

    #[test]
    fn test_restart_reseeds_the_tower() {
        let mut session = started_session(GameConfig::default());
        let first_layout: Vec<f32> = session.platforms.iter().map(|p| p.pos.x).collect();

        session.player.pos.y = session.config().viewport_height + 200.0;
        session.tick(&FrameInput::default());
        assert_eq!(session.state(), GameState::GameOver);

        session.tick(&FrameInput {
            restart: true,
            ..Default::default()
        });
        session.tick(&FrameInput {
            start: true,
            ..Default::default()
        });
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.collected_fragments, 0);

        let second_layout: Vec<f32> = session.platforms.iter().map(|p| p.pos.x).collect();
        assert_ne!(first_layout, second_layout);
    }

    #[test]
    fn test_snapshot_resume_replays_the_same_trajectory() {
        let inputs = |tick: usize| FrameInput {
            left: tick % 7 < 3,
            right: tick % 11 > 8,
            ..Default::default()
        };

        let mut live = started_session(GameConfig::default());
        for tick in 0..60 {
            live.tick(&inputs(tick));
        }

        let snapshot = live.snapshot();
        let saved = ron::to_string(&snapshot).unwrap();
        let restored: SessionSnapshot = ron::from_str(&saved).unwrap();
        let mut resumed = Session::from_snapshot(restored).unwrap();

        for tick in 60..240 {
            let input = inputs(tick);
            live.tick(&input);
            resumed.tick(&input);

            assert_eq!(live.state(), resumed.state(), "state diverged at tick {}", tick);
            assert_eq!(live.player.pos, resumed.player.pos, "position diverged at tick {}", tick);
            assert_eq!(live.player.vel, resumed.player.vel, "velocity diverged at tick {}", tick);
            assert_eq!(live.score, resumed.score, "score diverged at tick {}", tick);
            assert_eq!(live.platforms.len(), resumed.platforms.len());
        }
    }
}
