//! Procedural platform generator
//!
//! Keeps the climb populated: platforms must always exist at least
//! `spawn_buffer` beyond the top of the viewport relative to the player
//! (the coverage invariant), and platforms that scroll past the bottom are
//! pruned the same tick.
//!
//! Removal iterates indices high→low; removing index i during the scan
//! cannot skip or re-visit the unvisited lower indices.

use serde::{Serialize, Deserialize};
use super::entities::{Fragment, Platform};
use super::rng::GameRng;
use super::vec::Vec2;
use crate::config::GameConfig;

/// Spawns platforms ahead of the player and tracks the lifetime total so a
/// capped tower can designate its final platform as the goal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlatformGenerator {
    total_spawned: usize,
}

impl PlatformGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platforms spawned over the whole session, pruned or not
    pub fn total_spawned(&self) -> usize {
        self.total_spawned
    }

    /// Build the starting column of platforms, bottom to top.
    pub fn seed_initial(&mut self, config: &GameConfig, rng: &mut GameRng) -> Vec<Platform> {
        let mut platforms = Vec::with_capacity(config.initial_platforms);
        for i in 0..config.initial_platforms {
            let x = rng.random_range(config.platform_x_min, config.platform_x_max);
            let y = config.viewport_height - i as f32 * config.platform_spacing;
            platforms.push(self.spawn(x, y, config));
        }
        platforms
    }

    /// Append platforms until the topmost one is at least
    /// `spawn_buffer + viewport_height` above the player (or the cap is hit).
    ///
    /// Calling this with an empty collection is a broken initialization
    /// sequence and panics.
    pub fn ensure_coverage(
        &mut self,
        platforms: &mut Vec<Platform>,
        player_y: f32,
        config: &GameConfig,
        rng: &mut GameRng,
    ) {
        assert!(
            !platforms.is_empty(),
            "platform generator invoked with an empty collection"
        );

        let horizon = player_y - config.spawn_buffer - config.viewport_height;
        loop {
            let top_y = platforms
                .iter()
                .map(Platform::top)
                .fold(f32::INFINITY, f32::min);
            if top_y <= horizon {
                break;
            }
            if config
                .max_platforms
                .is_some_and(|cap| self.total_spawned >= cap)
            {
                break;
            }

            let x = rng.random_range(config.platform_x_min, config.platform_x_max);
            let platform = self.spawn(x, top_y - config.platform_spacing, config);
            platforms.push(platform);
        }
    }

    fn spawn(&mut self, x: f32, y: f32, config: &GameConfig) -> Platform {
        let mut platform = Platform::new(x, y, config.platform_size);
        self.total_spawned += 1;
        if config.max_platforms == Some(self.total_spawned) {
            platform.is_goal = true;
        }
        platform
    }
}

/// Remove platforms that have scrolled past the visible region below the
/// player. Reverse index scan so in-loop removal is safe.
pub fn prune_passed(platforms: &mut Vec<Platform>, player_y: f32, viewport_height: f32) {
    for i in (0..platforms.len()).rev() {
        if platforms[i].pos.y > player_y + viewport_height {
            platforms.remove(i);
        }
    }
}

/// Place the collectible fragments at their configured climb levels, on the
/// horizontal centerline.
pub fn place_fragments(config: &GameConfig) -> Vec<Fragment> {
    config
        .fragment_levels
        .iter()
        .map(|level| {
            Fragment::new(Vec2::new(
                config.viewport_width / 2.0,
                config.viewport_height - level * config.platform_spacing,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GameConfig, GameRng, PlatformGenerator, Vec<Platform>) {
        let config = GameConfig::default();
        let mut rng = GameRng::new(42);
        let mut generator = PlatformGenerator::new();
        let platforms = generator.seed_initial(&config, &mut rng);
        (config, rng, generator, platforms)
    }

    #[test]
    fn test_seed_spans_bottom_to_top() {
        let (config, _, generator, platforms) = setup();
        assert_eq!(platforms.len(), 10);
        assert_eq!(generator.total_spawned(), 10);
        assert_eq!(platforms[0].pos.y, 600.0);
        assert_eq!(platforms[9].pos.y, 600.0 - 9.0 * 60.0);
        for platform in &platforms {
            assert!(platform.pos.x >= config.platform_x_min);
            assert!(platform.pos.x < config.platform_x_max);
        }
    }

    #[test]
    fn test_coverage_invariant_holds_after_ensure() {
        let (config, mut rng, mut generator, mut platforms) = setup();
        let player_y = -500.0;

        generator.ensure_coverage(&mut platforms, player_y, &config, &mut rng);

        let top_y = platforms
            .iter()
            .map(Platform::top)
            .fold(f32::INFINITY, f32::min);
        assert!(top_y <= player_y - config.spawn_buffer - config.viewport_height);
    }

    #[test]
    fn test_ensure_coverage_is_idempotent() {
        let (config, mut rng, mut generator, mut platforms) = setup();
        let player_y = -500.0;

        generator.ensure_coverage(&mut platforms, player_y, &config, &mut rng);
        let after_first = platforms.len();
        let spawned_first = generator.total_spawned();

        generator.ensure_coverage(&mut platforms, player_y, &config, &mut rng);
        assert_eq!(platforms.len(), after_first);
        assert_eq!(generator.total_spawned(), spawned_first);
    }

    #[test]
    fn test_new_platforms_keep_fixed_spacing() {
        let (config, mut rng, mut generator, mut platforms) = setup();
        generator.ensure_coverage(&mut platforms, 0.0, &config, &mut rng);

        for pair in platforms.windows(2) {
            let gap = pair[0].pos.y - pair[1].pos.y;
            assert!((gap - config.platform_spacing).abs() < 0.001);
        }
    }

    #[test]
    #[should_panic(expected = "empty collection")]
    fn test_empty_collection_is_a_programming_error() {
        let (config, mut rng, mut generator, _) = setup();
        let mut platforms = Vec::new();
        generator.ensure_coverage(&mut platforms, 0.0, &config, &mut rng);
    }

    #[test]
    fn test_cap_stops_generation_and_marks_goal() {
        let mut config = GameConfig::default().with_platform_cap(25);
        config.spawn_buffer = 100.0;
        let mut rng = GameRng::new(42);
        let mut generator = PlatformGenerator::new();
        let mut platforms = generator.seed_initial(&config, &mut rng);

        // Far enough up that an uncapped generator would spawn hundreds
        generator.ensure_coverage(&mut platforms, -20_000.0, &config, &mut rng);

        assert_eq!(generator.total_spawned(), 25);
        let goals: Vec<_> = platforms.iter().filter(|p| p.is_goal).collect();
        assert_eq!(goals.len(), 1);
        // The goal is the topmost platform of the tower
        let top_y = platforms
            .iter()
            .map(Platform::top)
            .fold(f32::INFINITY, f32::min);
        assert_eq!(goals[0].top(), top_y);
    }

    #[test]
    fn test_prune_removes_exactly_the_passed_platforms() {
        let (config, _, _, mut platforms) = setup();
        // Player has climbed high enough that the bottom four platforms
        // (y = 420..600) are past the visible region
        let player_y = -200.0;
        let bound = player_y + config.viewport_height;

        prune_passed(&mut platforms, player_y, config.viewport_height);

        assert_eq!(platforms.len(), 6);
        assert!(platforms.iter().all(|p| p.pos.y <= bound));
    }

    #[test]
    fn test_prune_keeps_everything_in_view() {
        let (config, _, _, mut platforms) = setup();
        let before = platforms.len();
        // Player at the bottom: nothing has been passed yet
        prune_passed(&mut platforms, 560.0, config.viewport_height);
        assert_eq!(platforms.len(), before);
    }

    #[test]
    fn test_fragments_sit_on_the_centerline_at_their_levels() {
        let config = GameConfig::default();
        let fragments = place_fragments(&config);

        assert_eq!(fragments.len(), 4);
        for (fragment, level) in fragments.iter().zip(&config.fragment_levels) {
            assert_eq!(fragment.pos.x, config.viewport_width / 2.0);
            assert_eq!(
                fragment.pos.y,
                config.viewport_height - level * config.platform_spacing
            );
        }
    }
}
