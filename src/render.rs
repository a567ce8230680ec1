//! Screen rendering
//!
//! Immediate-mode drawing for every session state. The world is drawn in
//! world coordinates shifted by the session's camera offset; HUD elements
//! (score, fragment tally, overlay text) are drawn in fixed screen space.
//! No image assets: shapes and text only.

use macroquad::prelude::*;
use crate::game::{particles, Facing, GameState, Session};

// =============================================================================
// Palette
// =============================================================================

/// Sky gradient base
const BG_COLOR: Color = Color::new(0.10, 0.12, 0.20, 1.0);

/// Platform fill
const PLATFORM_COLOR: Color = Color::new(0.64, 0.09, 0.10, 1.0);

/// Goal platform fill
const GOAL_COLOR: Color = Color::new(0.99, 0.72, 0.07, 1.0);

/// Player body
const PLAYER_COLOR: Color = Color::new(0.85, 0.88, 0.95, 1.0);

/// Fragment glow
const FRAGMENT_COLOR: Color = Color::new(1.00, 0.86, 0.31, 1.0);

/// Barrier slab
const BARRIER_COLOR: Color = Color::new(1.00, 0.65, 0.00, 1.0);

/// Primary text
const TEXT_COLOR: Color = WHITE;

/// Text shadow for contrast over the world
const TEXT_SHADOW: Color = Color::new(0.0, 0.0, 0.0, 0.9);

// =============================================================================
// Story
// =============================================================================

/// One snippet per fragment, in pickup order
pub const STORY_SNIPPETS: [&str; 4] = [
    "The first fragment hums with a voice\nyou almost remember.",
    "Higher now. The wind carries names\nyou once answered to.",
    "The third fragment burns cold.\nDo not look down.",
    "One more. Past the last platform\nthere is only light.",
];

/// Draw the whole frame for the current session state
pub fn draw_session(session: &Session) {
    clear_background(BG_COLOR);

    match session.state() {
        GameState::Title => draw_title(session),
        GameState::Playing => {
            draw_world(session);
            draw_hud(session);
        }
        GameState::StorySnippet => draw_story(session),
        GameState::GameOver => {
            draw_world(session);
            draw_hud(session);
            draw_game_over(session);
        }
        GameState::Victory => {
            draw_world(session);
            draw_victory(session);
        }
    }
}

// =============================================================================
// World
// =============================================================================

fn draw_world(session: &Session) {
    let offset = session.camera_offset();

    // Platforms
    for platform in &session.platforms {
        let color = if platform.is_goal { GOAL_COLOR } else { PLATFORM_COLOR };
        draw_rectangle(
            platform.pos.x,
            platform.pos.y + offset,
            platform.size.x,
            platform.size.y,
            color,
        );
        draw_rectangle_lines(
            platform.pos.x,
            platform.pos.y + offset,
            platform.size.x,
            platform.size.y,
            3.0,
            WHITE,
        );
    }

    // Fragments
    for fragment in &session.fragments {
        let y = fragment.pos.y + offset;
        draw_circle(fragment.pos.x, y, 10.0, FRAGMENT_COLOR);
        draw_circle_lines(fragment.pos.x, y, 14.0, 2.0, FRAGMENT_COLOR);
    }

    // Barrier
    if let Some(barrier) = &session.config().barrier {
        draw_rectangle(
            0.0,
            barrier.y + offset,
            session.config().viewport_width,
            barrier.height,
            BARRIER_COLOR,
        );
    }

    // Player (simple capsule body with an eye marking the facing)
    let player = &session.player;
    draw_rectangle(
        player.pos.x,
        player.pos.y + offset,
        player.size.x,
        player.size.y,
        PLAYER_COLOR,
    );
    let eye_x = match player.facing {
        Facing::Left => player.pos.x + player.size.x * 0.25,
        Facing::Right => player.pos.x + player.size.x * 0.75,
    };
    draw_circle(eye_x, player.pos.y + offset + player.size.y * 0.3, 4.0, BLACK);

    // Particles
    for particle in session.particles.iter_alive() {
        let [r, g, b] = particles::particle_color(particle);
        draw_rectangle(
            particle.position.x,
            particle.position.y + offset,
            particle.size,
            particle.size,
            Color::from_rgba(r, g, b, 255),
        );
    }
}

// =============================================================================
// HUD and overlays
// =============================================================================

fn draw_hud(session: &Session) {
    shadowed_text(&format!("{}", session.score), 10.0, 30.0, 32.0);

    // Collected fragments side by side below the score
    for i in 0..session.collected_fragments {
        draw_circle(22.0 + i as f32 * 32.0, 60.0, 10.0, FRAGMENT_COLOR);
    }

    if session.goal_landing_hint {
        centered_text(
            session,
            "The summit does not know you yet",
            session.config().viewport_height / 2.0,
            24.0,
        );
    }
}

fn draw_title(session: &Session) {
    let mid_x = session.config().viewport_width / 2.0;
    let mid_y = session.config().viewport_height / 2.0;

    centered_text(session, "SKYCLIMB", mid_y - 80.0, 48.0);
    centered_text(session, "Climb. Collect every fragment.", mid_y - 20.0, 22.0);
    centered_text(session, "Arrow keys to steer", mid_y + 20.0, 20.0);
    let variant = if session.config().max_platforms.is_some() {
        "1: Endless Ascent   [2: The Tower]"
    } else {
        "[1: Endless Ascent]   2: The Tower"
    };
    centered_text(session, variant, mid_y + 50.0, 18.0);
    centered_text(session, "Press SPACE to begin", mid_y + 90.0, 22.0);

    // A little preview perch under the title
    draw_rectangle(mid_x - 40.0, mid_y + 120.0, 80.0, 15.0, PLATFORM_COLOR);
}

fn draw_story(session: &Session) {
    let mid_y = session.config().viewport_height / 2.0;

    let snippet = session
        .snippet_index
        .and_then(|i| STORY_SNIPPETS.get(i))
        .copied()
        .unwrap_or("");
    for (line_no, line) in snippet.lines().enumerate() {
        centered_text(session, line, mid_y - 40.0 + line_no as f32 * 28.0, 24.0);
    }

    centered_text(session, "Press 'C' to continue...", mid_y + 60.0, 18.0);
}

fn draw_game_over(session: &Session) {
    let mid_y = session.config().viewport_height / 2.0;

    centered_text(session, "The climb ends here", mid_y - 50.0, 34.0);
    centered_text(session, "Press SPACE to restart", mid_y + 20.0, 22.0);
}

fn draw_victory(session: &Session) {
    let mid_y = session.config().viewport_height / 2.0;

    centered_text(session, "You reached the light", mid_y - 50.0, 34.0);
    centered_text(
        session,
        &format!("Score: {}", session.score),
        mid_y,
        24.0,
    );
    centered_text(session, "Press SPACE to play again", mid_y + 50.0, 22.0);
}

// =============================================================================
// Text helpers
// =============================================================================

/// Text with a one-pixel drop shadow (stands in for the outlined text the
/// HUD needs over a busy background)
fn shadowed_text(text: &str, x: f32, y: f32, size: f32) {
    draw_text(text, x + 2.0, y + 2.0, size, TEXT_SHADOW);
    draw_text(text, x, y, size, TEXT_COLOR);
}

/// Horizontally centered shadowed text at a fixed screen-space height
fn centered_text(session: &Session, text: &str, y: f32, size: f32) {
    let dims = measure_text(text, None, size as u16, 1.0);
    let x = (session.config().viewport_width - dims.width) / 2.0;
    shadowed_text(text, x.round(), y.round(), size);
}
