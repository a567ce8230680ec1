//! SKYCLIMB: a vertical-scroller jump game
//!
//! Bounce up a procedurally generated tower of platforms, collect the four
//! memory fragments, and survive whatever waits at the top. The simulation
//! is a deterministic fixed-rate core; this binary is the thin shell that
//! pumps it with input and draws it.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod input;
mod render;
mod save;

use macroquad::prelude::*;
use config::{Barrier, GameConfig};
use game::{GameState, Session};
use input::{Action, InputState};

/// Where F5/F9 keep the running session
const SNAPSHOT_PATH: &str = "session.sky";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("SKYCLIMB v{}", VERSION),
        window_width: 500,
        window_height: 600,
        window_resizable: false,
        ..Default::default()
    }
}

/// Variant 1: endless climb with a kill barrier high above the start,
/// gated around the centerline
fn endless_ascent_config() -> GameConfig {
    GameConfig::default().with_barrier(Barrier {
        y: -42_000.0,
        height: 500.0,
        gate_x_min: 210.0,
        gate_x_max: 290.0,
    })
}

/// Variant 2: a 500-platform tower with a gold goal platform at the top
/// and platforms that crumble after two landings
fn tower_config() -> GameConfig {
    GameConfig::default()
        .with_platform_cap(500)
        .with_crumbling(2)
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let seed = miniquad::date::now() as u32;
    let mut session = match Session::new(endless_ascent_config(), seed) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to initialize session: {}", e);
            return;
        }
    };

    let input = InputState::new();

    loop {
        // Sample input once, before the tick
        let frame_input = input.sample();

        // Variant select only on the title screen
        if session.state() == GameState::Title {
            let picked = if input.action_pressed(Action::PickEndlessAscent) {
                Some(endless_ascent_config())
            } else if input.action_pressed(Action::PickTower) {
                Some(tower_config())
            } else {
                None
            };
            if let Some(config) = picked {
                let seed = miniquad::date::now() as u32;
                match Session::new(config, seed) {
                    Ok(fresh) => session = fresh,
                    Err(e) => eprintln!("Failed to switch variant: {}", e),
                }
            }
        }

        if input.action_pressed(Action::SaveSession) {
            match save::save_snapshot(&session.snapshot(), SNAPSHOT_PATH) {
                Ok(()) => println!("Session saved to {}", SNAPSHOT_PATH),
                Err(e) => eprintln!("Save failed: {}", e),
            }
        }
        if input.action_pressed(Action::LoadSession) {
            // A bad file leaves the running session untouched
            match save::load_snapshot(SNAPSHOT_PATH)
                .map_err(|e| e.to_string())
                .and_then(|snapshot| Session::from_snapshot(snapshot).map_err(|e| e.to_string()))
            {
                Ok(restored) => {
                    session = restored;
                    println!("Session restored from {}", SNAPSHOT_PATH);
                }
                Err(e) => eprintln!("Load failed: {}", e),
            }
        }

        session.tick(&frame_input);
        render::draw_session(&session);

        next_frame().await
    }
}
