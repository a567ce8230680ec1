//! Particle effects
//!
//! Fixed-size pool of short-lived 2D particles for landing dust and pickup
//! sparks. Purely cosmetic: the pool is not part of session snapshots and
//! runs on its own RNG so bursts never perturb platform placement.

use super::rng::GameRng;
use super::vec::Vec2;

/// Maximum number of live particles
pub const MAX_PARTICLES: usize = 256;

/// A single particle in the pool
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// World position
    pub position: Vec2,
    /// Velocity (pixels/tick)
    pub velocity: Vec2,
    /// Downward acceleration (pixels/tick², negative floats up)
    pub gravity: f32,
    /// Remaining life in ticks
    pub life: f32,
    /// Total lifetime (for interpolation)
    pub max_life: f32,
    /// Start color (RGB 0-255)
    pub color_start: [u8; 3],
    /// End color (RGB 0-255)
    pub color_end: [u8; 3],
    /// Square size in pixels
    pub size: f32,
    /// Is this particle slot active?
    pub alive: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity: 0.0,
            life: 0.0,
            max_life: 1.0,
            color_start: [255, 255, 255],
            color_end: [128, 128, 128],
            size: 2.0,
            alive: false,
        }
    }
}

/// Definition for one kind of burst
#[derive(Debug, Clone, Copy)]
pub struct BurstDef {
    /// Minimum initial speed (pixels/tick)
    pub speed_min: f32,
    /// Maximum initial speed (pixels/tick)
    pub speed_max: f32,
    /// Downward acceleration per tick (negative floats up)
    pub gravity: f32,
    /// Minimum lifetime in ticks
    pub life_min: f32,
    /// Maximum lifetime in ticks
    pub life_max: f32,
    /// Start color (RGB 0-255)
    pub color_start: [u8; 3],
    /// End color (RGB 0-255)
    pub color_end: [u8; 3],
    /// Square size in pixels
    pub size: f32,
}

impl BurstDef {
    /// Landing dust (grey, slow, settles down)
    pub fn dust() -> Self {
        Self {
            speed_min: 0.5,
            speed_max: 2.0,
            gravity: 0.05,
            life_min: 10.0,
            life_max: 25.0,
            color_start: [150, 140, 130],
            color_end: [80, 75, 70],
            size: 3.0,
        }
    }

    /// Fragment pickup sparks (gold, fast, floats up)
    pub fn sparks() -> Self {
        Self {
            speed_min: 2.0,
            speed_max: 5.0,
            gravity: -0.02,
            life_min: 15.0,
            life_max: 40.0,
            color_start: [255, 220, 80],
            color_end: [255, 120, 0],
            size: 2.0,
        }
    }
}

/// The particle pool — manages all live particles
pub struct ParticlePool {
    pub particles: [Particle; MAX_PARTICLES],
    rng: GameRng,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self {
            particles: [Particle::default(); MAX_PARTICLES],
            rng: GameRng::new(12345),
        }
    }

    /// Find a dead particle slot
    fn find_free_slot(&self) -> Option<usize> {
        self.particles.iter().position(|p| !p.alive)
    }

    /// Spawn a single particle at a world position
    pub fn spawn_one(&mut self, def: &BurstDef, origin: Vec2) {
        if let Some(idx) = self.find_free_slot() {
            let speed = self.rng.random_range(def.speed_min, def.speed_max);
            let life = self.rng.random_range(def.life_min, def.life_max);
            let angle = self.rng.random_range(0.0, std::f32::consts::TAU);

            self.particles[idx] = Particle {
                position: origin,
                velocity: Vec2::new(angle.cos() * speed, angle.sin() * speed),
                gravity: def.gravity,
                life,
                max_life: life,
                color_start: def.color_start,
                color_end: def.color_end,
                size: def.size,
                alive: true,
            };
        }
    }

    /// Spawn a burst of particles (one-shot effects)
    pub fn spawn_burst(&mut self, def: &BurstDef, origin: Vec2, count: usize) {
        for _ in 0..count {
            self.spawn_one(def, origin);
        }
    }

    /// Advance all live particles by one tick
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            if !particle.alive {
                continue;
            }

            particle.life -= 1.0;
            if particle.life <= 0.0 {
                particle.alive = false;
                continue;
            }

            particle.velocity.y += particle.gravity;
            particle.position += particle.velocity;
        }
    }

    /// Iterate live particles (for rendering)
    pub fn iter_alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.alive)
    }

    /// Get count of live particles
    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }

    /// Kill all particles
    pub fn clear(&mut self) {
        for p in &mut self.particles {
            p.alive = false;
        }
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpolated display color for a particle (RGB 0-255)
pub fn particle_color(particle: &Particle) -> [u8; 3] {
    let t = 1.0 - (particle.life / particle.max_life);
    [
        lerp_u8(particle.color_start[0], particle.color_end[0], t),
        lerp_u8(particle.color_start[1], particle.color_end[1], t),
        lerp_u8(particle.color_start[2], particle.color_end[2], t),
    ]
}

/// Lerp between two u8 values
fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let result = a as f32 * (1.0 - t) + b as f32 * t;
    result.clamp(0.0, 255.0) as u8
}
