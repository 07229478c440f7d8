//! Cloud Hopper - an endless-jumper arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, game flow)
//! - `renderer`: Frame composition over a 2D raster surface
//! - `audio`: Procedural Web Audio sound cues (wasm only)
//! - `settings` / `highscores`: LocalStorage-backed preferences and scores

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the cadence the tuning assumes)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Reference playfield dimensions; all simulation runs in this space
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;
    /// Top of the ground strip; the player's feet rest exactly here
    pub const GROUND_Y: f32 = PLAYFIELD_HEIGHT - 100.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.5;
    /// Velocity applied by a jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    pub const MAX_JUMPS: u8 = 2;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 50.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 130.0;
    /// Ticks between spawns at game start
    pub const SPAWN_INTERVAL: u32 = 90;
    /// Leftward obstacle velocity at game start, units per tick
    pub const OBSTACLE_SPEED: f32 = 5.0;

    /// Difficulty ramp: applied once per `RAMP_SCORE_STEP` points
    pub const RAMP_SCORE_STEP: u32 = 5;
    pub const RAMP_SPEED_STEP: f32 = 0.5;
    pub const OBSTACLE_SPEED_MAX: f32 = 9.0;
    pub const RAMP_INTERVAL_STEP: u32 = 5;
    pub const SPAWN_INTERVAL_MIN: u32 = 50;

    /// Particle burst size per jump
    pub const JUMP_PARTICLES: usize = 10;
    /// Hard cap on live particles
    pub const MAX_PARTICLES: usize = 256;
    /// Particle shrink rate per tick
    pub const PARTICLE_DECAY: f32 = 0.1;

    /// Invincibility duration in ticks once armed
    pub const INVINCIBILITY_TICKS: u32 = 200;

    /// Background scroll speeds, units per tick
    pub const BG_SPEED: f32 = 2.0;
    pub const CLOUD_SPEED: f32 = 1.0;
    /// Cloud layer tile width; the cloud offset wraps modulo this
    pub const CLOUD_TILE_WIDTH: f32 = 400.0;
}
