//! Quiz Arena - an arena game where every monster asks a question
//!
//! Core modules:
//! - `sim`: Simulation (movement, collisions, quiz interrupts, progression)
//! - `catalogue`: Quiz question data and the built-in fallback
//! - `session`: Frame driver and discrete input handlers around the simulation
//! - `audio`: Cue playback capability
//! - `config` / `settings`: Tunables and persisted preferences

pub mod audio;
pub mod catalogue;
pub mod config;
pub mod error;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use catalogue::{Question, QuizCatalogue};
pub use config::GameConfig;
pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions (the browser reports the real size at startup)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player sprite footprint (square) and pixels moved per frame per axis
    pub const PLAYER_SIZE: f32 = 96.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const STARTING_HP: u32 = 3;

    /// Enemy sprite footprint (square)
    pub const ENEMY_SIZE: f32 = 72.0;
    /// Enemy speed is drawn uniformly from [MIN, MAX) pixels per frame
    pub const ENEMY_SPEED_MIN: f32 = 0.5;
    pub const ENEMY_SPEED_MAX: f32 = 2.0;
    /// Enemies spawned per round
    pub const ENEMY_COUNT: usize = 8;
    /// Number of enemy sprite images to cycle through
    pub const ENEMY_SPRITE_VARIANTS: u32 = 10;

    /// Minimum center-to-center distance between a new enemy and the player
    pub const SPAWN_CLEARANCE: f32 = 150.0;
    /// Random candidates tried before falling back to a side wall
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

    /// Center-to-center distance below which the player touches an enemy
    pub const COLLISION_DISTANCE: f32 = 50.0;
    /// An enemy can't ask another question until this much time has passed (ms)
    pub const QUIZ_COOLDOWN_MS: f64 = 1000.0;
    /// Pause after an enemy turns out to have no questions for its genre (ms)
    pub const MISSING_GENRE_DELAY_MS: f64 = 1000.0;

    /// Progression
    pub const EXP_PER_CORRECT: u32 = 20;
    pub const EXP_PER_LEVEL: u32 = 100;
}

/// Center of a square sprite whose top-left corner is at `pos`
#[inline]
pub fn sprite_center(pos: Vec2, size: f32) -> Vec2 {
    pos + Vec2::splat(size / 2.0)
}

/// Clamp a sprite's top-left corner so the whole sprite stays inside the arena
#[inline]
pub fn clamp_to_arena(pos: Vec2, size: f32, width: f32, height: f32) -> Vec2 {
    let max = Vec2::new((width - size).max(0.0), (height - size).max(0.0));
    pos.clamp(Vec2::ZERO, max)
}
