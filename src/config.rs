//! Runtime gameplay tunables
//!
//! [`GameConfig::default`] mirrors [`crate::consts`], which stays the
//! authoritative source of defaults. A partial JSON document can override any
//! subset of fields; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Arena
    pub arena_width: f32,
    pub arena_height: f32,

    // Player
    pub player_size: f32,
    pub player_speed: f32,
    pub starting_hp: u32,

    // Enemies
    pub enemy_size: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub enemy_count: usize,
    pub spawn_clearance: f32,

    // Collisions
    pub collision_distance: f32,
    pub quiz_cooldown_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            starting_hp: STARTING_HP,
            enemy_size: ENEMY_SIZE,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemy_count: ENEMY_COUNT,
            spawn_clearance: SPAWN_CLEARANCE,
            collision_distance: COLLISION_DISTANCE,
            quiz_cooldown_ms: QUIZ_COOLDOWN_MS,
        }
    }
}

impl GameConfig {
    /// Overlay a (possibly partial) JSON document on the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply an optional override document. A missing, malformed or invalid
    /// document leaves the defaults in place.
    pub fn load_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json).and_then(|config| config.validate().map(|()| config)) {
            Ok(config) => {
                log::info!("Loaded game config overrides");
                config
            }
            Err(e) => {
                log::warn!("Ignoring game config: {}", e);
                Self::default()
            }
        }
    }

    /// Same config with different arena dimensions
    pub fn with_arena(mut self, width: f32, height: f32) -> Self {
        self.arena_width = width;
        self.arena_height = height;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("arena_width", self.arena_width as f64),
            ("arena_height", self.arena_height as f64),
            ("player_size", self.player_size as f64),
            ("player_speed", self.player_speed as f64),
            ("enemy_size", self.enemy_size as f64),
            ("enemy_speed_min", self.enemy_speed_min as f64),
            ("enemy_speed_max", self.enemy_speed_max as f64),
            ("spawn_clearance", self.spawn_clearance as f64),
            ("collision_distance", self.collision_distance as f64),
            ("quiz_cooldown_ms", self.quiz_cooldown_ms),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("enemy_size", self.enemy_size),
            ("collision_distance", self.collision_distance),
        ];
        for (name, value) in positive {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(self.enemy_speed_min >= 0.0 && self.enemy_speed_min < self.enemy_speed_max) {
            return Err(ConfigError::EmptySpeedRange {
                min: self.enemy_speed_min,
                max: self.enemy_speed_max,
            });
        }
        let non_negative = [
            ("spawn_clearance", self.spawn_clearance as f64),
            ("quiz_cooldown_ms", self.quiz_cooldown_ms),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.enemy_count == 0 {
            return Err(ConfigError::NoEnemies);
        }
        if self.starting_hp == 0 {
            return Err(ConfigError::NoHealth);
        }
        Ok(())
    }
}
