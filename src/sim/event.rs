//! Notifications from the simulation to the outside world
//!
//! The simulation never touches the DOM or the speakers. It records what
//! changed as `GameEvent`s; the presenter redraws from them and the session
//! forwards `Cue`s to the injected cue player.

use glam::Vec2;

use super::state::EnemyId;

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Looping field music
    Music,
    Correct,
    Wrong,
    LevelUp,
}

/// HUD values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub hp: u32,
    /// Experience toward the next level (0..100)
    pub exp: u32,
    pub level: u32,
}

impl Status {
    /// Filled fraction of the experience bar
    pub fn exp_fraction(&self) -> f32 {
        self.exp as f32 / crate::consts::EXP_PER_LEVEL as f32
    }

    pub fn hearts(&self) -> String {
        "♥".repeat(self.hp as usize)
    }

    pub fn exp_label(&self) -> String {
        format!("{}/{}", self.exp, crate::consts::EXP_PER_LEVEL)
    }

    pub fn level_label(&self) -> String {
        format!("Lv.{}", self.level)
    }
}

/// Heading shown above a question
pub fn quiz_heading(genre: &str) -> String {
    format!("【{}】の問題", genre)
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StatusChanged(Status),
    PlayerMoved { pos: Vec2 },
    EnemySpawned { id: EnemyId, pos: Vec2, genre: String, sprite: u32 },
    EnemyMoved { id: EnemyId, pos: Vec2 },
    EnemyRemoved { id: EnemyId },
    QuizShown { genre: String, prompt: String, options: Vec<String> },
    QuizHidden,
    LevelUp { level: u32 },
    /// Play a cue (session-internal, never reaches the presenter)
    Cue(Cue),
    GameOver,
}
