//! Game state and core simulation types
//!
//! `GameState` is the single owned simulation context. Every subsystem takes
//! it (or the pieces it needs) explicitly; nothing else holds game data.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::event::{GameEvent, Status};
use super::quiz::ActiveQuiz;
use crate::catalogue::QuizCatalogue;
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, PartialEq)]
pub enum GamePhase {
    /// Waiting for the start trigger (tutorial screen)
    Title,
    /// Simulation running
    Running,
    /// Frozen while a question is on screen
    QuizActive(ActiveQuiz),
    /// Frozen after an enemy turned out to have no questions; resumes on its own
    Stunned { resume_at_ms: f64 },
    /// Run ended
    GameOver,
}

/// Play area dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest top-left coordinate a sprite of `size` can have
    #[inline]
    pub fn max_pos(&self, size: f32) -> Vec2 {
        Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        )
    }

    #[inline]
    pub fn clamp(&self, pos: Vec2, size: f32) -> Vec2 {
        crate::clamp_to_arena(pos, size, self.width, self.height)
    }

    pub fn contains(&self, pos: Vec2, size: f32) -> bool {
        let max = self.max_pos(size);
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= max.x && pos.y <= max.y
    }
}

/// The hero
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per frame per axis
    pub speed: f32,
    pub hp: u32,
    /// 0..EXP_PER_LEVEL
    pub exp: u32,
    pub level: u32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: config.player_size,
            speed: config.player_speed,
            hp: config.starting_hp,
            exp: 0,
            level: 1,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        crate::sprite_center(self.pos, self.size)
    }
}

pub type EnemyId = u32;

/// A wandering monster
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per frame
    pub speed: f32,
    /// Heading (radians)
    pub angle: f32,
    /// Quiz genre this enemy asks from (fixed at spawn)
    pub genre: String,
    /// Sprite image variant, 1..=ENEMY_SPRITE_VARIANTS
    pub sprite: u32,
    /// Time of the last quiz this enemy triggered (ms)
    pub last_quiz_ms: Option<f64>,
}

impl Enemy {
    #[inline]
    pub fn center(&self) -> Vec2 {
        crate::sprite_center(self.pos, self.size)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub config: GameConfig,
    pub arena: Arena,
    pub catalogue: QuizCatalogue,
    pub phase: GamePhase,
    pub player: Player,
    /// Live enemies (order irrelevant)
    pub enemies: Vec<Enemy>,
    /// Spawn rounds so far
    pub round: u32,
    /// Outgoing render/status/audio notifications, drained by the presenter
    events: Vec<GameEvent>,
    next_id: EnemyId,
}

impl GameState {
    /// Fresh run on the title screen. Enemies are not spawned yet.
    pub fn new(config: GameConfig, catalogue: QuizCatalogue, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena: Arena::new(config.arena_width, config.arena_height),
            player: Player::new(&config),
            config,
            catalogue,
            phase: GamePhase::Title,
            enemies: Vec::new(),
            round: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EnemyId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Past the title screen
    pub fn is_started(&self) -> bool {
        !matches!(self.phase, GamePhase::Title)
    }

    /// Motion, collisions and input are frozen
    pub fn is_paused(&self) -> bool {
        !matches!(self.phase, GamePhase::Running)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver)
    }

    pub fn active_quiz(&self) -> Option<&ActiveQuiz> {
        match &self.phase {
            GamePhase::QuizActive(quiz) => Some(quiz),
            _ => None,
        }
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Remove an enemy for good, notifying the presenter
    pub fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        let enemy = self.enemies.swap_remove(idx);
        self.emit(GameEvent::EnemyRemoved { id });
        Some(enemy)
    }

    pub fn status(&self) -> Status {
        Status {
            hp: self.player.hp,
            exp: self.player.exp % EXP_PER_LEVEL,
            level: self.player.level,
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn emit_status(&mut self) {
        let status = self.status();
        self.emit(GameEvent::StatusChanged(status));
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(GameConfig::default(), QuizCatalogue::fallback(), 7)
    }

    #[test]
    fn test_new_state() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Title);
        assert!(!state.is_started());
        assert!(state.is_paused());
        assert_eq!(state.player.hp, STARTING_HP);
        assert_eq!(state.player.level, 1);
        assert_eq!(state.player.exp, 0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_arena_clamp() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.max_pos(96.0), Vec2::new(704.0, 504.0));
        assert_eq!(arena.clamp(Vec2::new(-5.0, 900.0), 96.0), Vec2::new(0.0, 504.0));
        // Sprite bigger than the arena pins to the origin
        assert_eq!(Arena::new(50.0, 50.0).clamp(Vec2::new(10.0, 10.0), 96.0), Vec2::ZERO);
        assert!(arena.contains(Vec2::new(704.0, 0.0), 96.0));
        assert!(!arena.contains(Vec2::new(705.0, 0.0), 96.0));
    }

    #[test]
    fn test_remove_enemy_emits() {
        let mut state = state();
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::ZERO,
            size: ENEMY_SIZE,
            speed: 1.0,
            angle: 0.0,
            genre: "Test".into(),
            sprite: 1,
            last_quiz_ms: None,
        });
        assert!(state.remove_enemy(id).is_some());
        assert!(state.remove_enemy(id).is_none());
        assert_eq!(state.drain_events(), vec![GameEvent::EnemyRemoved { id }]);
        assert!(state.events().is_empty());
    }
}
