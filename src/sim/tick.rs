//! Per-frame simulation step
//!
//! Input -> player motion -> enemy motion -> contact scan -> (quiz).
//! Displacements are per frame; there is no timestep normalization, so
//! enemies move faster on faster displays.

use std::f32::consts::TAU;

use rand::Rng;

use super::collision::detect_contact;
use super::event::GameEvent;
use super::motion::{move_enemy, move_player};
use super::placement::find_spawn_point;
use super::quiz::{open_quiz, resume_if_due};
use super::state::{Enemy, GamePhase, GameState};
use crate::consts::ENEMY_SPRITE_VARIANTS;

/// Movement intent for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// -1 (left), 0, 1 (right)
    pub dx: i32,
    /// -1 (up), 0, 1 (down)
    pub dy: i32,
}

impl TickInput {
    pub fn is_idle(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Leave the title screen and let the simulation run
pub fn start(state: &mut GameState) {
    if state.phase == GamePhase::Title {
        log::info!("Game started");
        state.phase = GamePhase::Running;
    }
}

/// Advance the game by one frame. `now_ms` is a monotonic clock reading.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if !state.is_started() {
        return;
    }

    resume_if_due(state, now_ms);
    if state.is_paused() {
        return;
    }

    if !input.is_idle() {
        move_player(&mut state.player, input.dx, input.dy, &state.arena);
        let pos = state.player.pos;
        state.emit(GameEvent::PlayerMoved { pos });
    }

    let arena = state.arena;
    for enemy in &mut state.enemies {
        move_enemy(enemy, &arena);
    }
    let moved: Vec<_> = state
        .enemies
        .iter()
        .map(|e| GameEvent::EnemyMoved { id: e.id, pos: e.pos })
        .collect();
    for event in moved {
        state.emit(event);
    }

    if let Some(contact) = detect_contact(state, now_ms) {
        open_quiz(state, contact.enemy, now_ms);
    }
}

/// Replace the enemy set with a fresh round.
///
/// Each enemy is placed clear of the player and gets genres round-robin in
/// catalogue order. With no genres at all nothing spawns.
pub fn spawn_round(state: &mut GameState) {
    let stale: Vec<_> = state.enemies.iter().map(|e| e.id).collect();
    for id in stale {
        state.remove_enemy(id);
    }

    let genres: Vec<String> = state.catalogue.genres().map(str::to_string).collect();
    if genres.is_empty() {
        log::error!("Quiz data has no genres, no enemies spawned");
        return;
    }

    state.round += 1;
    let count = state.config.enemy_count;
    log::info!("Spawning round {} ({} enemies)", state.round, count);

    let size = state.config.enemy_size;
    let clearance = state.config.spawn_clearance;
    let (speed_min, speed_max) = (state.config.enemy_speed_min, state.config.enemy_speed_max);

    for i in 0..count {
        let reference = state.player.center();
        let pos = find_spawn_point(&mut state.rng, &state.arena, size, reference, clearance);
        let genre = genres[i % genres.len()].clone();
        let enemy = Enemy {
            id: state.next_entity_id(),
            pos,
            size,
            speed: state.rng.random_range(speed_min..speed_max),
            angle: state.rng.random::<f32>() * TAU,
            genre,
            sprite: (i as u32 % ENEMY_SPRITE_VARIANTS) + 1,
            last_quiz_ms: None,
        };
        log::debug!(
            "Enemy {} spawned: genre={}, pos=({:.0},{:.0})",
            enemy.id,
            enemy.genre,
            enemy.pos.x,
            enemy.pos.y
        );
        state.emit(GameEvent::EnemySpawned {
            id: enemy.id,
            pos: enemy.pos,
            genre: enemy.genre.clone(),
            sprite: enemy.sprite,
        });
        state.enemies.push(enemy);
    }
}
