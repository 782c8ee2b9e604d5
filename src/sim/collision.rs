//! Player/enemy contact detection
//!
//! Sprites touch when their centers are closer than the collision distance.
//! Each enemy has a cooldown so one that's still overlapping the player after
//! a quiz doesn't ask again every frame.

use glam::Vec2;

use super::state::{Enemy, EnemyId, GameState};

/// A contact that should open a quiz
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub enemy: EnemyId,
    pub distance: f32,
}

/// Whether two sprite centers are in contact
#[inline]
pub fn centers_touch(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// True once the enemy's cooldown has run out (or it never triggered)
#[inline]
pub fn cooldown_elapsed(enemy: &Enemy, now_ms: f64, cooldown_ms: f64) -> bool {
    enemy
        .last_quiz_ms
        .is_none_or(|last| now_ms - last > cooldown_ms)
}

/// Find the first enemy touching the player whose cooldown has elapsed and
/// stamp its trigger time.
///
/// At most one contact per frame: the quiz it opens freezes the simulation,
/// so any other overlaps are picked up once play resumes.
pub fn detect_contact(state: &mut GameState, now_ms: f64) -> Option<Contact> {
    let player_center = state.player.center();
    let threshold = state.config.collision_distance;
    let cooldown = state.config.quiz_cooldown_ms;

    let enemy = state.enemies.iter_mut().find(|enemy| {
        centers_touch(player_center, enemy.center(), threshold)
            && cooldown_elapsed(enemy, now_ms, cooldown)
    })?;

    enemy.last_quiz_ms = Some(now_ms);
    let distance = player_center.distance(enemy.center());
    log::info!(
        "Contact with enemy {} (genre: {}, distance: {:.0})",
        enemy.id,
        enemy.genre,
        distance
    );
    Some(Contact {
        enemy: enemy.id,
        distance,
    })
}
