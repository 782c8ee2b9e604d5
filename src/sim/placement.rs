//! Spawn placement
//!
//! Rejection sampling: try random spots until one is far enough from the
//! reference point, then give up and pin the entity to a side wall.

use glam::Vec2;
use rand::Rng;

use super::state::Arena;
use crate::consts::MAX_PLACEMENT_ATTEMPTS;

/// Pick a top-left position for a square sprite of `size` whose center lies
/// more than `clearance` away from `reference`.
///
/// After `MAX_PLACEMENT_ATTEMPTS` misses the sprite goes against the left or
/// right wall at a random height. That spot is in bounds but may be inside
/// the clearance radius.
pub fn find_spawn_point<R: Rng + ?Sized>(
    rng: &mut R,
    arena: &Arena,
    size: f32,
    reference: Vec2,
    clearance: f32,
) -> Vec2 {
    let max = arena.max_pos(size);

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(rng.random::<f32>() * max.x, rng.random::<f32>() * max.y);
        let distance = crate::sprite_center(candidate, size).distance(reference);
        if distance > clearance {
            return candidate;
        }
    }

    log::debug!(
        "No spawn point clear of ({:.0},{:.0}) after {} attempts, using a side wall",
        reference.x,
        reference.y,
        MAX_PLACEMENT_ATTEMPTS
    );
    wall_fallback(rng, max)
}

fn wall_fallback<R: Rng + ?Sized>(rng: &mut R, max: Vec2) -> Vec2 {
    let x = if rng.random_bool(0.5) { 0.0 } else { max.x };
    Vec2::new(x, rng.random::<f32>() * max.y)
}
