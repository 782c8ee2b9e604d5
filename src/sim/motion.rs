//! Movement
//!
//! Enemies wander on a heading and bounce off the arena walls like billiard
//! balls. The player moves directly from digital input and is clamped.

use std::f32::consts::PI;

use glam::Vec2;

use super::state::{Arena, Enemy, Player};

/// Advance a heading-driven sprite by one step, bouncing off the walls.
///
/// Returns the new position and heading. Each axis is checked on its own, so
/// a corner hit reflects both components.
pub fn step_with_bounce(pos: Vec2, angle: f32, speed: f32, size: f32, arena: &Arena) -> (Vec2, f32) {
    let max = arena.max_pos(size);
    let mut pos = pos + Vec2::new(angle.cos(), angle.sin()) * speed;
    let mut angle = angle;

    if pos.x <= 0.0 || pos.x >= max.x {
        angle = reflect_vertical_wall(angle);
        pos.x = pos.x.clamp(0.0, max.x);
    }
    if pos.y <= 0.0 || pos.y >= max.y {
        angle = reflect_horizontal_wall(angle);
        pos.y = pos.y.clamp(0.0, max.y);
    }

    (pos, angle)
}

/// Bounce off a left/right wall: negates the x component of the heading
#[inline]
pub fn reflect_vertical_wall(angle: f32) -> f32 {
    PI - angle
}

/// Bounce off a top/bottom wall: negates the y component of the heading
#[inline]
pub fn reflect_horizontal_wall(angle: f32) -> f32 {
    -angle
}

pub fn move_enemy(enemy: &mut Enemy, arena: &Arena) {
    let (pos, angle) = step_with_bounce(enemy.pos, enemy.angle, enemy.speed, enemy.size, arena);
    enemy.pos = pos;
    enemy.angle = angle;
}

/// Move the player by a digital intent (`dx`, `dy` in -1..=1), clamped
pub fn move_player(player: &mut Player, dx: i32, dy: i32, arena: &Arena) {
    let delta = Vec2::new(dx as f32, dy as f32) * player.speed;
    player.pos = arena.clamp(player.pos + delta, player.size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use proptest::prelude::*;

    const SIZE: f32 = 72.0;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    #[test]
    fn test_free_step() {
        let (pos, angle) = step_with_bounce(Vec2::new(100.0, 100.0), 0.0, 2.0, SIZE, &arena());
        assert_eq!(pos, Vec2::new(102.0, 100.0));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_bounce_right_wall() {
        let max = arena().max_pos(SIZE);
        let (pos, angle) = step_with_bounce(Vec2::new(max.x - 1.0, 100.0), 0.0, 2.0, SIZE, &arena());
        assert_eq!(pos.x, max.x);
        // Now heading left
        assert!(angle.cos() < 0.0);
        assert!((angle.cos() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_top_wall() {
        let heading = -PI / 4.0; // up-right
        let (pos, angle) = step_with_bounce(Vec2::new(100.0, 0.5), heading, 2.0, SIZE, &arena());
        assert_eq!(pos.y, 0.0);
        assert!(angle.sin() > 0.0);
        assert!((angle.cos() - heading.cos()).abs() < 1e-6);
    }

    #[test]
    fn test_corner_bounce_reflects_both() {
        let heading = -3.0 * PI / 4.0; // up-left
        let (pos, angle) = step_with_bounce(Vec2::new(0.5, 0.5), heading, 2.0, SIZE, &arena());
        assert_eq!(pos, Vec2::ZERO);
        assert!((angle.cos() + heading.cos()).abs() < 1e-6);
        assert!((angle.sin() + heading.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_player_pressing_wall() {
        let mut player = Player::new(&GameConfig::default());
        for _ in 0..500 {
            move_player(&mut player, -1, -1, &arena());
        }
        assert_eq!(player.pos, Vec2::ZERO);
        for _ in 0..500 {
            move_player(&mut player, 1, 1, &arena());
        }
        assert_eq!(player.pos, arena().max_pos(player.size));
    }

    proptest! {
        #[test]
        fn prop_vertical_reflection_negates_x(angle in -10.0f32..10.0) {
            let reflected = reflect_vertical_wall(angle);
            prop_assert!((reflected.cos() + angle.cos()).abs() < 1e-4);
            prop_assert!((reflected.sin() - angle.sin()).abs() < 1e-4);
        }

        #[test]
        fn prop_horizontal_reflection_negates_y(angle in -10.0f32..10.0) {
            let reflected = reflect_horizontal_wall(angle);
            prop_assert!((reflected.cos() - angle.cos()).abs() < 1e-4);
            prop_assert!((reflected.sin() + angle.sin()).abs() < 1e-4);
        }

        #[test]
        fn prop_player_stays_in_arena(
            moves in proptest::collection::vec((-1i32..=1, -1i32..=1), 0..400),
            width in 100.0f32..1500.0,
            height in 100.0f32..1500.0,
        ) {
            let arena = Arena::new(width, height);
            let mut player = Player::new(&GameConfig::default());
            for (dx, dy) in moves {
                move_player(&mut player, dx, dy, &arena);
                prop_assert!(arena.contains(player.pos, player.size));
            }
        }

        #[test]
        fn prop_enemy_stays_in_arena(
            x in 0.0f32..728.0,
            y in 0.0f32..528.0,
            angle in 0.0f32..std::f32::consts::TAU,
            speed in 0.5f32..2.0,
            steps in 1usize..600,
        ) {
            let arena = arena();
            let mut pos = Vec2::new(x, y);
            let mut heading = angle;
            for _ in 0..steps {
                (pos, heading) = step_with_bounce(pos, heading, speed, SIZE, &arena);
                prop_assert!(arena.contains(pos, SIZE));
            }
        }
    }
}
