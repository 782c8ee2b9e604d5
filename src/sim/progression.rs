//! Health, experience and level counters

use super::state::Player;
use crate::consts::{EXP_PER_CORRECT, EXP_PER_LEVEL};

/// Award experience for a correct answer. Returns true on level-up.
///
/// Crossing the threshold gives exactly one level and keeps whatever went
/// past it (from 90, +20 lands on 10 at the next level).
pub fn award_exp(player: &mut Player) -> bool {
    player.exp += EXP_PER_CORRECT;
    if player.exp >= EXP_PER_LEVEL {
        player.exp -= EXP_PER_LEVEL;
        player.level += 1;
        true
    } else {
        false
    }
}

/// Lose one heart. Returns true if that was the last one.
pub fn take_damage(player: &mut Player) -> bool {
    player.hp = player.hp.saturating_sub(1);
    is_defeated(player)
}

#[inline]
pub fn is_defeated(player: &Player) -> bool {
    player.hp == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn player() -> Player {
        Player::new(&GameConfig::default())
    }

    #[test]
    fn test_five_correct_answers_level_up() {
        let mut player = player();
        for _ in 0..4 {
            assert!(!award_exp(&mut player));
        }
        assert_eq!(player.exp, 80);
        assert!(award_exp(&mut player));
        assert_eq!(player.exp, 0);
        assert_eq!(player.level, 2);
    }

    #[test]
    fn test_overflow_carries() {
        let mut player = player();
        player.exp = 90;
        assert!(award_exp(&mut player));
        assert_eq!(player.level, 2);
        assert_eq!(player.exp, 10);
    }

    #[test]
    fn test_damage_until_defeated() {
        let mut player = player();
        assert!(!take_damage(&mut player));
        assert!(!take_damage(&mut player));
        assert!(take_damage(&mut player));
        assert_eq!(player.hp, 0);
        // Never wraps below zero
        assert!(take_damage(&mut player));
        assert_eq!(player.hp, 0);
    }
}
