//! Quiz interrupts
//!
//! Running -> QuizActive on contact, QuizActive -> Running on an answer.
//! An enemy whose genre has no questions costs a heart instead and freezes
//! play briefly (Running -> Stunned -> Running).

use rand::seq::IndexedRandom;

use super::event::{Cue, GameEvent};
use super::progression;
use super::state::{EnemyId, GamePhase, GameState};
use super::tick::spawn_round;
use crate::catalogue::Question;
use crate::consts::MISSING_GENRE_DELAY_MS;

/// The question currently on screen and the enemy that asked it
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveQuiz {
    pub enemy: EnemyId,
    pub genre: String,
    pub question: Question,
}

/// What an answer did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct {
        level_up: bool,
        /// The last enemy fell and a new round spawned
        new_round: bool,
    },
    Wrong {
        game_over: bool,
    },
}

/// Freeze play and put a question from the enemy's genre on screen.
///
/// Does nothing unless the simulation is running.
pub fn open_quiz(state: &mut GameState, enemy_id: EnemyId, now_ms: f64) {
    if state.phase != GamePhase::Running {
        log::debug!("Ignoring quiz trigger for enemy {} while paused", enemy_id);
        return;
    }
    let Some(genre) = state.enemy(enemy_id).map(|e| e.genre.clone()) else {
        return;
    };

    let question = state
        .catalogue
        .questions(&genre)
        .and_then(|questions| questions.choose(&mut state.rng))
        .cloned();

    match question {
        Some(question) => {
            log::info!("Quiz shown: {}", genre);
            state.emit(GameEvent::QuizShown {
                genre: genre.clone(),
                prompt: question.prompt.clone(),
                options: question.options.clone(),
            });
            state.phase = GamePhase::QuizActive(ActiveQuiz {
                enemy: enemy_id,
                genre,
                question,
            });
        }
        None => {
            log::error!("No questions found for genre '{}'", genre);
            progression::take_damage(&mut state.player);
            state.emit(GameEvent::Cue(Cue::Wrong));
            state.emit_status();
            state.phase = GamePhase::Stunned {
                resume_at_ms: now_ms + MISSING_GENRE_DELAY_MS,
            };
        }
    }
}

/// Leave the stunned phase once its delay is over. Returns true if play
/// resumed (or the run ended).
pub fn resume_if_due(state: &mut GameState, now_ms: f64) -> bool {
    match state.phase {
        GamePhase::Stunned { resume_at_ms } if now_ms >= resume_at_ms => {
            state.phase = GamePhase::Running;
            check_game_over(state);
            true
        }
        _ => false,
    }
}

/// Resolve the active quiz with the option at `choice`.
///
/// Returns `None` (and changes nothing) if no quiz is active, so a second
/// click on the same question can't resolve it twice.
pub fn answer(state: &mut GameState, choice: usize) -> Option<AnswerOutcome> {
    let quiz = match std::mem::replace(&mut state.phase, GamePhase::Running) {
        GamePhase::QuizActive(quiz) => quiz,
        other => {
            state.phase = other;
            log::debug!("Ignoring answer {} with no quiz active", choice);
            return None;
        }
    };
    state.emit(GameEvent::QuizHidden);

    let outcome = if quiz.question.is_correct(choice) {
        log::info!("Correct!");
        state.emit(GameEvent::Cue(Cue::Correct));
        state.remove_enemy(quiz.enemy);

        let level_up = progression::award_exp(&mut state.player);
        if level_up {
            log::info!("Level up! Lv.{}", state.player.level);
            state.emit(GameEvent::Cue(Cue::LevelUp));
            state.emit(GameEvent::LevelUp {
                level: state.player.level,
            });
        }

        let new_round = state.enemies.is_empty();
        if new_round {
            log::info!("All enemies defeated, spawning a new round");
            spawn_round(state);
        }
        AnswerOutcome::Correct {
            level_up,
            new_round,
        }
    } else {
        log::info!("Wrong answer");
        state.emit(GameEvent::Cue(Cue::Wrong));
        progression::take_damage(&mut state.player);
        AnswerOutcome::Wrong { game_over: false }
    };

    state.emit_status();
    let game_over = check_game_over(state);

    Some(match outcome {
        AnswerOutcome::Wrong { .. } => AnswerOutcome::Wrong { game_over },
        correct => correct,
    })
}

/// Enter the terminal phase if the player is out of hearts
pub fn check_game_over(state: &mut GameState) -> bool {
    if !progression::is_defeated(&state.player) {
        return false;
    }
    if !state.is_game_over() {
        log::info!("Game over (level {})", state.player.level);
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::GameOver);
    }
    true
}
