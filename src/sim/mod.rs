//! Simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Seeded RNG only (owned by `GameState`)
//! - Time comes in as an argument, never read from a clock
//! - No rendering, audio or platform dependencies; changes go out as `GameEvent`s

pub mod collision;
pub mod event;
pub mod motion;
pub mod placement;
pub mod progression;
pub mod quiz;
pub mod state;
pub mod tick;

pub use collision::{Contact, detect_contact};
pub use event::{Cue, GameEvent, Status, quiz_heading};
pub use placement::find_spawn_point;
pub use quiz::{ActiveQuiz, AnswerOutcome, answer, open_quiz};
pub use state::{Arena, Enemy, EnemyId, GamePhase, GameState, Player};
pub use tick::{TickInput, spawn_round, start, tick};
