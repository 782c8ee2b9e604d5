//! Game session
//!
//! Owns the simulation context, the held-input state and the injected cue
//! player. The platform layer calls the event handlers as input arrives and
//! `frame` once per display refresh, then drains [`GameEvent`]s to redraw.
//! Handlers run to completion, so the simulation never sees a half-applied
//! change.

use crate::audio::CuePlayer;
use crate::catalogue::QuizCatalogue;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::input::{Direction, InputSource, InputState};
use crate::settings::Settings;
use crate::sim::{self, AnswerOutcome, Cue, GameEvent, GameState};

pub struct Session {
    state: GameState,
    input: InputState,
    cues: Box<dyn CuePlayer>,
    settings: Settings,
}

/// Toggles sound on and off
const MUTE_KEY: &str = "m";

impl Session {
    /// Build a session with its first round of enemies already spawned
    pub fn new(
        config: GameConfig,
        catalogue: QuizCatalogue,
        seed: u64,
        cues: Box<dyn CuePlayer>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self {
            state: GameState::new(config, catalogue, seed),
            input: InputState::default(),
            cues,
            settings: Settings::default(),
        };
        session.reset_round();
        log::info!("Session ready (seed {})", seed);
        Ok(session)
    }

    /// Use stored preferences instead of the defaults
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.cues.apply_settings(&settings);
        self.settings = settings;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Physical key pressed. Any key wakes the music.
    pub fn key_down(&mut self, key: &str) {
        if let Some(dir) = Direction::from_key(key) {
            self.input.set(InputSource::Keyboard, dir, true);
        } else if key.eq_ignore_ascii_case(MUTE_KEY) {
            self.toggle_mute();
        }
        self.request_music();
    }

    /// Mute or unmute and remember the choice
    pub fn toggle_mute(&mut self) {
        self.settings.toggle_mute();
        self.settings.save();
        self.cues.apply_settings(&self.settings);
        log::info!("Sound {}", if self.settings.muted { "muted" } else { "on" });
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(dir) = Direction::from_key(key) {
            self.input.set(InputSource::Keyboard, dir, false);
        }
    }

    /// On-screen direction button pressed (mouse down / touch start)
    pub fn button_down(&mut self, dir: Direction) {
        self.input.set(InputSource::VirtualPad, dir, true);
        self.request_music();
    }

    /// On-screen direction button let go (mouse up/leave, touch end/cancel)
    pub fn button_up(&mut self, dir: Direction) {
        self.input.set(InputSource::VirtualPad, dir, false);
    }

    /// Window lost focus: key-up events won't arrive, so drop everything held
    pub fn release_all(&mut self) {
        self.input.release_all();
    }

    /// Tutorial dismissed
    pub fn start(&mut self) {
        sim::start(&mut self.state);
        self.request_music();
    }

    /// Quiz option clicked
    pub fn answer(&mut self, choice: usize) -> Option<AnswerOutcome> {
        let outcome = sim::answer(&mut self.state, choice);
        self.dispatch_cues();
        outcome
    }

    /// Advance one display frame
    pub fn frame(&mut self, now_ms: f64) {
        let input = self.input.tick_input();
        sim::tick(&mut self.state, &input, now_ms);
        self.dispatch_cues();
    }

    /// Fresh run back on the title screen
    pub fn restart(&mut self, seed: u64) {
        self.cues.stop_music();
        let config = self.state.config.clone();
        let catalogue = std::mem::take(&mut self.state.catalogue);
        let old_enemies: Vec<_> = self.state.enemies.iter().map(|e| e.id).collect();
        let arena = self.state.arena;
        self.state = GameState::new(config, catalogue, seed);
        self.state.arena = arena;
        // The presenter still shows the previous run's sprites
        for id in old_enemies {
            self.state.emit(GameEvent::EnemyRemoved { id });
        }
        self.input.release_all();
        self.reset_round();
        log::info!("Game restarted (seed {})", seed);
    }

    /// The arena element changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("Ignoring arena resize to {}x{}", width, height);
            return;
        }
        let arena = &mut self.state.arena;
        arena.width = width;
        arena.height = height;
        self.state.player.pos = arena.clamp(self.state.player.pos, self.state.player.size);
        let pos = self.state.player.pos;
        self.state.emit(GameEvent::PlayerMoved { pos });
    }

    /// Everything the presenter needs to redraw since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.dispatch_cues();
        self.state.drain_events()
    }

    fn reset_round(&mut self) {
        sim::spawn_round(&mut self.state);
        self.state.emit_status();
        let pos = self.state.player.pos;
        self.state.emit(GameEvent::PlayerMoved { pos });
    }

    fn request_music(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        self.play(Cue::Music);
    }

    fn play(&mut self, cue: Cue) {
        if let Err(e) = self.cues.play(cue) {
            log::warn!("Cue {:?} failed: {}", cue, e);
        }
    }

    /// Hand queued cues to the cue player; game over silences the music.
    /// Other events stay queued for the presenter.
    fn dispatch_cues(&mut self) {
        let (cues, rest): (Vec<_>, Vec<_>) = self
            .state
            .drain_events()
            .into_iter()
            .partition(|e| matches!(e, GameEvent::Cue(_)));

        for event in cues {
            if let GameEvent::Cue(cue) = event {
                self.play(cue);
            }
        }
        if rest.contains(&GameEvent::GameOver) {
            self.cues.stop_music();
        }
        for event in rest {
            self.state.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::error::AudioError;
    use crate::sim::{GamePhase, TickInput};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Played {
        Cue(Cue),
        StopMusic,
        /// Effective music volume after a settings change
        Volume(f32),
    }

    /// Records every request; optionally fails every `play`
    #[derive(Clone, Default)]
    struct RecordingCuePlayer {
        log: Rc<RefCell<Vec<Played>>>,
        fail: bool,
    }

    impl CuePlayer for RecordingCuePlayer {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            self.log.borrow_mut().push(Played::Cue(cue));
            if self.fail {
                Err(AudioError::Playback("blocked".into()))
            } else {
                Ok(())
            }
        }

        fn stop_music(&mut self) {
            self.log.borrow_mut().push(Played::StopMusic);
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.log
                .borrow_mut()
                .push(Played::Volume(settings.effective_music_volume()));
        }
    }

    fn session_with(config: GameConfig, fail: bool) -> (Session, Rc<RefCell<Vec<Played>>>) {
        let player = RecordingCuePlayer {
            fail,
            ..Default::default()
        };
        let log = player.log.clone();
        let session =
            Session::new(config, QuizCatalogue::fallback(), 42, Box::new(player)).unwrap();
        (session, log)
    }

    /// Put the first enemy on the player and run a frame so it asks
    fn bump_first_enemy(session: &mut Session, now_ms: f64) {
        let center = session.state.player.center();
        let enemy = &mut session.state.enemies[0];
        enemy.pos = center - Vec2::splat(enemy.size / 2.0);
        enemy.speed = 0.0;
        session.frame(now_ms);
        assert!(session.state().active_quiz().is_some());
    }

    fn correct(session: &Session) -> usize {
        session.state().active_quiz().unwrap().question.correct_index
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            enemy_count: 0,
            ..Default::default()
        };
        let result = Session::new(
            config,
            QuizCatalogue::fallback(),
            1,
            Box::new(crate::audio::SilentCuePlayer),
        );
        assert!(matches!(result, Err(ConfigError::NoEnemies)));

        // Overflowing speed must be refused before any enemy spawns
        let config = GameConfig::from_json(r#"{ "enemy_speed_max": 1e39 }"#).unwrap();
        let result = Session::new(
            config,
            QuizCatalogue::fallback(),
            1,
            Box::new(crate::audio::SilentCuePlayer),
        );
        assert!(matches!(
            result,
            Err(ConfigError::NotFinite {
                name: "enemy_speed_max",
                ..
            })
        ));
    }

    #[test]
    fn test_initial_events() {
        let (mut session, _) = session_with(GameConfig::default(), false);
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::StatusChanged(session.state().status())));
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, ENEMY_COUNT);
    }

    #[test]
    fn test_keys_move_player_after_start() {
        let (mut session, log) = session_with(GameConfig::default(), false);
        session.key_down("ArrowRight");
        session.frame(0.0);
        assert_eq!(session.state().player.pos, Vec2::ZERO);

        session.start();
        session.frame(16.0);
        assert_eq!(session.state().player.pos, Vec2::new(PLAYER_SPEED, 0.0));

        session.key_up("ArrowRight");
        session.button_down(Direction::Down);
        session.frame(32.0);
        assert_eq!(session.state().player.pos, Vec2::new(PLAYER_SPEED, PLAYER_SPEED));

        session.button_up(Direction::Down);
        session.frame(48.0);
        assert_eq!(session.state().player.pos, Vec2::new(PLAYER_SPEED, PLAYER_SPEED));

        // Key press, start and button press each asked for music
        assert!(log.borrow().iter().filter(|p| **p == Played::Cue(Cue::Music)).count() >= 3);
    }

    #[test]
    fn test_held_keys_clamped_at_wall() {
        let (mut session, _) = session_with(GameConfig::default(), false);
        session.start();
        session.key_down("ArrowLeft");
        session.key_down("ArrowUp");
        // Keep enemies away so no quiz interrupts
        session.state.enemies.clear();
        for frame in 0..100 {
            session.frame(frame as f64 * 16.0);
        }
        assert_eq!(session.state().player.pos, Vec2::ZERO);
    }

    #[test]
    fn test_correct_answer_plays_cue() {
        let (mut session, log) = session_with(GameConfig::default(), false);
        session.start();
        bump_first_enemy(&mut session, 100.0);
        let choice = correct(&session);
        session.answer(choice);
        assert!(log.borrow().contains(&Played::Cue(Cue::Correct)));
        assert_eq!(session.state().enemies.len(), ENEMY_COUNT - 1);

        let events = session.drain_events();
        assert!(events.contains(&GameEvent::QuizHidden));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Cue(_))));
    }

    #[test]
    fn test_double_click_resolves_once() {
        let (mut session, log) = session_with(GameConfig::default(), false);
        session.start();
        bump_first_enemy(&mut session, 100.0);
        let wrong = correct(&session) + 1;
        assert!(session.answer(wrong).is_some());
        assert!(session.answer(wrong).is_none());
        assert_eq!(session.state().player.hp, STARTING_HP - 1);
        let wrongs = log
            .borrow()
            .iter()
            .filter(|p| **p == Played::Cue(Cue::Wrong))
            .count();
        assert_eq!(wrongs, 1);
    }

    #[test]
    fn test_three_wrong_answers_game_over() {
        let (mut session, log) = session_with(GameConfig::default(), false);
        session.start();
        let mut now = 0.0;
        for i in 1..=3 {
            now += 2000.0;
            bump_first_enemy(&mut session, now);
            let outcome = session.answer(correct(&session) + 1);
            assert_eq!(outcome, Some(AnswerOutcome::Wrong { game_over: i == 3 }));
            assert_eq!(session.state().is_game_over(), i == 3);
        }
        assert_eq!(session.state().player.hp, 0);
        assert_eq!(log.borrow().last(), Some(&Played::StopMusic));

        // Terminal: frames change nothing, input doesn't restart music
        let frozen = session.state().enemies.clone();
        session.key_down("ArrowDown");
        session.frame(now + 5000.0);
        assert_eq!(session.state().enemies, frozen);
        assert_eq!(log.borrow().last(), Some(&Played::StopMusic));
        assert_eq!(session.state().phase, GamePhase::GameOver);
    }

    #[test]
    fn test_clearing_round_respawns() {
        let config = GameConfig {
            enemy_count: 4,
            ..Default::default()
        };
        let (mut session, _) = session_with(config, false);
        session.start();
        let mut now = 0.0;
        for _ in 0..4 {
            now += 16.0;
            bump_first_enemy(&mut session, now);
            session.answer(correct(&session));
        }
        assert_eq!(session.state().round, 2);
        assert_eq!(session.state().enemies.len(), 4);
        assert_eq!(session.state().player.exp, 4 * EXP_PER_CORRECT);
    }

    #[test]
    fn test_audio_failures_are_swallowed() {
        let (mut session, log) = session_with(GameConfig::default(), true);
        session.key_down("x");
        session.start();
        bump_first_enemy(&mut session, 100.0);
        let outcome = session.answer(correct(&session));
        assert!(matches!(outcome, Some(AnswerOutcome::Correct { .. })));
        assert_eq!(session.state().phase, GamePhase::Running);
        assert!(log.borrow().contains(&Played::Cue(Cue::Correct)));
    }

    #[test]
    fn test_restart_returns_to_title() {
        let (mut session, log) = session_with(GameConfig::default(), false);
        session.start();
        session.key_down("ArrowDown");
        session.frame(16.0);
        session.restart(7);

        let state = session.state();
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.player.pos, Vec2::ZERO);
        assert_eq!(state.player.hp, STARTING_HP);
        assert_eq!(state.enemies.len(), ENEMY_COUNT);
        assert_eq!(state.catalogue, QuizCatalogue::fallback());
        assert!(log.borrow().contains(&Played::StopMusic));

        // Old sprites are cleared before the new round appears
        let events = session.drain_events();
        let first_spawn = events
            .iter()
            .position(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .unwrap();
        let removals = events[..first_spawn]
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyRemoved { .. }))
            .count();
        assert_eq!(removals, ENEMY_COUNT);

        // Held keys were dropped
        session.start();
        session.frame(32.0);
        assert_eq!(session.state().player.pos, Vec2::ZERO);
    }

    #[test]
    fn test_resize_clamps_player() {
        let (mut session, _) = session_with(GameConfig::default(), false);
        session.state.player.pos = Vec2::new(700.0, 500.0);
        session.resize(400.0, 300.0);
        assert_eq!(session.state().player.pos, Vec2::new(304.0, 204.0));
        session.resize(0.0, 300.0);
        assert_eq!(session.state().arena.width, 400.0);
    }

    #[test]
    fn test_frame_input_matches_tick_input() {
        let mut input = InputState::default();
        input.set(InputSource::Keyboard, Direction::Right, true);
        assert_eq!(input.tick_input(), TickInput { dx: 1, dy: 0 });
    }

    #[test]
    fn test_mute_key_toggles_sound() {
        let (mut session, log) = session_with(GameConfig::default(), false);
        session.start();
        assert!(!session.settings().muted);

        session.key_down("m");
        assert!(session.settings().muted);
        assert!(log.borrow().contains(&Played::Volume(0.0)));
        // Not a direction
        assert_eq!(session.input.tick_input(), TickInput::default());

        log.borrow_mut().clear();
        session.key_down("M");
        assert!(!session.settings().muted);
        let expected = Settings::default().effective_music_volume();
        assert!(log.borrow().contains(&Played::Volume(expected)));
    }

    #[test]
    fn test_with_settings_applies_volumes() {
        let (session, log) = session_with(GameConfig::default(), false);
        let muted = Settings {
            muted: true,
            ..Default::default()
        };
        let session = session.with_settings(muted);
        assert!(session.settings().muted);
        assert_eq!(log.borrow().last(), Some(&Played::Volume(0.0)));
    }
}
