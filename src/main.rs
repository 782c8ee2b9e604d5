//! Quiz Arena entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlElement};

    use quiz_arena::audio::HtmlAudioCuePlayer;
    use quiz_arena::error::CatalogueError;
    use quiz_arena::input::Direction;
    use quiz_arena::sim::{EnemyId, GameEvent, Status, quiz_heading};
    use quiz_arena::{GameConfig, QuizCatalogue, Session, Settings};

    const QUIZ_DATA_URL: &str = "./quizData.json";
    const GAME_CONFIG_URL: &str = "./gameConfig.json";

    /// Game instance holding all state
    struct Game {
        session: Session,
        document: Document,
        /// Enemy sprite elements by id
        enemy_els: HashMap<EnemyId, HtmlElement>,
    }

    fn element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn place(el: &HtmlElement, x: f32, y: f32) {
        let style = el.style();
        let _ = style.set_property("left", &format!("{}px", x));
        let _ = style.set_property("top", &format!("{}px", y));
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = element(document, id) {
            if visible {
                let _ = el.class_list().remove_1("hidden");
                let _ = el.style().set_property("display", "flex");
            } else {
                let _ = el.class_list().add_1("hidden");
                let _ = el.style().set_property("display", "none");
            }
        }
    }

    impl Game {
        fn update_status(&self, status: &Status) {
            let doc = &self.document;
            set_text(doc, "hp-hearts", &status.hearts());
            if let Some(fill) = element(doc, "exp-fill") {
                let width = format!("{}%", status.exp_fraction() * 100.0);
                let _ = fill.style().set_property("width", &width);
            }
            set_text(doc, "exp-text", &status.exp_label());
            set_text(doc, "level-display", &status.level_label());
        }

        fn spawn_enemy_el(&mut self, id: EnemyId, x: f32, y: f32, genre: &str, sprite: u32) {
            let Some(area) = self.document.get_element_by_id("game-area") else {
                return;
            };
            let Some(el) = self
                .document
                .create_element("div")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            el.set_class_name("enemy");
            el.set_title(genre);
            let _ = el
                .style()
                .set_property("background-image", &format!("url('./images/enemy{}.png')", sprite));
            place(&el, x, y);
            let _ = area.append_child(&el);
            self.enemy_els.insert(id, el);
        }

        /// Area size in CSS pixels
        fn arena_size(&self) -> Option<(f32, f32)> {
            let area = self.document.get_element_by_id("game-area")?;
            Some((area.client_width() as f32, area.client_height() as f32))
        }
    }

    /// Apply everything the simulation reported since the last call
    fn present(game: &Rc<RefCell<Game>>) {
        let events = game.borrow_mut().session.drain_events();
        for event in events {
            match event {
                GameEvent::StatusChanged(status) => game.borrow().update_status(&status),
                GameEvent::PlayerMoved { pos } => {
                    if let Some(el) = element(&game.borrow().document, "player") {
                        place(&el, pos.x, pos.y);
                    }
                }
                GameEvent::EnemySpawned {
                    id,
                    pos,
                    genre,
                    sprite,
                } => game
                    .borrow_mut()
                    .spawn_enemy_el(id, pos.x, pos.y, &genre, sprite),
                GameEvent::EnemyMoved { id, pos } => {
                    if let Some(el) = game.borrow().enemy_els.get(&id) {
                        place(el, pos.x, pos.y);
                    }
                }
                GameEvent::EnemyRemoved { id } => {
                    if let Some(el) = game.borrow_mut().enemy_els.remove(&id) {
                        el.remove();
                    }
                }
                GameEvent::QuizShown {
                    genre,
                    prompt,
                    options,
                } => show_quiz(game, &genre, &prompt, &options),
                GameEvent::QuizHidden => show(&game.borrow().document, "quiz-container", false),
                GameEvent::LevelUp { level } => {
                    log::info!("Reached Lv.{}", level);
                }
                GameEvent::GameOver => show(&game.borrow().document, "gameover-container", true),
                GameEvent::Cue(_) => {}
            }
        }
    }

    /// Attribute carrying an option button's answer index
    const OPTION_INDEX_ATTR: &str = "data-index";

    fn show_quiz(game: &Rc<RefCell<Game>>, genre: &str, prompt: &str, options: &[String]) {
        let document = game.borrow().document.clone();
        set_text(&document, "quiz-genre", &quiz_heading(genre));
        set_text(&document, "quiz-question", prompt);

        // Clicks are handled by the one listener on #quiz-options
        if let Some(options_el) = document.get_element_by_id("quiz-options") {
            options_el.set_inner_html("");
            for (i, text) in options.iter().enumerate() {
                let Ok(btn) = document.create_element("button") else {
                    continue;
                };
                btn.set_text_content(Some(text));
                let _ = btn.set_attribute(OPTION_INDEX_ATTR, &i.to_string());
                let _ = options_el.append_child(&btn);
            }
        }

        show(&document, "quiz-container", true);
    }

    /// Answer index of the option button an event landed on
    fn clicked_option(event: &web_sys::Event) -> Option<usize> {
        let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
        let button = target.closest("button").ok()??;
        button.get_attribute(OPTION_INDEX_ATTR)?.parse().ok()
    }

    /// GET a text resource; any failure is reported as a message
    async fn fetch_text(url: &str) -> Result<String, String> {
        let js_err = |e: JsValue| format!("{:?}", e);

        let window = web_sys::window().ok_or("no window")?;
        let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        if !response.ok() {
            return Err(format!("HTTP status {}", response.status()));
        }
        JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?
            .as_string()
            .ok_or_else(|| "response body is not text".to_string())
    }

    async fn fetch_catalogue() -> Result<QuizCatalogue, CatalogueError> {
        let text = fetch_text(QUIZ_DATA_URL).await.map_err(CatalogueError::Fetch)?;
        QuizCatalogue::from_json(&text)
    }

    /// Optional tuning overrides next to the page
    async fn fetch_config() -> GameConfig {
        let json = match fetch_text(GAME_CONFIG_URL).await {
            Ok(json) => Some(json),
            Err(e) => {
                log::info!("No game config ({}), using defaults", e);
                None
            }
        };
        GameConfig::load_or_default(json.as_deref())
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Quiz Arena starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let catalogue = QuizCatalogue::load_or_fallback(fetch_catalogue().await);

        let area = document.get_element_by_id("game-area").expect("no game area");
        let config = fetch_config()
            .await
            .with_arena(area.client_width() as f32, area.client_height() as f32);

        let settings = Settings::load();
        let cues = HtmlAudioCuePlayer::new(&settings);

        let seed = js_sys::Date::now() as u64;
        let session = match Session::new(config, catalogue, seed, Box::new(cues)) {
            Ok(session) => session.with_settings(settings),
            Err(e) => {
                log::error!("Invalid game config: {}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game {
            session,
            document,
            enemy_els: HashMap::new(),
        }));
        present(&game);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Quiz Arena running!");
    }

    fn listen<F>(target: &web_sys::EventTarget, event: &str, handler: F)
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = game.borrow().document.clone();

        // Keyboard
        {
            let game = game.clone();
            listen(&document, "keydown", move |event: web_sys::Event| {
                if let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                    game.borrow_mut().session.key_down(&event.key());
                }
            });
        }
        {
            let game = game.clone();
            listen(&document, "keyup", move |event: web_sys::Event| {
                if let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                    game.borrow_mut().session.key_up(&event.key());
                }
            });
        }

        // On-screen d-pad, press and hold
        for dir in Direction::ALL {
            let Some(btn) = document.get_element_by_id(dir.button_id()) else {
                continue;
            };
            for name in ["mousedown", "touchstart"] {
                let game = game.clone();
                listen(&btn, name, move |event: web_sys::Event| {
                    event.prevent_default();
                    game.borrow_mut().session.button_down(dir);
                });
            }
            for name in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
                let game = game.clone();
                listen(&btn, name, move |event: web_sys::Event| {
                    event.prevent_default();
                    game.borrow_mut().session.button_up(dir);
                });
            }
        }

        // Key-up never arrives once focus is gone
        {
            let game = game.clone();
            listen(&window, "blur", move |_event: web_sys::Event| {
                game.borrow_mut().session.release_all();
            });
        }

        // Track the arena size
        listen(&window, "resize", move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            if let Some((w, h)) = g.arena_size() {
                g.session.resize(w, h);
            }
        });
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = game.borrow().document.clone();

        if let Some(btn) = document.get_element_by_id("tutorial-start") {
            let game = game.clone();
            listen(&btn, "click", move |_event: web_sys::Event| {
                game.borrow_mut().session.start();
                show(&game.borrow().document, "tutorial-container", false);
            });
        }

        if let Some(options_el) = document.get_element_by_id("quiz-options") {
            let game = game.clone();
            listen(&options_el, "click", move |event: web_sys::Event| {
                let Some(choice) = clicked_option(&event) else {
                    return;
                };
                game.borrow_mut().session.answer(choice);
                present(&game);
            });
        }

        if let Some(btn) = document.get_element_by_id("restart-button") {
            listen(&btn, "click", move |_event: web_sys::Event| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().session.restart(seed);
                {
                    let g = game.borrow();
                    show(&g.document, "gameover-container", false);
                    show(&g.document, "quiz-container", false);
                    show(&g.document, "tutorial-container", true);
                }
                present(&game);
            });
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        // Freed by wasm-bindgen once the frame callback has run
        let callback = Closure::once_into_js(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(callback.unchecked_ref());
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().session.frame(time);
        present(&game);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Quiz Arena (native) starting...");
    log::info!("Native mode has no display - serve the web build to play");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// A bot plays a headless run so the simulation can be watched in the log
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use quiz_arena::audio::SilentCuePlayer;
    use quiz_arena::input::Direction;
    use quiz_arena::sim::AnswerOutcome;
    use quiz_arena::{GameConfig, QuizCatalogue, Session};

    /// 60 Hz for two minutes
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;
    /// How often the bot knows the answer
    const BOT_ACCURACY: f64 = 0.7;
    const QUIZ_DATA_PATH: &str = "quizData.json";
    const GAME_CONFIG_PATH: &str = "gameConfig.json";

    pub fn run(seed: u64) {
        let catalogue = QuizCatalogue::load_or_fallback(
            std::fs::read_to_string(QUIZ_DATA_PATH)
                .map_err(|e| quiz_arena::error::CatalogueError::Fetch(e.to_string()))
                .and_then(|json| QuizCatalogue::from_json(&json)),
        );
        let config = GameConfig::load_or_default(
            std::fs::read_to_string(GAME_CONFIG_PATH).ok().as_deref(),
        );
        let mut session = match Session::new(
            config,
            catalogue,
            seed,
            Box::new(SilentCuePlayer),
        ) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid game config: {}", e);
                return;
            }
        };
        let mut bot = Pcg32::seed_from_u64(seed ^ 0x5eed);
        let (mut correct, mut wrong) = (0u32, 0u32);

        session.start();
        for frame in 0..MAX_FRAMES {
            if let Some(quiz) = session.state().active_quiz() {
                let right = quiz.question.correct_index;
                let choice = if bot.random_bool(BOT_ACCURACY) {
                    right
                } else {
                    (right + 1) % quiz.question.options.len().max(1)
                };
                match session.answer(choice) {
                    Some(AnswerOutcome::Correct { .. }) => correct += 1,
                    Some(AnswerOutcome::Wrong { .. }) => wrong += 1,
                    None => {}
                }
            }
            if session.state().is_game_over() {
                break;
            }

            steer_toward_nearest(&mut session);
            session.frame(frame as f64 * FRAME_MS);
            session.drain_events();
        }

        let state = session.state();
        log::info!(
            "Run finished: Lv.{} exp {} hp {} round {} ({} correct, {} wrong){}",
            state.player.level,
            state.player.exp,
            state.player.hp,
            state.round,
            correct,
            wrong,
            if state.is_game_over() { " - game over" } else { "" }
        );
    }

    /// Hold the on-screen buttons that point at the closest enemy
    fn steer_toward_nearest(session: &mut Session) {
        let state = session.state();
        let here = state.player.center();
        let target = state
            .enemies
            .iter()
            .map(|e| e.center())
            .min_by(|a, b| {
                a.distance_squared(here)
                    .partial_cmp(&b.distance_squared(here))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        for dir in Direction::ALL {
            session.button_up(dir);
        }
        let Some(target) = target else { return };
        let delta = target - here;
        if delta.x > 1.0 {
            session.button_down(Direction::Right);
        } else if delta.x < -1.0 {
            session.button_down(Direction::Left);
        }
        if delta.y > 1.0 {
            session.button_down(Direction::Down);
        } else if delta.y < -1.0 {
            session.button_down(Direction::Up);
        }
    }
}
