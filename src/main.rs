//! Slime Trap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlAudioElement, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use slime_trap::audio::{AudioSink, HtmlAudioSink, MusicPlayer, NullSink};
    use slime_trap::consts::*;
    use slime_trap::platform::HeldKeys;
    use slime_trap::renderer::{CanvasSink, RenderSink, Snapshot};
    use slime_trap::sim::{GameState, TickInput, UpgradeId, tick};
    use slime_trap::ui::{
        HudView, Message, StoreView, message_for_error, message_for_event, welcome_message,
    };

    /// Button presses waiting for the next tick
    #[derive(Default)]
    struct Pending {
        new_game: bool,
        toggle_store: bool,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        keys: HeldKeys,
        pending: Pending,
        accumulator: f32,
        last_time: f64,
        sink: CanvasSink,
        music: MusicPlayer<Box<dyn AudioSink>>,
        document: Document,
        message_timeout: Option<i32>,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = TickInput {
                    movement: self.keys.to_move_input(),
                    toggle_store: self.pending.toggle_store,
                    new_game: self.pending.new_game,
                };
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // One-shot inputs are consumed by the first tick
                self.pending = Pending::default();
            }

            self.handle_events();
        }

        fn handle_events(&mut self) {
            let events = self.state.drain_events();
            self.music.handle_events(&events);
            for event in &events {
                if let Some(message) = message_for_event(event, &self.state) {
                    self.show_message(&message);
                }
            }
        }

        fn buy(&mut self, id: UpgradeId) {
            if let Err(e) = self.state.buy_upgrade(id) {
                log::info!("Purchase refused: {}", e);
                self.show_message(&message_for_error(&e));
            }
            self.handle_events();
        }

        fn show_message(&mut self, message: &Message) {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return,
            };
            if let Some(handle) = self.message_timeout.take() {
                window.clear_timeout_with_handle(handle);
            }
            set_text(&self.document, "message-text", &message.text);
            set_visible(&self.document, "message-box", true);

            if message.is_sticky() {
                return;
            }
            let document = self.document.clone();
            let hide = Closure::once_into_js(move || {
                set_visible(&document, "message-box", false);
            });
            self.message_timeout = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    hide.unchecked_ref(),
                    message.duration_ms as i32,
                )
                .ok();
        }

        fn hide_message(&mut self) {
            if let (Some(handle), Some(window)) = (self.message_timeout.take(), web_sys::window())
            {
                window.clear_timeout_with_handle(handle);
            }
            set_visible(&self.document, "message-box", false);
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = Snapshot::capture(&self.state);
            self.sink.draw(&snapshot);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let doc = &self.document;
            let hud = HudView::build(&self.state);
            set_text(doc, "score-display", &hud.score.to_string());
            set_text(doc, "health-display", &hud.health.to_string());
            set_text(doc, "timer-display", &hud.timer);
            set_visible(doc, "new-game-btn", hud.show_new_game);
            set_visible(doc, "store-btn", hud.show_store_button);
            set_visible(doc, "music-btn", hud.show_music_button);
            set_text(doc, "music-btn", self.music.button_label());

            let store = StoreView::build(&self.state);
            set_visible(doc, "store-panel", store.open);
            set_text(doc, "total-cats-display", &store.total_cats.to_string());
            for item in &store.items {
                let key = item.id.as_str();
                set_visible(doc, &format!("{}-item", key), item.visible);
                set_text(doc, &format!("{}-status", key), &item.status);
                if let Some(btn) = doc
                    .get_element_by_id(&format!("{}-buy", key))
                    .and_then(|el| el.dyn_into::<web_sys::HtmlButtonElement>().ok())
                {
                    btn.set_disabled(!item.can_buy);
                }
            }
        }
    }

    fn set_text(doc: &Document, id: &str, text: &str) {
        if let Some(el) = doc.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(doc: &Document, id: &str, visible: bool) {
        if let Some(el) = doc.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Slime Trap starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("game-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Canvas #game-canvas not found");
            return;
        };
        let Some(sink) = CanvasSink::new(canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };
        sink.resize(CANVAS_WIDTH, CANVAS_HEIGHT);

        let audio: Box<dyn AudioSink> = match document
            .get_element_by_id("game-music")
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
        {
            Some(element) => {
                element.set_loop(true);
                Box::new(HtmlAudioSink::new(element))
            }
            None => {
                log::warn!("No #game-music element, music disabled");
                Box::new(NullSink)
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            keys: HeldKeys::new(),
            pending: Pending::default(),
            accumulator: 0.0,
            last_time: 0.0,
            sink,
            music: MusicPlayer::new(audio),
            document: document.clone(),
            message_timeout: None,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone());
        setup_buttons(&document, game.clone());

        {
            let mut g = game.borrow_mut();
            g.show_message(&welcome_message());
            g.render();
        }
        request_animation_frame(game);

        log::info!("Slime Trap running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Arrow keys would otherwise scroll the page
                if game.borrow_mut().keys.press(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.release(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        // Key-up never arrives once focus leaves the page
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        mut action: impl FnMut(&mut Game) + 'static,
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{} not found", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut game.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "new-game-btn", game.clone(), |g| {
            g.keys.clear();
            g.pending.new_game = true;
        });
        on_click(document, "store-btn", game.clone(), |g| {
            g.hide_message();
            g.pending.toggle_store = true;
        });
        on_click(document, "close-store-btn", game.clone(), |g| {
            g.pending.toggle_store = true;
        });
        on_click(document, "music-btn", game.clone(), |g| g.music.toggle());
        for id in UpgradeId::ALL {
            on_click(document, &format!("{}-buy", id.as_str()), game.clone(), move |g| {
                g.buy(id)
            });
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless runner: plays a few rounds with a simple autopilot
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use slime_trap::Tuning;
    use slime_trap::renderer::Snapshot;
    use slime_trap::sim::{GameState, MoveInput, RoundPhase, TickInput, UpgradeId, tick};

    const ROUNDS: u32 = 3;
    /// Ignore cats farther than this
    const DANGER_RADIUS: f32 = 200.0;

    /// Flee the nearest free cat, drifting back toward the center otherwise
    pub fn autopilot(state: &GameState) -> MoveInput {
        let pos = state.player.pos;
        let center = state.bounds() * 0.5;
        let threat = state
            .entities
            .cats
            .iter()
            .filter(|c| !c.trapped)
            .map(|c| c.pos)
            .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)));

        let desired = match threat {
            Some(cat) if cat.distance(pos) < DANGER_RADIUS => {
                // Lean toward the center so the walls don't pin us
                (pos - cat).normalize_or_zero() + (center - pos).normalize_or_zero() * 0.5
            }
            _ => (center - pos) / center.length(),
        };

        to_keys(desired)
    }

    fn to_keys(dir: Vec2) -> MoveInput {
        const DEADZONE: f32 = 0.2;
        MoveInput {
            up: dir.y < -DEADZONE,
            down: dir.y > DEADZONE,
            left: dir.x < -DEADZONE,
            right: dir.x > DEADZONE,
        }
    }

    fn shop(state: &mut GameState) {
        for id in UpgradeId::ALL {
            match state.buy_upgrade(id) {
                Ok(()) => log::info!("Autopilot bought {}", id),
                Err(e) => log::debug!("Autopilot skipped {}: {}", id, e),
            }
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let tuning = match std::env::args().nth(1) {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Tuning::default(),
        };
        let seed = std::env::var("SLIME_TRAP_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(42);

        let mut state = GameState::with_tuning(seed, tuning)?;
        log::info!("Headless run with seed {}", seed);

        for round in 1..=ROUNDS {
            shop(&mut state);
            tick(
                &mut state,
                &TickInput {
                    new_game: true,
                    ..Default::default()
                },
            );
            while state.phase == RoundPhase::Running {
                let input = TickInput {
                    movement: autopilot(&state),
                    ..Default::default()
                };
                tick(&mut state, &input);
            }
            let events = state.drain_events();
            let summary = Snapshot::capture(&state);
            log::info!(
                "Round {}: {:?} after {} ticks, {} events, score {}, lifetime {}",
                round,
                state.phase,
                state.clock.elapsed,
                events.len(),
                state.economy.round_score,
                state.economy.lifetime_currency
            );
            log::debug!("Final frame: {}", summary.to_json()?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Slime Trap (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("Headless run failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
