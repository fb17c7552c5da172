//! Lava Runner entry point
//!
//! Native builds run a headless autopilot session and log what happens. The
//! wasm build exports `WebGame`, which the JS glue drives once per animation
//! frame and draws from.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use lava_runner::persistence::LocalStorage;
    use lava_runner::sim::{self, GameEvent, GameState, TickInput};
    use lava_runner::{ColorSet, Difficulty, FrameClock, GameError, Viewport, Wallet};

    /// One game session bound to a canvas
    #[wasm_bindgen]
    pub struct WebGame {
        state: GameState,
        clock: FrameClock,
        input: TickInput,
        storage: LocalStorage,
        /// Events drained from the sim but not yet handed to JS
        pending: Vec<GameEvent>,
    }

    impl WebGame {
        fn create(canvas_id: &str) -> Result<Self, GameError> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| GameError::MissingRenderTarget("no document".to_string()))?;
            let canvas: HtmlCanvasElement = document
                .get_element_by_id(canvas_id)
                .and_then(|el| el.dyn_into().ok())
                .ok_or_else(|| GameError::MissingRenderTarget(canvas_id.to_string()))?;
            let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32)?;

            let storage = LocalStorage::open();
            let wallet = Wallet::load(&storage);
            let seed = js_sys::Date::now() as u64;
            log::info!(
                "Game initialized with seed {} ({}x{})",
                seed,
                viewport.width,
                viewport.height
            );

            Ok(Self {
                state: GameState::new(seed, viewport, Difficulty::default(), wallet),
                clock: FrameClock::new(),
                input: TickInput::default(),
                storage,
                pending: Vec::new(),
            })
        }

        fn collect_events(&mut self) {
            let events = self.state.drain_events();
            if events.iter().any(GameEvent::touches_wallet) {
                self.state.wallet.save(&mut self.storage);
            }
            self.pending.extend(events);
        }
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new(canvas_id: &str) -> Result<WebGame, JsValue> {
            Self::create(canvas_id).map_err(|e| {
                log::error!("{e}");
                JsValue::from_str(&e.to_string())
            })
        }

        /// Run however many ticks the frame timestamp calls for
        pub fn frame(&mut self, now_ms: f64) {
            let steps = self.clock.advance(now_ms);
            for _ in 0..steps {
                let input = self.input.clone();
                sim::tick(&mut self.state, &input);

                // One-shot inputs are consumed by the first tick
                self.input.jump = false;
                self.input.pause = false;
            }
            self.collect_events();
        }

        pub fn jump(&mut self) {
            self.input.jump = true;
        }

        pub fn set_pointer_down(&mut self, down: bool) {
            self.input.pointer_down = down;
        }

        pub fn toggle_pause(&mut self) {
            self.input.pause = true;
        }

        pub fn set_autopilot(&mut self, on: bool) {
            self.input.autopilot = on;
        }

        /// Call from the page's `visibilitychange` listener
        pub fn sync_visibility(&mut self) {
            let hidden = web_sys::window()
                .and_then(|w| w.document())
                .is_some_and(|d| d.visibility_state() == web_sys::VisibilityState::Hidden);
            sim::set_visibility(&mut self.state, !hidden);
            if hidden {
                // Resume should not fire a stale frame delta
                self.clock.reset();
            }
            self.collect_events();
        }

        pub fn set_difficulty(&mut self, name: &str) -> bool {
            match Difficulty::from_str(name) {
                Some(difficulty) => sim::set_difficulty(&mut self.state, difficulty),
                None => {
                    log::warn!("Unknown difficulty: {name}");
                    false
                }
            }
        }

        pub fn set_color_set(&mut self, name: &str) -> bool {
            match ColorSet::from_str(name) {
                Some(colors) => {
                    sim::set_color_set(&mut self.state, colors);
                    true
                }
                None => false,
            }
        }

        pub fn score(&self) -> u32 {
            self.state.score
        }

        pub fn coins(&self) -> f64 {
            self.state.wallet.coins as f64
        }

        pub fn wins(&self) -> u32 {
            self.state.wallet.wins
        }

        pub fn countdown_seconds(&self) -> u32 {
            self.state.countdown.seconds_left()
        }

        /// Full state as JSON for the renderer
        pub fn snapshot_json(&self) -> String {
            self.state.snapshot_json()
        }

        /// Events since the last call, as a JSON array
        pub fn take_events_json(&mut self) -> String {
            let events = std::mem::take(&mut self.pending);
            serde_json::to_string(&events).unwrap_or_else(|_| String::from("[]"))
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Lava Runner loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Two minutes of simulated play
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_TICKS: u32 = 120 * lava_runner::consts::TICKS_PER_SECOND;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lava Runner (native) starting...");
    log::info!("Native mode runs the autopilot headless - build for wasm32 to play");

    if let Err(e) = run_headless() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Usage: `lava-runner [seed] [difficulty]`
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), lava_runner::GameError> {
    use lava_runner::consts::{VIEW_HEIGHT, VIEW_WIDTH};
    use lava_runner::sim::{self, GameEvent, GameState, TickInput};
    use lava_runner::{Difficulty, MemoryStorage, Viewport, Wallet};

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or_default();

    let viewport = Viewport::new(VIEW_WIDTH, VIEW_HEIGHT)?;
    let mut storage = MemoryStorage::new();
    let wallet = Wallet::load(&storage);
    let mut state = GameState::new(seed, viewport, difficulty, wallet);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut best = 0;
    for _ in 0..HEADLESS_TICKS {
        sim::tick(&mut state, &input);
        best = best.max(state.score);

        let events = state.drain_events();
        if events.iter().any(GameEvent::touches_wallet) {
            state.wallet.save(&mut storage);
        }
        for event in events {
            match event {
                GameEvent::Died(cause) => {
                    log::info!("Died ({cause:?}) at score {}", state.score)
                }
                GameEvent::ModeChanged(mode) => log::info!("Mode: {mode:?}"),
                _ => log::trace!("{event:?}"),
            }
        }
    }

    log::debug!("Final state: {}", state.snapshot_json());
    println!(
        "seed {seed} on {}: {} runs, best score {best}, {} coins, {} wins",
        difficulty.as_str(),
        state.runs,
        state.wallet.coins,
        state.wallet.wins
    );
    Ok(())
}
