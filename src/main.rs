//! Cloud Hopper entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use cloud_hopper::audio::{AudioManager, SoundEffect};
    use cloud_hopper::consts::*;
    use cloud_hopper::renderer::{CanvasSurface, RenderOptions, Scale, draw_frame};
    use cloud_hopper::sim::{GameEvent, GameState, TickInput, tick};
    use cloud_hopper::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: Option<CanvasSurface>,
        audio: AudioManager,
        settings: Settings,
        highscores: HighScores,
        scale: Scale,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);

            Self {
                state: GameState::new(seed),
                surface: None,
                audio,
                settings,
                highscores: HighScores::load(),
                scale: Scale::IDENTITY,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn set_scale(&mut self, width: f32, height: f32) {
            self.scale = Scale::from_canvas(width, height);
        }

        /// Run simulation substeps and route the emitted events
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.jump = false;
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::Jumped => self.audio.play(SoundEffect::Jump),
                    GameEvent::DoubleJumped => self.audio.play(SoundEffect::DoubleJump),
                    GameEvent::Scored => self.audio.play(SoundEffect::Score),
                    GameEvent::Collided => {
                        self.audio.play(SoundEffect::Collision);
                        self.record_run();
                    }
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Record the finished run on the leaderboard
        fn record_run(&mut self) {
            let score = self.state.score;
            match self.highscores.add_score(score, js_sys::Date::now()) {
                Some(rank) => {
                    log::info!("Run ended at score {score} (leaderboard rank {rank})");
                    self.highscores.save();
                }
                None => log::info!("Run ended at score {score}"),
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let opts = RenderOptions {
                best_score: self.highscores.top_score(),
                fps: self.settings.show_fps.then_some(self.fps),
                particles: self.settings.particles,
            };
            if let Some(surface) = &mut self.surface {
                draw_frame(&self.state, surface, self.scale, &opts);
            }
        }
    }

    /// Size the canvas backing store to its CSS size times devicePixelRatio
    fn size_canvas(canvas: &HtmlCanvasElement) -> (f32, f32) {
        let window = web_sys::window().expect("no window");
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width as f32, height as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cloud Hopper starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = size_canvas(&canvas);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {seed}");

        {
            let mut g = game.borrow_mut();
            g.surface = CanvasSurface::new(canvas.clone());
            if g.surface.is_none() {
                log::error!("Failed to acquire 2d canvas context");
                return;
            }
            g.set_scale(width, height);
        }

        setup_input_handlers(game.clone());
        setup_resize_handler(canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Cloud Hopper running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            // One key-down = one jump trigger; held-key repeats are ignored
            if event.code() == "Space" && !event.repeat() {
                event.prevent_default();
                game.borrow_mut().input.jump = true;
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = size_canvas(&canvas);
            game.borrow_mut().set_scale(width, height);
            log::info!("Canvas resized to {width}x{height}");
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cloud Hopper (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    println!("\nRunning headless sanity simulation...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use cloud_hopper::consts::GROUND_Y;
    use cloud_hopper::sim::{GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(0xC10D);
    tick(&mut state, &TickInput { jump: true });
    assert_eq!(state.phase, GamePhase::Playing);

    // Hop roughly once a second for up to a minute of game time
    for i in 0..3600u32 {
        let jump = i % 60 == 0;
        tick(&mut state, &TickInput { jump });
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    assert!(state.player.bottom() <= GROUND_Y);
    println!(
        "✓ Simulated {} ticks, final score {}",
        state.time_ticks, state.score
    );
}
