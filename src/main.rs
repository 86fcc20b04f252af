//! Breakwall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use breakwall::audio::AudioManager;
    use breakwall::consts::*;
    use breakwall::render::{self, DrawCmd, Frame};
    use breakwall::sim::{Command, GamePhase, GameState, standard_levels, tick};
    use breakwall::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        ctx: CanvasRenderingContext2d,
        audio: AudioManager,
        settings: Settings,
        highscores: HighScores,
        accumulator: f32,
        last_time: f64,
        last_phase: GamePhase,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(state: GameState, ctx: CanvasRenderingContext2d) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);

            Self {
                state,
                ctx,
                audio,
                settings,
                highscores: HighScores::new(),
                accumulator: 0.0,
                last_time: 0.0,
                last_phase: GamePhase::Paused,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Toggle mute and persist the preference
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_muted(self.settings.muted);
            self.settings.save();
            log::info!("audio muted: {}", self.settings.muted);
        }

        /// Toggle the FPS counter and persist the preference
        fn toggle_fps(&mut self) {
            self.settings.show_fps = !self.settings.show_fps;
            self.settings.save();
        }

        /// Run fixed ticks out of the frame-time accumulator
        fn update(&mut self, dt: f32, time: f64) {
            self.accumulator += dt.min(0.25);

            let mut steps = 0;
            while self.accumulator >= TICK_DT && steps < MAX_TICKS_PER_FRAME {
                tick(&mut self.state);
                self.accumulator -= TICK_DT;
                steps += 1;

                for event in self.state.events.clone() {
                    self.audio.play(event.into());
                }

                if self.state.phase == GamePhase::NextLevel {
                    // Advance to the next layout; the reset pauses until the
                    // player serves again
                    self.state.reset(false);
                }
            }

            // Record the run on the session leaderboard once, at the
            // transition into game over
            if self.state.phase == GamePhase::GameOver && self.last_phase != GamePhase::GameOver {
                let level = self.state.level as u32 + 1;
                if let Some(rank) = self.highscores.add_score(self.state.score, level) {
                    log::info!("score {} ranked #{}", self.state.score, rank);
                }
            }
            self.last_phase = self.state.phase;

            // FPS over a 60-frame window of timestamps
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && time > oldest {
                self.fps = (60_000.0 / (time - oldest)).round() as u32;
            }
        }

        fn draw(&self) {
            let fps = self.settings.show_fps.then_some(self.fps);
            let frame = render::compose(&self.state, fps);
            let ctx = &self.ctx;

            ctx.set_fill_style_str("black");
            ctx.fill_rect(0.0, 0.0, frame.width as f64, frame.height as f64);

            for cmd in &frame.cmds {
                match *cmd {
                    DrawCmd::Rect { x, y, w, h, fill, stroke } => {
                        ctx.set_fill_style_str(fill);
                        ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
                        if let Some(stroke) = stroke {
                            ctx.set_stroke_style_str(stroke);
                            ctx.stroke_rect(x as f64, y as f64, w as f64, h as f64);
                        }
                    }
                    DrawCmd::Circle { cx, cy, radius, fill } => {
                        ctx.set_fill_style_str(fill);
                        ctx.begin_path();
                        let _ = ctx.arc(
                            cx as f64,
                            cy as f64,
                            radius as f64,
                            0.0,
                            std::f64::consts::TAU,
                        );
                        ctx.fill();
                    }
                }
            }

            self.draw_text(&frame);
        }

        fn draw_text(&self, frame: &Frame) {
            let ctx = &self.ctx;
            ctx.set_fill_style_str("white");
            ctx.set_font("20px monospace");
            let _ = ctx.fill_text(&frame.status, 10.0, frame.height as f64 - 12.0);

            if let Some(fps) = &frame.fps_label {
                ctx.set_font("14px monospace");
                let w = ctx.measure_text(fps).map(|m| m.width()).unwrap_or(0.0);
                let _ = ctx.fill_text(fps, frame.width as f64 - w - 8.0, 16.0);
            }

            if let Some(banner) = &frame.banner {
                ctx.set_font("28px monospace");
                let w = ctx
                    .measure_text(banner)
                    .map(|m| m.width())
                    .unwrap_or(0.0);
                let x = (frame.width as f64 - w) / 2.0;
                let _ = ctx.fill_text(banner, x, frame.height as f64 / 2.0);
            }
        }
    }

    /// Map a key code to a logical command; everything else is ignored
    fn map_key(code: &str) -> Option<Command> {
        match code {
            "KeyA" | "ArrowLeft" => Some(Command::MoveLeft),
            "KeyD" | "ArrowRight" => Some(Command::MoveRight),
            "KeyP" => Some(Command::TogglePause),
            _ => None,
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Breakwall starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(standard_levels(), seed).expect("built-in layouts are valid");
        log::info!("Game initialized with seed: {}", seed);

        canvas.set_width(state.stage_width() as u32);
        canvas.set_height(state.screen_height() as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let game = Rc::new(RefCell::new(Game::new(state, ctx)));

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());
        request_animation_frame(game);

        log::info!("Breakwall running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "KeyM" => {
                        event.prevent_default();
                        game.borrow_mut().toggle_mute();
                    }
                    "KeyF" => {
                        event.prevent_default();
                        game.borrow_mut().toggle_fps();
                    }
                    code => {
                        if let Some(cmd) = map_key(code) {
                            event.prevent_default();
                            let mut g = game.borrow_mut();
                            // Browsers keep audio suspended until a user
                            // gesture
                            g.audio.resume();
                            g.state.key_pressed(cmd);
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(cmd) = map_key(&event.code()) {
                    event.prevent_default();
                    game.borrow_mut().state.key_released(cmd);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let document_clone = document.clone();

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Running {
                    g.state.phase = GamePhase::Paused;
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
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
                TICK_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.draw();
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
    use breakwall::sim::{Command, Direction, GamePhase, GameState, standard_levels, tick};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    log::info!("Breakwall (headless) starting with seed {}", seed);

    let mut state = GameState::new(standard_levels(), seed).expect("built-in layouts are valid");
    state.key_pressed(Command::TogglePause);

    // Drive the paddle toward the ball and play until game over
    for _ in 0..100_000u32 {
        let paddle_center = state.paddle.rect.x + state.paddle.rect.w / 2.0;
        if state.ball.pos.x < paddle_center - 4.0 {
            state.paddle.set_direction(Direction::Left);
        } else if state.ball.pos.x > paddle_center + 4.0 {
            state.paddle.set_direction(Direction::Right);
        } else {
            state.paddle.set_direction(Direction::Idle);
        }

        tick(&mut state);

        match state.phase {
            GamePhase::Paused => {
                // Life lost; serve the next ball immediately
                state.key_pressed(Command::TogglePause);
            }
            GamePhase::NextLevel => {
                state.reset(false);
                state.key_pressed(Command::TogglePause);
            }
            GamePhase::GameOver => break,
            GamePhase::Running => {}
        }
    }

    println!(
        "final score {} (high {}) after {} ticks, reached level {}",
        state.score,
        state.high_score.max(state.score),
        state.ticks,
        state.level + 1
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
