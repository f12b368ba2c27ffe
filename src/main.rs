//! Beard Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlImageElement, KeyboardEvent,
        MouseEvent, TouchEvent,
    };

    use beard_dash::audio::{AudioManager, SoundEffect};
    use beard_dash::highscores::BestScore;
    use beard_dash::sim::{GameEvent, GamePhase, GameState, TickInput, Viewport, tick};

    /// Game instance holding simulation state and platform resources
    struct Game {
        state: GameState,
        input: TickInput,
        audio: AudioManager,
        best: BestScore,
        last_phase: GamePhase,
        /// Day/night background cycle, presentation only
        bg_cycle: f32,
        ctx: CanvasRenderingContext2d,
        player_img: HtmlImageElement,
        coin_img: HtmlImageElement,
    }

    impl Game {
        fn new(
            seed: u64,
            viewport: Viewport,
            ctx: CanvasRenderingContext2d,
            player_img: HtmlImageElement,
            coin_img: HtmlImageElement,
        ) -> Self {
            Self {
                state: GameState::new(seed, viewport),
                input: TickInput::default(),
                audio: AudioManager::new(),
                best: BestScore::load(),
                last_phase: GamePhase::NotStarted,
                bg_cycle: 0.0,
                ctx,
                player_img,
                coin_img,
            }
        }

        /// A press from any input device. The tick decides whether it starts
        /// the game or jumps.
        fn press(&mut self) {
            self.audio.resume();
            self.input.jump = true;
        }

        /// Run one simulation tick and route its side effects
        fn update(&mut self) {
            tick(&mut self.state, &self.input);
            // Clear one-shot input after the tick consumes it
            self.input.jump = false;

            for event in self.state.drain_events() {
                match event {
                    GameEvent::Jump => self.audio.play(SoundEffect::Jump),
                    GameEvent::Hit => self.audio.play(SoundEffect::Hit),
                }
            }

            if self.state.phase == GamePhase::Running {
                self.bg_cycle += 0.002;
                if self.bg_cycle > std::f32::consts::TAU {
                    self.bg_cycle = 0.0;
                }
            }

            let phase = self.state.phase;
            if phase != self.last_phase {
                match phase {
                    GamePhase::Running => {
                        if self.last_phase == GamePhase::NotStarted {
                            hide_element("startScreen");
                        } else {
                            hide_element("message");
                        }
                    }
                    GamePhase::GameOver => self.on_game_over(),
                    GamePhase::NotStarted => {}
                }
                self.last_phase = phase;
            }
        }

        /// Final-score handoff: persist the best and show the overlay
        fn on_game_over(&mut self) {
            if self.best.record(self.state.score) {
                self.best.save();
            }
            set_text("status", &format!("Game Over — Score: {}", self.state.score));
            set_text("bestScore", &self.best.best.to_string());
            show_element("message");
            log::info!("game over at score {}", self.state.score);
        }

        /// Draw the current frame. Read-only over simulation state.
        fn render(&self) {
            let w = self.state.viewport.width as f64;
            let h = self.state.viewport.height as f64;
            let ctx = &self.ctx;

            // Day/night sky
            let v = (128.0 + self.bg_cycle.sin() * 100.0).floor() as i32;
            ctx.set_fill_style_str(&format!("rgb({}, {}, {})", v, v + 20, v + 30));
            ctx.fill_rect(0.0, 0.0, w, h);

            // Ground band
            ctx.set_fill_style_str("#4b4f52");
            ctx.fill_rect(0.0, h * 0.9, w, h * 0.1);

            if self.player_img.complete() {
                let p = &self.state.player;
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    &self.player_img,
                    p.pos.x as f64,
                    p.pos.y as f64,
                    p.size.x as f64,
                    p.size.y as f64,
                );

                for o in &self.state.obstacles {
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        &self.player_img,
                        o.pos.x as f64,
                        o.pos.y as f64,
                        o.size.x as f64,
                        o.size.y as f64,
                    );
                }
            }

            if self.coin_img.complete() {
                for c in self.state.pickups.iter().filter(|c| !c.collected) {
                    let r = c.radius as f64;
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        &self.coin_img,
                        c.pos.x as f64 - r,
                        c.pos.y as f64 - r,
                        r * 2.0,
                        r * 2.0,
                    );
                }
            }

            ctx.set_fill_style_str("white");
            ctx.set_font("20px Arial");
            let _ = ctx.fill_text(&format!("Lives: {}", self.state.player.lives), 10.0, 40.0);
        }

        fn update_hud(&self) {
            set_text("score", &self.state.score.to_string());
        }
    }

    fn document() -> web_sys::Document {
        web_sys::window().expect("no window").document().expect("no document")
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn hide_element(id: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    fn show_element(id: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.set_attribute("class", "");
        }
    }

    fn window_size() -> (f32, f32) {
        let window = web_sys::window().expect("no window");
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1280.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(720.0);
        (w as f32, h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Beard Dash starting...");

        let document = document();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (w, h) = window_size();
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("no 2d context")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let player_img = HtmlImageElement::new().expect("image element");
        player_img.set_src("beard.png");
        let coin_img = HtmlImageElement::new().expect("image element");
        coin_img.set_src("coin.png");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            Viewport::new(w, h),
            ctx,
            player_img.clone(),
            coin_img,
        )));
        log::info!("Game initialized with seed: {}", seed);

        // Fix the player's box from the sprite once it loads
        {
            let game = game.clone();
            let img = player_img.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                if img.natural_height() > 0 {
                    let aspect = img.natural_width() as f32 / img.natural_height() as f32;
                    game.borrow_mut().state.set_sprite_aspect(aspect);
                }
            });
            let _ = player_img
                .add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        set_text("bestScore", &game.borrow().best.best.to_string());

        setup_input_handlers(game.clone());
        setup_resize(canvas.clone(), game.clone());
        setup_restart_button(game.clone());

        request_animation_frame(game);

        log::info!("Beard Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Click: start or jump (ignoring clicks on the restart button)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let on_restart = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .is_some_and(|el| el.id() == "restart");
                if on_restart {
                    return;
                }
                game.borrow_mut().press();
            });
            let _ = window
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse hold for variable jump height
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.jump_held = true;
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.jump_held = false;
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard (Space)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    let mut g = game.borrow_mut();
                    if !event.repeat() {
                        g.press();
                    }
                    g.input.jump_held = true;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    game.borrow_mut().input.jump_held = false;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch controls for mobile
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.press();
                g.input.jump_held = true;
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.jump_held = false;
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = window_size();
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            game.borrow_mut().state.set_viewport(w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        if let Some(btn) = document().get_element_by_id("restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.reset();
                log::info!("Game restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use beard_dash::sim::{GamePhase, GameState, TickInput, Viewport, tick};

    env_logger::init();
    log::info!("Beard Dash (native) starting...");

    // Headless demo run: scripted periodic jumps against a seeded world.
    // The real game runs in the browser; build with trunk for the web version.
    let mut state = GameState::new(42, Viewport::new(1280.0, 720.0));
    tick(
        &mut state,
        &TickInput {
            jump: true,
            jump_held: false,
        },
    );

    for i in 0..3600u32 {
        let input = TickInput {
            jump: i % 130 == 0,
            jump_held: i % 130 < 16,
        };
        tick(&mut state, &input);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "run ended: score {} lives {} after {} ticks",
        state.score,
        state.player.lives,
        state.time_ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
