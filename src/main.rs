//! Geocode Jumper entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use geocode_jumper::animation::PlayerAnimation;
    use geocode_jumper::audio::{AudioManager, SoundEffect};
    use geocode_jumper::consts::*;
    use geocode_jumper::share::{BrowserClipboard, share_score};
    use geocode_jumper::sim::{GameEvent, GameState, TickInput, tick};
    use geocode_jumper::{RenderSnapshot, Settings};

    const SKY: &str = "#dff1ff";
    const BUILDING: &str = "#3d4a5c";
    const ROOF_VISITED: &str = "#0066ff";
    const PLAYER: &str = "#ff7a1a";
    const TEXT: &str = "#1b1b1b";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        animation: PlayerAnimation,
        audio: AudioManager,
        ctx: CanvasRenderingContext2d,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input);
                self.animation.update(&self.state.player);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.restart = false;
                self.input.toggle_bot = false;
                self.input.toggle_debug = false;

                for event in self.state.drain_events() {
                    if event == GameEvent::Restarted {
                        self.animation.reset();
                    }
                    if let Some(effect) = SoundEffect::for_event(&event) {
                        self.audio.play(effect);
                    }
                }
            }
        }

        /// Draw the current frame
        fn render(&self) {
            let snapshot = RenderSnapshot::capture(&self.state, &self.animation);
            let ctx = &self.ctx;

            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str(SKY);
            ctx.fill_rect(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);

            ctx.set_fill_style_str("#ffffff");
            for cloud in &snapshot.clouds {
                let height = 30.0 + f64::from(cloud.variant) * 8.0;
                ctx.fill_rect(cloud.x, cloud.y, CLOUD_WIDTH, height);
            }

            for platform in &snapshot.platforms {
                ctx.set_fill_style_str(BUILDING);
                ctx.fill_rect(platform.x, platform.y, platform.width, SCREEN_HEIGHT - platform.y);
                if platform.visited {
                    // Roof colour sweeps in from the left
                    ctx.set_fill_style_str(ROOF_VISITED);
                    ctx.fill_rect(platform.x, platform.y, platform.width * platform.reveal_progress, 6.0);
                }
            }

            let player = &snapshot.player;
            ctx.set_fill_style_str(PLAYER);
            ctx.fill_rect(player.sprite_x, player.sprite_y, player.sprite_size, player.sprite_size);

            ctx.set_font("13px monospace");
            ctx.set_text_align("center");
            ctx.set_fill_style_str(TEXT);
            for geocode in &snapshot.geocodes {
                ctx.set_global_alpha(geocode.alpha);
                let _ = ctx.fill_text(&geocode.text, geocode.x, geocode.y);
            }
            ctx.set_global_alpha(1.0);

            if !snapshot.hitboxes.is_empty() {
                ctx.set_stroke_style_str("#ff0000");
                for hitbox in &snapshot.hitboxes {
                    ctx.stroke_rect(hitbox.x, hitbox.y, hitbox.width, hitbox.height);
                }
            }

            let centre = SCREEN_WIDTH / 2.0;
            if snapshot.game_over {
                let _ = ctx.fill_text("That's not a rooftop geocode!", centre, 60.0);
                let _ = ctx.fill_text("Press Enter to Restart", centre, 90.0);
            } else if snapshot.bot {
                let _ = ctx.fill_text("You can't be trusted to do it yourself.", centre, 60.0);
                let _ = ctx.fill_text("Now you have to use Smarty.", centre, 80.0);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.game_over {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {err}").into());
        }

        log::info!("Geocode Jumper starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document to run in");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Missing #canvas element");
            return;
        };
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("2D canvas context unavailable");
            return;
        };

        let settings = Settings::load();
        let state = settings.new_session(js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", state.seed());

        let game = Rc::new(RefCell::new(Game {
            state,
            animation: PlayerAnimation::default(),
            audio: AudioManager::new(settings.volume, settings.muted),
            ctx,
            accumulator: 0.0,
            last_time: 0.0,
            input: TickInput::default(),
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Geocode Jumper running!");
    }

    /// Apply a key press or release to the held-key flags
    fn apply_key(input: &mut TickInput, key: &str, pressed: bool) {
        match key {
            "ArrowLeft" | "a" | "A" => input.left = pressed,
            "ArrowRight" | "d" | "D" => input.right = pressed,
            " " | "ArrowUp" | "w" | "W" => input.jump = pressed,
            "Enter" if pressed => input.restart = true,
            "b" | "B" if pressed => input.toggle_bot = true,
            "r" | "R" if pressed => input.toggle_debug = true,
            _ => {}
        }
    }

    /// Touch zones: left third, right third, middle jumps
    fn apply_touches(input: &mut TickInput, canvas: &HtmlCanvasElement, event: &TouchEvent) {
        input.left = false;
        input.right = false;
        input.jump = false;

        let rect = canvas.get_bounding_client_rect();
        let touches = event.touches();
        for i in 0..touches.length() {
            let Some(touch) = touches.get(i) else { continue };
            let x = (f64::from(touch.client_x()) - rect.left()) / rect.width();
            if x < 1.0 / 3.0 {
                input.left = true;
            } else if x > 2.0 / 3.0 {
                input.right = true;
            } else {
                input.jump = true;
            }
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if event.key() == " " {
                    event.prevent_default();
                }
                apply_key(&mut g.input, event.key().as_str(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                apply_key(&mut game.borrow_mut().input, event.key().as_str(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start/move/end all recompute the held zones
        for name in ["touchstart", "touchmove", "touchend", "touchcancel"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if event.type_() == "touchstart" && g.state.game_over {
                    g.input.restart = true;
                }
                apply_touches(&mut g.input, &canvas_clone, &event);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let mute_label = |muted: bool| if muted { "Unmute" } else { "Mute" };

        if let Some(btn) = document.get_element_by_id("mute-btn") {
            btn.set_text_content(Some(mute_label(game.borrow().audio.muted())));

            let game = game.clone();
            let label = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let muted = game.borrow_mut().audio.toggle_mute();
                label.set_text_content(Some(mute_label(muted)));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("share-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                share_score(&game.borrow().state, &mut BrowserClipboard);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
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

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless bot run
#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser)]
#[command(name = "geocode-jumper")]
#[command(about = "Let the bot play a headless run of Geocode Jumper")]
struct Args {
    /// JSON settings file
    settings: Option<std::path::PathBuf>,

    /// Seed override (defaults to the settings seed, then the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to simulate (five minutes of play by default)
    #[arg(long, default_value_t = 5 * 60 * 60)]
    frames: u32,

    /// Print the final frame as JSON
    #[arg(long)]
    snapshot: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use geocode_jumper::animation::PlayerAnimation;
    use geocode_jumper::share::summary_text;
    use geocode_jumper::sim::{GameEvent, TickInput, tick};
    use geocode_jumper::{RenderSnapshot, Settings};

    env_logger::init();
    let args = Args::parse();
    log::info!("Geocode Jumper (native) starting...");
    log::info!("No window natively, so the bot plays a headless run. Use `trunk serve` to play");

    let mut settings = match &args.settings {
        Some(path) => match Settings::from_file(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let clock_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let mut state = settings.new_session(clock_seed);
    state.bot = true;
    log::info!("Seed: {}", state.seed());

    let mut animation = PlayerAnimation::default();
    let input = TickInput::default();
    for _ in 0..args.frames {
        tick(&mut state, &input);
        animation.update(&state.player);
        for event in state.drain_events() {
            if let GameEvent::NewRooftop { score, pos } = event {
                log::debug!("Rooftop {score} at x={:.0} y={:.0}", pos.x, pos.y);
            }
        }
        if state.game_over {
            break;
        }
    }

    println!("{}", summary_text(state.score, state.bot));

    if args.snapshot {
        match RenderSnapshot::capture(&state, &animation).to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Could not serialize snapshot: {err}"),
        }
    }
}
