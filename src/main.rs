//! Pixel Runner entry point
//!
//! Browser build: canvas + WebGPU + keyboard, driven by requestAnimationFrame.
//! Native build: headless run at a fixed frame rate, useful for tuning checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use pixel_runner::renderer::RenderState;
    use pixel_runner::{Difficulty, Session, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        last_hud_score: Option<u64>,
        last_hud_game_over: Option<bool>,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64) -> Self {
            Self {
                session: Session::new(tuning, seed),
                render_state: None,
                last_hud_score: None,
                last_hud_game_over: None,
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let snapshot = self.session.snapshot();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&snapshot, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM (only when they change)
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.session.state();
            let score = state.display_score();

            if self.last_hud_score != Some(score) {
                if let Some(el) = document.get_element_by_id("score-value") {
                    el.set_text_content(Some(&score.to_string()));
                }
                self.last_hud_score = Some(score);
            }

            if self.last_hud_game_over != Some(state.game_over) {
                if let Some(el) = document.get_element_by_id("game-over") {
                    let class = if state.game_over { "" } else { "hidden" };
                    let _ = el.set_attribute("class", class);
                }
                if state.game_over {
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&score.to_string()));
                    }
                    if let Some(el) = document.get_element_by_id("best-score") {
                        el.set_text_content(Some(&self.session.best_score().to_string()));
                    }
                }
                self.last_hud_game_over = Some(state.game_over);
            }
        }
    }

    /// Difficulty from `?difficulty=hard` in the page URL
    fn difficulty_from_url() -> Option<Difficulty> {
        let search = web_sys::window()?.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "difficulty")
            .and_then(|(_, value)| Difficulty::from_str(value))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Pixel Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let difficulty = difficulty_from_url().unwrap_or_default();
        let tuning = Tuning::from_preset(difficulty);
        log::info!("Difficulty: {}", difficulty.as_str());

        // Backing store matches the world; CSS scales it
        canvas.set_width(tuning.world_width as u32);
        canvas.set_height(tuning.world_height as u32);
        let (width, height) = (canvas.width(), canvas.height());

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, seed)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(game.clone())?;
        setup_restart_button(game.clone())?;

        request_animation_frame(game);

        log::info!("Pixel Runner running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        // Keep the page from scrolling
                        event.prevent_default();
                        g.session.set_jump(true);
                    }
                    "KeyR" => g.session.request_restart_with_seed(js_sys::Date::now() as u64),
                    "KeyI" => {
                        g.session.toggle_idle_mode();
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.code().as_str(), "Space" | "ArrowUp") {
                    game.borrow_mut().session.set_jump(false);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut()
                    .session
                    .request_restart_with_seed(js_sys::Date::now() as u64);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
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
            g.session.frame(time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use pixel_runner::{Difficulty, Session, Tuning, TuningError};

    /// Command line options for the headless runner
    #[derive(Debug)]
    pub struct Options {
        pub seed: u64,
        pub frames: u32,
        pub fps: f64,
        pub tuning: Option<PathBuf>,
        pub difficulty: Option<Difficulty>,
        pub autopilot: bool,
        pub json: bool,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                seed: 1,
                frames: 60 * 60,
                fps: 60.0,
                tuning: None,
                difficulty: None,
                autopilot: true,
                json: false,
            }
        }
    }

    pub const USAGE: &str = "usage: pixel-runner [--seed N] [--frames N] [--fps N] \
        [--tuning FILE] [--difficulty easy|normal|hard] [--manual] [--json]";

    fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, String> {
        args.next().ok_or_else(|| format!("{flag} needs a value"))
    }

    fn number<T: std::str::FromStr>(raw: String, flag: &str) -> Result<T, String> {
        raw.parse().map_err(|_| format!("{flag}: invalid number '{raw}'"))
    }

    pub fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
        let mut opts = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => opts.seed = number(value(&mut args, "--seed")?, "--seed")?,
                "--frames" => opts.frames = number(value(&mut args, "--frames")?, "--frames")?,
                "--fps" => {
                    let fps: f64 = number(value(&mut args, "--fps")?, "--fps")?;
                    if !(fps.is_finite() && fps > 0.0) {
                        return Err(format!("--fps must be positive, got {fps}"));
                    }
                    opts.fps = fps;
                }
                "--tuning" => opts.tuning = Some(PathBuf::from(value(&mut args, "--tuning")?)),
                "--difficulty" => {
                    let raw = value(&mut args, "--difficulty")?;
                    opts.difficulty = Some(
                        Difficulty::from_str(&raw)
                            .ok_or_else(|| format!("unknown difficulty '{raw}'"))?,
                    );
                }
                "--manual" => opts.autopilot = false,
                "--json" => opts.json = true,
                "-h" | "--help" => return Err(USAGE.to_string()),
                other => return Err(format!("unknown argument '{other}'\n{USAGE}")),
            }
        }
        Ok(opts)
    }

    /// Tuning from file if given, falling back to defaults with a warning
    fn load_tuning(opts: &Options) -> Tuning {
        let mut tuning = match &opts.tuning {
            Some(path) => Tuning::load(path).unwrap_or_else(|e: TuningError| {
                log::warn!("{} ({}); using default tuning", e, path.display());
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        if let Some(difficulty) = opts.difficulty {
            tuning.apply_preset(difficulty);
        }
        tuning
    }

    pub fn run(opts: Options) -> Result<(), serde_json::Error> {
        let tuning = load_tuning(&opts);
        let mut session = Session::new(tuning, opts.seed);
        session.input.idle_mode = opts.autopilot;

        let frame_ms = 1000.0 / opts.fps;
        let mut frames_run = 0;
        for i in 0..opts.frames {
            let report = session.frame(f64::from(i) * frame_ms);
            frames_run = i + 1;
            if let Some(id) = report.spawned {
                log::debug!("frame {}: obstacle {} spawned", i, id);
            }
            if report.ended_run() {
                break;
            }
        }

        let snapshot = session.snapshot();
        if opts.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!(
                "seed {} | frames {} | score {} | survived {:.1}s | speed {:.2} | {}",
                opts.seed,
                frames_run,
                snapshot.score,
                snapshot.survived_ms / 1000.0,
                snapshot.speed,
                if snapshot.game_over { "game over" } else { "alive" }
            );
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Runner (native, headless) starting...");

    let opts = match headless::parse_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    if let Err(e) = headless::run(opts) {
        log::error!("Failed to write snapshot: {}", e);
        std::process::exit(1);
    }
}
