//! Galactic Defender entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Event, EventTarget, HtmlCanvasElement, KeyboardEvent};

    use galactic_defender::audio::AudioManager;
    use galactic_defender::platform::{InputSource, KeyAction, LogicalKey, key_action};
    use galactic_defender::renderer::{RenderState, build_scene};
    use galactic_defender::sim::{GamePhase, SessionListener};
    use galactic_defender::{Engine, Settings, Tuning, format_score};

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    /// Mirrors session events into the DOM HUD as they happen
    struct HudListener {
        document: Document,
    }

    impl SessionListener for HudListener {
        fn score_changed(&mut self, score: u64) {
            set_text(&self.document, "#hud-score .hud-value", &format_score(score));
        }

        fn lives_changed(&mut self, lives: u8) {
            set_text(&self.document, "#hud-lives .hud-value", &lives.to_string());
        }

        fn wave_changed(&mut self, wave: u32) {
            set_text(&self.document, "#hud-wave .hud-value", &wave.to_string());
        }

        fn game_over(&mut self, final_score: u64) {
            set_text(&self.document, "#final-score", &format_score(final_score));
        }
    }

    type GameEngine = Engine<AudioManager, HudListener>;

    /// Game instance holding all state
    struct Game {
        engine: GameEngine,
        settings: Settings,
        render_state: Option<RenderState>,
        document: Document,
        last_phase: Option<GamePhase>,
    }

    impl Game {
        fn start(&mut self) {
            if matches!(self.engine.phase(), GamePhase::Playing | GamePhase::Paused) {
                return;
            }
            // First user gesture: audio may start now
            self.engine.audio_mut().init();
            self.engine.start();
        }

        /// Flip mute and remember it
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.engine.audio_mut().apply_settings(&self.settings);
            self.settings.save();
        }

        fn frame(&mut self, time: f64) {
            self.engine.frame(time);
            self.render();
            self.sync_overlays();
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(self.engine.state(), &self.settings);
            match render_state.render(&vertices) {
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

        /// Show the overlay for the current phase
        fn sync_overlays(&mut self) {
            if self.settings.show_fps {
                set_text(
                    &self.document,
                    "#hud-fps .hud-value",
                    &self.engine.fps().to_string(),
                );
            }

            let phase = self.engine.phase();
            if self.last_phase == Some(phase) {
                return;
            }
            self.last_phase = Some(phase);

            let doc = &self.document;
            set_visible(doc, "menu", phase == GamePhase::Menu);
            set_visible(doc, "hud", phase != GamePhase::Menu);
            set_visible(doc, "pause-menu", phase == GamePhase::Paused);
            set_visible(doc, "game-over", phase == GamePhase::GameOver);
            if phase == GamePhase::GameOver {
                set_text(doc, "#final-wave", &self.engine.state().wave.to_string());
            }
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let (width, height) = canvas_pixel_size(canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
        }
    }

    fn canvas_pixel_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    /// Event listeners attached by the game; detached together on teardown
    #[derive(Default)]
    struct Listeners {
        entries: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
    }

    impl Listeners {
        fn add(
            &mut self,
            target: &EventTarget,
            event: &'static str,
            handler: impl FnMut(Event) + 'static,
        ) {
            let closure = Closure::<dyn FnMut(Event)>::new(handler);
            if let Err(e) =
                target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to attach {} listener: {:?}", event, e);
                return;
            }
            self.entries.push((target.clone(), event, closure));
        }

        fn detach(&self) {
            for (target, event, closure) in &self.entries {
                let _ = target
                    .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            }
            log::info!("Detached {} listeners", self.entries.len());
        }
    }

    /// Everything that must be undone when the page goes away
    struct App {
        game: Rc<RefCell<Game>>,
        listeners: RefCell<Listeners>,
        raf_closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
        raf_handle: Cell<Option<i32>>,
        running: Cell<bool>,
    }

    thread_local! {
        static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
    }

    impl App {
        fn request_frame(&self) {
            let Some(window) = web_sys::window() else { return };
            if let Some(callback) = self.raf_closure.borrow().as_ref() {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(handle) => self.raf_handle.set(Some(handle)),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }

        /// Stop the loop and release input handlers
        fn teardown(&self) {
            if !self.running.replace(false) {
                return;
            }
            if let (Some(window), Some(handle)) = (web_sys::window(), self.raf_handle.take()) {
                let _ = window.cancel_animation_frame(handle);
            }
            self.listeners.borrow().detach();
            log::info!("Galactic Defender stopped");
        }
    }

    fn start_loop(app: &Rc<App>) {
        let weak = Rc::downgrade(app);
        let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            let Some(app) = weak.upgrade() else { return };
            if !app.running.get() {
                return;
            }
            app.game.borrow_mut().frame(time);
            app.request_frame();
        });
        *app.raf_closure.borrow_mut() = Some(closure);
        app.request_frame();
    }

    /// Balance overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Galactic Defender starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        // Hide loading indicator
        set_visible(&document, "loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()
            .map_err(|_| js_err("#canvas is not a canvas"))?;

        let (width, height) = canvas_pixel_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;

        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);
        let listener = HudListener {
            document: document.clone(),
        };
        let engine = Engine::new(seed, tuning, &settings, audio, listener);
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = match RenderState::new(surface, &adapter, width, height).await {
            Ok(rs) => Some(rs),
            Err(e) => {
                log::error!("No rendering available: {}", e);
                None
            }
        };

        set_visible(&document, "touch-controls", settings.touch_controls);
        set_visible(&document, "hud-fps", settings.show_fps);

        let game = Rc::new(RefCell::new(Game {
            engine,
            settings,
            render_state,
            document: document.clone(),
            last_phase: None,
        }));

        let app = Rc::new(App {
            game: game.clone(),
            listeners: RefCell::new(Listeners::default()),
            raf_closure: RefCell::new(None),
            raf_handle: Cell::new(None),
            running: Cell::new(true),
        });

        {
            let mut listeners = app.listeners.borrow_mut();
            setup_keyboard(&mut listeners, &window, &game);
            setup_touch_controls(&mut listeners, &document, &game);
            setup_buttons(&mut listeners, &document, &game);
            setup_auto_pause(&mut listeners, &window, &document, &game);
            setup_resize(&mut listeners, &window, &canvas, &game);
        }

        // Teardown when the page is unloaded or frozen
        {
            let weak = Rc::downgrade(&app);
            app.listeners.borrow_mut().add(&window, "pagehide", move |_| {
                if let Some(app) = weak.upgrade() {
                    app.teardown();
                }
            });
        }

        start_loop(&app);
        APP.with(|slot| *slot.borrow_mut() = Some(app));

        log::info!("Galactic Defender running!");
        Ok(())
    }

    fn setup_keyboard(listeners: &mut Listeners, window: &web_sys::Window, game: &Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            listeners.add(window, "keydown", move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(action) = key_action(&event.key()) else {
                    return;
                };
                // Arrows and space would scroll the page
                event.prevent_default();
                if event.repeat() && !action.accepts_repeat() {
                    return;
                }

                let mut g = game.borrow_mut();
                g.engine.audio_mut().init();
                match action {
                    KeyAction::Hold(key) => g
                        .engine
                        .input_mut()
                        .press(InputSource::Keyboard, key),
                    KeyAction::Pause => g.engine.toggle_pause(),
                    KeyAction::ToggleAutopilot => g.engine.toggle_autopilot(),
                    KeyAction::ToggleMute => g.toggle_mute(),
                    KeyAction::Start => g.start(),
                }
            });
        }

        {
            let game = game.clone();
            listeners.add(window, "keyup", move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if let Some(KeyAction::Hold(key)) = key_action(&event.key()) {
                    game.borrow_mut()
                        .engine
                        .input_mut()
                        .release(InputSource::Keyboard, key);
                }
            });
        }
    }

    /// On-screen buttons carrying a `data-key` attribute
    fn setup_touch_controls(
        listeners: &mut Listeners,
        document: &Document,
        game: &Rc<RefCell<Game>>,
    ) {
        let Ok(buttons) = document.query_selector_all("[data-key]") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(key) = button
                .get_attribute("data-key")
                .and_then(|name| LogicalKey::from_name(&name))
            else {
                continue;
            };

            {
                let game = game.clone();
                listeners.add(&button, "pointerdown", move |event: Event| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.engine.audio_mut().init();
                    g.engine.input_mut().press(InputSource::Virtual, key);
                });
            }
            for release in ["pointerup", "pointerleave", "pointercancel"] {
                let game = game.clone();
                listeners.add(&button, release, move |_| {
                    game.borrow_mut()
                        .engine
                        .input_mut()
                        .release(InputSource::Virtual, key);
                });
            }
        }
    }

    fn setup_buttons(listeners: &mut Listeners, document: &Document, game: &Rc<RefCell<Game>>) {
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                listeners.add(&btn, "click", move |_| game.borrow_mut().start());
            }
        }

        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let game = game.clone();
            listeners.add(&btn, "click", move |_| {
                let mut g = game.borrow_mut();
                if g.engine.phase() == GamePhase::Paused {
                    g.engine.toggle_pause();
                }
            });
        }
    }

    fn setup_auto_pause(
        listeners: &mut Listeners,
        window: &web_sys::Window,
        document: &Document,
        game: &Rc<RefCell<Game>>,
    ) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            listeners.add(document, "visibilitychange", move |_| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.engine.input_mut().release_all();
                    g.engine.audio_mut().suspend();
                    if g.engine.auto_pause() {
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            listeners.add(window, "blur", move |_| {
                let mut g = game.borrow_mut();
                g.engine.input_mut().release_all();
                if g.settings.pause_on_blur && g.engine.auto_pause() {
                    log::info!("Auto-paused (window blur)");
                }
            });
        }
    }

    fn setup_resize(
        listeners: &mut Listeners,
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) {
        let game = game.clone();
        let canvas = canvas.clone();
        listeners.add(window, "resize", move |_| {
            game.borrow_mut().resize(&canvas);
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Galactic Defender failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use galactic_defender::sim::{GamePhase, NullAudio, SessionListener};
    use galactic_defender::{Engine, Settings, Tuning};

    /// Simulated seconds before a demo run is cut off
    const MAX_RUN_SECS: f32 = 600.0;
    const STEP: f32 = 1.0 / 60.0;

    /// Reports session events through the log
    #[derive(Default)]
    struct LogListener {
        final_score: Option<u64>,
    }

    impl SessionListener for LogListener {
        fn score_changed(&mut self, score: u64) {
            log::debug!("Score: {}", score);
        }

        fn lives_changed(&mut self, lives: u8) {
            log::info!("Lives: {}", lives);
        }

        fn wave_changed(&mut self, wave: u32) {
            log::info!("Wave {}", wave);
        }

        fn game_over(&mut self, final_score: u64) {
            self.final_score = Some(final_score);
        }
    }

    /// Autopilot demo run. Args: `[tuning.json] [seed]`
    pub fn run() -> Result<(), galactic_defender::ConfigError> {
        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::from_path(&path)?
            }
            None => Tuning::default(),
        };
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

        let mut engine = Engine::new(
            seed,
            tuning,
            &Settings::default(),
            NullAudio,
            LogListener::default(),
        );
        engine.set_autopilot(true);
        engine.start();

        let mut elapsed = 0.0;
        while engine.phase() != GamePhase::GameOver && elapsed < MAX_RUN_SECS {
            engine.step(STEP);
            elapsed += STEP;
        }

        let state = engine.state();
        match engine.listener().final_score {
            Some(score) => log::info!(
                "Demo over after {:.0}s: score {} on wave {}",
                elapsed,
                score,
                state.wave
            ),
            None => log::info!(
                "Demo stopped after {:.0}s: score {} on wave {}, {} lives left",
                elapsed,
                state.score,
                state.wave,
                state.lives
            ),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Galactic Defender (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
