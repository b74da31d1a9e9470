//! Tap Frenzy entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent};

    use tap_frenzy::audio::AudioManager;
    use tap_frenzy::feedback::{FeedbackKind, FeedbackSink};
    use tap_frenzy::persistence::LocalStorageStore;
    use tap_frenzy::render::{DrawCmd, DrawList, TargetSprite, build_scene, colors};
    use tap_frenzy::sim::{Layout, RoundPhase};
    use tap_frenzy::{Session, Settings, Tuning};

    // Host bindings for messenger mini-app containers; all no-ops elsewhere
    #[wasm_bindgen(inline_js = "
        function webApp() {
            return (window.Telegram && window.Telegram.WebApp) || null;
        }
        export function host_ready() {
            const tg = webApp();
            if (tg) {
                tg.ready();
                tg.expand();
                tg.enableClosingConfirmation();
            }
        }
        export function host_haptic(kind) {
            const tg = webApp();
            const h = tg && tg.HapticFeedback;
            if (!h) return;
            switch (kind) {
                case 'selection': h.selectionChanged(); break;
                case 'light': h.impactOccurred('light'); break;
                case 'medium': h.impactOccurred('medium'); break;
                case 'warning': h.notificationOccurred('warning'); break;
            }
        }
        export function host_popup(title, message) {
            const tg = webApp();
            if (tg && tg.showPopup) {
                tg.showPopup({ title, message, buttons: [{ type: 'ok' }] });
            }
        }
    ")]
    extern "C" {
        fn host_ready();
        fn host_haptic(kind: &str);
        fn host_popup(title: &str, message: &str);
    }

    /// Audio plus haptics, each gated by its own toggle
    struct HostFeedback {
        audio: AudioManager,
        haptics: bool,
    }

    impl HostFeedback {
        fn apply(&mut self, settings: &Settings) {
            self.audio.set_volume(settings.effective_volume());
            self.haptics = settings.haptics;
        }
    }

    impl FeedbackSink for HostFeedback {
        fn notify(&mut self, kind: FeedbackKind) {
            self.audio.notify(kind);
            if self.haptics {
                if let Some(h) = kind.haptic() {
                    host_haptic(h.as_str());
                }
            }
        }
    }

    type GameSession = Session<LocalStorageStore, HostFeedback>;

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        ctx: CanvasRenderingContext2d,
        canvas: HtmlCanvasElement,
        last_time: f64,
        looping: bool,
    }

    impl Game {
        /// Match the canvas backing store to its CSS size
        fn resize(&mut self) {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0)
                .floor()
                .max(1.0);
            let w = (self.canvas.client_width() as f64 * dpr) as u32;
            let h = (self.canvas.client_height() as f64 * dpr) as u32;
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.session
                .resize(Layout::new(w as f32, h as f32, dpr as f32));
        }

        fn render(&self) {
            let list = build_scene(
                self.session.state(),
                self.session.settings(),
                self.session.best(),
            );
            draw(&self.ctx, &list);
            update_hud(&list);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Tap Frenzy starting...");
        host_ready();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("c")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let mut feedback = HostFeedback {
            audio: AudioManager::new(),
            haptics: true,
        };
        feedback.apply(&settings);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            seed,
            Tuning::default(),
            Layout::default(),
            settings,
            LocalStorageStore::default(),
            feedback,
        );

        let game = Rc::new(RefCell::new(Game {
            session,
            ctx,
            canvas: canvas.clone(),
            last_time: 0.0,
            looping: false,
        }));
        {
            let mut g = game.borrow_mut();
            g.resize();
            g.render();
        }
        update_toggle_labels(game.borrow().session.settings());

        setup_resize(game.clone());
        setup_pointer(&canvas, game.clone());
        setup_buttons(game.clone());

        log::info!("Tap Frenzy ready (seed {seed})");
        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.resize();
            g.render();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let _ = canvas_clone.set_pointer_capture(event.pointer_id());
            let rect = canvas_clone.get_bounding_client_rect();
            let mut g = game.borrow_mut();
            let resolved = g.session.pointer_down(
                Vec2::new(event.client_x() as f32, event.client_y() as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
            );
            if let Some(resolved) = resolved {
                log::debug!("Tap resolved: {resolved:?}");
            }
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let start_loop = {
                    let mut g = game.borrow_mut();
                    g.session.feedback_mut().audio.resume();
                    g.session.start();
                    g.last_time = 0.0;
                    !std::mem::replace(&mut g.looping, true)
                };
                if start_loop {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("sound") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let mut settings = g.session.settings().clone();
                if settings.toggle_sound() {
                    g.session.feedback_mut().audio.resume();
                }
                apply_settings(&mut g.session, settings);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("haptic") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let mut settings = g.session.settings().clone();
                if settings.toggle_haptics() {
                    host_haptic("selection");
                }
                apply_settings(&mut g.session, settings);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn apply_settings(session: &mut GameSession, settings: Settings) {
        settings.save();
        session.feedback_mut().apply(&settings);
        update_toggle_labels(&settings);
        session.set_settings(settings);
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
        let keep_going = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 { time - g.last_time } else { 0.0 };
            g.last_time = time;

            g.session.frame(dt);
            g.render();

            if g.session.phase() == RoundPhase::Ended {
                g.looping = false;
                if let Some(summary) = g.session.summary() {
                    host_popup(
                        "Game over",
                        &format!("Score: {}\nBest: {}", summary.score, summary.best),
                    );
                }
                false
            } else {
                true
            }
        };

        if keep_going {
            request_animation_frame(game);
        }
    }

    fn update_hud(list: &DrawList) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let set = |id: &str, text: String| {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(&text));
            }
        };
        set("time", list.hud.seconds_left.to_string());
        set("score", list.hud.score.to_string());
        set("mult", format!("x{}", list.hud.multiplier));
        set("best", format!("BEST: {}", list.hud.best));
    }

    fn update_toggle_labels(settings: &Settings) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let on_off = |b: bool| if b { "ON" } else { "OFF" };
        if let Some(el) = document.get_element_by_id("sound") {
            el.set_text_content(Some(&format!("Sound: {}", on_off(settings.sound))));
        }
        if let Some(el) = document.get_element_by_id("haptic") {
            el.set_text_content(Some(&format!("Haptics: {}", on_off(settings.haptics))));
        }
    }

    /// Execute a draw list on a 2D canvas
    fn draw(ctx: &CanvasRenderingContext2d, list: &DrawList) {
        use std::f64::consts::TAU;

        ctx.set_fill_style_str(&colors::css(colors::BACKGROUND, 1.0));
        ctx.fill_rect(0.0, 0.0, list.width as f64, list.height as f64);

        for cmd in &list.commands {
            ctx.save();
            match cmd {
                DrawCmd::Vignette {
                    inner_center,
                    inner_radius,
                    outer_center,
                    outer_radius,
                    edge_alpha,
                } => {
                    if let Ok(g) = ctx.create_radial_gradient(
                        inner_center.x as f64,
                        inner_center.y as f64,
                        *inner_radius as f64,
                        outer_center.x as f64,
                        outer_center.y as f64,
                        *outer_radius as f64,
                    ) {
                        let _ = g.add_color_stop(0.0, "rgba(0,0,0,0)");
                        let _ = g.add_color_stop(1.0, &format!("rgba(0,0,0,{edge_alpha})"));
                        ctx.set_fill_style_canvas_gradient(&g);
                        ctx.fill_rect(0.0, 0.0, list.width as f64, list.height as f64);
                    }
                }
                DrawCmd::Frame {
                    rect,
                    line_width,
                    alpha,
                } => {
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_line_width(*line_width as f64);
                    ctx.set_stroke_style_str(&colors::css(colors::FRAME, 1.0));
                    ctx.stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                }
                DrawCmd::Hole { rect } => {
                    let c = rect.center();
                    ctx.begin_path();
                    let _ = ctx.ellipse(
                        c.x as f64,
                        c.y as f64,
                        (rect.w * 0.5) as f64,
                        (rect.h * 0.22) as f64,
                        0.0,
                        0.0,
                        TAU,
                    );
                    ctx.set_fill_style_str(&colors::css(colors::HOLE, 1.0));
                    ctx.fill();
                    ctx.set_line_width(3.0);
                    ctx.set_stroke_style_str(&colors::css(colors::HOLE_RIM, 1.0));
                    ctx.stroke();
                }
                DrawCmd::Target {
                    sprite,
                    rect,
                    shadow,
                    glow,
                } => {
                    if let Some(s) = shadow {
                        ctx.save();
                        ctx.set_global_alpha(s.alpha as f64);
                        ctx.set_filter(&format!("blur({}px)", s.blur));
                        ctx.set_fill_style_str("rgba(0,0,0,1)");
                        ctx.fill_rect(
                            s.rect.x as f64,
                            s.rect.y as f64,
                            s.rect.w as f64,
                            s.rect.h as f64,
                        );
                        ctx.restore();
                    }
                    let color = match sprite {
                        TargetSprite::Primary => colors::TARGET_PRIMARY,
                        TargetSprite::Bonus => colors::TARGET_BONUS,
                    };
                    if *glow > 0.0 {
                        ctx.set_shadow_color(&colors::css(colors::BONUS_GLOW, 1.0));
                        ctx.set_shadow_blur(*glow as f64);
                    }
                    ctx.set_fill_style_str(&colors::css(color, 1.0));
                    ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                }
                DrawCmd::HitFlash { rect, alpha } => {
                    let c = rect.center();
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.begin_path();
                    let _ = ctx.arc(c.x as f64, c.y as f64, (rect.w * 0.5) as f64, 0.0, TAU);
                    ctx.set_fill_style_str(&colors::css(colors::HIT_FLASH, 1.0));
                    ctx.fill();
                }
                DrawCmd::Particle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    ctx.set_fill_style_str(&colors::css(*color, 1.0));
                    ctx.fill();
                }
            }
            ctx.restore();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tap_frenzy::feedback::LogFeedback;
    use tap_frenzy::persistence::JsonFileStore;
    use tap_frenzy::sim::{Autoplay, Layout};
    use tap_frenzy::{Session, Settings, Tuning};

    env_logger::init();
    log::info!("Tap Frenzy (native) starting...");
    log::info!("Native mode runs a headless autoplay round; build for wasm32 to play in a browser");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let tuning = match std::fs::read_to_string("tuning.json") {
        Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning.json: {e}");
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };

    let mut session = Session::new(
        seed,
        tuning,
        Layout::new(720.0, 1280.0, 1.0),
        Settings::load(),
        JsonFileStore::new("tap_frenzy_best.json"),
        LogFeedback,
    );

    let bot = Autoplay::default();
    session.start();
    while session.state().is_running() {
        for point in bot.taps(session.state()) {
            session.tap(point);
        }
        session.frame(tap_frenzy::consts::SIM_DT_MS);
    }

    if let Some(summary) = session.summary() {
        println!(
            "Round over: score {} (best {}){}",
            summary.score,
            summary.best,
            if summary.new_best { " - new best!" } else { "" }
        );
    }
    match serde_json::to_string(&session.state().snapshot()) {
        Ok(json) => log::debug!("Final snapshot: {json}"),
        Err(e) => log::warn!("Could not encode snapshot: {e}"),
    }
}
