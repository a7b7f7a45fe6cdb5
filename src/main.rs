//! Breakout entry point
//!
//! Web: renders into `<canvas id="canvas">` with WebGPU and drives the
//! session from `requestAnimationFrame`.
//! Native: no window; plays one game with the autopilot and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use breakout::consts::*;
    use breakout::renderer::RenderState;
    use breakout::sim::{Game, Session, TickInput, Wait};
    use breakout::Settings;

    /// Game instance holding all state
    struct App {
        session: Session,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        /// Latest cursor x in scene units, consumed by the next tick
        cursor_x: Option<f32>,
        pending_click: bool,
    }

    impl App {
        fn new(session: Session) -> Self {
            Self {
                session,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                cursor_x: None,
                pending_click: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            if std::mem::take(&mut self.pending_click) && self.session.waiting_for().is_some() {
                self.session.click();
            }

            if self.session.waiting_for().is_some() {
                // Time spent waiting for a click doesn't accumulate
                self.accumulator = 0.0;
                return;
            }

            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = TickInput {
                    cursor_x: self.cursor_x.take(),
                };
                self.session.step(&input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                if self.session.waiting_for().is_some() {
                    self.accumulator = 0.0;
                    break;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.session.game().scene()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size();
                        log::warn!("Surface lost, reconfiguring at {}x{}", w, h);
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store at device resolution, logical size fixed by the scene
        let dpr = window.device_pixel_ratio();
        let width = (WINDOW_WIDTH as f64 * dpr) as u32;
        let height = (WINDOW_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(Session::new(Game::new(seed, &settings)))));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("window unavailable: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("window unavailable: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, (width, height), &settings)
            .await
            .map_err(|e| JsValue::from_str(&format!("window unavailable: {e}")))?;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Breakout running! Click to start.");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse move: track the cursor in scene units
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let client_w = canvas_clone.client_width().max(1) as f32;
                let x = event.offset_x() as f32 * WINDOW_WIDTH / client_w;
                app.borrow_mut().cursor_x = Some(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click: resolves whatever the session is waiting for
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().pending_click = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            let was_waiting = a.session.waiting_for();
            a.update(dt);
            a.render();

            if a.session.is_finished() {
                let summary = a.session.summary();
                log::info!(
                    "Thanks for playing: {} points, {} bricks left",
                    summary.points,
                    summary.bricks_remaining
                );
                return;
            }
            if a.session.waiting_for() != was_waiting {
                match a.session.waiting_for() {
                    Some(Wait::Respawn) => log::info!("Click to serve the next ball"),
                    Some(Wait::Exit) => log::info!("Game over - click to finish"),
                    _ => {}
                }
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use breakout::{Game, HeadlessToolkit, Session, Settings, run};

    env_logger::init();
    log::info!("Breakout (native) starting...");
    log::info!("No window on native - the autopilot plays a game. Run with `trunk serve` to play.");

    let settings = Settings::load();
    let seed: u64 = rand::random();
    let mut session = Session::new(Game::new(seed, &settings));
    // Roughly a quarter hour of play at 5 ms per tick
    let mut toolkit = HeadlessToolkit::autopilot().with_frame_limit(200_000);

    match run(&mut toolkit, &mut session) {
        Ok(summary) => {
            log::info!(
                "Final score {} ({} lives, {} bricks left, {} ticks)",
                summary.points,
                summary.lives,
                summary.bricks_remaining,
                summary.ticks
            );
            match serde_json::to_string(&summary) {
                Ok(json) => println!("{json}"),
                Err(e) => log::warn!("Could not serialize summary: {}", e),
            }
        }
        Err(e) => {
            log::error!("Breakout aborted: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
