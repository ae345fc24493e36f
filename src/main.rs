//! Maze Ball entry point
//!
//! On the web: builds the maze for the canvas, wires the keyboard and runs
//! the game loop. Natively: prints a generated maze for inspection.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use glam::Vec2;
    use maze_ball::Settings;
    use maze_ball::consts::*;
    use maze_ball::renderer::{RenderState, scene_vertices};
    use maze_ball::sim::{Direction, GameEvent, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(state: GameState) -> Self {
            Self {
                state,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // Queued key presses apply on the first tick only
                let input = std::mem::take(&mut self.input);
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            for event in self.state.take_events() {
                match event {
                    GameEvent::Won { ticks } => {
                        log::info!("Winner after {:.1}s", ticks as f32 * SIM_DT);
                        show_winner();
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene_vertices(&self.state.world);
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
        }
    }

    /// Reveal the `.winner` banner
    fn show_winner() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.query_selector(".winner").ok().flatten() {
            let _ = el.class_list().remove_1("hidden");
        }
    }

    fn show_error(message: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("error"))
        {
            el.set_text_content(Some(message));
            let _ = el.class_list().remove_1("hidden");
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Maze Ball starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Play area in CSS pixels; a collapsed canvas is rejected by validation
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();

        let mut settings = Settings::load();
        if let Ok(query) = window.location().search() {
            if let Err(e) = settings.apply_query(&query) {
                log::warn!("Ignoring URL settings: {}", e);
            }
        }
        let settings = settings.with_viewport(client_w as f32, client_h as f32);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = match GameState::new(&settings, seed) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Invalid settings: {}", e);
                show_error(&e.to_string());
                return Err(JsValue::from_str(&e.to_string()));
            }
        };
        settings.save();
        log::info!("Game initialized with seed: {}", seed);

        // Backing store in device pixels
        let dpr = window.device_pixel_ratio();
        let width = ((client_w as f64 * dpr) as u32).max(1);
        let height = ((client_h as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(state)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let play_area = Vec2::new(settings.width, settings.height);
        let render_state = RenderState::new(surface, &adapter, width, height, play_area)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone())?;
        request_animation_frame(game);
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(dir) = Direction::from_key(&event.key()) {
                event.prevent_default();
                game.borrow_mut().input.nudges.push(dir);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use maze_ball::Settings;
    use maze_ball::sim::{MazeGeometry, generate_maze};

    env_logger::init();

    // maze-ball [rows] [cols] [seed]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut settings = Settings::default();
    if let Some(rows) = args.first() {
        settings.rows = rows.parse()?;
    }
    if let Some(cols) = args.get(1) {
        settings.cols = cols.parse()?;
    }
    let seed = match args.get(2) {
        Some(seed) => seed.parse()?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_millis() as u64,
    };
    settings.validate()?;

    let grid = generate_maze(settings.rows, settings.cols, seed)?;
    let geometry = MazeGeometry::from_settings(&grid, &settings);

    println!("{}x{} maze, seed {}", settings.rows, settings.cols, seed);
    print!("{grid}");
    println!(
        "{} walls over {}x{}, cell {:.1}x{:.1}",
        geometry.walls.len(),
        geometry.size.x,
        geometry.size.y,
        geometry.cell_size.x,
        geometry.cell_size.y
    );
    println!(
        "ball at ({:.1}, {:.1}) r={:.1}, goal at ({:.1}, {:.1})",
        geometry.ball.center.x,
        geometry.ball.center.y,
        geometry.ball.radius,
        geometry.goal.center.x,
        geometry.goal.center.y
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
