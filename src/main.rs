//! Egg Herder entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use egg_herder::Settings;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use egg_herder::Settings;
    use egg_herder::platform::Driver;
    use egg_herder::renderer::CanvasSurface;

    const CANVAS_ID: &str = "background-canvas";

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        surface: CanvasSurface,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Egg Herder starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::load();
        canvas.set_width(settings.width as u32);
        canvas.set_height(settings.height as u32);

        let surface = CanvasSurface::new(&canvas, &document)?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            driver: Driver::new(settings, seed),
            surface,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Egg Herder running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Mouse down - start steering
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .driver
                    .pointer_down(event.offset_x() as f32, event.offset_y() as f32);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse up - final target
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .driver
                    .pointer_up(event.offset_x() as f32, event.offset_y() as f32);
            });
            canvas.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move - only tracked while pressed
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .driver
                    .pointer_move(event.offset_x() as f32, event.offset_y() as f32);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().driver.key_down(&event.key());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let Game { driver, surface } = &mut *g;
            driver.frame(time, surface);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    log::info!("Egg Herder (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let summary = headless_run(Settings::load(), 42, 3_000);
    println!(
        "Headless run: {} frames drawn, score {}, lost {}",
        summary.frames, summary.score, summary.lost
    );
}

#[cfg(not(target_arch = "wasm32"))]
struct Summary {
    frames: u32,
    score: u32,
    lost: u32,
}

/// Drive the bull around a loop near the safe zone for `callbacks` animation
/// callbacks at a steady 60 Hz, drawing into a throwaway list
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(settings: Settings, seed: u64, callbacks: u32) -> Summary {
    use egg_herder::platform::Driver;
    use egg_herder::renderer::DrawList;

    let (w, h) = (settings.width, settings.height);
    let mut driver = Driver::new(settings, seed);
    let mut list = DrawList::new();
    let mut frames = 0;

    for i in 0..callbacks {
        let t = i as f32 * 0.01;
        let x = w * 0.5 + t.cos() * w * 0.35;
        let y = h * 0.55 + t.sin() * h * 0.3;
        if i == 0 {
            driver.pointer_down(x, y);
        } else {
            driver.pointer_move(x, y);
        }

        list.clear();
        if driver.frame(i as f64 * 1000.0 / 60.0, &mut list) {
            frames += 1;
        }
    }

    log::info!(
        "Final: score {}, lost {}, {} eggs waiting",
        driver.state.score,
        driver.state.lost_hatchlings,
        driver.state.eggs.len()
    );

    Summary {
        frames,
        score: driver.state.score,
        lost: driver.state.lost_hatchlings,
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
