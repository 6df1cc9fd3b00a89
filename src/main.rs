//! Apple Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use apple_drop::consts::FIELD_WIDTH;
    use apple_drop::persistence::{LocalStorage, MemoryStorage, Storage};
    use apple_drop::platform::assets::load_sprites;
    use apple_drop::platform::input::client_to_field_x;
    use apple_drop::platform::{InputState, KeyAction};
    use apple_drop::renderer::CanvasRenderer;
    use apple_drop::ui::DomHud;
    use apple_drop::Game;

    /// Everything the event handlers and the frame loop share
    struct App {
        game: Game<Box<dyn Storage>, DomHud>,
        input: InputState,
        renderer: CanvasRenderer,
    }

    impl App {
        fn frame(&mut self, now: f64) {
            let window_ms = self.game.tuning().pointer_active_ms;
            let input = self.input.tick_input(now, window_ms);
            self.game.frame(&input, &mut self.renderer);
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn open_storage() -> Box<dyn Storage> {
        match LocalStorage::new() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}; records will not survive a reload", e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    fn focus_canvas(canvas: &HtmlCanvasElement) {
        let _ = canvas.focus();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Apple Drop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_tab_index(0);

        let ctx: web_sys::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let storage = open_storage();
        let hud = DomHud::new(&document);
        let seed = js_sys::Date::now() as u64;
        let game = Game::from_storage(seed, storage, hud);
        log::info!("Game initialized with seed: {}", seed);

        // Missing sprites are simply not drawn
        let sprites = load_sprites().await;
        if sprites.is_empty() {
            log::warn!("No sprites loaded; only the ground will be drawn");
        }

        let app = Rc::new(RefCell::new(App {
            game,
            input: InputState::default(),
            renderer: CanvasRenderer::new(ctx, sprites),
        }));

        {
            let mut a = app.borrow_mut();
            a.game.show_start();
            a.game.reset();
        }

        setup_input_handlers(&canvas, app.clone());
        setup_buttons(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Apple Drop running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer enters the field
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().input.pointer.enter();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer leaves: stop following and stop sliding
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.input.pointer.leave();
                a.game.pointer_left();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer moves: scale client coordinates to the field
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = client_to_field_x(
                    event.client_x() as f64,
                    rect.left(),
                    rect.width(),
                    FIELD_WIDTH,
                );
                app.borrow_mut().input.pointer.moved(x, now_ms());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down jumps
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                app.borrow_mut().game.jump();
                focus_canvas(&canvas_clone);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start jumps
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.jump();
                focus_canvas(&canvas_clone);
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Keyboard
        let document = web_sys::window().unwrap().document().unwrap();
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                }
                let mut a = app.borrow_mut();
                if a.input.key(&event.key(), true) == Some(KeyAction::Jump) {
                    a.game.jump();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                }
                app.borrow_mut().input.key(&event.key(), false);
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        let on_click = |id: &str, action: Box<dyn Fn(&mut App)>| {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                return;
            };
            let app = app.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                if let Some(target) = event
                    .current_target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                {
                    let _ = target.blur();
                }
                action(&mut *app.borrow_mut());
                focus_canvas(&canvas);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        };

        on_click(
            "startBtn",
            Box::new(|a: &mut App| {
                a.game.start_drop();
            }),
        );
        on_click(
            "playAgain",
            Box::new(|a: &mut App| {
                a.game.play_again();
            }),
        );
        on_click(
            "pauseBtn",
            Box::new(|a: &mut App| {
                a.game.toggle_pause();
            }),
        );
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame(now_ms());
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use apple_drop::persistence::MemoryStorage;
    use apple_drop::renderer::NullRenderer;
    use apple_drop::sim::autopilot;
    use apple_drop::sim::GamePhase;
    use apple_drop::ui::LogHud;
    use apple_drop::{Game, Tuning};

    /// Ten minutes of run time at 30 frames per in-game second
    const MAX_FRAMES: u32 = 30 * 600;

    env_logger::init();
    log::info!("Apple Drop (native) starting...");
    log::info!("Native mode runs a headless autopilot session; use `trunk serve` to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = Game::new(seed, tuning, MemoryStorage::new(), LogHud);
    let mut renderer = NullRenderer::default();
    game.start_drop();

    for _ in 0..MAX_FRAMES {
        let decision = autopilot::decide(game.state());
        if decision.jump {
            game.jump();
        }
        game.frame(&decision.input, &mut renderer);
        if game.state().phase == GamePhase::Over {
            break;
        }
    }

    let state = game.state();
    println!(
        "seed {}: survived {}s, {} apples, {} lives left ({} frames)",
        state.seed, state.seconds, state.apples_collected, state.lives, renderer.frames_drawn
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
