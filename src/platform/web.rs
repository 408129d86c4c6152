//! Browser session: input listeners, the animation-frame loop and the DOM HUD
//!
//! A [`Session`] owns every listener and the pending frame callback. Dropping
//! it detaches the listeners and cancels the frame, which is all a teardown
//! needs since a tick never runs partially.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Window,
};

use super::game::Game;
use crate::Tuning;
use crate::hud::Hud;
use crate::renderer::{RenderState, build_vertices};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

/// State touched from both the frame loop and input handlers
struct Shared {
    game: Game,
    render_state: Option<RenderState>,
    canvas: HtmlCanvasElement,
    document: Document,
    /// Handle of the scheduled animation frame, if any
    frame_handle: Option<i32>,
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

/// One running game in the page
pub struct Session {
    window: Window,
    shared: Rc<RefCell<Shared>>,
    listeners: Vec<Listener>,
    frame_callback: FrameCallback,
}

impl Session {
    fn start(
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        game: Game,
        render_state: Option<RenderState>,
    ) -> Self {
        let shared = Rc::new(RefCell::new(Shared {
            game,
            render_state,
            canvas,
            document: document.clone(),
            frame_handle: None,
        }));

        let mut session = Self {
            window,
            shared,
            listeners: Vec::new(),
            frame_callback: Rc::new(RefCell::new(None)),
        };
        session.attach_input();
        session.attach_restart(&document);
        session.start_loop();
        session
    }

    /// Register a listener that lives exactly as long as the session
    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to attach {} listener: {:?}", kind, e);
            return;
        }
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
    }

    fn attach_input(&mut self) {
        let window = self.window.clone();

        // Keyboard
        {
            let shared = self.shared.clone();
            self.listen(&window, "keydown", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    shared.borrow_mut().game.key_down(&event.key());
                }
            });
        }
        {
            let shared = self.shared.clone();
            self.listen(&window, "keyup", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    shared.borrow_mut().game.key_up(&event.key());
                }
            });
        }

        // Keys released while unfocused never send keyup
        {
            let shared = self.shared.clone();
            self.listen(&window, "blur", move |_event| {
                shared.borrow_mut().game.state.input.release_all();
            });
        }

        // Mouse click - fire toward the cursor
        {
            let shared = self.shared.clone();
            self.listen(&window, "click", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    shared
                        .borrow_mut()
                        .game
                        .click(event.client_x() as f32, event.client_y() as f32);
                }
            });
        }

        // Resize - playfield follows the window
        {
            let shared = self.shared.clone();
            let window_clone = window.clone();
            self.listen(&window, "resize", move |_event| {
                let mut guard = shared.borrow_mut();
                let s = &mut *guard;
                let (viewport, width, height) = size_canvas(&window_clone, &s.canvas);
                s.game.resize(viewport.x, viewport.y);
                if let Some(render_state) = s.render_state.as_mut() {
                    render_state.resize(width, height, viewport);
                }
            });
        }
    }

    /// Restart is a full reload: fresh state, fresh listeners
    fn attach_restart(&mut self, document: &Document) {
        let Some(button) = document.get_element_by_id("restart-btn") else {
            log::warn!("No #restart-btn element; restart unavailable");
            return;
        };
        let window = self.window.clone();
        self.listen(&button, "click", move |_event| {
            log::info!("Restarting...");
            if let Err(e) = window.location().reload() {
                log::error!("Reload failed: {:?}", e);
            }
        });
    }

    fn start_loop(&mut self) {
        let shared = self.shared.clone();
        let callback = self.frame_callback.clone();
        let window = self.window.clone();

        *self.frame_callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(
            move |_time: f64| {
                let keep_going = run_frame(&mut shared.borrow_mut());
                let handle = if keep_going {
                    request_frame(&window, &callback)
                } else {
                    log::info!("Game over; frame loop stopped");
                    None
                };
                shared.borrow_mut().frame_handle = handle;
            },
        ));

        let handle = request_frame(&self.window, &self.frame_callback);
        self.shared.borrow_mut().frame_handle = handle;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(handle) = self.shared.borrow_mut().frame_handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        // Breaks the callback's reference to itself
        self.frame_callback.borrow_mut().take();

        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
        log::info!("Session torn down");
    }
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Option<i32> {
    let callback = callback.borrow();
    let closure = callback.as_ref()?;
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

/// Tick, draw and mirror the HUD. Returns whether to schedule another frame.
fn run_frame(s: &mut Shared) -> bool {
    let keep_going = s.game.step();

    if let Some(render_state) = s.render_state.as_mut() {
        let vertices = build_vertices(&s.game.frame.sprites);
        match render_state.render(&vertices) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    if let Some(hud) = s.game.take_hud_update() {
        paint_hud(&s.document, &hud);
    }
    keep_going
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Update HUD elements in DOM
fn paint_hud(document: &Document, hud: &Hud) {
    set_text(document, "hud-score", &hud.score.to_string());
    set_text(document, "hud-wave", &hud.wave.to_string());

    if let Some(fill) = document
        .get_element_by_id("health-fill")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let width = format!("{}%", hud.health_percent());
        let _ = fill.style().set_property("width", &width);
    }

    if let Some(el) = document.get_element_by_id("game-over") {
        let _ = el.class_list().toggle_with_force("show", hud.game_over);
    }
    if hud.game_over {
        set_text(document, "final-score", &hud.score.to_string());
        set_text(document, "final-wave", &hud.wave.to_string());
    }
}

/// Window size in CSS pixels
fn viewport_size(window: &Window) -> Vec2 {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Vec2::new(width as f32, height as f32)
}

/// Match the canvas backing store to the window; returns (viewport, physical w, physical h)
fn size_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
    let viewport = viewport_size(window);
    let dpr = window.device_pixel_ratio();
    let width = (viewport.x as f64 * dpr) as u32;
    let height = (viewport.y as f64 * dpr) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (viewport, width, height)
}

async fn init_renderer(
    canvas: &HtmlCanvasElement,
    width: u32,
    height: u32,
    viewport: Vec2,
) -> Option<RenderState> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        ..Default::default()
    });

    let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
        Ok(surface) => surface,
        Err(e) => {
            log::error!("Failed to create surface: {}", e);
            return None;
        }
    };

    let adapter = match instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
    {
        Ok(adapter) => adapter,
        Err(e) => {
            log::error!("Failed to get adapter: {}", e);
            return None;
        }
    };
    log::info!("Using adapter: {:?}", adapter.get_info().name);

    match RenderState::new(surface, &adapter, width, height, viewport).await {
        Ok(render_state) => Some(render_state),
        Err(e) => {
            log::error!("Failed to create device: {}", e);
            None
        }
    }
}

/// Mount the game into the page
pub async fn run() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
    }
    log::info!("Beast Arena starting...");

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        log::error!("No document");
        return;
    };
    let Some(canvas) = document
        .get_element_by_id("canvas")
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        log::error!("No #canvas element");
        return;
    };

    let (viewport, width, height) = size_canvas(&window, &canvas);
    let render_state = init_renderer(&canvas, width, height, viewport).await;
    if render_state.is_none() {
        log::warn!("WebGPU unavailable; running with HUD only");
    }

    let seed = js_sys::Date::now() as u64;
    let game = Game::new(seed, viewport, Tuning::load());
    let session = Session::start(window.clone(), document, canvas, game, render_state);
    SESSION.with(|s| *s.borrow_mut() = Some(session));

    // Unmount: drop the session when the page goes away
    let teardown = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let session = SESSION.with(|s| s.borrow_mut().take());
        drop(session);
    });
    let _ = window.add_event_listener_with_callback("pagehide", teardown.as_ref().unchecked_ref());
    teardown.forget();

    log::info!("Beast Arena running!");
}
