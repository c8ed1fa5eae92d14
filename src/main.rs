//! Particle Field entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_field {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

    use particle_field::pixels::{PixelSprite, PixelUpdate};
    use particle_field::render::CanvasSurface;
    use particle_field::sim::Viewport;
    use particle_field::{FrameLoop, HostError, Settings};

    const CANVAS_ID: &str = "particles";

    /// Everything the page callbacks share
    struct Background {
        app: FrameLoop,
        surface: CanvasSurface,
        /// Live pixel sprite nodes by id
        pixel_nodes: HashMap<u32, Element>,
    }

    impl Background {
        fn apply_pixels(&mut self, update: PixelUpdate) {
            for id in update.expired {
                if let Some(node) = self.pixel_nodes.remove(&id) {
                    node.remove();
                }
            }
            if let Some(sprite) = update.spawned {
                match create_pixel_node(&sprite) {
                    Ok(node) => {
                        self.pixel_nodes.insert(sprite.id, node);
                    }
                    Err(e) => log::warn!("Pixel {} not shown: {}", sprite.id, e),
                }
            }
        }
    }

    fn now_ms() -> f64 {
        js_sys::Date::now()
    }

    fn viewport_size(window: &web_sys::Window) -> Result<(f32, f32), HostError> {
        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height()?.as_f64().unwrap_or(0.0);
        Ok((width as f32, height as f32))
    }

    fn create_pixel_node(sprite: &PixelSprite) -> Result<Element, HostError> {
        let document = web_sys::window()
            .ok_or(HostError::NoWindow)?
            .document()
            .ok_or(HostError::NoDocument)?;
        let body = document.body().ok_or(HostError::NoDocument)?;

        let node: HtmlElement = document
            .create_element("div")?
            .dyn_into()
            .map_err(|_| HostError::Js("div is not an HtmlElement".to_string()))?;
        node.set_class_name("pixel");
        let style = node.style();
        style.set_property("left", &format!("{}%", sprite.left_percent))?;
        style.set_property("animation-duration", &format!("{}s", sprite.duration_secs))?;
        style.set_property("background", sprite.color)?;
        body.append_child(&node)?;
        Ok(node.into())
    }

    pub fn run() -> Result<(), HostError> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Particle Field starting...");

        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| HostError::MissingElement(CANVAS_ID.to_string()))?
            .dyn_into()
            .map_err(|_| HostError::NotACanvas(CANVAS_ID.to_string()))?;

        let (width, height) = viewport_size(&window)?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let settings = Settings::load();
        let class = settings.resolve_class(&user_agent, width);

        let start = now_ms();
        let app = FrameLoop::new(
            settings,
            class,
            Viewport::new(width, height),
            start as u64,
            start,
        );
        let background = Rc::new(RefCell::new(Background {
            app,
            surface: CanvasSurface::new(canvas)?,
            pixel_nodes: HashMap::new(),
        }));

        setup_input_handlers(&window, background.clone());
        setup_resize_handler(&window, background.clone());

        // Start animation loop
        request_animation_frame(background);

        log::info!("Particle Field running ({})", class.as_str());
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, background: Rc<RefCell<Background>>) {
        // Mouse move (ignored by the tracker on mobile-class devices)
        {
            let background = background.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                background
                    .borrow_mut()
                    .app
                    .mouse_move(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer left the window
        {
            let background = background.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                background.borrow_mut().app.mouse_out();
            });
            let _ = window
                .add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let background = background.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    background
                        .borrow_mut()
                        .app
                        .touch_start(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (jitter-filtered)
        {
            let background = background.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    background
                        .borrow_mut()
                        .app
                        .touch_move(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end (pointer clears after a grace period)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                background.borrow_mut().app.touch_end(now_ms());
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(window: &web_sys::Window, background: Rc<RefCell<Background>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            match viewport_size(&window_clone) {
                Ok((w, h)) => background.borrow_mut().app.request_resize(now_ms(), w, h),
                Err(e) => log::warn!("Viewport query failed: {}", e),
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(background: Rc<RefCell<Background>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(background);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(background: Rc<RefCell<Background>>) {
        {
            let mut bg = background.borrow_mut();
            let Background { app, surface, .. } = &mut *bg;
            let report = app.frame(now_ms(), surface);
            if let Some(fps) = report.fps {
                log::debug!("{} fps, {} particles", fps, app.field().len());
            }
            bg.apply_pixels(report.pixels);
        }

        request_animation_frame(background);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_field::run() {
        log::error!("Particle Field failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Particle Field (native) starting...");
    log::info!("Native mode runs the simulation headless - serve the wasm build for the page");

    run_headless();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate ten seconds at 60 Hz with a pointer sweeping across the page
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() {
    use particle_field::render::RecordingSurface;
    use particle_field::schedule::{FixedTicker, TickSource};
    use particle_field::sim::Viewport;
    use particle_field::{DeviceClass, FrameLoop, Settings};

    let viewport = Viewport::new(1200.0, 800.0);
    let mut app = FrameLoop::new(Settings::load(), DeviceClass::Desktop, viewport, 2024, 0.0);
    let mut surface = RecordingSurface::new();
    let mut ticker = FixedTicker::at_fps(60.0, 600);

    let (mut links, mut repelled, mut recycled, mut pixels) = (0usize, 0u32, 0u32, 0usize);
    while let Some(now) = ticker.next_tick() {
        let sweep = (now / 10_000.0) as f32;
        app.mouse_move(sweep * viewport.width, viewport.height / 2.0);
        surface.reset();
        let report = app.frame(now, &mut surface);
        links += report.draw.links;
        repelled += report.update.repelled;
        recycled += report.update.recycled;
        pixels += report.pixels.spawned.is_some() as usize;
    }

    println!(
        "{} frames, {} particles, avg {:.1} links/frame, {} repulsions, {} recycled, {} pixels",
        app.frames(),
        app.field().len(),
        links as f64 / app.frames().max(1) as f64,
        repelled,
        recycled,
        pixels
    );
}
