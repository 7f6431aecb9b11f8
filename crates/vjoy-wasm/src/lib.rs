//! WASM bridge for vjoy — exposes the joystick to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host creates the
//! `<canvas>`, hands it to `new JoyStick(canvas, "default")`, and calls
//! `frame()` from its own `requestAnimationFrame` loop.

mod input;
mod listeners;
mod logger;
mod render2d;

use listeners::Subscription;
use render2d::Canvas2dSurface;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use vjoy_core::{
    ConfigError, Direction, InputModality, Joystick, JoystickEvent, Placement, Point,
    PointerSample, StyleOptions, UnknownKeyPolicy,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement};

/// The WASM-facing joystick.
///
/// Listeners are attached to the window at construction and removed when
/// the object is freed or `detach()` is called.
#[wasm_bindgen]
pub struct JoyStick {
    widget: Rc<RefCell<Widget>>,
    callbacks: Rc<RefCell<JsCallbacks>>,
    ctx: CanvasRenderingContext2d,
    modality: InputModality,
    subscriptions: RefCell<Vec<Subscription>>,
}

#[wasm_bindgen]
impl JoyStick {
    /// Create a joystick drawing on `canvas`.
    ///
    /// `modality` is `"mouse"`, `"touch"`, or `"default"` (touch when the
    /// window supports it). Anything else throws.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, modality: Option<String>) -> Result<JoyStick, JsValue> {
        console_error_panic_hook_setup();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let requested: InputModality = modality
            .as_deref()
            .unwrap_or("default")
            .parse()
            .map_err(config_error)?;
        let touch_supported = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart"))?;
        let modality = requested.resolve(touch_supported);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let widget = Rc::new(RefCell::new(Widget {
            joystick: Joystick::default(),
            canvas,
        }));
        widget.borrow().apply_layout(true)?;

        let callbacks = Rc::new(RefCell::new(JsCallbacks::default()));

        let mut subscriptions = Vec::new();
        for &(name, phase) in input::event_names(modality) {
            let widget = widget.clone();
            let callbacks = callbacks.clone();
            let handler = move |event: Event| {
                let Some(sample) = input::sample(modality, &event, phase) else {
                    return;
                };
                let fired = widget.borrow_mut().dispatch(sample);
                if let Some((event, snapshot)) = fired {
                    let f = callbacks.borrow().get(event);
                    fire(f, event, &snapshot);
                }
            };
            subscriptions.push(Subscription::attach(&window, name, handler)?);
        }
        log::debug!("joystick attached with {} input", modality.as_str());

        Ok(Self {
            widget,
            callbacks,
            ctx,
            modality,
            subscriptions: RefCell::new(subscriptions),
        })
    }

    /// The resolved input modality: `"mouse"` or `"touch"`.
    #[wasm_bindgen(getter)]
    pub fn modality(&self) -> String {
        self.modality.as_str().to_string()
    }

    /// Remove all DOM listeners. The joystick still accepts
    /// `handlePointer*` calls and keeps rendering.
    pub fn detach(&self) {
        self.subscriptions.borrow_mut().clear();
    }

    // ─── Configuration ───────────────────────────────────────────────────

    /// Merge a style object (`{outerRadius: 60, dynamic: false, ...}`).
    #[wasm_bindgen(js_name = setStyles)]
    pub fn set_styles(&self, styles: JsValue) -> Result<(), JsValue> {
        let json = stringify(&styles)?;
        let options = StyleOptions::from_json(&json).map_err(config_error)?;
        self.widget.borrow_mut().configure(options)
    }

    /// Set a single style key.
    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&self, key: &str, value: JsValue) -> Result<(), JsValue> {
        let json = stringify(&value)?;
        let value: serde_json::Value =
            serde_json::from_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let options = StyleOptions::single(key, value).map_err(config_error)?;
        self.widget.borrow_mut().configure(options)
    }

    /// The current style as JSON.
    #[wasm_bindgen(js_name = getStyles)]
    pub fn get_styles(&self) -> String {
        serde_json::to_string(self.widget.borrow().joystick.style()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Throw on unknown style keys instead of warning.
    #[wasm_bindgen(js_name = setStrictStyles)]
    pub fn set_strict_styles(&self, strict: bool) {
        let policy = if strict {
            UnknownKeyPolicy::Reject
        } else {
            UnknownKeyPolicy::Warn
        };
        self.widget.borrow_mut().joystick.set_unknown_key_policy(policy);
    }

    // ─── Callbacks ───────────────────────────────────────────────────────

    #[wasm_bindgen(setter = onStart)]
    pub fn set_on_start(&self, f: Option<js_sys::Function>) {
        self.callbacks.borrow_mut().set(JoystickEvent::Start, f);
    }

    #[wasm_bindgen(setter = onMove)]
    pub fn set_on_move(&self, f: Option<js_sys::Function>) {
        self.callbacks.borrow_mut().set(JoystickEvent::Move, f);
    }

    #[wasm_bindgen(setter = onEnd)]
    pub fn set_on_end(&self, f: Option<js_sys::Function>) {
        self.callbacks.borrow_mut().set(JoystickEvent::End, f);
    }

    // ─── Host-driven input ───────────────────────────────────────────────

    /// Feed a press at viewport coordinates. Returns true if the joystick activated.
    #[wasm_bindgen(js_name = handlePointerDown)]
    pub fn handle_pointer_down(&self, x: f32, y: f32) -> bool {
        self.feed(PointerSample::begin(x, y))
    }

    /// Feed a drag at viewport coordinates. Returns true if the handle moved.
    #[wasm_bindgen(js_name = handlePointerMove)]
    pub fn handle_pointer_move(&self, x: f32, y: f32) -> bool {
        self.feed(PointerSample::moved(x, y))
    }

    /// Feed a release. Returns true if an active gesture ended.
    #[wasm_bindgen(js_name = handlePointerUp)]
    pub fn handle_pointer_up(&self) -> bool {
        self.feed(PointerSample::end())
    }

    fn feed(&self, sample: PointerSample) -> bool {
        let fired = self.widget.borrow_mut().dispatch(sample);
        match fired {
            Some((event, snapshot)) => {
                let f = self.callbacks.borrow().get(event);
                fire(f, event, &snapshot);
                true
            }
            None => false,
        }
    }

    // ─── Frame ───────────────────────────────────────────────────────────

    /// Advance the fade by one frame. Returns whether the widget is visible.
    pub fn tick(&self) -> bool {
        self.widget.borrow_mut().joystick.tick()
    }

    /// Clear the canvas and draw the current state.
    pub fn render(&self) {
        let widget = self.widget.borrow();
        widget.joystick.render(&mut Canvas2dSurface::new(&self.ctx));
    }

    /// `tick` then `render`; call once per animation frame.
    pub fn frame(&self) -> bool {
        let mut widget = self.widget.borrow_mut();
        widget.joystick.frame(&mut Canvas2dSurface::new(&self.ctx))
    }

    // ─── Data ────────────────────────────────────────────────────────────

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.widget.borrow().joystick.state().active
    }

    /// Radians, `atan2` convention, y down.
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f32 {
        self.widget.borrow().joystick.state().angle
    }

    /// Pixels from the anchor, clamped to the outer radius.
    #[wasm_bindgen(getter)]
    pub fn magnitude(&self) -> f32 {
        self.widget.borrow().joystick.state().magnitude
    }

    #[wasm_bindgen(getter)]
    pub fn direction(&self) -> String {
        self.widget.borrow().joystick.state().direction.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool {
        self.widget.borrow().joystick.state().visible
    }

    #[wasm_bindgen(getter)]
    pub fn opacity(&self) -> f32 {
        self.widget.borrow().joystick.state().opacity
    }

    /// All drag data as a plain object.
    pub fn data(&self) -> JsValue {
        Snapshot::of(&self.widget.borrow().joystick).to_js()
    }
}

// ─── Shared widget state ────────────────────────────────────────────────

/// State shared between the exported object and its DOM listeners.
struct Widget {
    joystick: Joystick,
    canvas: HtmlCanvasElement,
}

impl Widget {
    fn configure(&mut self, options: StyleOptions) -> Result<(), JsValue> {
        let resize = options.touches_geometry();
        self.joystick.configure(options).map_err(config_error)?;
        self.apply_layout(resize)
    }

    /// Fixed mode measures the canvas; dynamic mode places it itself.
    fn sync_origin(&mut self) {
        if self.joystick.style().dynamic {
            return;
        }
        let rect = self.canvas.get_bounding_client_rect();
        self.joystick
            .set_surface_origin(Point::new(rect.left() as f32, rect.top() as f32));
    }

    fn dispatch(&mut self, sample: PointerSample) -> Option<(JoystickEvent, Snapshot)> {
        self.sync_origin();
        let event = self.joystick.handle_sample(sample)?;
        if event == JoystickEvent::Start && self.joystick.style().dynamic {
            if let Err(e) = self.apply_layout(false) {
                log::error!("failed to place joystick: {e:?}");
            }
        }
        Some((event, Snapshot::of(&self.joystick)))
    }

    /// Size the canvas (when `resize`) and position it on the page.
    fn apply_layout(&self, resize: bool) -> Result<(), JsValue> {
        if resize {
            let size = self.joystick.surface_size().ceil() as u32;
            self.canvas.set_width(size);
            self.canvas.set_height(size);
        }
        let style = self.canvas.style();
        style.set_property("position", "fixed")?;
        match self.joystick.placement() {
            Placement::Relative(pos) => {
                style.set_property("left", &format!("{}%", pos.x))?;
                style.set_property("top", &format!("{}vh", pos.y))?;
            }
            Placement::Absolute(origin) => {
                style.set_property("left", &format!("{}px", origin.x))?;
                style.set_property("top", &format!("{}px", origin.y))?;
            }
        }
        Ok(())
    }
}

// ─── Callbacks ──────────────────────────────────────────────────────────

#[derive(Default)]
struct JsCallbacks {
    on_start: Option<js_sys::Function>,
    on_move: Option<js_sys::Function>,
    on_end: Option<js_sys::Function>,
}

impl JsCallbacks {
    /// Clone out the handler so the table is not borrowed while JS runs;
    /// a handler may replace other handlers.
    fn get(&self, event: JoystickEvent) -> Option<js_sys::Function> {
        match event {
            JoystickEvent::Start => self.on_start.clone(),
            JoystickEvent::Move => self.on_move.clone(),
            JoystickEvent::End => self.on_end.clone(),
        }
    }

    fn set(&mut self, event: JoystickEvent, f: Option<js_sys::Function>) {
        match event {
            JoystickEvent::Start => self.on_start = f,
            JoystickEvent::Move => self.on_move = f,
            JoystickEvent::End => self.on_end = f,
        }
    }
}

fn fire(f: Option<js_sys::Function>, event: JoystickEvent, snapshot: &Snapshot) {
    if let Some(f) = f {
        if let Err(e) = f.call1(&JsValue::NULL, &snapshot.to_js()) {
            log::error!("{} callback threw: {e:?}", event.as_str());
        }
    }
}

/// Plain-object view of the drag data handed to JS callbacks.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    active: bool,
    angle: f32,
    magnitude: f32,
    normalized_magnitude: f32,
    direction: Direction,
    /// Unit direction scaled by the normalized magnitude.
    x: f32,
    y: f32,
}

impl Snapshot {
    fn of(joystick: &Joystick) -> Self {
        let state = joystick.state();
        let vector = joystick.vector();
        Self {
            active: state.active,
            angle: state.angle,
            magnitude: state.magnitude,
            normalized_magnitude: joystick.normalized_magnitude(),
            direction: state.direction,
            x: vector.x,
            y: vector.y,
        }
    }

    fn to_js(&self) -> JsValue {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        js_sys::JSON::parse(&json).unwrap_or(JsValue::NULL)
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn config_error(e: ConfigError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn stringify(value: &JsValue) -> Result<String, JsValue> {
    js_sys::JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| JsValue::from_str("value is not JSON-serializable"))
}

/// Route Rust panics to `console.error`.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("vjoy WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

/// Install the console logger. `level` is `"error"`, `"warn"`, `"info"`,
/// `"debug"`, `"trace"`, or `"off"`; anything else means `"warn"`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Warn);
    logger::init(filter);
}
