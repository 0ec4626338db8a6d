//! JavaScript bindings: the controller handle the page's render loop drives,
//! the session-storage draft list, and the embedded engine service.
//!
//! The page owns the scene graph. It raycasts DOM pointer events onto the
//! card's drag plane, forwards them here, and applies `positionX/Y/Z`, `scale`
//! and the value returned by `tick` to the card meshes each frame. Handler
//! methods return `true` when the pose or open state changed.

#[cfg(test)]
#[path = "wasm_test.rs"]
mod wasm_test;

use std::fmt::Display;

use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::clock::SystemClock;
use crate::controller::{Action, CardController};
use crate::doc::CardFields;
use crate::drafts::{DraftError, DraftList, DraftStorage};
use crate::hit::Ray;
use crate::input::InputMode;
use crate::pose::{Point, Vec3};
use crate::renderer::{ArRenderer, ArSupport, InitStep, RendererConfig, RendererError, RendererHost, RendererStatus};

fn changed(actions: &[Action]) -> bool {
    !actions.is_empty()
}

fn js_error(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Route `log` output to the browser console. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        log::debug!("console logger already installed: {e}");
    }
}

/// Controller handle exported to JavaScript.
#[wasm_bindgen]
pub struct CardHandle {
    core: CardController<SystemClock>,
}

impl Default for CardHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl CardHandle {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self { core: CardController::new(SystemClock) }
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }

    #[wasm_bindgen(js_name = setImmersive)]
    pub fn set_immersive(&mut self, immersive: bool) -> bool {
        let mode = if immersive { InputMode::Immersive } else { InputMode::Surface };
        changed(&self.core.set_mode(mode))
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        changed(&self.core.on_pointer_down(Point::new(x, y)))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        changed(&self.core.on_pointer_move(Point::new(x, y)))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> bool {
        changed(&self.core.on_pointer_up())
    }

    pub fn click(&mut self) -> bool {
        changed(&self.core.on_click())
    }

    pub fn wheel(&mut self, delta_y: f64) -> bool {
        changed(&self.core.on_wheel(delta_y))
    }

    #[wasm_bindgen(js_name = touchesChanged)]
    pub fn touches_changed(&mut self, count: usize) -> bool {
        changed(&self.core.on_touches_changed(count))
    }

    #[wasm_bindgen(js_name = pinchMove)]
    pub fn pinch_move(&mut self, distance: f64) -> bool {
        changed(&self.core.on_pinch_move(distance))
    }

    /// Trigger pressed. The ray is the controller's target-ray pose; the
    /// grip is its grip-space position, the same point later passed to
    /// `controllerMove`.
    #[allow(clippy::too_many_arguments)]
    #[wasm_bindgen(js_name = controllerSelectStart)]
    pub fn controller_select_start(
        &mut self,
        controller: u32,
        origin_x: f64,
        origin_y: f64,
        origin_z: f64,
        dir_x: f64,
        dir_y: f64,
        dir_z: f64,
        grip_x: f64,
        grip_y: f64,
        grip_z: f64,
    ) -> bool {
        let ray = Ray::new(Vec3::new(origin_x, origin_y, origin_z), Vec3::new(dir_x, dir_y, dir_z));
        let grip = Vec3::new(grip_x, grip_y, grip_z);
        changed(&self.core.on_controller_select_start(controller, &ray, grip))
    }

    #[wasm_bindgen(js_name = controllerMove)]
    pub fn controller_move(&mut self, controller: u32, x: f64, y: f64, z: f64) -> bool {
        changed(&self.core.on_controller_move(controller, Vec3::new(x, y, z)))
    }

    #[wasm_bindgen(js_name = controllerSelectEnd)]
    pub fn controller_select_end(&mut self, controller: u32) -> bool {
        changed(&self.core.on_controller_select_end(controller))
    }

    /// Advance the hinge by `dt` seconds; returns the front-cover Y rotation in radians.
    pub fn tick(&mut self, dt: f64) -> f64 {
        self.core.tick(dt)
    }

    #[wasm_bindgen(getter, js_name = positionX)]
    pub fn position_x(&self) -> f64 {
        self.core.pose().position.x
    }

    #[wasm_bindgen(getter, js_name = positionY)]
    pub fn position_y(&self) -> f64 {
        self.core.pose().position.y
    }

    #[wasm_bindgen(getter, js_name = positionZ)]
    pub fn position_z(&self) -> f64 {
        self.core.pose().position.z
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.core.pose().scale()
    }

    #[wasm_bindgen(getter, js_name = openAmount)]
    pub fn open_amount(&self) -> f64 {
        self.core.pose().open_amount()
    }

    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }
}

/// Drafts backed by `window.sessionStorage`.
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// Open the tab's session storage.
    ///
    /// # Errors
    ///
    /// Returns an error outside a browser window or when storage is disabled.
    pub fn session() -> Result<Self, DraftError> {
        let window = web_sys::window().ok_or_else(|| DraftError::Unavailable("no window".into()))?;
        let storage = window
            .session_storage()
            .map_err(|e| DraftError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| DraftError::Unavailable("sessionStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl DraftStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, DraftError> {
        self.storage
            .get_item(key)
            .map_err(|e| DraftError::Unavailable(format!("{e:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DraftError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| DraftError::Write(format!("{e:?}")))
    }
}

/// A loaded engine instance (the object `createUnityInstance` resolves to).
pub struct JsRendererHost {
    instance: JsValue,
}

impl JsRendererHost {
    #[must_use]
    pub fn new(instance: JsValue) -> Self {
        Self { instance }
    }

    fn method(target: &JsValue, name: &str) -> Result<js_sys::Function, RendererError> {
        js_sys::Reflect::get(target, &JsValue::from_str(name))
            .map_err(|e| RendererError::Call(format!("{e:?}")))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| RendererError::Call(format!("{name} is not a function")))
    }

    fn field(target: &JsValue, name: &str) -> Result<JsValue, RendererError> {
        let value = js_sys::Reflect::get(target, &JsValue::from_str(name))
            .map_err(|e| RendererError::Call(format!("{e:?}")))?;
        if value.is_undefined() || value.is_null() {
            return Err(RendererError::Unsupported(name.to_owned()));
        }
        Ok(value)
    }
}

impl RendererHost for JsRendererHost {
    fn send_message(&self, object: &str, method: &str, payload: &str) -> Result<(), RendererError> {
        let send = Self::method(&self.instance, "SendMessage")?;
        send.call3(
            &self.instance,
            &JsValue::from_str(object),
            &JsValue::from_str(method),
            &JsValue::from_str(payload),
        )
        .map(|_| ())
        .map_err(|e| RendererError::Call(format!("{e:?}")))
    }

    fn toggle_ar(&self) -> Result<(), RendererError> {
        let module = Self::field(&self.instance, "Module")?;
        let webxr = Self::field(&module, "WebXR")?;
        let toggle = Self::method(&webxr, "toggleAR")?;
        toggle
            .call0(&webxr)
            .map(|_| ())
            .map_err(|e| RendererError::Call(format!("{e:?}")))
    }
}

// --- Drafts ---

/// The tab's named-draft list. Cards cross the boundary as JSON strings.
#[wasm_bindgen]
pub struct CardDrafts {
    list: DraftList<BrowserStorage, SystemClock>,
}

#[wasm_bindgen]
impl CardDrafts {
    /// # Errors
    ///
    /// Rejects when session storage is unavailable.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<CardDrafts, JsValue> {
        let storage = BrowserStorage::session().map_err(js_error)?;
        Ok(Self { list: DraftList::new(storage, SystemClock) })
    }

    /// # Errors
    ///
    /// Rejects if the list cannot be encoded.
    #[wasm_bindgen(js_name = getAll)]
    pub fn get_all(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.list.get_all()).map_err(js_error)
    }

    /// Upsert a draft and return it as JSON.
    ///
    /// # Errors
    ///
    /// Rejects on malformed card JSON or id, or when storage refuses the write.
    pub fn save(&mut self, name: &str, data: &str, existing_id: Option<String>) -> Result<String, JsValue> {
        let fields: CardFields = serde_json::from_str(data).map_err(js_error)?;
        let existing_id = existing_id
            .map(|raw| Uuid::parse_str(&raw))
            .transpose()
            .map_err(js_error)?;
        let saved = self.list.save(name, fields, existing_id).map_err(js_error)?;
        serde_json::to_string(&saved).map_err(js_error)
    }

    /// # Errors
    ///
    /// Rejects on a malformed id.
    #[wasm_bindgen(js_name = getById)]
    pub fn get_by_id(&self, id: &str) -> Result<Option<String>, JsValue> {
        let id = Uuid::parse_str(id).map_err(js_error)?;
        self.list
            .get_by_id(id)
            .map(|card| serde_json::to_string(&card).map_err(js_error))
            .transpose()
    }

    /// # Errors
    ///
    /// Rejects on a malformed id or a failed write.
    pub fn delete(&mut self, id: &str) -> Result<(), JsValue> {
        let id = Uuid::parse_str(id).map_err(js_error)?;
        self.list.delete(id).map_err(js_error)
    }
}

// --- Renderer ---

/// The embedded engine service for one page surface. The page runs the
/// engine's loader script itself and reports back via `finishInitialize` or
/// `failInitialize`.
#[wasm_bindgen]
pub struct CardRenderer {
    inner: ArRenderer<JsRendererHost>,
}

#[wasm_bindgen]
impl CardRenderer {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(build_url: &str, build_name: &str) -> Self {
        Self { inner: ArRenderer::new(RendererConfig::new(build_url, build_name)) }
    }

    #[wasm_bindgen(getter, js_name = loaderUrl)]
    pub fn loader_url(&self) -> String {
        self.inner.config().loader_url()
    }

    /// The config object for `createUnityInstance`, as JSON.
    #[wasm_bindgen(js_name = loaderConfig)]
    pub fn loader_config(&self) -> String {
        self.inner.config().loader_config().to_string()
    }

    /// `"start"` means the caller should load the engine now.
    #[wasm_bindgen(js_name = beginInitialize)]
    pub fn begin_initialize(&mut self) -> String {
        match self.inner.begin_initialize() {
            InitStep::Start => "start",
            InitStep::AlreadyLoaded => "loaded",
            InitStep::InProgress => "pending",
        }
        .to_owned()
    }

    #[wasm_bindgen(js_name = finishInitialize)]
    pub fn finish_initialize(&mut self, instance: JsValue) {
        self.inner.finish_initialize(Ok(JsRendererHost::new(instance)));
    }

    #[wasm_bindgen(js_name = failInitialize)]
    pub fn fail_initialize(&mut self, message: &str) {
        self.inner.finish_initialize(Err(RendererError::Load(message.to_owned())));
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        match self.inner.status() {
            RendererStatus::Unloaded => "unloaded",
            RendererStatus::Initializing => "initializing",
            RendererStatus::Loaded => "loaded",
            RendererStatus::Failed(_) => "failed",
        }
        .to_owned()
    }

    #[wasm_bindgen(getter, js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Record the result of `navigator.xr.isSessionSupported("immersive-ar")`.
    #[wasm_bindgen(js_name = setArSupported)]
    pub fn set_ar_supported(&mut self, supported: bool) {
        self.inner
            .set_ar_support(if supported { ArSupport::Supported } else { ArSupport::Unsupported });
    }

    /// Push card JSON to the engine. Resolves `false` when the engine is not up.
    ///
    /// # Errors
    ///
    /// Rejects on malformed card JSON.
    #[wasm_bindgen(js_name = updateCardData)]
    pub fn update_card_data(&self, data: &str) -> Result<bool, JsValue> {
        let fields: CardFields = serde_json::from_str(data).map_err(js_error)?;
        Ok(self.inner.update_card_data(&fields))
    }

    /// # Errors
    ///
    /// Rejects before load, on devices without immersive AR, or when the
    /// engine has no WebXR module.
    #[wasm_bindgen(js_name = toggleAr)]
    pub fn toggle_ar(&self) -> Result<(), JsValue> {
        self.inner.toggle_ar().map_err(js_error)
    }

    pub fn shutdown(&mut self) {
        self.inner.shutdown();
    }
}
