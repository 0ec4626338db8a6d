//! Bridge to the embedded external renderer (a WebGL game-engine export).
//!
//! DESIGN
//! ======
//! The renderer is one long-lived service per page surface. It is modelled as
//! an explicit state machine, `Unloaded -> Initializing -> Loaded | Failed`,
//! owned by whoever mounts the viewer and passed to consumers, rather than a
//! module-level global. Loading itself is asynchronous and happens in the
//! host; the host reports back through [`ArRenderer::finish_initialize`].
//!
//! Messages are fire-and-forget string RPC. Rapid successive updates are not
//! ordered by the engine; in practice the last write wins.
//!
//! ERROR HANDLING
//! ==============
//! A failed load is terminal until the user asks again (`begin_initialize`
//! from `Failed` starts over); nothing retries automatically. Messages sent
//! before the renderer is loaded are dropped with a warning.

#[cfg(test)]
#[path = "renderer_test.rs"]
mod renderer_test;

use crate::doc::CardFields;

/// Scene object that receives card updates.
pub const CARD_OBJECT: &str = "Card";

/// Method on [`CARD_OBJECT`] that applies a JSON card payload.
pub const UPDATE_CARD_METHOD: &str = "UpdateCardText";

pub const COMPANY_NAME: &str = "DefaultCompany";
pub const PRODUCT_NAME: &str = "WebXR";
pub const PRODUCT_VERSION: &str = "0.1";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RendererError {
    #[error("renderer failed to load: {0}")]
    Load(String),
    #[error("renderer not loaded")]
    NotLoaded,
    #[error("renderer call failed: {0}")]
    Call(String),
    #[error("unsupported capability: {0}")]
    Unsupported(String),
}

/// The running engine instance, as seen from Rust.
pub trait RendererHost {
    /// Deliver `payload` to `method` on scene object `object`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the call.
    fn send_message(&self, object: &str, method: &str, payload: &str) -> Result<(), RendererError>;

    /// Enter or leave passthrough AR presentation.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine has no AR entry point.
    fn toggle_ar(&self) -> Result<(), RendererError>;
}

/// Lifecycle of the renderer service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RendererStatus {
    #[default]
    Unloaded,
    Initializing,
    Loaded,
    Failed(String),
}

/// What the caller of [`ArRenderer::begin_initialize`] should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    /// Start loading; report the result via `finish_initialize`.
    Start,
    /// Already running; treat as loaded.
    AlreadyLoaded,
    /// Another caller is loading; wait for it.
    InProgress,
}

/// Whether the viewing device can present immersive AR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArSupport {
    #[default]
    Unknown,
    Supported,
    Unsupported,
}

/// Where the engine build lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    build_url: String,
    build_name: String,
}

impl RendererConfig {
    /// `build_url` may carry a trailing slash; it is trimmed.
    #[must_use]
    pub fn new(build_url: &str, build_name: &str) -> Self {
        Self { build_url: build_url.trim_end_matches('/').to_owned(), build_name: build_name.to_owned() }
    }

    #[must_use]
    pub fn loader_url(&self) -> String {
        format!("{}/{}.loader.js", self.build_url, self.build_name)
    }

    #[must_use]
    pub fn data_url(&self) -> String {
        format!("{}/{}.data.unityweb", self.build_url, self.build_name)
    }

    #[must_use]
    pub fn framework_url(&self) -> String {
        format!("{}/{}.framework.js.unityweb", self.build_url, self.build_name)
    }

    #[must_use]
    pub fn code_url(&self) -> String {
        format!("{}/{}.wasm.unityweb", self.build_url, self.build_name)
    }

    #[must_use]
    pub fn streaming_assets_url(&self) -> String {
        format!("{}/StreamingAssets", self.build_url)
    }

    /// The engine loader's config object.
    #[must_use]
    pub fn loader_config(&self) -> serde_json::Value {
        serde_json::json!({
            "dataUrl": self.data_url(),
            "frameworkUrl": self.framework_url(),
            "codeUrl": self.code_url(),
            "streamingAssetsUrl": self.streaming_assets_url(),
            "companyName": COMPANY_NAME,
            "productName": PRODUCT_NAME,
            "productVersion": PRODUCT_VERSION,
        })
    }
}

/// The renderer service.
pub struct ArRenderer<H: RendererHost> {
    config: RendererConfig,
    status: RendererStatus,
    host: Option<H>,
    ar_support: ArSupport,
}

impl<H: RendererHost> ArRenderer<H> {
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self { config, status: RendererStatus::Unloaded, host: None, ar_support: ArSupport::Unknown }
    }

    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> &RendererStatus {
        &self.status
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.status == RendererStatus::Loaded && self.host.is_some()
    }

    /// Claim the right to load. At most one load runs per surface.
    pub fn begin_initialize(&mut self) -> InitStep {
        match self.status {
            RendererStatus::Loaded if self.host.is_some() => InitStep::AlreadyLoaded,
            RendererStatus::Initializing => InitStep::InProgress,
            _ => {
                self.status = RendererStatus::Initializing;
                InitStep::Start
            }
        }
    }

    /// Record the outcome of a load started by `begin_initialize`.
    pub fn finish_initialize(&mut self, result: Result<H, RendererError>) {
        match result {
            Ok(host) => {
                log::info!("renderer loaded from {}", self.config.loader_url());
                self.host = Some(host);
                self.status = RendererStatus::Loaded;
            }
            Err(e) => {
                log::error!("renderer failed to load: {e}");
                self.host = None;
                self.status = RendererStatus::Failed(e.to_string());
            }
        }
    }

    /// Record the result of the device's immersive-AR capability probe.
    pub fn set_ar_support(&mut self, support: ArSupport) {
        self.ar_support = support;
    }

    #[must_use]
    pub fn ar_support(&self) -> ArSupport {
        self.ar_support
    }

    /// Push the card's current content to the engine. Returns whether it was sent.
    pub fn update_card_data(&self, fields: &CardFields) -> bool {
        let Some(host) = self.loaded_host() else {
            log::warn!("renderer not loaded, dropping card update");
            return false;
        };
        let payload = match serde_json::to_string(&fields.renderer_data()) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("failed to encode card update: {e}");
                return false;
            }
        };
        match host.send_message(CARD_OBJECT, UPDATE_CARD_METHOD, &payload) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to send card update: {e}");
                false
            }
        }
    }

    /// Ask the engine to switch in or out of AR presentation.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` if the device cannot present AR, `NotLoaded` before
    /// the engine is up, or the host's own error.
    pub fn toggle_ar(&self) -> Result<(), RendererError> {
        if self.ar_support == ArSupport::Unsupported {
            return Err(RendererError::Unsupported("immersive-ar".into()));
        }
        let host = self.loaded_host().ok_or(RendererError::NotLoaded)?;
        host.toggle_ar()
    }

    /// Detach from the engine. The status returns to `Unloaded`.
    pub fn shutdown(&mut self) {
        if self.host.take().is_some() {
            log::info!("renderer detached");
        }
        self.status = RendererStatus::Unloaded;
    }

    fn loaded_host(&self) -> Option<&H> {
        if self.status == RendererStatus::Loaded { self.host.as_ref() } else { None }
    }
}
