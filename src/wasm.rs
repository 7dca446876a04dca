// WASM bindings for escapify
// Exposes the codec and a sync controller to a JavaScript editor page

use wasm_bindgen::prelude::*;

use crate::{SyncConfig, SyncController, SyncSnapshot};

// Set up better panic messages in the browser console
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

// Use wee_alloc as the global allocator for smaller WASM binary size
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    set_panic_hook();
}

/// Decode a JSON string literal into raw text
///
/// # Example
/// ```javascript
/// import { decode } from './pkg/escapify';
///
/// decode('"Hello\\nWorld!"'); // "Hello\nWorld!"
/// ```
#[wasm_bindgen]
pub fn decode(escaped: &str) -> Result<String, JsValue> {
    crate::codec::decode(escaped).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode raw text as a JSON string literal
#[wasm_bindgen]
pub fn encode(raw: &str) -> String {
    crate::codec::encode(raw)
}

/// Sync controller for a page with two text areas
///
/// Every handler returns the new state as JSON text:
/// `{"escaped_text": ..., "raw_text": ..., "direction": ..., "error_message": ...}`
///
/// # Example
/// ```javascript
/// import { WasmSyncController } from './pkg/escapify';
///
/// const sync = new WasmSyncController();
/// escapedArea.onfocus = () => render(sync.onFocus("escaped"));
/// rawArea.onfocus = () => render(sync.onFocus("raw"));
/// escapedArea.oninput = (e) => render(sync.onEscapedChanged(e.target.value));
/// rawArea.oninput = (e) => render(sync.onRawChanged(e.target.value));
/// ```
#[wasm_bindgen]
pub struct WasmSyncController {
    inner: SyncController,
}

impl Default for WasmSyncController {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmSyncController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSyncController {
        WasmSyncController { inner: SyncController::new() }
    }

    /// Build from a JSON config object (see `SyncConfig`)
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<WasmSyncController, JsValue> {
        let config = SyncConfig::from_json_str(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmSyncController { inner: SyncController::with_config(&config) })
    }

    #[wasm_bindgen(js_name = onEscapedChanged)]
    pub fn on_escaped_changed(&mut self, text: String) -> Result<String, JsValue> {
        self.inner.on_escaped_changed(text);
        self.state()
    }

    #[wasm_bindgen(js_name = onRawChanged)]
    pub fn on_raw_changed(&mut self, text: String) -> Result<String, JsValue> {
        self.inner.on_raw_changed(text);
        self.state()
    }

    /// `side` is `"escaped"` or `"raw"`
    #[wasm_bindgen(js_name = onFocus)]
    pub fn on_focus(&mut self, side: &str) -> Result<String, JsValue> {
        let side = side.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.inner.on_focus(side);
        self.state()
    }

    pub fn reset(&mut self) -> Result<String, JsValue> {
        self.inner.reset();
        self.state()
    }

    pub fn state(&self) -> Result<String, JsValue> {
        snapshot_json(&self.inner.state()).map_err(|e| JsValue::from_str(&e))
    }
}

fn snapshot_json(snapshot: &SyncSnapshot) -> Result<String, String> {
    serde_json::to_string(snapshot).map_err(|e| format!("Failed to serialize state: {}", e))
}

/// Get the version of the escapify WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
