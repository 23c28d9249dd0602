//! Runtime configuration from `window.__FLYWHEEL_CONFIG__`.

use thiserror::Error;
use wasm_bindgen::JsValue;

use flywheel_core::ClientConfig;

const CONFIG_GLOBAL: &str = "__FLYWHEEL_CONFIG__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {CONFIG_GLOBAL}: {0}")]
    Lookup(String),
    #[error("malformed {CONFIG_GLOBAL}: {0}")]
    Malformed(#[from] serde_wasm_bindgen::Error),
}

/// Defaults when the global is absent; `Err` when it is present but unreadable
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let Some(window) = web_sys::window() else {
        return Ok(ClientConfig::default());
    };
    let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|e| ConfigError::Lookup(format!("{:?}", e)))?;
    if raw.is_undefined() || raw.is_null() {
        return Ok(ClientConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(raw)?)
}
