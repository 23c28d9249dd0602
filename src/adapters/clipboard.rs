//! Clipboard write via `navigator.clipboard`.

use thiserror::Error;
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no window")]
    NoWindow,
    #[error("clipboard write failed: {0}")]
    Rejected(String),
}

pub async fn write_clipboard(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::NoWindow)?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))
}
