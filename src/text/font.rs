//! Font gate: the only place the scene waits on the browser

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::SceneError;

async fn wait_for_font(descriptor: &str) -> Result<u32, SceneError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| SceneError::Font("no document available".to_string()))?;

    let faces = JsFuture::from(document.fonts().load(descriptor))
        .await
        .map_err(|e| SceneError::Font(format!("{:?}", e)))?;

    Ok(Array::from(&faces).length())
}

/// Resolve once the font is usable; `false` means rasterize with the fallback font
#[wasm_bindgen]
pub async fn load_font(descriptor: String) -> bool {
    match wait_for_font(&descriptor).await {
        Ok(0) => {
            log::warn!("no font faces match '{}'; falling back", descriptor);
            false
        }
        Ok(faces) => {
            log::debug!("font '{}' ready ({} faces)", descriptor, faces);
            true
        }
        Err(e) => {
            log::warn!("{}; falling back for '{}'", e, descriptor);
            false
        }
    }
}
