use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::config::ConfigError;

/// Errors surfaced while building or driving the scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("WebGL error: {0}")]
    Gl(String),
    #[error("canvas error: {0}")]
    Canvas(String),
    #[error("font error: {0}")]
    Font(String),
    #[error("no element with id '{0}'")]
    MissingElement(String),
    #[error("glyph cloud has {start} start points but {target} targets")]
    UnpairedGlyphs { start: usize, target: usize },
    #[error("clock error: {0}")]
    Clock(String),
    #[error("text cloud has already been attached")]
    TextAlreadyAttached,
}

impl From<SceneError> for JsValue {
    fn from(err: SceneError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SceneError::Gl("Failed to create buffer".to_string());
        assert_eq!(err.to_string(), "WebGL error: Failed to create buffer");

        let err: SceneError = ConfigError::Parse("bad indent".to_string()).into();
        assert!(err.to_string().starts_with("configuration error"));
    }
}
