//! Startup failures. Quiz operations themselves never fail; these only cover a
//! page that is missing the elements the widget binds to.

use wasm_bindgen::JsValue;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },
    #[error("2d canvas context unavailable")]
    NoCanvasContext,
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("dom call failed: {0}")]
    Dom(String),
}

impl WidgetError {
    pub(crate) fn dom(err: JsValue) -> Self {
        WidgetError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<WidgetError> for JsValue {
    fn from(err: WidgetError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
