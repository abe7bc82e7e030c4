//! Duck Quiz core crate.
//!
//! Three questions, one duck. The quiz state machine, outcome resolution,
//! portrait SVG and confetti motion are plain Rust and test natively; `dom`
//! is the only module that talks to the browser.

use wasm_bindgen::prelude::*;

pub mod confetti;
pub mod config;
mod dom;
pub mod error;
mod logging;
pub mod portrait;
pub mod quiz;

pub use config::{ConfigError, WidgetConfig};
pub use dom::QuizWidget;
pub use error::WidgetError;
pub use quiz::{
    Advance, AnswerSet, OutcomeProfile, OutcomeTable, Phase, Question, Quiz, QuizContent,
};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Mounts the stock duck quiz on the page's default element ids.
#[wasm_bindgen]
pub fn start_quiz() -> Result<QuizWidget, JsValue> {
    Ok(dom::mount(WidgetConfig::default())?)
}

/// Mounts a quiz described by a JSON `WidgetConfig`; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_quiz_with_config(json: &str) -> Result<QuizWidget, JsValue> {
    let config = WidgetConfig::from_json(json).map_err(WidgetError::from)?;
    Ok(dom::mount(config)?)
}
