//! Widget configuration.
//!
//! `WidgetConfig::default()` is the stock duck quiz. With the `serde_json`
//! feature a page can pass a JSON object overriding any subset of fields.

use crate::confetti::ConfettiSettings;
use crate::quiz::QuizContent;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("quiz must contain at least one question")]
    NoQuestions,
    #[error("question key must not be empty")]
    EmptyQuestionKey,
    #[error("duplicate question key '{0}'")]
    DuplicateQuestionKey(String),
    #[error("question '{0}' has no options")]
    NoOptions(String),
    #[error("question '{key}' lists option '{option}' twice")]
    DuplicateOption { key: String, option: String },
    #[error("duplicate outcome id '{0}'")]
    DuplicateOutcome(String),
    #[error("outcome id '{0}' must be lowercase")]
    OutcomeIdNotLowercase(String),
    #[error("fallback outcome '{0}' is not in the outcome table")]
    UnknownFallback(String),
    #[error("confetti needs at least one color")]
    NoConfettiColors,
    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// DOM ids the widget binds to at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementIds {
    pub quiz_card: String,
    pub result_card: String,
    pub title: String,
    pub image: String,
    pub description: String,
    pub play_again: String,
    pub confetti_canvas: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            quiz_card: "quiz-card".into(),
            result_card: "result-card".into(),
            title: "duck-title".into(),
            image: "duck-image".into(),
            description: "duck-description".into(),
            play_again: "play-again".into(),
            confetti_canvas: "confetti-canvas".into(),
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WidgetConfig {
    pub elements: ElementIds,
    pub content: QuizContent,
    pub confetti: ConfettiSettings,
    /// `tracing` level name: trace, debug, info, warn or error.
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            content: QuizContent::default(),
            confetti: ConfettiSettings::default(),
            log_level: "info".into(),
        }
    }
}

impl WidgetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.content.validate()?;
        if self.confetti.colors.is_empty() {
            return Err(ConfigError::NoConfettiColors);
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WidgetConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
