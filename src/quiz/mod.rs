//! Quiz state machine.
//!
//! A `Quiz` walks a fixed list of questions in order, collecting one answer per
//! question key. Once the final question is answered and advanced past, the quiz
//! switches to the result phase and the outcome is resolved from the collected
//! answers. Invalid input (unknown keys, options the question never offered,
//! advancing without an answer) is ignored rather than reported: the UI only
//! offers legal moves, so anything else is noise.

use std::collections::BTreeMap;

mod content;
mod outcome;
pub mod view;

pub use content::{default_outcomes, default_questions};
pub use outcome::{OutcomeProfile, OutcomeTable};

use crate::config::ConfigError;

/// Key of the question whose answer decides the outcome.
pub const DECISIVE_KEY: &str = "habitat";
/// Outcome id used when the decisive answer is missing or unrecognised.
pub const FALLBACK_OUTCOME: &str = "plains";

// --- Content -----------------------------------------------------------------

/// One multiple-choice prompt. Option labels double as the stored answer value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Question {
    pub key: String,
    pub text: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(key: &str, text: &str, options: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Everything the quiz shows: questions, outcomes and button labels.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuizContent {
    pub questions: Vec<Question>,
    pub outcomes: Vec<OutcomeProfile>,
    pub decisive_key: String,
    pub fallback_outcome: String,
    /// Advance label on every question but the last.
    pub next_label: String,
    /// Advance label on the last question.
    pub finish_label: String,
}

impl Default for QuizContent {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            outcomes: default_outcomes(),
            decisive_key: DECISIVE_KEY.to_string(),
            fallback_outcome: FALLBACK_OUTCOME.to_string(),
            next_label: "Next".to_string(),
            finish_label: "See My Duck".to_string(),
        }
    }
}

impl QuizContent {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.questions.is_empty() {
            return Err(ConfigError::NoQuestions);
        }
        let mut keys: Vec<&str> = Vec::with_capacity(self.questions.len());
        for q in &self.questions {
            if q.key.trim().is_empty() {
                return Err(ConfigError::EmptyQuestionKey);
            }
            if keys.contains(&q.key.as_str()) {
                return Err(ConfigError::DuplicateQuestionKey(q.key.clone()));
            }
            keys.push(&q.key);
            if q.options.is_empty() {
                return Err(ConfigError::NoOptions(q.key.clone()));
            }
            for (i, opt) in q.options.iter().enumerate() {
                if q.options[..i].contains(opt) {
                    return Err(ConfigError::DuplicateOption {
                        key: q.key.clone(),
                        option: opt.clone(),
                    });
                }
            }
        }
        // Table construction checks outcome ids and the fallback.
        OutcomeTable::new(
            self.outcomes.clone(),
            &self.decisive_key,
            &self.fallback_outcome,
        )
        .map(|_| ())
    }
}

// --- Answers -----------------------------------------------------------------

/// Chosen option per question key. At most one entry per key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: BTreeMap<String, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `option` under `key`, replacing any earlier choice.
    pub fn insert(&mut self, key: &str, option: &str) {
        self.entries.insert(key.to_string(), option.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for (k, v) in iter {
            set.insert(k.as_ref(), v.as_ref());
        }
        set
    }
}

// --- State machine -----------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Showing the question at `Quiz::current_index`.
    Answering,
    ShowingResult,
}

/// Result of an `advance()` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Current question has no answer yet; nothing changed.
    Unanswered,
    /// Already showing the result; nothing changed.
    Ignored,
    /// Moved to the question at this index.
    NextQuestion(usize),
    /// Last question answered; now showing the result.
    Completed,
}

/// Quiz controller. Owns the content and all progress.
#[derive(Clone, Debug)]
pub struct Quiz {
    questions: Vec<Question>,
    outcomes: OutcomeTable,
    next_label: String,
    finish_label: String,
    current_index: usize,
    answers: AnswerSet,
    phase: Phase,
}

impl Quiz {
    pub fn new(content: QuizContent) -> Result<Self, ConfigError> {
        content.validate()?;
        let outcomes = OutcomeTable::new(
            content.outcomes,
            &content.decisive_key,
            &content.fallback_outcome,
        )?;
        Ok(Self {
            questions: content.questions,
            outcomes,
            next_label: content.next_label,
            finish_label: content.finish_label,
            current_index: 0,
            answers: AnswerSet::new(),
            phase: Phase::Answering,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_showing_result(&self) -> bool {
        self.phase == Phase::ShowingResult
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn answer(&self, key: &str) -> Option<&str> {
        self.answers.get(key)
    }

    pub fn outcomes(&self) -> &OutcomeTable {
        &self.outcomes
    }

    /// Label for the advance control on the current question.
    pub fn advance_label(&self) -> &str {
        if self.is_last_question() {
            &self.finish_label
        } else {
            &self.next_label
        }
    }

    /// Whether the advance control should accept input.
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::Answering && self.answers.contains(&self.current_question().key)
    }

    /// Records an answer. Returns `false` (and changes nothing) when `key` is not
    /// a declared question, `option` is not one of its options, or the result is
    /// already showing.
    pub fn select_option(&mut self, key: &str, option: &str) -> bool {
        if self.phase != Phase::Answering {
            tracing::warn!(key, option, "selection ignored while showing result");
            return false;
        }
        let Some(question) = self.questions.iter().find(|q| q.key == key) else {
            tracing::warn!(key, "selection ignored: unknown question");
            return false;
        };
        if !question.offers(option) {
            tracing::warn!(key, option, "selection ignored: option not offered");
            return false;
        }
        self.answers.insert(key, option);
        tracing::debug!(key, option, "answer recorded");
        true
    }

    /// Selects `option` for whichever question is currently shown.
    pub fn select_current(&mut self, option: &str) -> bool {
        let key = self.current_question().key.clone();
        self.select_option(&key, option)
    }

    pub fn advance(&mut self) -> Advance {
        if self.phase == Phase::ShowingResult {
            return Advance::Ignored;
        }
        if !self.can_advance() {
            tracing::debug!(index = self.current_index, "advance ignored: unanswered");
            return Advance::Unanswered;
        }
        if self.is_last_question() {
            self.phase = Phase::ShowingResult;
            tracing::info!(outcome = %self.outcomes.resolve(&self.answers).id, "quiz completed");
            return Advance::Completed;
        }
        self.current_index += 1;
        tracing::debug!(index = self.current_index, "advanced to next question");
        Advance::NextQuestion(self.current_index)
    }

    /// Back to the first question with no answers.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.current_index = 0;
        self.phase = Phase::Answering;
        tracing::info!("quiz reset");
    }

    /// Resolved outcome; only available while showing the result.
    pub fn outcome(&self) -> Option<&OutcomeProfile> {
        match self.phase {
            Phase::ShowingResult => Some(self.outcomes.resolve(&self.answers)),
            Phase::Answering => None,
        }
    }
}

impl Default for Quiz {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            outcomes: OutcomeTable::default(),
            next_label: "Next".to_string(),
            finish_label: "See My Duck".to_string(),
            current_index: 0,
            answers: AnswerSet::new(),
            phase: Phase::Answering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered(quiz: &mut Quiz, picks: &[&str]) {
        for pick in picks {
            assert!(quiz.select_current(pick));
            quiz.advance();
        }
    }

    #[test]
    fn test_select_records_exact_option() {
        let mut quiz = Quiz::default();
        assert!(quiz.select_option("food", "Nuts"));
        assert_eq!(quiz.answer("food"), Some("Nuts"));
        assert!(quiz.select_option("food", "Seeds"));
        assert_eq!(quiz.answer("food"), Some("Seeds"));
        assert_eq!(quiz.answers().len(), 1);
    }

    #[test]
    fn test_select_ignores_unknown_key_and_option() {
        let mut quiz = Quiz::default();
        assert!(!quiz.select_option("mood", "Happy"));
        assert!(!quiz.select_option("color", "Green"));
        assert!(quiz.answers().is_empty());
    }

    #[test]
    fn test_advance_without_answer_is_noop() {
        let mut quiz = Quiz::default();
        assert_eq!(quiz.advance(), Advance::Unanswered);
        assert_eq!(quiz.current_index(), 0);
        assert!(quiz.answers().is_empty());
        assert!(!quiz.can_advance());
    }

    #[test]
    fn test_advance_label_switches_on_last_question() {
        let mut quiz = Quiz::default();
        assert_eq!(quiz.advance_label(), "Next");
        answered(&mut quiz, &["Red", "Bread"]);
        assert_eq!(quiz.current_index(), 2);
        assert_eq!(quiz.advance_label(), "See My Duck");
    }

    #[test]
    fn test_last_advance_completes_without_passing_bounds() {
        let mut quiz = Quiz::default();
        answered(&mut quiz, &["Red", "Bread"]);
        quiz.select_current("City");
        assert_eq!(quiz.advance(), Advance::Completed);
        assert_eq!(quiz.current_index(), 2);
        assert_eq!(quiz.advance(), Advance::Ignored);
        assert_eq!(quiz.current_index(), 2);
        assert_eq!(quiz.outcome().map(|o| o.id.as_str()), Some("city"));
    }

    #[test]
    fn test_no_selection_while_showing_result() {
        let mut quiz = Quiz::default();
        answered(&mut quiz, &["Red", "Bread", "Swamp"]);
        assert!(quiz.is_showing_result());
        assert!(!quiz.select_option("habitat", "City"));
        assert_eq!(quiz.answer("habitat"), Some("Swamp"));
    }

    #[test]
    fn test_validate_rejects_duplicate_keys() {
        let mut content = QuizContent::default();
        content.questions.push(Question::new("color", "Again?", &["Blue"]));
        assert_eq!(
            content.validate(),
            Err(ConfigError::DuplicateQuestionKey("color".into()))
        );
    }

    #[test]
    fn test_validate_rejects_blank_key() {
        let mut content = QuizContent::default();
        content.questions[1].key = "  ".into();
        assert_eq!(content.validate(), Err(ConfigError::EmptyQuestionKey));
    }

    #[test]
    fn test_validate_rejects_question_without_options() {
        let mut content = QuizContent::default();
        content.questions[1].options.clear();
        assert_eq!(content.validate(), Err(ConfigError::NoOptions("food".into())));
    }

    #[test]
    fn test_validate_rejects_duplicate_outcome() {
        let mut content = QuizContent::default();
        let copy = content.outcomes[0].clone();
        content.outcomes.push(copy);
        assert_eq!(
            content.validate(),
            Err(ConfigError::DuplicateOutcome("swamp".into()))
        );
    }

    #[test]
    fn test_answers_iterate_in_key_order() {
        let mut quiz = Quiz::default();
        quiz.select_option("habitat", "City");
        quiz.select_option("color", "Blue");
        let pairs: Vec<(&str, &str)> = quiz.answers().iter().collect();
        assert_eq!(pairs, vec![("color", "Blue"), ("habitat", "City")]);
    }

    #[test]
    fn test_validate_rejects_duplicate_options() {
        let mut content = QuizContent::default();
        content.questions[0].options.push("Blue".into());
        assert!(matches!(
            content.validate(),
            Err(ConfigError::DuplicateOption { .. })
        ));
    }
}
