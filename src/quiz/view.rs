//! Pure view description of the quiz.
//!
//! `render` turns the controller state into plain data; the DOM adapter is the
//! only code that knows how to put it on screen.

use super::{Phase, Quiz};
use crate::portrait::portrait_data_uri;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizView {
    Question(QuestionView),
    Result(ResultView),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionView {
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub advance: AdvanceButton,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvanceButton {
    pub label: String,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
    pub heading: String,
    pub description: String,
    /// `data:` URI of the duck portrait, usable directly as an image source.
    pub image_src: String,
}

pub fn render(quiz: &Quiz) -> QuizView {
    match quiz.phase() {
        Phase::Answering => QuizView::Question(render_question(quiz)),
        Phase::ShowingResult => {
            let profile = quiz.outcomes().resolve(quiz.answers());
            QuizView::Result(ResultView {
                heading: format!("You got: {}!", profile.title),
                description: profile.description.clone(),
                image_src: portrait_data_uri(profile),
            })
        }
    }
}

fn render_question(quiz: &Quiz) -> QuestionView {
    let question = quiz.current_question();
    let chosen = quiz.answer(&question.key);
    QuestionView {
        prompt: question.text.clone(),
        options: question
            .options
            .iter()
            .map(|label| OptionView {
                label: label.clone(),
                selected: chosen == Some(label.as_str()),
            })
            .collect(),
        advance: AdvanceButton {
            label: quiz.advance_label().to_string(),
            enabled: quiz.can_advance(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_question_has_disabled_next() {
        let quiz = Quiz::default();
        let QuizView::Question(view) = render(&quiz) else {
            panic!("expected question view");
        };
        assert_eq!(view.prompt, "What is your favorite color?");
        assert_eq!(
            view.advance,
            AdvanceButton {
                label: "Next".into(),
                enabled: false
            }
        );
        assert!(view.options.iter().all(|o| !o.selected));
    }

    #[test]
    fn test_selection_marks_option_and_enables_advance() {
        let mut quiz = Quiz::default();
        quiz.select_current("Pink");
        let QuizView::Question(view) = render(&quiz) else {
            panic!("expected question view");
        };
        let selected: Vec<&str> = view
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(selected, vec!["Pink"]);
        assert!(view.advance.enabled);
    }

    #[test]
    fn test_result_view_heading_and_image() {
        let mut quiz = Quiz::default();
        for pick in ["Yellow", "Seeds", "Swamp"] {
            quiz.select_current(pick);
            quiz.advance();
        }
        let QuizView::Result(view) = render(&quiz) else {
            panic!("expected result view");
        };
        assert_eq!(view.heading, "You got: Mossy Marsh Duck!");
        assert!(view.description.starts_with("You are calm"));
        assert!(view.image_src.starts_with("data:image/svg+xml;utf8,"));
    }
}
