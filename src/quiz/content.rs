// Built-in duck quiz: three questions and four duck profiles.
use super::{OutcomeProfile, Question};

pub fn default_questions() -> Vec<Question> {
    vec![
        Question::new(
            "color",
            "What is your favorite color?",
            &["Blue", "Pink", "Yellow", "Red"],
        ),
        Question::new(
            "food",
            "What is your favorite food?",
            &["Bread", "Nuts", "Fruit", "Seeds"],
        ),
        Question::new(
            "habitat",
            "What is your favorite habitat?",
            &["Swamp", "City", "Mountain", "Plains"],
        ),
    ]
}

pub fn default_outcomes() -> Vec<OutcomeProfile> {
    vec![
        OutcomeProfile::new(
            "swamp",
            "Mossy Marsh Duck",
            "You are calm, observant, and quietly magical. You love peaceful waters and muddy adventures.",
            ["#79b473", "#e5f5db", "#31572c"],
        ),
        OutcomeProfile::new(
            "city",
            "Streetwise City Duck",
            "You are bold, adaptable, and full of hustle. Nothing rattles your confident city strut.",
            ["#6c63ff", "#d9d7ff", "#2d2a8c"],
        ),
        OutcomeProfile::new(
            "mountain",
            "Sky Peak Duck",
            "You are brave, curious, and always climbing to new heights with your wings spread wide.",
            ["#8ecae6", "#edf9ff", "#1d3557"],
        ),
        OutcomeProfile::new(
            "plains",
            "Golden Prairie Duck",
            "You are sunny, social, and endlessly optimistic. You make every flock feel like home.",
            ["#ffd166", "#fff5d6", "#c68b00"],
        ),
    ]
}
