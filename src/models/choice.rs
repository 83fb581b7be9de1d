use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest choice text the store accepts, in characters.
pub const CHOICE_TEXT_MAX_LEN: usize = 255;

/// One candidate answer, owned by exactly one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_correct { "Correct" } else { "Incorrect" };
        write!(f, "{} ({})", self.text, verdict)
    }
}

/// A choice row as the choice list shows it: joined with its question's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceListing {
    pub choice: Choice,
    pub question_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_marks_correctness() {
        let mut choice = Choice {
            id: 1,
            question_id: 1,
            text: "4".to_string(),
            is_correct: true,
        };
        assert_eq!(choice.to_string(), "4 (Correct)");

        choice.is_correct = false;
        assert_eq!(choice.to_string(), "4 (Incorrect)");
    }
}
