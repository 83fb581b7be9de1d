mod choice;
mod question;

pub use choice::{CHOICE_TEXT_MAX_LEN, Choice, ChoiceListing};
pub use question::{Question, QuestionWithChoices};
