use rusqlite::{OptionalExtension, Row, params};
use tracing::debug;

use super::{Store, StoreError, StoreResult, require_text};
use crate::models::{CHOICE_TEXT_MAX_LEN, Choice, ChoiceListing};

const CHOICE_COLUMNS: &str = "id, question_id, text, is_correct";

pub(super) fn row_to_choice(row: &Row<'_>) -> rusqlite::Result<Choice> {
    Ok(Choice {
        id: row.get(0)?,
        question_id: row.get(1)?,
        text: row.get(2)?,
        is_correct: row.get(3)?,
    })
}

fn validate_choice_text(text: &str) -> StoreResult<&str> {
    let text = require_text("choice text", text)?;
    let len = text.chars().count();
    if len > CHOICE_TEXT_MAX_LEN {
        return Err(StoreError::TextTooLong {
            len,
            max: CHOICE_TEXT_MAX_LEN,
        });
    }
    Ok(text)
}

impl Store {
    /// Attach a new choice to an existing question.
    pub fn create_choice(
        &self,
        question_id: i64,
        text: &str,
        is_correct: bool,
    ) -> StoreResult<Choice> {
        let text = validate_choice_text(text)?;
        if !self.question_exists(question_id)? {
            return Err(StoreError::QuestionNotFound(question_id));
        }

        self.conn.execute(
            "INSERT INTO mcq_choice (question_id, text, is_correct) VALUES (?1, ?2, ?3)",
            params![question_id, text, is_correct],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(choice_id = id, question_id, is_correct, "created choice");

        Ok(Choice {
            id,
            question_id,
            text: text.to_string(),
            is_correct,
        })
    }

    /// Look up one choice.
    pub fn choice(&self, id: i64) -> StoreResult<Option<Choice>> {
        let choice = self
            .conn
            .query_row(
                &format!("SELECT {CHOICE_COLUMNS} FROM mcq_choice WHERE id = ?1"),
                [id],
                row_to_choice,
            )
            .optional()?;
        Ok(choice)
    }

    /// Choices of one question in the order they were created.
    pub fn choices_for(&self, question_id: i64) -> StoreResult<Vec<Choice>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CHOICE_COLUMNS} FROM mcq_choice WHERE question_id = ?1 ORDER BY id"
        ))?;
        let choices = stmt
            .query_map([question_id], row_to_choice)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(choices)
    }

    /// Replace a choice's text and correctness in place.
    pub fn update_choice(&self, id: i64, text: &str, is_correct: bool) -> StoreResult<Choice> {
        let text = validate_choice_text(text)?;
        let affected = self.conn.execute(
            "UPDATE mcq_choice SET text = ?1, is_correct = ?2 WHERE id = ?3",
            params![text, is_correct, id],
        )?;
        if affected == 0 {
            return Err(StoreError::ChoiceNotFound(id));
        }
        self.choice(id)?.ok_or(StoreError::ChoiceNotFound(id))
    }

    /// Delete one choice, leaving its question in place.
    pub fn delete_choice(&self, id: i64) -> StoreResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM mcq_choice WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(StoreError::ChoiceNotFound(id));
        }
        debug!(choice_id = id, "deleted choice");
        Ok(())
    }

    /// Choices joined with their question text, newest first, optionally
    /// narrowed to one correctness value.
    pub fn list_choices(&self, is_correct: Option<bool>) -> StoreResult<Vec<ChoiceListing>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.question_id, c.text, c.is_correct, q.text \
             FROM mcq_choice c JOIN mcq_question q ON q.id = c.question_id \
             WHERE ?1 IS NULL OR c.is_correct = ?1 \
             ORDER BY c.id DESC",
        )?;
        let listings = stmt
            .query_map([is_correct], |row| {
                Ok(ChoiceListing {
                    choice: row_to_choice(row)?,
                    question_text: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(listings)
    }

    /// Total number of stored choices.
    pub fn count_choices(&self) -> StoreResult<usize> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM mcq_choice", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> Store {
        let store = Store::open_in_memory().unwrap();
        let question = store.create_question("2+2=?").unwrap();
        for (text, is_correct) in [("3", false), ("4", true), ("5", false), ("6", false)] {
            store.create_choice(question.id, text, is_correct).unwrap();
        }
        store
    }

    #[rstest]
    #[case(None, 4)]
    #[case(Some(true), 1)]
    #[case(Some(false), 3)]
    fn list_filters_by_correctness(store: Store, #[case] filter: Option<bool>, #[case] count: usize) {
        let listings = store.list_choices(filter).unwrap();

        assert_eq!(listings.len(), count);
        assert!(listings.iter().all(|l| l.question_text == "2+2=?"));
        if let Some(flag) = filter {
            assert!(listings.iter().all(|l| l.choice.is_correct == flag));
        }
    }

    #[rstest]
    fn choices_keep_creation_order(store: Store) {
        let question_id = store.list_questions().unwrap()[0].id;
        let texts: Vec<_> = store
            .choices_for(question_id)
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, ["3", "4", "5", "6"]);
    }

    #[rstest]
    fn update_replaces_text_and_flag(store: Store) {
        let question_id = store.list_questions().unwrap()[0].id;
        let first = store.choices_for(question_id).unwrap()[0].clone();

        let updated = store.update_choice(first.id, "three", true).unwrap();

        assert_eq!(updated.text, "three");
        assert!(updated.is_correct);
        assert_eq!(updated.question_id, question_id);
    }

    #[rstest]
    fn text_length_is_bounded(store: Store) {
        let question_id = store.list_questions().unwrap()[0].id;
        let longest = "x".repeat(CHOICE_TEXT_MAX_LEN);
        let too_long = "x".repeat(CHOICE_TEXT_MAX_LEN + 1);

        assert!(store.create_choice(question_id, &longest, false).is_ok());
        assert!(matches!(
            store.create_choice(question_id, &too_long, false),
            Err(StoreError::TextTooLong { len: 256, max: 255 })
        ));
    }

    #[rstest]
    fn orphan_choices_are_rejected(store: Store) {
        assert!(matches!(
            store.create_choice(999, "lost", false),
            Err(StoreError::QuestionNotFound(999))
        ));
    }

    #[rstest]
    fn delete_removes_only_that_choice(store: Store) {
        let question_id = store.list_questions().unwrap()[0].id;
        let first = store.choices_for(question_id).unwrap()[0].id;

        store.delete_choice(first).unwrap();

        assert!(store.choice(first).unwrap().is_none());
        assert_eq!(store.count_choices().unwrap(), 3);
        assert!(matches!(
            store.delete_choice(first),
            Err(StoreError::ChoiceNotFound(_))
        ));
    }
}
