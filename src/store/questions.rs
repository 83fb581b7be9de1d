use std::collections::BTreeMap;

use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use tracing::{debug, info};

use super::choices::row_to_choice;
use super::{Store, StoreError, StoreResult, require_text};
use crate::models::{Question, QuestionWithChoices};

const QUESTION_COLUMNS: &str = "id, text, created_at";

fn row_to_question(row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        text: row.get(1)?,
        created_at: row.get(2)?,
    })
}

/// Escape `LIKE` wildcards so a search word matches literally.
fn like_pattern(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len() + 2);
    escaped.push('%');
    for c in word.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl Store {
    /// Insert a question stamped with the current time.
    pub fn create_question(&self, text: &str) -> StoreResult<Question> {
        let text = require_text("question text", text)?;
        let created_at = Utc::now();

        self.conn.execute(
            "INSERT INTO mcq_question (text, created_at) VALUES (?1, ?2)",
            params![text, created_at],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(question_id = id, "created question");

        Ok(Question {
            id,
            text: text.to_string(),
            created_at,
        })
    }

    /// Look up one question.
    pub fn question(&self, id: i64) -> StoreResult<Option<Question>> {
        let question = self
            .conn
            .query_row(
                &format!("SELECT {QUESTION_COLUMNS} FROM mcq_question WHERE id = ?1"),
                [id],
                row_to_question,
            )
            .optional()?;
        Ok(question)
    }

    pub(super) fn question_exists(&self, id: i64) -> StoreResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM mcq_question WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// All questions, newest first.
    pub fn list_questions(&self) -> StoreResult<Vec<Question>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} FROM mcq_question ORDER BY id DESC"
        ))?;
        let questions = stmt
            .query_map([], row_to_question)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(questions)
    }

    /// Questions whose text contains every whitespace-separated word of
    /// `term`, newest first. ASCII letters match case-insensitively.
    pub fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let patterns: Vec<String> = term.split_whitespace().map(like_pattern).collect();
        if patterns.is_empty() {
            return self.list_questions();
        }

        let conditions = (1..=patterns.len())
            .map(|n| format!("text LIKE ?{n} ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" AND ");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} FROM mcq_question WHERE {conditions} ORDER BY id DESC"
        ))?;
        let questions = stmt
            .query_map(params_from_iter(patterns.iter()), row_to_question)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(term, matches = questions.len(), "searched questions");
        Ok(questions)
    }

    /// Replace a question's text. `created_at` is left untouched.
    pub fn update_question(&self, id: i64, text: &str) -> StoreResult<Question> {
        let text = require_text("question text", text)?;
        let affected = self.conn.execute(
            "UPDATE mcq_question SET text = ?1 WHERE id = ?2",
            params![text, id],
        )?;
        if affected == 0 {
            return Err(StoreError::QuestionNotFound(id));
        }
        self.question(id)?.ok_or(StoreError::QuestionNotFound(id))
    }

    /// Delete a question. Returns how many choices went with it.
    pub fn delete_question(&self, id: i64) -> StoreResult<usize> {
        let choices: usize = self.conn.query_row(
            "SELECT COUNT(*) FROM mcq_choice WHERE question_id = ?1",
            [id],
            |row| row.get(0),
        )?;
        let affected = self
            .conn
            .execute("DELETE FROM mcq_question WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(StoreError::QuestionNotFound(id));
        }

        info!(question_id = id, choices, "deleted question");
        Ok(choices)
    }

    /// Total number of stored questions.
    pub fn count_questions(&self) -> StoreResult<usize> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM mcq_question", [], |row| row.get(0))?;
        Ok(count)
    }

    /// One question with its choices in the order they were created.
    pub fn question_with_choices(&self, id: i64) -> StoreResult<Option<QuestionWithChoices>> {
        let Some(question) = self.question(id)? else {
            return Ok(None);
        };
        let choices = self.choices_for(id)?;
        Ok(Some(QuestionWithChoices { question, choices }))
    }

    /// Every question with its choices, oldest first.
    pub fn export_all(&self) -> StoreResult<Vec<QuestionWithChoices>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, question_id, text, is_correct FROM mcq_choice ORDER BY id")?;
        let mut choices_by_question: BTreeMap<i64, Vec<_>> = BTreeMap::new();
        for choice in stmt.query_map([], row_to_choice)? {
            let choice = choice?;
            choices_by_question
                .entry(choice.question_id)
                .or_default()
                .push(choice);
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} FROM mcq_question ORDER BY id"
        ))?;
        let exported = stmt
            .query_map([], row_to_question)?
            .map(|question| -> StoreResult<QuestionWithChoices> {
                let question = question?;
                let choices = choices_by_question.remove(&question.id).unwrap_or_default();
                Ok(QuestionWithChoices { question, choices })
            })
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(exported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> Store {
        let store = Store::open_in_memory().unwrap();
        for text in [
            "What is the capital of France?",
            "Which planet is known as the Red Planet?",
            "What is 50% of 10?",
            "Who wrote Hamlet?",
        ] {
            store.create_question(text).unwrap();
        }
        store
    }

    #[rstest]
    fn list_is_newest_first(store: Store) {
        let texts: Vec<_> = store
            .list_questions()
            .unwrap()
            .into_iter()
            .map(|q| q.text)
            .collect();
        assert_eq!(texts.first().map(String::as_str), Some("Who wrote Hamlet?"));
        assert_eq!(
            texts.last().map(String::as_str),
            Some("What is the capital of France?")
        );
    }

    #[rstest]
    #[case("capital", &["What is the capital of France?"])]
    #[case("PLANET red", &["Which planet is known as the Red Planet?"])]
    #[case("what", &["What is 50% of 10?", "What is the capital of France?"])]
    #[case("50%", &["What is 50% of 10?"])]
    #[case("%", &["What is 50% of 10?"])]
    #[case("_", &[])]
    #[case("hamlet france", &[])]
    fn search_matches_every_word(store: Store, #[case] term: &str, #[case] expected: &[&str]) {
        let found: Vec<_> = store
            .search_questions(term)
            .unwrap()
            .into_iter()
            .map(|q| q.text)
            .collect();
        assert_eq!(found, expected);
    }

    #[rstest]
    fn blank_search_lists_everything(store: Store) {
        assert_eq!(store.search_questions("   ").unwrap().len(), 4);
    }

    #[rstest]
    fn update_keeps_created_at(store: Store) {
        let original = store.create_question("2+2=?").unwrap();
        let updated = store.update_question(original.id, "2 + 2 = ?").unwrap();

        assert_eq!(updated.text, "2 + 2 = ?");
        assert_eq!(updated.created_at, original.created_at);
    }

    #[rstest]
    fn empty_text_is_rejected(store: Store) {
        assert!(matches!(
            store.create_question("  "),
            Err(StoreError::EmptyText { .. })
        ));
    }

    #[rstest]
    fn unknown_ids_are_reported(store: Store) {
        assert!(matches!(
            store.update_question(999, "x"),
            Err(StoreError::QuestionNotFound(999))
        ));
        assert!(matches!(
            store.delete_question(999),
            Err(StoreError::QuestionNotFound(999))
        ));
        assert!(store.question_with_choices(999).unwrap().is_none());
    }

    #[rstest]
    fn export_nests_choices_oldest_first(store: Store) {
        let first = store.list_questions().unwrap().pop().unwrap();
        store.create_choice(first.id, "Paris", true).unwrap();
        store.create_choice(first.id, "Lyon", false).unwrap();

        let exported = store.export_all().unwrap();

        assert_eq!(exported.len(), 4);
        assert_eq!(exported[0].question, first);
        assert_eq!(exported[0].correct_positions(), vec![0]);
        assert!(exported[1].choices.is_empty());
    }
}
