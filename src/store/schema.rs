use rusqlite::Connection;

use super::StoreResult;

// `IF NOT EXISTS` everywhere so opening an existing database is a no-op.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS mcq_question (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    text        TEXT    NOT NULL,
    created_at  TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS mcq_choice (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    question_id INTEGER NOT NULL REFERENCES mcq_question (id) ON DELETE CASCADE,
    text        VARCHAR(255) NOT NULL CHECK (length(text) <= 255),
    is_correct  INTEGER NOT NULL DEFAULT 0 CHECK (is_correct IN (0, 1))
);

CREATE INDEX IF NOT EXISTS mcq_choice_question_id ON mcq_choice (question_id);

CREATE TRIGGER IF NOT EXISTS mcq_question_created_at_immutable
BEFORE UPDATE OF created_at ON mcq_question
WHEN NEW.created_at IS NOT OLD.created_at
BEGIN
    SELECT RAISE(ABORT, 'mcq_question.created_at is immutable');
END;
"#;

pub(super) fn apply(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
