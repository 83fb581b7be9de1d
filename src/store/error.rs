use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database query failed")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to close the database")]
    Close(#[source] rusqlite::Error),

    #[error("question {0} does not exist")]
    QuestionNotFound(i64),

    #[error("choice {0} does not exist")]
    ChoiceNotFound(i64),

    #[error("{field} must not be empty")]
    EmptyText { field: &'static str },

    #[error("choice text is {len} characters long, the limit is {max}")]
    TextTooLong { len: usize, max: usize },
}

pub type StoreResult<T> = Result<T, StoreError>;
