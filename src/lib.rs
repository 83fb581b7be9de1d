//! # mcq-admin
//!
//! Storage, spreadsheet import and a terminal admin console for
//! multiple-choice questions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mcq_admin::import::{import_file, ImportOptions};
//! use mcq_admin::store::Store;
//!
//! fn main() -> Result<(), mcq_admin::Error> {
//!     let store = Store::open("mcq.sqlite3")?;
//!
//!     // One question and four choices per spreadsheet row.
//!     let summary = import_file(&store, "questions.xlsx", ImportOptions::default())?;
//!     println!("{summary}");
//!
//!     store.close()?;
//!     Ok(())
//! }
//! ```

pub mod admin;
pub mod config;
pub mod import;
pub mod logging;
pub mod models;
pub mod store;

use std::io;

use thiserror::Error;

pub use config::Config;
pub use import::{ImportError, ImportOptions, ImportSummary};
pub use models::{Choice, ChoiceListing, Question, QuestionWithChoices};
pub use store::{Store, StoreError};

/// Error type for every fallible operation the binary performs.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Logging(#[from] logging::LoggingError),

    #[error("failed to write the export")]
    Export(#[from] serde_json::Error),

    #[error("I/O error")]
    Io(#[from] io::Error),
}

/// Render an error and all of its sources as one line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_chain_includes_sources() {
        let err = ImportError::Store {
            line: 3,
            source: StoreError::QuestionNotFound(7),
        };
        assert_eq!(
            error_chain(&err),
            "row 3: failed to store the question: question 7 does not exist"
        );
    }

    #[test]
    fn transparent_errors_do_not_repeat_themselves() {
        let err = Error::from(StoreError::ChoiceNotFound(2));
        assert_eq!(error_chain(&err), "choice 2 does not exist");
    }
}
