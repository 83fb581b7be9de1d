//! Bulk import of questions from spreadsheet files.
//!
//! Every data row becomes one question with exactly four choices. The
//! choice whose position matches `Correct Choice` (1-based) is flagged
//! correct; a value outside `1..=4` leaves all four incorrect unless the
//! import runs in strict mode.

mod error;
mod format;
mod row;
mod sheet;

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::store::{Store, StoreResult};

pub use error::{ImportError, ImportResult};
pub use format::ImportFormat;
pub use row::{CHOICE_COLUMNS, CORRECT_CHOICE, ColumnMap, McqRow, QUESTION_TEXT};
pub use sheet::{Cell, Sheet, SheetRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Wrap the whole run in one transaction so a failure persists nothing.
    /// When off, rows before the failing one stay committed.
    pub atomic: bool,
    /// Reject a `Correct Choice` outside `1..=4` instead of importing the
    /// row with no correct choice.
    pub strict: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows: usize,
    pub questions: usize,
    pub choices: usize,
    /// Sheet lines imported with no choice marked correct.
    pub without_correct: Vec<usize>,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MCQs imported successfully.", self.rows)
    }
}

/// Load `path` and import every row into `store`.
pub fn import_file<P: AsRef<Path>>(
    store: &Store,
    path: P,
    options: ImportOptions,
) -> ImportResult<ImportSummary> {
    let path = path.as_ref();
    let sheet = Sheet::load(path)?;
    info!(
        path = %path.display(),
        rows = sheet.rows().len(),
        atomic = options.atomic,
        strict = options.strict,
        "importing MCQs"
    );

    let summary = import_sheet(store, &sheet, options)?;
    info!(
        rows = summary.rows,
        questions = summary.questions,
        choices = summary.choices,
        without_correct = summary.without_correct.len(),
        "MCQ import finished"
    );
    Ok(summary)
}

/// Import an already loaded sheet. Required columns are checked before
/// anything is written.
pub fn import_sheet(
    store: &Store,
    sheet: &Sheet,
    options: ImportOptions,
) -> ImportResult<ImportSummary> {
    if sheet.is_empty() {
        return Ok(ImportSummary::default());
    }
    let columns = ColumnMap::resolve(sheet.headers())?;

    if options.atomic {
        store.atomic(|store| import_rows(store, sheet, &columns, options))
    } else {
        import_rows(store, sheet, &columns, options)
    }
}

fn import_rows(
    store: &Store,
    sheet: &Sheet,
    columns: &ColumnMap,
    options: ImportOptions,
) -> ImportResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    for row in sheet.rows() {
        if row.is_blank() {
            debug!(line = row.line, "skipping blank row");
            continue;
        }

        let mcq = McqRow::parse(row, columns)?;
        let correct = mcq.correct_index();
        if correct.is_none() {
            if options.strict {
                return Err(ImportError::CorrectChoiceOutOfRange {
                    line: mcq.line,
                    value: mcq.correct_choice,
                });
            }
            warn!(
                line = mcq.line,
                correct_choice = mcq.correct_choice,
                "correct choice is outside 1..=4, no choice will be marked correct"
            );
            summary.without_correct.push(mcq.line);
        }

        store_row(store, &mcq, correct).map_err(|source| ImportError::Store {
            line: mcq.line,
            source,
        })?;
        summary.rows += 1;
        summary.questions += 1;
        summary.choices += mcq.choices.len();
    }

    Ok(summary)
}

fn store_row(store: &Store, mcq: &McqRow, correct: Option<usize>) -> StoreResult<()> {
    let question = store.create_question(&mcq.question_text)?;
    for (index, text) in mcq.choices.iter().enumerate() {
        store.create_choice(question.id, text, Some(index) == correct)?;
    }
    debug!(line = mcq.line, question_id = question.id, "imported row");
    Ok(())
}
