use super::sheet::{Cell, SheetRow};
use super::{ImportError, ImportResult};

pub const QUESTION_TEXT: &str = "Question Text";
pub const CHOICE_COLUMNS: [&str; 4] = ["Choice 1", "Choice 2", "Choice 3", "Choice 4"];
pub const CORRECT_CHOICE: &str = "Correct Choice";

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    question_text: usize,
    choices: [usize; 4],
    correct_choice: usize,
}

impl ColumnMap {
    /// Locate every required column by exact header name. The first
    /// occurrence wins when a header repeats.
    pub fn resolve(headers: &[String]) -> ImportResult<Self> {
        let position = |name: &str| headers.iter().position(|header| header == name);

        let required = std::iter::once(QUESTION_TEXT)
            .chain(CHOICE_COLUMNS)
            .chain(std::iter::once(CORRECT_CHOICE));
        let missing: Vec<&'static str> = required.filter(|name| position(*name).is_none()).collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns { missing });
        }

        let mut choices = [0; 4];
        for (slot, name) in choices.iter_mut().zip(CHOICE_COLUMNS) {
            *slot = position(name).unwrap_or_default();
        }
        Ok(Self {
            question_text: position(QUESTION_TEXT).unwrap_or_default(),
            choices,
            correct_choice: position(CORRECT_CHOICE).unwrap_or_default(),
        })
    }
}

/// One spreadsheet row, converted into the values a question is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McqRow {
    pub line: usize,
    pub question_text: String,
    pub choices: [String; 4],
    /// 1-based, exactly as written in the sheet; may be out of range.
    pub correct_choice: i64,
}

impl McqRow {
    pub fn parse(row: &SheetRow, columns: &ColumnMap) -> ImportResult<Self> {
        let text_at = |column: usize, name: &'static str| {
            cell_text(row.cell(column)).ok_or(ImportError::EmptyCell {
                line: row.line,
                column: name,
            })
        };

        let question_text = text_at(columns.question_text, QUESTION_TEXT)?;
        let [first, second, third, fourth] = columns.choices;
        let choices = [
            text_at(first, CHOICE_COLUMNS[0])?,
            text_at(second, CHOICE_COLUMNS[1])?,
            text_at(third, CHOICE_COLUMNS[2])?,
            text_at(fourth, CHOICE_COLUMNS[3])?,
        ];
        let correct_choice = cell_integer(row.cell(columns.correct_choice)).ok_or_else(|| {
            ImportError::InvalidCorrectChoice {
                line: row.line,
                value: cell_text(row.cell(columns.correct_choice)).unwrap_or_default(),
            }
        })?;

        Ok(Self {
            line: row.line,
            question_text,
            choices,
            correct_choice,
        })
    }

    /// Zero-based index of the correct choice, or `None` when the sheet
    /// named a position outside `1..=4`.
    pub fn correct_index(&self) -> Option<usize> {
        let index = usize::try_from(self.correct_choice.checked_sub(1)?).ok()?;
        (index < CHOICE_COLUMNS.len()).then_some(index)
    }
}

/// Render a cell as stored text. Integral numbers lose their `.0`.
fn cell_text(cell: &Cell) -> Option<String> {
    if cell.is_empty() {
        return None;
    }
    let text = match cell {
        Cell::Text(text) => text.trim().to_string(),
        Cell::Int(value) => value.to_string(),
        Cell::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        Cell::Float(value) => value.to_string(),
        Cell::Bool(true) => "True".to_string(),
        Cell::Bool(false) => "False".to_string(),
        Cell::Empty => return None,
    };
    Some(text)
}

/// Read a whole number the way a spreadsheet user means it: integer cells,
/// numeric text, and floats truncated toward zero.
fn cell_integer(cell: &Cell) -> Option<i64> {
    let truncate = |value: f64| value.is_finite().then(|| value.trunc() as i64);
    match cell {
        Cell::Int(value) => Some(*value),
        Cell::Float(value) => truncate(*value),
        Cell::Bool(value) => Some(i64::from(*value)),
        Cell::Text(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(truncate))
        }
        Cell::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn standard_columns() -> ColumnMap {
        ColumnMap::resolve(&headers(&[
            "Question Text",
            "Choice 1",
            "Choice 2",
            "Choice 3",
            "Choice 4",
            "Correct Choice",
        ]))
        .unwrap()
    }

    fn row(cells: Vec<Cell>) -> SheetRow {
        SheetRow { line: 2, cells }
    }

    fn text(value: &str) -> Cell {
        Cell::Text(value.to_string())
    }

    #[test]
    fn columns_resolve_in_any_order() {
        let columns = ColumnMap::resolve(&headers(&[
            "Correct Choice",
            "Notes",
            "Choice 4",
            "Choice 3",
            "Choice 2",
            "Choice 1",
            "Question Text",
        ]))
        .unwrap();

        assert_eq!(columns.correct_choice, 0);
        assert_eq!(columns.choices, [5, 4, 3, 2]);
        assert_eq!(columns.question_text, 6);
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let err = ColumnMap::resolve(&headers(&["question text", "Choice 1", "Choice 2"]))
            .unwrap_err();

        match err {
            ImportError::MissingColumns { missing } => assert_eq!(
                missing,
                ["Question Text", "Choice 3", "Choice 4", "Correct Choice"]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parses_mixed_cell_types() {
        let parsed = McqRow::parse(
            &row(vec![
                text(" 2+2=? "),
                Cell::Int(3),
                Cell::Float(4.0),
                text("5"),
                Cell::Float(6.5),
                Cell::Float(2.0),
            ]),
            &standard_columns(),
        )
        .unwrap();

        assert_eq!(parsed.question_text, "2+2=?");
        assert_eq!(parsed.choices, ["3", "4", "5", "6.5"]);
        assert_eq!(parsed.correct_choice, 2);
        assert_eq!(parsed.correct_index(), Some(1));
    }

    #[rstest]
    #[case(Cell::Int(1), Some(0))]
    #[case(Cell::Int(4), Some(3))]
    #[case(Cell::Int(0), None)]
    #[case(Cell::Int(5), None)]
    #[case(Cell::Int(7), None)]
    #[case(Cell::Int(-1), None)]
    #[case(Cell::Float(3.9), Some(2))]
    #[case(text(" 2 "), Some(1))]
    #[case(text("2.0"), Some(1))]
    fn correct_index_follows_the_sheet(#[case] correct: Cell, #[case] expected: Option<usize>) {
        let parsed = McqRow::parse(
            &row(vec![text("q"), text("a"), text("b"), text("c"), text("d"), correct]),
            &standard_columns(),
        )
        .unwrap();

        assert_eq!(parsed.correct_index(), expected);
    }

    #[rstest]
    #[case(Cell::Empty)]
    #[case(text("two"))]
    #[case(Cell::Float(f64::NAN))]
    fn unreadable_correct_choice_is_malformed(#[case] correct: Cell) {
        let err = McqRow::parse(
            &row(vec![text("q"), text("a"), text("b"), text("c"), text("d"), correct]),
            &standard_columns(),
        )
        .unwrap_err();

        assert!(matches!(err, ImportError::InvalidCorrectChoice { line: 2, .. }));
    }

    #[test]
    fn empty_choice_names_its_column() {
        let err = McqRow::parse(
            &row(vec![text("q"), text("a"), Cell::Empty, text("c"), text("d"), Cell::Int(1)]),
            &standard_columns(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ImportError::EmptyCell {
                line: 2,
                column: "Choice 2"
            }
        ));
    }

    #[test]
    fn short_rows_are_malformed() {
        let err = McqRow::parse(&row(vec![text("q"), text("a")]), &standard_columns()).unwrap_err();

        assert!(matches!(err, ImportError::EmptyCell { column: "Choice 2", .. }));
    }
}
