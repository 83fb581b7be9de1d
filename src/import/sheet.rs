use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use super::{ImportError, ImportFormat, ImportResult};

/// One cell value, independent of the file format it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Float(value) => value.is_nan(),
            Cell::Int(_) | Cell::Bool(_) => false,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(value) => Cell::Int(*value),
            Data::Float(value) => Cell::Float(*value),
            Data::String(text) => Cell::from_text(text),
            Data::Bool(value) => Cell::Bool(*value),
            Data::DateTime(value) => Cell::Float(value.as_f64()),
            Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::from_text(text),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// A data row and the 1-based line it occupies in the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub line: usize,
    pub cells: Vec<Cell>,
}

impl SheetRow {
    /// Cell at `column`; rows shorter than the header read as empty.
    pub fn cell(&self, column: usize) -> &Cell {
        self.cells.get(column).unwrap_or(&Cell::Empty)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

/// The first table of an input file: a header row followed by data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<SheetRow>,
}

impl Sheet {
    pub fn new(headers: Vec<String>, rows: Vec<SheetRow>) -> Self {
        Self { headers, rows }
    }

    pub fn load(path: &Path) -> ImportResult<Self> {
        let sheet = match ImportFormat::from_path(path) {
            Some(ImportFormat::Workbook) => load_workbook(path)?,
            Some(ImportFormat::Csv) => load_csv(path)?,
            None => {
                return Err(ImportError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        debug!(
            path = %path.display(),
            columns = sheet.headers.len(),
            rows = sheet.rows.len(),
            "loaded sheet"
        );
        Ok(sheet)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// True when the file had no header row at all.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

fn header_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(text) => text.clone(),
        Cell::Int(value) => value.to_string(),
        Cell::Float(value) => value.to_string(),
        Cell::Bool(value) => value.to_string(),
    }
}

fn load_workbook(path: &Path) -> ImportResult<Sheet> {
    let workbook_error = |source| ImportError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::NoSheets {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;

    // The range starts at the first used cell, not necessarily at A1.
    let header_line = range.start().map_or(1, |(row, _)| row as usize + 1);
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Sheet::default());
    };

    let headers = header
        .iter()
        .map(|data| header_text(&Cell::from(data)))
        .collect();
    let rows = rows
        .enumerate()
        .map(|(index, cells)| SheetRow {
            line: header_line + 1 + index,
            cells: cells.iter().map(Cell::from).collect(),
        })
        .collect();

    Ok(Sheet::new(headers, rows))
}

fn load_csv(path: &Path) -> ImportResult<Sheet> {
    let csv_error = |source| ImportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .enumerate()
        .map(|(index, name)| {
            if index == 0 {
                name.trim_start_matches('\u{feff}').to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let line = record
            .position()
            .map_or(index + 2, |position| position.line() as usize);
        rows.push(SheetRow {
            line,
            cells: record.iter().map(Cell::from_text).collect(),
        });
    }

    if headers.iter().all(String::is_empty) && rows.is_empty() {
        return Ok(Sheet::default());
    }
    Ok(Sheet::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_rows_carry_their_line_numbers() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "questions.csv",
            "\u{feff}Question Text,Correct Choice\n2+2=?,2\n,\n1+1=?\n",
        );

        let sheet = Sheet::load(&path).unwrap();

        assert_eq!(sheet.headers(), ["Question Text", "Correct Choice"]);
        let lines: Vec<_> = sheet.rows().iter().map(|row| row.line).collect();
        assert_eq!(lines, [2, 3, 4]);
        assert!(sheet.rows()[1].is_blank());
        // Short rows read as empty past their end.
        assert_eq!(sheet.rows()[2].cell(1), &Cell::Empty);
    }

    #[test]
    fn empty_csv_is_an_empty_sheet() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.csv", "");

        assert!(Sheet::load(&path).unwrap().is_empty());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "questions.txt", "Question Text\n");

        assert!(matches!(
            Sheet::load(&path),
            Err(ImportError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn blank_cells_are_empty() {
        assert!(Cell::from_text("   ").is_empty());
        assert!(Cell::Float(f64::NAN).is_empty());
        assert!(!Cell::Int(0).is_empty());
    }
}
