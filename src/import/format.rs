use std::path::Path;

/// Input file kinds the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// Excel or OpenDocument workbook; only the first sheet is read.
    Workbook,
    /// Comma-separated values with a header line.
    Csv,
}

impl ImportFormat {
    pub fn extensions(&self) -> &[&'static str] {
        match self {
            ImportFormat::Workbook => &["xlsx", "xlsm", "xlsb", "xls", "ods"],
            ImportFormat::Csv => &["csv"],
        }
    }

    /// Detect the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        [ImportFormat::Workbook, ImportFormat::Csv]
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("questions.xlsx", Some(ImportFormat::Workbook))]
    #[case("legacy.XLS", Some(ImportFormat::Workbook))]
    #[case("export.ods", Some(ImportFormat::Workbook))]
    #[case("dir/questions.csv", Some(ImportFormat::Csv))]
    #[case("questions.json", None)]
    #[case("questions", None)]
    fn detects_format_from_extension(#[case] path: &str, #[case] expected: Option<ImportFormat>) {
        assert_eq!(ImportFormat::from_path(Path::new(path)), expected);
    }
}
