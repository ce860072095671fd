use std::io::{Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::models::FeedbackRecord;

pub const FEEDBACK_COLUMN: &str = "feedback";

/// Rows shown in the data preview.
pub const PREVIEW_ROWS: usize = 5;

pub const SAMPLE_FEEDBACK: [&str; 5] = [
    "Great product quality and fast delivery",
    "Poor customer service experience",
    "The product meets expectations",
    "Excellent value for money",
    "Shipping was delayed but product is good",
];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("CSV must contain '{0}' column")]
    MissingColumn(String),

    #[error("entry {index} is out of range; choose one of the first {available} entries")]
    IndexOutOfRange { index: usize, available: usize },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn load_feedback(csv_path: &Path) -> Result<Vec<FeedbackRecord>, DatasetError> {
    let file = std::fs::File::open(csv_path)?;
    let records = read_feedback(file)?;
    tracing::info!(path = %csv_path.display(), entries = records.len(), "loaded feedback");
    Ok(records)
}

/// Reads every row's `feedback` cell; other columns are ignored and short
/// rows yield empty text.
pub fn read_feedback<R: Read>(reader: R) -> Result<Vec<FeedbackRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let column = reader
        .headers()?
        .iter()
        .position(|header| header.trim() == FEEDBACK_COLUMN)
        .ok_or_else(|| DatasetError::MissingColumn(FEEDBACK_COLUMN.to_string()))?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let text = row.get(column).unwrap_or_default();
        records.push(FeedbackRecord::new(text));
    }

    Ok(records)
}

/// Leading rows of the table with every column, for a quick look at the input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn load_preview(csv_path: &Path, limit: usize) -> Result<DataPreview, DatasetError> {
    let file = std::fs::File::open(csv_path)?;
    read_preview(file, limit)
}

pub fn read_preview<R: Read>(reader: R, limit: usize) -> Result<DataPreview, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records().take(limit) {
        let row = result?;
        let mut cells: Vec<String> = row.iter().map(str::to_string).collect();
        cells.resize(headers.len().max(cells.len()), String::new());
        rows.push(cells);
    }

    Ok(DataPreview { headers, rows })
}

/// Only the first `choices` records are offered for summarization.
pub fn choose_for_summary(
    records: &[FeedbackRecord],
    index: usize,
    choices: usize,
) -> Result<&FeedbackRecord, DatasetError> {
    let available = records.len().min(choices);
    if index >= available {
        return Err(DatasetError::IndexOutOfRange { index, available });
    }
    Ok(&records[index])
}

pub fn sample_records() -> Vec<FeedbackRecord> {
    SAMPLE_FEEDBACK.iter().map(|text| FeedbackRecord::new(*text)).collect()
}

pub fn write_sample<W: Write>(writer: W) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([FEEDBACK_COLUMN])?;
    for text in SAMPLE_FEEDBACK {
        writer.write_record([text])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_feedback_column_among_others() {
        let data = "id,feedback,rating\n1,Great product,5\n2,\"Slow, but fine\",3\n";
        let records = read_feedback(Cursor::new(data)).unwrap();
        assert_eq!(
            records,
            vec![
                FeedbackRecord::new("Great product"),
                FeedbackRecord::new("Slow, but fine"),
            ]
        );
    }

    #[test]
    fn missing_column_is_reported() {
        let data = "id,comment\n1,hello\n";
        let err = read_feedback(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(ref column) if column == "feedback"));
        assert_eq!(err.to_string(), "CSV must contain 'feedback' column");
    }

    #[test]
    fn short_rows_become_empty_text() {
        let data = "id,feedback\n1\n2,ok\n";
        let records = read_feedback(Cursor::new(data)).unwrap();
        assert_eq!(records[0].text, "");
        assert_eq!(records[1].text, "ok");
    }

    #[test]
    fn sample_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample_feedback.csv");
        write_sample(std::fs::File::create(&path).unwrap()).unwrap();

        let records = load_feedback(&path).unwrap();
        assert_eq!(records, sample_records());
    }

    #[test]
    fn summary_choice_within_leading_entries() {
        let records = sample_records();
        let chosen = choose_for_summary(&records, 4, 5).unwrap();
        assert_eq!(chosen.text, "Shipping was delayed but product is good");

        let err = choose_for_summary(&records, 5, 5).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::IndexOutOfRange {
                index: 5,
                available: 5
            }
        ));
    }

    #[test]
    fn summary_choice_limited_by_choices_and_size() {
        let records = sample_records();
        assert!(matches!(
            choose_for_summary(&records, 2, 2),
            Err(DatasetError::IndexOutOfRange {
                index: 2,
                available: 2
            })
        ));
        assert!(matches!(
            choose_for_summary(&records, 0, 0),
            Err(DatasetError::IndexOutOfRange {
                available: 0,
                ..
            })
        ));
        assert!(matches!(
            choose_for_summary(&[], 0, 5),
            Err(DatasetError::IndexOutOfRange {
                index: 0,
                available: 0
            })
        ));
    }

    #[test]
    fn preview_keeps_all_columns_of_leading_rows() {
        let data = "id,feedback,rating\n1,Great,5\n2,Poor\n3,Fine,4\n";
        let preview = read_preview(Cursor::new(data), 2).unwrap();
        assert_eq!(preview.headers, vec!["id", "feedback", "rating"]);
        assert_eq!(
            preview.rows,
            vec![vec!["1", "Great", "5"], vec!["2", "Poor", ""]]
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_feedback(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
