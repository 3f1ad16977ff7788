use crate::domain::ports::TabularReader;
use crate::domain::services::reconciliation::ParsedTable;
use crate::error::AppError;
use csv::ReaderBuilder;

/// CSV-backed reader. Rows are kept as raw strings; short rows are padded so
/// downstream column lookups never index out of bounds.
pub struct CsvReader;

impl CsvReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularReader for CsvReader {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedTable, AppError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::Validation(format!("unreadable header row: {e}")))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.is_empty() {
            return Err(AppError::Validation("file has no header row".into()));
        }

        let width = headers.len();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| AppError::Validation(format!("malformed row: {e}")))?;
            let mut row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(ParsedTable { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_rows() {
        let data = b"name,phone\nAna,555-1234\nBob,555-9999\n";
        let table = CsvReader::new().parse(data).unwrap();
        assert_eq!(table.headers, vec!["name", "phone"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Ana", "555-1234"]);
    }

    #[test]
    fn pads_short_rows_to_header_width() {
        let data = b"name,phone,notes\nAna,555-1234\n";
        let table = CsvReader::new().parse(data).unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], "");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(CsvReader::new().parse(b"").is_err());
    }
}
