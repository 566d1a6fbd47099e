//! Tabular loader - first sheet of an .xlsx file → ordered row records

use crate::error::{ReconError, ReconResult};
use crate::types::{Dataset, DatasetRole, RowRecord};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

/// Loads one spreadsheet into a [`Dataset`] for the given role.
///
/// Only the first sheet is read. Row 0 is the header row; a missing header
/// cell gets the placeholder name `Column {index}`. Every data row carries
/// the full header key set, with missing cells as empty strings.
pub struct DatasetReader {
    role: DatasetRole,
}

impl DatasetReader {
    pub fn new(role: DatasetRole) -> Self {
        Self { role }
    }

    /// Load a dataset from an .xlsx file on disk
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> ReconResult<Dataset> {
        let path = path.as_ref();
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            ReconError::Read(format!("failed to open {}: {}", path.display(), e))
        })?;
        self.build_dataset(&mut workbook)
    }

    /// Load a dataset from an in-memory .xlsx buffer (uploaded file bytes)
    pub fn read_bytes(&self, bytes: &[u8]) -> ReconResult<Dataset> {
        let mut workbook = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| ReconError::Read(format!("failed to decode buffer: {}", e)))?;
        self.build_dataset(&mut workbook)
    }

    fn build_dataset<RS>(&self, workbook: &mut Xlsx<RS>) -> ReconResult<Dataset>
    where
        RS: std::io::Read + std::io::Seek,
    {
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ReconError::EmptySheet("<workbook>".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ReconError::Read(format!("sheet '{}': {}", sheet_name, e)))?;

        if range.is_empty() {
            return Err(ReconError::EmptySheet(sheet_name));
        }

        let headers = read_headers(&range);
        let rows = read_rows(&range, &headers);

        Ok(Dataset::new(self.role, headers, rows))
    }
}

/// Read the header row, substituting `Column {index}` for blank cells
fn read_headers(range: &Range<Data>) -> Vec<String> {
    let (_, width) = range.get_size();
    let mut headers = Vec::with_capacity(width);

    for col in 0..width {
        let name = match range.get((0, col)) {
            Some(Data::Empty) | None => format!("Column {}", col),
            Some(cell) => {
                let name = cell_to_string(cell);
                if name.is_empty() {
                    format!("Column {}", col)
                } else {
                    name
                }
            }
        };
        headers.push(name);
    }

    headers
}

/// Read the data rows, densifying each record to the full header set
fn read_rows(range: &Range<Data>, headers: &[String]) -> Vec<RowRecord> {
    let (height, width) = range.get_size();
    let mut rows = Vec::with_capacity(height.saturating_sub(1));

    for row in 1..height {
        let mut record = RowRecord::with_capacity(width);
        for (col, header) in headers.iter().enumerate() {
            let value = range
                .get((row, col))
                .map(cell_to_string)
                .unwrap_or_default();
            record.insert(header.clone(), value);
        }
        rows.push(record);
    }

    rows
}

/// Convert a cell to its string value. Integral floats render without a
/// trailing `.0` so numeric keys join cleanly ("42" + "1" → "42-1").
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string_variants() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("PO1".to_string())), "PO1");
        assert_eq!(cell_to_string(&Data::Float(42.0)), "42");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn test_read_bytes_rejects_garbage() {
        let reader = DatasetReader::new(DatasetRole::Customer);
        let result = reader.read_bytes(b"not a spreadsheet");
        assert!(matches!(result, Err(ReconError::Read(_))));
    }

    #[test]
    fn test_read_path_missing_file() {
        let reader = DatasetReader::new(DatasetRole::Own);
        let result = reader.read_path("/nonexistent/ledger.xlsx");
        assert!(result.is_err());
    }
}
