//! Result exporter - annotated comparison → styled .xlsx / plain JSON,
//! plus raw dataset re-encoding for round-trip debugging

use crate::error::{ReconError, ReconResult};
use crate::types::{AnnotatedRow, Dataset};
use rust_xlsxwriter::{Color, Format, Workbook};
use std::fs;
use std::path::Path;

/// Background fill for mismatched cells
const HIGHLIGHT_COLOR: Color = Color::RGB(0xFFCCCC);

/// Serializes an annotated row set into a styled workbook or a plain JSON
/// array with the highlight metadata stripped.
pub struct ResultExporter<'a> {
    rows: &'a [AnnotatedRow],
}

impl<'a> ResultExporter<'a> {
    pub fn new(rows: &'a [AnnotatedRow]) -> Self {
        Self { rows }
    }

    /// Write the comparison workbook: one sheet, header row from the
    /// annotated field order, highlighted cells filled `#FFCCCC`.
    pub fn export_xlsx(&self, output: &Path) -> ReconResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Sheet1")
            .map_err(|e| ReconError::Export(format!("failed to set sheet name: {}", e)))?;

        let header_format = Format::new().set_bold();
        let highlight_format = Format::new().set_background_color(HIGHLIGHT_COLOR);

        if let Some(first) = self.rows.first() {
            for (col, cell) in first.cells.iter().enumerate() {
                worksheet
                    .write_string_with_format(0, col as u16, &cell.name, &header_format)
                    .map_err(|e| ReconError::Export(format!("failed to write header: {}", e)))?;
            }
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            for (col, cell) in row.cells.iter().enumerate() {
                if cell.highlighted {
                    worksheet
                        .write_string_with_format(
                            excel_row,
                            col as u16,
                            &cell.value,
                            &highlight_format,
                        )
                        .map_err(|e| {
                            ReconError::Export(format!("failed to write cell: {}", e))
                        })?;
                } else {
                    worksheet
                        .write_string(excel_row, col as u16, &cell.value)
                        .map_err(|e| {
                            ReconError::Export(format!("failed to write cell: {}", e))
                        })?;
                }
            }
        }

        workbook
            .save(output)
            .map_err(|e| ReconError::Export(format!("failed to save workbook: {}", e)))?;

        Ok(())
    }

    /// Write the value-only JSON array
    pub fn export_json(&self, output: &Path) -> ReconResult<()> {
        let json = serde_json::to_string_pretty(&result_to_json_value(self.rows))?;
        fs::write(output, json)?;
        Ok(())
    }
}

/// Annotated rows as a JSON array, field order preserved, styles stripped
pub fn result_to_json_value(rows: &[AnnotatedRow]) -> serde_json::Value {
    let array: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            let mut object = serde_json::Map::new();
            for cell in &row.cells {
                object.insert(
                    cell.name.clone(),
                    serde_json::Value::String(cell.value.clone()),
                );
            }
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::Value::Array(array)
}

/// Raw dataset as a JSON array of records, column order preserved
pub fn dataset_to_json_value(dataset: &Dataset) -> serde_json::Value {
    let array: Vec<serde_json::Value> = dataset
        .rows
        .iter()
        .map(|record| {
            let mut object = serde_json::Map::new();
            for (name, value) in record {
                object.insert(name.clone(), serde_json::Value::String(value.clone()));
            }
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::Value::Array(array)
}

/// Re-encode a raw dataset as an unstyled workbook. All cells are written
/// as strings so a re-load reproduces the records string-for-string.
pub fn export_dataset_xlsx(dataset: &Dataset, output: &Path) -> ReconResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Sheet1")
        .map_err(|e| ReconError::Export(format!("failed to set sheet name: {}", e)))?;

    for (col, header) in dataset.headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, header)
            .map_err(|e| ReconError::Export(format!("failed to write header: {}", e)))?;
    }

    for (row_idx, record) in dataset.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col, header) in dataset.headers.iter().enumerate() {
            let value = record.get(header).map(String::as_str).unwrap_or("");
            worksheet
                .write_string(excel_row, col as u16, value)
                .map_err(|e| ReconError::Export(format!("failed to write cell: {}", e)))?;
        }
    }

    workbook
        .save(output)
        .map_err(|e| ReconError::Export(format!("failed to save workbook: {}", e)))?;

    Ok(())
}

/// Write a raw dataset as a JSON array of records
pub fn export_dataset_json(dataset: &Dataset, output: &Path) -> ReconResult<()> {
    let json = serde_json::to_string_pretty(&dataset_to_json_value(dataset))?;
    fs::write(output, json)?;
    Ok(())
}
