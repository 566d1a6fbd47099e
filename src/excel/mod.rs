//! Spreadsheet I/O: first-sheet tabular loading and styled result export

pub mod reader;
pub mod writer;

pub use reader::DatasetReader;
pub use writer::{
    dataset_to_json_value, export_dataset_json, export_dataset_xlsx, result_to_json_value,
    ResultExporter,
};
