use thiserror::Error;

pub type ReconResult<T> = Result<T, ReconError>;

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read spreadsheet: {0}")]
    Read(String),

    #[error("sheet '{0}' has no header row")]
    EmptySheet(String),

    #[error("{0}")]
    MissingDataset(String),

    #[error("positional highlight configuration invalid: {0}")]
    InsufficientColumns(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export failed: {0}")]
    Export(String),
}
