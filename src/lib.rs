//! Ledger reconciliation: match a customer purchase-order ledger against an
//! internal production ledger and export an annotated comparison.
//!
//! The pipeline:
//! - load each .xlsx file's first sheet into ordered row records
//! - derive a composite join key per row (`Document Number-Line ID` vs
//!   `Po-line`) and left-join customer rows onto the own ledger, with a
//!   hyphen-prefix fallback for rows the composite key misses
//! - flag per-cell discrepancies between the copied own-ledger fields and
//!   the customer fields of the same name
//! - export the annotated rows as a styled workbook (mismatches filled
//!   `#FFCCCC`) or a plain JSON array
//!
//! # Example
//!
//! ```no_run
//! use ledger_recon::config::ReconConfig;
//! use ledger_recon::core::ReconSession;
//! use ledger_recon::excel::{DatasetReader, ResultExporter};
//! use ledger_recon::types::DatasetRole;
//!
//! let mut session = ReconSession::new(ReconConfig::default());
//! session.load(DatasetReader::new(DatasetRole::Customer).read_path("customer.xlsx")?);
//! session.load(DatasetReader::new(DatasetRole::Own).read_path("own.xlsx")?);
//!
//! session.run_analysis()?;
//! let rows = session.require_result()?;
//! ResultExporter::new(rows).export_xlsx("comparison_result.xlsx".as_ref())?;
//! # Ok::<(), ledger_recon::error::ReconError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use config::{KeySpec, PositionalHighlightPair, ReconConfig};
pub use error::{ReconError, ReconResult};
pub use types::{AnnotatedRow, Dataset, DatasetRole, MatchOutcome, MatchStatus, RowRecord};
