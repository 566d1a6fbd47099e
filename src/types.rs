use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

//==============================================================================
// Datasets
//==============================================================================

/// One spreadsheet data row: column name → cell value, in header order.
/// Insertion order is significant — it determines export column order.
pub type RowRecord = IndexMap<String, String>;

/// Look up a field on a record, treating absent fields as empty.
pub fn field<'a>(record: &'a RowRecord, name: &str) -> &'a str {
    record.get(name).map(String::as_str).unwrap_or("")
}

/// Which of the two session datasets a file was loaded as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetRole {
    Customer,
    Own,
}

impl DatasetRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetRole::Customer => "customer",
            DatasetRole::Own => "own",
        }
    }

    /// Default output file stem for raw exports ("customer_data", "own_data")
    pub fn file_stem(&self) -> &'static str {
        match self {
            DatasetRole::Customer => "customer_data",
            DatasetRole::Own => "own_data",
        }
    }
}

impl std::str::FromStr for DatasetRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(DatasetRole::Customer),
            "own" => Ok(DatasetRole::Own),
            _ => Err(format!("Unknown role: {}. Use customer or own", s)),
        }
    }
}

impl std::fmt::Display for DatasetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered sequence of row records sharing one header set, representing
/// one uploaded spreadsheet. Immutable once loaded; a re-load replaces it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub role: DatasetRole,
    pub headers: Vec<String>,
    pub rows: Vec<RowRecord>,
}

impl Dataset {
    pub fn new(role: DatasetRole, headers: Vec<String>, rows: Vec<RowRecord>) -> Self {
        Self {
            role,
            headers,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//==============================================================================
// Match outcomes
//==============================================================================

/// How a customer row fared against the own ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Composite key (`Document Number-Line ID` vs `Po-line`) matched
    Matched,
    /// Only the pre-hyphen prefix of `Document Number` matched an own `Po`
    MatchedFallback,
    Unmatched,
}

impl MatchStatus {
    /// Status label as it appears in the comparison output
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "Match",
            MatchStatus::MatchedFallback => "Match (without hyphen)",
            MatchStatus::Unmatched => "No Match",
        }
    }

    pub fn is_matched(&self) -> bool {
        !matches!(self, MatchStatus::Unmatched)
    }
}

/// Per-customer-row match result. `own_index` points into the own dataset's
/// row vector; the own dataset itself is never mutated by matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub status: MatchStatus,
    pub own_index: Option<usize>,
    /// `Enter user` value from the independent Po-only lookup. This lookup
    /// can succeed when the match failed, and can name a different own row
    /// than `own_index` does.
    pub enter_user: Option<String>,
}

impl MatchOutcome {
    pub fn unmatched() -> Self {
        Self {
            status: MatchStatus::Unmatched,
            own_index: None,
            enter_user: None,
        }
    }
}

//==============================================================================
// Annotated rows
//==============================================================================

/// One cell of the comparison output, with its export style flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedCell {
    pub name: String,
    pub value: String,
    pub highlighted: bool,
}

impl AnnotatedCell {
    pub fn plain(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            highlighted: false,
        }
    }
}

/// The final per-customer-row record: original fields in original order,
/// extended with serial number, match status, the copied own-ledger fields
/// and the `Enter user` pass-through. Rebuilt wholesale on each analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotatedRow {
    pub cells: Vec<AnnotatedCell>,
}

impl AnnotatedRow {
    pub fn push(&mut self, cell: AnnotatedCell) {
        self.cells.push(cell);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value of the first cell with the given name, empty if absent
    pub fn value(&self, name: &str) -> &str {
        self.cells
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
            .unwrap_or("")
    }

    pub fn is_highlighted(&self, name: &str) -> bool {
        self.cells
            .iter()
            .find(|c| c.name == name)
            .is_some_and(|c| c.highlighted)
    }

    /// Cell names in export order
    pub fn names(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.name.as_str()).collect()
    }
}
