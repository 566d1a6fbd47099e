use crate::error::{ReconError, ReconResult};
use crate::types::Dataset;

/// The two source fields and separator a composite join key is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    pub primary: String,
    pub secondary: String,
    pub separator: String,
}

impl KeySpec {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            separator: "-".to_string(),
        }
    }
}

/// The structural highlight rule: a customer column selected by position
/// paired with an own compare field selected by name. Validated against the
/// loaded headers before any annotation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalHighlightPair {
    /// Index into the customer dataset's original header list
    pub source_index: usize,
    /// One of the own compare fields
    pub target_field: String,
}

/// Role configuration for one reconciliation run: key derivations, the own
/// fields compared per row, the positional highlight pair and the
/// pass-through field attached from the Po-only lookup.
#[derive(Debug, Clone)]
pub struct ReconConfig {
    pub customer_key: KeySpec,
    pub own_key: KeySpec,
    /// Own-ledger fields copied into the output and compared against the
    /// customer fields of the same name
    pub own_compare_fields: Vec<String>,
    pub positional_pair: PositionalHighlightPair,
    pub passthrough_field: String,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            customer_key: KeySpec::new("Document Number", "Line ID"),
            own_key: KeySpec::new("Po", "line"),
            own_compare_fields: vec![
                "BD xf-date".to_string(),
                // Header as it appears in the source files, misspelling included
                "Prouction status(SFC210)".to_string(),
                "Order QTY".to_string(),
                "Shipmod".to_string(),
                "unit price".to_string(),
            ],
            positional_pair: PositionalHighlightPair {
                source_index: 12,
                target_field: "unit price".to_string(),
            },
            passthrough_field: "Enter user".to_string(),
        }
    }
}

impl ReconConfig {
    /// Check the positional pair against the actual loaded customer headers.
    /// Fails fast instead of letting the annotator index out of bounds.
    pub fn validate_against(&self, customer: &Dataset) -> ReconResult<()> {
        if self.positional_pair.source_index >= customer.headers.len() {
            return Err(ReconError::InsufficientColumns(format!(
                "customer dataset has {} columns, positional rule needs column {}",
                customer.headers.len(),
                self.positional_pair.source_index + 1
            )));
        }
        if !self
            .own_compare_fields
            .contains(&self.positional_pair.target_field)
        {
            return Err(ReconError::InsufficientColumns(format!(
                "target field '{}' is not among the own compare fields",
                self.positional_pair.target_field
            )));
        }
        Ok(())
    }
}
