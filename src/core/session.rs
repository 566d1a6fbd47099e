//! Session state: the two dataset slots and the most recent analysis result.
//!
//! Slots are replaced wholesale; a failed operation leaves prior state
//! intact.

use crate::config::ReconConfig;
use crate::core::{annotate, match_datasets};
use crate::error::{ReconError, ReconResult};
use crate::types::{AnnotatedRow, Dataset, DatasetRole};

#[derive(Debug, Default)]
pub struct ReconSession {
    config: ReconConfig,
    customer: Option<Dataset>,
    own: Option<Dataset>,
    result: Option<Vec<AnnotatedRow>>,
}

impl ReconSession {
    pub fn new(config: ReconConfig) -> Self {
        Self {
            config,
            customer: None,
            own: None,
            result: None,
        }
    }

    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    /// Replace a dataset slot. Any previous analysis result is stale once a
    /// source dataset changes, so it is discarded.
    pub fn load(&mut self, dataset: Dataset) {
        match dataset.role {
            DatasetRole::Customer => self.customer = Some(dataset),
            DatasetRole::Own => self.own = Some(dataset),
        }
        self.result = None;
    }

    pub fn customer(&self) -> Option<&Dataset> {
        self.customer.as_ref()
    }

    pub fn own(&self) -> Option<&Dataset> {
        self.own.as_ref()
    }

    pub fn dataset(&self, role: DatasetRole) -> Option<&Dataset> {
        match role {
            DatasetRole::Customer => self.customer(),
            DatasetRole::Own => self.own(),
        }
    }

    /// Run matching and annotation over the loaded datasets. Fails without
    /// touching prior state when either dataset is absent or the positional
    /// configuration does not fit the customer headers.
    pub fn run_analysis(&mut self) -> ReconResult<&[AnnotatedRow]> {
        let customer = self.customer.as_ref().ok_or_else(|| {
            ReconError::MissingDataset(
                "customer dataset not loaded; upload both files before analyzing".to_string(),
            )
        })?;
        let own = self.own.as_ref().ok_or_else(|| {
            ReconError::MissingDataset(
                "own dataset not loaded; upload both files before analyzing".to_string(),
            )
        })?;

        let outcomes = match_datasets(customer, own, &self.config);
        let annotated = annotate(customer, own, &outcomes, &self.config)?;

        self.result = Some(annotated);
        Ok(self.result.as_deref().unwrap_or_default())
    }

    pub fn result(&self) -> Option<&[AnnotatedRow]> {
        self.result.as_deref()
    }

    /// The last analysis result, or `MissingDataset` when none has been run
    pub fn require_result(&self) -> ReconResult<&[AnnotatedRow]> {
        self.result.as_deref().ok_or_else(|| {
            ReconError::MissingDataset(
                "no analysis result; run the analysis before exporting".to_string(),
            )
        })
    }
}
