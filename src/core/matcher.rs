//! Composite-key derivation and the customer → own ledger join.
//!
//! This is an exact-equality join, not fuzzy matching: every pass scans the
//! own dataset in order and the first equal key wins.

use crate::config::{KeySpec, ReconConfig};
use crate::types::{field, Dataset, MatchOutcome, MatchStatus, RowRecord};

/// Derive the composite join key for a record: `"{primary}-{secondary}"`.
///
/// Returns the empty string when either source field is missing or empty.
/// The empty key is a deliberate non-match sentinel - it never matches
/// anything, even another empty key.
pub fn derive_key(record: &RowRecord, spec: &KeySpec) -> String {
    let primary = field(record, &spec.primary);
    let secondary = field(record, &spec.secondary);

    if primary.is_empty() || secondary.is_empty() {
        return String::new();
    }

    format!("{}{}{}", primary, spec.separator, secondary)
}

/// The substring before the first hyphen; the whole value when there is none
fn hyphen_prefix(value: &str) -> &str {
    value.split('-').next().unwrap_or(value)
}

/// Join customer rows against the own ledger. One outcome per customer row,
/// customer order preserved; the own dataset is never mutated.
///
/// Three passes per row:
/// 1. Primary: composite-key equality (`Document Number-Line ID` vs `Po-line`).
/// 2. Fallback, for rows the primary pass left unmatched: the pre-hyphen
///    prefix of the customer primary field against the own primary field.
/// 3. Independent lookup, regardless of match status: the raw customer
///    primary field against the own primary field, attaching the pass-through
///    field (`Enter user`). This may name a different own row than passes
///    1-2, and that divergence is intentional.
pub fn match_datasets(
    customer: &Dataset,
    own: &Dataset,
    config: &ReconConfig,
) -> Vec<MatchOutcome> {
    let own_keys: Vec<String> = own
        .rows
        .iter()
        .map(|row| derive_key(row, &config.own_key))
        .collect();

    customer
        .rows
        .iter()
        .map(|row| match_row(row, own, &own_keys, config))
        .collect()
}

fn match_row(
    customer_row: &RowRecord,
    own: &Dataset,
    own_keys: &[String],
    config: &ReconConfig,
) -> MatchOutcome {
    let mut outcome = MatchOutcome::unmatched();

    // Primary pass: composite key, empty sentinel excluded
    let key = derive_key(customer_row, &config.customer_key);
    if !key.is_empty() {
        if let Some(index) = own_keys.iter().position(|k| *k == key) {
            outcome.status = MatchStatus::Matched;
            outcome.own_index = Some(index);
        }
    }

    let raw_primary = field(customer_row, &config.customer_key.primary);

    // Fallback pass: pre-hyphen prefix against the own primary field.
    // Unkeyable rows (empty composite key) never match, so they are not
    // eligible for the fallback either.
    if outcome.status == MatchStatus::Unmatched && !key.is_empty() {
        let prefix = hyphen_prefix(raw_primary);
        if !prefix.is_empty() {
            if let Some(index) = own
                .rows
                .iter()
                .position(|row| field(row, &config.own_key.primary) == prefix)
            {
                outcome.status = MatchStatus::MatchedFallback;
                outcome.own_index = Some(index);
            }
        }
    }

    // Independent pass-through lookup on the raw (unsplit) primary field
    if !raw_primary.is_empty() {
        outcome.enter_user = own
            .rows
            .iter()
            .find(|row| field(row, &config.own_key.primary) == raw_primary)
            .map(|row| field(row, &config.passthrough_field).to_string());
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DatasetRole;

    fn record(pairs: &[(&str, &str)]) -> RowRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn customer_dataset(rows: Vec<RowRecord>) -> Dataset {
        Dataset::new(
            DatasetRole::Customer,
            vec!["Document Number".to_string(), "Line ID".to_string()],
            rows,
        )
    }

    fn own_dataset(rows: Vec<RowRecord>) -> Dataset {
        Dataset::new(
            DatasetRole::Own,
            vec![
                "Po".to_string(),
                "line".to_string(),
                "Enter user".to_string(),
            ],
            rows,
        )
    }

    #[test]
    fn test_derive_key_joins_with_separator() {
        let spec = KeySpec::new("Po", "line");
        let row = record(&[("Po", "PO1"), ("line", "1")]);
        assert_eq!(derive_key(&row, &spec), "PO1-1");
    }

    #[test]
    fn test_derive_key_empty_field_is_sentinel() {
        let spec = KeySpec::new("Document Number", "Line ID");
        assert_eq!(
            derive_key(&record(&[("Document Number", "PO1")]), &spec),
            ""
        );
        assert_eq!(derive_key(&record(&[("Line ID", "1")]), &spec), "");
        assert_eq!(derive_key(&record(&[]), &spec), "");
    }

    #[test]
    fn test_primary_match() {
        let config = ReconConfig::default();
        let customer =
            customer_dataset(vec![record(&[("Document Number", "PO1"), ("Line ID", "1")])]);
        let own = own_dataset(vec![record(&[("Po", "PO1"), ("line", "1")])]);

        let outcomes = match_datasets(&customer, &own, &config);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, MatchStatus::Matched);
        assert_eq!(outcomes[0].own_index, Some(0));
    }

    #[test]
    fn test_empty_keys_never_match_each_other() {
        let config = ReconConfig::default();
        // Both sides unkeyable - composite keys are "" on both sides
        let customer = customer_dataset(vec![record(&[("Document Number", ""), ("Line ID", "")])]);
        let own = own_dataset(vec![record(&[("Po", ""), ("line", "")])]);

        let outcomes = match_datasets(&customer, &own, &config);
        assert_eq!(outcomes[0].status, MatchStatus::Unmatched);
        assert_eq!(outcomes[0].own_index, None);
        assert_eq!(outcomes[0].enter_user, None);
    }

    #[test]
    fn test_first_match_wins_in_own_order() {
        let config = ReconConfig::default();
        let customer =
            customer_dataset(vec![record(&[("Document Number", "PO1"), ("Line ID", "1")])]);
        let own = own_dataset(vec![
            record(&[("Po", "PO1"), ("line", "1"), ("Enter user", "alice")]),
            record(&[("Po", "PO1"), ("line", "1"), ("Enter user", "bob")]),
        ]);

        let outcomes = match_datasets(&customer, &own, &config);
        assert_eq!(outcomes[0].own_index, Some(0));
        assert_eq!(outcomes[0].enter_user.as_deref(), Some("alice"));
    }

    #[test]
    fn test_fallback_match_on_hyphen_prefix() {
        let config = ReconConfig::default();
        // No own row keyed "PO2-A-1", but an own row with Po = "PO2" exists
        let customer = customer_dataset(vec![record(&[
            ("Document Number", "PO2-A"),
            ("Line ID", "1"),
        ])]);
        let own = own_dataset(vec![record(&[("Po", "PO2"), ("line", "9")])]);

        let outcomes = match_datasets(&customer, &own, &config);
        assert_eq!(outcomes[0].status, MatchStatus::MatchedFallback);
        assert_eq!(outcomes[0].own_index, Some(0));
    }

    #[test]
    fn test_fallback_only_after_primary_fails() {
        let config = ReconConfig::default();
        let customer = customer_dataset(vec![record(&[
            ("Document Number", "PO1-X"),
            ("Line ID", "1"),
        ])]);
        let own = own_dataset(vec![
            // Would satisfy the fallback, but the primary match below wins
            record(&[("Po", "PO1"), ("line", "7")]),
            record(&[("Po", "PO1-X"), ("line", "1")]),
        ]);

        let outcomes = match_datasets(&customer, &own, &config);
        assert_eq!(outcomes[0].status, MatchStatus::Matched);
        assert_eq!(outcomes[0].own_index, Some(1));
    }

    #[test]
    fn test_no_hyphen_value_compares_unchanged() {
        let config = ReconConfig::default();
        let customer =
            customer_dataset(vec![record(&[("Document Number", "PO3"), ("Line ID", "2")])]);
        let own = own_dataset(vec![record(&[("Po", "PO3"), ("line", "5")])]);

        let outcomes = match_datasets(&customer, &own, &config);
        assert_eq!(outcomes[0].status, MatchStatus::MatchedFallback);
    }

    #[test]
    fn test_unmatched_row() {
        let config = ReconConfig::default();
        let customer =
            customer_dataset(vec![record(&[("Document Number", "PO9"), ("Line ID", "1")])]);
        let own = own_dataset(vec![record(&[("Po", "PO1"), ("line", "1")])]);

        let outcomes = match_datasets(&customer, &own, &config);
        assert_eq!(outcomes[0].status, MatchStatus::Unmatched);
        assert_eq!(outcomes[0].own_index, None);
    }

    #[test]
    fn test_enter_user_lookup_is_independent_of_match() {
        let config = ReconConfig::default();
        // Empty Line ID makes the row unkeyable, so neither the primary nor
        // the fallback pass may claim it - but the raw Document Number still
        // drives the pass-through lookup
        let customer = customer_dataset(vec![record(&[
            ("Document Number", "PO4"),
            ("Line ID", ""),
        ])]);
        let own = own_dataset(vec![record(&[
            ("Po", "PO4"),
            ("line", "1"),
            ("Enter user", "carol"),
        ])]);

        let outcomes = match_datasets(&customer, &own, &config);
        assert_eq!(outcomes[0].status, MatchStatus::Unmatched);
        assert_eq!(outcomes[0].own_index, None);
        assert_eq!(outcomes[0].enter_user.as_deref(), Some("carol"));
    }

    #[test]
    fn test_enter_user_can_disagree_with_match() {
        let config = ReconConfig::default();
        let customer = customer_dataset(vec![record(&[
            ("Document Number", "PO5-B"),
            ("Line ID", "1"),
        ])]);
        let own = own_dataset(vec![
            // Matched by composite key
            record(&[("Po", "PO5-B"), ("line", "1"), ("Enter user", "dave")]),
        ]);

        let outcomes = match_datasets(&customer, &own, &config);
        assert_eq!(outcomes[0].status, MatchStatus::Matched);
        // Raw lookup also lands on the same row here
        assert_eq!(outcomes[0].enter_user.as_deref(), Some("dave"));
    }

    #[test]
    fn test_outcome_per_customer_row_in_order() {
        let config = ReconConfig::default();
        let customer = customer_dataset(vec![
            record(&[("Document Number", "PO1"), ("Line ID", "1")]),
            record(&[("Document Number", "PO9"), ("Line ID", "9")]),
            record(&[("Document Number", "PO1"), ("Line ID", "1")]),
        ]);
        let own = own_dataset(vec![record(&[("Po", "PO1"), ("line", "1")])]);

        let outcomes = match_datasets(&customer, &own, &config);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].status, MatchStatus::Matched);
        assert_eq!(outcomes[1].status, MatchStatus::Unmatched);
        assert_eq!(outcomes[2].status, MatchStatus::Matched);
    }

    #[test]
    fn test_hyphen_prefix() {
        assert_eq!(hyphen_prefix("PO2-A"), "PO2");
        assert_eq!(hyphen_prefix("PO2-A-B"), "PO2");
        assert_eq!(hyphen_prefix("PO2"), "PO2");
        assert_eq!(hyphen_prefix(""), "");
    }
}
