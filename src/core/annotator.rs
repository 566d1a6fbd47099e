//! Discrepancy annotation: merge each customer row with its match outcome
//! into one annotated output row with cell-level highlight flags.

use crate::config::ReconConfig;
use crate::error::ReconResult;
use crate::types::{field, AnnotatedCell, AnnotatedRow, Dataset, MatchOutcome};

/// Header of the 1-based serial number column
pub const SERIAL_HEADER: &str = "Sr. No.";
/// Header of the match status column
pub const STATUS_HEADER: &str = "Match Status";

/// Build one annotated row per customer row, in customer order.
///
/// Field order: serial number, the customer fields verbatim, the match
/// status label, the configured own compare fields, the pass-through field.
/// Validates the positional highlight configuration against the loaded
/// headers before touching any row.
pub fn annotate(
    customer: &Dataset,
    own: &Dataset,
    outcomes: &[MatchOutcome],
    config: &ReconConfig,
) -> ReconResult<Vec<AnnotatedRow>> {
    config.validate_against(customer)?;

    let rows = customer
        .rows
        .iter()
        .zip(outcomes)
        .enumerate()
        .map(|(index, (customer_row, outcome))| {
            let mut row = AnnotatedRow::default();

            row.push(AnnotatedCell::plain(SERIAL_HEADER, (index + 1).to_string()));

            for header in &customer.headers {
                row.push(AnnotatedCell::plain(
                    header.clone(),
                    field(customer_row, header),
                ));
            }

            row.push(AnnotatedCell::plain(STATUS_HEADER, outcome.status.label()));

            let matched_row = outcome.own_index.map(|i| &own.rows[i]);
            for name in &config.own_compare_fields {
                let cell = match matched_row {
                    Some(own_row) => {
                        let own_value = field(own_row, name);
                        let customer_value = field(customer_row, name);
                        AnnotatedCell {
                            name: name.clone(),
                            value: own_value.to_string(),
                            highlighted: !loose_eq(customer_value, own_value),
                        }
                    }
                    // Absence of a value never triggers a highlight
                    None => AnnotatedCell::plain(name.clone(), ""),
                };
                row.push(cell);
            }

            row.push(AnnotatedCell::plain(
                config.passthrough_field.clone(),
                outcome.enter_user.clone().unwrap_or_default(),
            ));

            apply_positional_rule(&mut row, customer, config);

            row
        })
        .collect();

    Ok(rows)
}

/// The structural highlight rule: compare the customer column at the
/// configured index against the configured own compare field, by position
/// within the annotated field order. On inequality both cells are flagged,
/// never just one. Evaluated in addition to the per-field rule.
fn apply_positional_rule(row: &mut AnnotatedRow, customer: &Dataset, config: &ReconConfig) {
    // Serial cell first, then the customer fields in original order
    let source_pos = 1 + config.positional_pair.source_index;

    // Own compare fields start after serial + customer fields + status
    let compare_offset = 1 + customer.headers.len() + 1;
    let target_pos = compare_offset
        + config
            .own_compare_fields
            .iter()
            .position(|f| *f == config.positional_pair.target_field)
            .expect("validated against own_compare_fields");

    // Strict string comparison, unlike the loose per-field rule
    if row.cells[source_pos].value != row.cells[target_pos].value {
        row.cells[source_pos].highlighted = true;
        row.cells[target_pos].highlighted = true;
    }
}

/// Loose string equality for the per-field rule: trimmed, and numeric when
/// both sides parse as numbers ("10" == "10.0").
fn loose_eq(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();
    if a == b {
        return true;
    }
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}
