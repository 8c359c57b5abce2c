//! Comparison of two normalized WHOIS records.

use super::types::{Discrepancy, Record};

/// Compares an expected record against an observed one and returns every
/// difference, in report order.
///
/// Order: a field-count mismatch first (distinct field names, not total
/// values, a deliberately coarse signal layered on top of the per-field
/// checks), then per-field issues in the expected record's iteration order,
/// then fields present only in the observed record. The count check does
/// not short-circuit the per-field comparison.
///
/// Pure and total: no retained state, both records may be empty, and a
/// record compared against itself yields no discrepancies.
pub fn diff_records(expected: &Record, observed: &Record) -> Vec<Discrepancy> {
    let mut discrepancies = Vec::new();

    if expected.len() != observed.len() {
        discrepancies.push(Discrepancy::FieldCount {
            expected: expected.len(),
            observed: observed.len(),
        });
    }

    for (field, expected_values) in expected {
        match observed.get(field) {
            None => discrepancies.push(Discrepancy::MissingField {
                field: field.clone(),
            }),
            Some(observed_values) => {
                for value in expected_values.difference(observed_values) {
                    discrepancies.push(Discrepancy::MissingValue {
                        field: field.clone(),
                        value: value.clone(),
                    });
                }
                for value in observed_values.difference(expected_values) {
                    discrepancies.push(Discrepancy::ExtraValue {
                        field: field.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
    }

    for (field, values) in observed {
        if !expected.contains_key(field) {
            discrepancies.push(Discrepancy::ExtraField {
                field: field.clone(),
                values: values.iter().cloned().collect(),
            });
        }
    }

    discrepancies
}
