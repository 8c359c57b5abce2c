//! WHOIS record data structures.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A normalized WHOIS record: field name → set of observed values.
///
/// A field name is present iff at least one line of the source text matched
/// the field pattern with that name. The same field appearing several times
/// (e.g. multiple nameservers under one label) accumulates into one value
/// set; repeated identical values collapse. Ordered maps keep iteration, and
/// therefore report order, deterministic.
pub type Record = BTreeMap<String, BTreeSet<String>>;

/// One detected difference between an expected and an observed [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    /// The number of distinct field names differs between the two records.
    FieldCount {
        /// Distinct field names in the expected record
        expected: usize,
        /// Distinct field names in the observed record
        observed: usize,
    },
    /// A field present in the expected record is absent from the observed one.
    MissingField {
        /// The missing field's name
        field: String,
    },
    /// A field is present in both records, but one of its expected values is gone.
    MissingValue {
        /// The field's name
        field: String,
        /// The value that was expected but not observed
        value: String,
    },
    /// A field is present in both records, but carries a value that was not expected.
    ExtraValue {
        /// The field's name
        field: String,
        /// The unexpected value
        value: String,
    },
    /// A field absent from the expected record appeared in the observed one.
    ExtraField {
        /// The extra field's name
        field: String,
        /// All of the field's observed values
        values: Vec<String>,
    },
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::FieldCount { expected, observed } => {
                write!(f, "Field count different: {} {}", expected, observed)
            }
            Discrepancy::MissingField { field } => {
                write!(f, "Field {} required but missing", field)
            }
            Discrepancy::MissingValue { field, value } => {
                write!(f, "Field {} expected value [{}] missing", field, value)
            }
            Discrepancy::ExtraValue { field, value } => {
                write!(f, "Field {} extra value [{}]", field, value)
            }
            Discrepancy::ExtraField { field, values } => {
                write!(f, "Extra field {} with value {}", field, values.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count_display() {
        let d = Discrepancy::FieldCount {
            expected: 2,
            observed: 1,
        };
        assert_eq!(d.to_string(), "Field count different: 2 1");
    }

    #[test]
    fn test_missing_field_display() {
        let d = Discrepancy::MissingField {
            field: "Registrant Name".into(),
        };
        assert_eq!(d.to_string(), "Field Registrant Name required but missing");
    }

    #[test]
    fn test_value_discrepancy_display() {
        let missing = Discrepancy::MissingValue {
            field: "Registrant Name".into(),
            value: "Alice".into(),
        };
        assert_eq!(
            missing.to_string(),
            "Field Registrant Name expected value [Alice] missing"
        );

        let extra = Discrepancy::ExtraValue {
            field: "Registrant Name".into(),
            value: "Bob".into(),
        };
        assert_eq!(
            extra.to_string(),
            "Field Registrant Name extra value [Bob]"
        );
    }

    #[test]
    fn test_extra_field_display_joins_values_with_spaces() {
        let d = Discrepancy::ExtraField {
            field: "Name Servers".into(),
            values: vec!["ns1.example.com".into(), "ns2.example.com".into()],
        };
        assert_eq!(
            d.to_string(),
            "Extra field Name Servers with value ns1.example.com ns2.example.com"
        );
    }
}
