//! Domain-specific assertions for addrmerge harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! output invariant was violated and by which record.

use addrmerge::{AddressRecord, Field};

/// Assert that a record has a specific field with an expected value.
///
/// ```rust
/// assert_has_field!(record, Field::Zip, "90210-1234");
/// ```
#[macro_export]
macro_rules! assert_has_field {
    ($record:expr, $field:expr, $value:expr) => {{
        let record: &addrmerge::AddressRecord = &$record;
        let field: addrmerge::Field = $field;
        let expected: &str = $value;
        match record.get(field) {
            Some(actual) if actual == expected => {}
            Some(actual) => panic!(
                "assert_has_field! failed:\n  record.{}\n  expected: {:?}\n  actual:   {:?}",
                field, expected, actual
            ),
            None => panic!(
                "assert_has_field! failed: field {} not set on {:?}",
                field, record
            ),
        }
    }};
}

/// Assert that ZIP keys never decrease across `records`.
pub fn assert_sorted_by_zip(records: &[AddressRecord]) {
    for pair in records.windows(2) {
        assert!(
            pair[0].zip_key() <= pair[1].zip_key(),
            "records out of ZIP order: {:?} ({}) before {:?} ({})",
            pair[0].identity,
            pair[0].zip_key(),
            pair[1].identity,
            pair[1].zip_key()
        );
    }
}

/// Assert that every present field of every record is trimmed and non-empty.
pub fn assert_no_blank_fields(records: &[AddressRecord]) {
    for record in records {
        for field in [Field::Name, Field::Organization].into_iter().chain(Field::DETAIL) {
            if let Some(value) = record.get(field) {
                assert!(
                    !value.is_empty() && value.trim() == value,
                    "field {field} of {:?} is blank or untrimmed: {value:?}",
                    record.identity
                );
            }
        }
    }
}

/// The identity value of each record, in order.
pub fn identities(records: &[AddressRecord]) -> Vec<&str> {
    records.iter().map(|r| r.identity.value()).collect()
}
