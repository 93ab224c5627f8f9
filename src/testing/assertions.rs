//! Assertions for tables.

use crate::table::Table;

/// Assert that two tables have the same column names, order, types and values.
///
/// # Panics
///
/// Panics with the first differing column or row if the tables differ.
///
/// # Example
///
/// ```
/// use xetra::testing::assert_tables_equal;
/// use xetra::Table;
///
/// let a = Table::from_string_rows(&["col1"], &[["A"]]).unwrap();
/// assert_tables_equal(&a, &a.clone());
/// ```
pub fn assert_tables_equal(actual: &Table, expected: &Table) {
    assert_eq!(
        actual.column_names(),
        expected.column_names(),
        "Column mismatch:\n  Expected: {:?}\n  Actual: {:?}",
        expected.column_names(),
        actual.column_names()
    );
    assert_eq!(
        actual.num_rows(),
        expected.num_rows(),
        "Row count mismatch:\n  Expected: {}\n  Actual: {}",
        expected.num_rows(),
        actual.num_rows()
    );
    for (a, e) in actual.columns().iter().zip(expected.columns()) {
        assert_eq!(
            a.data().data_type(),
            e.data().data_type(),
            "Type mismatch in column '{}'",
            e.name()
        );
    }
    for (i, (a, e)) in actual.rows().zip(expected.rows()).enumerate() {
        assert_eq!(a, e, "Row mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}");
    }
}
