use proptest::collection::btree_set;
use proptest::prelude::*;
use xetra::BucketConnector;
use xetra::io::cloud::{FakeObjectIO, ObjectIO};

proptest! {
    #[test]
    fn prefix_listing_returns_exactly_the_matching_keys(
        keys in btree_set("[ab/]{1,6}\\.csv", 0..12),
        prefix in "[ab/]{0,3}",
    ) {
        let store = FakeObjectIO::with_bucket("b");
        for key in &keys {
            store.put_object("b", key, b"col1\nx\n").unwrap();
        }
        let conn = BucketConnector::with_store(store, "http://fake", "b");

        let listed = conn.list_files_in_prefix(&prefix).unwrap();
        let expected: Vec<String> =
            keys.iter().filter(|k| k.starts_with(prefix.as_str())).cloned().collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn every_key_written_under_a_prefix_is_listed(
        names in btree_set("[a-z0-9]{1,8}", 1..8),
        prefix in "[a-z]{1,5}/",
    ) {
        let store = FakeObjectIO::with_bucket("b");
        store.put_object("b", "elsewhere.csv", b"x").unwrap();
        let conn = BucketConnector::with_store(store, "http://fake", "b");
        let table = xetra::Table::from_string_rows(&["col1"], &[["v"]]).unwrap();

        let mut expected = Vec::new();
        for name in &names {
            let key = format!("{prefix}{name}.csv");
            let written = conn.write_table_to_object(&table, &key, "csv").unwrap();
            prop_assert!(written);
            expected.push(key);
        }
        expected.sort();

        let listed = conn.list_files_in_prefix(&prefix).unwrap();
        prop_assert_eq!(listed, expected);
    }
}
