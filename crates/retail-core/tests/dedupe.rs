use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;
use retail_core::dedupe_frame_by_keys;
use retail_ingest::cell_text;

fn keyed_frame(rows: &[(u8, u16)]) -> DataFrame {
    let keys: Vec<String> = rows.iter().map(|(key, _)| format!("k{key}")).collect();
    let payloads: Vec<String> = rows.iter().map(|(_, payload)| payload.to_string()).collect();
    let columns: Vec<Column> = vec![
        Series::new("key".into(), keys).into_column(),
        Series::new("payload".into(), payloads).into_column(),
    ];
    DataFrame::new(columns).expect("frame")
}

#[test]
fn composite_keys_keep_first_row() {
    let mut df = keyed_frame(&[(1, 10), (2, 20), (1, 30)]);
    let dropped = dedupe_frame_by_keys(&mut df, &["key", "payload"]).expect("dedupe");
    assert!(dropped.is_empty());
    assert_eq!(df.height(), 3);

    let dropped = dedupe_frame_by_keys(&mut df, &["key"]).expect("dedupe");
    assert_eq!(dropped, vec![vec!["k1".to_string()]]);
    assert_eq!(cell_text(&df, "payload", 0).as_deref(), Some("10"));
    assert_eq!(cell_text(&df, "payload", 1).as_deref(), Some("20"));
}

#[test]
fn separator_text_does_not_merge_distinct_keys() {
    let columns: Vec<Column> = vec![
        Series::new("store".into(), vec!["S|1", "S"]).into_column(),
        Series::new("product".into(), vec!["P", "1|P"]).into_column(),
    ];
    let mut df = DataFrame::new(columns).expect("frame");
    let dropped = dedupe_frame_by_keys(&mut df, &["store", "product"]).expect("dedupe");
    assert!(dropped.is_empty());
    assert_eq!(df.height(), 2);
}

proptest! {
    #[test]
    fn dedupe_keeps_first_occurrence_in_order(rows in prop::collection::vec((0u8..8, any::<u16>()), 0..40)) {
        let mut df = keyed_frame(&rows);
        let dropped = dedupe_frame_by_keys(&mut df, &["key"]).expect("dedupe");

        let mut first: BTreeMap<u8, u16> = BTreeMap::new();
        let mut expected = Vec::new();
        for (key, payload) in &rows {
            if !first.contains_key(key) {
                first.insert(*key, *payload);
                expected.push((format!("k{key}"), payload.to_string()));
            }
        }
        prop_assert_eq!(df.height(), expected.len());
        prop_assert_eq!(dropped.len(), rows.len() - expected.len());
        for (idx, (key, payload)) in expected.iter().enumerate() {
            let got_key = cell_text(&df, "key", idx);
            let got_payload = cell_text(&df, "payload", idx);
            prop_assert_eq!(got_key.as_deref(), Some(key.as_str()));
            prop_assert_eq!(got_payload.as_deref(), Some(payload.as_str()));
        }
    }
}
