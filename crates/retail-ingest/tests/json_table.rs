use retail_ingest::{IngestError, cell_text, json_frame_from_str};

#[test]
fn reads_record_arrays() {
    let frame = json_frame_from_str(
        r#"[{"store_code": "WEB-1388012W", "staff_numbers": 325, "latitude": null},
            {"store_code": "HI-9B97EE4E", "staff_numbers": "34", "lat": "N/A"}]"#,
        "inline",
    )
    .expect("frame");
    assert_eq!(frame.height(), 2);
    assert_eq!(cell_text(&frame, "staff_numbers", 0).as_deref(), Some("325"));
    assert_eq!(cell_text(&frame, "latitude", 0), None);
    assert_eq!(cell_text(&frame, "lat", 1).as_deref(), Some("N/A"));
    assert_eq!(cell_text(&frame, "lat", 0), None);
}

#[test]
fn reads_column_objects_in_row_label_order() {
    let frame = json_frame_from_str(
        r#"{"timestamp": {"10": "09:00:00", "2": "22:00:06"},
            "month": {"2": "9", "10": "2"}}"#,
        "inline",
    )
    .expect("frame");
    assert_eq!(frame.height(), 2);
    assert_eq!(cell_text(&frame, "timestamp", 0).as_deref(), Some("22:00:06"));
    assert_eq!(cell_text(&frame, "month", 1).as_deref(), Some("2"));
}

#[test]
fn reads_column_arrays_and_single_records() {
    let frame = json_frame_from_str(r#"{"a": [1, 2, 3], "b": ["x"]}"#, "inline").expect("frame");
    assert_eq!(frame.height(), 3);
    assert_eq!(cell_text(&frame, "b", 2), None);

    let frame = json_frame_from_str(r#"{"index": 0, "store_type": "Local"}"#, "inline")
        .expect("frame");
    assert_eq!(frame.height(), 1);
    assert_eq!(cell_text(&frame, "store_type", 0).as_deref(), Some("Local"));
}

#[test]
fn rejects_unsupported_layouts() {
    assert!(matches!(
        json_frame_from_str("42", "inline"),
        Err(IngestError::JsonLayout(_))
    ));
    assert!(matches!(
        json_frame_from_str("[1, 2]", "inline"),
        Err(IngestError::JsonLayout(_))
    ));
    assert!(matches!(
        json_frame_from_str("{not json", "inline"),
        Err(IngestError::Json { .. })
    ));
}

#[test]
fn record_headers_keep_first_seen_order() {
    let frame = json_frame_from_str(
        r#"[{"store_code": "WEB-1", "address": "N/A"},
            {"store_code": "HI-2", "address": "Flat 72W", "continent": "Europe"}]"#,
        "inline",
    )
    .expect("frame");
    let headers: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(headers, ["store_code", "address", "continent"]);
}
