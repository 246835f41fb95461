use std::fs;

use retail_ingest::{cell_text, read_csv_frame, read_csv_from_reader, read_csv_table};

#[test]
fn reads_headers_and_text_cells() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cards.csv");
    fs::write(
        &path,
        "card_number,expiry_date,card_provider\n4971858637664481,09/26,VISA 16 digit\n,,\n1234, 11/25 ,Maestro\n",
    )
    .expect("write csv");

    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(
        table.headers,
        vec!["card_number", "expiry_date", "card_provider"]
    );
    assert_eq!(table.rows.len(), 2, "blank rows are skipped");
    assert_eq!(table.rows[1][1].as_deref(), Some("11/25"));

    let frame = read_csv_frame(&path).expect("read frame");
    assert_eq!(frame.height(), 2);
    assert_eq!(
        cell_text(&frame, "card_provider", 1).as_deref(),
        Some("Maestro")
    );
}

#[test]
fn short_rows_are_padded_and_empty_headers_named() {
    let table =
        read_csv_from_reader(",product_name,weight\n0,Tea\n1,Cake,1kg\n".as_bytes(), "inline")
            .expect("read csv");
    let frame = table.to_frame().expect("frame");
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["unnamed_0", "product_name", "weight"]);
    assert_eq!(cell_text(&frame, "weight", 0), None);
    assert_eq!(cell_text(&frame, "weight", 1).as_deref(), Some("1kg"));
}

#[test]
fn duplicate_headers_are_suffixed() {
    let table = read_csv_from_reader("a,a,b\n1,2,3\n".as_bytes(), "inline").expect("read csv");
    let frame = table.to_frame().expect("frame");
    assert_eq!(cell_text(&frame, "a_1", 0).as_deref(), Some("2"));
}

#[test]
fn missing_file_reports_path() {
    let error = read_csv_table(std::path::Path::new("/nonexistent/cards.csv"))
        .expect_err("missing file");
    assert!(error.to_string().contains("/nonexistent/cards.csv"));
}
