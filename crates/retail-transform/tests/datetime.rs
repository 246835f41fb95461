//! Tests for calendar date parsing.

use chrono::NaiveDate;
use retail_transform::{compose_datetime, format_datetime, normalize_date, parse_calendar_date};

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

#[test]
fn iso_dates_parse() {
    assert_eq!(parse_calendar_date("2022-01-13"), ymd(2022, 1, 13));
    assert_eq!(normalize_date("2022-01-13").as_deref(), Some("2022-01-13"));
}

#[test]
fn impossible_dates_reject() {
    assert_eq!(parse_calendar_date("2022-13-01"), None);
    assert_eq!(parse_calendar_date("2022-02-30"), None);
    assert_eq!(parse_calendar_date("GFJQ2AAEQ8"), None);
    assert_eq!(parse_calendar_date(""), None);
}

#[test]
fn mixed_textual_formats_parse() {
    let expected = ymd(2005, 7, 11);
    for raw in [
        "2005/07/11",
        "July 11 2005",
        "July 11, 2005",
        "11 July 2005",
        "2005 July 11",
        "July 2005 11",
        "Jul 11 2005",
        "20050711",
        "2005-07-11T08:30:00",
        "2005-07-11 08:30:00.250",
    ] {
        assert_eq!(parse_calendar_date(raw), expected, "{raw}");
    }
}

#[test]
fn epoch_tokens_parse() {
    assert_eq!(parse_calendar_date("1642032000"), ymd(2022, 1, 13));
    assert_eq!(parse_calendar_date("1642032000000"), ymd(2022, 1, 13));
}

#[test]
fn ambiguous_slash_dates_reject() {
    assert_eq!(parse_calendar_date("01/02/2022"), None);
}

#[test]
fn composes_timestamps_from_parts() {
    let dt = compose_datetime(1993, 9, 19, "22:00:06").expect("valid timestamp");
    assert_eq!(format_datetime(dt), "1993-09-19 22:00:06");
    assert!(compose_datetime(1993, 13, 19, "22:00:06").is_none());
    assert!(compose_datetime(1993, 9, 19, "late").is_none());
}
