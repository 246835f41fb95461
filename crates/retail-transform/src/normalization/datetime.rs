//! Calendar date parsing across the formats found in the raw feeds.
//!
//! Output is always `YYYY-MM-DD` for dates and `YYYY-MM-DD HH:MM:SS` for
//! timestamps. Slash-separated day/month forms are not accepted since they
//! are ambiguous; impossible dates such as month 13 never parse.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a raw value into a calendar date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return parse_digit_token(trimmed);
    }
    if let Some(dt) = try_parse_datetime(trimmed) {
        return Some(dt.date());
    }
    try_parse_date(&collapse_whitespace(trimmed))
}

/// Parse and render as `YYYY-MM-DD`.
pub fn normalize_date(value: &str) -> Option<String> {
    parse_calendar_date(value).map(format_date)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Parse an `HH:MM:SS` clock value, with optional fractional seconds.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
}

/// Combine separate year, month, day and clock fields into one timestamp.
pub fn compose_datetime(year: i64, month: i64, day: i64, time: &str) -> Option<NaiveDateTime> {
    let year = i32::try_from(year).ok()?;
    let month = u32::try_from(month).ok()?;
    let day = u32::try_from(day).ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = parse_time_of_day(time)?;
    Some(date.and_time(time))
}

/// Purely numeric tokens: `YYYYMMDD`, epoch seconds or epoch milliseconds.
fn parse_digit_token(value: &str) -> Option<NaiveDate> {
    match value.len() {
        8 => NaiveDate::parse_from_str(value, "%Y%m%d").ok(),
        9..=11 => {
            let seconds = value.parse::<i64>().ok()?;
            DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
        }
        12 | 13 => {
            let millis = value.parse::<i64>().ok()?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",  // 2022-01-13
        "%Y/%m/%d",  // 2022/01/13
        "%Y.%m.%d",  // 2022.01.13
        "%B %d %Y",  // January 13 2022
        "%B %d, %Y", // January 13, 2022
        "%d %B %Y",  // 13 January 2022
        "%Y %B %d",  // 2022 January 13
        "%B %Y %d",  // January 2022 13
        "%Y-%b-%d",  // 2022-Jan-13
        "%d-%b-%Y",  // 13-Jan-2022
    ];
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_tokens() {
        assert_eq!(
            parse_digit_token("20220113"),
            NaiveDate::from_ymd_opt(2022, 1, 13)
        );
        assert_eq!(
            parse_digit_token("1642032000"),
            NaiveDate::from_ymd_opt(2022, 1, 13)
        );
        assert_eq!(
            parse_digit_token("1642032000000"),
            NaiveDate::from_ymd_opt(2022, 1, 13)
        );
        assert_eq!(parse_digit_token("2022"), None);
        assert_eq!(parse_digit_token("20221301"), None);
    }

    #[test]
    fn collapses_internal_spaces() {
        assert_eq!(collapse_whitespace("July  2005   11"), "July 2005 11");
    }
}
