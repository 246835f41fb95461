//! Email and phone validation with the repairs the user feed needs.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
    )
    .expect("Invalid email regex")
});

static GB_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0\d{9,10}$").expect("Invalid GB phone regex"));

static DE_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0\d{6,13}$").expect("Invalid DE phone regex"));

static US_PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([2-9][0-8]\d)([2-9]\d{2})(\d{4})$").expect("Invalid US phone regex")
});

static GENERIC_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{7,15}$").expect("Invalid phone regex"));

/// Repair known country code typos.
pub fn normalize_country_code(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed {
        "GGB" => "GB".to_string(),
        other => other.to_uppercase(),
    }
}

/// Repair and validate an email address; `None` when it stays malformed.
pub fn normalize_email(raw: &str) -> Option<String> {
    let repaired = raw.trim().replace("@@", "@").replace('ä', "a");
    EMAIL_REGEX.is_match(&repaired).then_some(repaired)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    pub number: String,
    pub extension: Option<String>,
}

/// Normalize a phone number for the given ISO country code.
///
/// Whitespace is removed and an `x` extension split off before the country
/// rewrite rules run. Returns `None` when the number fails its pattern.
pub fn normalize_phone(raw: &str, country_code: &str) -> Option<PhoneNumber> {
    let compact: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    let (number, extension) = split_extension(&compact)?;
    let number = match country_code {
        "GB" => normalize_gb(number)?,
        "DE" => normalize_de(number)?,
        "US" => normalize_us(number)?,
        _ => GENERIC_PHONE_REGEX
            .is_match(number)
            .then(|| number.to_string())?,
    };
    Some(PhoneNumber { number, extension })
}

fn split_extension(value: &str) -> Option<(&str, Option<String>)> {
    let Some(pos) = value.find(['x', 'X']) else {
        return Some((value, None));
    };
    let extension = &value[pos + 1..];
    if extension.is_empty() || !extension.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some((&value[..pos], Some(extension.to_string())))
}

fn strip_chars(value: &str, chars: &[char]) -> String {
    value.chars().filter(|ch| !chars.contains(ch)).collect()
}

fn replace_prefix(value: &str, prefixes: &[&str], replacement: &str) -> String {
    for prefix in prefixes {
        if let Some(rest) = value.strip_prefix(prefix) {
            return format!("{replacement}{rest}");
        }
    }
    value.to_string()
}

fn normalize_gb(number: &str) -> Option<String> {
    let number = replace_prefix(number, &["+44(0)", "+44"], "0");
    let number = strip_chars(&number, &['(', ')', '-']);
    GB_PHONE_REGEX.is_match(&number).then_some(number)
}

fn normalize_de(number: &str) -> Option<String> {
    let number = replace_prefix(number, &["+49(0)", "+49"], "0");
    let number = strip_chars(&number, &['(', ')', '/', '-']);
    DE_PHONE_REGEX.is_match(&number).then_some(number)
}

fn normalize_us(number: &str) -> Option<String> {
    let number = replace_prefix(number, &["+1", "001-", "001"], "");
    let number = strip_chars(&number, &['(', ')', '-', '.']);
    let captures = US_PHONE_REGEX.captures(&number)?;
    Some(format!(
        "({}) {}-{}",
        &captures[1], &captures[2], &captures[3]
    ))
}
