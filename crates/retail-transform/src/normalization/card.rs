//! Card number and expiry checks.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardNumberError {
    Empty,
    NonDigit,
    Length { provider_max: usize, actual: usize },
}

impl fmt::Display for CardNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardNumberError::Empty => f.write_str("card number is empty"),
            CardNumberError::NonDigit => f.write_str("card number contains non-digit characters"),
            CardNumberError::Length {
                provider_max,
                actual,
            } => write!(
                f,
                "card number has {actual} digits, provider allows at most {provider_max}"
            ),
        }
    }
}

/// Inclusive length ranges per provider; unknown providers accept 12 to 19.
fn allowed_lengths(provider: &str) -> &'static [(usize, usize)] {
    let key = provider.trim().to_ascii_lowercase();
    match key.as_str() {
        "visa 13 digit" => &[(13, 13)],
        "visa 16 digit" => &[(16, 16)],
        "visa 19 digit" => &[(19, 19)],
        "visa" => &[(13, 13), (16, 16), (19, 19)],
        "mastercard" => &[(16, 16)],
        "american express" => &[(15, 15)],
        "discover" => &[(16, 16)],
        "diners club / carte blanche" | "diners club" => &[(14, 14)],
        "jcb 15 digit" => &[(15, 15)],
        "jcb 16 digit" => &[(16, 16)],
        "jcb" => &[(15, 16)],
        "maestro" => &[(12, 19)],
        _ => &[(12, 19)],
    }
}

/// Strip `?` noise and require the remainder to be digits.
pub fn card_digits(raw: &str) -> Result<String, CardNumberError> {
    let digits: String = raw.trim().chars().filter(|ch| *ch != '?').collect();
    if digits.is_empty() {
        return Err(CardNumberError::Empty);
    }
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(CardNumberError::NonDigit);
    }
    Ok(digits)
}

/// Clean a card number and validate it against the provider's lengths.
pub fn normalize_card_number(raw: &str, provider: &str) -> Result<String, CardNumberError> {
    let digits = card_digits(raw)?;
    let ranges = allowed_lengths(provider);
    let actual = digits.len();
    if ranges.iter().any(|(min, max)| (*min..=*max).contains(&actual)) {
        Ok(digits)
    } else {
        let provider_max = ranges.iter().map(|(_, max)| *max).max().unwrap_or(19);
        Err(CardNumberError::Length {
            provider_max,
            actual,
        })
    }
}

/// Validate an `MM/YY` expiry, returning it with both parts zero-padded.
pub fn normalize_expiry(raw: &str) -> Option<String> {
    let (month, year) = raw.trim().split_once('/')?;
    if month.is_empty()
        || year.len() != 2
        || !month.chars().all(|ch| ch.is_ascii_digit())
        || !year.chars().all(|ch| ch.is_ascii_digit())
    {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(format!("{month:02}/{year}"))
}
