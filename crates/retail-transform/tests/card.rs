//! Tests for card number and expiry validation.

use retail_transform::{CardNumberError, card_digits, normalize_card_number, normalize_expiry};

#[test]
fn short_card_numbers_reject() {
    assert!(matches!(
        normalize_card_number("1234", "VISA 16 digit"),
        Err(CardNumberError::Length { actual: 4, .. })
    ));
    assert!(normalize_card_number("1234", "unknown").is_err());
}

#[test]
fn provider_lengths_are_enforced() {
    assert_eq!(
        normalize_card_number("4971858637664481", "VISA 16 digit").as_deref(),
        Ok("4971858637664481")
    );
    assert!(normalize_card_number("4971858637664481", "American Express").is_err());
    assert_eq!(
        normalize_card_number("375196712473411", "American Express").as_deref(),
        Ok("375196712473411")
    );
    assert!(normalize_card_number("30060773296197", "Diners Club / Carte Blanche").is_ok());
}

#[test]
fn question_marks_are_stripped() {
    assert_eq!(
        normalize_card_number("???4971858637664481", "VISA 16 digit").as_deref(),
        Ok("4971858637664481")
    );
    assert_eq!(card_digits("??").err(), Some(CardNumberError::Empty));
    assert_eq!(card_digits("NB71VBAHJE").err(), Some(CardNumberError::NonDigit));
}

#[test]
fn expiry_must_be_month_and_two_digit_year() {
    assert_eq!(normalize_expiry("09/26").as_deref(), Some("09/26"));
    assert_eq!(normalize_expiry("9/26").as_deref(), Some("09/26"));
    assert_eq!(normalize_expiry("13/26"), None);
    assert_eq!(normalize_expiry("00/26"), None);
    assert_eq!(normalize_expiry("09/2026"), None);
    assert_eq!(normalize_expiry("0926"), None);
}
