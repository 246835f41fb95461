//! Tests for email and phone validation.

use retail_transform::{PhoneNumber, normalize_country_code, normalize_email, normalize_phone};

#[test]
fn well_formed_emails_survive() {
    assert_eq!(
        normalize_email("jane.doe@example.co.uk").as_deref(),
        Some("jane.doe@example.co.uk")
    );
    assert_eq!(
        normalize_email("Jane.Doe@Example.com").as_deref(),
        Some("Jane.Doe@Example.com")
    );
}

#[test]
fn repairable_emails_are_repaired() {
    assert_eq!(
        normalize_email("bob@@example.org").as_deref(),
        Some("bob@example.org")
    );
    assert_eq!(
        normalize_email("mäx@example.de").as_deref(),
        Some("max@example.de")
    );
}

#[test]
fn malformed_emails_reject() {
    for raw in ["", "plainaddress", "no-domain@", "@no-local.com", "two@@@at.com", "a@b"] {
        assert_eq!(normalize_email(raw), None, "{raw}");
    }
}

#[test]
fn gb_numbers_normalize_to_national_format() {
    let phone = normalize_phone("+44(0)20 7946 0567", "GB").expect("gb phone");
    assert_eq!(phone.number, "02079460567");
    assert_eq!(phone.extension, None);
    let phone = normalize_phone("(01632) 960 658", "GB").expect("gb phone");
    assert_eq!(phone.number, "01632960658");
    assert!(normalize_phone("12345", "GB").is_none());
}

#[test]
fn de_numbers_normalize() {
    let phone = normalize_phone("+49(0)5551 234567", "DE").expect("de phone");
    assert_eq!(phone.number, "05551234567");
    let phone = normalize_phone("(0551) 07447", "DE").expect("de phone");
    assert_eq!(phone.number, "055107447");
}

#[test]
fn us_numbers_are_formatted_with_extension_split() {
    let phone = normalize_phone("+1-904-496-3409x02744", "US").expect("us phone");
    assert_eq!(
        phone,
        PhoneNumber {
            number: "(904) 496-3409".to_string(),
            extension: Some("02744".to_string()),
        }
    );
    let phone = normalize_phone("484.716.3640", "US").expect("us phone");
    assert_eq!(phone.number, "(484) 716-3640");
    assert!(normalize_phone("(190)809-4736", "US").is_none());
}

#[test]
fn other_countries_use_generic_pattern() {
    assert!(normalize_phone("+33 1 23 45 67 89", "FR").is_some());
    assert!(normalize_phone("123", "FR").is_none());
}

#[test]
fn country_code_typo_is_repaired() {
    assert_eq!(normalize_country_code("GGB"), "GB");
    assert_eq!(normalize_country_code(" us "), "US");
}
