use super::*;

#[test]
fn normalize_number_prefixes_country_code() {
    assert_eq!(normalize_number("(11) 98765-4321"), Ok("+5511987654321".to_owned()));
    assert_eq!(normalize_number("11 3456 7890"), Ok("+551134567890".to_owned()));
}

#[test]
fn normalize_number_requires_value() {
    assert_eq!(normalize_number("   "), Err("Enter a WhatsApp number"));
}

#[test]
fn normalize_number_rejects_missing_area_code() {
    assert_eq!(normalize_number("98765-4321"), Err("Enter the number with area code, e.g. (11) 98765-4321"));
}

#[test]
fn status_labels_cover_every_state() {
    assert_eq!(status_label(NumberStatus::Verified), "Connected");
    assert_eq!(status_label(NumberStatus::Pending), "Pending verification");
    assert_eq!(status_label(NumberStatus::Inactive), "Inactive");
}
