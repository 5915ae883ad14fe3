//! Unit tests for store-assigned record identifiers

use core_kernel::RecordId;

#[test]
fn test_display_is_the_raw_id() {
    let id = RecordId::new("18293746501");
    assert_eq!(id.to_string(), "18293746501");
    assert_eq!(id.as_str(), "18293746501");
}

#[test]
fn test_from_conversions_agree() {
    let from_str: RecordId = "42".into();
    let from_string: RecordId = String::from("42").into();
    assert_eq!(from_str, from_string);
    assert_eq!(from_str.as_str(), "42");
}

#[test]
fn test_serializes_transparently() {
    let id = RecordId::new("1001");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"1001\"");

    let parsed: RecordId = serde_json::from_str("\"1001\"").unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_non_numeric_ids_are_kept_verbatim() {
    let id = RecordId::new("abc-DEF_123");
    assert_eq!(id.as_ref(), "abc-DEF_123");
}
