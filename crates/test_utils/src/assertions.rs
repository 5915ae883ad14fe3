//! Custom Test Assertions
//!
//! Helpers for inspecting rendered HTML pages without an HTML parser.

/// Marker on every record row of the list page
pub const DOCTOR_ROW_MARKER: &str = r#"class="doctor-row""#;

/// Marker of the empty state on the list page
pub const EMPTY_STATE_MARKER: &str = r#"class="empty-state""#;

/// Marker of the error indicator on the detail page
pub const DETAIL_ERROR_MARKER: &str = r#"id="detail-error""#;

/// Counts non-overlapping occurrences of `needle` in `haystack`
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Number of record rows on a rendered list page
pub fn count_doctor_rows(html: &str) -> usize {
    count_occurrences(html, DOCTOR_ROW_MARKER)
}

/// Extracts the text of the element carrying `data-field="<field>"`
///
/// # Panics
///
/// Panics if the field is missing from the page.
pub fn field_text<'a>(html: &'a str, field: &str) -> &'a str {
    let marker = format!(r#"data-field="{}">"#, field);
    let start = html
        .find(&marker)
        .unwrap_or_else(|| panic!("Field {} not found in page", field))
        + marker.len();
    let end = html[start..]
        .find('<')
        .unwrap_or_else(|| panic!("Field {} is not closed", field));
    &html[start..start + end]
}

/// Asserts that a rendered detail page shows the given value for a field
pub fn assert_field_eq(html: &str, field: &str, expected: &str) {
    let actual = field_text(html, field);
    assert_eq!(
        actual, expected,
        "Field {} mismatch: actual={:?}, expected={:?}",
        field, actual, expected
    );
}
