//! View rendering tests

use proptest::prelude::*;

use interface_web::views::{DetailView, Views, CREATE_FORM_TITLE, DETAIL_TITLE, UNKNOWN};
use test_utils::{
    assert_field_eq, count_doctor_rows, DoctorFixtures, DETAIL_ERROR_MARKER, EMPTY_STATE_MARKER,
};

proptest! {
    #[test]
    fn rendered_rows_match_record_count(count in 0usize..40) {
        let views = Views::new().unwrap();
        let html = views.render_list(&DoctorFixtures::records(count)).unwrap();

        prop_assert_eq!(count_doctor_rows(&html), count);
        prop_assert_eq!(html.contains(EMPTY_STATE_MARKER), count == 0);
    }

    #[test]
    fn detail_renders_values_verbatim(name in "[A-Za-z0-9 .-]{0,24}", specialty in "[A-Za-z ]{0,24}") {
        let views = Views::new().unwrap();
        let record = DoctorFixtures::record("1001", &name, "D1", &specialty);
        let html = views.render_detail(&DetailView::found("1001", record)).unwrap();

        assert_field_eq(&html, "doctor_full_name", &name);
        assert_field_eq(&html, "doctor_medical_specialty", &specialty);
    }
}

#[test]
fn test_create_form_has_no_data_dependency() {
    let views = Views::new().unwrap();
    let html = views.render_create_form().unwrap();
    assert!(html.contains(CREATE_FORM_TITLE));
    assert!(html.contains(r#"method="post""#));
}

#[test]
fn test_placeholder_detail_page() {
    let views = Views::new().unwrap();
    let html = views.render_detail(&DetailView::unavailable("abc")).unwrap();

    assert!(html.contains(DETAIL_TITLE));
    assert!(html.contains(DETAIL_ERROR_MARKER));
    assert_field_eq(&html, "record_id", "abc");
    assert_field_eq(&html, "doctor_full_name", UNKNOWN);
    assert_field_eq(&html, "doctor_medical_specialty", UNKNOWN);
    assert_field_eq(&html, "doctor_id", UNKNOWN);
}

#[test]
fn test_detail_render_is_deterministic() {
    let views = Views::new().unwrap();
    let view = DetailView::found("1001", DoctorFixtures::record("1001", "Jane Doe", "D100", "Cardiology"));

    assert_eq!(views.render_detail(&view).unwrap(), views.render_detail(&view).unwrap());
}
