use pdf_quote::bidi::{contains_rtl, shape, shape_value};

#[test]
fn test_empty_string() {
    assert_eq!(shape(""), "");
}

#[test]
fn test_latin_is_unchanged() {
    assert_eq!(shape("info@panel-k.co.il"), "info@panel-k.co.il");
    assert_eq!(shape("₪1,234.56"), "₪1,234.56");
}

#[test]
fn test_hebrew_is_reversed() {
    assert_eq!(shape("שלום"), "םולש");
}

#[test]
fn test_numbers_keep_their_order() {
    assert_eq!(shape("מחיר 100"), "100 ריחמ");
}

#[test]
fn test_brackets_are_mirrored() {
    assert_eq!(shape("הנחה (10%)"), "(10%) החנה");
}

#[test]
fn test_shape_value() {
    assert_eq!(shape_value(42), "42");
    assert_eq!(shape_value("עמוד"), "דומע");
}

#[test]
fn test_joining_script_falls_back_to_reversal() {
    assert_eq!(shape("سلام"), "مالس");
}

#[test]
fn test_contains_rtl() {
    assert!(contains_rtl("ארון 2"));
    assert!(!contains_rtl("Cabinet 2"));
}
