use chrono::NaiveDate;
use pdf_quote::*;

fn row(name: &str, unit_price: f64, row_index: usize) -> CatalogRow {
    CatalogRow {
        name: name.to_string(),
        category: "ארונות".to_string(),
        unit_price,
        note: String::new(),
        row_index,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_contractor_discount_before_vat() {
    let items = vec![SelectedLineItem::new(row("ארון", 500.0, 0), 2).unwrap()];
    let summary = pricing::compute(&items, 10.0, 100.0);

    assert_close(summary.subtotal, 1000.0);
    assert_close(summary.contractor_discount, 100.0);
    assert_close(summary.subtotal_after_contractor, 900.0);
    assert_close(summary.vat_amount, 153.0);
    assert_close(summary.discount_amount, 105.3);
    assert_close(summary.grand_total, 947.7);
}

#[test]
fn test_no_discounts() {
    let items = vec![
        SelectedLineItem::new(row("ארון", 250.0, 0), 1).unwrap(),
        SelectedLineItem::new(row("מדף", 50.0, 1), 3).unwrap(),
    ];
    let summary = pricing::compute(&items, 0.0, 0.0);

    assert_close(summary.subtotal, 400.0);
    assert_close(summary.vat_amount, 68.0);
    assert_close(summary.discount_amount, 0.0);
    assert_close(summary.grand_total, 468.0);
}

#[test]
fn test_empty_selection_is_all_zero() {
    let summary = pricing::compute(&[], 15.0, 0.0);
    assert_eq!(summary, FinancialSummary::default());
}

#[test]
fn test_by_measurement_items_add_nothing() {
    let items = vec![
        SelectedLineItem::new(row("משטח", 0.0, 0), 4).unwrap(),
        SelectedLineItem::new(row("ידית", 20.0, 1), 5).unwrap(),
    ];
    assert_close(items[0].line_total, 0.0);

    let summary = pricing::compute(&items, 0.0, 0.0);
    assert_close(summary.subtotal, 100.0);
}

#[test]
fn test_full_discount() {
    let items = vec![SelectedLineItem::new(row("ארון", 1000.0, 0), 1).unwrap()];
    let summary = pricing::compute(&items, 100.0, 0.0);
    assert_close(summary.grand_total, 0.0);
}

#[test]
fn test_zero_quantity_is_not_an_item() {
    assert!(SelectedLineItem::new(row("ארון", 500.0, 0), 0).is_none());
}

#[test]
fn test_contractor_amount_needs_flag() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let mut customer = CustomerData::new("ישראל ישראלי", date);
    customer.contractor_discount_amount = 250.0;
    assert_eq!(customer.effective_contractor_discount(), 0.0);

    customer.contractor = true;
    assert_eq!(customer.effective_contractor_discount(), 250.0);
}
