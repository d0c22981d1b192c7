use crate::constants::VAT_RATE;
use crate::types::{FinancialSummary, SelectedLineItem};

/// Compute the financial summary of a quote.
///
/// The contractor amount is deducted before VAT; the percentage discount is
/// taken from the VAT-inclusive amount. Inputs are expected to be range
/// checked by the caller. Nothing is rounded here.
pub fn compute(
    line_items: &[SelectedLineItem],
    discount_pct: f64,
    contractor_discount_amount: f64,
) -> FinancialSummary {
    let subtotal: f64 = line_items.iter().map(|item| item.line_total).sum();
    let subtotal_after_contractor = subtotal - contractor_discount_amount;
    let vat_amount = subtotal_after_contractor * VAT_RATE;
    let discount_amount = (subtotal_after_contractor + vat_amount) * (discount_pct / 100.0);
    let grand_total = subtotal_after_contractor + vat_amount - discount_amount;

    FinancialSummary {
        subtotal,
        contractor_discount: contractor_discount_amount,
        subtotal_after_contractor,
        vat_amount,
        discount_amount,
        grand_total,
    }
}
