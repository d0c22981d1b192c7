//! Display formatting for amounts and file names

use crate::constants::CURRENCY_SYMBOL;
use crate::options::CurrencyMode;
use crate::types::{CatalogRow, CustomerData};

/// Label shown instead of a price for rows priced by measurement
pub const BY_MEASUREMENT: &str = "לפי מידה";

/// Format an amount with the currency symbol and thousands separators.
///
/// Rounding happens here and nowhere earlier.
pub fn format_currency(value: f64, mode: CurrencyMode) -> String {
    let formatted = group_thousands(&format!("{:.*}", mode.decimals(), value.abs()));
    // -0.00 after rounding is printed without a sign
    let is_negative = value < 0.0 && has_nonzero_digit(&formatted);
    if is_negative {
        format!("-{}{}", CURRENCY_SYMBOL, formatted)
    } else {
        format!("{}{}", CURRENCY_SYMBOL, formatted)
    }
}

/// Format a deduction with a leading minus, unless it rounds to zero.
pub fn format_deduction(value: f64, mode: CurrencyMode) -> String {
    let amount = format_currency(value.abs(), mode);
    if has_nonzero_digit(&amount) {
        format!("-{}", amount)
    } else {
        amount
    }
}

fn has_nonzero_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit() && c != '0')
}

fn group_thousands(number: &str) -> String {
    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (number, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(number.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

impl CatalogRow {
    /// Unit price as shown in selection previews and tables
    pub fn price_label(&self, mode: CurrencyMode) -> String {
        if self.is_priced_by_measurement() {
            BY_MEASUREMENT.to_string()
        } else {
            format_currency(self.unit_price, mode)
        }
    }
}

/// Deterministic output file name: `הצעת_מחיר_<name>_<YYYY-MM-DD>.pdf`
pub fn quote_file_name(customer: &CustomerData) -> String {
    let name: String = customer
        .name
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
            {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!(
        "הצעת_מחיר_{}_{}.pdf",
        name,
        customer.quote_date.format("%Y-%m-%d")
    )
}
