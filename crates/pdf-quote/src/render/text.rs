//! Column-width text fitting

use super::fonts::FontFace;
use crate::bidi::shape;
use crate::constants::ELLIPSIS;

/// Shape `text` and make it fit `max_width_mm` at `size`.
///
/// Text that already fits is returned shaped and otherwise untouched.
/// Longer text loses one logical character at a time from its end until the
/// shaped result plus the ellipsis fits.
pub fn fit_shaped(text: &str, max_width_mm: f32, face: &FontFace, size: f32) -> String {
    fit_with(text, max_width_mm, |s| face.text_width_mm(s, size))
}

/// [`fit_shaped`] with an arbitrary width measure
pub fn fit_with(text: &str, max_width_mm: f32, measure: impl Fn(&str) -> f32) -> String {
    let shaped = shape(text);
    if measure(&shaped) <= max_width_mm {
        return shaped;
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>().trim_end().to_string() + ELLIPSIS;
        let shaped = shape(&candidate);
        if measure(&shaped) <= max_width_mm {
            return shaped;
        }
    }

    // Not even the ellipsis fits
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_per_char(s: &str) -> f32 {
        s.chars().count() as f32
    }

    #[test]
    fn test_text_at_boundary_is_not_truncated() {
        assert_eq!(fit_with("abcde", 5.0, one_per_char), "abcde");
    }

    #[test]
    fn test_text_one_over_is_truncated() {
        let fitted = fit_with("abcdef", 5.0, one_per_char);
        assert_eq!(fitted, "ab...");
        assert!(one_per_char(&fitted) <= 5.0);
    }

    #[test]
    fn test_nothing_fits() {
        assert_eq!(fit_with("abcdef", 2.0, one_per_char), "");
    }
}
