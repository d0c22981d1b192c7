//! Right-to-left text shaping
//!
//! PDF text operators place glyphs left to right. Hebrew strings mixed with
//! digits, Latin words and currency symbols therefore have to be turned into
//! visual (glyph) order before they are written. [`shape`] does that.
//!
//! Shaping is a one-way transform: the output is in visual order and must
//! never be fed back into [`shape`].

use std::borrow::Cow;
use std::panic;
use unicode_bidi::BidiInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShapeError {
    /// Script that needs joined letter forms, which this shaper does not produce
    UnsupportedScript(char),
    Panicked,
}

/// Convert a logical-order string into visual order for right-anchored drawing.
///
/// Never fails: when shaping is impossible the whole string is reversed
/// character by character instead.
pub fn shape(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    match try_shape(text) {
        Ok(shaped) => shaped,
        Err(err) => {
            log::warn!("RTL shaping failed ({:?}), reversing text instead", err);
            text.chars().rev().collect()
        }
    }
}

/// Shape any displayable value, coercing it to its string form first.
pub fn shape_value(value: impl std::fmt::Display) -> String {
    shape(&value.to_string())
}

/// Whether the string holds any right-to-left character
pub fn contains_rtl(text: &str) -> bool {
    text.chars().any(is_rtl_char)
}

fn try_shape(text: &str) -> Result<String, ShapeError> {
    let joined = join_letter_forms(text)?;
    let owned = joined.into_owned();
    panic::catch_unwind(move || reorder(&owned)).map_err(|_| ShapeError::Panicked)
}

/// Contextual shaping of right-to-left runs.
///
/// Hebrew letters have no joined forms (final forms are separate code
/// points), so Hebrew text passes through untouched.
fn join_letter_forms(text: &str) -> Result<Cow<'_, str>, ShapeError> {
    if let Some(ch) = text.chars().find(|c| needs_joining(*c)) {
        return Err(ShapeError::UnsupportedScript(ch));
    }
    Ok(Cow::Borrowed(text))
}

/// Apply the bidirectional algorithm line by line.
///
/// The paragraph direction comes from the first strong character, so pure
/// Latin strings such as e-mail addresses are left as they are.
fn reorder(text: &str) -> String {
    let info = BidiInfo::new(text, None);

    // Brackets inside right-to-left runs swap sides once reversed.
    let mirrored: String = text
        .char_indices()
        .map(|(idx, ch)| {
            if info.levels[idx].is_rtl() {
                mirror(ch)
            } else {
                ch
            }
        })
        .collect();

    let info = BidiInfo::new(&mirrored, None);
    let mut out = String::with_capacity(mirrored.len());
    for para in &info.paragraphs {
        let line = para.range.clone();
        out.push_str(&info.reorder_line(para, line));
    }
    out
}

fn mirror(ch: char) -> char {
    match ch {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '«' => '»',
        '»' => '«',
        other => other,
    }
}

fn is_rtl_char(ch: char) -> bool {
    matches!(ch, '\u{0590}'..='\u{05FF}' | '\u{FB1D}'..='\u{FB4F}') || needs_joining(ch)
}

fn needs_joining(ch: char) -> bool {
    matches!(
        ch,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_is_symmetric() {
        for ch in ['(', ')', '[', ']', '{', '}', '<', '>', '«', '»'] {
            assert_eq!(mirror(mirror(ch)), ch);
        }
        assert_eq!(mirror('a'), 'a');
    }

    #[test]
    fn test_joining_script_is_rejected() {
        assert_eq!(
            join_letter_forms("سلام"),
            Err(ShapeError::UnsupportedScript('س'))
        );
        assert!(join_letter_forms("שלום").is_ok());
    }
}
