//! Keystroke-level phone formatting.
//!
//! Input is reduced to digits and re-punctuated as `(AA) NNNN-NNNN` or
//! `(AA) NNNNN-NNNN`. Partial input formats progressively, so the field can be
//! re-formatted on every keystroke.

use regex::Regex;
use std::sync::LazyLock;

pub const DIGITS_ONLY: &str = "Only numbers are allowed.";

/// Area code followed by at least one more digit
static AREA_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})(\d)").expect("area code regex is valid"));

/// Trailing four digits split from the four or five before them
static LOCAL_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4,5})(\d{4})$").expect("local number regex is valid"));

/// Result of formatting one keystroke's worth of phone input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneInput {
    /// Re-punctuated digits.
    pub formatted: String,
    /// Set when the raw input held characters a phone number cannot contain.
    pub error: Option<&'static str>,
}

/// Format raw phone input and flag foreign characters.
#[must_use]
pub fn parse(raw: &str) -> PhoneInput {
    PhoneInput {
        formatted: format(raw),
        error: check(raw),
    }
}

/// Strip everything but digits and re-insert the area code and hyphen.
#[must_use]
pub fn format(raw: &str) -> String {
    let digits = digits(raw);
    let with_area = AREA_CODE.replace(&digits, "($1) $2");
    LOCAL_SPLIT.replace(&with_area, "$1-$2").into_owned()
}

/// Digits of `raw`, in order.
#[must_use]
pub fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Reject letters and symbols; our own punctuation and spaces are fine since
/// the formatted value is fed back on the next keystroke.
#[must_use]
pub fn check(raw: &str) -> Option<&'static str> {
    let foreign = raw
        .chars()
        .any(|c| !(c.is_ascii_digit() || c.is_whitespace() || matches!(c, '(' | ')' | '-' | '+')));
    foreign.then_some(DIGITS_ONLY)
}
