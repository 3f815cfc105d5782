//! ZIP sort keys.
//!
//! The stored `zip` value keeps whatever form the source used (`12345`,
//! `12345-6789`, …). Ordering only ever looks at the first five-digit run.

use regex::Regex;
use std::sync::LazyLock;

/// Key for records whose ZIP is missing or has no five-digit run. Sorts first.
pub const FALLBACK_ZIP_KEY: &str = "00000";

static FIVE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{5}").expect("five-digit pattern is valid"));

/// Return the first run of five ASCII digits in `raw`, or [`FALLBACK_ZIP_KEY`].
///
/// Total over all inputs: empty, noisy and non-numeric strings all produce a key.
pub fn zip_key(raw: &str) -> &str {
    FIVE_DIGITS
        .find(raw)
        .map_or(FALLBACK_ZIP_KEY, |m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("", "00000")]
    #[case::plain("62704", "62704")]
    #[case::plus_four("90210-1234", "90210")]
    #[case::embedded("ZIP: 02139 (Cambridge)", "02139")]
    #[case::six_digits("123456", "12345")]
    #[case::too_short("1234", "00000")]
    #[case::split_run("1234-56789", "56789")]
    #[case::letters("N/A", "00000")]
    #[case::non_ascii_digits("١٢٣٤٥", "00000")]
    fn extracts_first_five_digit_run(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(zip_key(raw), expected);
    }
}
