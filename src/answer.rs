//! Spoken answer matching
//!
//! Speech recognition hands us free-form text: "León", "leon" and " LEON "
//! must all match the stored answer. Matching is exact after normalization.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize an answer for comparison.
///
/// Trims surrounding whitespace, decomposes to NFD, drops combining marks
/// (accents, tildes, diaereses) and lower-cases the result.
pub fn normalize(text: &str) -> String {
    text.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether `candidate` names the same answer as `expected`.
pub fn is_correct(candidate: &str, expected: &str) -> bool {
    normalize(candidate) == normalize(expected)
}
