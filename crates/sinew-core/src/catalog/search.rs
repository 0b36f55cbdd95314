//! Text folding for catalog search and index keys

use unicode_normalization::UnicodeNormalization;

/// Fold text for comparison: decompose, strip combining marks, lowercase.
///
/// "Músculo Bíceps" and "musculo biceps" fold to the same string.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Folded, trimmed form used as a secondary-index key
pub(crate) fn index_key(text: &str) -> String {
    fold(text.trim())
}
