//! Accent-insensitive text folding for search.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold `input` for matching: canonical decomposition, combining marks
/// dropped, `đ` folded to `d`, lowercased.
///
/// `"Hạt Điều"` and `"hat dieu"` fold to the same string.
pub fn normalize_search_text(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' | 'Đ' => 'd',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}
