//! Shared text helpers used across the risk layers.
//!
//! All helpers expect text that the caller has already lower-cased.

/// True if any of `needles` occurs in `text` as a substring.
pub(crate) fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// Non-overlapping occurrence count of `needle` in `text`.
pub(crate) fn count_occurrences(text: &str, needle: &str) -> usize {
    text.matches(needle).count()
}

/// Checks if `word` appears in `text` with word boundaries.
///
/// A boundary is the start/end of the string or a non-alphanumeric character,
/// so "usa" does not match inside "usage".
pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }

    let mut search_start = 0;
    while let Some(pos) = text[search_start..].find(word) {
        let abs_pos = search_start + pos;
        let end_pos = abs_pos + word.len();

        let boundary_before = text[..abs_pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let boundary_after = text[end_pos..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if boundary_before && boundary_after {
            return true;
        }

        // Advance past the first char of this match to keep slicing on a char boundary.
        search_start = abs_pos + text[abs_pos..].chars().next().map_or(1, char::len_utf8);
    }

    false
}
