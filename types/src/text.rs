//! Small pure text helpers.
//!
//! All lengths are `char` counts, never bytes: corpus text is mostly
//! multi-byte and a byte cut would split scalar values.

/// Number of characters in `s`.
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` characters of `s`.
#[must_use]
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Characters `[start, end)` of `s`, clamped to the string.
#[must_use]
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let mut indices = s.char_indices().map(|(i, _)| i).chain(std::iter::once(s.len()));
    let total = char_len(s);
    let start = start.min(total);
    let end = end.clamp(start, total);
    let begin = indices.nth(start).unwrap_or(s.len());
    let finish = if end == start {
        begin
    } else {
        indices.nth(end - start - 1).unwrap_or(s.len())
    };
    &s[begin..finish]
}

/// Keep up to `max_content` characters of trimmed `raw`, then append `...`.
///
/// The ellipsis does not count toward the budget and is only added when
/// something was cut.
#[must_use]
pub fn preview(raw: &str, max_content: usize) -> String {
    let trimmed = raw.trim();
    if char_len(trimmed) <= max_content {
        return trimmed.to_string();
    }
    format!("{}...", take_chars(trimmed, max_content))
}

#[cfg(test)]
mod tests {
    use super::{char_len, char_slice, preview, take_chars};

    #[test]
    fn take_chars_respects_multibyte() {
        assert_eq!(take_chars("言霊秘書", 2), "言霊");
        assert_eq!(take_chars("abc", 10), "abc");
        assert_eq!(take_chars("abc", 0), "");
    }

    #[test]
    fn char_slice_clamps() {
        assert_eq!(char_slice("水火の法則", 1, 3), "火の");
        assert_eq!(char_slice("abc", 2, 99), "c");
        assert_eq!(char_slice("abc", 5, 9), "");
        assert_eq!(char_slice("abc", 0, 0), "");
    }

    #[test]
    fn preview_short_unchanged() {
        assert_eq!(preview("  hello ", 10), "hello");
    }

    #[test]
    fn preview_suffix_outside_budget() {
        assert_eq!(preview("hello world", 5), "hello...");
        assert_eq!(char_len(&preview("正中正中正中", 2)), 5);
    }
}
