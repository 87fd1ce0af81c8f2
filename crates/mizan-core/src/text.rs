//! Turkish-aware text folding for keyword matching.
//!
//! Standard Unicode lowercasing does not respect Turkish dotted/dotless I:
//! `'I'.to_lowercase()` is `i` (should be `ı`) and `'İ'.to_lowercase()` is the
//! two-char sequence `i̇`. Keyword rules are written in folded Turkish, so both
//! the rule and the text pass through [`fold`] before a substring test.
//!
//! # Char-for-char guarantee
//!
//! [`fold`] maps every input char to exactly one output char. A char index
//! found in folded text is therefore a valid char index into the original,
//! which is how conditions and other fragments are cut back out of the
//! original text.

/// Fold a string to Turkish lowercase, one char out per char in.
///
/// - `İ` → `i`, `I` → `ı`
/// - any other char whose lowercase form is a single char → that char
/// - anything else is kept as-is
pub fn fold(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'İ' => 'i',
        'I' => 'ı',
        _ => {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        }
    }
}

/// Case-insensitive (Turkish) substring test. `needle` is folded as well.
pub fn contains_folded(haystack_folded: &str, needle: &str) -> bool {
    haystack_folded.contains(&fold(needle))
}

/// Build a regex fragment that matches `word` regardless of Turkish casing.
///
/// The fragment is escaped; `i`/`ı` become `[iİ]`/`[ıI]` and every other
/// letter becomes a two-member class so the result does not depend on the
/// regex engine's case folding.
pub fn insensitive_pattern(word: &str) -> String {
    let mut out = String::with_capacity(word.len() * 4);
    for c in fold(word).chars() {
        match c {
            'i' => out.push_str("[iİ]"),
            'ı' => out.push_str("[ıI]"),
            ' ' => out.push_str(r"\s+"),
            c if c.is_alphabetic() => {
                let upper: String = c.to_uppercase().collect();
                if upper.chars().count() == 1 && upper != c.to_string() {
                    out.push('[');
                    out.push(c);
                    out.push_str(&upper);
                    out.push(']');
                } else {
                    out.push(c);
                }
            }
            c => out.push_str(&regex_escape_char(c)),
        }
    }
    out
}

fn regex_escape_char(c: char) -> String {
    let mut buf = [0u8; 4];
    regex::escape(c.encode_utf8(&mut buf))
}

/// Convert a byte offset within `s` into a char offset.
pub fn char_offset(s: &str, byte_idx: usize) -> usize {
    s[..byte_idx].chars().count()
}

/// First `n` chars of `s`.
pub fn prefix_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate to at most `max_chars` chars, respecting char boundaries.
///
/// Returns the (possibly shortened) slice and whether truncation happened.
pub fn truncate_chars(s: &str, max_chars: usize) -> (&str, bool) {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => (&s[..idx], true),
        None => (s, false),
    }
}
