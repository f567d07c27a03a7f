//! Compensation for delimiter auto-append.
//!
//! Some chorded input devices insert a delimiter followed by a space in a
//! single stroke. That leaves segments ending in `" <term>"` (the delimiter
//! landed after a space that was already typed) or consisting of nothing
//! but `"<term> "`. Spoken as-is these come out empty or with the pause in
//! the wrong place, so the tail is rewritten before synthesis.

use crate::read_on::ReadOnSet;

/// Rewrite the auto-append artifact at the tail of `text`.
///
/// * `"<term> "` alone becomes empty; the caller must discard it.
/// * A tail of `" <term>"` is swapped to `"<term> "`, keeping exactly one
///   trailing space.
/// * Anything else passes through unchanged.
///
/// Applying this twice yields the same result as applying it once.
///
/// ```
/// use segment::{ReadOnSet, fix_autoappend};
///
/// let set = ReadOnSet::new(".,!?");
/// assert_eq!(fix_autoappend("hello .", &set), "hello. ");
/// assert_eq!(fix_autoappend(". ", &set), "");
/// assert_eq!(fix_autoappend("hello.", &set), "hello.");
/// ```
pub fn fix_autoappend(text: &str, read_on: &ReadOnSet) -> String {
    let mut chars = text.chars();
    let last = chars.next_back();
    let second_last = chars.next_back();
    let rest = chars.as_str();

    match (second_last, last) {
        (Some(first), Some(' ')) if rest.is_empty() && read_on.contains(first) => String::new(),
        (Some(' '), Some(term)) if read_on.contains(term) => {
            let mut fixed = String::with_capacity(text.len());
            fixed.push_str(rest);
            fixed.push(term);
            fixed.push(' ');
            fixed
        }
        _ => text.to_string(),
    }
}
