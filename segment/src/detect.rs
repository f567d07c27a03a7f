//! Segment boundary detection.
//!
//! Detection only ever looks at the tail of the buffer: a segment is ready
//! exactly when the final character is a terminator. Terminators embedded
//! earlier in the buffer are left alone, so a paste containing several
//! delimiters triggers detection at most once, at the end of the paste.

use crate::read_on::ReadOnSet;

/// Whether `buffer` currently ends in a finished segment.
///
/// The candidate segment is the entire buffer, up to and including the
/// terminator. An empty buffer is never ready.
///
/// ```
/// use segment::{ReadOnSet, segment_ready};
///
/// let set = ReadOnSet::new(".!?");
/// assert!(segment_ready("Hello.", &set));
/// assert!(!segment_ready("Hello. wor", &set));
/// ```
pub fn segment_ready(buffer: &str, read_on: &ReadOnSet) -> bool {
    match buffer.chars().next_back() {
        Some(c) => read_on.is_terminator(c),
        None => false,
    }
}
