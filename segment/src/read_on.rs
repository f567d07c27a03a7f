//! The set of characters that end a segment.

use serde::{Deserialize, Serialize};

/// Default delimiters. Includes a space so short phrases are read out as
/// they are typed.
pub const DEFAULT_READ_ON: &str = "., !?;:";

/// Ordered set of delimiter characters, configured as a plain string.
///
/// Newline is always treated as a terminator in addition to the configured
/// characters, but it is not a *member* of the set: the punctuation
/// normalizer only looks at configured characters.
///
/// ```
/// use segment::ReadOnSet;
///
/// let set = ReadOnSet::default();
/// assert!(set.is_terminator('.'));
/// assert!(set.is_terminator('\n'));
/// assert!(!set.contains('\n'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadOnSet {
    chars: String,
}

impl ReadOnSet {
    /// Create a set from the configured delimiter string.
    pub fn new(chars: impl Into<String>) -> Self {
        Self {
            chars: chars.into(),
        }
    }

    /// Whether `c` is one of the configured delimiter characters.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(c)
    }

    /// Whether `c` ends a segment. Configured characters plus newline.
    pub fn is_terminator(&self, c: char) -> bool {
        c == '\n' || self.contains(c)
    }

    /// The configured delimiter string.
    pub fn as_str(&self) -> &str {
        &self.chars
    }
}

impl Default for ReadOnSet {
    fn default() -> Self {
        Self::new(DEFAULT_READ_ON)
    }
}

impl From<&str> for ReadOnSet {
    fn from(chars: &str) -> Self {
        Self::new(chars)
    }
}
