//! The live input buffer.

/// Unsegmented text the user is currently typing.
///
/// Every mutation is appended through [`push_str`](InputBuffer::push_str),
/// which caps the buffer at a fixed number of characters. Characters past
/// the cap are dropped from that mutation; they are not queued for later.
#[derive(Debug)]
pub struct InputBuffer {
    text: String,
    max_chars: usize,
}

impl InputBuffer {
    /// Create an empty buffer capped at `max_chars` characters.
    pub fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            max_chars,
        }
    }

    /// Append one input mutation, then truncate to the cap.
    pub fn push_str(&mut self, chunk: &str) {
        self.text.push_str(chunk);
        if let Some((idx, _)) = self.text.char_indices().nth(self.max_chars) {
            self.text.truncate(idx);
        }
    }

    /// Take the buffer contents, leaving it empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Discard the buffer contents.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters currently buffered.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
