use segment::InputBuffer;

#[test]
fn caps_to_max_chars() {
    let mut buf = InputBuffer::new(5);
    buf.push_str("abcdefgh");
    assert_eq!(buf.as_str(), "abcde");
    assert_eq!(buf.char_len(), 5);
}

#[test]
fn cap_applies_on_every_mutation() {
    let mut buf = InputBuffer::new(4);
    buf.push_str("abc");
    buf.push_str("def");
    assert_eq!(buf.as_str(), "abcd");

    // Dropped characters are gone, not queued.
    buf.push_str("x");
    assert_eq!(buf.as_str(), "abcd");
}

#[test]
fn cap_counts_chars_not_bytes() {
    let mut buf = InputBuffer::new(3);
    buf.push_str("日本語です");
    assert_eq!(buf.as_str(), "日本語");
}

#[test]
fn take_clears_the_buffer() {
    let mut buf = InputBuffer::new(10);
    buf.push_str("hello");
    assert_eq!(buf.take(), "hello");
    assert!(buf.is_empty());
    assert_eq!(buf.take(), "");
}

#[test]
fn clear_discards_contents() {
    let mut buf = InputBuffer::new(10);
    buf.push_str("hello");
    buf.clear();
    assert!(buf.is_empty());
}
