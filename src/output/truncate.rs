//! Character-based truncation for previews.

const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `max_chars` characters.
///
/// Text that already fits is returned unchanged. When `max_chars` is three
/// or fewer the text is cut hard; otherwise it keeps `max_chars - 3`
/// characters followed by `...`.
///
/// # Examples
///
/// ```
/// use gh_talk::output::truncate;
///
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("hello", 3), "hel");
/// assert_eq!(truncate("hi", 10), "hi");
/// ```
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    if max_chars <= ELLIPSIS.len() {
        return text.chars().take(max_chars).collect();
    }
    let kept: String = text
        .chars()
        .take(max_chars.saturating_sub(ELLIPSIS.len()))
        .collect();
    format!("{kept}{ELLIPSIS}")
}

/// `text` with its line breaks replaced by single spaces.
#[must_use]
pub fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}
