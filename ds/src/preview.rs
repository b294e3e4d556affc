//! Preview and highlight extraction
//!
//! All positions are char offsets; slicing converts them to byte offsets once
//! per text.

use crate::{ELLIPSIS, PreviewMode};

/// Text with precomputed char-to-byte boundaries
pub struct CharIndexed<'a> {
    text: &'a str,
    /// Byte offset of every char boundary, including the end of the text
    bounds: Vec<usize>,
}

impl<'a> CharIndexed<'a> {
    pub fn new(text: &'a str) -> Self {
        let bounds = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, bounds }
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Slice by char offsets, end exclusive
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.bounds[start]..self.bounds[end]]
    }

    /// Bracket `start..end` with up to `context` chars on each side
    ///
    /// An ellipsis marks each side where the text continues past the context.
    pub fn highlight(&self, start: usize, end: usize, context: usize) -> String {
        let len = self.len();
        let end = end.min(len);
        let start = start.min(end);
        let before = start.saturating_sub(context);
        let after = end.saturating_add(context).min(len);

        let mut out = String::with_capacity(self.bounds[after] - self.bounds[before] + 2 * ELLIPSIS.len() + 2);
        if before > 0 {
            out.push_str(ELLIPSIS);
        }
        out.push_str(self.slice(before, start));
        out.push('[');
        out.push_str(self.slice(start, end));
        out.push(']');
        out.push_str(self.slice(end, after));
        if after < len {
            out.push_str(ELLIPSIS);
        }
        out
    }
}

/// Leading excerpt of a document for listings
pub fn document_preview(content: &str, mode: PreviewMode) -> &str {
    match mode {
        PreviewMode::Chars(n) => {
            let end = content.char_indices().nth(n).map(|(byte, _)| byte).unwrap_or(content.len());
            &content[..end]
        }
        PreviewMode::Lines(k) => {
            let end = content
                .match_indices('\n')
                .nth(k.saturating_sub(1))
                .map(|(byte, _)| byte)
                .unwrap_or(content.len());
            content[..end].trim_end_matches('\r')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_without_truncation() {
        let text = CharIndexed::new("Install the CLI");
        assert_eq!(text.highlight(0, 7, 40), "[Install] the CLI");
    }

    #[test]
    fn test_highlight_truncates_both_sides() {
        let text = CharIndexed::new("0123456789abcdefghij");
        assert_eq!(text.highlight(10, 12, 3), "...789[ab]cde...");
    }

    #[test]
    fn test_highlight_exact_context_no_ellipsis() {
        let text = CharIndexed::new("abcXYZdef");
        assert_eq!(text.highlight(3, 6, 3), "abc[XYZ]def");
    }

    #[test]
    fn test_highlight_multibyte() {
        let text = CharIndexed::new("café ☕ crème brûlée");
        assert_eq!(text.len(), 19);
        assert_eq!(text.highlight(7, 12, 2), "...☕ [crème] b...");
    }

    #[test]
    fn test_preview_chars() {
        assert_eq!(document_preview("hello world", PreviewMode::Chars(5)), "hello");
        assert_eq!(document_preview("hi", PreviewMode::Chars(5)), "hi");
        assert_eq!(document_preview("ünïcode", PreviewMode::Chars(3)), "ünï");
    }

    #[test]
    fn test_preview_lines() {
        let content = "# Title\r\n\nBody line\nMore";
        assert_eq!(document_preview(content, PreviewMode::Lines(1)), "# Title");
        assert_eq!(document_preview(content, PreviewMode::Lines(3)), "# Title\r\n\nBody line");
        assert_eq!(document_preview(content, PreviewMode::Lines(10)), content);
    }
}
