/// Half-open byte range into one immutable input text.
///
/// Spans produced by a segmentation or tokenization pass are ordered and
/// non-overlapping; concatenating their slices together with the gaps between
/// them reconstructs the input byte-for-byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The text this span covers. `text` must be the buffer the span was
    /// derived from; offsets are byte offsets on char boundaries.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_covers_range() {
        let text = "one two three";
        let span = Span::new(4, 7);
        assert_eq!(span.slice(text), "two");
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
    }

    #[test]
    fn empty_span() {
        let span = Span::new(3, 3);
        assert!(span.is_empty());
        assert_eq!(span.slice("abcdef"), "");
    }
}
