//! Source location tracking for the Byte scanner

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for spans; files > 4GB are unsupported

use std::ops::Range;

/// A span representing a range in source code
///
/// Spans never own text. They are views into the source buffer the scanner
/// was created from and are resolved with [`Span::slice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the start of the span
    pub start: u32,
    /// Byte offset of the end of the span (exclusive)
    pub end: u32,
}

impl Span {
    /// Create a new span from start and end byte offsets
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a span from a Range<usize>
    #[must_use]
    pub fn from_range(range: Range<usize>) -> Self {
        Self {
            start: range.start as u32,
            end: range.end as u32,
        }
    }

    /// Length of the span in bytes
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the span is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Convert to a Range<usize> for slicing
    #[must_use]
    pub const fn as_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// The text this span covers in `source`
    ///
    /// Returns an empty string if the span does not lie on character
    /// boundaries of `source` (e.g. it was produced from a different buffer).
    #[must_use]
    pub fn slice<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.as_range()).unwrap_or("")
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::from_range(range)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let span = Span::new(5, 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert_eq!(span.as_range(), 5..10);
    }

    #[test]
    fn span_slices_source() {
        let source = "let x = 42";
        assert_eq!(Span::new(0, 3).slice(source), "let");
        assert_eq!(Span::new(8, 10).slice(source), "42");
        assert_eq!(Span::new(10, 10).slice(source), "");
    }

    #[test]
    fn span_out_of_range_is_empty() {
        assert_eq!(Span::new(4, 40).slice("abc"), "");
        // Not a char boundary inside a multi-byte character
        assert_eq!(Span::new(0, 1).slice("é"), "");
    }
}
