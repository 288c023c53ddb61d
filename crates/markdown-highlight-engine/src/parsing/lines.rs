use crate::models::{Point, Position};

/// Maps byte offsets in a source string to line/column points.
///
/// Built once per document; lookups are a binary search over line starts.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    /// Byte offset where each line begins. Always starts with 0.
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, starts }
    }

    /// Converts a byte offset into a point. Offsets past the end clamp to the end.
    ///
    /// Columns count chars, not bytes, so a line of CJK text reports the
    /// column a reader would expect.
    pub fn point(&self, offset: usize) -> Point {
        let offset = offset.min(self.source.len());
        let line = self.starts.partition_point(|&s| s <= offset);
        let line_start = self.starts[line - 1];
        let column = self
            .source
            .get(line_start..offset)
            .map_or(offset - line_start, |s| s.chars().count())
            + 1;
        Point {
            line,
            column,
            offset,
        }
    }

    pub fn position(&self, range: std::ops::Range<usize>) -> Position {
        Position::new(self.point(range.start), self.point(range.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1, 1)]
    #[case(3, 1, 4)]
    #[case(4, 2, 1)]
    #[case(6, 2, 3)]
    #[case(7, 3, 1)]
    fn points_for_offsets(#[case] offset: usize, #[case] line: usize, #[case] column: usize) {
        let idx = LineIndex::new("abc\nde\n");
        let p = idx.point(offset);
        assert_eq!((p.line, p.column, p.offset), (line, column, offset));
    }

    #[test]
    fn trailing_newline_starts_an_empty_line() {
        let p = LineIndex::new("a\nb\n").point(4);
        assert_eq!((p.line, p.column), (3, 1));
    }

    #[test]
    fn offset_past_end_clamps() {
        let idx = LineIndex::new("ab");
        assert_eq!(idx.point(99).offset, 2);
        assert_eq!(idx.point(99).column, 3);
    }

    #[test]
    fn columns_count_chars() {
        // "高亮" is 6 bytes, 2 chars
        let idx = LineIndex::new("高亮x");
        assert_eq!(idx.point(6).column, 3);
    }

    #[test]
    fn position_from_range() {
        let idx = LineIndex::new("one\ntwo");
        let pos = idx.position(2..6);
        assert_eq!((pos.start.line, pos.start.column), (1, 3));
        assert_eq!((pos.end.line, pos.end.column), (2, 3));
    }
}
