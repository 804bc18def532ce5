//! Byte spans and the line table used to turn them into (line, column) pairs
//! (spec §4.1).

/// A half-open byte range `[start, end)` into a module's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A zero-length span at `pos`, used for synthetic/recovery tokens.
    pub fn point(pos: u32) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A 1-based (line, column) position, as reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

/// Maps byte offsets to (line, column) pairs via a single newline scan.
///
/// Built once per file on the first newline scan (spec §4.1): `line_starts`
/// holds the byte offset of the first character of each line, so a lookup is
/// a binary search followed by a subtraction.
#[derive(Debug, Clone)]
pub struct LineTable {
    line_starts: Vec<u32>,
}

impl LineTable {
    pub fn build(source: &[u8]) -> Self {
        let mut line_starts = vec![0u32];
        for (i, &b) in source.iter().enumerate() {
            if b == b'\n' {
                // Safe: file content heuristic caps probed files; real MIBs
                // are well under u32::MAX bytes.
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset into a 1-based (line, column) pair.
    pub fn lookup(&self, offset: u32) -> LineCol {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        LineCol {
            line: (line_idx + 1) as u32,
            column: offset - line_start + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_is_all_column_one_based() {
        let table = LineTable::build(b"hello world");
        assert_eq!(table.lookup(0), LineCol { line: 1, column: 1 });
        assert_eq!(table.lookup(6), LineCol { line: 1, column: 7 });
    }

    #[test]
    fn multiline_offsets() {
        let table = LineTable::build(b"ab\ncd\nef");
        assert_eq!(table.lookup(0), LineCol { line: 1, column: 1 });
        assert_eq!(table.lookup(2), LineCol { line: 1, column: 3 });
        assert_eq!(table.lookup(3), LineCol { line: 2, column: 1 });
        assert_eq!(table.lookup(6), LineCol { line: 3, column: 1 });
    }

    #[test]
    fn span_merge_takes_outer_bounds() {
        let a = Span::new(5, 10);
        let b = Span::new(2, 7);
        assert_eq!(a.merge(b), Span::new(2, 10));
    }
}
