use rowan::TextSize;

/// Position in a source file. `line` is 1-based, `col` is a 0-based byte offset into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets to line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> LineIndex {
        let line_starts = std::iter::once(TextSize::from(0))
            .chain(
                text.match_indices('\n')
                    .map(|(pos, _)| TextSize::from(pos as u32 + 1)),
            )
            .collect();

        LineIndex { line_starts }
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };

        LineCol {
            line: line as u32 + 1,
            col: u32::from(offset - self.line_starts[line]),
        }
    }
}
