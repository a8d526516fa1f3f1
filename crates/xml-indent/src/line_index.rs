//! Byte offset to line/column lookups.

/// Index of line break positions in a document.
///
/// Built once per document so that every parse event can be located with a
/// binary search instead of rescanning the content.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    content: &'a str,

    /// Byte offsets of each line break: `\n`, or a `\r` not followed by `\n`
    line_breaks: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(content: &'a str) -> Self {
        let bytes = content.as_bytes();
        let line_breaks = memchr::memchr2_iter(b'\n', b'\r', bytes)
            .filter(|&idx| bytes[idx] == b'\n' || bytes.get(idx + 1) != Some(&b'\n'))
            .collect();
        Self {
            content,
            line_breaks,
        }
    }

    /// The 1-based line containing `offset`.
    ///
    /// A newline character belongs to the line it terminates. Offsets past the
    /// end are clamped to the end of the content.
    pub fn line(&self, offset: usize) -> usize {
        let offset = offset.min(self.content.len());
        match self.line_breaks.binary_search(&offset) {
            Ok(idx) | Err(idx) => idx + 1,
        }
    }

    /// The 1-based (line, column) of `offset`, with the column counted in
    /// characters.
    pub fn location(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.content.len());
        let line = self.line(offset);
        let line_start = if line == 1 {
            0
        } else {
            self.line_breaks[line - 2] + 1
        };
        let column = self
            .content
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        (line, column + 1)
    }
}
