/// A forward-only cursor over the lines of a text document.
///
/// Every reader in this crate is a small state machine that alternates between seeking a
/// marker line and consuming the block that follows it. The cursor never moves backwards.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// Returns the 1-based number of the line the cursor points at.
    pub fn line_number(&self) -> usize {
        self.pos + 1
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Returns the current line without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consumes the current line, returning it with its 1-based line number.
    pub fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some((self.pos, line))
    }

    /// Skips up to `count` lines, stopping early at the end of the input.
    pub fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.lines.len());
    }

    /// Consumes lines until one satisfies `predicate`, returning that line.
    ///
    /// The matching line is consumed as well. Returns `None`, with the cursor at the end of
    /// the input, if no remaining line matches.
    pub fn seek<F>(&mut self, mut predicate: F) -> Option<(usize, &'a str)>
    where
        F: FnMut(&str) -> bool,
    {
        while let Some((number, line)) = self.next_line() {
            if predicate(line) {
                return Some((number, line));
            }
        }
        None
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

/// Parses the first three tokens of `tokens` as floating point numbers.
///
/// Returns `None` if fewer than three tokens are present or any of them is not a number.
pub(crate) fn parse_triple(tokens: &[&str]) -> Option<[f64; 3]> {
    match tokens {
        [a, b, c, ..] => Some([a.parse().ok()?, b.parse().ok()?, c.parse().ok()?]),
        _ => None,
    }
}
