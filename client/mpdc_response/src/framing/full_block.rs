use memchr::memchr_iter;

use super::Framing;
use crate::position::Position;
use crate::tokens::{line_end_of, line_start_of, LINE_TERMINATOR};

/// One record per line.
///
/// A record includes its `\n`; an unterminated last line is a record too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullBlock;

impl FullBlock {
    /// Creates the line-per-record framing
    pub fn new() -> Self {
        FullBlock
    }
}

impl Framing for FullBlock {
    fn name(&self) -> &'static str {
        "full-block"
    }

    fn next_begin(&self, text: &str, position: Position) -> Option<usize> {
        let offset = position.offset_or_zero();
        (offset < text.len()).then_some(offset)
    }

    fn next_end(&self, text: &str, _position: Position, next_begin: usize) -> Option<usize> {
        Some(line_end_of(text.as_bytes(), next_begin))
    }

    fn previous_begin(&self, text: &str, position: Position) -> Option<usize> {
        match position.offset_or_zero() {
            0 => None,
            // Skip the terminator of the record right before the cursor.
            offset => Some(line_start_of(text.as_bytes(), offset - 1)),
        }
    }

    fn previous_end(&self, _text: &str, position: Position, _previous_begin: usize) -> Option<usize> {
        Some(position.offset_or_zero())
    }

    fn rewind_position(&self, _text: &str, previous_begin: usize) -> Position {
        // Every line is a record, so nothing precedes the first one.
        Position::Offset(previous_begin)
    }

    fn count_hint(&self, text: &str) -> Option<usize> {
        let bytes = text.as_bytes();
        let terminated = memchr_iter(LINE_TERMINATOR, bytes).count();
        let partial = bytes.last().is_some_and(|&last| last != LINE_TERMINATOR);
        Some(terminated + usize::from(partial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_at_start() {
        let text = "a: 1\nb: 2\n";
        let framing = FullBlock::new();
        let start = Position::Offset(0);
        assert_eq!(framing.next_begin(text, start), Some(0));
        assert_eq!(framing.next_end(text, start, 0), Some(5));
        assert_eq!(framing.previous_begin(text, start), None);
    }

    #[test]
    fn test_previous_skips_own_terminator() {
        let text = "a: 1\nb: 2\n";
        let framing = FullBlock::new();
        let at = Position::Offset(10);
        assert_eq!(framing.previous_begin(text, at), Some(5));
        assert_eq!(framing.previous_end(text, at, 5), Some(10));
        assert_eq!(framing.previous_begin(text, Position::Offset(5)), Some(0));
    }

    #[test]
    fn test_unterminated_last_line() {
        let text = "a: 1\nb: 2";
        let framing = FullBlock::new();
        assert_eq!(framing.next_end(text, Position::Offset(5), 5), Some(9));
        assert_eq!(framing.next_begin(text, Position::Offset(9)), None);
        assert_eq!(framing.count_hint(text), Some(2));
    }

    #[test]
    fn test_count_hint() {
        let framing = FullBlock::new();
        assert_eq!(framing.count_hint(""), Some(0));
        assert_eq!(framing.count_hint("a\n\nb\n"), Some(3));
    }
}
