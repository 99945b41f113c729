use memchr::memmem;

use super::Framing;
use crate::position::Position;
use crate::tokens::LINE_TERMINATOR;

/// Records are the sub-results of a batched command list.
///
/// Each sub-command's output is terminated by a separator line holding only
/// the separator literal (`list_OK` on the wire). The literal is opaque: it
/// is matched verbatim and only when it fills a whole line. Empty
/// sub-results are records too; nothing after a trailing separator is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorBounded<'s> {
    separator: &'s str,
}

impl<'s> SeparatorBounded<'s> {
    /// Creates the framing for `separator`, which must not be empty
    pub fn new(separator: &'s str) -> Self {
        Self { separator }
    }

    /// The separator literal
    pub fn separator(&self) -> &'s str {
        self.separator
    }

    /// End of the separator line starting at `at`, if one starts there
    fn separator_line_at(&self, bytes: &[u8], at: usize) -> Option<usize> {
        let literal = self.separator.as_bytes();
        if literal.is_empty() || (at > 0 && bytes[at - 1] != LINE_TERMINATOR) {
            return None;
        }
        if !bytes[at..].starts_with(literal) {
            return None;
        }
        let after = at + literal.len();
        match bytes.get(after) {
            None => Some(after),
            Some(&LINE_TERMINATOR) => Some(after + 1),
            Some(_) => None,
        }
    }

    /// Start of the first separator line at or after `from`
    fn find_separator(&self, bytes: &[u8], from: usize) -> Option<usize> {
        let literal = self.separator.as_bytes();
        if literal.is_empty() {
            return None;
        }
        memmem::find_iter(&bytes[from..], literal)
            .map(|i| from + i)
            .find(|&at| self.separator_line_at(bytes, at).is_some())
    }

    /// Start and end of the last separator line ending at or before `end`
    fn last_separator_line(&self, bytes: &[u8], end: usize) -> Option<(usize, usize)> {
        let literal = self.separator.as_bytes();
        if literal.is_empty() {
            return None;
        }
        let mut limit = end;
        while let Some(at) = memmem::rfind(&bytes[..limit], literal) {
            if let Some(line_end) = self.separator_line_at(bytes, at) {
                if line_end <= end {
                    return Some((at, line_end));
                }
            }
            if at == 0 {
                break;
            }
            limit = at + literal.len() - 1;
        }
        None
    }

    /// Start of the gap between records that `offset` sits in.
    ///
    /// A cursor on a separator line is the end of the record before it. A
    /// cursor just past a separator line is the same gap as that separator's
    /// start. This also keeps a trailing separator from opening an empty
    /// record at the end of the text.
    fn gap_start(&self, bytes: &[u8], offset: usize) -> usize {
        if self.separator_line_at(bytes, offset).is_some() {
            return offset;
        }
        match self.last_separator_line(bytes, offset) {
            Some((at, line_end)) if line_end == offset => at,
            _ => offset,
        }
    }

    /// End of the record right before the cursor
    fn record_end_before(&self, bytes: &[u8], position: Position) -> Option<usize> {
        let offset = position.offset()?;
        Some(self.gap_start(bytes, offset))
    }
}

impl Framing for SeparatorBounded<'_> {
    fn name(&self) -> &'static str {
        "separator-bounded"
    }

    fn anchor(&self, text: &str, offset: usize) -> Position {
        // A record may begin at offset 0, so 0 means "before the first record".
        match offset {
            0 => Position::BeforeStart,
            offset => Position::Offset(self.gap_start(text.as_bytes(), offset)),
        }
    }

    fn next_begin(&self, text: &str, position: Position) -> Option<usize> {
        let bytes = text.as_bytes();
        let begin = match position {
            Position::BeforeStart => 0,
            Position::Offset(offset) => self.separator_line_at(bytes, offset).unwrap_or(offset),
        };
        (begin < bytes.len()).then_some(begin)
    }

    fn next_end(&self, text: &str, _position: Position, next_begin: usize) -> Option<usize> {
        let bytes = text.as_bytes();
        self.find_separator(bytes, next_begin)
            .or_else(|| (next_begin < bytes.len()).then_some(bytes.len()))
    }

    fn previous_begin(&self, text: &str, position: Position) -> Option<usize> {
        let bytes = text.as_bytes();
        let end = self.record_end_before(bytes, position)?;
        Some(self.last_separator_line(bytes, end).map_or(0, |(_, line_end)| line_end))
    }

    fn previous_end(&self, text: &str, position: Position, _previous_begin: usize) -> Option<usize> {
        self.record_end_before(text.as_bytes(), position)
    }

    fn rewind_position(&self, text: &str, previous_begin: usize) -> Position {
        if previous_begin == 0 {
            return Position::BeforeStart;
        }
        // Land on the separator that closed the record before this one, so an
        // empty sub-result is never mistaken for the cursor itself.
        match self.last_separator_line(text.as_bytes(), previous_begin) {
            Some((at, line_end)) if line_end == previous_begin => Position::Offset(at),
            _ => Position::Offset(previous_begin),
        }
    }
}
