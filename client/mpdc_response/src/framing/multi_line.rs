use super::Framing;
use crate::position::Position;
use crate::tokens::{find_next_token, find_previous_token, BlockTokens};

/// Records spanning several lines.
///
/// A record starts at a line keyed by a start token and runs up to, but not
/// including, the next line keyed by an end token. The end set may differ
/// from the start set when several entry kinds interleave in one response:
/// a `file` record also ends where a `directory` entry begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiLine<'t> {
    start: BlockTokens<'t>,
    end: BlockTokens<'t>,
}

impl<'t> MultiLine<'t> {
    /// Records open on `start` keys and close before the next `end` key
    pub fn new(start: BlockTokens<'t>, end: BlockTokens<'t>) -> Self {
        Self { start, end }
    }

    /// Records open on `tokens` keys and close before the next one
    pub fn single(tokens: BlockTokens<'t>) -> Self {
        Self::new(tokens, tokens)
    }

    /// Keys that open a record
    pub fn start_tokens(&self) -> BlockTokens<'t> {
        self.start
    }

    /// Keys that close a record
    pub fn end_tokens(&self) -> BlockTokens<'t> {
        self.end
    }

    fn end_after(&self, text: &str, begin: usize) -> usize {
        // The last record runs to the end of the response.
        find_next_token(text, begin + 1, self.end).unwrap_or(text.len())
    }
}

impl Framing for MultiLine<'_> {
    fn name(&self) -> &'static str {
        "multi-line"
    }

    fn next_begin(&self, text: &str, position: Position) -> Option<usize> {
        find_next_token(text, position.offset_or_zero(), self.start)
    }

    fn next_end(&self, text: &str, _position: Position, next_begin: usize) -> Option<usize> {
        Some(self.end_after(text, next_begin))
    }

    fn previous_begin(&self, text: &str, position: Position) -> Option<usize> {
        find_previous_token(text, position.offset_or_zero(), self.start)
    }

    fn previous_end(&self, text: &str, _position: Position, previous_begin: usize) -> Option<usize> {
        Some(self.end_after(text, previous_begin))
    }
}
