use super::Framing;
use crate::position::Position;
use crate::tokens::{find_next_token, find_previous_token, line_end_of, value_at, BlockTokens};

/// One record per line, but only lines whose key is a block token.
///
/// Lines with other keys between two qualifying lines belong to no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleLine<'t> {
    tokens: BlockTokens<'t>,
}

impl<'t> SingleLine<'t> {
    /// Creates the framing for lines keyed by one of `tokens` (sorted)
    pub fn new(tokens: BlockTokens<'t>) -> Self {
        Self { tokens }
    }

    /// The keys that mark a record
    pub fn tokens(&self) -> BlockTokens<'t> {
        self.tokens
    }
}

impl Framing for SingleLine<'_> {
    fn name(&self) -> &'static str {
        "single-line"
    }

    fn next_begin(&self, text: &str, position: Position) -> Option<usize> {
        find_next_token(text, position.offset_or_zero(), self.tokens)
    }

    fn next_end(&self, text: &str, _position: Position, next_begin: usize) -> Option<usize> {
        Some(line_end_of(text.as_bytes(), next_begin))
    }

    fn previous_begin(&self, text: &str, position: Position) -> Option<usize> {
        find_previous_token(text, position.offset_or_zero(), self.tokens)
    }

    fn previous_end(&self, text: &str, _position: Position, previous_begin: usize) -> Option<usize> {
        Some(line_end_of(text.as_bytes(), previous_begin))
    }
}

/// [`SingleLine`] that steps over token lines whose value is exactly the
/// stream marker.
///
/// Stream entries share their key with ordinary entries but are framed by a
/// different scanner, so this one treats them as plain lines. Only the exact
/// marker value is special; no other value is ever skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamAwareLine<'t> {
    line: SingleLine<'t>,
    marker: &'t str,
}

impl<'t> StreamAwareLine<'t> {
    /// Creates the framing for `tokens` lines, skipping those valued `marker`
    pub fn new(tokens: BlockTokens<'t>, marker: &'t str) -> Self {
        Self {
            line: SingleLine::new(tokens),
            marker,
        }
    }

    /// The value that disqualifies a token line
    pub fn marker(&self) -> &'t str {
        self.marker
    }

    fn is_stream(&self, text: &str, line_start: usize) -> bool {
        value_at(text, line_start) == Some(self.marker)
    }
}

impl Framing for StreamAwareLine<'_> {
    fn name(&self) -> &'static str {
        "stream-aware-line"
    }

    fn next_begin(&self, text: &str, position: Position) -> Option<usize> {
        let mut from = position.offset_or_zero();
        loop {
            let begin = find_next_token(text, from, self.line.tokens)?;
            if !self.is_stream(text, begin) {
                return Some(begin);
            }
            // Retry one position further.
            from = begin + 1;
        }
    }

    fn next_end(&self, text: &str, position: Position, next_begin: usize) -> Option<usize> {
        self.line.next_end(text, position, next_begin)
    }

    fn previous_begin(&self, text: &str, position: Position) -> Option<usize> {
        let mut limit = position.offset_or_zero();
        loop {
            let begin = find_previous_token(text, limit, self.line.tokens)?;
            if !self.is_stream(text, begin) {
                return Some(begin);
            }
            limit = begin;
        }
    }

    fn previous_end(&self, text: &str, position: Position, previous_begin: usize) -> Option<usize> {
        self.line.previous_end(text, position, previous_begin)
    }
}
