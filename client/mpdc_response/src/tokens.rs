//! Block tokens and the line-start token matcher
//!
//! A block token is a literal key such as `file` or `directory`. It marks a
//! record boundary only when it starts a line and is immediately followed by
//! [`KEY_DELIMITER`]. The matcher never splits the response into lines up
//! front: it walks delimiter candidates and re-derives the key of each
//! candidate line from the nearest preceding newline.

use memchr::{memchr, memmem, memrchr};

/// Separator between a key and its value on one response line
pub const KEY_DELIMITER: &str = ": ";

/// Line terminator of the protocol
pub const LINE_TERMINATOR: u8 = b'\n';

/// A set of keys that open (or close) a record.
///
/// The keys must be sorted in ascending order. Membership is a binary search,
/// so an unsorted set silently misses boundaries instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTokens<'t> {
    tokens: &'t [&'t str],
}

impl<'t> BlockTokens<'t> {
    /// Wraps an already sorted slice of keys
    pub const fn new(tokens: &'t [&'t str]) -> Self {
        Self { tokens }
    }

    /// Returns true if `key` is one of the block tokens
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.tokens
            .binary_search_by(|probe| (*probe).cmp(key))
            .is_ok()
    }

    /// Returns true if the keys are in ascending order
    pub fn is_sorted(&self) -> bool {
        self.tokens.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// The underlying keys
    pub fn as_slice(&self) -> &'t [&'t str] {
        self.tokens
    }

    /// Number of keys in the set
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the set has no keys
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Start of the line that contains byte `at`
#[inline]
pub(crate) fn line_start_of(bytes: &[u8], at: usize) -> usize {
    memrchr(LINE_TERMINATOR, &bytes[..at]).map_or(0, |i| i + 1)
}

/// One past the terminator of the line that contains byte `at`, or the text
/// length for an unterminated last line
#[inline]
pub(crate) fn line_end_of(bytes: &[u8], at: usize) -> usize {
    memchr(LINE_TERMINATOR, &bytes[at..]).map_or(bytes.len(), |i| at + i + 1)
}

/// The value of the `key: value` line starting at `line_start`, without its
/// terminator. Lines without a delimiter have no value.
pub fn value_at(text: &str, line_start: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    let content_end =
        memchr(LINE_TERMINATOR, &bytes[line_start..]).map_or(bytes.len(), |i| line_start + i);
    let delimiter = memmem::find(&bytes[line_start..content_end], KEY_DELIMITER.as_bytes())?;
    Some(&text[line_start + delimiter + KEY_DELIMITER.len()..content_end])
}

/// Finds the first line at or after `from` whose key is a block token.
///
/// Returns the offset of that line's start.
pub fn find_next_token(text: &str, from: usize, tokens: BlockTokens<'_>) -> Option<usize> {
    let bytes = text.as_bytes();
    let delimiter = KEY_DELIMITER.as_bytes();
    let mut cursor = from;

    while cursor < bytes.len() {
        let candidate = cursor + memmem::find(&bytes[cursor..], delimiter)?;
        let line_start = line_start_of(bytes, candidate);

        // A line that began before `from` cannot be a match.
        if line_start >= from && tokens.contains(&text[line_start..candidate]) {
            return Some(line_start);
        }

        // Only the first delimiter of a line separates its key.
        cursor = match memchr(LINE_TERMINATOR, &bytes[candidate..]) {
            Some(i) => candidate + i + 1,
            None => return None,
        };
    }

    None
}

/// Finds the last line starting strictly before `limit` whose key is a block
/// token.
///
/// Returns the offset of that line's start.
pub fn find_previous_token(text: &str, limit: usize, tokens: BlockTokens<'_>) -> Option<usize> {
    let bytes = text.as_bytes();
    let limit = limit.min(bytes.len());
    if limit == 0 {
        return None;
    }

    let delimiter = KEY_DELIMITER.as_bytes();
    let mut line_start = line_start_of(bytes, limit - 1);

    loop {
        let content_end =
            memchr(LINE_TERMINATOR, &bytes[line_start..]).map_or(bytes.len(), |i| line_start + i);
        if let Some(i) = memmem::find(&bytes[line_start..content_end], delimiter) {
            if tokens.contains(&text[line_start..line_start + i]) {
                return Some(line_start);
            }
        }

        if line_start == 0 {
            return None;
        }
        line_start = line_start_of(bytes, line_start - 1);
    }
}
