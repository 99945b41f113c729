//! Framing strategies
//!
//! A framing strategy decides where records begin and end inside a response.
//! The scanner owns the cursor and the boundary cache; the strategy only
//! answers the four boundary questions for a given cursor position.
//!
//! - [`FullBlock`]: every line is a record
//! - [`SingleLine`]: every line starting with a block token is a record
//! - [`StreamAwareLine`]: like `SingleLine`, but skips lines carrying a marker value
//! - [`MultiLine`]: a record runs from a start token line to the next end token line
//! - [`SeparatorBounded`]: records are the sub-results between separator lines

mod full_block;
mod multi_line;
mod separator;
mod single_line;

pub use full_block::FullBlock;
pub use multi_line::MultiLine;
pub use separator::SeparatorBounded;
pub use single_line::{SingleLine, StreamAwareLine};

pub use crate::scanner::count_records;
use crate::position::Position;

/// Boundary resolution for one record layout.
///
/// All offsets are byte offsets into the response text. `None` means the
/// boundary does not exist. The `*_end` lookups are only asked once the
/// matching `*_begin` lookup returned an offset.
pub trait Framing {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Maps a caller-supplied start offset to a cursor position.
    fn anchor(&self, _text: &str, offset: usize) -> Position {
        Position::Offset(offset)
    }

    /// Start of the first record at or after the cursor
    fn next_begin(&self, text: &str, position: Position) -> Option<usize>;

    /// End (exclusive) of the record starting at `next_begin`
    fn next_end(&self, text: &str, position: Position, next_begin: usize) -> Option<usize>;

    /// Start of the last record before the cursor
    fn previous_begin(&self, text: &str, position: Position) -> Option<usize>;

    /// End (exclusive) of the record starting at `previous_begin`
    fn previous_end(&self, text: &str, position: Position, previous_begin: usize) -> Option<usize>;

    /// Where the cursor lands after stepping back over the record that
    /// starts at `previous_begin`.
    ///
    /// Stepping back over the first record returns to offset 0, so lines
    /// ahead of it that open no record are walked again going forward.
    fn rewind_position(&self, text: &str, previous_begin: usize) -> Position {
        match self.previous_begin(text, Position::Offset(previous_begin)) {
            Some(_) => Position::Offset(previous_begin),
            None => Position::Offset(0),
        }
    }

    /// Number of records from the start of `text`, if the strategy can tell
    /// without walking them.
    fn count_hint(&self, _text: &str) -> Option<usize> {
        None
    }
}
