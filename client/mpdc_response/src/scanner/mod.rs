//! Bidirectional record scanner
//!
//! The [`Scanner`] owns the cursor over one response and the four memoized
//! boundaries around it. It never copies the response: every record is built
//! by a [`RecordFactory`] from a borrowed sub-range.

use crate::error::{Direction, ScanError, ScanResult};
use crate::framing::Framing;
use crate::position::{BoundaryCache, Position};

/// Configuration for a scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScannerConfig {
    /// Byte offset the cursor starts at; must not be negative
    pub position: isize,
}

/// Builds one record from the sub-range of the response it spans.
pub trait RecordFactory<'a> {
    /// The record type produced
    type Record;

    /// Called exactly once per produced record
    fn make(&mut self, text: &'a str) -> Self::Record;
}

impl<'a, F, R> RecordFactory<'a> for F
where
    F: FnMut(&'a str) -> R,
{
    type Record = R;

    fn make(&mut self, text: &'a str) -> R {
        self(text)
    }
}

/// Factory that throws every record away, for counting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discard;

impl<'a> RecordFactory<'a> for Discard {
    type Record = ();

    #[inline]
    fn make(&mut self, _text: &'a str) {}
}

/// A cursor over one response that yields records in both directions
pub struct Scanner<'a, F, R> {
    /// The response being scanned
    text: &'a str,
    /// Where records begin and end
    framing: F,
    /// Turns sub-ranges into records
    factory: R,
    /// Current cursor position
    position: Position,
    /// Boundaries around `position`
    cache: BoundaryCache,
}

impl<'a, F: Framing, R: RecordFactory<'a>> Scanner<'a, F, R> {
    /// Create a scanner positioned at the start of `text`
    pub fn new(text: &'a str, framing: F, factory: R) -> Self {
        Self::starting_at(text, framing, factory, 0)
    }

    /// Create a scanner starting at byte offset `position`
    pub fn with_position(text: &'a str, framing: F, factory: R, position: isize) -> ScanResult<Self> {
        Self::with_config(text, framing, factory, ScannerConfig { position })
    }

    /// Create a scanner with custom configuration
    pub fn with_config(
        text: &'a str,
        framing: F,
        factory: R,
        config: ScannerConfig,
    ) -> ScanResult<Self> {
        let offset = validate_start(text, config.position)?;
        Ok(Self::starting_at(text, framing, factory, offset))
    }

    fn starting_at(text: &'a str, framing: F, factory: R, offset: usize) -> Self {
        let position = framing.anchor(text, offset);
        scan_debug!(
            "{} scanner over {} bytes starting at {}",
            framing.name(),
            text.len(),
            position
        );

        Self {
            text,
            framing,
            factory,
            position,
            cache: BoundaryCache::new(),
        }
    }

    /// The response being scanned
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The framing strategy in use
    pub fn framing(&self) -> &F {
        &self.framing
    }

    /// Current cursor position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns true if a record follows the cursor
    pub fn has_next(&mut self) -> bool {
        self.next_index().is_some()
    }

    /// Returns true if a record precedes the cursor
    pub fn has_previous(&mut self) -> bool {
        self.previous_index().is_some()
    }

    /// End offset of the record after the cursor.
    ///
    /// This is the end boundary, not the start: it is where the cursor will
    /// be after [`Scanner::next_record`].
    pub fn next_index(&mut self) -> Option<usize> {
        let end = self.resolve_next_end();
        if let Some(end) = end {
            assert!(
                Position::Offset(end) != self.position,
                "{} framing put the next record end on the cursor at {}",
                self.framing.name(),
                end
            );
        }
        end
    }

    /// Start offset of the record before the cursor
    pub fn previous_index(&mut self) -> Option<usize> {
        let begin = self.resolve_previous_begin();
        if let Some(begin) = begin {
            let landing = self.resolve_rewind(begin);
            assert!(
                landing != self.position,
                "{} framing put the previous record start {} on the cursor at {}",
                self.framing.name(),
                begin,
                self.position
            );
        }
        begin
    }

    /// Sub-range of the record after the cursor, without building it
    pub fn next_range(&mut self) -> Option<std::ops::Range<usize>> {
        let end = self.next_index()?;
        let begin = self.resolve_next_begin()?;
        Some(begin..end)
    }

    /// Sub-range of the record before the cursor, without building it
    pub fn previous_range(&mut self) -> Option<std::ops::Range<usize>> {
        let begin = self.previous_index()?;
        let end = self.resolve_previous_end()?;
        Some(begin..end)
    }

    /// Build the record after the cursor and move past it
    pub fn next_record(&mut self) -> ScanResult<R::Record> {
        let Some(range) = self.next_range() else {
            scan_trace!("{} scanner exhausted forward at {}", self.framing.name(), self.position);
            return Err(ScanError::Exhausted {
                direction: Direction::Forward,
            });
        };

        let text = self.text;
        let record = self.factory.make(&text[range.clone()]);
        self.move_to(Position::Offset(range.end));
        Ok(record)
    }

    /// Build the record before the cursor and move back over it
    pub fn previous_record(&mut self) -> ScanResult<R::Record> {
        let Some(range) = self.previous_range() else {
            scan_trace!("{} scanner exhausted backward at {}", self.framing.name(), self.position);
            return Err(ScanError::Exhausted {
                direction: Direction::Backward,
            });
        };

        let text = self.text;
        let record = self.factory.make(&text[range.clone()]);
        let landing = self.resolve_rewind(range.start);
        self.move_to(landing);
        Ok(record)
    }

    fn move_to(&mut self, position: Position) {
        scan_trace!(
            "{} scanner moved from {} to {}",
            self.framing.name(),
            self.position,
            position
        );
        self.position = position;
        self.cache.invalidate();
    }

    fn resolve_next_begin(&mut self) -> Option<usize> {
        let (text, position, framing) = (self.text, self.position, &self.framing);
        self.cache
            .next_begin
            .get_or_resolve(|| framing.next_begin(text, position))
    }

    fn resolve_next_end(&mut self) -> Option<usize> {
        let begin = self.resolve_next_begin();
        let (text, position, framing) = (self.text, self.position, &self.framing);
        self.cache
            .next_end
            .get_or_resolve(|| begin.and_then(|begin| framing.next_end(text, position, begin)))
    }

    fn resolve_previous_begin(&mut self) -> Option<usize> {
        let (text, position, framing) = (self.text, self.position, &self.framing);
        self.cache
            .previous_begin
            .get_or_resolve(|| framing.previous_begin(text, position))
    }

    fn resolve_previous_end(&mut self) -> Option<usize> {
        let begin = self.resolve_previous_begin();
        let (text, position, framing) = (self.text, self.position, &self.framing);
        self.cache.previous_end.get_or_resolve(|| {
            begin.and_then(|begin| framing.previous_end(text, position, begin))
        })
    }

    fn resolve_rewind(&mut self, previous_begin: usize) -> Position {
        let (text, framing) = (self.text, &self.framing);
        *self
            .cache
            .rewind
            .get_or_insert_with(|| framing.rewind_position(text, previous_begin))
    }
}

impl<'a, F: Framing> Scanner<'a, F, Discard> {
    /// Create a scanner that only counts records
    pub fn counting(text: &'a str, framing: F) -> Self {
        Self::new(text, framing, Discard)
    }
}

impl<'a, F: Framing, R: RecordFactory<'a>> Iterator for Scanner<'a, F, R> {
    type Item = R::Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().ok()
    }
}

impl<F: std::fmt::Debug, R> std::fmt::Debug for Scanner<'_, F, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("framing", &self.framing)
            .field("position", &self.position)
            .field("len", &self.text.len())
            .field("cache", &self.cache)
            .finish()
    }
}

/// Number of records in `text` under `framing`, without building any.
pub fn count_records<F: Framing>(text: &str, framing: F) -> usize {
    match framing.count_hint(text) {
        Some(count) => count,
        None => Scanner::counting(text, framing).count(),
    }
}

fn validate_start(text: &str, position: isize) -> ScanResult<usize> {
    let offset = usize::try_from(position).map_err(|_| ScanError::NegativePosition(position))?;
    if offset > text.len() {
        return Err(ScanError::PositionOutOfRange {
            position: offset,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(offset) {
        return Err(ScanError::NotCharBoundary(offset));
    }
    Ok(offset)
}
