//! Cursor positions and the memoized boundary offsets around them

use std::fmt;

/// Where the cursor sits inside a response.
///
/// `BeforeStart` is the state "before the first character". Only framings
/// that may see a record boundary at offset 0 ever use it; everywhere else
/// the cursor is an `Offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    /// Before the first character of the response
    BeforeStart,
    /// A byte offset into the response, at most its length
    Offset(usize),
}

impl Position {
    /// The byte offset, or `None` for `BeforeStart`
    pub fn offset(self) -> Option<usize> {
        match self {
            Position::BeforeStart => None,
            Position::Offset(offset) => Some(offset),
        }
    }

    /// The byte offset, treating `BeforeStart` as 0
    pub fn offset_or_zero(self) -> usize {
        self.offset().unwrap_or(0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::Offset(0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::BeforeStart => write!(f, "-1"),
            Position::Offset(offset) => write!(f, "{offset}"),
        }
    }
}

/// One memoized boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    /// Not looked up since the cursor last moved
    #[default]
    Uncomputed,
    /// Looked up; `None` means no such boundary exists
    Resolved(Option<usize>),
}

impl Slot {
    /// Returns the resolved value, running `compute` first if needed.
    #[inline]
    pub fn get_or_resolve(&mut self, compute: impl FnOnce() -> Option<usize>) -> Option<usize> {
        match *self {
            Slot::Resolved(value) => value,
            Slot::Uncomputed => {
                let value = compute();
                *self = Slot::Resolved(value);
                value
            }
        }
    }
}

/// The four boundaries around the cursor, plus where stepping back lands.
///
/// Every slot is only valid for the position it was computed at, so the
/// owner must call [`BoundaryCache::invalidate`] on every cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryCache {
    /// Start of the record after the cursor
    pub next_begin: Slot,
    /// End of the record after the cursor
    pub next_end: Slot,
    /// Start of the record before the cursor
    pub previous_begin: Slot,
    /// End of the record before the cursor
    pub previous_end: Slot,
    /// Cursor position after stepping back over the record before it
    pub rewind: Option<Position>,
}

impl BoundaryCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every memoized boundary
    #[inline]
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    /// Returns true if no slot has been resolved yet
    pub fn is_clear(&self) -> bool {
        [
            self.next_begin,
            self.next_end,
            self.previous_begin,
            self.previous_end,
        ]
        .iter()
        .all(|slot| *slot == Slot::Uncomputed)
            && self.rewind.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_before_start_orders_first() {
        assert!(Position::BeforeStart < Position::Offset(0));
        assert_eq!(Position::BeforeStart.offset(), None);
        assert_eq!(Position::BeforeStart.offset_or_zero(), 0);
        assert_eq!(Position::Offset(7).to_string(), "7");
    }

    #[test]
    fn test_slot_resolves_once() {
        let mut slot = Slot::Uncomputed;
        let mut calls = 0;
        assert_eq!(
            slot.get_or_resolve(|| {
                calls += 1;
                Some(4)
            }),
            Some(4)
        );
        assert_eq!(slot.get_or_resolve(|| unreachable!()), Some(4));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_resolved_none_is_not_uncomputed() {
        let mut slot = Slot::Uncomputed;
        assert_eq!(slot.get_or_resolve(|| None), None);
        assert_eq!(slot, Slot::Resolved(None));
    }

    #[test]
    fn test_invalidate_clears_every_slot() {
        let mut cache = BoundaryCache::new();
        cache.next_begin.get_or_resolve(|| Some(0));
        cache.previous_end.get_or_resolve(|| None);
        cache.rewind = Some(Position::BeforeStart);
        assert!(!cache.is_clear());
        cache.invalidate();
        assert!(cache.is_clear());
    }
}
