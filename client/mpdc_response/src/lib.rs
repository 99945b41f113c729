//! Response scanning for the mpdc client
//!
//! This crate turns one complete, line-oriented `key: value` server reply into
//! a sequence of records without copying the reply. A [`Scanner`] walks the
//! reply forward and backward, asking a [`Framing`] strategy where each record
//! begins and ends, and hands every resolved sub-range to a record factory.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

#[macro_use]
mod macros;

pub mod error;
pub mod framing;
pub mod position;
pub mod presets;
pub mod record;
pub mod scanner;
pub mod tokens;

// Re-export the main types for convenience
pub use error::{Direction, ScanError, ScanResult};
pub use framing::{
    count_records, Framing, FullBlock, MultiLine, SeparatorBounded, SingleLine, StreamAwareLine,
};
pub use position::Position;
pub use record::{Block, Pair, Pairs};
pub use scanner::{Discard, RecordFactory, Scanner, ScannerConfig};
pub use tokens::{BlockTokens, KEY_DELIMITER};
