//! Token sets and scanners for the common server replies

use crate::framing::{FullBlock, MultiLine, SeparatorBounded, SingleLine, StreamAwareLine};
use crate::record::{raw, Block};
use crate::scanner::Scanner;
use crate::tokens::BlockTokens;

/// Separator the server writes after each sub-command of a command list
pub const LIST_SEPARATOR: &str = "list_OK";

/// Every key that opens a database entry
pub const ENTRY_TOKENS: BlockTokens<'static> = BlockTokens::new(&["directory", "file", "playlist"]);

/// Key that opens a song
pub const FILE_TOKENS: BlockTokens<'static> = BlockTokens::new(&["file"]);

/// Key that opens a stored playlist
pub const PLAYLIST_TOKENS: BlockTokens<'static> = BlockTokens::new(&["playlist"]);

/// Factory of the block-record presets
pub type BlockFactory<'a> = fn(&'a str) -> Block<'a>;

/// Factory of the raw-record presets
pub type RawFactory<'a> = fn(&'a str) -> &'a str;

/// Every line of `text`, one raw record each
pub fn lines<'a>(text: &'a str) -> Scanner<'a, FullBlock, RawFactory<'a>> {
    Scanner::new(text, FullBlock::new(), raw as RawFactory<'a>)
}

/// Directory, file and playlist entries of a database listing
pub fn entries<'a>(text: &'a str) -> Scanner<'a, MultiLine<'static>, BlockFactory<'a>> {
    Scanner::new(text, MultiLine::single(ENTRY_TOKENS), Block::new as BlockFactory<'a>)
}

/// Songs of a listing that may interleave directories and playlists
pub fn songs<'a>(text: &'a str) -> Scanner<'a, MultiLine<'static>, BlockFactory<'a>> {
    Scanner::new(
        text,
        MultiLine::new(FILE_TOKENS, ENTRY_TOKENS),
        Block::new as BlockFactory<'a>,
    )
}

/// Stored playlist lines of a `listplaylists` reply
pub fn playlists<'a>(text: &'a str) -> Scanner<'a, SingleLine<'static>, BlockFactory<'a>> {
    Scanner::new(text, SingleLine::new(PLAYLIST_TOKENS), Block::new as BlockFactory<'a>)
}

/// `file` lines of a playlist listing, skipping those valued `stream_marker`
pub fn playlist_files<'a>(
    text: &'a str,
    stream_marker: &'a str,
) -> Scanner<'a, StreamAwareLine<'a>, BlockFactory<'a>> {
    Scanner::new(
        text,
        StreamAwareLine::new(FILE_TOKENS, stream_marker),
        Block::new as BlockFactory<'a>,
    )
}

/// Sub-results of a command list reply, one raw record per sub-command
pub fn command_list<'a>(text: &'a str) -> Scanner<'a, SeparatorBounded<'static>, RawFactory<'a>> {
    Scanner::new(text, SeparatorBounded::new(LIST_SEPARATOR), raw as RawFactory<'a>)
}
