//! Borrowed records built from scanned sub-ranges
//!
//! These are the stock record factories: [`raw`] hands back the sub-range
//! itself, [`Block::new`] wraps it for key lookups. Both borrow the response
//! and never copy it.

use logos::{Lexer as LogosLexer, Logos};

use crate::tokens::KEY_DELIMITER;

/// One line of a record, as seen by the pair lexer
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"\n")]
pub enum LineToken<'s> {
    /// A `key: value` line
    #[regex(r"[^:\n]+: [^\n]*", split_pair, priority = 4)]
    Pair((&'s str, &'s str)),

    /// Any other non-empty line, such as `OK` or `list_OK`
    #[regex(r"[^\n]+", |lex| lex.slice(), priority = 1)]
    Bare(&'s str),
}

fn split_pair<'s>(lex: &mut LogosLexer<'s, LineToken<'s>>) -> Option<(&'s str, &'s str)> {
    lex.slice().split_once(KEY_DELIMITER)
}

/// A borrowed `key: value` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair<'a> {
    /// The key, without the delimiter
    pub key: &'a str,
    /// The value, without the line terminator
    pub value: &'a str,
}

/// Iterator over the `key: value` lines of a record
pub struct Pairs<'a> {
    inner: LogosLexer<'a, LineToken<'a>>,
}

impl<'a> Pairs<'a> {
    /// Lex the pairs in `text`; lines without a delimiter are skipped
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: LineToken::lexer(text),
        }
    }
}

impl<'a> Iterator for Pairs<'a> {
    type Item = Pair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(LineToken::Pair((key, value))) => return Some(Pair { key, value }),
                // Bare lines and lexing errors carry no pair
                Ok(LineToken::Bare(_)) | Err(_) => continue,
            }
        }
    }
}

/// Identity record factory: the record is the sub-range itself.
pub fn raw(text: &str) -> &str {
    text
}

/// A record made of one or more `key: value` lines.
///
/// The first pair names the record: its key is the kind (`file`,
/// `directory`, ...) and its value the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block<'a> {
    text: &'a str,
}

impl<'a> Block<'a> {
    /// Wrap a scanned sub-range
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// The underlying sub-range, terminators included
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Key of the first pair
    pub fn kind(&self) -> Option<&'a str> {
        self.pairs().next().map(|pair| pair.key)
    }

    /// Value of the first pair
    pub fn name(&self) -> Option<&'a str> {
        self.pairs().next().map(|pair| pair.value)
    }

    /// Value of the first pair keyed `key`
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs()
            .find(|pair| pair.key == key)
            .map(|pair| pair.value)
    }

    /// Every pair of the record, in order
    pub fn pairs(&self) -> Pairs<'a> {
        Pairs::new(self.text)
    }

    /// Returns true if the record spans no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
