//! A tiny combinator library for EBNF-style grammars.
//!
//! Grammars are built in memory out of four kinds of [GrammarElement]: terminals,
//! sequences, choices and repetitions. Matching one against some text yields a
//! [ParseResult] holding either a [ParseNode] tree or the errors that explain why
//! the text did not match.
//!
//! ```
//! use tinyebnf::{choice, repeat, seq, EbnfParser};
//!
//! let bit = choice("0", "1");
//! let parser = EbnfParser::new(seq!("0b", bit.clone(), repeat(bit)));
//!
//! let result = parser.parse("0b1011");
//! assert!(result.is_success());
//! assert_eq!(result.root_node().unwrap().text(), "0b1011");
//!
//! let result = parser.parse("0x1f");
//! assert_eq!(result.error_messages(), ["unexpected '0x', expected '0b' at offset 0"]);
//! ```
//!
//! Matching is traced through [log] under the `tinyebnf` target.

extern crate self as tinyebnf;

pub mod error;
pub mod grammar;
pub mod node;
pub mod parser;
pub mod result;
mod matching;

pub use error::{GrammarError, MatchError, MatchErrorKind};
pub use grammar::{choice, literal, repeat, sequence, Alternation, Concatenation, GrammarElement, Repetition, Terminal};
pub use node::{AlternationNode, ConcatenationNode, ParseNode, RepetitionNode, TerminalNode};
pub use parser::EbnfParser;
pub use result::{ParseFailure, ParseResult};

/// Builds a flat sequence out of one or more operands, e.g. `seq!("a", element, "c")`.
pub use tinyebnf_macro::seq;
/// Builds a flat choice out of one or more operands, e.g. `choice!("a", element, "c")`.
pub use tinyebnf_macro::choice;

/// The cursor used while matching: the input that is left plus where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span<'a> {
    src_idx: usize,
    pub left: &'a str,
}

impl<'a> Span<'a> {
    pub fn new(left: &'a str) -> Span<'a> {
        Span { left, src_idx: 0 }
    }

    /// Skips `n` bytes. `n` must fall on a char boundary.
    pub fn incremented(&self, n: usize) -> Span<'a> {
        Span {
            left: &self.left[n..],
            src_idx: self.src_idx + n,
        }
    }

    /// Byte offset of the cursor in the whole input.
    pub fn offset(&self) -> usize {
        self.src_idx
    }

    /// Up to `chars` characters from the start of what is left.
    pub fn peek(&self, chars: usize) -> &'a str {
        match self.left.char_indices().nth(chars) {
            Some((end, _)) => &self.left[..end],
            None => self.left,
        }
    }
}
