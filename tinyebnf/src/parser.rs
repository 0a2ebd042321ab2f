use std::io::{self, Read};

use log::debug;

use crate::grammar::GrammarElement;
use crate::result::ParseResult;

/// Entry point that matches input against one root grammar element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbnfParser {
    root: GrammarElement,
}

impl EbnfParser {
    pub fn new(root: impl Into<GrammarElement>) -> EbnfParser {
        EbnfParser { root: root.into() }
    }

    pub fn root(&self) -> &GrammarElement {
        &self.root
    }

    /// Matches the root element against `input`. A mismatch is reported in the
    /// returned [ParseResult], never as a panic.
    pub fn parse(&self, input: &str) -> ParseResult<'_> {
        debug!(target: "tinyebnf", "parsing {} bytes with {}", input.len(), self.root);
        let result = self.root.parse(input);
        match &result {
            ParseResult::Success(node) => debug!(target: "tinyebnf", "parse succeeded, consumed {} bytes", node.len()),
            ParseResult::Failure(failure) => debug!(target: "tinyebnf", "parse failed with {} errors", failure.errors().len()),
        }
        result
    }

    /// Reads all of `reader` and parses it.
    ///
    /// # Errors
    /// Any error from reading, including input that is not valid UTF-8.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> io::Result<ParseResult<'_>> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Ok(self.parse(&input))
    }
}
