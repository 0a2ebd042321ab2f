use thiserror::Error;

/// A single diagnostic produced when an element fails to match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct MatchError {
    offset: usize,
    kind: MatchErrorKind,
}

impl MatchError {
    pub fn new(offset: usize, kind: MatchErrorKind) -> MatchError {
        MatchError { offset, kind }
    }

    /// Byte offset into the parsed input where the mismatch was detected.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> &MatchErrorKind {
        &self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchErrorKind {
    /// The remaining input is a strict prefix of the literal.
    #[error("expected '{expected}' but found {found} of {required} bytes")]
    Starving { expected: String, found: usize, required: usize },
    #[error("unexpected '{found}', expected '{expected}'")]
    Unexpected { found: String, expected: String },
}

/// Raised while building a grammar, never while parsing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("a {0} needs at least one operand")]
    EmptyOperands(&'static str),
}
