use crate::error::MatchError;
use crate::grammar::GrammarElement;
use crate::node::ParseNode;

/// The outcome of matching a grammar element against some input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult<'g> {
    Success(ParseNode<'g>),
    Failure(ParseFailure<'g>),
}

impl<'g> ParseResult<'g> {
    pub fn success(node: impl Into<ParseNode<'g>>) -> ParseResult<'g> {
        ParseResult::Success(node.into())
    }

    /// A failure of `element`, reporting `first` followed by `rest`.
    pub fn failure<I>(element: &'g GrammarElement, first: MatchError, rest: I) -> ParseResult<'g>
    where
        I: IntoIterator<Item = MatchError>,
    {
        let errors = std::iter::once(first).chain(rest).collect();
        ParseResult::Failure(ParseFailure::new(element, errors))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn root_node(&self) -> Option<&ParseNode<'g>> {
        match self {
            ParseResult::Success(node) => Some(node),
            ParseResult::Failure(_) => None,
        }
    }

    pub fn failing_element(&self) -> Option<&'g GrammarElement> {
        match self {
            ParseResult::Success(_) => None,
            ParseResult::Failure(failure) => Some(failure.element),
        }
    }

    /// Empty on success.
    pub fn errors(&self) -> &[MatchError] {
        match self {
            ParseResult::Success(_) => &[],
            ParseResult::Failure(failure) => &failure.errors,
        }
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }

    pub fn into_result(self) -> Result<ParseNode<'g>, ParseFailure<'g>> {
        self.into()
    }
}

impl<'g> From<Result<ParseNode<'g>, ParseFailure<'g>>> for ParseResult<'g> {
    fn from(result: Result<ParseNode<'g>, ParseFailure<'g>>) -> Self {
        match result {
            Ok(node) => ParseResult::Success(node),
            Err(failure) => ParseResult::Failure(failure),
        }
    }
}

impl<'g> From<ParseResult<'g>> for Result<ParseNode<'g>, ParseFailure<'g>> {
    fn from(result: ParseResult<'g>) -> Self {
        match result {
            ParseResult::Success(node) => Ok(node),
            ParseResult::Failure(failure) => Err(failure),
        }
    }
}

/// Why an element did not match. Always carries at least one error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure<'g> {
    element: &'g GrammarElement,
    errors: Vec<MatchError>,
}

impl<'g> ParseFailure<'g> {
    pub(crate) fn new(element: &'g GrammarElement, errors: Vec<MatchError>) -> ParseFailure<'g> {
        debug_assert!(!errors.is_empty(), "a failure without errors");
        ParseFailure { element, errors }
    }

    pub fn element(&self) -> &'g GrammarElement {
        self.element
    }

    pub fn errors(&self) -> &[MatchError] {
        &self.errors
    }

    pub(crate) fn into_errors(self) -> Vec<MatchError> {
        self.errors
    }
}
