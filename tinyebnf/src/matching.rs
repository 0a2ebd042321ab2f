use log::trace;

use crate::error::{MatchError, MatchErrorKind};
use crate::grammar::{Alternation, Concatenation, GrammarElement, Repetition};
use crate::node::{AlternationNode, ConcatenationNode, ParseNode, RepetitionNode, TerminalNode};
use crate::result::{ParseFailure, ParseResult};
use crate::Span;

pub(crate) type MatchResult<'g, 'i> = Result<(Span<'i>, ParseNode<'g>), ParseFailure<'g>>;

impl GrammarElement {
    /// Matches this element against the start of `input`.
    ///
    /// Input after the matched prefix is left alone, so a success does not mean
    /// the whole input was consumed. Compare [ParseNode::len] with the input length for that.
    pub fn parse(&self, input: &str) -> ParseResult<'_> {
        self.parse_span(Span::new(input)).map(|(_, node)| node).into()
    }

    pub(crate) fn parse_span<'g, 'i>(&'g self, span: Span<'i>) -> MatchResult<'g, 'i> {
        trace!(target: "tinyebnf", "trying {} at offset {}", self, span.offset());
        let result = match self {
            GrammarElement::Terminal(terminal) => literal(self, terminal.value(), span),
            GrammarElement::Sequence(sequence) => all(self, sequence, span),
            GrammarElement::Choice(choice) => one_of(self, choice, span),
            GrammarElement::Repetition(repetition) => zero_or_more(self, repetition, span),
        };
        match &result {
            Ok((_, node)) => trace!(target: "tinyebnf", "matched {} ({} bytes)", self, node.len()),
            Err(failure) => trace!(target: "tinyebnf", "no match for {} ({} errors)", self, failure.errors().len()),
        }
        result
    }
}

/// Matches `expected` as a prefix of the span.
///
/// # Errors
/// A [MatchErrorKind::Starving] is returned if the input ends inside the literal and a [MatchErrorKind::Unexpected] when it differs.
fn literal<'g, 'i>(element: &'g GrammarElement, expected: &str, span: Span<'i>) -> MatchResult<'g, 'i> {
    if span.left.starts_with(expected) {
        let node = TerminalNode::new(element, expected);
        return Ok((span.incremented(expected.len()), node.into()));
    }

    let kind = if expected.starts_with(span.left) {
        MatchErrorKind::Starving { expected: String::from(expected), found: span.left.len(), required: expected.len() }
    } else {
        let found = span.peek(expected.chars().count());
        MatchErrorKind::Unexpected { found: String::from(found), expected: String::from(expected) }
    };
    Err(ParseFailure::new(element, vec![MatchError::new(span.offset(), kind)]))
}

/// Every element in order, each starting where the previous one stopped.
///
/// # Errors
/// The errors of the first element that fails; later elements are never tried.
fn all<'g, 'i>(element: &'g GrammarElement, sequence: &'g Concatenation, mut span: Span<'i>) -> MatchResult<'g, 'i> {
    let mut children = Vec::with_capacity(sequence.elements().len());
    for child in sequence {
        match child.parse_span(span) {
            Ok((new_span, node)) => {
                children.push(node);
                span = new_span;
            }
            Err(failure) => return Err(ParseFailure::new(element, failure.into_errors())),
        }
    }
    Ok((span, ConcatenationNode::new(element, children).into()))
}

/// The first branch that matches, every branch starting from the same span.
///
/// # Errors
/// The errors of all branches, in declaration order.
fn one_of<'g, 'i>(element: &'g GrammarElement, choice: &'g Alternation, span: Span<'i>) -> MatchResult<'g, 'i> {
    let mut errors = Vec::with_capacity(choice.elements().len());
    for branch in choice {
        match branch.parse_span(span) {
            Ok((span, node)) => return Ok((span, AlternationNode::new(element, node).into())),
            Err(failure) => errors.extend(failure.into_errors()),
        }
    }
    Err(ParseFailure::new(element, errors))
}

/// Never fails. Stops on the first mismatch, at the end of input, or on a match that made no progress.
fn zero_or_more<'g, 'i>(element: &'g GrammarElement, repetition: &'g Repetition, mut span: Span<'i>) -> MatchResult<'g, 'i> {
    let mut children = Vec::new();
    while !span.left.is_empty() {
        let Ok((new_span, node)) = repetition.inner().parse_span(span) else {
            break;
        };
        if new_span.offset() == span.offset() {
            trace!(target: "tinyebnf", "{} matched nothing at offset {}, stopping", repetition.inner(), span.offset());
            break;
        }
        children.push(node);
        span = new_span;
    }
    Ok((span, RepetitionNode::new(element, children).into()))
}
