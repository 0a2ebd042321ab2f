use std::fmt::{self, Display};

use crate::error::GrammarError;

/// A composable piece of grammar.
///
/// Elements are immutable once built, so one grammar can be parsed against any
/// number of inputs (and threads) without being rebuilt.
///
/// # Usage
///
/// ```
/// use tinyebnf::{choice, literal, repeat, sequence};
///
/// let digit = choice(choice("0", "1"), "2");
/// let number = sequence(digit.clone(), repeat(digit));
///
/// assert!(number.parse("2101").is_success());
/// assert!(number.parse("x").is_failure());
/// assert_eq!(literal("a"), "a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GrammarElement {
    Terminal(Terminal),
    Sequence(Concatenation),
    Choice(Alternation),
    Repetition(Repetition),
}

impl GrammarElement {
    /// Builds a flat sequence out of any number of operands.
    ///
    /// # Errors
    /// [GrammarError::EmptyOperands] is returned when `operands` is empty.
    pub fn sequence_of<I>(operands: I) -> Result<GrammarElement, GrammarError>
    where
        I: IntoIterator,
        I::Item: Into<GrammarElement>,
    {
        Concatenation::new(operands).map(GrammarElement::Sequence)
    }

    /// Like [GrammarElement::sequence_of] but can never be empty.
    pub fn sequence_from<I>(first: impl Into<GrammarElement>, rest: I) -> GrammarElement
    where
        I: IntoIterator<Item = GrammarElement>,
    {
        let operands = std::iter::once(first.into()).chain(rest);
        GrammarElement::Sequence(Concatenation { elements: flatten_sequence(operands) })
    }

    /// Builds a flat choice out of any number of operands.
    ///
    /// # Errors
    /// [GrammarError::EmptyOperands] is returned when `operands` is empty.
    pub fn choice_of<I>(operands: I) -> Result<GrammarElement, GrammarError>
    where
        I: IntoIterator,
        I::Item: Into<GrammarElement>,
    {
        Alternation::new(operands).map(GrammarElement::Choice)
    }

    /// Like [GrammarElement::choice_of] but can never be empty.
    pub fn choice_from<I>(first: impl Into<GrammarElement>, rest: I) -> GrammarElement
    where
        I: IntoIterator<Item = GrammarElement>,
    {
        let operands = std::iter::once(first.into()).chain(rest);
        GrammarElement::Choice(Alternation { elements: flatten_choice(operands) })
    }
}

/// Creates a terminal that matches `value` exactly.
pub fn literal(value: impl Into<String>) -> GrammarElement {
    GrammarElement::Terminal(Terminal::new(value))
}

/// Concatenates two elements. Operands that are sequences themselves are spliced in.
pub fn sequence(left: impl Into<GrammarElement>, right: impl Into<GrammarElement>) -> GrammarElement {
    GrammarElement::sequence_from(left, [right.into()])
}

/// Alternates two elements. Operands that are choices themselves are spliced in.
pub fn choice(left: impl Into<GrammarElement>, right: impl Into<GrammarElement>) -> GrammarElement {
    GrammarElement::choice_from(left, [right.into()])
}

/// Matches `inner` zero or more times.
pub fn repeat(inner: impl Into<GrammarElement>) -> GrammarElement {
    GrammarElement::Repetition(Repetition::new(inner))
}

fn flatten_sequence<I>(operands: I) -> Vec<GrammarElement>
where
    I: IntoIterator<Item = GrammarElement>,
{
    let mut elements = Vec::new();
    for operand in operands {
        match operand {
            GrammarElement::Sequence(sequence) => elements.extend(sequence.elements),
            other => elements.push(other),
        }
    }
    elements
}

fn flatten_choice<I>(operands: I) -> Vec<GrammarElement>
where
    I: IntoIterator<Item = GrammarElement>,
{
    let mut elements = Vec::new();
    for operand in operands {
        match operand {
            GrammarElement::Choice(choice) => elements.extend(choice.elements),
            other => elements.push(other),
        }
    }
    elements
}

/// A literal string, matched by exact prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Terminal {
    value: String,
}

impl Terminal {
    pub fn new(value: impl Into<String>) -> Terminal {
        Terminal { value: value.into() }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Elements that must all match, one after the other.
///
/// Never empty and never directly contains another sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Concatenation {
    elements: Vec<GrammarElement>,
}

impl Concatenation {
    /// # Errors
    /// [GrammarError::EmptyOperands] is returned when `operands` is empty.
    pub fn new<I>(operands: I) -> Result<Concatenation, GrammarError>
    where
        I: IntoIterator,
        I::Item: Into<GrammarElement>,
    {
        let elements = flatten_sequence(operands.into_iter().map(Into::into));
        if elements.is_empty() {
            return Err(GrammarError::EmptyOperands("sequence"));
        }
        Ok(Concatenation { elements })
    }

    pub fn elements(&self) -> &[GrammarElement] {
        &self.elements
    }
}

/// Elements tried in order; the first one that matches wins.
///
/// Never empty and never directly contains another choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alternation {
    elements: Vec<GrammarElement>,
}

impl Alternation {
    /// # Errors
    /// [GrammarError::EmptyOperands] is returned when `operands` is empty.
    pub fn new<I>(operands: I) -> Result<Alternation, GrammarError>
    where
        I: IntoIterator,
        I::Item: Into<GrammarElement>,
    {
        let elements = flatten_choice(operands.into_iter().map(Into::into));
        if elements.is_empty() {
            return Err(GrammarError::EmptyOperands("choice"));
        }
        Ok(Alternation { elements })
    }

    pub fn elements(&self) -> &[GrammarElement] {
        &self.elements
    }
}

/// One element matched greedily, zero or more times.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repetition {
    inner: Box<GrammarElement>,
}

impl Repetition {
    pub fn new(inner: impl Into<GrammarElement>) -> Repetition {
        Repetition { inner: Box::new(inner.into()) }
    }

    pub fn inner(&self) -> &GrammarElement {
        &self.inner
    }
}

impl<'a> IntoIterator for &'a Concatenation {
    type Item = &'a GrammarElement;
    type IntoIter = std::slice::Iter<'a, GrammarElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a Alternation {
    type Item = &'a GrammarElement;
    type IntoIter = std::slice::Iter<'a, GrammarElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl From<&str> for GrammarElement {
    fn from(value: &str) -> Self {
        literal(value)
    }
}

impl From<String> for GrammarElement {
    fn from(value: String) -> Self {
        literal(value)
    }
}

impl From<&GrammarElement> for GrammarElement {
    fn from(element: &GrammarElement) -> Self {
        element.clone()
    }
}

impl From<Terminal> for GrammarElement {
    fn from(terminal: Terminal) -> Self {
        GrammarElement::Terminal(terminal)
    }
}

impl From<Concatenation> for GrammarElement {
    fn from(sequence: Concatenation) -> Self {
        GrammarElement::Sequence(sequence)
    }
}

impl From<Alternation> for GrammarElement {
    fn from(choice: Alternation) -> Self {
        GrammarElement::Choice(choice)
    }
}

impl From<Repetition> for GrammarElement {
    fn from(repetition: Repetition) -> Self {
        GrammarElement::Repetition(repetition)
    }
}

impl From<&str> for Terminal {
    fn from(value: &str) -> Self {
        Terminal::new(value)
    }
}

impl PartialEq<str> for Terminal {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Terminal {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl PartialEq<Terminal> for &str {
    fn eq(&self, other: &Terminal) -> bool {
        *self == other.value
    }
}

impl PartialEq<str> for GrammarElement {
    fn eq(&self, other: &str) -> bool {
        matches!(self, GrammarElement::Terminal(terminal) if terminal == other)
    }
}

impl PartialEq<&str> for GrammarElement {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<GrammarElement> for &str {
    fn eq(&self, other: &GrammarElement) -> bool {
        other == self
    }
}

impl Display for GrammarElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarElement::Terminal(terminal) => terminal.fmt(f),
            GrammarElement::Sequence(sequence) => sequence.fmt(f),
            GrammarElement::Choice(choice) => choice.fmt(f),
            GrammarElement::Repetition(repetition) => repetition.fmt(f),
        }
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.value)
    }
}

impl Display for Concatenation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, element) in self.elements.iter().enumerate() {
            if n > 0 {
                f.write_str(" + ")?;
            }
            // A bare choice would swallow its neighbours.
            if let GrammarElement::Choice(choice) = element {
                write!(f, "({})", choice)?;
            } else {
                write!(f, "{}", element)?;
            }
        }
        Ok(())
    }
}

impl Display for Alternation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, element) in self.elements.iter().enumerate() {
            if n > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

impl Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{choice, seq};

    fn elements(element: &GrammarElement) -> &[GrammarElement] {
        match element {
            GrammarElement::Sequence(sequence) => sequence.elements(),
            GrammarElement::Choice(choice) => choice.elements(),
            other => panic!("{} has no element list", other),
        }
    }

    #[rstest]
    #[case("a", "b")]
    #[case("b", "c")]
    fn terminal_keeps_its_value(#[case] value: &str, #[case] not_matching: &str) {
        let terminal = Terminal::new(value);
        assert_eq!(terminal.value(), value);
        assert_ne!(terminal.value(), not_matching);
    }

    #[rstest]
    #[case("a", "b")]
    #[case("b", "a")]
    fn terminals_compare_by_value(#[case] value: &str, #[case] other: &str) {
        assert_eq!(Terminal::new(value), Terminal::new(value));
        assert_eq!(Terminal::from(value), Terminal::new(String::from(value)));
        assert_eq!(Terminal::new(value), value);
        assert_eq!(value, Terminal::new(value));
        assert_ne!(Terminal::new(value), other);
        assert_eq!(literal(value), value);
        assert_ne!(literal(value), other);
    }

    #[test]
    fn only_terminals_equal_strings() {
        assert_ne!(repeat("a"), "a");
        assert_ne!(GrammarElement::sequence_of(["a"]).unwrap(), "a");
    }

    #[test]
    fn concatenated_terminals_keep_their_order() {
        let expression = sequence("a", "b");
        assert_eq!(elements(&expression), &[literal("a"), literal("b")]);
    }

    #[rstest]
    #[case(vec![vec!["a", "b"], vec!["c", "d"]], vec!["a", "b", "c", "d"])]
    #[case(vec![vec!["a", "q"], vec!["n", "r"], vec!["p", "l", "s"]], vec!["a", "q", "n", "r", "p", "l", "s"])]
    fn nested_sequences_are_flattened(#[case] groups: Vec<Vec<&str>>, #[case] flattened: Vec<&str>) {
        let nested: Vec<GrammarElement> = groups
            .into_iter()
            .map(|group| GrammarElement::sequence_of(group).unwrap())
            .collect();

        let expression = GrammarElement::sequence_of(nested.clone()).unwrap();
        assert_eq!(elements(&expression), flattened.as_slice());

        let chained = nested[1..]
            .iter()
            .fold(nested[0].clone(), |expression, next| sequence(expression, next));
        assert_eq!(chained, expression);
    }

    #[rstest]
    #[case(vec![vec!["a", "b"], vec!["c", "d"]], vec!["a", "b", "c", "d"])]
    #[case(vec![vec!["d", "b"], vec!["c", "d"], vec!["j", "q", "s"]], vec!["d", "b", "c", "d", "j", "q", "s"])]
    fn nested_choices_are_flattened(#[case] groups: Vec<Vec<&str>>, #[case] flattened: Vec<&str>) {
        let nested: Vec<GrammarElement> = groups
            .into_iter()
            .map(|group| GrammarElement::choice_of(group).unwrap())
            .collect();

        let expression = GrammarElement::choice_of(nested).unwrap();
        assert_eq!(elements(&expression), flattened.as_slice());
    }

    #[test]
    fn chained_choices_collect_every_terminal() {
        let expression = choice(choice("a", "b"), "c");
        assert_eq!(elements(&expression), &["a", "b", "c"]);
    }

    #[test]
    fn flattening_stops_at_other_variants() {
        let inner_choice = choice("b", "c");
        let expression = sequence("a", inner_choice.clone());
        assert_eq!(elements(&expression), &[literal("a"), inner_choice]);

        let repeated = repeat(sequence("x", "y"));
        let expression = sequence(repeated.clone(), "z");
        assert_eq!(elements(&expression), &[repeated, literal("z")]);
    }

    #[test]
    fn single_operand_is_promoted() {
        let single = GrammarElement::sequence_of(["c"]).unwrap();
        let expression = sequence(sequence("a", "b"), single);
        assert_eq!(expression, GrammarElement::sequence_of(["a", "b", "c"]).unwrap());
    }

    #[test]
    fn empty_operand_lists_are_rejected() {
        let none: [&str; 0] = [];
        assert_eq!(GrammarElement::sequence_of(none), Err(GrammarError::EmptyOperands("sequence")));
        assert_eq!(GrammarElement::choice_of(none), Err(GrammarError::EmptyOperands("choice")));
        assert!(Concatenation::new(Vec::<GrammarElement>::new()).is_err());
        assert!(Alternation::new(Vec::<GrammarElement>::new()).is_err());
    }

    #[test]
    fn sequences_iterate_over_their_elements() {
        let sequence = Concatenation::new(["a", "b", "c"]).unwrap();
        let values: Vec<String> = sequence.into_iter().map(|element| element.to_string()).collect();
        assert_eq!(values, ["'a'", "'b'", "'c'"]);
    }

    #[test]
    fn repetition_wraps_one_element() {
        let repetition = Repetition::new(choice("a", "b"));
        assert_eq!(repetition.inner(), &choice("a", "b"));
        assert_eq!(repeat("a"), repeat(literal("a")));
        assert_ne!(repeat("a"), repeat("b"));
    }

    #[test]
    fn displays_in_grammar_notation() {
        assert_eq!(literal("a").to_string(), "'a'");
        assert_eq!(sequence("a", "b").to_string(), "'a' + 'b'");
        assert_eq!(choice("a", "b").to_string(), "'a' | 'b'");
        assert_eq!(repeat("a").to_string(), "['a']");
        assert_eq!(sequence("a", choice("b", repeat("c"))).to_string(), "'a' + ('b' | ['c'])");
    }

    #[test]
    fn macros_build_flat_expressions() {
        let tail = seq!("c", "d");
        assert_eq!(seq!("a", "b", tail), GrammarElement::sequence_of(["a", "b", "c", "d"]).unwrap());
        assert_eq!(seq!("a"), GrammarElement::sequence_of(["a"]).unwrap());
        assert_eq!(choice!("a", choice!("b", "c")), GrammarElement::choice_of(["a", "b", "c"]).unwrap());
    }
}
