use std::fmt::{self, Display};

use crate::grammar::GrammarElement;

/// A node of the parse tree, shaped like the grammar element that produced it.
///
/// Nodes borrow the grammar they were parsed with but own the text they matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode<'g> {
    Terminal(TerminalNode<'g>),
    Concatenation(ConcatenationNode<'g>),
    Alternation(AlternationNode<'g>),
    Repetition(RepetitionNode<'g>),
}

impl<'g> ParseNode<'g> {
    /// The grammar element that produced this node.
    pub fn related_element(&self) -> &'g GrammarElement {
        match self {
            ParseNode::Terminal(node) => node.element,
            ParseNode::Concatenation(node) => node.element,
            ParseNode::Alternation(node) => node.element,
            ParseNode::Repetition(node) => node.element,
        }
    }

    pub fn children(&self) -> &[ParseNode<'g>] {
        match self {
            ParseNode::Terminal(_) => &[],
            ParseNode::Concatenation(node) => &node.children,
            ParseNode::Alternation(node) => std::slice::from_ref(node.result()),
            ParseNode::Repetition(node) => &node.children,
        }
    }

    /// Number of bytes of input this node consumed.
    pub fn len(&self) -> usize {
        match self {
            ParseNode::Terminal(node) => node.text.len(),
            _ => self.children().iter().map(ParseNode::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The matched text, i.e. the text of every terminal below this node in order.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl<'g> Display for ParseNode<'g> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseNode::Terminal(node) => f.write_str(&node.text),
            _ => self.children().iter().try_for_each(|child| child.fmt(f)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalNode<'g> {
    element: &'g GrammarElement,
    text: String,
}

impl<'g> TerminalNode<'g> {
    pub fn new(element: &'g GrammarElement, text: impl Into<String>) -> TerminalNode<'g> {
        TerminalNode { element, text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatenationNode<'g> {
    element: &'g GrammarElement,
    children: Vec<ParseNode<'g>>,
}

impl<'g> ConcatenationNode<'g> {
    pub fn new(element: &'g GrammarElement, children: Vec<ParseNode<'g>>) -> ConcatenationNode<'g> {
        ConcatenationNode { element, children }
    }
}

/// Holds the node of the branch that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternationNode<'g> {
    element: &'g GrammarElement,
    result: Box<ParseNode<'g>>,
}

impl<'g> AlternationNode<'g> {
    pub fn new(element: &'g GrammarElement, result: ParseNode<'g>) -> AlternationNode<'g> {
        AlternationNode { element, result: Box::new(result) }
    }

    pub fn result(&self) -> &ParseNode<'g> {
        &self.result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepetitionNode<'g> {
    element: &'g GrammarElement,
    children: Vec<ParseNode<'g>>,
}

impl<'g> RepetitionNode<'g> {
    pub fn new(element: &'g GrammarElement, children: Vec<ParseNode<'g>>) -> RepetitionNode<'g> {
        RepetitionNode { element, children }
    }
}

impl<'g> From<TerminalNode<'g>> for ParseNode<'g> {
    fn from(node: TerminalNode<'g>) -> Self {
        ParseNode::Terminal(node)
    }
}

impl<'g> From<ConcatenationNode<'g>> for ParseNode<'g> {
    fn from(node: ConcatenationNode<'g>) -> Self {
        ParseNode::Concatenation(node)
    }
}

impl<'g> From<AlternationNode<'g>> for ParseNode<'g> {
    fn from(node: AlternationNode<'g>) -> Self {
        ParseNode::Alternation(node)
    }
}

impl<'g> From<RepetitionNode<'g>> for ParseNode<'g> {
    fn from(node: RepetitionNode<'g>) -> Self {
        ParseNode::Repetition(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{choice, literal, repeat, sequence};

    #[test]
    fn length_and_text_come_from_the_terminals() {
        let a = literal("ab");
        let b = literal("c");
        let either = choice("ab", "c");
        let many = repeat("c");
        let both = sequence("ab", many.clone());

        let repeated: ParseNode = RepetitionNode::new(
            &many,
            vec![TerminalNode::new(&b, "c").into(), TerminalNode::new(&b, "c").into()],
        )
        .into();
        let root: ParseNode = ConcatenationNode::new(&both, vec![TerminalNode::new(&a, "ab").into(), repeated]).into();

        assert_eq!(root.len(), 4);
        assert_eq!(root.text(), "abcc");
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.related_element(), &both);

        let picked: ParseNode = AlternationNode::new(&either, TerminalNode::new(&b, "c").into()).into();
        assert_eq!(picked.children(), &[ParseNode::from(TerminalNode::new(&b, "c"))]);
        assert_eq!(picked.to_string(), "c");
    }

    #[test]
    fn empty_repetition_consumes_nothing() {
        let many = repeat("x");
        let node: ParseNode = RepetitionNode::new(&many, Vec::new()).into();
        assert!(node.is_empty());
        assert_eq!(node.text(), "");
        assert!(node.children().is_empty());
    }

    #[test]
    fn nodes_compare_by_value() {
        let first = literal("a");
        let second = literal("a");
        assert_eq!(TerminalNode::new(&first, "a"), TerminalNode::new(&second, "a"));
        assert_ne!(TerminalNode::new(&first, "a"), TerminalNode::new(&literal("b"), "b"));
    }
}
