//! The generic parse tree produced by the matcher.
//!
//! All nodes of one parse attempt live in a single [`ParseArena`];
//! children are stable [`NodeId`] indices into it, never owning
//! references. The arena is torn down in bulk when the parse attempt and
//! its transformation complete.

use crate::error::NodeCastError;

/// A stable handle to a node inside a [`ParseArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    const fn index(self) -> usize {
        self.0
    }
}

/// The payload of a matched node.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNode {
    /// An ordered sequence match.
    List(Vec<NodeId>),
    /// A present-or-absent optional match.
    Optional(Option<NodeId>),
    /// Zero or more repetitions of a sub-expression.
    Repeat(Vec<NodeId>),
    /// An ordered-choice match: the selected alternative and its
    /// zero-based index.
    Choice {
        /// The matched alternative.
        child: NodeId,
        /// Which alternative matched, in declaration order.
        selected: usize,
    },
    /// A word-like token accepted by an identifier pattern.
    Identifier(String),
    /// A literal keyword match; carries the matched token's text.
    Keyword(String),
    /// A literal match against an operator-classified token.
    Operator(String),
    /// A number literal token.
    Number(String),
    /// A string literal token.
    String(String),
}

impl ParseNode {
    /// The variant name, used in cast-failure diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::List(_) => "List",
            Self::Optional(_) => "Optional",
            Self::Repeat(_) => "Repeat",
            Self::Choice { .. } => "Choice",
            Self::Identifier(_) => "Identifier",
            Self::Keyword(_) => "Keyword",
            Self::Operator(_) => "Operator",
            Self::Number(_) => "Number",
            Self::String(_) => "String",
        }
    }
}

/// One matched node: payload plus the grammar rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// The node payload.
    pub node: ParseNode,
    /// Name of the rule that produced this node; empty for anonymous
    /// sub-expressions.
    pub rule_name: String,
}

impl ParseResult {
    fn cast_error(&self, expected: &'static str) -> NodeCastError {
        NodeCastError {
            expected,
            found: self.node.kind_name(),
        }
    }

    /// Returns the children of a `List` node.
    ///
    /// # Errors
    ///
    /// Returns a [`NodeCastError`] if this is any other variant.
    pub fn expect_list(&self) -> Result<&[NodeId], NodeCastError> {
        match &self.node {
            ParseNode::List(children) => Ok(children),
            _ => Err(self.cast_error("List")),
        }
    }

    /// Returns the children of a `Repeat` node.
    ///
    /// # Errors
    ///
    /// Returns a [`NodeCastError`] if this is any other variant.
    pub fn expect_repeat(&self) -> Result<&[NodeId], NodeCastError> {
        match &self.node {
            ParseNode::Repeat(children) => Ok(children),
            _ => Err(self.cast_error("Repeat")),
        }
    }

    /// Returns the present-or-absent child of an `Optional` node.
    ///
    /// # Errors
    ///
    /// Returns a [`NodeCastError`] if this is any other variant.
    pub fn expect_optional(&self) -> Result<Option<NodeId>, NodeCastError> {
        match &self.node {
            ParseNode::Optional(child) => Ok(*child),
            _ => Err(self.cast_error("Optional")),
        }
    }

    /// Returns the selected child and alternative index of a `Choice`.
    ///
    /// # Errors
    ///
    /// Returns a [`NodeCastError`] if this is any other variant.
    pub fn expect_choice(&self) -> Result<(NodeId, usize), NodeCastError> {
        match &self.node {
            ParseNode::Choice { child, selected } => Ok((*child, *selected)),
            _ => Err(self.cast_error("Choice")),
        }
    }

    /// Returns the text of an `Identifier` node.
    ///
    /// # Errors
    ///
    /// Returns a [`NodeCastError`] if this is any other variant.
    pub fn expect_identifier(&self) -> Result<&str, NodeCastError> {
        match &self.node {
            ParseNode::Identifier(text) => Ok(text),
            _ => Err(self.cast_error("Identifier")),
        }
    }

    /// Returns the text of a `Keyword` node.
    ///
    /// # Errors
    ///
    /// Returns a [`NodeCastError`] if this is any other variant.
    pub fn expect_keyword(&self) -> Result<&str, NodeCastError> {
        match &self.node {
            ParseNode::Keyword(text) => Ok(text),
            _ => Err(self.cast_error("Keyword")),
        }
    }

    /// Returns the text of a `Number` node.
    ///
    /// # Errors
    ///
    /// Returns a [`NodeCastError`] if this is any other variant.
    pub fn expect_number(&self) -> Result<&str, NodeCastError> {
        match &self.node {
            ParseNode::Number(text) => Ok(text),
            _ => Err(self.cast_error("Number")),
        }
    }

    /// Returns the text of a `String` node.
    ///
    /// # Errors
    ///
    /// Returns a [`NodeCastError`] if this is any other variant.
    pub fn expect_string(&self) -> Result<&str, NodeCastError> {
        match &self.node {
            ParseNode::String(text) => Ok(text),
            _ => Err(self.cast_error("String")),
        }
    }
}

/// Bulk storage for all nodes of one parse attempt.
///
/// Nodes are appended and never removed; dropping the arena frees the
/// whole tree at once.
#[derive(Debug, Default)]
pub struct ParseArena {
    nodes: Vec<ParseResult>,
}

impl ParseArena {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocates an anonymous node and returns its handle.
    pub fn alloc(&mut self, node: ParseNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ParseResult {
            node,
            rule_name: String::new(),
        });
        id
    }

    /// Returns the node behind `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &ParseResult {
        &self.nodes[id.index()]
    }

    /// Stamps the producing rule's name onto a node.
    pub fn set_rule_name(&mut self, id: NodeId, name: &str) {
        name.clone_into(&mut self.nodes[id.index()].rule_name);
    }

    /// Number of nodes allocated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Re-serializes the token texts consumed under `root`, in match
    /// order. Predicates consume nothing and contribute nothing.
    #[must_use]
    pub fn leaf_texts(&self, root: NodeId) -> Vec<&str> {
        let mut texts = Vec::new();
        self.collect_leaves(root, &mut texts);
        texts
    }

    fn collect_leaves<'a>(&'a self, id: NodeId, texts: &mut Vec<&'a str>) {
        match &self.get(id).node {
            ParseNode::List(children) | ParseNode::Repeat(children) => {
                for child in children {
                    self.collect_leaves(*child, texts);
                }
            }
            ParseNode::Optional(child) => {
                if let Some(child) = child {
                    self.collect_leaves(*child, texts);
                }
            }
            ParseNode::Choice { child, .. } => self.collect_leaves(*child, texts),
            ParseNode::Identifier(text)
            | ParseNode::Keyword(text)
            | ParseNode::Operator(text)
            | ParseNode::Number(text)
            | ParseNode::String(text) => texts.push(text),
        }
    }
}
