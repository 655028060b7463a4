//! Arena of AST nodes handed over by the frontend.
//!
//! Every node is a number literal, an identifier or a keyword with up to two
//! children. Statement, parameter and argument lists are cons chains: `left`
//! holds the rest of the list and `right` the element, so the first element
//! of a list is the innermost node. An identifier with a `right` child is an
//! indexed (array) reference.

mod keyword;
mod tree;

pub use keyword::{Arity, Keyword};
pub use tree::Tree;

use crate::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Label unique to this node, e.g. `while.1f`.
    pub fn label(self, prefix: &str) -> String {
        format!("{}.{:x}", prefix, self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Number(f64),
    Ident(String),
    Keyword(Keyword),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ------------------------------------------------------------------------
    // Builders

    pub fn push(&mut self, kind: NodeKind, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, left, right });
        id
    }

    pub fn number(&mut self, value: f64) -> NodeId {
        self.push(NodeKind::Number(value), None, None)
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        self.push(NodeKind::Ident(name.to_string()), None, None)
    }

    /// `name[index]`
    pub fn indexed(&mut self, name: &str, index: NodeId) -> NodeId {
        self.push(NodeKind::Ident(name.to_string()), None, Some(index))
    }

    pub fn keyword(&mut self, tag: Keyword, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        self.push(NodeKind::Keyword(tag), left, right)
    }

    pub fn binary(&mut self, tag: Keyword, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.keyword(tag, Some(lhs), Some(rhs))
    }

    pub fn unary(&mut self, tag: Keyword, operand: NodeId) -> NodeId {
        self.keyword(tag, None, Some(operand))
    }

    /// Cons chain of `tag` nodes over `items`; the first item ends up innermost.
    pub fn chain(&mut self, tag: Keyword, items: &[NodeId]) -> Option<NodeId> {
        items
            .iter()
            .fold(None, |rest, &item| Some(self.keyword(tag, rest, Some(item))))
    }

    pub fn stmts(&mut self, items: &[NodeId]) -> Option<NodeId> {
        self.chain(Keyword::Stmt, items)
    }

    pub fn params(&mut self, items: &[NodeId]) -> Option<NodeId> {
        self.chain(Keyword::Param, items)
    }

    pub fn assign(&mut self, target: NodeId, value: NodeId) -> NodeId {
        self.keyword(Keyword::Assign, Some(target), Some(value))
    }

    pub fn call(&mut self, name: &str, args: &[NodeId]) -> NodeId {
        let name = self.ident(name);
        let args = self.params(args);
        self.keyword(Keyword::Call, Some(name), args)
    }

    pub fn define(&mut self, name: &str, params: &[&str], body: &[NodeId]) -> NodeId {
        let name = self.ident(name);
        let params: Vec<NodeId> = params.iter().map(|param| self.ident(param)).collect();
        let params = self.params(&params);
        let func = self.keyword(Keyword::Func, Some(name), params);
        let body = self.stmts(body);
        self.keyword(Keyword::Define, Some(func), body)
    }

    /// Chains `stmts` into the program root.
    pub fn program(&mut self, stmts: &[NodeId]) -> Option<NodeId> {
        let root = self.stmts(stmts)?;
        self.set_root(root);
        Some(root)
    }

    // ------------------------------------------------------------------------
    // Accessors

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    pub fn as_keyword(&self, id: NodeId) -> Option<Keyword> {
        match self.kind(id) {
            NodeKind::Keyword(tag) => Some(*tag),
            _ => None,
        }
    }

    pub fn as_ident(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Ident(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self, id: NodeId) -> Option<f64> {
        match self.kind(id) {
            NodeKind::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn require_left(&self, id: NodeId, what: &'static str) -> Result<NodeId, Error> {
        self.left(id).ok_or(Error::MissingChild(id, what))
    }

    pub fn require_right(&self, id: NodeId, what: &'static str) -> Result<NodeId, Error> {
        self.right(id).ok_or(Error::MissingChild(id, what))
    }

    pub fn expect_keyword(&self, id: NodeId, tag: Keyword) -> Result<(), Error> {
        match self.as_keyword(id) {
            Some(found) if found == tag => Ok(()),
            _ => Err(Error::UnexpectedNode(id, format!("`{}`", tag))),
        }
    }

    pub fn expect_ident(&self, id: NodeId) -> Result<&str, Error> {
        self.as_ident(id).ok_or(Error::ExpectedIdent(id))
    }

    /// Elements of the `tag` chain starting at `head`, in source order.
    pub fn elements(&self, head: NodeId, tag: Keyword) -> Result<Vec<NodeId>, Error> {
        let mut items = Vec::new();
        let mut cursor = Some(head);
        while let Some(link) = cursor {
            self.expect_keyword(link, tag)?;
            items.push(self.require_right(link, "list element")?);
            cursor = self.left(link);
        }
        items.reverse();
        Ok(items)
    }

    /// Elements of an optional chain; an absent chain is empty.
    pub fn elements_of(&self, head: Option<NodeId>, tag: Keyword) -> Result<Vec<NodeId>, Error> {
        match head {
            Some(head) => self.elements(head, tag),
            None => Ok(Vec::new()),
        }
    }
}
