use crate::ast::{Ast, NodeId};
use color_print::ceprintln;
use thiserror::Error;

// Every compile error carries the node it was raised at
#[derive(Debug, Error)]
pub enum Error {
    #[error("Program has no statements")]
    EmptyProgram,

    #[error("Unexpected node: expected {1}")]
    UnexpectedNode(NodeId, String),

    #[error("Missing {1}")]
    MissingChild(NodeId, &'static str),

    #[error("Expected an identifier")]
    ExpectedIdent(NodeId),

    #[error("Duplicate function: `{1}`")]
    DuplicateFunction(NodeId, String),

    #[error("Unknown function: `{1}`")]
    UnknownFunction(NodeId, String),

    #[error("Function `{1}` takes {2} argument(s), got {3}")]
    ArityMismatch(NodeId, String, usize, usize),

    #[error("Unresolved variable: `{1}`")]
    UnresolvedVariable(NodeId, String),

    #[error("Index of `{1}` does not match its declaration")]
    ShapeMismatch(NodeId, String),

    #[error("Invalid declaration of `{1}`")]
    InvalidDeclaration(NodeId, String),

    #[error("Duplicate variable: `{1}`")]
    DuplicateVariable(NodeId, String),

    #[error("Function definitions cannot be nested")]
    NestedDefine(NodeId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot decode AST: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// The node compilation stopped at.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Error::UnexpectedNode(node, _)
            | Error::MissingChild(node, _)
            | Error::ExpectedIdent(node)
            | Error::DuplicateFunction(node, _)
            | Error::UnknownFunction(node, _)
            | Error::ArityMismatch(node, _, _, _)
            | Error::UnresolvedVariable(node, _)
            | Error::ShapeMismatch(node, _)
            | Error::InvalidDeclaration(node, _)
            | Error::DuplicateVariable(node, _)
            | Error::NestedDefine(node) => Some(*node),
            Error::EmptyProgram | Error::Io(_) | Error::Yaml(_) => None,
        }
    }

    /// Print error with the offending subtree
    pub fn print_diag(&self, ast: &Ast) {
        ceprintln!("<red,bold>error</>: {}", self);
        if let Some(node) = self.node() {
            ceprintln!("     <blue>--></> <underline>node {}</>", node);
            ceprintln!("      <blue>|</>");
            ceprintln!("      <blue>|</> {}", ast.render(node));
            ceprintln!("      <blue>|</>");
        }
    }
}
