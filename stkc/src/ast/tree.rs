use super::{Ast, Keyword, NodeId, NodeKind};
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Serialized form of an AST as produced by a frontend.
///
/// ```yaml
/// keyword: stmt
/// right:
///   keyword: assign
///   left: { ident: x }
///   right: 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tree {
    Number(f64),
    Keyword {
        keyword: Keyword,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        left: Option<Box<Tree>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        right: Option<Box<Tree>>,
    },
    Ident {
        ident: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<Box<Tree>>,
    },
}

impl Ast {
    pub fn from_yaml(text: &str) -> Result<Ast, Error> {
        let tree: Option<Tree> = serde_yaml::from_str(text)?;
        let mut ast = Ast::new();
        if let Some(tree) = tree {
            let root = ast.lower(&tree);
            ast.set_root(root);
        }
        Ok(ast)
    }

    pub fn from_tree(tree: &Tree) -> Ast {
        let mut ast = Ast::new();
        let root = ast.lower(tree);
        ast.set_root(root);
        ast
    }

    fn lower(&mut self, tree: &Tree) -> NodeId {
        match tree {
            Tree::Number(value) => self.number(*value),
            Tree::Keyword {
                keyword,
                left,
                right,
            } => {
                let left = left.as_deref().map(|tree| self.lower(tree));
                let right = right.as_deref().map(|tree| self.lower(tree));
                self.keyword(*keyword, left, right)
            }
            Tree::Ident { ident, index } => {
                let index = index.as_deref().map(|tree| self.lower(tree));
                self.push(NodeKind::Ident(ident.clone()), None, index)
            }
        }
    }

    pub fn to_tree(&self, id: NodeId) -> Tree {
        let subtree = |child: Option<NodeId>| child.map(|child| Box::new(self.to_tree(child)));
        let node = self.node(id);
        match &node.kind {
            NodeKind::Number(value) => Tree::Number(*value),
            NodeKind::Ident(name) => Tree::Ident {
                ident: name.clone(),
                index: subtree(node.right),
            },
            NodeKind::Keyword(keyword) => Tree::Keyword {
                keyword: *keyword,
                left: subtree(node.left),
                right: subtree(node.right),
            },
        }
    }

    /// One-line rendering of the subtree at `id`.
    pub fn render(&self, id: NodeId) -> String {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Number(value) => value.to_string(),
            NodeKind::Ident(name) => match node.right {
                Some(index) => format!("{}[{}]", name, self.render(index)),
                None => name.clone(),
            },
            NodeKind::Keyword(keyword) => {
                let child = |child: Option<NodeId>| match child {
                    Some(child) => self.render(child),
                    None => "_".to_string(),
                };
                format!("{{ {} {} {} }}", keyword, child(node.left), child(node.right))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSIGN: &str = "
keyword: stmt
right:
  keyword: assign
  left:
    ident: a
    index: 5
  right:
    keyword: add
    left: 1
    right: { ident: x }
";

    #[test]
    fn load_yaml() {
        let ast = Ast::from_yaml(ASSIGN).unwrap();
        let root = ast.root().unwrap();
        assert_eq!(ast.as_keyword(root), Some(Keyword::Stmt));
        assert_eq!(ast.left(root), None);

        let assign = ast.right(root).unwrap();
        let target = ast.left(assign).unwrap();
        assert_eq!(ast.as_ident(target), Some("a"));
        assert_eq!(ast.right(target).and_then(|i| ast.as_number(i)), Some(5.0));

        assert_eq!(ast.render(root), "{ stmt _ { assign a[5] { add 1 x } } }");
    }

    #[test]
    fn tree_round_trip() {
        let ast = Ast::from_yaml(ASSIGN).unwrap();
        let root = ast.root().unwrap();
        let again = Ast::from_tree(&ast.to_tree(root));
        assert_eq!(again.render(again.root().unwrap()), ast.render(root));
    }

    #[test]
    fn null_document() {
        let ast = Ast::from_yaml("~").unwrap();
        assert_eq!(ast.root(), None);
    }

    #[test]
    fn unknown_keyword() {
        assert!(matches!(
            Ast::from_yaml("keyword: goto"),
            Err(Error::Yaml(_))
        ));
    }
}
