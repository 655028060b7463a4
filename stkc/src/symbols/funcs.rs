use crate::ast::{Ast, Keyword, NodeId};
use crate::error::Error;
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct FuncInfo {
    pub name: String,
    /// The `define` node
    pub node: NodeId,
    /// Formal parameter identifiers, in order
    pub params: Vec<NodeId>,
    pub body: Option<NodeId>,
}

impl FuncInfo {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// `name(a, b)`
    pub fn signature(&self, ast: &Ast) -> String {
        let params = self
            .params
            .iter()
            .map(|&param| ast.as_ident(param).unwrap_or("?"))
            .join(", ");
        format!("{}({})", self.name, params)
    }
}

/// Every function of the program, collected before any body is compiled.
#[derive(Debug, Clone, Default)]
pub struct FuncTable(IndexMap<String, FuncInfo>);

impl FuncTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the function defined at `define`.
    pub fn declare(&mut self, ast: &Ast, define: NodeId) -> Result<&FuncInfo, Error> {
        ast.expect_keyword(define, Keyword::Define)?;
        let func = ast.require_left(define, "function header")?;
        ast.expect_keyword(func, Keyword::Func)?;
        let name_node = ast.require_left(func, "function name")?;
        let name = ast.expect_ident(name_node)?;

        // Function names are labels; `.` is reserved for generated ones
        let is_label = |c: char| c == '.' || c == ':' || c.is_whitespace();
        if name.is_empty() || name.contains(is_label) {
            return Err(Error::InvalidDeclaration(name_node, name.to_string()));
        }
        if self.0.contains_key(name) {
            return Err(Error::DuplicateFunction(name_node, name.to_string()));
        }

        let params = ast.elements_of(ast.right(func), Keyword::Param)?;
        let info = FuncInfo {
            name: name.to_string(),
            node: define,
            params,
            body: ast.right(define),
        };
        Ok(self.0.entry(info.name.clone()).or_insert(info))
    }

    /// Declare every top-level `define` in source order.
    pub fn build(ast: &Ast, root: NodeId) -> Result<Self, Error> {
        let mut table = Self::new();
        for stmt in ast.elements(root, Keyword::Stmt)? {
            if ast.as_keyword(stmt) == Some(Keyword::Define) {
                table.declare(ast, stmt)?;
            }
        }
        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<&FuncInfo> {
        self.0.get(name)
    }

    /// Resolve the callee of a `call` node.
    pub fn lookup(&self, ast: &Ast, call: NodeId) -> Result<&FuncInfo, Error> {
        let callee = ast.require_left(call, "callee")?;
        let name = ast.expect_ident(callee)?;
        self.get(name)
            .ok_or_else(|| Error::UnknownFunction(callee, name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuncInfo> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FuncTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "functions ({})", self.len())?;
        for func in self.iter() {
            writeln!(f, "  {}/{}", func.name, func.arity())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_in_source_order() {
        let mut ast = Ast::new();
        let main = ast.define("main", &[], &[]);
        let add = ast.define("add", &["a", "b"], &[]);
        let root = ast.program(&[main, add]).unwrap();
        let funcs = FuncTable::build(&ast, root).unwrap();

        let names: Vec<&str> = funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["main", "add"]);
        assert_eq!(funcs.get("add").unwrap().arity(), 2);
        assert_eq!(funcs.get("add").unwrap().signature(&ast), "add(a, b)");
        assert_eq!(funcs.get("main").unwrap().arity(), 0);
        assert_eq!(funcs.to_string(), "functions (2)\n  main/0\n  add/2\n");
    }

    #[test]
    fn only_defines_are_collected() {
        let mut ast = Ast::new();
        let one = ast.number(1.0);
        let g = ast.ident("g");
        let init = ast.assign(g, one);
        let root = ast.program(&[init]).unwrap();
        let funcs = FuncTable::build(&ast, root).unwrap();
        assert!(funcs.is_empty());
        assert_eq!(funcs.to_string(), "functions (0)\n");
    }

    #[test]
    fn names_must_be_plain_labels() {
        for name in ["while.3", "a:b", "two words", ""] {
            let mut ast = Ast::new();
            let define = ast.define(name, &[], &[]);
            let mut funcs = FuncTable::new();
            assert!(matches!(
                funcs.declare(&ast, define),
                Err(Error::InvalidDeclaration(_, found)) if found == name
            ));
        }
    }

    #[test]
    fn duplicate_function() {
        let mut ast = Ast::new();
        let first = ast.define("f", &[], &[]);
        let second = ast.define("f", &["x"], &[]);
        let root = ast.program(&[first, second]).unwrap();
        assert!(matches!(
            FuncTable::build(&ast, root),
            Err(Error::DuplicateFunction(_, name)) if name == "f"
        ));
    }

    #[test]
    fn lookup_callee() {
        let mut ast = Ast::new();
        let f = ast.define("f", &["x"], &[]);
        let root = ast.program(&[f]).unwrap();
        let funcs = FuncTable::build(&ast, root).unwrap();

        let one = ast.number(1.0);
        let known = ast.call("f", &[one]);
        let unknown = ast.call("g", &[]);
        assert_eq!(funcs.lookup(&ast, known).unwrap().name, "f");
        assert!(matches!(
            funcs.lookup(&ast, unknown),
            Err(Error::UnknownFunction(_, name)) if name == "g"
        ));
    }

    #[test]
    fn header_must_be_func() {
        let mut ast = Ast::new();
        let name = ast.ident("f");
        let bogus = ast.keyword(Keyword::Call, Some(name), None);
        let define = ast.keyword(Keyword::Define, Some(bogus), None);
        let mut funcs = FuncTable::new();
        assert!(matches!(
            funcs.declare(&ast, define),
            Err(Error::UnexpectedNode(node, _)) if node == bogus
        ));
    }
}
