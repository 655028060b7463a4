use crate::ast::{Ast, NodeId};
use crate::error::Error;
use arch::{inst::Addr, reg::Reg};
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct VarInfo {
    pub name: String,
    /// Declaring identifier
    pub node: NodeId,
    pub shift: usize,
    /// Element count of an array, `None` for a scalar
    pub len: Option<usize>,
}

impl VarInfo {
    pub fn is_array(&self) -> bool {
        self.len.is_some()
    }

    pub fn size(&self) -> usize {
        self.len.unwrap_or(1)
    }
}

/// Largest number of slots a frame may hold.
pub const MAX_FRAME: usize = i32::MAX as usize;

/// Variables of one frame, addressed relative to `base`.
#[derive(Debug, Clone)]
pub struct ScopeTable {
    base: Reg,
    vars: IndexMap<String, VarInfo>,
    shift: usize,
    staged: usize,
}

impl ScopeTable {
    pub fn new(base: Reg) -> Self {
        Self {
            base,
            vars: IndexMap::new(),
            shift: 0,
            staged: 0,
        }
    }

    pub fn base(&self) -> Reg {
        self.base
    }

    /// Current frame size, including staged argument slots.
    pub fn shift(&self) -> usize {
        self.shift
    }

    pub fn vars(&self) -> impl Iterator<Item = &VarInfo> {
        self.vars.values()
    }

    /// Declare the identifier at `node`. `a` takes one slot, `a[N]` takes N.
    pub fn add(&mut self, ast: &Ast, node: NodeId) -> Result<&VarInfo, Error> {
        let name = ast.expect_ident(node)?;
        if self.vars.contains_key(name) {
            return Err(Error::DuplicateVariable(node, name.to_string()));
        }

        let invalid = || Error::InvalidDeclaration(node, name.to_string());
        let len = match ast.right(node) {
            None => None,
            Some(index) => match ast.as_number(index) {
                Some(len) if len >= 1.0 && len.fract() == 0.0 && len <= MAX_FRAME as f64 => {
                    Some(len as usize)
                }
                _ => return Err(invalid()),
            },
        };

        let info = VarInfo {
            name: name.to_string(),
            node,
            shift: self.shift,
            len,
        };
        self.shift = match self.shift.checked_add(info.size()) {
            Some(end) if end <= MAX_FRAME => end,
            _ => return Err(invalid()),
        };
        Ok(self.vars.entry(info.name.clone()).or_insert(info))
    }

    pub fn find(&self, name: &str) -> Option<&VarInfo> {
        self.vars.get(name)
    }

    /// Reserve an unnamed slot on top of the frame for a call argument.
    pub fn add_param(&mut self) -> usize {
        let slot = self.shift;
        self.shift += 1;
        self.staged += 1;
        slot
    }

    /// Release the most recently reserved argument slot.
    pub fn pop(&mut self) -> Option<usize> {
        if self.staged == 0 {
            return None;
        }
        self.staged -= 1;
        self.shift -= 1;
        Some(self.shift)
    }

    /// `base + shift + hx`
    pub fn address(&self, var: &VarInfo) -> Addr {
        Addr::indexed(self.base, var.shift, Reg::HX)
    }

    /// `base + slot`
    pub fn slot(&self, slot: usize) -> Addr {
        Addr::new(self.base, slot)
    }
}

impl fmt::Display for ScopeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scope {} (size {})", self.base, self.shift)?;
        for var in self.vars() {
            match var.len {
                Some(len) => writeln!(f, "  {} @ {} [{}]", var.name, var.shift, len)?,
                None => writeln!(f, "  {} @ {}", var.name, var.shift)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_follow_declaration_order() {
        let mut ast = Ast::new();
        let x = ast.ident("x");
        let five = ast.number(5.0);
        let a = ast.indexed("a", five);
        let y = ast.ident("y");

        let mut scope = ScopeTable::new(Reg::BX);
        assert_eq!(scope.add(&ast, x).unwrap().shift, 0);
        let info = scope.add(&ast, a).unwrap();
        assert_eq!((info.shift, info.len), (1, Some(5)));
        assert_eq!(scope.add(&ast, y).unwrap().shift, 6);
        assert_eq!(scope.shift(), 7);

        assert!(scope.find("a").unwrap().is_array());
        assert!(scope.find("z").is_none());
    }

    #[test]
    fn duplicate_name() {
        let mut ast = Ast::new();
        let first = ast.ident("x");
        let second = ast.ident("x");

        let mut scope = ScopeTable::new(Reg::CX);
        scope.add(&ast, first).unwrap();
        assert!(matches!(
            scope.add(&ast, second),
            Err(Error::DuplicateVariable(node, _)) if node == second
        ));
        assert_eq!(scope.shift(), 1);
    }

    #[test]
    fn array_length_must_be_literal() {
        let mut ast = Ast::new();
        let i = ast.ident("i");
        let by_var = ast.indexed("a", i);
        let zero = ast.number(0.0);
        let empty = ast.indexed("b", zero);
        let half = ast.number(2.5);
        let frac = ast.indexed("c", half);
        let number = ast.number(1.0);

        let mut scope = ScopeTable::new(Reg::BX);
        for node in [by_var, empty, frac] {
            assert!(matches!(
                scope.add(&ast, node),
                Err(Error::InvalidDeclaration(found, _)) if found == node
            ));
        }
        assert!(matches!(
            scope.add(&ast, number),
            Err(Error::ExpectedIdent(_))
        ));
        assert_eq!(scope.shift(), 0);
    }

    #[test]
    fn frame_size_is_bounded() {
        let mut ast = Ast::new();
        let huge = ast.number(1e300);
        let a = ast.indexed("a", huge);
        let half = ast.number(2e9);
        let b = ast.indexed("b", half);
        let half = ast.number(2e9);
        let c = ast.indexed("c", half);

        let mut scope = ScopeTable::new(Reg::BX);
        assert!(matches!(
            scope.add(&ast, a),
            Err(Error::InvalidDeclaration(node, _)) if node == a
        ));
        assert_eq!(scope.add(&ast, b).unwrap().len, Some(2_000_000_000));
        assert!(matches!(
            scope.add(&ast, c),
            Err(Error::InvalidDeclaration(node, _)) if node == c
        ));
        assert_eq!(scope.shift(), 2_000_000_000);
        assert!(scope.find("c").is_none());
    }

    #[test]
    fn staged_slots() {
        let mut ast = Ast::new();
        let x = ast.ident("x");
        let y = ast.ident("y");

        let mut scope = ScopeTable::new(Reg::BX);
        scope.add(&ast, x).unwrap();
        assert_eq!(scope.add_param(), 1);
        assert_eq!(scope.add_param(), 2);
        assert_eq!(scope.pop(), Some(2));
        assert_eq!(scope.pop(), Some(1));
        assert_eq!(scope.pop(), None);

        // released slots are reused by later declarations
        assert_eq!(scope.add(&ast, y).unwrap().shift, 1);
    }

    #[test]
    fn addresses() {
        let mut ast = Ast::new();
        let x = ast.ident("x");
        let mut scope = ScopeTable::new(Reg::CX);
        let info = scope.add(&ast, x).unwrap().clone();
        assert_eq!(scope.address(&info).to_string(), "cx + 0 + hx");
        assert_eq!(scope.slot(3).to_string(), "cx + 3");
    }

    #[test]
    fn dump() {
        let mut ast = Ast::new();
        let x = ast.ident("x");
        let two = ast.number(2.0);
        let a = ast.indexed("a", two);
        let mut scope = ScopeTable::new(Reg::BX);
        scope.add(&ast, x).unwrap();
        scope.add(&ast, a).unwrap();
        assert_eq!(scope.to_string(), "scope bx (size 3)\n  x @ 0\n  a @ 1 [2]\n");
    }
}
