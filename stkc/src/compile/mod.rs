mod call;
mod code;
mod expr;
mod func;
mod stmt;

pub use code::{Code, Item, Line};

use crate::ast::{Ast, NodeId};
use crate::error::Error;
use crate::symbols::{FuncTable, ScopeTable, VarInfo};
use arch::inst::{Addr, Inst, Operand};
use arch::reg::Reg;
use itertools::chain;

/// Listing layout. Neither field changes the emitted instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Spaces per nesting level
    pub indent: usize,
    /// Emit `; IF` / `; WHILE` annotations
    pub comments: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent: 4,
            comments: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    /// May declare the variable in the current scope
    Write,
}

/// Lowers AST subtrees into stack machine code.
///
/// Holds the global scope for the whole compilation and at most one local
/// scope, bracketing a single function body. Without a local scope the
/// global one is current, which is how top-level initializers are compiled.
pub struct Generator<'a> {
    ast: &'a Ast,
    funcs: &'a FuncTable,
    global: ScopeTable,
    local: Option<ScopeTable>,
}

impl<'a> Generator<'a> {
    pub fn new(ast: &'a Ast, funcs: &'a FuncTable) -> Self {
        Self {
            ast,
            funcs,
            global: ScopeTable::new(Reg::CX),
            local: None,
        }
    }

    pub fn global(&self) -> &ScopeTable {
        &self.global
    }

    pub fn into_global(self) -> ScopeTable {
        self.global
    }

    fn scope(&self) -> &ScopeTable {
        self.local.as_ref().unwrap_or(&self.global)
    }

    fn scope_mut(&mut self) -> &mut ScopeTable {
        match &mut self.local {
            Some(local) => local,
            None => &mut self.global,
        }
    }

    fn enter(&mut self) {
        debug_assert!(self.local.is_none(), "function scopes do not nest");
        self.local = Some(ScopeTable::new(Reg::BX));
    }

    fn leave(&mut self) -> ScopeTable {
        self.local
            .take()
            .unwrap_or_else(|| ScopeTable::new(Reg::BX))
    }

    /// Global scope first, then the local one.
    fn find(&self, name: &str) -> Option<(&ScopeTable, &VarInfo)> {
        if let Some(var) = self.global.find(name) {
            return Some((&self.global, var));
        }
        let local = self.local.as_ref()?;
        local.find(name).map(|var| (local, var))
    }

    /// Resolve the identifier at `node` and load its element shift into `hx`.
    ///
    /// A write to an unknown name declares it in the current scope and
    /// addresses its first element.
    fn variable(&mut self, node: NodeId, access: Access) -> Result<(Addr, Code), Error> {
        let ast = self.ast;
        let name = ast.expect_ident(node)?;
        let indexed = ast.right(node).is_some();

        let found = self
            .find(name)
            .map(|(scope, var)| (scope.address(var), var.is_array()));
        match (found, access) {
            (Some((addr, is_array)), _) => {
                if is_array != indexed {
                    return Err(Error::ShapeMismatch(node, name.to_string()));
                }
                Ok((addr, self.compile_shift(node)?))
            }
            (None, Access::Write) => {
                let scope = self.scope_mut();
                let var = scope.add(ast, node)?.clone();
                Ok((scope.address(&var), shift_zero()))
            }
            (None, Access::Read) => Err(Error::UnresolvedVariable(node, name.to_string())),
        }
    }

    /// Evaluate the index of `node`, or 0 without one, into `hx`.
    fn compile_shift(&mut self, node: NodeId) -> Result<Code, Error> {
        let index = match self.ast.right(node) {
            Some(index) => self.compile_expr(index)?,
            None => Inst::PUSH(Operand::Num(0.0)).into(),
        };
        Ok(chain!(index, Code::from(Inst::POP(Some(Operand::Reg(Reg::HX))))).collect())
    }
}

fn shift_zero() -> Code {
    Code::from(vec![
        Inst::PUSH(Operand::Num(0.0)),
        Inst::POP(Some(Operand::Reg(Reg::HX))),
    ])
}
