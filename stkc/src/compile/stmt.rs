use super::{Access, Code, Generator};
use crate::ast::{Keyword, NodeId};
use crate::error::Error;
use arch::inst::{Inst, Operand};
use arch::reg::Reg;
use itertools::chain;

impl<'a> Generator<'a> {
    /// Compile a `stmt` chain in source order.
    pub(super) fn compile_block(&mut self, head: Option<NodeId>) -> Result<Code, Error> {
        self.ast
            .elements_of(head, Keyword::Stmt)?
            .into_iter()
            .map(|stmt| self.compile_stmt(stmt))
            .collect()
    }

    fn compile_stmt(&mut self, stmt: NodeId) -> Result<Code, Error> {
        let ast = self.ast;
        match ast.as_keyword(stmt) {
            Some(Keyword::Assign) => self.compile_assign(stmt),
            Some(Keyword::If) => self.compile_if(stmt),
            Some(Keyword::While) => self.compile_while(stmt),
            Some(Keyword::Return) => self.compile_return(stmt),
            Some(Keyword::Show) => self.compile_show(stmt),
            Some(Keyword::Out) => {
                let value = self.compile_expr(ast.require_right(stmt, "output value")?)?;
                Ok(chain!(value, Code::from(Inst::OUT())).collect())
            }
            // Result of a call statement is dropped
            Some(Keyword::Call) => {
                let call = self.compile_call(stmt)?;
                Ok(chain!(call, Code::from(Inst::POP(None))).collect())
            }
            Some(Keyword::Define) => Err(Error::NestedDefine(stmt)),
            _ => Err(Error::UnexpectedNode(stmt, "statement".to_string())),
        }
    }

    /// `target = value`, declaring `target` on first write.
    pub(crate) fn compile_assign(&mut self, stmt: NodeId) -> Result<Code, Error> {
        let ast = self.ast;
        ast.expect_keyword(stmt, Keyword::Assign)?;
        let target = ast.require_left(stmt, "assignment target")?;
        let value = self.compile_expr(ast.require_right(stmt, "assigned value")?)?;
        let (addr, shift) = self.variable(target, Access::Write)?;
        Ok(chain!(value, shift, Code::from(Inst::POP(Some(Operand::Mem(addr))))).collect())
    }

    fn compile_if(&mut self, stmt: NodeId) -> Result<Code, Error> {
        let ast = self.ast;
        let cond = ast.require_left(stmt, "condition")?;
        let decision = ast.require_right(stmt, "branches")?;
        ast.expect_keyword(decision, Keyword::Decision)?;
        let then = ast.require_left(decision, "then branch")?;

        let fail = stmt.label("if_fail");
        let end = stmt.label("if_end");

        let test = chain!(
            self.compile_expr(cond)?,
            Code::from(vec![Inst::PUSH(Operand::Num(0.0)), Inst::JE(fail.clone())])
        );
        let then = self.compile_block(Some(then))?;
        let branches: Code = match ast.right(decision) {
            Some(otherwise) => chain!(
                then,
                Code::from(Inst::JMP(end.clone())),
                Code::label(&fail),
                self.compile_block(Some(otherwise))?,
                Code::label(&end)
            )
            .collect(),
            None => chain!(then, Code::label(&fail)).collect(),
        };

        let body: Code = chain!(test, branches).collect();
        Ok(chain!(Code::comment("IF"), body.indented()).collect())
    }

    fn compile_while(&mut self, stmt: NodeId) -> Result<Code, Error> {
        let ast = self.ast;
        let cond = ast.require_left(stmt, "condition")?;
        let body = ast.require_right(stmt, "loop body")?;

        let top = stmt.label("while");
        let end = stmt.label("while_end");

        let looped: Code = chain!(
            self.compile_expr(cond)?,
            Code::from(vec![Inst::PUSH(Operand::Num(0.0)), Inst::JE(end.clone())]),
            self.compile_block(Some(body))?,
            Code::from(Inst::JMP(top.clone()))
        )
        .collect();

        Ok(chain!(
            Code::comment("WHILE"),
            Code::label(&top),
            looped.indented(),
            Code::label(&end)
        )
        .collect())
    }

    fn compile_return(&mut self, stmt: NodeId) -> Result<Code, Error> {
        let value = self.compile_expr(self.ast.require_right(stmt, "return value")?)?;
        Ok(chain!(
            value,
            Code::from(vec![Inst::POP(Some(Operand::Reg(Reg::AX))), Inst::RET()])
        )
        .collect())
    }

    /// Push the target's address as a tag, then the value.
    fn compile_show(&mut self, stmt: NodeId) -> Result<Code, Error> {
        let ast = self.ast;
        let target = ast.require_left(stmt, "shown variable")?;
        let (addr, shift) = self.variable(target, Access::Read)?;
        let value = self.compile_expr(ast.require_right(stmt, "shown value")?)?;
        Ok(chain!(
            shift,
            Code::from(Inst::PUSH(Operand::Addr(addr))),
            value,
            Code::from(Inst::SHW())
        )
        .collect())
    }
}
