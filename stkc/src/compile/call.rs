use super::{Code, Generator};
use crate::ast::{Keyword, NodeId};
use crate::error::Error;
use arch::inst::{Inst, Operand};
use arch::reg::Reg;
use itertools::chain;

impl<'a> Generator<'a> {
    /// Call `f(args...)`, leaving its result on the stack.
    ///
    /// Arguments are staged in slots on top of the caller's frame. The callee
    /// frame starts right at the first staged slot, so argument `i` lands on
    /// parameter `i`.
    pub(super) fn compile_call(&mut self, call: NodeId) -> Result<Code, Error> {
        let (ast, funcs) = (self.ast, self.funcs);
        let callee = funcs.lookup(ast, call)?;
        let args = ast.elements_of(ast.right(call), Keyword::Param)?;
        if args.len() != callee.arity() {
            return Err(Error::ArityMismatch(
                call,
                callee.name.clone(),
                callee.arity(),
                args.len(),
            ));
        }

        let mut staging = Code::new();
        for &arg in &args {
            staging.append(self.compile_expr(arg)?);
            let slot = self.scope_mut().add_param();
            let slot = self.scope().slot(slot);
            staging.append(Inst::POP(Some(Operand::Mem(slot))).into());
        }
        for _ in &args {
            self.scope_mut().pop();
        }

        let base = self.scope().base();
        let frame = self.scope().shift();
        tracing::trace!("call {} with frame shift {} from {}", callee.name, frame, base);

        let frame = Operand::Num(frame as f64);
        Ok(chain!(
            staging,
            Code::from(vec![
                Inst::PUSH(Operand::Reg(base)),
                Inst::PUSH(frame.clone()),
                Inst::ADD(),
                Inst::POP(Some(Operand::Reg(Reg::BX))),
                Inst::CALL(callee.name.clone()),
                Inst::PUSH(Operand::Reg(Reg::AX)),
                Inst::PUSH(Operand::Reg(Reg::BX)),
                Inst::PUSH(frame),
                Inst::SUB(),
                Inst::POP(Some(Operand::Reg(Reg::BX))),
            ])
        )
        .collect())
    }
}
