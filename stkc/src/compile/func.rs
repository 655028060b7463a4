use super::{Code, Generator};
use crate::error::Error;
use crate::symbols::{FuncInfo, ScopeTable};
use itertools::chain;

impl<'a> Generator<'a> {
    /// Compile one function under its own label. Returns the code and the
    /// final local table.
    pub fn compile_function(&mut self, func: &FuncInfo) -> Result<(Code, ScopeTable), Error> {
        let body = func
            .body
            .ok_or(Error::MissingChild(func.node, "function body"))?;

        self.enter();
        let code = self
            .declare_params(func)
            .and_then(|_| self.compile_block(Some(body)));
        let local = self.leave();
        let code = code?;

        tracing::debug!("local table of {}:\n{}", func.name, local);
        let code = chain!(Code::label(&func.name), code.indented()).collect();
        Ok((code, local))
    }

    /// Parameters take the lowest slots of the frame, in order.
    fn declare_params(&mut self, func: &FuncInfo) -> Result<(), Error> {
        let ast = self.ast;
        for &param in &func.params {
            let name = ast.expect_ident(param)?;
            if ast.right(param).is_some() {
                return Err(Error::InvalidDeclaration(param, name.to_string()));
            }
            if self.global.find(name).is_some() {
                return Err(Error::DuplicateVariable(param, name.to_string()));
            }
            self.scope_mut().add(ast, param)?;
        }
        Ok(())
    }
}
