use crate::ast::{Ast, Keyword};
use crate::compile::{Code, Generator, Options};
use crate::error::Error;
use crate::symbols::{FuncTable, ScopeTable};
use arch::inst::{Inst, Operand};
use arch::reg::Reg;
use indexmap::IndexMap;
use itertools::chain;

/// Function called by the preamble.
pub const ENTRY: &str = "main";

#[derive(Debug, Clone)]
pub struct Program {
    pub code: Code,
    pub funcs: FuncTable,
    pub globals: ScopeTable,
    /// Final local table of each function
    pub frames: IndexMap<String, ScopeTable>,
}

impl Program {
    pub fn render(&self, options: &Options) -> String {
        self.code.render(options)
    }
}

/// Compile a whole program.
///
/// 1. Collect every function.
/// 2. Declare globals and emit their initializers, in source order.
/// 3. Emit the preamble: place the first frame past the globals, call `main`, halt.
/// 4. Compile each function body.
pub fn compile_tree(ast: &Ast) -> Result<Program, Error> {
    let root = ast.root().ok_or(Error::EmptyProgram)?;

    let funcs = FuncTable::build(ast, root)?;
    tracing::debug!("{}", funcs);
    if funcs.get(ENTRY).is_none() {
        tracing::warn!("no `{}` function, the preamble call will not resolve", ENTRY);
    }

    let mut gen = Generator::new(ast, &funcs);
    let mut init = Code::new();
    for stmt in ast.elements(root, Keyword::Stmt)? {
        match ast.as_keyword(stmt) {
            Some(Keyword::Assign) => init.append(gen.compile_assign(stmt)?),
            Some(Keyword::Define) => {}
            _ => tracing::warn!("ignoring top-level statement {}", ast.render(stmt)),
        }
    }
    tracing::debug!("globals: {}", gen.global());

    let preamble = Code::from(vec![
        Inst::PUSH(Operand::Reg(Reg::CX)),
        Inst::PUSH(Operand::Num(gen.global().shift() as f64)),
        Inst::ADD(),
        Inst::POP(Some(Operand::Reg(Reg::BX))),
        Inst::CALL(ENTRY.to_string()),
        Inst::HLT(),
    ]);

    let mut bodies = Code::new();
    let mut frames = IndexMap::new();
    for func in funcs.iter() {
        let (code, local) = gen.compile_function(func)?;
        bodies.append(code);
        frames.insert(func.name.clone(), local);
    }

    let globals = gen.into_global();
    let code = chain!(init, preamble, bodies).collect();
    Ok(Program {
        code,
        funcs,
        globals,
        frames,
    })
}
