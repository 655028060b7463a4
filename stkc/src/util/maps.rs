use crate::driver::Program;
use crate::error::Error;
use crate::symbols::ScopeTable;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SymbolMap {
    pub functions: IndexMap<String, FuncEntry>,
    pub globals: IndexMap<String, VarEntry>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FuncEntry {
    pub arity: usize,
    /// Slots used by the frame, parameters included
    pub frame: usize,
    pub locals: IndexMap<String, VarEntry>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct VarEntry {
    /// Offset from the frame base
    pub shift: usize,
    pub size: usize,
}

impl SymbolMap {
    pub fn generate(program: &Program) -> Self {
        let functions = program
            .funcs
            .iter()
            .filter_map(|func| {
                let frame = program.frames.get(&func.name)?;
                let entry = FuncEntry {
                    arity: func.arity(),
                    frame: frame.shift(),
                    locals: vars(frame),
                };
                Some((func.name.clone(), entry))
            })
            .collect();

        SymbolMap {
            functions,
            globals: vars(&program.globals),
        }
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn vars(scope: &ScopeTable) -> IndexMap<String, VarEntry> {
    scope
        .vars()
        .map(|var| {
            let entry = VarEntry {
                shift: var.shift,
                size: var.size(),
            };
            (var.name.clone(), entry)
        })
        .collect()
}
