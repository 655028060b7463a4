mod funcs;
mod scope;

pub use funcs::{FuncInfo, FuncTable};
pub use scope::{ScopeTable, VarInfo};
