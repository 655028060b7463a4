mod ast;
mod compile;
mod driver;
mod error;
mod symbols;
mod util;

pub use ast::{Arity, Ast, Keyword, Node, NodeId, NodeKind, Tree};
pub use compile::{Code, Generator, Item, Line, Options};
pub use driver::{compile_tree, Program, ENTRY};
pub use error::Error;
pub use symbols::{FuncInfo, FuncTable, ScopeTable, VarInfo};
pub use util::display::print_program;
pub use util::maps::{FuncEntry, SymbolMap, VarEntry};
