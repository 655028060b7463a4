pub mod error;
pub mod inst;
pub mod op;
pub mod reg;
