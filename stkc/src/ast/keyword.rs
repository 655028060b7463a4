use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    // Structure
    Stmt,     // left: rest of the chain, right: statement
    Param,    // left: rest of the chain, right: parameter or argument
    Define,   // left: func, right: body
    Func,     // left: name, right: params
    Assign,   // left: target, right: value
    If,       // left: condition, right: decision
    Decision, // left: then, right: else
    While,    // left: condition, right: body
    Return,   // right: value
    Show,     // left: target, right: value
    Out,      // right: value
    Call,     // left: name, right: args

    // Operators
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Eq,
    Neq,
    Greater,
    Less,
    GreaterEq,
    LessEq,
    Not,
    And,
    Or,
    Sin,
    Cos,
    Int,
    In,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Takes no operand
    Nullary,
    /// Operand in `right`
    Unary,
    Binary,
}

impl Keyword {
    /// Operand count for operator keywords, `None` for structural ones.
    pub fn arity(&self) -> Option<Arity> {
        use Keyword::*;
        match self {
            Add | Sub | Mul | Div | Pow | Eq | Neq | Greater | Less | GreaterEq | LessEq | And
            | Or => Some(Arity::Binary),
            Not | Sin | Cos | Int => Some(Arity::Unary),
            In => Some(Arity::Nullary),
            Stmt | Param | Define | Func | Assign | If | Decision | While | Return | Show | Out
            | Call => None,
        }
    }
}
