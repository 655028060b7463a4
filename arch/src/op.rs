use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    PUSH,
    POP,
    ADD,
    SUB,
    MUL,
    DIV,
    POW,
    EQ,
    NEQ,
    AB,
    BE,
    AEQ,
    BEQ,
    NOT,
    AND,
    OR,
    SIN,
    COS,
    INT,
    IN,
    JMP,
    JE,
    CALL,
    RET,
    HLT,
    OUT,
    SHW,
}

impl OpKind {
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        match s.to_ascii_lowercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(ParseError::UnknownOperation(s.to_string())),
        }
    }
}
