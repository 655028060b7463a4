use crate::{error::ParseError, op::OpKind, reg::Reg};

use color_print::cformat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `base + shift [+ index]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addr {
    pub base: Reg,
    pub shift: usize,
    pub index: Option<Reg>,
}

impl Addr {
    pub fn new(base: Reg, shift: usize) -> Self {
        Addr {
            base,
            shift,
            index: None,
        }
    }

    pub fn indexed(base: Reg, shift: usize, index: Reg) -> Self {
        Addr {
            base,
            shift,
            index: Some(index),
        }
    }

    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidOperand(s.to_string());
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (base, shift, index) = match parts.as_slice() {
            [base, shift] => (base, shift, None),
            [base, shift, index] => (base, shift, Some(index)),
            _ => return Err(invalid()),
        };
        let base = Reg::parse(base).map_err(|_| invalid())?;
        let shift = shift.parse::<usize>().map_err(|_| invalid())?;
        let index = match index {
            Some(index) => Some(Reg::parse(index).map_err(|_| invalid())?),
            None => None,
        };
        Ok(Addr { base, shift, index })
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{} + {} + {}", self.base, self.shift, index),
            None => write!(f, "{} + {}", self.base, self.shift),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Num(f64),
    Reg(Reg),
    /// Memory cell at the address, printed in brackets
    Mem(Addr),
    /// The address itself
    Addr(Addr),
}

impl Operand {
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        if let Some(inner) = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return Ok(Operand::Mem(Addr::parse(inner)?));
        }
        if let Ok(reg) = Reg::parse(s) {
            return Ok(Operand::Reg(reg));
        }
        if let Ok(num) = s.parse::<f64>() {
            return Ok(Operand::Num(num));
        }
        Ok(Operand::Addr(Addr::parse(s)?))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Num(num) => write!(f, "{}", num),
            Operand::Reg(reg) => write!(f, "{}", reg),
            Operand::Mem(addr) => write!(f, "[{}]", addr),
            Operand::Addr(addr) => write!(f, "{}", addr),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inst {
    PUSH(Operand),
    /// Without an operand the top of stack is discarded.
    POP(Option<Operand>),

    ADD(),
    SUB(),
    MUL(),
    DIV(),
    POW(),

    EQ(),
    NEQ(),
    AB(),
    BE(),
    AEQ(),
    BEQ(),
    NOT(),
    AND(),
    OR(),

    SIN(),
    COS(),
    INT(),
    IN(),

    JMP(String),
    JE(String),
    CALL(String),
    RET(),
    HLT(),

    OUT(),
    SHW(),
}

impl Inst {
    pub fn kind(&self) -> OpKind {
        match self {
            Inst::PUSH(_) => OpKind::PUSH,
            Inst::POP(_) => OpKind::POP,
            Inst::ADD() => OpKind::ADD,
            Inst::SUB() => OpKind::SUB,
            Inst::MUL() => OpKind::MUL,
            Inst::DIV() => OpKind::DIV,
            Inst::POW() => OpKind::POW,
            Inst::EQ() => OpKind::EQ,
            Inst::NEQ() => OpKind::NEQ,
            Inst::AB() => OpKind::AB,
            Inst::BE() => OpKind::BE,
            Inst::AEQ() => OpKind::AEQ,
            Inst::BEQ() => OpKind::BEQ,
            Inst::NOT() => OpKind::NOT,
            Inst::AND() => OpKind::AND,
            Inst::OR() => OpKind::OR,
            Inst::SIN() => OpKind::SIN,
            Inst::COS() => OpKind::COS,
            Inst::INT() => OpKind::INT,
            Inst::IN() => OpKind::IN,
            Inst::JMP(_) => OpKind::JMP,
            Inst::JE(_) => OpKind::JE,
            Inst::CALL(_) => OpKind::CALL,
            Inst::RET() => OpKind::RET,
            Inst::HLT() => OpKind::HLT,
            Inst::OUT() => OpKind::OUT,
            Inst::SHW() => OpKind::SHW,
        }
    }

    pub fn argument(&self) -> Option<String> {
        match self {
            Inst::PUSH(op) | Inst::POP(Some(op)) => Some(op.to_string()),
            Inst::JMP(label) | Inst::JE(label) | Inst::CALL(label) => Some(label.clone()),
            _ => None,
        }
    }

    /// Parse one line of the textual form produced by `Display`.
    pub fn parse(line: &str) -> Result<Inst, ParseError> {
        let line = line.trim();
        let (op, arg) = match line.split_once(char::is_whitespace) {
            Some((op, arg)) => (op, Some(arg.trim())),
            None => (line, None),
        };
        let kind = OpKind::parse(op)?;

        let inst = match (kind, arg) {
            (OpKind::PUSH, Some(arg)) => Inst::PUSH(Operand::parse(arg)?),
            (OpKind::POP, Some(arg)) => Inst::POP(Some(Operand::parse(arg)?)),
            (OpKind::POP, None) => Inst::POP(None),
            (OpKind::JMP, Some(arg)) => Inst::JMP(parse_label(arg)?),
            (OpKind::JE, Some(arg)) => Inst::JE(parse_label(arg)?),
            (OpKind::CALL, Some(arg)) => Inst::CALL(parse_label(arg)?),
            (OpKind::PUSH | OpKind::JMP | OpKind::JE | OpKind::CALL, None) => {
                return Err(ParseError::MissingArgument(op.to_string()))
            }
            (_, Some(_)) => return Err(ParseError::UnexpectedArgument(op.to_string())),
            (OpKind::ADD, None) => Inst::ADD(),
            (OpKind::SUB, None) => Inst::SUB(),
            (OpKind::MUL, None) => Inst::MUL(),
            (OpKind::DIV, None) => Inst::DIV(),
            (OpKind::POW, None) => Inst::POW(),
            (OpKind::EQ, None) => Inst::EQ(),
            (OpKind::NEQ, None) => Inst::NEQ(),
            (OpKind::AB, None) => Inst::AB(),
            (OpKind::BE, None) => Inst::BE(),
            (OpKind::AEQ, None) => Inst::AEQ(),
            (OpKind::BEQ, None) => Inst::BEQ(),
            (OpKind::NOT, None) => Inst::NOT(),
            (OpKind::AND, None) => Inst::AND(),
            (OpKind::OR, None) => Inst::OR(),
            (OpKind::SIN, None) => Inst::SIN(),
            (OpKind::COS, None) => Inst::COS(),
            (OpKind::INT, None) => Inst::INT(),
            (OpKind::IN, None) => Inst::IN(),
            (OpKind::RET, None) => Inst::RET(),
            (OpKind::HLT, None) => Inst::HLT(),
            (OpKind::OUT, None) => Inst::OUT(),
            (OpKind::SHW, None) => Inst::SHW(),
        };
        Ok(inst)
    }

    pub fn cformat(&self) -> String {
        let name = self.kind().to_string();
        match self {
            Inst::JMP(label) | Inst::JE(label) | Inst::CALL(label) => {
                cformat!("<r>{:<5}</><g>{}</>", name, label)
            }
            Inst::PUSH(Operand::Num(num)) => cformat!("<r>{:<5}</><y>{}</>", name, num),
            _ => match self.argument() {
                Some(arg) => cformat!("<r>{:<5}</><b>{}</>", name, arg),
                None => cformat!("<r>{}</>", name),
            },
        }
    }
}

fn parse_label(s: &str) -> Result<String, ParseError> {
    if s.is_empty() || s.contains(char::is_whitespace) {
        return Err(ParseError::InvalidLabel(s.to_string()));
    }
    Ok(s.to_string())
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument() {
            Some(arg) => write!(f, "{} {}", self.kind(), arg),
            None => write!(f, "{}", self.kind()),
        }
    }
}
