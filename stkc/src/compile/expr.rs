use super::{Access, Code, Generator};
use crate::ast::{Arity, Keyword, NodeId, NodeKind};
use crate::error::Error;
use arch::inst::{Inst, Operand};
use itertools::chain;

impl<'a> Generator<'a> {
    /// Code leaving exactly one value on the stack.
    pub(super) fn compile_expr(&mut self, node: NodeId) -> Result<Code, Error> {
        let ast = self.ast;
        match ast.kind(node) {
            NodeKind::Number(value) => Ok(Inst::PUSH(Operand::Num(*value)).into()),
            NodeKind::Ident(_) => {
                let (addr, shift) = self.variable(node, Access::Read)?;
                Ok(chain!(shift, Code::from(Inst::PUSH(Operand::Mem(addr)))).collect())
            }
            NodeKind::Keyword(Keyword::Call) => self.compile_call(node),
            NodeKind::Keyword(tag) => self.compile_operator(node, *tag),
        }
    }

    /// Operands in post-order, then the operator. Both sides of `and`/`or`
    /// are always evaluated.
    fn compile_operator(&mut self, node: NodeId, tag: Keyword) -> Result<Code, Error> {
        let ast = self.ast;
        let (arity, inst) = match (tag.arity(), operator(tag)) {
            (Some(arity), Some(inst)) => (arity, inst),
            _ => return Err(Error::UnexpectedNode(node, "expression".to_string())),
        };

        let operands = match arity {
            Arity::Binary => {
                let lhs = self.compile_expr(ast.require_left(node, "left operand")?)?;
                let rhs = self.compile_expr(ast.require_right(node, "right operand")?)?;
                chain!(lhs, rhs).collect::<Code>()
            }
            Arity::Unary => self.compile_expr(ast.require_right(node, "operand")?)?,
            Arity::Nullary => match ast.right(node) {
                Some(operand) => self.compile_expr(operand)?,
                None => Code::new(),
            },
        };
        Ok(chain!(operands, Code::from(inst)).collect())
    }
}

fn operator(tag: Keyword) -> Option<Inst> {
    let inst = match tag {
        Keyword::Add => Inst::ADD(),
        Keyword::Sub => Inst::SUB(),
        Keyword::Mul => Inst::MUL(),
        Keyword::Div => Inst::DIV(),
        Keyword::Pow => Inst::POW(),
        Keyword::Eq => Inst::EQ(),
        Keyword::Neq => Inst::NEQ(),
        Keyword::Greater => Inst::AB(),
        Keyword::Less => Inst::BE(),
        Keyword::GreaterEq => Inst::AEQ(),
        Keyword::LessEq => Inst::BEQ(),
        Keyword::Not => Inst::NOT(),
        Keyword::And => Inst::AND(),
        Keyword::Or => Inst::OR(),
        Keyword::Sin => Inst::SIN(),
        Keyword::Cos => Inst::COS(),
        Keyword::Int => Inst::INT(),
        Keyword::In => Inst::IN(),
        _ => return None,
    };
    Some(inst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ast;
    use crate::symbols::FuncTable;

    fn compile(ast: &Ast, node: NodeId) -> Result<Vec<String>, Error> {
        let funcs = FuncTable::new();
        let mut gen = Generator::new(ast, &funcs);
        let code = gen.compile_expr(node)?;
        Ok(code.insts().map(|inst| inst.to_string()).collect())
    }

    macro_rules! case {
        ($name:ident: |$ast:ident| $build:expr => [$($inst:expr),*]) => {
            #[test]
            fn $name() {
                let mut $ast = Ast::new();
                let node = $build;
                let expected: Vec<String> = vec![$($inst.to_string()),*];
                assert_eq!(compile(&$ast, node).unwrap(), expected);
            }
        };
    }

    case!(number: |ast| ast.number(2.5) => ["push 2.5"]);

    case!(post_order: |ast| {
        let a = ast.number(1.0);
        let b = ast.number(2.0);
        let c = ast.number(3.0);
        let mul = ast.binary(Keyword::Mul, b, c);
        ast.binary(Keyword::Sub, a, mul)
    } => ["push 1", "push 2", "push 3", "mul", "sub"]);

    case!(comparisons: |ast| {
        let a = ast.number(1.0);
        let b = ast.number(2.0);
        let ge = ast.binary(Keyword::GreaterEq, a, b);
        let c = ast.number(3.0);
        let lt = ast.binary(Keyword::Less, ge, c);
        ast.unary(Keyword::Not, lt)
    } => ["push 1", "push 2", "aeq", "push 3", "be", "not"]);

    case!(no_short_circuit: |ast| {
        let a = ast.number(0.0);
        let b = ast.keyword(Keyword::In, None, None);
        ast.binary(Keyword::And, a, b)
    } => ["push 0", "in", "and"]);

    case!(intrinsics: |ast| {
        let x = ast.number(0.5);
        let sin = ast.unary(Keyword::Sin, x);
        ast.unary(Keyword::Int, sin)
    } => ["push 0.5", "sin", "int"]);

    #[test]
    fn missing_operand() {
        let mut ast = Ast::new();
        let one = ast.number(1.0);
        let add = ast.keyword(Keyword::Add, Some(one), None);
        let cos = ast.keyword(Keyword::Cos, None, None);
        assert!(matches!(compile(&ast, add), Err(Error::MissingChild(node, _)) if node == add));
        assert!(matches!(compile(&ast, cos), Err(Error::MissingChild(node, _)) if node == cos));
    }

    #[test]
    fn statement_in_expression() {
        let mut ast = Ast::new();
        let one = ast.number(1.0);
        let out = ast.unary(Keyword::Out, one);
        assert!(matches!(compile(&ast, out), Err(Error::UnexpectedNode(node, _)) if node == out));
    }

    #[test]
    fn unresolved_read() {
        let mut ast = Ast::new();
        let x = ast.ident("x");
        assert!(matches!(
            compile(&ast, x),
            Err(Error::UnresolvedVariable(node, name)) if node == x && name == "x"
        ));
    }
}
